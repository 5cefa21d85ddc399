//! Account model and DTOs.

use campusdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Contains the password hash -- never serialize this directly. Use
/// [`AccountResponse`] or [`ProfileResponse`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub firstname: String,
    pub lastname: String,
    pub gender: String,
    pub phone: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub brgy: String,
    pub street: String,
    pub dob: Option<NaiveDate>,
    /// Public `/uploads/...` path of the current picture.
    pub profile_picture: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub firstname: String,
    pub lastname: String,
    pub gender: String,
    pub phone: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub brgy: String,
    pub street: String,
    pub dob: Option<NaiveDate>,
}

/// Login identity change. `None` leaves the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Personal details editable from the profile page.
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub dob: Option<NaiveDate>,
}

/// `GET /api/account` body.
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for AccountResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// `GET /api/profile` body.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub dob: Option<NaiveDate>,
    pub profile_picture: Option<String>,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            gender: user.gender.clone(),
            dob: user.dob,
            profile_picture: user.profile_picture.clone(),
        }
    }
}
