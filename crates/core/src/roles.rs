//! Well-known account role names.
//!
//! These must match the `ck_users_role` CHECK constraint in the users migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_STUDENT: &str = "student";

/// Every role an account may hold.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STAFF, ROLE_STUDENT];

/// Returns `true` if `role` is one of [`ALL_ROLES`].
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
