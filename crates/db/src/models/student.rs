//! Student records.

use campusdesk_core::types::{DbId, Timestamp};
use campusdesk_core::validation::{
    contact_number, date_or_blank, positive_integer_text, required_text,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{PgQuery, Resource};

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub program: String,
    /// Whole-number year kept as entered (e.g. `"2"`).
    pub year_level: String,
    /// Enrollment date.
    pub date: NaiveDate,
    pub email: String,
    pub contact: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create/update payload for a student.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct StudentInput {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[validate(custom(function = "required_text"))]
    pub program: String,
    #[validate(custom(function = "positive_integer_text"))]
    pub year_level: String,
    #[serde(deserialize_with = "date_or_blank")]
    #[validate(required(message = "is required"))]
    pub date: Option<NaiveDate>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "contact_number"))]
    pub contact: String,
}

impl Resource for Student {
    type Input = StudentInput;

    const LABEL: &'static str = "Student";
    const TABLE: &'static str = "students";
    const COLUMNS: &'static str =
        "id, name, program, year_level, date, email, contact, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] =
        &["name", "program", "year_level", "date", "email", "contact"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "program"];

    fn bind<'q>(input: &'q StudentInput, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(input.name.trim())
            .bind(input.program.trim())
            .bind(input.year_level.trim())
            .bind(input.date)
            .bind(input.email.trim())
            .bind(input.contact.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_student_passes_validation() {
        let input: StudentInput = serde_json::from_value(serde_json::json!({
            "name": "Ana Reyes",
            "program": "BSIT",
            "year_level": "2",
            "date": "2024-06-01",
            "email": "ana@school.test",
            "contact": "09171234567"
        }))
        .unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_student_reports_every_required_field() {
        let input: StudentInput = serde_json::from_str("{}").unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "program", "year_level", "date", "email", "contact"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }
}
