/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     registration_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     role VARCHAR(32) NOT NULL
/// );
/// ```
///
/// Email uniqueness is a business rule checked by the handlers against
/// [`UserRepo::find_by_email`](crate::repo::user::UserRepo::find_by_email),
/// not a storage constraint. The registration timestamp is set once at
/// creation and carried over verbatim on every update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Constraint, FieldValue, Rule, Validatable};

/// Allowed values for [`User::role`]
pub const ROLES: &[&str] = &["admin", "manager", "developer"];

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Storage-assigned identifier
    pub id: i32,

    /// Display name (non-empty)
    pub name: String,

    /// Email address (non-empty, valid syntax, unique across users)
    pub email: String,

    /// When the account was created; immutable after creation
    pub registration_date: DateTime<Utc>,

    /// One of [`ROLES`]
    pub role: String,
}

static RULES: &[Rule] = &[
    Rule::new("name", Constraint::Required),
    Rule::new("email", Constraint::Required),
    Rule::new("email", Constraint::EmailSyntax),
    Rule::new("role", Constraint::Required),
    Rule::new("role", Constraint::OneOf(ROLES)),
];

impl Validatable for User {
    fn rules() -> &'static [Rule] {
        RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "role" => FieldValue::Text(&self.role),
            "registration_date" => FieldValue::Timestamp(self.registration_date),
            other => unreachable!("no rule references user field {other}"),
        }
    }
}
