/// Project model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description VARCHAR(255) NOT NULL,
///     start_date DATE NOT NULL,
///     end_date DATE NOT NULL,
///     manager_id INTEGER NOT NULL
/// );
/// ```
///
/// `manager_id` must reference an existing user at write time. There is no
/// storage-level foreign key; the handlers run an explicit
/// [`user_exists`](crate::repo::project::ProjectRepo::user_exists) lookup
/// after validation and before the write.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{Constraint, FieldValue, Rule, Validatable};

/// A project led by a manager
///
/// Dates serialize as plain `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,

    /// Project name (non-empty)
    pub name: String,

    /// Short description (non-empty, at most 100 characters)
    pub description: String,

    pub start_date: NaiveDate,

    /// Must be strictly after `start_date`
    pub end_date: NaiveDate,

    /// Identifier of the managing user
    pub manager_id: i32,
}

static RULES: &[Rule] = &[
    Rule::new("name", Constraint::Required),
    Rule::new("description", Constraint::Required),
    Rule::new("description", Constraint::MaxLength(100)),
    Rule::new("start_date", Constraint::Required),
    Rule::new("end_date", Constraint::Required),
    Rule::new("end_date", Constraint::GreaterThanField("start_date")),
    Rule::new("manager_id", Constraint::Required),
    Rule::new("manager_id", Constraint::Positive),
];

impl Validatable for Project {
    fn rules() -> &'static [Rule] {
        RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::Text(&self.description),
            "start_date" => FieldValue::Date(self.start_date),
            "end_date" => FieldValue::Date(self.end_date),
            "manager_id" => FieldValue::Int(self.manager_id.into()),
            other => unreachable!("no rule references project field {other}"),
        }
    }
}
