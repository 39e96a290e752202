/// Task model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description VARCHAR(255) NOT NULL,
///     priority VARCHAR(16) NOT NULL,
///     status VARCHAR(16) NOT NULL,
///     assignee_id INTEGER NOT NULL,
///     project_id INTEGER NOT NULL,
///     created_at DATE NOT NULL,
///     completed_at DATE NOT NULL
/// );
/// ```
///
/// Both references are checked by explicit lookups in a fixed order —
/// assignee first, then project — after validation and before the write.
/// Task timestamps are plain dates (`YYYY-MM-DD` on the wire), matching the
/// project date fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{Constraint, FieldValue, Rule, Validatable};

/// Allowed values for [`Task::priority`]
pub const PRIORITIES: &[&str] = &["low", "medium", "high"];

/// Allowed values for [`Task::status`]
pub const STATUSES: &[&str] = &["todo", "in_progress", "done"];

/// A unit of work assigned to a user within a project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i32,

    /// Task title (non-empty)
    pub title: String,

    /// Short description (non-empty, at most 100 characters)
    pub description: String,

    /// One of [`PRIORITIES`]
    pub priority: String,

    /// One of [`STATUSES`]
    pub status: String,

    /// Identifier of the assigned user
    pub assignee_id: i32,

    /// Identifier of the owning project
    pub project_id: i32,

    pub created_at: NaiveDate,

    /// Must be strictly after `created_at`
    pub completed_at: NaiveDate,
}

static RULES: &[Rule] = &[
    Rule::new("title", Constraint::Required),
    Rule::new("description", Constraint::Required),
    Rule::new("description", Constraint::MaxLength(100)),
    Rule::new("priority", Constraint::OneOf(PRIORITIES)),
    Rule::new("status", Constraint::OneOf(STATUSES)),
    Rule::new("assignee_id", Constraint::Required),
    Rule::new("assignee_id", Constraint::Positive),
    Rule::new("project_id", Constraint::Required),
    Rule::new("project_id", Constraint::Positive),
    Rule::new("created_at", Constraint::Required),
    Rule::new("completed_at", Constraint::Required),
    Rule::new("completed_at", Constraint::GreaterThanField("created_at")),
];

impl Validatable for Task {
    fn rules() -> &'static [Rule] {
        RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => FieldValue::Text(&self.title),
            "description" => FieldValue::Text(&self.description),
            "priority" => FieldValue::Text(&self.priority),
            "status" => FieldValue::Text(&self.status),
            "assignee_id" => FieldValue::Int(self.assignee_id.into()),
            "project_id" => FieldValue::Int(self.project_id.into()),
            "created_at" => FieldValue::Date(self.created_at),
            "completed_at" => FieldValue::Date(self.completed_at),
            other => unreachable!("no rule references task field {other}"),
        }
    }
}
