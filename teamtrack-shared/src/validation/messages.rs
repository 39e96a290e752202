/// Fixed failure-message table
///
/// Maps `(field name, constraint kind)` to the human-readable message shown
/// to clients. The mapping is deliberately a closed table: a pair with no
/// entry yields an empty string instead of a generated fallback, so every
/// client-visible message is one that was written down here.
///
/// Task timestamps reuse the project date wording ("Start date is required",
/// "End date must be after start date") — kept as-is.

use super::ConstraintKind;

/// Looks up the message for a violated constraint
///
/// Returns `""` when the pair has no entry.
pub fn lookup(field: &str, kind: ConstraintKind) -> &'static str {
    use ConstraintKind::*;

    match (field, kind) {
        // User
        ("name", Required) => "Name is required",
        ("email", Required) => "Email is required",
        ("email", EmailSyntax) => "Email must be a valid email address",
        ("role", Required) => "Role is required",
        ("role", OneOf) => "Role must be one of: admin, manager, developer",

        // Project
        ("description", Required) => "Description is required",
        ("description", MaxLength) => "Description must be at most 100 characters long",
        ("start_date", Required) => "Start date is required",
        ("end_date", Required) => "End date is required",
        ("end_date", GreaterThanField) => "End date must be after start date",
        ("manager_id", Required) => "Manager ID is required",
        ("manager_id", Positive) => "Manager ID must be greater than 0",

        // Task
        ("title", Required) => "The title field is required.",
        ("priority", OneOf) => "Invalid priority. Must be one of: low, medium, high.",
        ("status", OneOf) => "Invalid status. Must be one of: todo, in_progress, done.",
        ("assignee_id", Required) => "The assignee ID field is required.",
        ("assignee_id", Positive) => "The assignee ID must be greater than 0.",
        ("project_id", Required) => "The project ID field is required.",
        ("project_id", Positive) => "The project ID must be greater than 0.",
        ("created_at", Required) => "Start date is required",
        ("completed_at", Required) => "End date is required",
        ("completed_at", GreaterThanField) => "End date must be after start date",

        _ => "",
    }
}
