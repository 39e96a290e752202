/// Declarative field validation
///
/// Every entity carries a static table of [`Rule`]s — one `(field, constraint)`
/// pair per declared check — and exposes its field values through the
/// [`Validatable`] trait. [`validate`] interprets the whole table in declared
/// order and collects one human-readable message per violated constraint.
/// There is no short-circuiting: a caller always sees every problem at once.
///
/// Validation is pure. It never touches storage; cross-entity existence
/// checks are the repositories' job and run after validation succeeds.
///
/// # Example
///
/// ```
/// use teamtrack_shared::models::user::User;
/// use teamtrack_shared::validation::validate;
///
/// let user = User {
///     id: 0,
///     name: String::new(),
///     email: "not-an-email".to_string(),
///     registration_date: chrono::Utc::now(),
///     role: "admin".to_string(),
/// };
///
/// let errors = validate(&user).unwrap_err();
/// assert_eq!(errors, vec![
///     "Name is required".to_string(),
///     "Email must be a valid email address".to_string(),
/// ]);
/// ```

pub mod messages;

use chrono::{DateTime, NaiveDate, Utc};
use validator::ValidateEmail;

/// A single declarative constraint on one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Fails when the field holds its empty/zero value
    Required,

    /// Fails when a string field exceeds the given number of characters
    MaxLength(usize),

    /// Fails when a numeric field is zero or negative
    Positive,

    /// Fails when the value is not a member of the given set
    OneOf(&'static [&'static str]),

    /// Fails when this field is not strictly greater than the named field
    ///
    /// Comparison uses the field's natural ordering (chronological for
    /// dates). Used for `end_date > start_date` and
    /// `completed_at > created_at`.
    GreaterThanField(&'static str),

    /// Fails when the string is not a syntactically valid email address
    EmailSyntax,
}

/// Constraint discriminant, used as the message-table key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Required,
    MaxLength,
    Positive,
    OneOf,
    GreaterThanField,
    EmailSyntax,
}

impl Constraint {
    /// Returns the discriminant for message lookup
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Required => ConstraintKind::Required,
            Constraint::MaxLength(_) => ConstraintKind::MaxLength,
            Constraint::Positive => ConstraintKind::Positive,
            Constraint::OneOf(_) => ConstraintKind::OneOf,
            Constraint::GreaterThanField(_) => ConstraintKind::GreaterThanField,
            Constraint::EmailSyntax => ConstraintKind::EmailSyntax,
        }
    }
}

/// One entry in an entity's constraint table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Field name, matching the entity's JSON field name
    pub field: &'static str,

    /// The constraint applied to that field
    pub constraint: Constraint,
}

impl Rule {
    pub const fn new(field: &'static str, constraint: Constraint) -> Self {
        Self { field, constraint }
    }
}

/// A field value as seen by the constraint interpreter
///
/// Entities map each declared field to one of these variants. Dates and
/// timestamps are always present once an entity has been parsed, so only
/// text and integer fields can fail `Required`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl FieldValue<'_> {
    /// Whether this value is the empty/zero value for its type
    fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Int(n) => *n == 0,
            FieldValue::Date(_) | FieldValue::Timestamp(_) => false,
        }
    }

    /// Strict greater-than using the natural ordering of matching variants
    ///
    /// Mismatched variants compare as not-greater, which fails the
    /// constraint rather than panicking on a bad rule table.
    fn is_greater_than(&self, other: &FieldValue<'_>) -> bool {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a > b,
            (FieldValue::Date(a), FieldValue::Date(b)) => a > b,
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a > b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a > b,
            _ => false,
        }
    }
}

/// An entity that can be run through the constraint interpreter
pub trait Validatable {
    /// The entity's constraint table, in evaluation order
    fn rules() -> &'static [Rule];

    /// Returns the current value of a declared field
    ///
    /// Only called with field names appearing in [`Self::rules`].
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// Evaluates every declared constraint and collects all failures
///
/// Returns `Ok(())` when every constraint holds, otherwise the ordered list
/// of failure messages, one per violated constraint. Message text comes from
/// [`messages::lookup`]; a field/constraint pair missing from that table
/// contributes an empty message rather than being dropped.
pub fn validate<T: Validatable>(entity: &T) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for rule in T::rules() {
        let value = entity.field(rule.field);
        if !check(&rule.constraint, &value, entity) {
            errors.push(messages::lookup(rule.field, rule.constraint.kind()).to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Evaluates a single constraint against a field value
fn check<T: Validatable>(constraint: &Constraint, value: &FieldValue<'_>, entity: &T) -> bool {
    match constraint {
        Constraint::Required => !value.is_empty(),
        Constraint::MaxLength(max) => match value {
            FieldValue::Text(s) => s.chars().count() <= *max,
            _ => true,
        },
        Constraint::Positive => match value {
            FieldValue::Int(n) => *n > 0,
            _ => true,
        },
        Constraint::OneOf(allowed) => match value {
            FieldValue::Text(s) => allowed.contains(s),
            _ => true,
        },
        Constraint::GreaterThanField(other) => value.is_greater_than(&entity.field(other)),
        Constraint::EmailSyntax => match value {
            FieldValue::Text(s) => s.validate_email(),
            _ => true,
        },
    }
}
