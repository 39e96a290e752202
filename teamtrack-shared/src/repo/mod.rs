/// Per-entity repositories
///
/// One struct per entity, each holding a clone of the shared [`sqlx::PgPool`]
/// injected at construction time. Repositories execute SQL and report
/// `sqlx::Error`; they make no policy decisions. Point lookups use
/// `fetch_optional` so "not found" is distinct from a storage failure, and
/// search operations return possibly-empty `Vec`s, never an error for zero
/// matches.
///
/// The narrow `user_exists` / `project_exists` queries back the referential
/// integrity checks run by the handlers between validation and the write.

pub mod project;
pub mod task;
pub mod user;

pub use project::ProjectRepo;
pub use task::TaskRepo;
pub use user::UserRepo;
