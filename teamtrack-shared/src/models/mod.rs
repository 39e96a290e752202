/// Entity models
///
/// Pure data definitions for the three persisted entities. Each model file
/// declares the entity shape, its JSON mapping, and its constraint table
/// (via [`crate::validation::Validatable`]). Storage access lives in
/// [`crate::repo`], not here.

pub mod project;
pub mod task;
pub mod user;

pub use project::Project;
pub use task::Task;
pub use user::User;
