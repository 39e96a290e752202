/// Project repository
///
/// Exposes CRUD, the two project searches, the project's task listing, and
/// the `user_exists` check backing the manager reference.

use sqlx::PgPool;

use crate::models::{Project, Task};

const PROJECT_COLUMNS: &str = "id, name, description, start_date, end_date, manager_id";

/// Storage operations for projects
#[derive(Clone)]
pub struct ProjectRepo {
    pool: PgPool,
}

impl ProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a new project and returns the stored row
    pub async fn create(&self, project: &Project) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, start_date, end_date, manager_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, start_date, end_date, manager_id
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.manager_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Full overwrite of every mutable field
    pub async fn update(&self, project: &Project) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $1, description = $2, start_date = $3, end_date = $4, manager_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.manager_id)
        .bind(project.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Hard-deletes a project; returns the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// All tasks belonging to the given project
    pub async fn tasks_for_project(&self, project_id: i32) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status,
                   assignee_id, project_id, created_at, completed_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Substring search on the project name
    pub async fn search_by_title(&self, title: &str) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE name LIKE $1 ORDER BY id"
        ))
        .bind(format!("%{title}%"))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn search_by_manager(&self, manager_id: i32) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE manager_id = $1 ORDER BY id"
        ))
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Whether a user row with this id exists (manager reference)
    pub async fn user_exists(&self, user_id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
