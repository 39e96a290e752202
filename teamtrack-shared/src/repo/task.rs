/// Task repository
///
/// Alongside CRUD and the five field-scoped searches, this repository
/// exposes the two narrow existence checks backing referential integrity
/// for task writes: `user_exists` (assignee) and `project_exists`. Both
/// avoid hydrating full rows.

use sqlx::PgPool;

use crate::models::Task;

const TASK_COLUMNS: &str = "id, title, description, priority, status, \
                            assignee_id, project_id, created_at, completed_at";

/// Storage operations for tasks
#[derive(Clone)]
pub struct TaskRepo {
    pool: PgPool,
}

impl TaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a new task and returns the stored row
    pub async fn create(&self, task: &Task) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, priority, status,
                               assignee_id, project_id, created_at, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, priority, status,
                      assignee_id, project_id, created_at, completed_at
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.priority)
        .bind(&task.status)
        .bind(task.assignee_id)
        .bind(task.project_id)
        .bind(task.created_at)
        .bind(task.completed_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Full overwrite of every mutable field
    pub async fn update(&self, task: &Task) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, priority = $3, status = $4,
                assignee_id = $5, project_id = $6, created_at = $7, completed_at = $8
            WHERE id = $9
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.priority)
        .bind(&task.status)
        .bind(task.assignee_id)
        .bind(task.project_id)
        .bind(task.created_at)
        .bind(task.completed_at)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Hard-deletes a task; returns the number of rows removed
    ///
    /// Part of the repository contract even though the HTTP layer never
    /// reaches it: `DELETE /tasks/:id` is routed to the query-parameter
    /// search dispatch instead.
    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Substring search on title
    pub async fn search_by_title(&self, title: &str) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE title LIKE $1 ORDER BY id"
        ))
        .bind(format!("%{title}%"))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn search_by_status(&self, status: &str) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE status = $1 ORDER BY id"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn search_by_priority(&self, priority: &str) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE priority = $1 ORDER BY id"
        ))
        .bind(priority)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn search_by_assignee(&self, user_id: i32) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE assignee_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn search_by_project(&self, project_id: i32) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY id"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Whether a user row with this id exists
    pub async fn user_exists(&self, user_id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Whether a project row with this id exists
    pub async fn project_exists(&self, project_id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
    }
}
