/// User repository
///
/// # Example
///
/// ```no_run
/// use teamtrack_shared::repo::UserRepo;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let users = UserRepo::new(pool);
///
/// if users.find_by_email("johndoe@example.com").await?.is_some() {
///     println!("email already taken");
/// }
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;

use crate::models::{Task, User};

const USER_COLUMNS: &str = "id, name, email, registration_date, role";

/// Storage operations for users
#[derive(Clone)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new user and returns the stored row
    ///
    /// The identifier is assigned by storage; `user.id` is ignored.
    pub async fn create(&self, user: &User) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, registration_date, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, registration_date, role
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.registration_date)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a user by id; `None` when absent
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a user by exact email match
    ///
    /// Backs the application-side email uniqueness check; there is no
    /// unique index on the column.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Full overwrite of every mutable field, including the carried-over
    /// registration timestamp
    ///
    /// Returns the number of rows touched (zero when the id is absent).
    pub async fn update(&self, user: &User) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, registration_date = $3, role = $4
            WHERE id = $5
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.registration_date)
        .bind(&user.role)
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Hard-deletes a user; returns the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Substring search on name
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE name LIKE $1 ORDER BY id"
        ))
        .bind(format!("%{name}%"))
        .fetch_all(&self.pool)
        .await
    }

    /// Substring search on email
    pub async fn search_by_email(&self, email: &str) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email LIKE $1 ORDER BY id"
        ))
        .bind(format!("%{email}%"))
        .fetch_all(&self.pool)
        .await
    }

    /// All tasks assigned to the given user
    pub async fn tasks_for_user(&self, user_id: i32) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, priority, status,
                   assignee_id, project_id, created_at, completed_at
            FROM tasks
            WHERE assignee_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
