/// Shared test harness for API integration tests
///
/// Tests need a running PostgreSQL database, pointed at by
/// `TEST_DATABASE_URL`. When the variable is unset the tests skip
/// themselves, so the unit suites still run on machines without a database.
///
/// Run with: cargo test -p teamtrack-api --test api_tests -- --test-threads=1

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sqlx::PgPool;
use teamtrack_api::app::{build_router, AppState};
use teamtrack_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use tower::ServiceExt;

pub struct TestContext {
    pub app: Router,
    pub db: PgPool,
}

impl TestContext {
    /// Builds a fresh context against an empty database
    ///
    /// Returns `None` when `TEST_DATABASE_URL` is not set.
    pub async fn try_new() -> Option<Self> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("skipping: TEST_DATABASE_URL not set");
                return None;
            }
        };

        let pool = create_pool(DatabaseConfig {
            url,
            max_connections: 5,
            ..Default::default()
        })
        .await
        .expect("failed to connect to test database");

        run_migrations(&pool).await.expect("migrations failed");

        sqlx::query("TRUNCATE users, projects, tasks RESTART IDENTITY")
            .execute(&pool)
            .await
            .expect("failed to reset tables");

        let app = build_router(AppState::new(pool.clone()));
        Some(Self { app, db: pool })
    }

    /// Sends a JSON request through the router and decodes the response
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Creates a valid user and returns its id
    pub async fn seed_user(&self, name: &str, email: &str) -> i32 {
        let (status, body) = self
            .request(
                "POST",
                "/users",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "role": "developer"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed_user failed: {body}");
        body["id"].as_i64().unwrap() as i32
    }

    /// Creates a valid project managed by the given user and returns its id
    pub async fn seed_project(&self, name: &str, manager_id: i32) -> i32 {
        let (status, body) = self
            .request(
                "POST",
                "/projects",
                Some(serde_json::json!({
                    "name": name,
                    "description": "seeded project",
                    "start_date": "2024-01-01",
                    "end_date": "2024-12-31",
                    "manager_id": manager_id
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed_project failed: {body}");
        body["id"].as_i64().unwrap() as i32
    }

    /// Creates a valid task and returns its id
    pub async fn seed_task(&self, title: &str, assignee_id: i32, project_id: i32) -> i32 {
        let (status, body) = self
            .request(
                "POST",
                "/tasks",
                Some(serde_json::json!({
                    "title": title,
                    "description": "seeded task",
                    "priority": "medium",
                    "status": "todo",
                    "assignee_id": assignee_id,
                    "project_id": project_id,
                    "created_at": "2024-02-01",
                    "completed_at": "2024-02-15"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed_task failed: {body}");
        body["id"].as_i64().unwrap() as i32
    }
}
