/// Integration tests for the TeamTrack API
///
/// These exercise the full pipeline end-to-end against a real database:
/// parse → validate → referential checks → persist, plus the preserved
/// routing and status-code quirks.
///
/// Requires `TEST_DATABASE_URL`; tests skip themselves when it is unset.
/// Run with: cargo test -p teamtrack-api --test api_tests -- --test-threads=1

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn create_and_fetch_user() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let (status, body) = ctx
        .request(
            "POST",
            "/users",
            Some(json!({
                "name": "John Doe",
                "email": "johndoe@example.com",
                "role": "admin"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "John Doe");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body["registration_date"].is_string());

    let id = body["id"].as_i64().unwrap();
    let (status, fetched) = ctx.request("GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "johndoe@example.com");
}

#[tokio::test]
async fn create_user_reports_all_validation_failures() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let (status, body) = ctx.request("POST", "/users", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        errors,
        vec![
            "Name is required",
            "Email is required",
            "Email must be a valid email address",
            "Role is required",
            "Role must be one of: admin, manager, developer",
        ]
    );
}

#[tokio::test]
async fn malformed_json_is_invalid_input() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let (status, body) = ctx
        .request("GET", "/users/not-a-number", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user ID");

    // A body that is not a JSON object at all.
    let (status, body) = ctx
        .request("POST", "/users", Some(json!("just a string")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input");
}

#[tokio::test]
async fn duplicate_email_is_rejected_on_create_and_update() {
    let Some(ctx) = TestContext::try_new().await else { return };

    ctx.seed_user("First", "taken@example.com").await;

    // Second create with the same email.
    let (status, body) = ctx
        .request(
            "POST",
            "/users",
            Some(json!({
                "name": "Second",
                "email": "taken@example.com",
                "role": "manager"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");

    // Updating a distinct user's email to the taken value.
    let other = ctx.seed_user("Other", "other@example.com").await;
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/users/{other}"),
            Some(json!({
                "name": "Other",
                "email": "taken@example.com",
                "role": "developer"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");

    // Updating a user without changing its email succeeds.
    let (status, _) = ctx
        .request(
            "PUT",
            &format!("/users/{other}"),
            Some(json!({
                "name": "Renamed",
                "email": "other@example.com",
                "role": "developer"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_preserves_registration_date() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let id = ctx.seed_user("Jane", "jane@example.com").await;
    let (_, before) = ctx.request("GET", &format!("/users/{id}"), None).await;
    let original = before["registration_date"].as_str().unwrap().to_string();

    let (status, updated) = ctx
        .request(
            "PUT",
            &format!("/users/{id}"),
            Some(json!({
                "name": "Jane Renamed",
                "email": "jane@example.com",
                "role": "manager",
                "registration_date": "1999-01-01T00:00:00Z"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Jane Renamed");
    assert_eq!(updated["role"], "manager");
    // Whatever the input said, the stored timestamp is carried over.
    assert_eq!(updated["registration_date"].as_str().unwrap(), original);
}

#[tokio::test]
async fn update_missing_user_is_a_fetch_failure() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let (status, body) = ctx
        .request(
            "PUT",
            "/users/9999",
            Some(json!({
                "name": "Ghost",
                "email": "ghost@example.com",
                "role": "admin"
            })),
        )
        .await;

    // This route has no not-found mode; a missing row is a 500.
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch user");
}

#[tokio::test]
async fn delete_user_and_delete_missing() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let id = ctx.seed_user("Gone Soon", "gone@example.com").await;

    let (status, _) = ctx.request("DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = ctx.request("DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn delete_project_and_delete_missing() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let manager = ctx.seed_user("Mgr0", "mgr0@example.com").await;
    let project = ctx.seed_project("Short Lived", manager).await;

    let (status, _) = ctx
        .request("DELETE", &format!("/projects/{project}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.request("GET", &format!("/projects/{project}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting the same id again is a plain not-found, not a storage error.
    let (status, body) = ctx
        .request("DELETE", &format!("/projects/{project}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");
}

#[tokio::test]
async fn user_search_requires_a_parameter_and_404s_when_empty() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let (status, body) = ctx.request("GET", "/users/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query parameter 'name' or 'email' is required");

    let (status, body) = ctx.request("GET", "/users/search?name=Nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No users found");

    ctx.seed_user("Findable", "findable@example.com").await;
    let (status, body) = ctx.request("GET", "/users/search?name=Find", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = ctx
        .request("GET", "/users/search?email=findable", None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn project_dates_must_be_ordered() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let manager = ctx.seed_user("Mgr", "mgr@example.com").await;

    let (status, body) = ctx
        .request(
            "POST",
            "/projects",
            Some(json!({
                "name": "Backwards",
                "description": "ends before it starts",
                "start_date": "2024-06-01",
                "end_date": "2024-06-01",
                "manager_id": manager
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["End date must be after start date"]));

    // Reversed to a valid ordering, the same payload passes.
    let (status, _) = ctx
        .request(
            "POST",
            "/projects",
            Some(json!({
                "name": "Backwards",
                "description": "ends before it starts",
                "start_date": "2024-06-01",
                "end_date": "2024-06-02",
                "manager_id": manager
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn project_manager_must_exist() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let (status, body) = ctx
        .request(
            "POST",
            "/projects",
            Some(json!({
                "name": "Orphan",
                "description": "no such manager",
                "start_date": "2024-01-01",
                "end_date": "2024-02-01",
                "manager_id": 424242
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Manager does not exist");
}

#[tokio::test]
async fn task_references_checked_assignee_first() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let user = ctx.seed_user("Worker", "worker@example.com").await;
    let project = ctx.seed_project("Real Project", user).await;

    // Both references bogus: the assignee failure is reported, proving it
    // runs before the project check.
    let (status, body) = ctx
        .request(
            "POST",
            "/tasks",
            Some(json!({
                "title": "Orphan task",
                "description": "dangling references",
                "priority": "low",
                "status": "todo",
                "assignee_id": 424242,
                "project_id": 424242,
                "created_at": "2024-02-01",
                "completed_at": "2024-02-02"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Assignee does not exist");

    // Valid assignee, bogus project.
    let (status, body) = ctx
        .request(
            "POST",
            "/tasks",
            Some(json!({
                "title": "Orphan task",
                "description": "dangling project",
                "priority": "low",
                "status": "todo",
                "assignee_id": user,
                "project_id": 424242,
                "created_at": "2024-02-01",
                "completed_at": "2024-02-02"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Project does not exist");

    // Nothing was written along the way.
    let (_, body) = ctx.request("GET", "/tasks", None).await;
    assert_eq!(body["message"], "No tasks found");

    // Both valid.
    let (status, _) = ctx
        .request(
            "POST",
            "/tasks",
            Some(json!({
                "title": "Real task",
                "description": "all references valid",
                "priority": "high",
                "status": "in_progress",
                "assignee_id": user,
                "project_id": project,
                "created_at": "2024-02-01",
                "completed_at": "2024-02-02"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn task_delete_route_searches_instead_of_deleting() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let user = ctx.seed_user("Assignee", "assignee@example.com").await;
    let project = ctx.seed_project("Project", user).await;
    let task = ctx.seed_task("Deletable?", user, project).await;

    // No known query parameter: 400, nothing deleted.
    let (status, body) = ctx.request("DELETE", &format!("/tasks/{task}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing query parameter");

    // With a status parameter the route answers the search instead.
    let (status, body) = ctx
        .request("DELETE", &format!("/tasks/{task}?status=todo"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // The task is still there.
    let (status, _) = ctx.request("GET", &format!("/tasks/{task}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn search_emptiness_differs_between_tasks_and_projects() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let user = ctx.seed_user("Someone", "someone@example.com").await;
    let project = ctx.seed_project("Empty Project", user).await;
    ctx.seed_task("A task", user, project).await;

    // Task search with zero matches: 200 with a message object.
    let (status, body) = ctx
        .request("DELETE", "/tasks/0?status=done", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No tasks found");

    // Project search with zero matches: 404.
    let (status, body) = ctx
        .request("GET", "/projects/search?title=nomatch", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No projects found with the given title");

    // Project search by manager with zero matches: 404.
    let (status, body) = ctx
        .request("GET", "/projects/search?manager=424242", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No projects found");
}

#[tokio::test]
async fn project_task_listing_404s_when_empty() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let user = ctx.seed_user("Mgr2", "mgr2@example.com").await;
    let project = ctx.seed_project("Taskless", user).await;

    let (status, body) = ctx
        .request("GET", &format!("/projects/{project}/tasks"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No tasks found");

    // The user variant answers 200 with an empty array instead.
    let (status, body) = ctx
        .request("GET", &format!("/users/{user}/tasks"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn task_update_is_a_full_overwrite() {
    let Some(ctx) = TestContext::try_new().await else { return };

    let user = ctx.seed_user("Editor", "editor@example.com").await;
    let project = ctx.seed_project("Editable", user).await;
    let task = ctx.seed_task("Before", user, project).await;

    // Omitting the title makes the update fail required validation rather
    // than preserving the old value.
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/tasks/{task}"),
            Some(json!({
                "description": "still here",
                "priority": "low",
                "status": "done",
                "assignee_id": user,
                "project_id": project,
                "created_at": "2024-02-01",
                "completed_at": "2024-02-20"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]
        .as_array()
        .unwrap()
        .contains(&json!("The title field is required.")));

    // A complete payload replaces every field.
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/tasks/{task}"),
            Some(json!({
                "title": "After",
                "description": "rewritten",
                "priority": "low",
                "status": "done",
                "assignee_id": user,
                "project_id": project,
                "created_at": "2024-02-01",
                "completed_at": "2024-02-20"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "After");
    assert_eq!(body["status"], "done");
}
