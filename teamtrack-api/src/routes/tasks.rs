/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks` - list all tasks
/// - `POST /tasks` - create a task
/// - `GET /tasks/:id` - fetch one task
/// - `PUT /tasks/:id` - full update
/// - `DELETE /tasks/:id?title=|status=|priority=|assignee=|project=` -
///   dispatches to the matching search; without a known query parameter it
///   answers 400. It never deletes (routing quirk kept as shipped).
///
/// Writes run the full pipeline: date parsing, declarative validation,
/// then the referential checks in fixed order — assignee first, then
/// project — and only then the insert/update.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use teamtrack_shared::{models::Task, validation::validate};

use super::parse_id;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Create/update request body
///
/// Dates arrive as plain `YYYY-MM-DD` strings and are parsed before
/// validation; omitted fields become empty values and fail the required
/// checks (full-overwrite semantics).
#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub priority: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub assignee_id: i32,

    #[serde(default)]
    pub project_id: i32,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub completed_at: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskSearchQuery {
    pub title: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub project: Option<String>,
}

/// Parses a `YYYY-MM-DD` date, mapping failure to the given fixed message
pub(crate) fn parse_date(raw: &str, message: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(message.to_string()))
}

/// Builds a [`Task`] from the payload, parsing both date fields
///
/// The completed_at parse failure reuses the "Invalid end date format"
/// wording. Kept as-is.
fn task_from_payload(id: i32, payload: TaskPayload) -> Result<Task, ApiError> {
    let created_at = parse_date(&payload.created_at, "Invalid created_at date format")?;
    let completed_at = parse_date(&payload.completed_at, "Invalid end date format")?;

    Ok(Task {
        id,
        title: payload.title,
        description: payload.description,
        priority: payload.priority,
        status: payload.status,
        assignee_id: payload.assignee_id,
        project_id: payload.project_id,
        created_at,
        completed_at,
    })
}

/// `GET /tasks`
///
/// An empty table answers 200 with a message object instead of an empty
/// array. Kept as shipped.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Response> {
    let tasks = state
        .tasks
        .list_all()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch tasks", e))?;

    if tasks.is_empty() {
        return Ok(Json(json!({ "message": "No tasks found" })).into_response());
    }

    Ok(Json(tasks).into_response())
}

/// `GET /tasks/:id`
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let id = parse_id(&id, "task")?;

    let task = state
        .tasks
        .find_by_id(id)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Shared create/update pipeline
async fn process_task(state: AppState, id: i32, payload: TaskPayload, is_update: bool) -> ApiResult<Response> {
    let op_failed = if is_update {
        "Failed to update task"
    } else {
        "Failed to create task"
    };

    let task = task_from_payload(id, payload)?;

    validate(&task).map_err(ApiError::Validation)?;

    // Referential checks in fixed order: assignee, then project.
    let assignee_ok = state
        .tasks
        .user_exists(task.assignee_id)
        .await
        .map_err(|e| ApiError::internal(op_failed, e))?;
    if !assignee_ok {
        return Err(ApiError::BadRequest("Assignee does not exist".to_string()));
    }

    let project_ok = state
        .tasks
        .project_exists(task.project_id)
        .await
        .map_err(|e| ApiError::internal(op_failed, e))?;
    if !project_ok {
        return Err(ApiError::BadRequest("Project does not exist".to_string()));
    }

    if is_update {
        state
            .tasks
            .update(&task)
            .await
            .map_err(|e| ApiError::internal(op_failed, e))?;
        Ok(Json(task).into_response())
    } else {
        let created = state
            .tasks
            .create(&task)
            .await
            .map_err(|e| ApiError::internal(op_failed, e))?;
        Ok((StatusCode::CREATED, Json(created)).into_response())
    }
}

/// `POST /tasks`
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid input".to_string()))?;
    process_task(state, 0, payload, false).await
}

/// `PUT /tasks/:id`
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id, "task")?;
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid input".to_string()))?;
    process_task(state, id, payload, true).await
}

/// `DELETE /tasks/:id` — search dispatch
///
/// The path id is never read. Whichever known query parameter is present
/// selects a task search; none present is a 400. Empty results answer 200
/// with a message object, unlike the project searches.
pub async fn search_tasks_dispatch(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Query(params): Query<TaskSearchQuery>,
) -> ApiResult<Response> {
    if let Some(title) = params.title.as_deref().filter(|s| !s.is_empty()) {
        let tasks = state
            .tasks
            .search_by_title(title)
            .await
            .map_err(|e| ApiError::internal("Failed to search tasks by title", e))?;
        return Ok(task_search_response(
            tasks,
            "No tasks found with the given title",
        ));
    }

    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        let tasks = state
            .tasks
            .search_by_status(status)
            .await
            .map_err(|e| ApiError::internal("Failed to search tasks by status", e))?;
        return Ok(task_search_response(tasks, "No tasks found"));
    }

    if let Some(priority) = params.priority.as_deref().filter(|s| !s.is_empty()) {
        let tasks = state
            .tasks
            .search_by_priority(priority)
            .await
            .map_err(|e| ApiError::internal("Failed to search tasks by priority", e))?;
        return Ok(task_search_response(tasks, "No tasks found"));
    }

    if let Some(assignee) = params.assignee.as_deref().filter(|s| !s.is_empty()) {
        let user_id = parse_id(assignee, "assignee")?;
        let tasks = state
            .tasks
            .search_by_assignee(user_id)
            .await
            .map_err(|e| ApiError::internal("Failed to search tasks by assignee", e))?;
        return Ok(task_search_response(tasks, "No tasks found"));
    }

    if let Some(project) = params.project.as_deref().filter(|s| !s.is_empty()) {
        let project_id = parse_id(project, "project")?;
        let tasks = state
            .tasks
            .search_by_project(project_id)
            .await
            .map_err(|e| ApiError::internal("Failed to search tasks by project", e))?;
        return Ok(task_search_response(tasks, "No tasks found"));
    }

    Err(ApiError::BadRequest("Missing query parameter".to_string()))
}

fn task_search_response(tasks: Vec<Task>, empty_message: &str) -> Response {
    if tasks.is_empty() {
        Json(json!({ "message": empty_message })).into_response()
    } else {
        Json(tasks).into_response()
    }
}
