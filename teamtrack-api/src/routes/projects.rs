/// Project endpoints
///
/// # Endpoints
///
/// - `GET /projects` - list all projects
/// - `POST /projects` - create a project
/// - `GET /projects/:id` - fetch one project
/// - `PUT /projects/:id` - full update
/// - `DELETE /projects/:id` - delete a project
/// - `GET /projects/:id/tasks` - tasks in a project (404 when empty)
/// - `GET /projects/search?title=|manager=` - search (404 when empty)
///
/// The manager reference is checked against the users table after
/// validation and before the write; there is no foreign key behind it.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use teamtrack_shared::{models::Project, validation::validate};

use super::{parse_id, tasks::parse_date};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Create/update request body
#[derive(Debug, Deserialize)]
pub struct ProjectPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub start_date: String,

    #[serde(default)]
    pub end_date: String,

    #[serde(default)]
    pub manager_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSearchQuery {
    pub title: Option<String>,
    pub manager: Option<String>,
}

fn project_from_payload(id: i32, payload: ProjectPayload) -> Result<Project, ApiError> {
    let start_date = parse_date(&payload.start_date, "Invalid start date format")?;
    let end_date = parse_date(&payload.end_date, "Invalid end date format")?;

    Ok(Project {
        id,
        name: payload.name,
        description: payload.description,
        start_date,
        end_date,
        manager_id: payload.manager_id,
    })
}

/// `GET /projects`
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = state
        .projects
        .list_all()
        .await
        .map_err(|e| ApiError::internal("Failed to retrieve projects", e))?;

    Ok(Json(projects))
}

/// Shared create/update pipeline
async fn process_project(
    state: AppState,
    id: i32,
    payload: ProjectPayload,
    is_update: bool,
) -> ApiResult<Response> {
    let op_failed = if is_update {
        "Failed to update project"
    } else {
        "Failed to create project"
    };

    let project = project_from_payload(id, payload)?;

    validate(&project).map_err(ApiError::Validation)?;

    let manager_ok = state
        .projects
        .user_exists(project.manager_id)
        .await
        .map_err(|e| ApiError::internal(op_failed, e))?;
    if !manager_ok {
        return Err(ApiError::BadRequest("Manager does not exist".to_string()));
    }

    if is_update {
        state
            .projects
            .update(&project)
            .await
            .map_err(|e| ApiError::internal(op_failed, e))?;
        Ok(Json(project).into_response())
    } else {
        let created = state
            .projects
            .create(&project)
            .await
            .map_err(|e| ApiError::internal(op_failed, e))?;
        Ok((StatusCode::CREATED, Json(created)).into_response())
    }
}

/// `POST /projects`
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid input".to_string()))?;
    process_project(state, 0, payload, false).await
}

/// `PUT /projects/:id`
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id, "project")?;
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid input".to_string()))?;
    process_project(state, id, payload, true).await
}

/// `GET /projects/:id`
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Project>> {
    let id = parse_id(&id, "project")?;

    let project = state
        .projects
        .find_by_id(id)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// `DELETE /projects/:id`
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "project")?;

    state
        .projects
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("Failed to retrieve project", e))?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    state
        .projects
        .delete(id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete project", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /projects/:id/tasks`
///
/// A project with no tasks answers 404, unlike the user variant. Kept as
/// shipped.
pub async fn get_project_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id, "project")?;

    let tasks = state
        .projects
        .tasks_for_project(id)
        .await
        .map_err(|e| ApiError::internal("Failed to retrieve tasks for project", e))?;

    if tasks.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No tasks found" })),
        )
            .into_response());
    }

    Ok(Json(tasks).into_response())
}

/// `GET /projects/search?title=|manager=`
pub async fn search_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectSearchQuery>,
) -> ApiResult<Response> {
    if let Some(title) = params.title.as_deref().filter(|s| !s.is_empty()) {
        let projects = state
            .projects
            .search_by_title(title)
            .await
            .map_err(|e| ApiError::internal("Failed to search projects by title", e))?;

        if projects.is_empty() {
            return Ok((
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "No projects found with the given title" })),
            )
                .into_response());
        }
        return Ok(Json(projects).into_response());
    }

    if let Some(manager) = params.manager.as_deref().filter(|s| !s.is_empty()) {
        let manager_id = parse_id(manager, "manager")?;
        let projects = state
            .projects
            .search_by_manager(manager_id)
            .await
            .map_err(|e| ApiError::internal("Failed to search projects by manager ID", e))?;

        if projects.is_empty() {
            return Ok((
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "No projects found" })),
            )
                .into_response());
        }
        return Ok(Json(projects).into_response());
    }

    Err(ApiError::BadRequest("Missing query parameter".to_string()))
}
