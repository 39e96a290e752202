/// User endpoints
///
/// # Endpoints
///
/// - `GET /users` - list all users
/// - `POST /users` - create a user
/// - `GET /users/:id` - fetch one user
/// - `PUT /users/:id` - full update (registration date is preserved)
/// - `DELETE /users/:id` - delete a user
/// - `GET /users/:id/tasks` - tasks assigned to a user
/// - `GET /users/search?name=|email=` - substring search
///
/// Email uniqueness is enforced here, application-side: an exact
/// `find_by_email` lookup runs on create, and on update whenever the email
/// value is changing. The registration timestamp is always carried over
/// from the existing row on update, whatever the input says.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use teamtrack_shared::{models::User, validation::validate};

use super::parse_id;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Create/update request body
///
/// Omitted fields deserialize to their empty values and fail required-field
/// validation, which is what makes updates full overwrites rather than
/// patches. The registration date is only honored on create.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub role: String,

    pub registration_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .users
        .list_all()
        .await
        .map_err(|e| ApiError::internal("Failed to retrieve users", e))?;

    Ok(Json(users))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid input".to_string()))?;

    let user = User {
        id: 0,
        name: payload.name,
        email: payload.email,
        registration_date: payload.registration_date.unwrap_or_else(Utc::now),
        role: payload.role,
    };

    validate(&user).map_err(ApiError::Validation)?;

    let existing = state
        .users
        .find_by_email(&user.email)
        .await
        .map_err(|e| ApiError::internal("Failed to create user", e))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let created = state
        .users
        .create(&user)
        .await
        .map_err(|e| ApiError::internal("Failed to create user", e))?;

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// `GET /users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id, "user")?;

    let user = state
        .users
        .find_by_id(id)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// `PUT /users/:id`
///
/// Full overwrite of name/email/role. A missing row surfaces as a fetch
/// failure (500) here, not a 404 — this route has no not-found mode.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id, "user")?;
    let Json(payload) = payload.map_err(|_| ApiError::BadRequest("Invalid input".to_string()))?;

    let mut user = User {
        id: 0,
        name: payload.name,
        email: payload.email,
        registration_date: Utc::now(), // replaced with the stored value below
        role: payload.role,
    };

    validate(&user).map_err(ApiError::Validation)?;

    let existing = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch user", e))?
        .ok_or_else(|| ApiError::Internal("Failed to fetch user".to_string()))?;

    if user.email != existing.email {
        let taken = state
            .users
            .find_by_email(&user.email)
            .await
            .map_err(|e| ApiError::internal("Failed to update user", e))?;
        if taken.is_some() {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }
    }

    user.id = id;
    user.registration_date = existing.registration_date;

    state
        .users
        .update(&user)
        .await
        .map_err(|e| ApiError::internal("Failed to update user", e))?;

    Ok(Json(user))
}

/// `DELETE /users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, "user")?;

    state
        .users
        .find_by_id(id)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    state
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete user", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/:id/tasks`
///
/// Always 200 with an array, possibly empty.
pub async fn get_user_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id, "user")?;

    let tasks = state
        .users
        .tasks_for_user(id)
        .await
        .map_err(|e| ApiError::internal("Failed to retrieve tasks", e))?;

    Ok(Json(tasks).into_response())
}

/// `GET /users/search?name=|email=`
///
/// Requires one of the two parameters; empty result sets are a 404 here
/// (unlike task searches, which answer 200 — kept as shipped).
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<UserSearchQuery>,
) -> ApiResult<Response> {
    let users = if let Some(name) = params.name.as_deref().filter(|s| !s.is_empty()) {
        state.users.search_by_name(name).await
    } else if let Some(email) = params.email.as_deref().filter(|s| !s.is_empty()) {
        state.users.search_by_email(email).await
    } else {
        return Err(ApiError::BadRequest(
            "Query parameter 'name' or 'email' is required".to_string(),
        ));
    }
    .map_err(|e| ApiError::internal("Failed to search users", e))?;

    if users.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No users found" })),
        )
            .into_response());
    }

    Ok(Json(users).into_response())
}
