use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;

use crate::{
    common::{body::JsonObject, parse_id},
    AppState,
};

use super::{
    models::{CreateUser, UpdateUser, UserResponse, UsersResponse},
    repository, UsersError,
};

pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/users/", get(get_users).post(create_user))
        .route("/user/:user_id/", get(get_user))
        .route("/users/:user_id/", post(update_user).delete(delete_user))
}

/// Get all users
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "Every user with their notes", body = UsersResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Users API"
)]
pub async fn get_users(
    State(db): State<DatabaseConnection>,
) -> Result<Json<UsersResponse>, UsersError> {
    let users = repository::list_users(&db).await?;

    Ok(Json(UsersResponse { users }))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users/",
    request_body(content = CreateUser, content_type = "application/json"),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing or non-string fields", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Users API"
)]
pub async fn create_user(
    State(db): State<DatabaseConnection>,
    body: JsonObject,
) -> Result<(StatusCode, Json<UserResponse>), UsersError> {
    let payload = CreateUser::from_body(&body)?;

    let user = repository::create_user(&db, payload.name, payload.profile_image).await?;
    tracing::debug!("created user {}", user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by id
#[utoipa::path(
    get,
    path = "/user/{user_id}/",
    params(
        ("user_id" = i32, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "Requested user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Users API"
)]
pub async fn get_user(
    State(db): State<DatabaseConnection>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, UsersError> {
    let user_id = parse_id(&user_id).ok_or(UsersError::UserNotFound)?;

    let Some(user) = repository::get_user(&db, user_id).await? else {
        return Err(UsersError::UserNotFound);
    };

    Ok(Json(user))
}

/// Update user
#[utoipa::path(
    post,
    path = "/users/{user_id}/",
    params(
        ("user_id" = i32, Path, description = "User id"),
    ),
    request_body(content = UpdateUser, content_type = "application/json"),
    responses(
        (status = 200, description = "User after the update", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Users API"
)]
pub async fn update_user(
    State(db): State<DatabaseConnection>,
    Path(user_id): Path<String>,
    body: JsonObject,
) -> Result<Json<UserResponse>, UsersError> {
    let user_id = parse_id(&user_id).ok_or(UsersError::UserNotFound)?;
    let patch = UpdateUser::from_body(&body);

    let Some(user) = repository::update_user(&db, user_id, patch).await? else {
        tracing::error!("User not found: {}", user_id);
        return Err(UsersError::UserNotFound);
    };

    Ok(Json(user))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{user_id}/",
    params(
        ("user_id" = i32, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "The deleted user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Users API"
)]
pub async fn delete_user(
    State(db): State<DatabaseConnection>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, UsersError> {
    let user_id = parse_id(&user_id).ok_or(UsersError::UserNotFound)?;

    let Some(user) = repository::delete_user(&db, user_id).await? else {
        tracing::error!("User not found: {}", user_id);
        return Err(UsersError::UserNotFound);
    };

    Ok(Json(user))
}
