use axum::{
    extract::FromRef,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};

use notes::staging::Staging;
use storage::SharedStorage;

pub mod common;
pub mod config;
pub mod courses;
pub mod entity;
pub mod notes;
pub mod storage;
pub mod users;

/// Everything a handler can reach. Built once in `main` and handed to the
/// router; handlers pull out the part they need through [`FromRef`].
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: SharedStorage,
    pub staging: Staging,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::routes::get_users,
        users::routes::create_user,
        users::routes::get_user,
        users::routes::update_user,
        users::routes::delete_user,
        courses::routes::get_courses,
        courses::routes::create_course,
        courses::routes::get_course,
        notes::routes::upload_note,
        notes::routes::get_note,
    ),
    components(
        schemas(users::models::UserResponse),
        schemas(users::models::UsersResponse),
        schemas(users::models::CreateUser),
        schemas(users::models::UpdateUser),
        schemas(courses::models::CourseResponse),
        schemas(courses::models::CoursesResponse),
        schemas(courses::models::CreateCourse),
        schemas(notes::models::NoteResponse),
        schemas(notes::models::UploadNote),
        schemas(ErrorResponse),
    ),
    tags(
        (name = "Users API"),
        (name = "Courses API"),
        (name = "Notes API"),
    )
)]
pub struct ApiDoc;

/// Body of every failed request: `{"error": "..."}`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Default)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .merge(users::routes::users_router())
        .merge(courses::routes::courses_router())
        .merge(notes::routes::notes_router(max_upload_bytes))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
