use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;

use crate::{
    common::{body::JsonObject, parse_id},
    AppState,
};

use super::{
    models::{CourseResponse, CoursesResponse, CreateCourse},
    repository, CoursesError,
};

pub fn courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses/", get(get_courses).post(create_course))
        .route("/course/:course_id/", get(get_course))
}

/// Get all courses
#[utoipa::path(
    get,
    path = "/courses/",
    responses(
        (status = 200, description = "Every course with its notes", body = CoursesResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Courses API"
)]
pub async fn get_courses(
    State(db): State<DatabaseConnection>,
) -> Result<Json<CoursesResponse>, CoursesError> {
    let courses = repository::list_courses(&db).await?;

    Ok(Json(CoursesResponse { courses }))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/courses/",
    request_body(content = CreateCourse, content_type = "application/json"),
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Missing or non-string fields", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Courses API"
)]
pub async fn create_course(
    State(db): State<DatabaseConnection>,
    body: JsonObject,
) -> Result<(StatusCode, Json<CourseResponse>), CoursesError> {
    let payload = CreateCourse::from_body(&body)?;

    let course =
        repository::create_course(&db, payload.code, payload.name, payload.description).await?;
    tracing::debug!("created course {}", course.id);

    Ok((StatusCode::CREATED, Json(course)))
}

/// Get course by id
#[utoipa::path(
    get,
    path = "/course/{course_id}/",
    params(
        ("course_id" = i32, Path, description = "Course id"),
    ),
    responses(
        (status = 200, description = "Requested course", body = CourseResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Courses API"
)]
pub async fn get_course(
    State(db): State<DatabaseConnection>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseResponse>, CoursesError> {
    let course_id = parse_id(&course_id).ok_or(CoursesError::CourseNotFound)?;

    let Some(course) = repository::get_course(&db, course_id).await? else {
        tracing::error!("Course not found: {}", course_id);
        return Err(CoursesError::CourseNotFound);
    };

    Ok(Json(course))
}
