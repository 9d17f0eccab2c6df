use axum::{http::StatusCode, response::IntoResponse};

use crate::ErrorResponse;

pub mod models;
pub mod repository;
pub mod routes;

pub const COURSE_NOT_FOUND: &str = "Course with 'course_id' not found";
pub const MISSING_FIELDS: &str = "request body missing 'code', 'name', or 'description' fields";
pub const NOT_STRINGS: &str = "'code', 'name', or 'description' value not of type string";

#[derive(thiserror::Error, Debug)]
pub enum CoursesError {
    #[error("internal server error")]
    InternalServerError,

    #[error("{}", COURSE_NOT_FOUND)]
    CourseNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl IntoResponse for CoursesError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:#?}", self);

        let status = match self {
            CoursesError::CourseNotFound => StatusCode::NOT_FOUND,
            CoursesError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoursesError::InternalServerError | CoursesError::Db(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: CoursesError::InternalServerError.to_string(),
                    },
                )
                    .into_response()
            }
        };

        (
            status,
            ErrorResponse {
                error: self.to_string(),
            },
        )
            .into_response()
    }
}
