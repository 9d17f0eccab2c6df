use axum::{extract::multipart::MultipartError, http::StatusCode, response::IntoResponse};

use crate::{
    common::body::BodyError, courses::COURSE_NOT_FOUND, storage::StorageError, ErrorResponse,
};

pub mod models;
pub mod repository;
pub mod routes;
pub mod staging;

pub const MISSING_METADATA: &str =
    "request body missing 'title', 'course_id', or 'poster_id' fields";
pub const MISSING_FILE: &str = "request body missing 'file' part";

#[derive(thiserror::Error, Debug)]
pub enum NotesError {
    #[error("internal server error")]
    InternalServerError,

    #[error("{0}")]
    BadRequest(String),

    #[error("Poster not found!")]
    PosterNotFound,

    #[error("{}", COURSE_NOT_FOUND)]
    CourseNotFound,

    #[error("File not found")]
    FileNotFound,

    #[error("request body is too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Body(#[from] BodyError),
}

impl NotesError {
    /// A multipart read that failed on the body limit is a 413; anything
    /// else is reported as `bad_request`.
    pub(crate) fn from_multipart(err: &MultipartError, bad_request: String) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            NotesError::PayloadTooLarge
        } else {
            NotesError::BadRequest(bad_request)
        }
    }
}

impl IntoResponse for NotesError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:#?}", self);

        let status = match &self {
            NotesError::BadRequest(_) | NotesError::Body(_) => StatusCode::BAD_REQUEST,
            NotesError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            NotesError::PosterNotFound | NotesError::CourseNotFound | NotesError::FileNotFound => {
                StatusCode::NOT_FOUND
            }
            NotesError::InternalServerError
            | NotesError::Db(_)
            | NotesError::Storage(_)
            | NotesError::Io(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: NotesError::InternalServerError.to_string(),
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
