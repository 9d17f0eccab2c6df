use axum::{http::StatusCode, response::IntoResponse};

use crate::ErrorResponse;

pub mod models;
pub mod repository;
pub mod routes;

pub const MISSING_FIELDS: &str = "request body missing 'name' or 'profile_image' fields";
pub const NOT_STRINGS: &str = "'name' or 'profile_image' values not strings";

#[derive(thiserror::Error, Debug)]
pub enum UsersError {
    #[error("internal server error")]
    InternalServerError,

    #[error("User not found!")]
    UserNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl IntoResponse for UsersError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:#?}", self);

        match self {
            UsersError::UserNotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: self.to_string(),
                },
            )
                .into_response(),
            UsersError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: self.to_string(),
                },
            )
                .into_response(),
            UsersError::InternalServerError | UsersError::Db(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: UsersError::InternalServerError.to_string(),
                },
            )
                .into_response(),
        }
    }
}
