use axum::{
    async_trait,
    body::Bytes,
    extract::FromRequest,
    http::{Request, StatusCode},
    response::IntoResponse,
};
use serde_json::{Map, Value};

use crate::ErrorResponse;

/// A request body that must be a JSON object.
///
/// An empty body is read as `{}` so handlers with no required fields
/// accept a bare request.
#[derive(Debug, Default)]
pub struct JsonObject(pub Map<String, Value>);

/// One looked-up field of a [`JsonObject`]. `null` counts as missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Missing,
    Str(&'a str),
    Other(&'a Value),
}

impl<'a> Field<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Field::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl JsonObject {
    pub fn parse(bytes: &[u8]) -> Result<Self, BodyError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(BodyError::NotAnObject),
            Err(err) => {
                tracing::debug!("json body error: {}", err);
                Err(BodyError::Malformed)
            }
        }
    }

    pub fn field(&self, name: &str) -> Field<'_> {
        match self.0.get(name) {
            None | Some(Value::Null) => Field::Missing,
            Some(Value::String(value)) => Field::Str(value),
            Some(other) => Field::Other(other),
        }
    }

    /// Field rendered as text: strings as-is, numbers and booleans in
    /// their JSON form. Arrays and objects have no text form.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.field(name) {
            Field::Str(value) => Some(value.to_owned()),
            Field::Other(value) if value.is_number() || value.is_boolean() => {
                Some(value.to_string())
            }
            _ => None,
        }
    }
}

#[async_trait]
impl<S, B> FromRequest<S, B> for JsonObject
where
    Bytes: FromRequest<S, B>,
    B: Send + 'static,
    S: Send + Sync,
{
    type Rejection = BodyError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| BodyError::Unreadable)?;

        Self::parse(&bytes)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BodyError {
    #[error("request body could not be read")]
    Unreadable,

    #[error("request body is not valid JSON")]
    Malformed,

    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl IntoResponse for BodyError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:#?}", self);

        (
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: self.to_string(),
            },
        )
            .into_response()
    }
}
