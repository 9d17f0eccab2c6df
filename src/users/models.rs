use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::body::JsonObject,
    entity,
    notes::models::{note_list, NoteResponse},
};

use super::{UsersError, MISSING_FIELDS, NOT_STRINGS};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub profile_image: String,
    pub notes: Vec<NoteResponse>,
}

impl UserResponse {
    pub fn new(user: entity::users::Model, notes: Vec<entity::notes::Model>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            profile_image: user.profile_image,
            notes: note_list(notes),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub profile_image: String,
}

impl CreateUser {
    /// Both fields must be present and both must be strings; a missing
    /// field is reported before a mistyped one.
    pub fn from_body(body: &JsonObject) -> Result<Self, UsersError> {
        let (name, profile_image) = (body.field("name"), body.field("profile_image"));

        if name.is_missing() || profile_image.is_missing() {
            return Err(UsersError::BadRequest(MISSING_FIELDS.to_string()));
        }

        match (name.as_str(), profile_image.as_str()) {
            (Some(name), Some(profile_image)) => Ok(Self {
                name: name.to_string(),
                profile_image: profile_image.to_string(),
            }),
            _ => Err(UsersError::BadRequest(NOT_STRINGS.to_string())),
        }
    }
}

/// Partial update. Only string values are applied; absent, `null` and
/// non-string fields leave the stored value alone.
#[derive(Debug, Default, Clone, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub profile_image: Option<String>,
}

impl UpdateUser {
    pub fn from_body(body: &JsonObject) -> Self {
        Self {
            name: body.field("name").as_str().map(str::to_owned),
            profile_image: body.field("profile_image").as_str().map(str::to_owned),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.profile_image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> JsonObject {
        JsonObject::parse(json.as_bytes()).unwrap()
    }

    #[test]
    fn create_user_reports_missing_before_mistyped() {
        let err = CreateUser::from_body(&body(r#"{"name": 5}"#)).unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS);

        let err = CreateUser::from_body(&body(r#"{"name": 5, "profile_image": "a.png"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), NOT_STRINGS);
    }

    #[test]
    fn create_user_accepts_strings() {
        let user = CreateUser::from_body(&body(r#"{"name": "Ada", "profile_image": "ada.png"}"#))
            .unwrap();

        assert_eq!(
            user,
            CreateUser {
                name: String::from("Ada"),
                profile_image: String::from("ada.png"),
            }
        );
    }

    #[test]
    fn update_user_keeps_only_strings() {
        let patch = UpdateUser::from_body(&body(r#"{"name": "X", "profile_image": null}"#));
        assert_eq!(patch.name.as_deref(), Some("X"));
        assert_eq!(patch.profile_image, None);

        assert!(UpdateUser::from_body(&body(r#"{"name": 1}"#)).is_empty());
    }
}
