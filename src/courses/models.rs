use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::body::JsonObject,
    entity,
    notes::models::{note_list, NoteResponse},
};

use super::{CoursesError, MISSING_FIELDS, NOT_STRINGS};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CourseResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: String,
    pub notes: Vec<NoteResponse>,
}

impl CourseResponse {
    pub fn new(course: entity::courses::Model, notes: Vec<entity::notes::Model>) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
            description: course.description,
            notes: note_list(notes),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CoursesResponse {
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CreateCourse {
    pub code: String,
    pub name: String,
    pub description: String,
}

impl CreateCourse {
    pub fn from_body(body: &JsonObject) -> Result<Self, CoursesError> {
        let fields = [
            body.field("code"),
            body.field("name"),
            body.field("description"),
        ];

        if fields.iter().any(|field| field.is_missing()) {
            return Err(CoursesError::BadRequest(MISSING_FIELDS.to_string()));
        }

        match fields.map(|field| field.as_str()) {
            [Some(code), Some(name), Some(description)] => Ok(Self {
                code: code.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            }),
            _ => Err(CoursesError::BadRequest(NOT_STRINGS.to_string())),
        }
    }
}
