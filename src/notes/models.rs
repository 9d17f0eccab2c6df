use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::body::JsonObject, entity};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NoteResponse {
    pub id: i32,
    pub title: String,
    pub course_id: i32,
    pub poster_id: i32,
}

impl From<entity::notes::Model> for NoteResponse {
    fn from(note: entity::notes::Model) -> Self {
        Self {
            id: note.id,
            title: note.title,
            course_id: note.course_id,
            poster_id: note.poster_id,
        }
    }
}

/// Notes as they are embedded in a user or course, ordered by id.
pub fn note_list(mut notes: Vec<entity::notes::Model>) -> Vec<NoteResponse> {
    notes.sort_by_key(|note| note.id);
    notes.into_iter().map(NoteResponse::from).collect()
}

/// Metadata fields collected from an upload's multipart parts.
///
/// Ids stay raw text until lookup: an id that does not parse is treated
/// the same as one that does not exist.
#[derive(Builder, Debug)]
#[builder(pattern = "owned", setter(into))]
pub struct NoteMetadata {
    pub title: String,
    pub course_id: String,
    pub poster_id: String,
}

impl NoteMetadata {
    #[must_use]
    pub fn builder() -> NoteMetadataBuilder {
        NoteMetadataBuilder::default()
    }
}

impl NoteMetadataBuilder {
    /// Fills fields from a JSON `metadata` part without overriding fields
    /// already set from their own text parts.
    pub fn merge_json(mut self, object: &JsonObject) -> Self {
        if self.title.is_none() {
            self.title = object.text("title");
        }
        if self.course_id.is_none() {
            self.course_id = object.text("course_id");
        }
        if self.poster_id.is_none() {
            self.poster_id = object.text("poster_id");
        }
        self
    }
}

/// Multipart form accepted by `POST /upload/`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadNote {
    pub title: String,
    pub course_id: i32,
    pub poster_id: i32,
    /// JSON object with `title`, `course_id` and `poster_id`, as an
    /// alternative to the individual fields.
    pub metadata: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
