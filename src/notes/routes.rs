use axum::{
    extract::{multipart::Field, DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use tempfile::NamedTempFile;

use crate::{
    common::{body::JsonObject, parse_id},
    entity::{courses::Entity as Course, users::Entity as User},
    storage::{SharedStorage, StorageError},
    AppState,
};

use super::{
    models::{NoteMetadata, NoteResponse},
    repository,
    staging::{blob_key, file_name, Staging},
    NotesError, MISSING_FILE, MISSING_METADATA,
};

pub fn notes_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload/", post(upload_note))
        .route("/notes/:note_id/", get(get_note))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

async fn field_text(field: Field<'_>) -> Result<String, NotesError> {
    let name = field.name().unwrap_or_default().to_string();

    field.text().await.map_err(|err| {
        tracing::error!("{} field error: {:#?}", name, err);
        NotesError::from_multipart(&err, format!("could not read '{name}' part"))
    })
}

/// Upload a note
#[utoipa::path(
    post,
    path = "/upload/",
    request_body(content = UploadNote, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Note saved and its file uploaded", body = NoteResponse),
        (status = 400, description = "A metadata field or the file part is missing", body = ErrorResponse),
        (status = 404, description = "Poster or course not found", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the body limit", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Notes API"
)]
#[axum::debug_handler(state = AppState)]
pub async fn upload_note(
    State(db): State<DatabaseConnection>,
    State(storage): State<SharedStorage>,
    State(staging): State<Staging>,
    mut fields: Multipart,
) -> Result<(StatusCode, Json<NoteResponse>), NotesError> {
    let mut metadata = NoteMetadata::builder();
    let mut json_metadata: Option<JsonObject> = None;
    let mut staged: Option<NamedTempFile> = None;

    while let Some(mut field) = fields.next_field().await.map_err(|err| {
        tracing::error!("upload multipart error: {:#?}", err);
        NotesError::from_multipart(&err, String::from("malformed multipart body"))
    })? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };

        match field_name.as_str() {
            "title" => {
                tracing::debug!("adding note title");
                metadata = metadata.title(field_text(field).await?);
            }
            "course_id" => {
                tracing::debug!("adding note course_id");
                metadata = metadata.course_id(field_text(field).await?);
            }
            "poster_id" => {
                tracing::debug!("adding note poster_id");
                metadata = metadata.poster_id(field_text(field).await?);
            }
            "metadata" => {
                tracing::debug!("adding note json metadata");
                let text = field_text(field).await?;
                json_metadata = Some(JsonObject::parse(text.as_bytes())?);
            }
            "file" => {
                tracing::debug!("staging note file");
                staged = Some(staging.receive(&mut field).await?);
            }
            _ => continue,
        }
    }

    if let Some(json_metadata) = &json_metadata {
        metadata = metadata.merge_json(json_metadata);
    }

    let Some(staged) = staged else {
        return Err(NotesError::BadRequest(MISSING_FILE.to_string()));
    };

    let metadata = metadata.build().map_err(|e| {
        tracing::error!("failed to build note metadata: {}", e);
        NotesError::BadRequest(MISSING_METADATA.to_string())
    })?;

    let poster = match parse_id(&metadata.poster_id) {
        Some(poster_id) => User::find_by_id(poster_id).one(&db).await?,
        None => None,
    };
    let Some(poster) = poster else {
        return Err(NotesError::PosterNotFound);
    };

    let course = match parse_id(&metadata.course_id) {
        Some(course_id) => Course::find_by_id(course_id).one(&db).await?,
        None => None,
    };
    let Some(course) = course else {
        return Err(NotesError::CourseNotFound);
    };

    // the blob is named after the note, so the row goes in first
    let note = repository::create_note(&db, metadata.title, course.id, poster.id).await?;

    let staged_path = staging.upload_path(note.id);
    staged.persist(&staged_path).map_err(|err| err.error)?;

    let key = blob_key(note.id);
    let transfer = storage.put(&key, &staged_path).await;

    if let Err(err) = tokio::fs::remove_file(&staged_path).await {
        tracing::warn!("failed to remove staged file {:?}: {}", staged_path, err);
    }

    // no rollback: the note row stays even when the upload failed
    transfer.map_err(|err| {
        tracing::error!("note {} saved but upload of {} failed: {}", note.id, key, err);
        err
    })?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Download a note's PDF
#[utoipa::path(
    get,
    path = "/notes/{note_id}/",
    params(
        ("note_id" = i32, Path, description = "Note id"),
    ),
    responses(
        (status = 200, description = "The note's PDF, sent as an attachment"),
        (status = 404, description = "No file stored for this note", body = ErrorResponse),
        (status = 500, description = "Something went wrong", body = ErrorResponse),
    ),
    tag = "Notes API"
)]
#[axum::debug_handler(state = AppState)]
pub async fn get_note(
    State(storage): State<SharedStorage>,
    State(staging): State<Staging>,
    Path(note_id): Path<String>,
) -> Result<Response, NotesError> {
    let note_id = parse_id(&note_id).ok_or(NotesError::FileNotFound)?;

    // one target per request: concurrent downloads of a note never share a file
    let local_path = staging.download_target()?;

    match storage.get(&blob_key(note_id), &local_path).await {
        Ok(()) => {}
        Err(StorageError::NotFound(key)) => {
            tracing::debug!("no blob stored under {}", key);
            return Err(NotesError::FileNotFound);
        }
        Err(err) => return Err(err.into()),
    }

    let bytes = tokio::fs::read(&local_path).await?;

    if let Err(err) = local_path.close() {
        tracing::warn!("failed to remove downloaded file: {}", err);
    }

    let headers = [
        (header::CONTENT_TYPE, String::from("application/pdf")),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name(note_id)),
        ),
    ];

    Ok((headers, bytes).into_response())
}
