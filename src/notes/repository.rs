use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};

use crate::entity::notes;

use super::models::NoteResponse;

/// Inserts a note row. Callers check that the course and poster exist
/// first; the foreign keys only back that up.
pub async fn create_note<C: ConnectionTrait>(
    db: &C,
    title: String,
    course_id: i32,
    poster_id: i32,
) -> Result<NoteResponse, DbErr> {
    let note = notes::ActiveModel {
        title: Set(title),
        course_id: Set(course_id),
        poster_id: Set(poster_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(note.into())
}
