use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, ModelTrait, QueryOrder,
    Set,
};

use crate::entity::{
    courses::{self, Entity as Course},
    notes::Entity as Note,
};

use super::models::CourseResponse;

pub async fn list_courses<C: ConnectionTrait>(db: &C) -> Result<Vec<CourseResponse>, DbErr> {
    let courses = Course::find()
        .order_by_asc(courses::Column::Id)
        .all(db)
        .await?;
    if courses.is_empty() {
        return Ok(vec![]);
    }

    let notes = courses.load_many(Note, db).await?;

    Ok(courses
        .into_iter()
        .zip(notes)
        .map(|(course, notes)| CourseResponse::new(course, notes))
        .collect())
}

pub async fn get_course<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<CourseResponse>, DbErr> {
    let Some(course) = Course::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let notes = course.find_related(Note).all(db).await?;

    Ok(Some(CourseResponse::new(course, notes)))
}

pub async fn create_course<C: ConnectionTrait>(
    db: &C,
    code: String,
    name: String,
    description: String,
) -> Result<CourseResponse, DbErr> {
    let course = courses::ActiveModel {
        code: Set(code),
        name: Set(name),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(CourseResponse::new(course, vec![]))
}
