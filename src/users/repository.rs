use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, LoaderTrait,
    ModelTrait, QueryOrder, Set,
};

use crate::entity::{
    notes::Entity as Note,
    users::{self, Entity as User},
};

use super::models::{UpdateUser, UserResponse};

pub async fn list_users<C: ConnectionTrait>(db: &C) -> Result<Vec<UserResponse>, DbErr> {
    let users = User::find().order_by_asc(users::Column::Id).all(db).await?;
    if users.is_empty() {
        return Ok(vec![]);
    }

    let notes = users.load_many(Note, db).await?;

    Ok(users
        .into_iter()
        .zip(notes)
        .map(|(user, notes)| UserResponse::new(user, notes))
        .collect())
}

async fn with_notes<C: ConnectionTrait>(
    db: &C,
    user: users::Model,
) -> Result<UserResponse, DbErr> {
    let notes = user.find_related(Note).all(db).await?;
    Ok(UserResponse::new(user, notes))
}

pub async fn get_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<UserResponse>, DbErr> {
    let Some(user) = User::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    Ok(Some(with_notes(db, user).await?))
}

pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    name: String,
    profile_image: String,
) -> Result<UserResponse, DbErr> {
    let user = users::ActiveModel {
        name: Set(name),
        profile_image: Set(profile_image),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(UserResponse::new(user, vec![]))
}

pub async fn update_user<C: ConnectionTrait>(
    db: &C,
    id: i32,
    patch: UpdateUser,
) -> Result<Option<UserResponse>, DbErr> {
    let Some(user) = User::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    if patch.is_empty() {
        return Ok(Some(with_notes(db, user).await?));
    }

    let mut user = user.into_active_model();

    if let Some(name) = patch.name {
        user.name = Set(name);
    }

    if let Some(profile_image) = patch.profile_image {
        user.profile_image = Set(profile_image);
    }

    let user = user.update(db).await?;

    Ok(Some(with_notes(db, user).await?))
}

/// Deletes a user and returns the record as it was right before.
pub async fn delete_user<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<UserResponse>, DbErr> {
    let Some(snapshot) = get_user(db, id).await? else {
        return Ok(None);
    };

    let res = User::delete_by_id(id).exec(db).await?;
    if res.rows_affected < 1 {
        return Ok(None);
    }

    Ok(Some(snapshot))
}
