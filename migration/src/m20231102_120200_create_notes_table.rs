use sea_orm_migration::prelude::*;

use crate::{
    m20231102_120000_create_users_table::Users, m20231102_120100_create_courses_table::Courses,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(ColumnDef::new(Notes::CourseId).integer().not_null())
                    .col(ColumnDef::new(Notes::PosterId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-notes-course_id")
                            .from(Notes::Table, Notes::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    // a user's notes go with the user; their blobs stay in the bucket
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-notes-poster_id")
                            .from(Notes::Table, Notes::PosterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Notes {
    Table,
    Id,
    Title,
    CourseId,
    PosterId,
}
