pub use sea_orm_migration::prelude::*;

mod m20231102_120000_create_users_table;
mod m20231102_120100_create_courses_table;
mod m20231102_120200_create_notes_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20231102_120000_create_users_table::Migration),
            Box::new(m20231102_120100_create_courses_table::Migration),
            Box::new(m20231102_120200_create_notes_table::Migration),
        ]
    }
}
