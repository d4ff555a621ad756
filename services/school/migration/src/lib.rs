use sea_orm_migration::prelude::*;

mod m20261001_000001_create_classes;
mod m20261001_000002_create_admins;
mod m20261001_000003_create_teachers;
mod m20261001_000004_create_students;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_classes::Migration),
            Box::new(m20261001_000002_create_admins::Migration),
            Box::new(m20261001_000003_create_teachers::Migration),
            Box::new(m20261001_000004_create_students::Migration),
        ]
    }
}
