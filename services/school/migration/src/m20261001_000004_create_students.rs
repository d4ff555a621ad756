use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Students::UserName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::PasswordHash).text().not_null())
                    .col(ColumnDef::new(Students::FirstName).string_len(255).not_null())
                    .col(ColumnDef::new(Students::LastName).string_len(255).not_null())
                    .col(ColumnDef::new(Students::Gender).string_len(12).not_null())
                    .col(ColumnDef::new(Students::ContactNumber).char_len(10).not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Students::FeesPaid).big_integer().not_null())
                    .col(ColumnDef::new(Students::ClassId).uuid().not_null())
                    .col(
                        ColumnDef::new(Students::EnrolledAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Students::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Classes with students cannot be dropped out from under them.
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Students::Table)
                    .col(Students::ClassId)
                    .col(Students::EnrolledAt)
                    .name("idx_students_class_id_enrolled_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    UserName,
    PasswordHash,
    FirstName,
    LastName,
    Gender,
    ContactNumber,
    DateOfBirth,
    FeesPaid,
    ClassId,
    EnrolledAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}
