use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teachers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Teachers::UserName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::PasswordHash).text().not_null())
                    .col(ColumnDef::new(Teachers::FirstName).string_len(255).not_null())
                    .col(ColumnDef::new(Teachers::LastName).string_len(255).not_null())
                    .col(ColumnDef::new(Teachers::Gender).string_len(12).not_null())
                    .col(ColumnDef::new(Teachers::ContactNumber).char_len(10).not_null())
                    .col(ColumnDef::new(Teachers::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Teachers::Salary).big_integer().not_null())
                    .col(ColumnDef::new(Teachers::AssignedClassId).uuid().null())
                    .col(
                        ColumnDef::new(Teachers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Teachers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teachers::Table, Teachers::AssignedClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Teachers::Table)
                    .col(Teachers::AssignedClassId)
                    .name("idx_teachers_assigned_class_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
    UserName,
    PasswordHash,
    FirstName,
    LastName,
    Gender,
    ContactNumber,
    DateOfBirth,
    Salary,
    AssignedClassId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}
