use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Admins::UserName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).text().not_null())
                    .col(ColumnDef::new(Admins::FirstName).string_len(255).not_null())
                    .col(ColumnDef::new(Admins::LastName).string_len(255).not_null())
                    .col(ColumnDef::new(Admins::Gender).string_len(12).not_null())
                    .col(ColumnDef::new(Admins::ContactNumber).char_len(10).not_null())
                    // A second admin row collides on this column.
                    .col(
                        ColumnDef::new(Admins::Singleton)
                            .boolean()
                            .not_null()
                            .default(true)
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Admins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Admins::Singleton).eq(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Admins {
    Table,
    Id,
    UserName,
    PasswordHash,
    FirstName,
    LastName,
    Gender,
    ContactNumber,
    Singleton,
    CreatedAt,
    UpdatedAt,
}
