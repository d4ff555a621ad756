use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Classes::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Classes::ClassName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Classes::TeacherName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Classes::Year).integer().not_null())
                    .col(ColumnDef::new(Classes::StudentsFees).big_integer().not_null())
                    .col(
                        ColumnDef::new(Classes::MaxStudents)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(Classes::CurrentStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Classes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Classes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Classes::CurrentStudents).gte(0))
                    .check(
                        Expr::col(Classes::CurrentStudents).lte(Expr::col(Classes::MaxStudents)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
    ClassName,
    TeacherName,
    Year,
    StudentsFees,
    MaxStudents,
    CurrentStudents,
    CreatedAt,
    UpdatedAt,
}
