use sea_orm::entity::prelude::*;

/// The administrator account. At most one row exists: `singleton` is always
/// `true` and carries a unique constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_name: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub contact_number: String,
    #[sea_orm(unique)]
    pub singleton: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
