//! One row per page load of a lure.
//!
//! The id is a UUID v7; its leading 48 bits carry the creation timestamp,
//! so there is no separate created_at column.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "lure_views")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Nullable: set to NULL when the owning lure is deleted.
    pub lure_id: Option<String>,
    pub ip: String,
    #[sea_orm(column_type = "Text")]
    pub user_agent: String,
    pub location: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub photo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
