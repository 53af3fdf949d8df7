//! View event entity for resume analytics

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "views")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub resume_id: String,
    /// Public share token, falls back to resume_id
    pub unique_id: String,
    pub ip_address: String,
    #[sea_orm(column_type = "Text")]
    pub user_agent: String,
    pub browser_name: String,
    pub browser_version: String,
    /// desktop / mobile / tablet / unknown
    pub device_type: String,
    pub operating_system: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub referrer_url: Option<String>,
    /// Seconds, client-reported
    pub view_duration: f64,
    pub is_unique_view: bool,
    pub session_id: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
