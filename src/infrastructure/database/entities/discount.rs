//! Discount entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    /// Unique per company (composite index in the migration)
    pub code: String,

    pub name: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    /// Discount type: Percentage, Fixed Amount
    pub discount_type: String,

    pub value: Decimal,

    pub start_date: DateTimeUtc,

    #[sea_orm(nullable)]
    pub end_date: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub usage_limit: Option<i32>,

    pub usage_count: i32,

    pub is_active: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
