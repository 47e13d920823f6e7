//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    #[sea_orm(nullable)]
    pub customer_id: Option<Uuid>,

    /// 2 uppercase letters + 6 digits, globally unique
    #[sea_orm(unique)]
    pub booking_reference: String,

    /// Booking status: Pending, Confirmed, Cancelled, Completed
    pub status: String,

    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub final_amount: Decimal,

    /// Payment status: Pending, Completed, Failed, Refunded
    pub payment_status: String,

    #[sea_orm(nullable)]
    pub payment_reference: Option<String>,

    #[sea_orm(nullable)]
    pub paid_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

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
    #[sea_orm(has_many = "super::ticket::Entity")]
    Tickets,
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
