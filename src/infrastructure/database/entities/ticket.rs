//! Ticket entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub trip_id: Uuid,

    #[sea_orm(nullable)]
    pub customer_id: Option<Uuid>,

    #[sea_orm(nullable)]
    pub booking_id: Option<Uuid>,

    /// 2 uppercase letters + 6 digits; the unique index backstops the
    /// generator's collision retry
    #[sea_orm(unique)]
    pub booking_reference: String,

    /// Ticket status: Reserved, Confirmed, Checked In, Used, Cancelled,
    /// Refunded, Expired
    pub status: String,

    #[sea_orm(nullable)]
    pub seat_number: Option<String>,

    pub passenger_name: String,

    #[sea_orm(nullable)]
    pub passenger_email: Option<String>,

    #[sea_orm(nullable)]
    pub passenger_phone: Option<String>,

    pub base_price: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_price: Decimal,

    /// Payment status: Pending, Completed, Failed, Refunded
    pub payment_status: String,

    #[sea_orm(nullable)]
    pub checked_in_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub checked_in_by: Option<Uuid>,

    #[sea_orm(nullable)]
    pub cancellation_reason: Option<String>,

    #[sea_orm(nullable)]
    pub cancellation_date: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub refund_amount: Option<Decimal>,

    #[sea_orm(nullable)]
    pub refund_date: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub refund_reference: Option<String>,

    pub issued_at: DateTimeUtc,

    /// Reservation deadline; set only while Reserved
    #[sea_orm(nullable)]
    pub expires_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id"
    )]
    Trip,
    #[sea_orm(
        belongs_to = "super::booking::Entity",
        from = "Column::BookingId",
        to = "super::booking::Column::Id"
    )]
    Booking,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id"
    )]
    Customer,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
