//! Trip entity with seat-inventory columns

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub driver_id: Uuid,

    #[sea_orm(nullable)]
    pub conductor_id: Option<Uuid>,

    pub scheduled_departure: DateTimeUtc,
    pub scheduled_arrival: DateTimeUtc,

    /// Trip status: Scheduled, Active, Completed, Cancelled, Delayed
    pub status: String,

    /// Seats on sale
    pub capacity: i32,

    /// Seats claimed by live tickets; kept within [0, capacity] by the
    /// guarded updates in the ticket repository
    pub booked_seats: i32,

    pub base_price: Decimal,

    #[sea_orm(nullable)]
    pub actual_departure: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub actual_arrival: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub delay_reason: Option<String>,

    #[sea_orm(nullable)]
    pub cancellation_reason: Option<String>,

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
    #[sea_orm(
        belongs_to = "super::route::Entity",
        from = "Column::RouteId",
        to = "super::route::Column::Id"
    )]
    Route,
    #[sea_orm(
        belongs_to = "super::bus::Entity",
        from = "Column::BusId",
        to = "super::bus::Column::Id"
    )]
    Bus,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::DriverId",
        to = "super::employee::Column::Id"
    )]
    Driver,
    #[sea_orm(has_many = "super::ticket::Entity")]
    Tickets,
    #[sea_orm(has_many = "super::trip_event::Entity")]
    Events,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::route::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Route.def()
    }
}

impl Related<super::bus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bus.def()
    }
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl Related<super::trip_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
