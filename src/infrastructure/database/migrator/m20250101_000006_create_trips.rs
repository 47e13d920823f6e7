//! Create trips table
//!
//! Carries the seat-inventory pair (`capacity`, `booked_seats`) whose
//! invariant the ticket repository maintains with guarded updates.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_companies::Companies;
use super::m20250101_000003_create_employees::Employees;
use super::m20250101_000004_create_buses::Buses;
use super::m20250101_000005_create_routes::Routes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Trips::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Trips::RouteId).uuid().not_null())
                    .col(ColumnDef::new(Trips::BusId).uuid().not_null())
                    .col(ColumnDef::new(Trips::DriverId).uuid().not_null())
                    .col(ColumnDef::new(Trips::ConductorId).uuid())
                    .col(
                        ColumnDef::new(Trips::ScheduledDeparture)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::ScheduledArrival)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::Status)
                            .string()
                            .not_null()
                            .default("Scheduled"),
                    )
                    .col(ColumnDef::new(Trips::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Trips::BookedSeats)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Trips::BasePrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Trips::ActualDeparture).timestamp_with_time_zone())
                    .col(ColumnDef::new(Trips::ActualArrival).timestamp_with_time_zone())
                    .col(ColumnDef::new(Trips::DelayReason).text())
                    .col(ColumnDef::new(Trips::CancellationReason).text())
                    .col(
                        ColumnDef::new(Trips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_company")
                            .from(Trips::Table, Trips::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_route")
                            .from(Trips::Table, Trips::RouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_bus")
                            .from(Trips::Table, Trips::BusId)
                            .to(Buses::Table, Buses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_driver")
                            .from(Trips::Table, Trips::DriverId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trips_company_departure")
                    .table(Trips::Table)
                    .col(Trips::CompanyId)
                    .col(Trips::ScheduledDeparture)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trips_status")
                    .table(Trips::Table)
                    .col(Trips::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Trips {
    Table,
    Id,
    CompanyId,
    RouteId,
    BusId,
    DriverId,
    ConductorId,
    ScheduledDeparture,
    ScheduledArrival,
    Status,
    Capacity,
    BookedSeats,
    BasePrice,
    ActualDeparture,
    ActualArrival,
    DelayReason,
    CancellationReason,
    CreatedAt,
}
