//! Create trip_events table (append-only audit log)

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_companies::Companies;
use super::m20250101_000006_create_trips::Trips;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TripEvents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TripEvents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TripEvents::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(TripEvents::TripId).uuid().not_null())
                    .col(ColumnDef::new(TripEvents::EventType).string().not_null())
                    .col(
                        ColumnDef::new(TripEvents::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TripEvents::Location).string())
                    .col(ColumnDef::new(TripEvents::Latitude).double())
                    .col(ColumnDef::new(TripEvents::Longitude).double())
                    .col(ColumnDef::new(TripEvents::RecordedBy).uuid())
                    .col(ColumnDef::new(TripEvents::Description).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_events_company")
                            .from(TripEvents::Table, TripEvents::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_events_trip")
                            .from(TripEvents::Table, TripEvents::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trip_events_trip")
                    .table(TripEvents::Table)
                    .col(TripEvents::TripId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TripEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TripEvents {
    Table,
    Id,
    CompanyId,
    TripId,
    EventType,
    Timestamp,
    Location,
    Latitude,
    Longitude,
    RecordedBy,
    Description,
}
