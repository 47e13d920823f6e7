//! Create tickets table
//!
//! The unique index on booking_reference is the storage-side backstop
//! for the reference generator's collision retry.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_companies::Companies;
use super::m20250101_000006_create_trips::Trips;
use super::m20250101_000008_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tickets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tickets::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Tickets::TripId).uuid().not_null())
                    .col(ColumnDef::new(Tickets::CustomerId).uuid())
                    .col(ColumnDef::new(Tickets::BookingId).uuid())
                    .col(
                        ColumnDef::new(Tickets::BookingReference)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::Status)
                            .string()
                            .not_null()
                            .default("Reserved"),
                    )
                    .col(ColumnDef::new(Tickets::SeatNumber).string_len(10))
                    .col(ColumnDef::new(Tickets::PassengerName).string().not_null())
                    .col(ColumnDef::new(Tickets::PassengerEmail).string())
                    .col(ColumnDef::new(Tickets::PassengerPhone).string())
                    .col(
                        ColumnDef::new(Tickets::BasePrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::DiscountAmount)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tickets::TaxAmount)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tickets::TotalPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::PaymentStatus)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Tickets::CheckedInAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Tickets::CheckedInBy).uuid())
                    .col(ColumnDef::new(Tickets::CancellationReason).text())
                    .col(ColumnDef::new(Tickets::CancellationDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Tickets::RefundAmount).decimal_len(10, 2))
                    .col(ColumnDef::new(Tickets::RefundDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Tickets::RefundReference).string())
                    .col(
                        ColumnDef::new(Tickets::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tickets::ExpiresAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_company")
                            .from(Tickets::Table, Tickets::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_trip")
                            .from(Tickets::Table, Tickets::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_booking")
                            .from(Tickets::Table, Tickets::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_reference")
                    .table(Tickets::Table)
                    .col(Tickets::BookingReference)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_trip")
                    .table(Tickets::Table)
                    .col(Tickets::TripId)
                    .to_owned(),
            )
            .await?;

        // serves both the expiry sweep and the expired listing
        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_status_expires")
                    .table(Tickets::Table)
                    .col(Tickets::Status)
                    .col(Tickets::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tickets {
    Table,
    Id,
    CompanyId,
    TripId,
    CustomerId,
    BookingId,
    BookingReference,
    Status,
    SeatNumber,
    PassengerName,
    PassengerEmail,
    PassengerPhone,
    BasePrice,
    DiscountAmount,
    TaxAmount,
    TotalPrice,
    PaymentStatus,
    CheckedInAt,
    CheckedInBy,
    CancellationReason,
    CancellationDate,
    RefundAmount,
    RefundDate,
    RefundReference,
    IssuedAt,
    ExpiresAt,
}
