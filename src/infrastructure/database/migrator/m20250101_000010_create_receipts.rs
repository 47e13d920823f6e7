//! Create receipts table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_companies::Companies;
use super::m20250101_000008_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Receipts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Receipts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Receipts::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Receipts::BookingId).uuid().not_null())
                    .col(
                        ColumnDef::new(Receipts::ReceiptNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Receipts::Currency)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(
                        ColumnDef::new(Receipts::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Receipts::IssuedBy).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receipts_company")
                            .from(Receipts::Table, Receipts::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_receipts_booking")
                            .from(Receipts::Table, Receipts::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_receipts_number")
                    .table(Receipts::Table)
                    .col(Receipts::ReceiptNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Receipts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Receipts {
    Table,
    Id,
    CompanyId,
    BookingId,
    ReceiptNumber,
    Amount,
    Currency,
    IssuedAt,
    IssuedBy,
}
