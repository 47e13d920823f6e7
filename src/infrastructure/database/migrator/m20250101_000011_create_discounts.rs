//! Create discounts table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_companies::Companies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Discounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Discounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Discounts::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Discounts::Code).string_len(20).not_null())
                    .col(ColumnDef::new(Discounts::Name).string().not_null())
                    .col(ColumnDef::new(Discounts::Description).text())
                    .col(ColumnDef::new(Discounts::DiscountType).string().not_null())
                    .col(
                        ColumnDef::new(Discounts::Value)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Discounts::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Discounts::EndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Discounts::UsageLimit).integer())
                    .col(
                        ColumnDef::new(Discounts::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Discounts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Discounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discounts_company")
                            .from(Discounts::Table, Discounts::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_discounts_company_code")
                    .table(Discounts::Table)
                    .col(Discounts::CompanyId)
                    .col(Discounts::Code)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Discounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Discounts {
    Table,
    Id,
    CompanyId,
    Code,
    Name,
    Description,
    DiscountType,
    Value,
    StartDate,
    EndDate,
    UsageLimit,
    UsageCount,
    IsActive,
    CreatedAt,
}
