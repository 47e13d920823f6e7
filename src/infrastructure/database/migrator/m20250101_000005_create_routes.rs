//! Create routes table

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
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Routes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Routes::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Routes::Name).string().not_null())
                    .col(ColumnDef::new(Routes::Origin).string().not_null())
                    .col(ColumnDef::new(Routes::Destination).string().not_null())
                    .col(ColumnDef::new(Routes::DistanceKm).double())
                    .col(ColumnDef::new(Routes::EstimatedDuration).integer())
                    .col(
                        ColumnDef::new(Routes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Routes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routes_company")
                            .from(Routes::Table, Routes::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Routes {
    Table,
    Id,
    CompanyId,
    Name,
    Origin,
    Destination,
    DistanceKm,
    EstimatedDuration,
    IsActive,
    CreatedAt,
}
