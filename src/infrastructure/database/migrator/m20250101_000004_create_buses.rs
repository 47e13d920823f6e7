//! Create buses table

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
                    .table(Buses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Buses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Buses::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Buses::RegistrationNumber).string().not_null())
                    .col(ColumnDef::new(Buses::LicensePlate).string().not_null())
                    .col(ColumnDef::new(Buses::Model).string().not_null())
                    .col(ColumnDef::new(Buses::Manufacturer).string())
                    .col(ColumnDef::new(Buses::Year).integer().not_null())
                    .col(ColumnDef::new(Buses::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Buses::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Buses::Mileage)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Buses::Notes).text())
                    .col(
                        ColumnDef::new(Buses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buses_company")
                            .from(Buses::Table, Buses::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_buses_company_registration")
                    .table(Buses::Table)
                    .col(Buses::CompanyId)
                    .col(Buses::RegistrationNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Buses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Buses {
    Table,
    Id,
    CompanyId,
    RegistrationNumber,
    LicensePlate,
    Model,
    Manufacturer,
    Year,
    Capacity,
    Status,
    Mileage,
    Notes,
    CreatedAt,
}
