//! Employee entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[sea_orm(nullable)]
    pub phone: Option<String>,

    /// Employee role: Driver, Conductor, Mechanic, Manager, Admin, Other
    pub role: String,

    /// Employee status: Active, On Leave, Inactive, Terminated
    pub status: String,

    pub hire_date: Date,

    #[sea_orm(nullable)]
    pub license_number: Option<String>,

    #[sea_orm(nullable)]
    pub license_expiry_date: Option<Date>,

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
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
