//! User entity
//!
//! Accounts are provisioned by the external identity provider; no
//! credentials are stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(nullable)]
    pub company_id: Option<Uuid>,

    #[sea_orm(unique)]
    pub email: String,

    pub first_name: String,
    pub last_name: String,

    /// User role: Admin, Manager, Staff, Driver, Conductor, Customer
    pub role: String,

    #[sea_orm(nullable)]
    pub employee_id: Option<Uuid>,

    pub is_active: bool,

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
