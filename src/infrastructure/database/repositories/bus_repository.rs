//! SeaORM implementation of BusRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::bus::{Bus, BusRepository, BusStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::bus;

use super::{corrupt_status, db_err};

pub struct SeaOrmBusRepository {
    db: DatabaseConnection,
}

impl SeaOrmBusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: bus::Model) -> DomainResult<Bus> {
    Ok(Bus {
        id: m.id,
        company_id: m.company_id,
        status: BusStatus::parse(&m.status).ok_or_else(|| corrupt_status("Bus", &m.status))?,
        registration_number: m.registration_number,
        license_plate: m.license_plate,
        model: m.model,
        manufacturer: m.manufacturer,
        year: m.year,
        capacity: m.capacity,
        mileage: m.mileage,
        notes: m.notes,
        created_at: m.created_at,
    })
}

fn to_active(b: Bus) -> bus::ActiveModel {
    bus::ActiveModel {
        id: Set(b.id),
        company_id: Set(b.company_id),
        registration_number: Set(b.registration_number),
        license_plate: Set(b.license_plate),
        model: Set(b.model),
        manufacturer: Set(b.manufacturer),
        year: Set(b.year),
        capacity: Set(b.capacity),
        status: Set(b.status.as_str().to_string()),
        mileage: Set(b.mileage),
        notes: Set(b.notes),
        created_at: Set(b.created_at),
    }
}

#[async_trait]
impl BusRepository for SeaOrmBusRepository {
    async fn save(&self, b: Bus) -> DomainResult<()> {
        debug!(bus_id = %b.id, "Saving bus");
        to_active(b).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Bus>> {
        let model = bus::Entity::find_by_id(id)
            .filter(bus::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Bus>> {
        let models = bus::Entity::find()
            .filter(bus::Column::CompanyId.eq(company_id))
            .order_by_asc(bus::Column::RegistrationNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, b: Bus) -> DomainResult<()> {
        let exists = bus::Entity::find_by_id(b.id)
            .filter(bus::Column::CompanyId.eq(b.company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Bus", b.id));
        }
        to_active(b).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let result = bus::Entity::delete_many()
            .filter(bus::Column::Id.eq(id))
            .filter(bus::Column::CompanyId.eq(company_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
