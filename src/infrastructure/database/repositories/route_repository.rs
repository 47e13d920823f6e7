//! SeaORM implementation of RouteRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::route::{Route, RouteRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::route;

use super::db_err;

pub struct SeaOrmRouteRepository {
    db: DatabaseConnection,
}

impl SeaOrmRouteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: route::Model) -> Route {
    Route {
        id: m.id,
        company_id: m.company_id,
        name: m.name,
        origin: m.origin,
        destination: m.destination,
        distance_km: m.distance_km,
        estimated_duration: m.estimated_duration,
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

fn to_active(r: Route) -> route::ActiveModel {
    route::ActiveModel {
        id: Set(r.id),
        company_id: Set(r.company_id),
        name: Set(r.name),
        origin: Set(r.origin),
        destination: Set(r.destination),
        distance_km: Set(r.distance_km),
        estimated_duration: Set(r.estimated_duration),
        is_active: Set(r.is_active),
        created_at: Set(r.created_at),
    }
}

#[async_trait]
impl RouteRepository for SeaOrmRouteRepository {
    async fn save(&self, r: Route) -> DomainResult<()> {
        debug!(route_id = %r.id, "Saving route");
        to_active(r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Route>> {
        let model = route::Entity::find_by_id(id)
            .filter(route::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Route>> {
        let models = route::Entity::find()
            .filter(route::Column::CompanyId.eq(company_id))
            .order_by_asc(route::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, r: Route) -> DomainResult<()> {
        let exists = route::Entity::find_by_id(r.id)
            .filter(route::Column::CompanyId.eq(r.company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Route", r.id));
        }
        to_active(r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let result = route::Entity::delete_many()
            .filter(route::Column::Id.eq(id))
            .filter(route::Column::CompanyId.eq(company_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
