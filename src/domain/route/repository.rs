//! Route repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Route;
use crate::domain::DomainResult;

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn save(&self, route: Route) -> DomainResult<()>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Route>>;
    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Route>>;
    async fn update(&self, route: Route) -> DomainResult<()>;
    async fn delete(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool>;
}
