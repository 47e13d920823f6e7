//! Bus repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Bus;
use crate::domain::DomainResult;

#[async_trait]
pub trait BusRepository: Send + Sync {
    async fn save(&self, bus: Bus) -> DomainResult<()>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Bus>>;
    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Bus>>;
    async fn update(&self, bus: Bus) -> DomainResult<()>;
    async fn delete(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool>;
}
