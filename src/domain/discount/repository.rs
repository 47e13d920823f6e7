//! Discount repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Discount;
use crate::domain::DomainResult;

#[async_trait]
pub trait DiscountRepository: Send + Sync {
    async fn save(&self, discount: Discount) -> DomainResult<()>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Discount>>;
    async fn find_by_code(&self, company_id: Uuid, code: &str)
        -> DomainResult<Option<Discount>>;
    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Discount>>;
    async fn update(&self, discount: Discount) -> DomainResult<()>;

    /// Atomically increment `usage_count`, guarded by `usage_limit`.
    /// Returns false when the limit was already exhausted (no change
    /// applied).
    async fn increment_usage(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool>;
}
