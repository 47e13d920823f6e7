//! User repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user within the given company.
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<User>>;
    async fn save(&self, user: User) -> DomainResult<()>;
}
