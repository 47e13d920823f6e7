//! Employee repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Employee;
use crate::domain::DomainResult;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find an employee within the given company.
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Employee>>;
    async fn save(&self, employee: Employee) -> DomainResult<()>;
}
