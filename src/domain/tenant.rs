//! Tenant context threaded through every service and repository call
//!
//! Every entity in the system is owned by exactly one company. The
//! context carries the acting user's company, identity and role; it is
//! built by the auth middleware from verified token claims and is never
//! optional past the HTTP boundary.

use uuid::Uuid;

use super::user::UserRole;

/// The acting user's tenant scope and role.
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// Company (tenant) the user belongs to
    pub company_id: Uuid,
    /// Acting user ID
    pub user_id: Uuid,
    /// Acting user's role
    pub role: UserRole,
}

impl TenantContext {
    pub fn new(company_id: Uuid, user_id: Uuid, role: UserRole) -> Self {
        Self {
            company_id,
            user_id,
            role,
        }
    }

    /// Customers only ever see their own tickets and bookings.
    pub fn is_customer(&self) -> bool {
        self.role == UserRole::Customer
    }
}
