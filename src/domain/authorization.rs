//! Role-based authorization policy
//!
//! A single policy function over a declarative rule table, applied at
//! the HTTP boundary before any service call. Tenant scoping is a
//! separate concern: it is enforced by threading [`TenantContext`]
//! through every repository call, not here.
//!
//! [`TenantContext`]: super::tenant::TenantContext

use super::user::UserRole;
use super::{DomainError, DomainResult};

/// Every distinct operation the policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewBuses,
    ManageBuses,
    ViewRoutes,
    ManageRoutes,
    ViewTrips,
    ManageTrips,
    RecordTripEvents,
    ViewTickets,
    SellTickets,
    CancelTickets,
    RefundTickets,
    CheckInTickets,
    ViewBookings,
    ManageBookings,
    IssueReceipts,
    ViewDiscounts,
    ManageDiscounts,
    ValidateDiscounts,
}

use Action::*;
use UserRole::*;

/// Roles permitted to perform each action. First match wins; absence
/// means deny.
const RULES: &[(Action, &[UserRole])] = &[
    (ViewBuses, &[Admin, Manager, Staff, Driver, Conductor]),
    (ManageBuses, &[Admin, Manager, Staff]),
    (ViewRoutes, &[Admin, Manager, Staff, Driver, Conductor, Customer]),
    (ManageRoutes, &[Admin, Manager, Staff]),
    (ViewTrips, &[Admin, Manager, Staff, Driver, Conductor, Customer]),
    (ManageTrips, &[Admin, Manager, Staff]),
    (RecordTripEvents, &[Admin, Manager, Staff, Driver, Conductor]),
    (ViewTickets, &[Admin, Manager, Staff, Driver, Conductor, Customer]),
    (SellTickets, &[Admin, Manager, Staff, Customer]),
    (CancelTickets, &[Admin, Manager, Staff, Customer]),
    (RefundTickets, &[Admin, Manager, Staff]),
    (CheckInTickets, &[Admin, Manager, Staff, Conductor]),
    (ViewBookings, &[Admin, Manager, Staff, Customer]),
    (ManageBookings, &[Admin, Manager, Staff, Customer]),
    (IssueReceipts, &[Admin, Manager, Staff]),
    (ViewDiscounts, &[Admin, Manager, Staff, Customer]),
    (ManageDiscounts, &[Admin, Manager]),
    (ValidateDiscounts, &[Admin, Manager, Staff, Customer]),
];

/// Check whether `role` may perform `action`.
pub fn is_allowed(role: UserRole, action: Action) -> bool {
    RULES
        .iter()
        .find(|(a, _)| *a == action)
        .map(|(_, roles)| roles.contains(&role))
        .unwrap_or(false)
}

/// Policy check returning a domain error on denial.
pub fn authorize(role: UserRole, action: Action) -> DomainResult<()> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "role {} may not perform this action",
            role
        )))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managers_manage_discounts_staff_do_not() {
        assert!(is_allowed(UserRole::Manager, Action::ManageDiscounts));
        assert!(is_allowed(UserRole::Admin, Action::ManageDiscounts));
        assert!(!is_allowed(UserRole::Staff, Action::ManageDiscounts));
    }

    #[test]
    fn drivers_record_events_but_do_not_sell() {
        assert!(is_allowed(UserRole::Driver, Action::RecordTripEvents));
        assert!(!is_allowed(UserRole::Driver, Action::SellTickets));
    }

    #[test]
    fn conductors_check_in() {
        assert!(is_allowed(UserRole::Conductor, Action::CheckInTickets));
        assert!(!is_allowed(UserRole::Customer, Action::CheckInTickets));
    }

    #[test]
    fn customers_view_trips_and_buy() {
        assert!(is_allowed(UserRole::Customer, Action::ViewTrips));
        assert!(is_allowed(UserRole::Customer, Action::SellTickets));
        assert!(!is_allowed(UserRole::Customer, Action::ManageTrips));
    }

    #[test]
    fn authorize_maps_denial_to_forbidden() {
        let err = authorize(UserRole::Driver, Action::ManageBuses).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
