//! Ticket issuance and lifecycle service
//!
//! Issuance is the write side of the trip capacity ledger: the
//! pre-checks here fail fast, but the authoritative seat claim is the
//! guarded update inside `insert_claiming_seat`, so concurrent
//! requests for the last seat cannot both succeed. A booking-reference
//! collision at insert time (two generators drawing the same code) is
//! recovered by exactly one regenerate-and-retry.

use std::sync::Arc;

use chrono::{Duration, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::reference::{self, ReferenceKind};
use crate::domain::ticket::{PaymentStatus, Ticket, TicketFilter, TicketStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, TenantContext};

/// Input for ticket issuance.
#[derive(Debug, Clone)]
pub struct IssueTicket {
    pub trip_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub passenger_name: String,
    pub passenger_email: Option<String>,
    pub passenger_phone: Option<String>,
    pub seat_number: Option<String>,
    /// Discount code to price against; usage bookkeeping stays with the
    /// explicit redemption flow
    pub discount_code: Option<String>,
    pub tax_amount: Option<Decimal>,
    /// Explicit initial status; when absent the ticket is Reserved with
    /// an expiry deadline
    pub status: Option<TicketStatus>,
}

pub struct TicketingService {
    repos: Arc<dyn RepositoryProvider>,
    /// How long a reservation holds its seat
    reservation_ttl: Duration,
}

impl TicketingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            reservation_ttl: Duration::hours(24),
        }
    }

    pub fn with_reservation_ttl(mut self, ttl: Duration) -> Self {
        self.reservation_ttl = ttl;
        self
    }

    /// Issue a ticket against a trip, claiming one seat.
    pub async fn issue(&self, ctx: &TenantContext, input: IssueTicket) -> DomainResult<Ticket> {
        if input.passenger_name.trim().is_empty() {
            return Err(DomainError::validation(
                "passenger_name",
                "Passenger name is required",
            ));
        }

        let trip = self
            .repos
            .trips()
            .find_by_id(ctx.company_id, input.trip_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation("trip", "Trip does not belong to your company")
            })?;

        if !trip.accepts_bookings() {
            return Err(DomainError::BusinessRule(format!(
                "Cannot book ticket for a {} trip",
                trip.status.as_str().to_lowercase()
            )));
        }

        if !trip.has_available_seats() {
            return Err(DomainError::BusinessRule(
                "No seats available for this trip".to_string(),
            ));
        }

        // customers buy for themselves; staff may sell to any customer
        // of the company
        let customer_id = if ctx.is_customer() {
            Some(ctx.user_id)
        } else {
            if let Some(customer_id) = input.customer_id {
                self.repos
                    .users()
                    .find_by_id(ctx.company_id, customer_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::validation(
                            "customer",
                            "Customer does not belong to your company",
                        )
                    })?;
            }
            input.customer_id
        };

        let now = Utc::now();

        let discount_amount = match &input.discount_code {
            Some(code) => {
                let discount = self
                    .repos
                    .discounts()
                    .find_by_code(ctx.company_id, code)
                    .await?
                    .ok_or(DomainError::NotFound {
                        entity: "Discount",
                        field: "code",
                        value: code.clone(),
                    })?;
                discount
                    .validate_at(now)
                    .map_err(|r| DomainError::BusinessRule(r.to_string()))?;
                discount.amount_off(trip.base_price)
            }
            None => Decimal::ZERO,
        };

        let tax_amount = input.tax_amount.unwrap_or(Decimal::ZERO);
        let total_price = trip.base_price - discount_amount + tax_amount;
        Ticket::validate_pricing(trip.base_price, discount_amount, tax_amount, total_price)?;

        let status = input.status.unwrap_or(TicketStatus::Reserved);
        let expires_at = if input.status.is_none() {
            Some(now + self.reservation_ttl)
        } else {
            None
        };

        let ticket = Ticket {
            id: Uuid::new_v4(),
            company_id: ctx.company_id,
            trip_id: trip.id,
            customer_id,
            booking_id: None,
            booking_reference: self.unique_ticket_reference().await?,
            status,
            seat_number: input.seat_number,
            passenger_name: input.passenger_name,
            passenger_email: input.passenger_email,
            passenger_phone: input.passenger_phone,
            base_price: trip.base_price,
            discount_amount,
            tax_amount,
            total_price,
            payment_status: PaymentStatus::Pending,
            checked_in_at: None,
            checked_in_by: None,
            cancellation_reason: None,
            cancellation_date: None,
            refund_amount: None,
            refund_date: None,
            refund_reference: None,
            issued_at: now,
            expires_at,
        };

        let issued = self.insert_with_reference_retry(ticket).await?;

        counter!("fleetline_tickets_issued_total").increment(1);
        info!(
            ticket_id = %issued.id,
            trip_id = %issued.trip_id,
            reference = %issued.booking_reference,
            "Ticket issued"
        );
        Ok(issued)
    }

    /// Insert, claiming a seat; one regenerate-and-retry on reference
    /// collision, then the error surfaces.
    async fn insert_with_reference_retry(&self, mut ticket: Ticket) -> DomainResult<Ticket> {
        match self.repos.tickets().insert_claiming_seat(ticket.clone()).await {
            Ok(Some(t)) => Ok(t),
            Ok(None) => Err(DomainError::BusinessRule(
                "No seats available for this trip".to_string(),
            )),
            Err(DomainError::Conflict(_)) => {
                warn!(
                    reference = %ticket.booking_reference,
                    "Booking reference collided at insert, regenerating"
                );
                ticket.booking_reference = self.unique_ticket_reference().await?;
                match self.repos.tickets().insert_claiming_seat(ticket).await? {
                    Some(t) => Ok(t),
                    None => Err(DomainError::BusinessRule(
                        "No seats available for this trip".to_string(),
                    )),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Draw candidates until one is unused. Bounded in practice by the
    /// format's collision probability; the unique index backstops races.
    async fn unique_ticket_reference(&self) -> DomainResult<String> {
        loop {
            let candidate = reference::candidate(ReferenceKind::Ticket);
            if !self.repos.tickets().reference_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
    }

    pub async fn get(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Ticket> {
        let ticket = self
            .repos
            .tickets()
            .find_by_id(ctx.company_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", id))?;
        // customers never see other people's tickets, not even as a 403
        if ctx.is_customer() && ticket.customer_id != Some(ctx.user_id) {
            return Err(DomainError::not_found("Ticket", id));
        }
        Ok(ticket)
    }

    pub async fn list(
        &self,
        ctx: &TenantContext,
        mut filter: TicketFilter,
    ) -> DomainResult<Vec<Ticket>> {
        if ctx.is_customer() {
            filter.customer_id = Some(ctx.user_id);
        }
        self.repos.tickets().list(ctx.company_id, filter).await
    }

    /// Reserved tickets past their deadline, company-scoped.
    pub async fn expired(&self, ctx: &TenantContext) -> DomainResult<Vec<Ticket>> {
        let mut tickets = self
            .repos
            .tickets()
            .list_expired(ctx.company_id, Utc::now())
            .await?;
        if ctx.is_customer() {
            tickets.retain(|t| t.customer_id == Some(ctx.user_id));
        }
        Ok(tickets)
    }

    /// Tickets for trips departing today (UTC day window).
    pub async fn today(&self, ctx: &TenantContext) -> DomainResult<Vec<Ticket>> {
        let now = Utc::now();
        let start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc();
        let mut tickets = self
            .repos
            .tickets()
            .list_departing_between(ctx.company_id, start, start + Duration::days(1))
            .await?;
        if ctx.is_customer() {
            tickets.retain(|t| t.customer_id == Some(ctx.user_id));
        }
        Ok(tickets)
    }

    /// Reserved → Confirmed (payment completed).
    pub async fn confirm(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Ticket> {
        let mut ticket = self.get(ctx, id).await?;
        ticket.confirm(Utc::now())?;
        self.repos.tickets().update(ticket.clone()).await?;
        info!(ticket_id = %ticket.id, "Ticket confirmed");
        Ok(ticket)
    }

    /// Check the passenger in, recording the operating employee.
    pub async fn check_in(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        operator_employee_id: Option<Uuid>,
    ) -> DomainResult<Ticket> {
        let mut ticket = self.get(ctx, id).await?;

        if let Some(employee_id) = operator_employee_id {
            self.repos
                .employees()
                .find_by_id(ctx.company_id, employee_id)
                .await?
                .ok_or_else(|| {
                    DomainError::validation(
                        "checked_in_by",
                        "Employee does not belong to your company",
                    )
                })?;
        }

        ticket.check_in(operator_employee_id, Utc::now())?;
        self.repos.tickets().update(ticket.clone()).await?;
        info!(ticket_id = %ticket.id, "Ticket checked in");
        Ok(ticket)
    }

    /// Cancel the ticket and release its seat.
    pub async fn cancel(&self, ctx: &TenantContext, id: Uuid, reason: &str) -> DomainResult<Ticket> {
        let mut ticket = self.get(ctx, id).await?;
        ticket.cancel(reason, Utc::now())?;
        self.repos.tickets().update_releasing_seat(ticket.clone()).await?;

        counter!("fleetline_tickets_cancelled_total").increment(1);
        info!(ticket_id = %ticket.id, reason, "Ticket cancelled");
        Ok(ticket)
    }

    /// Refund a cancelled ticket. The seat was already released.
    pub async fn refund(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        amount: Decimal,
        reference: Option<String>,
    ) -> DomainResult<Ticket> {
        let mut ticket = self.get(ctx, id).await?;
        ticket.refund(amount, reference, Utc::now())?;
        self.repos.tickets().update(ticket.clone()).await?;

        counter!("fleetline_tickets_refunded_total").increment(1);
        info!(ticket_id = %ticket.id, "Ticket refunded");
        Ok(ticket)
    }

    /// Materialize Reserved-past-deadline tickets as Expired across all
    /// tenants. Returns how many were transitioned.
    pub async fn expire_due_reservations(&self) -> DomainResult<usize> {
        let now = Utc::now();
        let due = self.repos.tickets().list_expired_all_tenants(now).await?;
        let mut expired = 0;
        for mut ticket in due {
            if ticket.expire(now) {
                if let Err(e) = self.repos.tickets().update(ticket).await {
                    warn!(error = %e, "Failed to expire ticket");
                } else {
                    expired += 1;
                }
            }
        }
        if expired > 0 {
            counter!("fleetline_tickets_expired_total").increment(expired as u64);
        }
        Ok(expired)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct Setup {
        service: TicketingService,
        ctx: TenantContext,
        fixtures: Fixtures,
        repos: Arc<InMemoryRepositoryProvider>,
    }

    async fn setup_with_capacity(capacity: i32) -> Setup {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let fixtures = seed_company(repos.as_ref()).await;
        let trip = sample_trip(&fixtures, capacity);
        let fixtures = Fixtures {
            trip_id: trip.id,
            ..fixtures
        };
        crate::domain::trip::TripRepository::save(repos.as_ref(), trip)
            .await
            .unwrap();
        Setup {
            service: TicketingService::new(repos.clone()),
            ctx: fixtures.staff_context(),
            fixtures,
            repos,
        }
    }

    fn issue_input(trip_id: Uuid, name: &str) -> IssueTicket {
        IssueTicket {
            trip_id,
            customer_id: None,
            passenger_name: name.to_string(),
            passenger_email: None,
            passenger_phone: None,
            seat_number: None,
            discount_code: None,
            tax_amount: None,
            status: None,
        }
    }

    async fn booked_seats(setup: &Setup) -> i32 {
        crate::domain::trip::TripRepository::find_by_id(
            setup.repos.as_ref(),
            setup.fixtures.company_id,
            setup.fixtures.trip_id,
        )
        .await
        .unwrap()
        .unwrap()
        .booked_seats
    }

    #[tokio::test]
    async fn issue_reserves_seat_and_sets_expiry() {
        let setup = setup_with_capacity(10).await;
        let ticket = setup
            .service
            .issue(&setup.ctx, issue_input(setup.fixtures.trip_id, "Alex Rider"))
            .await
            .unwrap();

        assert_eq!(ticket.status, TicketStatus::Reserved);
        assert!(ticket.expires_at.is_some());
        assert_eq!(ticket.booking_reference.len(), 8);
        assert_eq!(booked_seats(&setup).await, 1);
    }

    #[tokio::test]
    async fn explicit_status_skips_expiry() {
        let setup = setup_with_capacity(10).await;
        let mut input = issue_input(setup.fixtures.trip_id, "Alex Rider");
        input.status = Some(TicketStatus::Confirmed);
        let ticket = setup.service.issue(&setup.ctx, input).await.unwrap();
        assert_eq!(ticket.status, TicketStatus::Confirmed);
        assert!(ticket.expires_at.is_none());
    }

    #[tokio::test]
    async fn capacity_exhaustion_fails_and_leaves_count() {
        let setup = setup_with_capacity(2).await;
        let trip_id = setup.fixtures.trip_id;

        setup
            .service
            .issue(&setup.ctx, issue_input(trip_id, "A"))
            .await
            .unwrap();
        setup
            .service
            .issue(&setup.ctx, issue_input(trip_id, "B"))
            .await
            .unwrap();

        let err = setup
            .service
            .issue(&setup.ctx, issue_input(trip_id, "C"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(booked_seats(&setup).await, 2);
    }

    #[tokio::test]
    async fn cancel_releases_seat_for_the_next_passenger() {
        // the §8 walk: issue, issue, fail, cancel, issue succeeds
        let setup = setup_with_capacity(2).await;
        let trip_id = setup.fixtures.trip_id;

        let a = setup
            .service
            .issue(&setup.ctx, issue_input(trip_id, "A"))
            .await
            .unwrap();
        setup
            .service
            .issue(&setup.ctx, issue_input(trip_id, "B"))
            .await
            .unwrap();
        assert!(setup
            .service
            .issue(&setup.ctx, issue_input(trip_id, "C"))
            .await
            .is_err());

        setup
            .service
            .cancel(&setup.ctx, a.id, "changed plans")
            .await
            .unwrap();
        assert_eq!(booked_seats(&setup).await, 1);

        setup
            .service
            .issue(&setup.ctx, issue_input(trip_id, "C"))
            .await
            .unwrap();
        assert_eq!(booked_seats(&setup).await, 2);
    }

    #[tokio::test]
    async fn double_cancel_fails_without_second_decrement() {
        let setup = setup_with_capacity(10).await;
        let trip_id = setup.fixtures.trip_id;

        for name in ["A", "B", "C", "D", "E"] {
            setup
                .service
                .issue(&setup.ctx, issue_input(trip_id, name))
                .await
                .unwrap();
        }
        let tickets = setup
            .service
            .list(&setup.ctx, TicketFilter::default())
            .await
            .unwrap();
        let victim = tickets[0].clone();

        setup
            .service
            .cancel(&setup.ctx, victim.id, "changed plans")
            .await
            .unwrap();
        assert_eq!(booked_seats(&setup).await, 4);

        let err = setup
            .service
            .cancel(&setup.ctx, victim.id, "again")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(booked_seats(&setup).await, 4);
    }

    #[tokio::test]
    async fn issue_rejected_on_cancelled_trip() {
        let setup = setup_with_capacity(10).await;
        let mut trip = crate::domain::trip::TripRepository::find_by_id(
            setup.repos.as_ref(),
            setup.fixtures.company_id,
            setup.fixtures.trip_id,
        )
        .await
        .unwrap()
        .unwrap();
        trip.cancel("no demand").unwrap();
        crate::domain::trip::TripRepository::update(setup.repos.as_ref(), trip)
            .await
            .unwrap();

        let err = setup
            .service
            .issue(&setup.ctx, issue_input(setup.fixtures.trip_id, "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(booked_seats(&setup).await, 0);
    }

    #[tokio::test]
    async fn references_are_unique_across_tickets() {
        let setup = setup_with_capacity(30).await;
        let mut seen = std::collections::HashSet::new();
        for i in 0..30 {
            let ticket = setup
                .service
                .issue(
                    &setup.ctx,
                    issue_input(setup.fixtures.trip_id, &format!("P{}", i)),
                )
                .await
                .unwrap();
            assert!(seen.insert(ticket.booking_reference));
        }
    }

    #[tokio::test]
    async fn refund_flow() {
        let setup = setup_with_capacity(10).await;
        let ticket = setup
            .service
            .issue(&setup.ctx, issue_input(setup.fixtures.trip_id, "A"))
            .await
            .unwrap();

        // refund before cancel is rejected
        assert!(setup
            .service
            .refund(&setup.ctx, ticket.id, ticket.total_price, None)
            .await
            .is_err());

        setup
            .service
            .cancel(&setup.ctx, ticket.id, "changed plans")
            .await
            .unwrap();
        let refunded = setup
            .service
            .refund(
                &setup.ctx,
                ticket.id,
                ticket.total_price,
                Some("RF-001".into()),
            )
            .await
            .unwrap();
        assert_eq!(refunded.status, TicketStatus::Refunded);
        // no seat re-increment on refund
        assert_eq!(booked_seats(&setup).await, 0);
    }

    #[tokio::test]
    async fn check_in_records_operator() {
        let setup = setup_with_capacity(10).await;
        let ticket = setup
            .service
            .issue(&setup.ctx, issue_input(setup.fixtures.trip_id, "A"))
            .await
            .unwrap();
        let checked = setup
            .service
            .check_in(&setup.ctx, ticket.id, Some(setup.fixtures.conductor_id))
            .await
            .unwrap();
        assert_eq!(checked.status, TicketStatus::CheckedIn);
        assert_eq!(checked.checked_in_by, Some(setup.fixtures.conductor_id));
    }

    #[tokio::test]
    async fn discount_applies_to_price() {
        let setup = setup_with_capacity(10).await;
        let discount = sample_discount(&setup.fixtures, "SAVE10", 10, None);
        crate::domain::discount::DiscountRepository::save(setup.repos.as_ref(), discount)
            .await
            .unwrap();

        let mut input = issue_input(setup.fixtures.trip_id, "A");
        input.discount_code = Some("SAVE10".into());
        let ticket = setup.service.issue(&setup.ctx, input).await.unwrap();

        assert_eq!(
            ticket.discount_amount,
            ticket.base_price * Decimal::from(10) / Decimal::from(100)
        );
        assert_eq!(
            ticket.total_price,
            ticket.base_price - ticket.discount_amount
        );
    }

    #[tokio::test]
    async fn unknown_discount_code_is_not_found() {
        let setup = setup_with_capacity(10).await;
        let mut input = issue_input(setup.fixtures.trip_id, "A");
        input.discount_code = Some("NOPE".into());
        let err = setup.service.issue(&setup.ctx, input).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(booked_seats(&setup).await, 0);
    }

    #[tokio::test]
    async fn customer_only_sees_own_tickets() {
        let setup = setup_with_capacity(10).await;
        let customer_ctx = setup.fixtures.customer_context();

        // customer buys one ticket; staff sells another to nobody
        let own = setup
            .service
            .issue(
                &customer_ctx,
                issue_input(setup.fixtures.trip_id, "Customer"),
            )
            .await
            .unwrap();
        let other = setup
            .service
            .issue(&setup.ctx, issue_input(setup.fixtures.trip_id, "Walk-in"))
            .await
            .unwrap();

        assert_eq!(own.customer_id, Some(customer_ctx.user_id));

        let visible = setup
            .service
            .list(&customer_ctx, TicketFilter::default())
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, own.id);

        let err = setup.service.get(&customer_ctx, other.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn sweep_materializes_expired_reservations() {
        let setup = setup_with_capacity(10).await;
        let service = TicketingService::new(setup.repos.clone())
            .with_reservation_ttl(Duration::milliseconds(-1)); // already past

        service
            .issue(&setup.ctx, issue_input(setup.fixtures.trip_id, "A"))
            .await
            .unwrap();

        let expired_listing = service.expired(&setup.ctx).await.unwrap();
        assert_eq!(expired_listing.len(), 1);

        let swept = service.expire_due_reservations().await.unwrap();
        assert_eq!(swept, 1);

        // second sweep finds nothing
        assert_eq!(service.expire_due_reservations().await.unwrap(), 0);

        let tickets = service.list(&setup.ctx, TicketFilter::default()).await.unwrap();
        assert_eq!(tickets[0].status, TicketStatus::Expired);
    }
}
