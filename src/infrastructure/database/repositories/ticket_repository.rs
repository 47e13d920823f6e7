//! SeaORM implementation of TicketRepository
//!
//! Home of the trip capacity ledger. The seat increment is a guarded
//! conditional UPDATE (`booked_seats < capacity`) executed in the same
//! transaction as the ticket insert, so two concurrent issuers can
//! never both claim the last seat: one of the updates matches zero
//! rows and that issuance aborts. The decrement is guarded at zero
//! the same way.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ticket::{
    PaymentStatus, Ticket, TicketFilter, TicketRepository, TicketStatus,
};
use crate::domain::trip::TripStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{ticket, trip};

use super::{corrupt_status, db_err};

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: ticket::Model) -> DomainResult<Ticket> {
    Ok(Ticket {
        id: m.id,
        company_id: m.company_id,
        status: TicketStatus::parse(&m.status)
            .ok_or_else(|| corrupt_status("Ticket", &m.status))?,
        payment_status: PaymentStatus::parse(&m.payment_status)
            .ok_or_else(|| corrupt_status("Ticket", &m.payment_status))?,
        trip_id: m.trip_id,
        customer_id: m.customer_id,
        booking_id: m.booking_id,
        booking_reference: m.booking_reference,
        seat_number: m.seat_number,
        passenger_name: m.passenger_name,
        passenger_email: m.passenger_email,
        passenger_phone: m.passenger_phone,
        base_price: m.base_price,
        discount_amount: m.discount_amount,
        tax_amount: m.tax_amount,
        total_price: m.total_price,
        checked_in_at: m.checked_in_at,
        checked_in_by: m.checked_in_by,
        cancellation_reason: m.cancellation_reason,
        cancellation_date: m.cancellation_date,
        refund_amount: m.refund_amount,
        refund_date: m.refund_date,
        refund_reference: m.refund_reference,
        issued_at: m.issued_at,
        expires_at: m.expires_at,
    })
}

fn to_active(t: Ticket) -> ticket::ActiveModel {
    ticket::ActiveModel {
        id: Set(t.id),
        company_id: Set(t.company_id),
        trip_id: Set(t.trip_id),
        customer_id: Set(t.customer_id),
        booking_id: Set(t.booking_id),
        booking_reference: Set(t.booking_reference),
        status: Set(t.status.as_str().to_string()),
        seat_number: Set(t.seat_number),
        passenger_name: Set(t.passenger_name),
        passenger_email: Set(t.passenger_email),
        passenger_phone: Set(t.passenger_phone),
        base_price: Set(t.base_price),
        discount_amount: Set(t.discount_amount),
        tax_amount: Set(t.tax_amount),
        total_price: Set(t.total_price),
        payment_status: Set(t.payment_status.as_str().to_string()),
        checked_in_at: Set(t.checked_in_at),
        checked_in_by: Set(t.checked_in_by),
        cancellation_reason: Set(t.cancellation_reason),
        cancellation_date: Set(t.cancellation_date),
        refund_amount: Set(t.refund_amount),
        refund_date: Set(t.refund_date),
        refund_reference: Set(t.refund_reference),
        issued_at: Set(t.issued_at),
        expires_at: Set(t.expires_at),
    }
}

// ── TicketRepository impl ───────────────────────────────────────

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    async fn insert_claiming_seat(&self, t: Ticket) -> DomainResult<Option<Ticket>> {
        debug!(trip_id = %t.trip_id, reference = %t.booking_reference, "Issuing ticket");
        let txn = self.db.begin().await.map_err(db_err)?;

        // Claim the seat first: matches only while a seat is free and
        // the trip still takes bookings, so concurrent issuers (and a
        // concurrent trip cancellation) serialize on this row.
        let claimed = trip::Entity::update_many()
            .col_expr(
                trip::Column::BookedSeats,
                Expr::col(trip::Column::BookedSeats).add(1),
            )
            .filter(trip::Column::Id.eq(t.trip_id))
            .filter(trip::Column::CompanyId.eq(t.company_id))
            .filter(trip::Column::Status.is_not_in([
                TripStatus::Cancelled.as_str(),
                TripStatus::Completed.as_str(),
            ]))
            .filter(Expr::col(trip::Column::BookedSeats).lt(Expr::col(trip::Column::Capacity)))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if claimed.rows_affected == 0 {
            // distinguish why the claim missed
            let current = trip::Entity::find_by_id(t.trip_id)
                .filter(trip::Column::CompanyId.eq(t.company_id))
                .one(&txn)
                .await
                .map_err(db_err)?;
            txn.rollback().await.map_err(db_err)?;
            return match current {
                None => Err(DomainError::not_found("Trip", t.trip_id)),
                Some(trip) => {
                    let status = TripStatus::parse(&trip.status)
                        .ok_or_else(|| corrupt_status("Trip", &trip.status))?;
                    if matches!(status, TripStatus::Cancelled | TripStatus::Completed) {
                        Err(DomainError::BusinessRule(format!(
                            "Cannot book ticket for a {} trip",
                            status.as_str().to_lowercase()
                        )))
                    } else {
                        Ok(None)
                    }
                }
            };
        }

        match to_active(t.clone()).insert(&txn).await {
            Ok(_) => {
                txn.commit().await.map_err(db_err)?;
                Ok(Some(t))
            }
            Err(e) => {
                // rolls back the seat claim; a reference collision
                // surfaces as Conflict for the generator to retry
                txn.rollback().await.map_err(db_err)?;
                Err(db_err(e))
            }
        }
    }

    async fn update_releasing_seat(&self, t: Ticket) -> DomainResult<()> {
        debug!(ticket_id = %t.id, "Updating ticket and releasing seat");
        let trip_id = t.trip_id;
        let company_id = t.company_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        to_active(t).update(&txn).await.map_err(db_err)?;

        // floored at zero by the guard
        trip::Entity::update_many()
            .col_expr(
                trip::Column::BookedSeats,
                Expr::col(trip::Column::BookedSeats).sub(1),
            )
            .filter(trip::Column::Id.eq(trip_id))
            .filter(trip::Column::CompanyId.eq(company_id))
            .filter(Expr::col(trip::Column::BookedSeats).gt(0))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, t: Ticket) -> DomainResult<()> {
        let exists = ticket::Entity::find_by_id(t.id)
            .filter(ticket::Column::CompanyId.eq(t.company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Ticket", t.id));
        }
        to_active(t).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Ticket>> {
        let model = ticket::Entity::find_by_id(id)
            .filter(ticket::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list(&self, company_id: Uuid, filter: TicketFilter) -> DomainResult<Vec<Ticket>> {
        let mut query = ticket::Entity::find().filter(ticket::Column::CompanyId.eq(company_id));
        if let Some(trip_id) = filter.trip_id {
            query = query.filter(ticket::Column::TripId.eq(trip_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(ticket::Column::Status.eq(status.as_str()));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(ticket::Column::CustomerId.eq(customer_id));
        }
        let models = query
            .order_by_desc(ticket::Column::IssuedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn list_expired(
        &self,
        company_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Ticket>> {
        let models = ticket::Entity::find()
            .filter(ticket::Column::CompanyId.eq(company_id))
            .filter(ticket::Column::Status.eq(TicketStatus::Reserved.as_str()))
            .filter(ticket::Column::ExpiresAt.lt(now))
            .order_by_desc(ticket::Column::IssuedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn list_expired_all_tenants(&self, now: DateTime<Utc>) -> DomainResult<Vec<Ticket>> {
        let models = ticket::Entity::find()
            .filter(ticket::Column::Status.eq(TicketStatus::Reserved.as_str()))
            .filter(ticket::Column::ExpiresAt.lt(now))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn list_departing_between(
        &self,
        company_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> DomainResult<Vec<Ticket>> {
        let models = ticket::Entity::find()
            .join(JoinType::InnerJoin, ticket::Relation::Trip.def())
            .filter(ticket::Column::CompanyId.eq(company_id))
            .filter(trip::Column::ScheduledDeparture.gte(from))
            .filter(trip::Column::ScheduledDeparture.lt(until))
            .order_by_desc(ticket::Column::IssuedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn reference_exists(&self, reference: &str) -> DomainResult<bool> {
        let count = ticket::Entity::find()
            .filter(ticket::Column::BookingReference.eq(reference))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}
