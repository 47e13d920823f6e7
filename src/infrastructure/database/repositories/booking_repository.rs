//! SeaORM implementations of BookingRepository and ReceiptRepository
//!
//! Booking creation attaches every member ticket inside one
//! transaction; a ticket missing or owned by another tenant aborts the
//! whole booking.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::booking::{
    Booking, BookingRepository, BookingStatus, Receipt, ReceiptRepository,
};
use crate::domain::ticket::PaymentStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, receipt, ticket};

use super::{corrupt_status, db_err};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    Ok(Booking {
        id: m.id,
        company_id: m.company_id,
        status: BookingStatus::parse(&m.status)
            .ok_or_else(|| corrupt_status("Booking", &m.status))?,
        payment_status: PaymentStatus::parse(&m.payment_status)
            .ok_or_else(|| corrupt_status("Booking", &m.payment_status))?,
        customer_id: m.customer_id,
        booking_reference: m.booking_reference,
        total_amount: m.total_amount,
        discount_amount: m.discount_amount,
        tax_amount: m.tax_amount,
        final_amount: m.final_amount,
        payment_reference: m.payment_reference,
        paid_at: m.paid_at,
        notes: m.notes,
        created_at: m.created_at,
    })
}

fn to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        company_id: Set(b.company_id),
        customer_id: Set(b.customer_id),
        booking_reference: Set(b.booking_reference),
        status: Set(b.status.as_str().to_string()),
        total_amount: Set(b.total_amount),
        discount_amount: Set(b.discount_amount),
        tax_amount: Set(b.tax_amount),
        final_amount: Set(b.final_amount),
        payment_status: Set(b.payment_status.as_str().to_string()),
        payment_reference: Set(b.payment_reference),
        paid_at: Set(b.paid_at),
        notes: Set(b.notes),
        created_at: Set(b.created_at),
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert_with_tickets(
        &self,
        b: Booking,
        ticket_ids: &[Uuid],
    ) -> DomainResult<Booking> {
        debug!(reference = %b.booking_reference, tickets = ticket_ids.len(), "Creating booking");
        let booking_id = b.id;
        let company_id = b.company_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        if let Err(e) = to_active(b.clone()).insert(&txn).await {
            txn.rollback().await.map_err(db_err)?;
            return Err(db_err(e));
        }

        for ticket_id in ticket_ids {
            // the company filter is the tenant guard: a foreign ticket
            // simply does not match, and the whole booking aborts
            let updated = ticket::Entity::update_many()
                .col_expr(ticket::Column::BookingId, Expr::value(booking_id))
                .filter(ticket::Column::Id.eq(*ticket_id))
                .filter(ticket::Column::CompanyId.eq(company_id))
                .exec(&txn)
                .await
                .map_err(db_err)?;
            if updated.rows_affected == 0 {
                txn.rollback().await.map_err(db_err)?;
                return Err(DomainError::BusinessRule(format!(
                    "Ticket {} does not belong to your company",
                    ticket_id
                )));
            }
        }

        txn.commit().await.map_err(db_err)?;
        Ok(b)
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .filter(booking::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list(
        &self,
        company_id: Uuid,
        customer_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>> {
        let mut query = booking::Entity::find().filter(booking::Column::CompanyId.eq(company_id));
        if let Some(customer_id) = customer_id {
            query = query.filter(booking::Column::CustomerId.eq(customer_id));
        }
        let models = query
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        let exists = booking::Entity::find_by_id(b.id)
            .filter(booking::Column::CompanyId.eq(b.company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Booking", b.id));
        }
        to_active(b).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn reference_exists(&self, reference: &str) -> DomainResult<bool> {
        let count = booking::Entity::find()
            .filter(booking::Column::BookingReference.eq(reference))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}

// ── ReceiptRepository impl ──────────────────────────────────────

pub struct SeaOrmReceiptRepository {
    db: DatabaseConnection,
}

impl SeaOrmReceiptRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn receipt_to_domain(m: receipt::Model) -> Receipt {
    Receipt {
        id: m.id,
        company_id: m.company_id,
        booking_id: m.booking_id,
        receipt_number: m.receipt_number,
        amount: m.amount,
        currency: m.currency,
        issued_at: m.issued_at,
        issued_by: m.issued_by,
    }
}

#[async_trait]
impl ReceiptRepository for SeaOrmReceiptRepository {
    async fn save(&self, r: Receipt) -> DomainResult<()> {
        debug!(number = %r.receipt_number, "Issuing receipt");
        let model = receipt::ActiveModel {
            id: Set(r.id),
            company_id: Set(r.company_id),
            booking_id: Set(r.booking_id),
            receipt_number: Set(r.receipt_number),
            amount: Set(r.amount),
            currency: Set(r.currency),
            issued_at: Set(r.issued_at),
            issued_by: Set(r.issued_by),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn list_for_booking(
        &self,
        company_id: Uuid,
        booking_id: Uuid,
    ) -> DomainResult<Vec<Receipt>> {
        let models = receipt::Entity::find()
            .filter(receipt::Column::CompanyId.eq(company_id))
            .filter(receipt::Column::BookingId.eq(booking_id))
            .order_by_desc(receipt::Column::IssuedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(receipt_to_domain).collect())
    }

    async fn number_exists(&self, receipt_number: &str) -> DomainResult<bool> {
        let count = receipt::Entity::find()
            .filter(receipt::Column::ReceiptNumber.eq(receipt_number))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}
