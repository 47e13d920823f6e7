//! Discount management and code validation service
//!
//! `validate_code` resolves a code without consuming a use;
//! `redeem` is the explicit redemption flow that also increments
//! `usage_count` with a limit guard, so concurrent redemptions cannot
//! exceed the limit.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::discount::{Discount, DiscountType};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, TenantContext};

/// Input for discount creation.
#[derive(Debug, Clone)]
pub struct NewDiscount {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
}

/// Fields updatable on an existing discount.
#[derive(Debug, Clone, Default)]
pub struct DiscountUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub usage_limit: Option<Option<i32>>,
}

pub struct DiscountService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DiscountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, ctx: &TenantContext, input: NewDiscount) -> DomainResult<Discount> {
        if input.code.trim().is_empty() {
            return Err(DomainError::validation("code", "Discount code is required"));
        }
        Discount::validate_definition(
            input.discount_type,
            input.value,
            input.start_date,
            input.end_date,
        )?;

        if self
            .repos
            .discounts()
            .find_by_code(ctx.company_id, &input.code)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "Discount code {} already exists",
                input.code
            )));
        }

        let discount = Discount {
            id: Uuid::new_v4(),
            company_id: ctx.company_id,
            code: input.code,
            name: input.name,
            description: input.description,
            discount_type: input.discount_type,
            value: input.value,
            start_date: input.start_date,
            end_date: input.end_date,
            usage_limit: input.usage_limit,
            usage_count: 0,
            is_active: true,
            created_at: Utc::now(),
        };
        self.repos.discounts().save(discount.clone()).await?;
        info!(code = %discount.code, "Discount created");
        Ok(discount)
    }

    pub async fn get(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Discount> {
        self.repos
            .discounts()
            .find_by_id(ctx.company_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Discount", id))
    }

    pub async fn list(&self, ctx: &TenantContext) -> DomainResult<Vec<Discount>> {
        self.repos.discounts().list(ctx.company_id).await
    }

    /// Discounts currently inside their active window.
    pub async fn active(&self, ctx: &TenantContext) -> DomainResult<Vec<Discount>> {
        let now = Utc::now();
        let mut discounts = self.list(ctx).await?;
        discounts.retain(|d| d.is_active && d.window_contains(now));
        Ok(discounts)
    }

    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        update: DiscountUpdate,
    ) -> DomainResult<Discount> {
        let mut discount = self.get(ctx, id).await?;
        if let Some(name) = update.name {
            discount.name = name;
        }
        if let Some(description) = update.description {
            discount.description = Some(description);
        }
        if let Some(value) = update.value {
            discount.value = value;
        }
        if let Some(end_date) = update.end_date {
            discount.end_date = end_date;
        }
        if let Some(usage_limit) = update.usage_limit {
            discount.usage_limit = usage_limit;
        }
        Discount::validate_definition(
            discount.discount_type,
            discount.value,
            discount.start_date,
            discount.end_date,
        )?;
        if let Some(limit) = discount.usage_limit {
            if discount.usage_count > limit {
                return Err(DomainError::validation(
                    "usage_limit",
                    "Usage limit cannot be below the current usage count",
                ));
            }
        }
        self.repos.discounts().update(discount.clone()).await?;
        Ok(discount)
    }

    pub async fn activate(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Discount> {
        let mut discount = self.get(ctx, id).await?;
        if discount.is_active {
            return Err(DomainError::BusinessRule(
                "Discount is already active".to_string(),
            ));
        }
        discount.is_active = true;
        self.repos.discounts().update(discount.clone()).await?;
        info!(code = %discount.code, "Discount activated");
        Ok(discount)
    }

    pub async fn deactivate(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Discount> {
        let mut discount = self.get(ctx, id).await?;
        if !discount.is_active {
            return Err(DomainError::BusinessRule(
                "Discount is already inactive".to_string(),
            ));
        }
        discount.is_active = false;
        self.repos.discounts().update(discount.clone()).await?;
        info!(code = %discount.code, "Discount deactivated");
        Ok(discount)
    }

    /// Resolve a code to a usable discount. Does not consume a use.
    pub async fn validate_code(&self, ctx: &TenantContext, code: &str) -> DomainResult<Discount> {
        if code.trim().is_empty() {
            return Err(DomainError::validation("code", "Discount code is required"));
        }
        let discount = self
            .repos
            .discounts()
            .find_by_code(ctx.company_id, code)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Discount",
                field: "code",
                value: code.to_string(),
            })?;
        discount
            .validate_at(Utc::now())
            .map_err(|r| DomainError::BusinessRule(r.to_string()))?;
        Ok(discount)
    }

    /// Validate and consume one use of the code. The increment is
    /// guarded against the limit, so a concurrent redemption losing the
    /// race surfaces as LimitReached rather than over-counting.
    pub async fn redeem(&self, ctx: &TenantContext, code: &str) -> DomainResult<Discount> {
        let discount = self.validate_code(ctx, code).await?;
        let applied = self
            .repos
            .discounts()
            .increment_usage(ctx.company_id, discount.id)
            .await?;
        if !applied {
            return Err(DomainError::BusinessRule(
                "Discount code has reached its usage limit".to_string(),
            ));
        }
        info!(code = %discount.code, "Discount redeemed");
        self.get(ctx, discount.id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::*;
    use crate::domain::discount::DiscountRepository;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::TimeZone;

    async fn setup() -> (DiscountService, TenantContext, Fixtures, Arc<InMemoryRepositoryProvider>)
    {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let fixtures = seed_company(repos.as_ref()).await;
        let ctx = fixtures.manager_context();
        (DiscountService::new(repos.clone()), ctx, fixtures, repos)
    }

    fn new_discount(code: &str) -> NewDiscount {
        NewDiscount {
            code: code.into(),
            name: "Summer sale".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            value: Decimal::from(10),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: None,
            usage_limit: None,
        }
    }

    #[tokio::test]
    async fn create_and_validate() {
        let (service, ctx, _, _) = setup().await;
        service.create(&ctx, new_discount("SAVE10")).await.unwrap();
        let found = service.validate_code(&ctx, "SAVE10").await.unwrap();
        assert_eq!(found.code, "SAVE10");
    }

    #[tokio::test]
    async fn duplicate_code_rejected() {
        let (service, ctx, _, _) = setup().await;
        service.create(&ctx, new_discount("SAVE10")).await.unwrap();
        let err = service.create(&ctx, new_discount("SAVE10")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn percentage_over_100_rejected() {
        let (service, ctx, _, _) = setup().await;
        let mut input = new_discount("BIG");
        input.value = Decimal::from(150);
        let err = service.create(&ctx, input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "value", .. }));
    }

    #[tokio::test]
    async fn unknown_code_not_found() {
        let (service, ctx, _, _) = setup().await;
        let err = service.validate_code(&ctx, "NOPE").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn window_bounds_validation() {
        let (service, ctx, fixtures, repos) = setup().await;
        // fixed 2024 window seeded directly
        let mut d = sample_discount(&fixtures, "YEAR24", 10, None);
        d.start_date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        d.end_date = Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
        DiscountRepository::save(repos.as_ref(), d).await.unwrap();

        // today (2025+) is outside the window
        let err = service.validate_code(&ctx, "YEAR24").await.unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn deactivated_code_rejected_and_reactivated_accepted() {
        let (service, ctx, _, _) = setup().await;
        let d = service.create(&ctx, new_discount("TOGGLE")).await.unwrap();

        service.deactivate(&ctx, d.id).await.unwrap();
        assert!(service.validate_code(&ctx, "TOGGLE").await.is_err());
        // double deactivate rejected
        assert!(service.deactivate(&ctx, d.id).await.is_err());

        service.activate(&ctx, d.id).await.unwrap();
        assert!(service.validate_code(&ctx, "TOGGLE").await.is_ok());
    }

    #[tokio::test]
    async fn redeem_consumes_uses_until_limit() {
        let (service, ctx, _, _) = setup().await;
        let mut input = new_discount("LIMIT2");
        input.usage_limit = Some(2);
        service.create(&ctx, input).await.unwrap();

        assert_eq!(service.redeem(&ctx, "LIMIT2").await.unwrap().usage_count, 1);
        assert_eq!(service.redeem(&ctx, "LIMIT2").await.unwrap().usage_count, 2);

        let err = service.redeem(&ctx, "LIMIT2").await.unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        // validation also reports the exhausted limit
        assert!(service.validate_code(&ctx, "LIMIT2").await.is_err());
    }

    #[tokio::test]
    async fn validate_does_not_consume() {
        let (service, ctx, _, _) = setup().await;
        let mut input = new_discount("KEEP");
        input.usage_limit = Some(1);
        service.create(&ctx, input).await.unwrap();

        for _ in 0..3 {
            service.validate_code(&ctx, "KEEP").await.unwrap();
        }
        let d = service.validate_code(&ctx, "KEEP").await.unwrap();
        assert_eq!(d.usage_count, 0);
    }

    #[tokio::test]
    async fn codes_are_tenant_scoped() {
        let (service, ctx, fixtures, _) = setup().await;
        service.create(&ctx, new_discount("MINE")).await.unwrap();

        let foreign_ctx = fixtures.other_company_context();
        let err = service.validate_code(&foreign_ctx, "MINE").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn active_listing_filters_window_and_flag() {
        let (service, ctx, fixtures, repos) = setup().await;
        service.create(&ctx, new_discount("LIVE")).await.unwrap();

        let mut expired = sample_discount(&fixtures, "GONE", 5, None);
        expired.end_date = Some(Utc::now() - chrono::Duration::days(1));
        DiscountRepository::save(repos.as_ref(), expired).await.unwrap();

        let active = service.active(&ctx).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code, "LIVE");
    }
}
