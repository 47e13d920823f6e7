//! Discount domain entity and code validation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Discount type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    /// `value` is a percentage of the base price, at most 100
    Percentage,
    /// `value` is subtracted from the base price
    FixedAmount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::FixedAmount => "Fixed Amount",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Percentage" => Some(Self::Percentage),
            "Fixed Amount" => Some(Self::FixedAmount),
            _ => None,
        }
    }
}

/// Why a discount code was rejected at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountRejection {
    /// `is_active` is false or `now` falls outside the active window
    Inactive,
    /// `usage_limit` is set and exhausted
    LimitReached,
}

impl std::fmt::Display for DiscountRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "Invalid or expired discount code"),
            Self::LimitReached => write!(f, "Discount code has reached its usage limit"),
        }
    }
}

/// A promotional code applied against ticket prices.
#[derive(Debug, Clone)]
pub struct Discount {
    pub id: Uuid,
    pub company_id: Uuid,
    /// Unique within the company
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub start_date: DateTime<Utc>,
    /// Open-ended when absent
    pub end_date: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    /// Invariant: `usage_count ≤ usage_limit` when a limit is set
    pub usage_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Discount {
    /// Creation/update guard: percentage discounts cannot exceed 100%,
    /// values are positive, and the window is ordered.
    pub fn validate_definition(
        discount_type: DiscountType,
        value: Decimal,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        if value <= Decimal::ZERO {
            return Err(DomainError::validation(
                "value",
                "Discount value must be positive",
            ));
        }
        if discount_type == DiscountType::Percentage && value > Decimal::from(100) {
            return Err(DomainError::validation(
                "value",
                "Percentage discount cannot exceed 100%",
            ));
        }
        if let Some(end) = end_date {
            if end <= start_date {
                return Err(DomainError::validation(
                    "end_date",
                    "End date must be after start date",
                ));
            }
        }
        Ok(())
    }

    /// Whether `now` falls inside the active window.
    pub fn window_contains(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && self.end_date.map(|end| now <= end).unwrap_or(true)
    }

    /// Validate the code for use at `now`. Does NOT consume a use;
    /// redemption bookkeeping is the caller's transactional concern.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), DiscountRejection> {
        if !self.is_active || !self.window_contains(now) {
            return Err(DiscountRejection::Inactive);
        }
        if let Some(limit) = self.usage_limit {
            if self.usage_count >= limit {
                return Err(DiscountRejection::LimitReached);
            }
        }
        Ok(())
    }

    /// Amount taken off `base` when this discount is applied.
    pub fn amount_off(&self, base: Decimal) -> Decimal {
        let amount = match self.discount_type {
            DiscountType::Percentage => base * self.value / Decimal::from(100),
            DiscountType::FixedAmount => self.value,
        };
        amount.min(base).max(Decimal::ZERO)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_discount() -> Discount {
        Discount {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            code: "SAVE10".into(),
            name: "Ten percent off".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            value: Decimal::from(10),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()),
            usage_limit: None,
            usage_count: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn valid_inside_window_inactive_outside() {
        let d = sample_discount();
        let june = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let next_year = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(d.validate_at(june).is_ok());
        assert_eq!(d.validate_at(next_year), Err(DiscountRejection::Inactive));
    }

    #[test]
    fn deactivated_code_rejected() {
        let mut d = sample_discount();
        d.is_active = false;
        let june = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(d.validate_at(june), Err(DiscountRejection::Inactive));
    }

    #[test]
    fn open_ended_window() {
        let mut d = sample_discount();
        d.end_date = None;
        let far_future = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert!(d.validate_at(far_future).is_ok());
    }

    #[test]
    fn usage_limit_enforced() {
        let mut d = sample_discount();
        d.usage_limit = Some(5);
        d.usage_count = 5;
        let june = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(d.validate_at(june), Err(DiscountRejection::LimitReached));
        d.usage_count = 4;
        assert!(d.validate_at(june).is_ok());
    }

    #[test]
    fn percentage_over_100_rejected_at_definition() {
        let start = Utc::now();
        assert!(Discount::validate_definition(
            DiscountType::Percentage,
            Decimal::from(101),
            start,
            None
        )
        .is_err());
        assert!(Discount::validate_definition(
            DiscountType::Percentage,
            Decimal::from(100),
            start,
            None
        )
        .is_ok());
        // fixed amounts above 100 are fine
        assert!(Discount::validate_definition(
            DiscountType::FixedAmount,
            Decimal::from(500),
            start,
            None
        )
        .is_ok());
    }

    #[test]
    fn window_must_be_ordered() {
        let start = Utc::now();
        let err = Discount::validate_definition(
            DiscountType::Percentage,
            Decimal::from(10),
            start,
            Some(start - chrono::Duration::days(1)),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "end_date", .. }));
    }

    #[test]
    fn amount_off_percentage_and_fixed() {
        let base = Decimal::from(200);
        let d = sample_discount();
        assert_eq!(d.amount_off(base), Decimal::from(20));

        let mut fixed = sample_discount();
        fixed.discount_type = DiscountType::FixedAmount;
        fixed.value = Decimal::from(50);
        assert_eq!(fixed.amount_off(base), Decimal::from(50));
        // never more than the base price
        assert_eq!(fixed.amount_off(Decimal::from(30)), Decimal::from(30));
    }
}
