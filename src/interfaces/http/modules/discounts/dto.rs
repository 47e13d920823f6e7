//! Discount DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::discount::Discount;

/// Request to create a discount
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDiscountRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    /// Discount type: Percentage, Fixed Amount
    pub discount_type: String,
    pub value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1))]
    pub usage_limit: Option<i32>,
}

/// Request to update a discount
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDiscountRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub end_date: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
}

/// Code to validate or redeem
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DiscountCodeRequest {
    #[validate(length(min = 1, message = "Discount code is required"))]
    pub code: String,
}

/// Discount details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct DiscountDto {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Discount> for DiscountDto {
    fn from(d: Discount) -> Self {
        Self {
            id: d.id,
            code: d.code,
            name: d.name,
            description: d.description,
            discount_type: d.discount_type.as_str().to_string(),
            value: d.value,
            start_date: d.start_date,
            end_date: d.end_date,
            usage_limit: d.usage_limit,
            usage_count: d.usage_count,
            is_active: d.is_active,
            created_at: d.created_at,
        }
    }
}
