//! Route domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A named origin→destination service pattern trips run on.
#[derive(Debug, Clone)]
pub struct Route {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: Option<f64>,
    /// Scheduled duration in minutes
    pub estimated_duration: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
