//! Common API types: response envelope, pagination, error mapping

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response envelope for all REST endpoints.
///
/// Success: `{"success": true, "data": {...}}`;
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination query parameters for list endpoints.
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

/// One page of results plus page metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Slice a full result set down to one page.
    pub fn paginate(items: Vec<T>, params: &PaginationParams) -> Self {
        let page = params.page.max(1);
        let limit = params.limit.clamp(1, 100);
        let total = items.len() as u64;
        let total_pages = (total as f64 / limit as f64).ceil() as u32;
        let start = ((page - 1) * limit) as usize;
        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Domain error as an HTTP response.
///
/// Handlers bubble `DomainError` with `?`; the mapping turns it into
/// the status table: validation and business-rule failures are 400,
/// missing or cross-tenant resources 404, policy denials 403, storage
/// conflicts 400 and anything internal an opaque 500.
pub enum ApiError {
    Domain(DomainError),
    /// An explicit status + message, for endpoints whose contract
    /// deviates from the default mapping
    Status(StatusCode, String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Status(StatusCode::NOT_FOUND, message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Status(status, message) => (status, message),
            Self::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                DomainError::Database(e) => {
                    tracing::error!(error = %e, "Internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An unexpected error occurred".to_string(),
                    )
                }
            },
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_slices_and_counts() {
        let items: Vec<i32> = (1..=120).collect();
        let page = PaginatedResponse::paginate(
            items,
            &PaginationParams {
                page: 2,
                limit: 50,
            },
        );
        assert_eq!(page.items.first(), Some(&51));
        assert_eq!(page.items.len(), 50);
        assert_eq!(page.total, 120);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn paginate_clamps_limit() {
        let items: Vec<i32> = (1..=500).collect();
        let page = PaginatedResponse::paginate(
            items,
            &PaginationParams {
                page: 1,
                limit: 1000,
            },
        );
        assert_eq!(page.limit, 100);
        assert_eq!(page.items.len(), 100);
    }
}
