//! Booking HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use crate::application::services::{NewBooking, NewReceipt};
use crate::domain::authorization::{authorize, Action};
use crate::domain::TenantContext;
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::modules::tickets::TicketDto;
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Bookings of the company", body = ApiResponse<PaginatedResponse<BookingDto>>))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<BookingDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewBookings)?;
    let bookings = state.bookings.list(&ctx).await?;
    let dtos: Vec<BookingDto> = bookings.into_iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        dtos,
        &pagination,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    authorize(ctx.role, Action::ViewBookings)?;
    let booking = state.bookings.get(&ctx, id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "A ticket failed the tenant check")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    authorize(ctx.role, Action::ManageBookings)?;
    let booking = state
        .bookings
        .create(
            &ctx,
            NewBooking {
                customer_id: request.customer_id,
                ticket_ids: request.tickets,
                total_amount: request.total_amount,
                discount_amount: request.discount_amount,
                tax_amount: request.tax_amount,
                notes: request.notes,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(booking))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/mark-paid",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = MarkPaidRequest,
    responses(
        (status = 200, description = "Payment captured", body = ApiResponse<BookingDto>),
        (status = 400, description = "Booking is not pending")
    )
)]
pub async fn mark_booking_paid(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<MarkPaidRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    authorize(ctx.role, Action::ManageBookings)?;
    let booking = state
        .bookings
        .mark_paid(&ctx, id, request.payment_reference)
        .await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}/tickets",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Tickets grouped under the booking", body = ApiResponse<Vec<TicketDto>>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn booking_tickets(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TicketDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewBookings)?;
    let tickets = state.bookings.tickets(&ctx, id).await?;
    Ok(Json(ApiResponse::success(
        tickets.into_iter().map(TicketDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}/receipts",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Receipts issued for the booking", body = ApiResponse<Vec<ReceiptDto>>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn booking_receipts(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReceiptDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewBookings)?;
    let receipts = state.bookings.receipts(&ctx, id).await?;
    Ok(Json(ApiResponse::success(
        receipts.into_iter().map(ReceiptDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/receipts",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = CreateReceiptRequest,
    responses(
        (status = 201, description = "Receipt issued", body = ApiResponse<ReceiptDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn issue_receipt(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateReceiptRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReceiptDto>>), ApiError> {
    authorize(ctx.role, Action::IssueReceipts)?;
    let receipt = state
        .bookings
        .issue_receipt(
            &ctx,
            id,
            NewReceipt {
                amount: request.amount,
                currency: request.currency,
                issued_by: request.issued_by,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReceiptDto::from(receipt))),
    ))
}
