//! Ticket HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::application::services::IssueTicket;
use crate::domain::authorization::{authorize, Action};
use crate::domain::ticket::{TicketFilter, TicketStatus};
use crate::domain::{DomainError, TenantContext};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::AppState;

use super::dto::*;

/// Filter query for ticket listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct TicketListQuery {
    pub trip_id: Option<Uuid>,
    /// Ticket status: Reserved, Confirmed, Checked In, Used, Cancelled,
    /// Refunded, Expired
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    params(TicketListQuery, PaginationParams),
    responses((status = 200, description = "Tickets of the company", body = ApiResponse<PaginatedResponse<TicketDto>>))
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Query(query): Query<TicketListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<TicketDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTickets)?;
    let status = match &query.status {
        Some(s) => Some(
            TicketStatus::parse(s)
                .ok_or_else(|| DomainError::validation("status", "Unknown ticket status"))?,
        ),
        None => None,
    };
    let tickets = state
        .ticketing
        .list(
            &ctx,
            TicketFilter {
                trip_id: query.trip_id,
                status,
                customer_id: None,
            },
        )
        .await?;
    let dtos: Vec<TicketDto> = tickets.into_iter().map(TicketDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        dtos,
        &pagination,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket details", body = ApiResponse<TicketDto>),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    authorize(ctx.role, Action::ViewTickets)?;
    let ticket = state.ticketing.get(&ctx, id).await?;
    Ok(Json(ApiResponse::success(TicketDto::from(ticket))))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket issued", body = ApiResponse<TicketDto>),
        (status = 400, description = "No seats available or trip not bookable")
    )
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<CreateTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TicketDto>>), ApiError> {
    authorize(ctx.role, Action::SellTickets)?;
    let status = match &request.status {
        Some(s) => Some(
            TicketStatus::parse(s)
                .ok_or_else(|| DomainError::validation("status", "Unknown ticket status"))?,
        ),
        None => None,
    };
    let ticket = state
        .ticketing
        .issue(
            &ctx,
            IssueTicket {
                trip_id: request.trip_id,
                customer_id: request.customer_id,
                passenger_name: request.passenger_name,
                passenger_email: request.passenger_email,
                passenger_phone: request.passenger_phone,
                seat_number: request.seat_number,
                discount_code: request.discount_code,
                tax_amount: request.tax_amount,
                status,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TicketDto::from(ticket))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/confirm",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket confirmed", body = ApiResponse<TicketDto>),
        (status = 400, description = "Wrong state")
    )
)]
pub async fn confirm_ticket(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    authorize(ctx.role, Action::SellTickets)?;
    let ticket = state.ticketing.confirm(&ctx, id).await?;
    Ok(Json(ApiResponse::success(TicketDto::from(ticket))))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/check-in",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Ticket checked in", body = ApiResponse<TicketDto>),
        (status = 400, description = "Wrong state")
    )
)]
pub async fn check_in_ticket(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CheckInRequest>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    authorize(ctx.role, Action::CheckInTickets)?;
    let ticket = state
        .ticketing
        .check_in(&ctx, id, request.checked_in_by)
        .await?;
    Ok(Json(ApiResponse::success(TicketDto::from(ticket))))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/cancel",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = CancelTicketRequest,
    responses(
        (status = 200, description = "Ticket cancelled, seat released", body = ApiResponse<TicketDto>),
        (status = 400, description = "Wrong state or missing reason")
    )
)]
pub async fn cancel_ticket(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CancelTicketRequest>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    authorize(ctx.role, Action::CancelTickets)?;
    let ticket = state.ticketing.cancel(&ctx, id, &request.reason).await?;
    Ok(Json(ApiResponse::success(TicketDto::from(ticket))))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/refund",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = RefundTicketRequest,
    responses(
        (status = 200, description = "Ticket refunded", body = ApiResponse<TicketDto>),
        (status = 400, description = "Only cancelled tickets can be refunded")
    )
)]
pub async fn refund_ticket(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<RefundTicketRequest>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    authorize(ctx.role, Action::RefundTickets)?;
    let ticket = state
        .ticketing
        .refund(&ctx, id, request.refund_amount, request.refund_reference)
        .await?;
    Ok(Json(ApiResponse::success(TicketDto::from(ticket))))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/expired",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Reserved tickets past their deadline", body = ApiResponse<Vec<TicketDto>>))
)]
pub async fn expired_tickets(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> Result<Json<ApiResponse<Vec<TicketDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTickets)?;
    let tickets = state.ticketing.expired(&ctx).await?;
    Ok(Json(ApiResponse::success(
        tickets.into_iter().map(TicketDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/today",
    tag = "Tickets",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Tickets for trips departing today", body = ApiResponse<Vec<TicketDto>>))
)]
pub async fn today_tickets(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> Result<Json<ApiResponse<Vec<TicketDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTickets)?;
    let tickets = state.ticketing.today(&ctx).await?;
    Ok(Json(ApiResponse::success(
        tickets.into_iter().map(TicketDto::from).collect(),
    )))
}
