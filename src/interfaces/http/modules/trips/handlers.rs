//! Trip HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::application::services::{NewTrip, NewTripEvent};
use crate::domain::authorization::{authorize, Action};
use crate::domain::trip::{TripEventType, TripFilter, TripStatus};
use crate::domain::{DomainError, TenantContext};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::AppState;

use super::dto::*;

/// Filter query for trip listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct TripListQuery {
    /// Trip status: Scheduled, Active, Completed, Cancelled, Delayed
    pub status: Option<String>,
    pub route_id: Option<Uuid>,
    pub bus_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/v1/trips",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(TripListQuery, PaginationParams),
    responses((status = 200, description = "Trips of the company", body = ApiResponse<PaginatedResponse<TripDto>>))
)]
pub async fn list_trips(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Query(query): Query<TripListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<TripDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTrips)?;
    let status = match &query.status {
        Some(s) => Some(
            TripStatus::parse(s)
                .ok_or_else(|| DomainError::validation("status", "Unknown trip status"))?,
        ),
        None => None,
    };
    let trips = state
        .trips
        .list(
            &ctx,
            TripFilter {
                status,
                route_id: query.route_id,
                bus_id: query.bus_id,
                ..Default::default()
            },
        )
        .await?;
    let dtos: Vec<TripDto> = trips.into_iter().map(TripDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        dtos,
        &pagination,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip details", body = ApiResponse<TripDto>),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TripDto>>, ApiError> {
    authorize(ctx.role, Action::ViewTrips)?;
    let trip = state.trips.get(&ctx, id).await?;
    Ok(Json(ApiResponse::success(TripDto::from(trip))))
}

#[utoipa::path(
    post,
    path = "/api/v1/trips",
    tag = "Trips",
    security(("bearer_auth" = [])),
    request_body = CreateTripRequest,
    responses(
        (status = 200, description = "Trip scheduled", body = ApiResponse<TripDto>),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripDto>>, ApiError> {
    authorize(ctx.role, Action::ManageTrips)?;
    let trip = state
        .trips
        .create(
            &ctx,
            NewTrip {
                route_id: request.route_id,
                bus_id: request.bus_id,
                driver_id: request.driver_id,
                conductor_id: request.conductor_id,
                scheduled_departure: request.scheduled_departure,
                scheduled_arrival: request.scheduled_arrival,
                capacity: request.capacity,
                base_price: request.base_price,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(TripDto::from(trip))))
}

#[utoipa::path(
    post,
    path = "/api/v1/trips/{id}/start-trip",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip started", body = ApiResponse<TripDto>),
        (status = 400, description = "Wrong state")
    )
)]
pub async fn start_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TripDto>>, ApiError> {
    authorize(ctx.role, Action::ManageTrips)?;
    let trip = state.trips.start(&ctx, id).await?;
    Ok(Json(ApiResponse::success(TripDto::from(trip))))
}

#[utoipa::path(
    post,
    path = "/api/v1/trips/{id}/complete-trip",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip completed", body = ApiResponse<TripDto>),
        (status = 400, description = "Wrong state")
    )
)]
pub async fn complete_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TripDto>>, ApiError> {
    authorize(ctx.role, Action::ManageTrips)?;
    let trip = state.trips.complete(&ctx, id).await?;
    Ok(Json(ApiResponse::success(TripDto::from(trip))))
}

#[utoipa::path(
    post,
    path = "/api/v1/trips/{id}/cancel-trip",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Trip ID")),
    request_body = ReasonRequest,
    responses(
        (status = 200, description = "Trip cancelled", body = ApiResponse<TripDto>),
        (status = 400, description = "Wrong state or missing reason")
    )
)]
pub async fn cancel_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ReasonRequest>,
) -> Result<Json<ApiResponse<TripDto>>, ApiError> {
    authorize(ctx.role, Action::ManageTrips)?;
    let trip = state.trips.cancel(&ctx, id, &request.reason).await?;
    Ok(Json(ApiResponse::success(TripDto::from(trip))))
}

#[utoipa::path(
    post,
    path = "/api/v1/trips/{id}/delay-trip",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Trip ID")),
    request_body = ReasonRequest,
    responses(
        (status = 200, description = "Trip delayed", body = ApiResponse<TripDto>),
        (status = 400, description = "Wrong state or missing reason")
    )
)]
pub async fn delay_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ReasonRequest>,
) -> Result<Json<ApiResponse<TripDto>>, ApiError> {
    authorize(ctx.role, Action::ManageTrips)?;
    let trip = state.trips.delay(&ctx, id, &request.reason).await?;
    Ok(Json(ApiResponse::success(TripDto::from(trip))))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}/events",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Audit events for the trip", body = ApiResponse<Vec<TripEventDto>>),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn trip_events(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TripEventDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTrips)?;
    let events = state.trips.events(&ctx, id).await?;
    Ok(Json(ApiResponse::success(
        events.into_iter().map(TripEventDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/trips/{id}/events",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Trip ID")),
    request_body = CreateTripEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = ApiResponse<TripEventDto>),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn record_trip_event(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateTripEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TripEventDto>>), ApiError> {
    authorize(ctx.role, Action::RecordTripEvents)?;
    let event_type = TripEventType::parse(&request.event_type)
        .ok_or_else(|| DomainError::validation("event_type", "Unknown event type"))?;
    let event = state
        .trips
        .record_event(
            &ctx,
            id,
            NewTripEvent {
                event_type,
                location: request.location,
                latitude: request.latitude,
                longitude: request.longitude,
                description: request.description,
                recorded_by: request.recorded_by,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TripEventDto::from(event))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/today",
    tag = "Trips",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Trips departing today", body = ApiResponse<Vec<TripDto>>))
)]
pub async fn today_trips(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> Result<Json<ApiResponse<Vec<TripDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTrips)?;
    let trips = state.trips.today(&ctx).await?;
    Ok(Json(ApiResponse::success(
        trips.into_iter().map(TripDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/upcoming",
    tag = "Trips",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Upcoming scheduled or delayed trips", body = ApiResponse<Vec<TripDto>>))
)]
pub async fn upcoming_trips(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> Result<Json<ApiResponse<Vec<TripDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTrips)?;
    let trips = state.trips.upcoming(&ctx).await?;
    Ok(Json(ApiResponse::success(
        trips.into_iter().map(TripDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/active",
    tag = "Trips",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Trips currently underway", body = ApiResponse<Vec<TripDto>>))
)]
pub async fn active_trips(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> Result<Json<ApiResponse<Vec<TripDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewTrips)?;
    let trips = state.trips.active(&ctx).await?;
    Ok(Json(ApiResponse::success(
        trips.into_iter().map(TripDto::from).collect(),
    )))
}
