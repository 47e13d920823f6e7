//! Bus HTTP handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::authorization::{authorize, Action};
use crate::domain::bus::{Bus, BusStatus};
use crate::domain::{DomainError, TenantContext};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/buses",
    tag = "Buses",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Buses of the company", body = ApiResponse<PaginatedResponse<BusDto>>))
)]
pub async fn list_buses(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<BusDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewBuses)?;
    let buses = state.repos.buses().list(ctx.company_id).await?;
    let dtos: Vec<BusDto> = buses.into_iter().map(BusDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        dtos,
        &pagination,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/buses/{id}",
    tag = "Buses",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Bus ID")),
    responses(
        (status = 200, description = "Bus details", body = ApiResponse<BusDto>),
        (status = 404, description = "Bus not found")
    )
)]
pub async fn get_bus(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BusDto>>, ApiError> {
    authorize(ctx.role, Action::ViewBuses)?;
    let bus = state
        .repos
        .buses()
        .find_by_id(ctx.company_id, id)
        .await?
        .ok_or_else(|| DomainError::not_found("Bus", id))?;
    Ok(Json(ApiResponse::success(BusDto::from(bus))))
}

#[utoipa::path(
    post,
    path = "/api/v1/buses",
    tag = "Buses",
    security(("bearer_auth" = [])),
    request_body = CreateBusRequest,
    responses(
        (status = 200, description = "Bus registered", body = ApiResponse<BusDto>),
        (status = 400, description = "Duplicate registration number")
    )
)]
pub async fn create_bus(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<CreateBusRequest>,
) -> Result<Json<ApiResponse<BusDto>>, ApiError> {
    authorize(ctx.role, Action::ManageBuses)?;
    let bus = Bus {
        id: Uuid::new_v4(),
        company_id: ctx.company_id,
        registration_number: request.registration_number,
        license_plate: request.license_plate,
        model: request.model,
        manufacturer: request.manufacturer,
        year: request.year,
        capacity: request.capacity,
        status: BusStatus::Active,
        mileage: 0,
        notes: request.notes,
        created_at: Utc::now(),
    };
    state.repos.buses().save(bus.clone()).await?;
    Ok(Json(ApiResponse::success(BusDto::from(bus))))
}

#[utoipa::path(
    put,
    path = "/api/v1/buses/{id}",
    tag = "Buses",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Bus ID")),
    request_body = UpdateBusRequest,
    responses(
        (status = 200, description = "Bus updated", body = ApiResponse<BusDto>),
        (status = 404, description = "Bus not found")
    )
)]
pub async fn update_bus(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateBusRequest>,
) -> Result<Json<ApiResponse<BusDto>>, ApiError> {
    authorize(ctx.role, Action::ManageBuses)?;
    let mut bus = state
        .repos
        .buses()
        .find_by_id(ctx.company_id, id)
        .await?
        .ok_or_else(|| DomainError::not_found("Bus", id))?;

    if let Some(license_plate) = request.license_plate {
        bus.license_plate = license_plate;
    }
    if let Some(manufacturer) = request.manufacturer {
        bus.manufacturer = Some(manufacturer);
    }
    if let Some(status) = request.status {
        bus.status = BusStatus::parse(&status)
            .ok_or_else(|| DomainError::validation("status", "Unknown bus status"))?;
    }
    if let Some(mileage) = request.mileage {
        bus.mileage = mileage;
    }
    if let Some(notes) = request.notes {
        bus.notes = Some(notes);
    }

    state.repos.buses().update(bus.clone()).await?;
    Ok(Json(ApiResponse::success(BusDto::from(bus))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/buses/{id}",
    tag = "Buses",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Bus ID")),
    responses(
        (status = 200, description = "Bus deleted"),
        (status = 404, description = "Bus not found")
    )
)]
pub async fn delete_bus(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    authorize(ctx.role, Action::ManageBuses)?;
    let deleted = state.repos.buses().delete(ctx.company_id, id).await?;
    if !deleted {
        return Err(DomainError::not_found("Bus", id).into());
    }
    Ok(Json(ApiResponse::success(())))
}
