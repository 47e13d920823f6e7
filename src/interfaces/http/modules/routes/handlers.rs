//! Route HTTP handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::authorization::{authorize, Action};
use crate::domain::route::Route;
use crate::domain::{DomainError, TenantContext};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/routes",
    tag = "Routes",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Routes of the company", body = ApiResponse<PaginatedResponse<RouteDto>>))
)]
pub async fn list_routes(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<RouteDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewRoutes)?;
    let routes = state.repos.routes().list(ctx.company_id).await?;
    let dtos: Vec<RouteDto> = routes.into_iter().map(RouteDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        dtos,
        &pagination,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/routes/{id}",
    tag = "Routes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route details", body = ApiResponse<RouteDto>),
        (status = 404, description = "Route not found")
    )
)]
pub async fn get_route(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RouteDto>>, ApiError> {
    authorize(ctx.role, Action::ViewRoutes)?;
    let route = state
        .repos
        .routes()
        .find_by_id(ctx.company_id, id)
        .await?
        .ok_or_else(|| DomainError::not_found("Route", id))?;
    Ok(Json(ApiResponse::success(RouteDto::from(route))))
}

#[utoipa::path(
    post,
    path = "/api/v1/routes",
    tag = "Routes",
    security(("bearer_auth" = [])),
    request_body = CreateRouteRequest,
    responses((status = 200, description = "Route created", body = ApiResponse<RouteDto>))
)]
pub async fn create_route(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteDto>>, ApiError> {
    authorize(ctx.role, Action::ManageRoutes)?;
    let route = Route {
        id: Uuid::new_v4(),
        company_id: ctx.company_id,
        name: request.name,
        origin: request.origin,
        destination: request.destination,
        distance_km: request.distance_km,
        estimated_duration: request.estimated_duration,
        is_active: true,
        created_at: Utc::now(),
    };
    state.repos.routes().save(route.clone()).await?;
    Ok(Json(ApiResponse::success(RouteDto::from(route))))
}

#[utoipa::path(
    put,
    path = "/api/v1/routes/{id}",
    tag = "Routes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = UpdateRouteRequest,
    responses(
        (status = 200, description = "Route updated", body = ApiResponse<RouteDto>),
        (status = 404, description = "Route not found")
    )
)]
pub async fn update_route(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateRouteRequest>,
) -> Result<Json<ApiResponse<RouteDto>>, ApiError> {
    authorize(ctx.role, Action::ManageRoutes)?;
    let mut route = state
        .repos
        .routes()
        .find_by_id(ctx.company_id, id)
        .await?
        .ok_or_else(|| DomainError::not_found("Route", id))?;

    if let Some(name) = request.name {
        route.name = name;
    }
    if let Some(distance_km) = request.distance_km {
        route.distance_km = Some(distance_km);
    }
    if let Some(estimated_duration) = request.estimated_duration {
        route.estimated_duration = Some(estimated_duration);
    }
    if let Some(is_active) = request.is_active {
        route.is_active = is_active;
    }

    state.repos.routes().update(route.clone()).await?;
    Ok(Json(ApiResponse::success(RouteDto::from(route))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/routes/{id}",
    tag = "Routes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route deleted"),
        (status = 404, description = "Route not found")
    )
)]
pub async fn delete_route(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    authorize(ctx.role, Action::ManageRoutes)?;
    let deleted = state.repos.routes().delete(ctx.company_id, id).await?;
    if !deleted {
        return Err(DomainError::not_found("Route", id).into());
    }
    Ok(Json(ApiResponse::success(())))
}
