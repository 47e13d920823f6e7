//! Discount HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use crate::application::services::{DiscountUpdate, NewDiscount};
use crate::domain::authorization::{authorize, Action};
use crate::domain::discount::DiscountType;
use crate::domain::{DomainError, TenantContext};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/discounts",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Discounts of the company", body = ApiResponse<PaginatedResponse<DiscountDto>>))
)]
pub async fn list_discounts(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<DiscountDto>>>, ApiError> {
    authorize(ctx.role, Action::ManageDiscounts)?;
    let discounts = state.discounts.list(&ctx).await?;
    let dtos: Vec<DiscountDto> = discounts.into_iter().map(DiscountDto::from).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        dtos,
        &pagination,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/discounts/{id}",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Discount ID")),
    responses(
        (status = 200, description = "Discount details", body = ApiResponse<DiscountDto>),
        (status = 404, description = "Discount not found")
    )
)]
pub async fn get_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    authorize(ctx.role, Action::ManageDiscounts)?;
    let discount = state.discounts.get(&ctx, id).await?;
    Ok(Json(ApiResponse::success(DiscountDto::from(discount))))
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    request_body = CreateDiscountRequest,
    responses(
        (status = 201, description = "Discount created", body = ApiResponse<DiscountDto>),
        (status = 400, description = "Invalid definition or duplicate code")
    )
)]
pub async fn create_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<CreateDiscountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DiscountDto>>), ApiError> {
    authorize(ctx.role, Action::ManageDiscounts)?;
    let discount_type = DiscountType::parse(&request.discount_type)
        .ok_or_else(|| DomainError::validation("discount_type", "Unknown discount type"))?;
    let discount = state
        .discounts
        .create(
            &ctx,
            NewDiscount {
                code: request.code,
                name: request.name,
                description: request.description,
                discount_type,
                value: request.value,
                start_date: request.start_date,
                end_date: request.end_date,
                usage_limit: request.usage_limit,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(DiscountDto::from(discount))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/discounts/{id}",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Discount ID")),
    request_body = UpdateDiscountRequest,
    responses(
        (status = 200, description = "Discount updated", body = ApiResponse<DiscountDto>),
        (status = 404, description = "Discount not found")
    )
)]
pub async fn update_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateDiscountRequest>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    authorize(ctx.role, Action::ManageDiscounts)?;
    let discount = state
        .discounts
        .update(
            &ctx,
            id,
            DiscountUpdate {
                name: request.name,
                description: request.description,
                value: request.value,
                end_date: request.end_date.map(Some),
                usage_limit: request.usage_limit.map(Some),
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(DiscountDto::from(discount))))
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts/{id}/activate",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Discount ID")),
    responses(
        (status = 200, description = "Discount activated", body = ApiResponse<DiscountDto>),
        (status = 400, description = "Already active")
    )
)]
pub async fn activate_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    authorize(ctx.role, Action::ManageDiscounts)?;
    let discount = state.discounts.activate(&ctx, id).await?;
    Ok(Json(ApiResponse::success(DiscountDto::from(discount))))
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts/{id}/deactivate",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Discount ID")),
    responses(
        (status = 200, description = "Discount deactivated", body = ApiResponse<DiscountDto>),
        (status = 400, description = "Already inactive")
    )
)]
pub async fn deactivate_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    authorize(ctx.role, Action::ManageDiscounts)?;
    let discount = state.discounts.deactivate(&ctx, id).await?;
    Ok(Json(ApiResponse::success(DiscountDto::from(discount))))
}

#[utoipa::path(
    get,
    path = "/api/v1/discounts/active",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Discounts currently in their active window", body = ApiResponse<Vec<DiscountDto>>))
)]
pub async fn active_discounts(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> Result<Json<ApiResponse<Vec<DiscountDto>>>, ApiError> {
    authorize(ctx.role, Action::ViewDiscounts)?;
    let discounts = state.discounts.active(&ctx).await?;
    Ok(Json(ApiResponse::success(
        discounts.into_iter().map(DiscountDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts/validate_code",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    request_body = DiscountCodeRequest,
    responses(
        (status = 200, description = "Code is valid", body = ApiResponse<DiscountDto>),
        (status = 404, description = "Invalid, expired or exhausted code")
    )
)]
pub async fn validate_code(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<DiscountCodeRequest>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    authorize(ctx.role, Action::ValidateDiscounts)?;
    match state.discounts.validate_code(&ctx, &request.code).await {
        Ok(discount) => Ok(Json(ApiResponse::success(DiscountDto::from(discount)))),
        // unusable codes are indistinguishable from absent ones here
        Err(DomainError::BusinessRule(msg)) => Err(ApiError::not_found(msg)),
        Err(DomainError::NotFound { .. }) => {
            Err(ApiError::not_found("Invalid or expired discount code"))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts/redeem",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    request_body = DiscountCodeRequest,
    responses(
        (status = 200, description = "Code redeemed, usage counted", body = ApiResponse<DiscountDto>),
        (status = 400, description = "Code unusable or limit reached")
    )
)]
pub async fn redeem_code(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    ValidatedJson(request): ValidatedJson<DiscountCodeRequest>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    authorize(ctx.role, Action::ValidateDiscounts)?;
    let discount = state.discounts.redeem(&ctx, &request.code).await?;
    Ok(Json(ApiResponse::success(DiscountDto::from(discount))))
}
