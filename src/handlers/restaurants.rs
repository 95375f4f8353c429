// src/handlers/restaurants.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::settings::RestaurantSettings,
};

// GET /api/restaurants/{slug}
//
// Vitrine multi-tenant: o cliente guarda este slug como "último contexto de
// restaurante" e o reaplica na navegação.
#[utoipa::path(
    get,
    path = "/api/restaurants/{slug}",
    tag = "Restaurants",
    params(("slug" = String, Path, description = "Slug público do restaurante")),
    responses(
        (status = 200, description = "Configurações públicas do restaurante", body = RestaurantSettings),
        (status = 404, description = "Restaurante não encontrado")
    )
)]
pub async fn get_by_slug(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state
        .settings_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Restaurante".to_string()))?;

    Ok(Json(settings))
}

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Restaurants",
    responses(
        (status = 200, description = "Configurações do restaurante autenticado", body = RestaurantSettings),
        (status = 404, description = "Restaurante ainda sem configurações")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state
        .settings_repo
        .find_by_restaurant(user.0.id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Configurações".to_string()))?;

    Ok(Json(settings))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSettingsPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Tom & Jerry")]
    pub restaurant_name: String,
    #[schema(example = "tomjerry")]
    pub slug: Option<String>,
    pub home_title: Option<String>,
    pub home_subtitle: Option<String>,
    pub home_description: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub address: Option<String>,
    pub phone_1: Option<String>,
    pub instagram: Option<String>,
    #[serde(default)]
    #[schema(example = "5.00")]
    pub delivery_fee: Decimal,
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Restaurants",
    request_body = UpdateSettingsPayload,
    responses(
        (status = 200, description = "Configurações salvas (upsert)", body = RestaurantSettings)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = app_state
        .settings_repo
        .upsert(
            user.0.id,
            &payload.restaurant_name,
            payload.slug.as_deref(),
            payload.home_title.as_deref(),
            payload.home_subtitle.as_deref(),
            payload.home_description.as_deref(),
            payload.logo_url.as_deref(),
            payload.primary_color.as_deref(),
            payload.secondary_color.as_deref(),
            payload.address.as_deref(),
            payload.phone_1.as_deref(),
            payload.instagram.as_deref(),
            payload.delivery_fee,
        )
        .await?;

    Ok(Json(settings))
}
