// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::{OptionType, Product, ProductOption},
};

// =============================================================================
//  CATEGORIAS
// =============================================================================

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "Categorias do cardápio, na ordem de exibição")
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.list_categories().await?;
    Ok(Json(categories))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Lanches")]
    pub name: String,
    pub image: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Catalog",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .catalog_service
        .create_category(&payload.name, payload.image.as_deref(), payload.display_order)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// =============================================================================
//  PRODUTOS (vitrine)
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
    // Slug do restaurante, o mesmo salvo como contexto no cliente
    pub restaurant: Option<String>,
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Produtos disponíveis, com filtros opcionais")
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .catalog_service
        .list_storefront_products(query.category_id, query.restaurant.as_deref())
        .await?;

    Ok(Json(products))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: Product,
    pub options: Vec<ProductOption>,
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto com grupos de opções e valores", body = ProductDetailResponse),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product_detail(id).await?;
    let options = app_state.catalog_service.get_product_options(id).await?;

    Ok(Json(ProductDetailResponse { product, options }))
}

// =============================================================================
//  PRODUTOS (painel admin)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "X-Burger")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "20.00")]
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catalog",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado no restaurante autenticado", body = Product)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .create_product(
            user.0.id,
            &payload.name,
            payload.description.as_deref(),
            payload.price,
            payload.image.as_deref(),
            payload.category_id,
            payload.available,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Catalog",
    request_body = ProductPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado neste restaurante")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .update_product(
            user.0.id,
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.price,
            payload.image.as_deref(),
            payload.category_id,
            payload.available,
        )
        .await?;

    Ok(Json(product))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado neste restaurante")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_product(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  OPÇÕES DE PRODUTO (painel admin)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OptionValuePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Grande")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "5.00")]
    pub price_modifier: Decimal,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_available")]
    pub available: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOptionPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Tamanho")]
    pub name: String,
    pub option_type: OptionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub display_order: i32,
    #[validate(nested)]
    #[serde(default)]
    pub values: Vec<OptionValuePayload>,
}

// POST /api/products/{id}/options
#[utoipa::path(
    post,
    path = "/api/products/{id}/options",
    tag = "Catalog",
    request_body = CreateOptionPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 201, description = "Grupo de opções criado com seus valores", body = ProductOption),
        (status = 404, description = "Produto não encontrado neste restaurante")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_option(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<CreateOptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let values: Vec<(String, Decimal, i32, bool)> = payload
        .values
        .iter()
        .map(|value| {
            (
                value.name.clone(),
                value.price_modifier,
                value.display_order,
                value.available,
            )
        })
        .collect();

    let option = app_state
        .catalog_service
        .create_option_group(
            user.0.id,
            product_id,
            &payload.name,
            payload.option_type,
            payload.required,
            payload.display_order,
            &values,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(option)))
}

// POST /api/options/{id}/values
#[utoipa::path(
    post,
    path = "/api/options/{id}/values",
    tag = "Catalog",
    request_body = OptionValuePayload,
    params(("id" = Uuid, Path, description = "ID do grupo de opções")),
    responses(
        (status = 201, description = "Valor adicionado ao grupo"),
        (status = 404, description = "Grupo não encontrado neste restaurante")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_option_value(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(option_id): Path<Uuid>,
    Json(payload): Json<OptionValuePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let value = app_state
        .catalog_service
        .add_option_value(
            user.0.id,
            option_id,
            &payload.name,
            payload.price_modifier,
            payload.display_order,
            payload.available,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(value)))
}
