// src/handlers/orders.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::orders::{CreateOrderPayload, Order, OrderDetail, UpdateOrderPayload, UpdateStatusPayload},
};

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com itens, opções e histórico inicial", body = Order),
        (status = 400, description = "Carrinho vazio, produtos inexistentes ou de restaurantes diferentes"),
        (status = 500, description = "Falha de persistência")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state.order_service.create_order(&payload).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    // Com id retorna o pedido completo; sem id, a lista dos mais recentes
    pub id: Option<Uuid>,
    // Filtro da tela "meus pedidos" do cliente
    pub email: Option<String>,
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Pedido completo (com ?id=) ou os 50 mais recentes", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn list_or_get_orders(
    State(app_state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Response, AppError> {
    if let Some(id) = query.id {
        let detail = app_state.order_service.get_order_detail(id).await?;
        return Ok(Json(detail).into_response());
    }

    let orders = app_state.order_service.list_recent(query.email.as_deref()).await?;
    Ok(Json(orders).into_response())
}

// PATCH /api/orders/{id}/status
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateStatusPayload,
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Status atualizado; histórico registrado se mudou", body = Order),
        (status = 400, description = "Transição de status inválida"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .transition_status(user.0.id, id, payload.status)
        .await?;

    Ok(Json(order))
}

// PUT /api/orders/{id}
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Orders",
    request_body = UpdateOrderPayload,
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido atualizado", body = Order),
        (status = 400, description = "Transição de status inválida"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .order_service
        .update_order(user.0.id, id, &payload)
        .await?;

    Ok(Json(order))
}

// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 204, description = "Pedido removido (itens e histórico caem em cascata)"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.delete_order(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
