// src/handlers/kitchen.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::orders::KitchenOrder,
};

// GET /api/kitchen/orders
//
// A tela da cozinha faz polling aqui a cada poucos segundos; a consistência
// garantida é "eventual dentro de um intervalo de polling".
#[utoipa::path(
    get,
    path = "/api/kitchen/orders",
    tag = "Kitchen",
    responses(
        (status = 200, description = "Pedidos confirmados e em preparo, mais antigos primeiro, com SLA", body = [KitchenOrder])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_kitchen_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let queue = app_state.order_service.kitchen_orders(user.0.id).await?;
    Ok(Json(queue))
}
