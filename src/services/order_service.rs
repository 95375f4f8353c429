// src/services/order_service.rs
//
// Ciclo de vida do pedido: criação atômica no checkout, máquina de estados do
// status com histórico append-only e os derivados de SLA para exibição.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    cart,
    common::error::AppError,
    db::{CatalogRepository, OrderRepository},
    models::orders::{
        CreateOrderPayload, KitchenOrder, Order, OrderDetail, OrderItemDetail, OrderStatus,
        UpdateOrderPayload,
    },
    services::{
        sla,
        tenant_resolver::{self, LineOwnership},
    },
};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    catalog_repo: CatalogRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(repo: OrderRepository, catalog_repo: CatalogRepository, pool: PgPool) -> Self {
        Self { repo, catalog_repo, pool }
    }

    // =========================================================================
    //  CHECKOUT
    // =========================================================================

    /// Cria pedido + itens + snapshots de opções + entrada inicial do
    /// histórico em UMA transação: ou entra tudo, ou não entra nada.
    pub async fn create_order(&self, payload: &CreateOrderPayload) -> Result<Order, AppError> {
        if payload.items.is_empty() {
            return Err(AppError::EmptyCart);
        }

        // Busca os produtos referenciados para descobrir os donos
        let product_ids: Vec<Uuid> =
            payload.items.iter().map(|item| item.product_id).collect();
        let products = self.catalog_repo.find_products_by_ids(&product_ids).await?;

        let by_id: HashMap<Uuid, _> =
            products.iter().map(|product| (product.id, product)).collect();
        if payload.items.iter().any(|item| !by_id.contains_key(&item.product_id)) {
            return Err(AppError::NoProductsFound);
        }

        // Isolamento de tenant: resolve o dono único do pedido ou rejeita,
        // sempre ANTES de qualquer escrita.
        let lines: Vec<LineOwnership> = payload
            .items
            .iter()
            .map(|item| LineOwnership {
                product_id: item.product_id,
                restaurant_id: by_id[&item.product_id].restaurant_id,
            })
            .collect();
        let restaurant_id = tenant_resolver::resolve_tenant(&lines, payload.restaurant_id)?;

        // O total enviado pelo cliente é aceito como está (comportamento do
        // sistema original), mas um divergente fica registrado no log.
        let computed: Decimal = payload
            .items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum::<Decimal>()
            + payload.delivery_fee;
        let expected = cart::checkout_total(computed, payload.payment_method);
        if expected != payload.total {
            tracing::warn!(
                "Total divergente no checkout: recebido {} vs calculado {}",
                payload.total,
                expected
            );
        }

        let mut tx = self.pool.begin().await?;

        let order = self
            .repo
            .insert_order(
                &mut *tx,
                restaurant_id,
                &payload.customer_name,
                &payload.customer_phone,
                &payload.customer_email,
                payload.delivery_address.as_deref(),
                payload.delivery_fee,
                payload.payment_method,
                payload.total,
            )
            .await?;

        for item in &payload.items {
            let inserted = self
                .repo
                .insert_order_item(
                    &mut *tx,
                    order.id,
                    item.product_id,
                    item.quantity,
                    item.price,
                    item.observations.as_deref(),
                )
                .await?;

            for option in &item.selected_options {
                self.repo
                    .insert_item_option(
                        &mut *tx,
                        inserted.id,
                        option.option_id,
                        option.option_value_id,
                        option.option_name.as_deref().unwrap_or_default(),
                        option.value_name.as_deref().unwrap_or_default(),
                        option.price_modifier,
                    )
                    .await?;
            }
        }

        // Primeira entrada do histórico: todo pedido nasce 'pending'
        self.repo
            .append_status_history(&mut *tx, order.id, OrderStatus::Pending)
            .await?;

        tx.commit().await?;

        tracing::info!("Pedido {} criado para o restaurante {}", order.id, restaurant_id);
        Ok(order)
    }

    // =========================================================================
    //  TRANSIÇÕES DE STATUS
    // =========================================================================

    /// Muda o status do pedido e registra no histórico, mas só registra se o
    /// status realmente mudou (repetição é no-op). O pedido precisa pertencer
    /// ao restaurante autenticado.
    pub async fn transition_status(
        &self,
        restaurant_id: Uuid,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_order_for_update(&mut *tx, order_id)
            .await?
            .filter(|order| order.belongs_to(restaurant_id))
            .ok_or_else(|| AppError::ResourceNotFound("Pedido".to_string()))?;

        if !current.status.can_transition_to(new_status) {
            return Err(AppError::InvalidTransition {
                from: current.status,
                to: new_status,
            });
        }

        let updated = self.repo.update_status(&mut *tx, order_id, new_status).await?;

        if current.status.records_history_on(new_status) {
            self.repo.append_status_history(&mut *tx, order_id, new_status).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Pedido {} mudou de '{}' para '{}'",
            order_id,
            current.status,
            new_status
        );
        Ok(updated)
    }

    /// Edição completa do pedido pelo painel admin. A mudança de status passa
    /// pela mesma validação e pelo mesmo critério de histórico do PATCH.
    pub async fn update_order(
        &self,
        restaurant_id: Uuid,
        order_id: Uuid,
        payload: &UpdateOrderPayload,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_order_for_update(&mut *tx, order_id)
            .await?
            .filter(|order| order.belongs_to(restaurant_id))
            .ok_or_else(|| AppError::ResourceNotFound("Pedido".to_string()))?;

        if !current.status.can_transition_to(payload.status) {
            return Err(AppError::InvalidTransition {
                from: current.status,
                to: payload.status,
            });
        }

        let updated = self
            .repo
            .update_order(
                &mut *tx,
                order_id,
                &payload.customer_name,
                &payload.customer_phone,
                &payload.customer_email,
                payload.delivery_address.as_deref(),
                payload.delivery_fee,
                payload.payment_method,
                payload.total,
                payload.status,
            )
            .await?;

        if current.status.records_history_on(payload.status) {
            self.repo
                .append_status_history(&mut *tx, order_id, payload.status)
                .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete_order(&self, restaurant_id: Uuid, order_id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_order(order_id, restaurant_id).await?;
        if !deleted {
            return Err(AppError::ResourceNotFound("Pedido".to_string()));
        }
        tracing::info!("Pedido {} removido", order_id);
        Ok(())
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    /// Pedido completo: itens com produto e opções, histórico ordenado e SLA.
    pub async fn get_order_detail(&self, order_id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .repo
            .find_order(order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido".to_string()))?;

        let items = self.repo.list_items(order_id).await?;
        let item_options = self.repo.list_item_options(order_id).await?;
        let history = self.repo.list_status_history(order_id).await?;

        let product_ids: Vec<Uuid> = items.iter().map(|item| item.product_id).collect();
        let products = self.catalog_repo.find_products_by_ids(&product_ids).await?;

        let details = items
            .into_iter()
            .map(|item| {
                let product = products
                    .iter()
                    .find(|product| product.id == item.product_id)
                    .cloned();
                let selected_options = item_options
                    .iter()
                    .filter(|option| option.order_item_id == item.id)
                    .cloned()
                    .collect();
                OrderItemDetail {
                    item,
                    product,
                    selected_options,
                }
            })
            .collect();

        let sla = sla::compute_sla_state(&order, &history, Utc::now());

        Ok(OrderDetail {
            order,
            items: details,
            status_history: history,
            sla,
        })
    }

    pub async fn list_recent(&self, email: Option<&str>) -> Result<Vec<Order>, AppError> {
        match email {
            Some(email) => self.repo.list_by_email(email, 50).await,
            None => self.repo.list_recent(50).await,
        }
    }

    /// Fila da cozinha: pedidos confirmados e em preparo, mais antigos
    /// primeiro, com o SLA já calculado. A tela faz polling deste endpoint.
    pub async fn kitchen_orders(&self, restaurant_id: Uuid) -> Result<Vec<KitchenOrder>, AppError> {
        let orders = self
            .repo
            .list_by_statuses(&[OrderStatus::Confirmed, OrderStatus::Preparing], restaurant_id)
            .await?;

        let now = Utc::now();
        let mut queue = Vec::with_capacity(orders.len());
        for order in orders {
            let history = self.repo.list_status_history(order.id).await?;
            let sla = sla::compute_sla_state(&order, &history, now);
            queue.push(KitchenOrder { order, sla });
        }

        Ok(queue)
    }
}
