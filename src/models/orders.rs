// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::catalog::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Pix,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivering,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    // Transições aceitas: caminho normal do pedido, repetição do mesmo status
    // (no-op) e cancelamento a partir de qualquer status não-terminal.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        if next == OrderStatus::Cancelled {
            return true;
        }
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Confirmed, OrderStatus::Preparing)
                | (OrderStatus::Preparing, OrderStatus::Ready)
                | (OrderStatus::Ready, OrderStatus::Delivering)
                | (OrderStatus::Delivering, OrderStatus::Delivered)
        )
    }

    // O histórico só registra transições reais; repetir o status é no-op.
    pub fn records_history_on(&self, next: OrderStatus) -> bool {
        *self != next
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    #[schema(example = "Maria Silva")]
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    // Nulo = retirada no balcão
    pub delivery_address: Option<String>,
    #[schema(example = "5.00")]
    pub delivery_fee: Decimal,
    pub payment_method: PaymentMethod,
    #[schema(example = "45.00")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    // Escopo de tenant das mutações do painel admin
    pub fn belongs_to(&self, restaurant_id: Uuid) -> bool {
        self.restaurant_id == restaurant_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    #[schema(example = 2)]
    pub quantity: i32,
    // Preço unitário congelado no momento do pedido
    #[schema(example = "20.00")]
    pub price: Decimal,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItemOption {
    pub id: Uuid,
    pub order_item_id: Uuid,
    pub option_id: Uuid,
    pub option_value_id: Uuid,
    #[schema(example = "Tamanho")]
    pub option_name: String,
    #[schema(example = "Grande")]
    pub value_name: String,
    #[schema(example = "5.00")]
    pub price_modifier: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderStatusHistory {
    pub id: Uuid,
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Option<Product>,
    pub selected_options: Vec<OrderItemOption>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    // Ordenado do mais antigo para o mais recente
    pub status_history: Vec<OrderStatusHistory>,
    // Nulo quando o pedido está em status terminal
    pub sla: Option<crate::services::sla::SlaState>,
}

// Entrada da fila da cozinha: o pedido com seu estado de SLA já calculado
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct KitchenOrder {
    #[serde(flatten)]
    pub order: Order,
    pub sla: Option<crate::services::sla::SlaState>,
}

// =============================================================================
//  PAYLOADS (checkout e painel admin)
// =============================================================================

// Snapshot de opção enviado pelo cliente no checkout. Os nomes vêm junto para
// o histórico do pedido não depender do catálogo atual.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelectedOptionPayload {
    pub option_id: Uuid,
    pub option_value_id: Uuid,
    #[schema(example = "Tamanho")]
    pub option_name: Option<String>,
    #[schema(example = "Grande")]
    pub value_name: Option<String>,
    #[schema(example = "5.00")]
    pub price_modifier: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderItemPayload {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "quantidade mínima é 1"))]
    #[schema(example = 2)]
    pub quantity: i32,
    // Preço unitário calculado no cliente (base + opções)
    #[schema(example = "20.00")]
    pub price: Decimal,
    pub observations: Option<String>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionPayload>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria Silva")]
    pub customer_name: String,
    #[validate(length(min = 1, message = "required"))]
    pub customer_phone: String,
    // Obrigatório: é como o cliente acompanha os pedidos depois
    #[validate(email(message = "e-mail inválido"))]
    pub customer_email: String,
    pub delivery_address: Option<String>,
    #[serde(default)]
    #[schema(example = "5.00")]
    pub delivery_fee: Decimal,
    pub payment_method: PaymentMethod,
    #[schema(example = "45.00")]
    pub total: Decimal,
    // Hint de tenant vindo do contexto salvo no cliente; os donos dos
    // produtos têm a palavra final
    pub restaurant_id: Option<Uuid>,
    #[validate(nested)]
    pub items: Vec<OrderItemPayload>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderPayload {
    #[validate(length(min = 1, message = "required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "required"))]
    pub customer_phone: String,
    #[validate(email(message = "e-mail inválido"))]
    pub customer_email: String,
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub delivery_fee: Decimal,
    pub payment_method: PaymentMethod,
    pub total: Decimal,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;
    use super::*;
    use rust_decimal::Decimal;

    fn pedido(restaurant_id: Uuid) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            restaurant_id,
            customer_name: "Maria".into(),
            customer_phone: "11 99999-0000".into(),
            customer_email: "maria@example.com".into(),
            delivery_address: None,
            delivery_fee: Decimal::ZERO,
            payment_method: PaymentMethod::Cash,
            total: Decimal::new(4500, 2),
            status: Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn caminho_normal_do_pedido_e_aceito() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Delivering));
        assert!(Delivering.can_transition_to(Delivered));
    }

    #[test]
    fn nao_pode_pular_etapas_nem_voltar() {
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Confirmed.can_transition_to(Delivered));
        assert!(!Ready.can_transition_to(Confirmed));
        assert!(!Delivering.can_transition_to(Pending));
    }

    #[test]
    fn cancelamento_vale_para_qualquer_status_nao_terminal() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Delivering.can_transition_to(Cancelled));
    }

    #[test]
    fn status_terminal_nao_transiciona() {
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Delivering));
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn repetir_o_mesmo_status_e_noop_valido() {
        assert!(Preparing.can_transition_to(Preparing));
        assert!(Delivered.can_transition_to(Delivered));
    }

    #[test]
    fn historico_so_registra_mudanca_real_de_status() {
        assert!(Pending.records_history_on(Confirmed));
        assert!(Preparing.records_history_on(Ready));
        assert!(Delivering.records_history_on(Cancelled));

        // Repetir o status atual é aceito, mas não entra no histórico
        assert!(!Pending.records_history_on(Pending));
        assert!(!Preparing.records_history_on(Preparing));
    }

    #[test]
    fn pedido_so_pertence_ao_proprio_restaurante() {
        let dono = Uuid::new_v4();
        let order = pedido(dono);

        assert!(order.belongs_to(dono));
        assert!(!order.belongs_to(Uuid::new_v4()));
    }
}
