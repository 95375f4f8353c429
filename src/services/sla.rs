// src/services/sla.rs
//
// Tempo-em-status e prazos (SLA) por etapa do pedido. O painel admin e a tela
// da cozinha usam isso para destacar pedidos em risco ou estourados.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::orders::{Order, OrderStatus, OrderStatusHistory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlaLevel {
    Ok,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlaState {
    #[schema(example = 12)]
    pub elapsed_minutes: i64,
    pub level: SlaLevel,
    #[schema(example = "12 min")]
    pub message: String,
}

// Prazo máximo (em minutos) para cada etapa não-terminal.
pub fn max_minutes(status: OrderStatus) -> Option<i64> {
    match status {
        OrderStatus::Pending => Some(5),
        OrderStatus::Confirmed => Some(30),
        OrderStatus::Preparing => Some(30),
        OrderStatus::Ready => Some(25),
        OrderStatus::Delivering => Some(25),
        OrderStatus::Delivered | OrderStatus::Cancelled => None,
    }
}

// Início do status atual: a entrada mais recente do histórico com o mesmo
// status. Pedidos antigos sem histórico caem na data de criação.
pub fn status_started_at(order: &Order, history: &[OrderStatusHistory]) -> DateTime<Utc> {
    history
        .iter()
        .filter(|entry| entry.status == order.status)
        .map(|entry| entry.created_at)
        .max()
        .unwrap_or(order.created_at)
}

/// Calcula o estado de SLA do pedido. Status terminais não têm SLA.
pub fn compute_sla_state(
    order: &Order,
    history: &[OrderStatusHistory],
    now: DateTime<Utc>,
) -> Option<SlaState> {
    let max = max_minutes(order.status)?;

    let since = status_started_at(order, history);
    let elapsed = (now - since).num_minutes();

    // ok até 70% do prazo, warning até o limite, danger depois dele
    let (level, message) = if elapsed * 10 <= max * 7 {
        (SlaLevel::Ok, format_elapsed(elapsed))
    } else if elapsed <= max {
        let remaining = max - elapsed;
        (
            SlaLevel::Warning,
            format!("{} (faltam {} min para o prazo)", format_elapsed(elapsed), remaining),
        )
    } else {
        let over = elapsed - max;
        (
            SlaLevel::Danger,
            format!("{} ({} min acima do prazo)", format_elapsed(elapsed), over),
        )
    };

    Some(SlaState {
        elapsed_minutes: elapsed,
        level,
        message,
    })
}

/// Humaniza minutos: "N min", depois "Hh Mmin" e, acima de 24h, "Dd Hh".
pub fn format_elapsed(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        let rest = minutes % 60;
        if rest == 0 {
            return format!("{}h", hours);
        }
        return format!("{}h {}min", hours, rest);
    }

    let days = hours / 24;
    let rest_hours = hours % 24;
    if rest_hours == 0 {
        return format!("{}d", days);
    }
    format!("{}d {}h", days, rest_hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::orders::PaymentMethod;

    fn pedido(status: OrderStatus, created_at: DateTime<Utc>) -> Order {
        Order {
            id: Uuid::new_v4(),
            restaurant_id: Uuid::new_v4(),
            customer_name: "Maria".into(),
            customer_phone: "11 99999-0000".into(),
            customer_email: "maria@example.com".into(),
            delivery_address: None,
            delivery_fee: Decimal::ZERO,
            payment_method: PaymentMethod::Cash,
            total: Decimal::new(4500, 2),
            status,
            created_at,
            updated_at: created_at,
        }
    }

    fn entrada(order_id: Uuid, status: OrderStatus, at: DateTime<Utc>) -> OrderStatusHistory {
        OrderStatusHistory {
            id: Uuid::new_v4(),
            order_id,
            status,
            created_at: at,
        }
    }

    #[test]
    fn preparing_20_minutos_esta_ok() {
        let now = Utc::now();
        let order = pedido(OrderStatus::Preparing, now - Duration::hours(2));
        let history = vec![entrada(order.id, OrderStatus::Preparing, now - Duration::minutes(20))];

        let sla = compute_sla_state(&order, &history, now).unwrap();
        assert_eq!(sla.level, SlaLevel::Ok);
        assert_eq!(sla.elapsed_minutes, 20);
        assert_eq!(sla.message, "20 min");
    }

    #[test]
    fn preparing_25_minutos_vira_warning() {
        // 0.7 x 30 = 21, então 25 já passou do alerta mas não do prazo
        let now = Utc::now();
        let order = pedido(OrderStatus::Preparing, now - Duration::hours(2));
        let history = vec![entrada(order.id, OrderStatus::Preparing, now - Duration::minutes(25))];

        let sla = compute_sla_state(&order, &history, now).unwrap();
        assert_eq!(sla.level, SlaLevel::Warning);
        assert!(sla.message.contains("faltam 5 min"));
    }

    #[test]
    fn preparing_31_minutos_vira_danger() {
        let now = Utc::now();
        let order = pedido(OrderStatus::Preparing, now - Duration::hours(2));
        let history = vec![entrada(order.id, OrderStatus::Preparing, now - Duration::minutes(31))];

        let sla = compute_sla_state(&order, &history, now).unwrap();
        assert_eq!(sla.level, SlaLevel::Danger);
        assert!(sla.message.contains("1 min acima do prazo"));
    }

    #[test]
    fn limite_exato_ainda_e_warning() {
        let now = Utc::now();
        let order = pedido(OrderStatus::Preparing, now - Duration::hours(2));
        let history = vec![entrada(order.id, OrderStatus::Preparing, now - Duration::minutes(30))];

        let sla = compute_sla_state(&order, &history, now).unwrap();
        assert_eq!(sla.level, SlaLevel::Warning);
    }

    #[test]
    fn status_terminal_nao_tem_sla() {
        let now = Utc::now();
        let delivered = pedido(OrderStatus::Delivered, now - Duration::hours(3));
        let cancelled = pedido(OrderStatus::Cancelled, now - Duration::hours(3));

        assert!(compute_sla_state(&delivered, &[], now).is_none());
        assert!(compute_sla_state(&cancelled, &[], now).is_none());
    }

    #[test]
    fn usa_a_entrada_mais_recente_do_status_atual() {
        // Pedido que voltou a "preparing": conta a partir da última entrada
        let now = Utc::now();
        let order = pedido(OrderStatus::Preparing, now - Duration::hours(5));
        let history = vec![
            entrada(order.id, OrderStatus::Pending, now - Duration::hours(5)),
            entrada(order.id, OrderStatus::Preparing, now - Duration::hours(4)),
            entrada(order.id, OrderStatus::Preparing, now - Duration::minutes(10)),
        ];

        let sla = compute_sla_state(&order, &history, now).unwrap();
        assert_eq!(sla.elapsed_minutes, 10);
        assert_eq!(sla.level, SlaLevel::Ok);
    }

    #[test]
    fn sem_historico_cai_na_data_de_criacao() {
        let now = Utc::now();
        let order = pedido(OrderStatus::Pending, now - Duration::minutes(4));

        let sla = compute_sla_state(&order, &[], now).unwrap();
        // pending tem prazo de 5 min; 0.7 x 5 = 3.5, então 4 já alerta
        assert_eq!(sla.elapsed_minutes, 4);
        assert_eq!(sla.level, SlaLevel::Warning);
    }

    #[test]
    fn humanizacao_de_tempo() {
        assert_eq!(format_elapsed(0), "0 min");
        assert_eq!(format_elapsed(59), "59 min");
        assert_eq!(format_elapsed(60), "1h");
        assert_eq!(format_elapsed(95), "1h 35min");
        assert_eq!(format_elapsed(23 * 60 + 59), "23h 59min");
        assert_eq!(format_elapsed(24 * 60), "1d");
        assert_eq!(format_elapsed(26 * 60), "1d 2h");
        assert_eq!(format_elapsed(50 * 60), "2d 2h");
    }
}
