// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{Order, OrderItem, OrderItemOption, OrderStatus, OrderStatusHistory, PaymentMethod},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ESCRITAS (recebem o executor, para rodarem dentro de uma transação)
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        customer_name: &str,
        customer_phone: &str,
        customer_email: &str,
        delivery_address: Option<&str>,
        delivery_fee: Decimal,
        payment_method: PaymentMethod,
        total: Decimal,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                restaurant_id, customer_name, customer_phone, customer_email,
                delivery_address, delivery_fee, payment_method, total, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            RETURNING *
            "#,
        )
        .bind(restaurant_id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(customer_email)
        .bind(delivery_address)
        .bind(delivery_fee)
        .bind(payment_method)
        .bind(total)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn insert_order_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        price: Decimal,
        observations: Option<&str>,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price, observations)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .bind(observations)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_item_option<'e, E>(
        &self,
        executor: E,
        order_item_id: Uuid,
        option_id: Uuid,
        option_value_id: Uuid,
        option_name: &str,
        value_name: &str,
        price_modifier: Decimal,
    ) -> Result<OrderItemOption, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let option = sqlx::query_as::<_, OrderItemOption>(
            r#"
            INSERT INTO order_item_options (
                order_item_id, option_id, option_value_id,
                option_name, value_name, price_modifier
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(order_item_id)
        .bind(option_id)
        .bind(option_value_id)
        .bind(option_name)
        .bind(value_name)
        .bind(price_modifier)
        .fetch_one(executor)
        .await?;

        Ok(option)
    }

    // Histórico é append-only: só INSERT, nunca UPDATE ou DELETE.
    pub async fn append_status_history<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<OrderStatusHistory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, OrderStatusHistory>(
            r#"
            INSERT INTO order_status_history (order_id, status)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_order<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        customer_name: &str,
        customer_phone: &str,
        customer_email: &str,
        delivery_address: Option<&str>,
        delivery_fee: Decimal,
        payment_method: PaymentMethod,
        total: Decimal,
        status: OrderStatus,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET customer_name = $2, customer_phone = $3, customer_email = $4,
                delivery_address = $5, delivery_fee = $6, payment_method = $7,
                total = $8, status = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(customer_email)
        .bind(delivery_address)
        .bind(delivery_fee)
        .bind(payment_method)
        .bind(total)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    // Hard delete, escopado pelo tenant: itens, opções e histórico caem por
    // CASCADE no banco.
    pub async fn delete_order(&self, order_id: Uuid, restaurant_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND restaurant_id = $2")
            .bind(order_id)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  LEITURAS
    // =========================================================================

    pub async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    // Mesma busca, mas com lock de linha: usada dentro da transação de
    // transição para evitar corrida entre dois admins mudando o status.
    pub async fn find_order_for_update<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Order>, AppError> {
        let orders =
            sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        Ok(orders)
    }

    // Pedidos do cliente, identificado pelo e-mail informado no checkout
    pub async fn list_by_email(&self, email: &str, limit: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE LOWER(customer_email) = LOWER($1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(email)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    // Fila da cozinha: mais antigos primeiro
    pub async fn list_by_statuses(
        &self,
        statuses: &[OrderStatus],
        restaurant_id: Uuid,
    ) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE status = ANY($1) AND restaurant_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(statuses)
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY created_at",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn list_item_options(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderItemOption>, AppError> {
        let options = sqlx::query_as::<_, OrderItemOption>(
            r#"
            SELECT oio.* FROM order_item_options oio
            JOIN order_items oi ON oio.order_item_id = oi.id
            WHERE oi.order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn list_status_history(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderStatusHistory>, AppError> {
        let history = sqlx::query_as::<_, OrderStatusHistory>(
            r#"
            SELECT * FROM order_status_history
            WHERE order_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }
}
