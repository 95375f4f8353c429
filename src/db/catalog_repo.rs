// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, OptionType, Product, ProductOption, ProductOptionValue},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY display_order, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn create_category(
        &self,
        name: &str,
        image: Option<&str>,
        display_order: i32,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, image, display_order)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(image)
        .bind(display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    // Vitrine: só produtos disponíveis, com filtros opcionais de categoria e
    // restaurante. Dois parâmetros opcionais ainda cabem numa query só.
    pub async fn list_available_products(
        &self,
        category_id: Option<Uuid>,
        restaurant_id: Option<Uuid>,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE available = TRUE
              AND ($1::uuid IS NULL OR category_id = $1)
              AND ($2::uuid IS NULL OR restaurant_id = $2)
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    // Usado pelo checkout para resolver o tenant: uma busca só para todos os
    // produtos referenciados pelo carrinho.
    pub async fn find_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        image: Option<&str>,
        category_id: Option<Uuid>,
        available: bool,
        restaurant_id: Uuid,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, image, category_id, available, restaurant_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image)
        .bind(category_id)
        .bind(available)
        .bind(restaurant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        id: Uuid,
        restaurant_id: Uuid,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        image: Option<&str>,
        category_id: Option<Uuid>,
        available: bool,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $3, description = $4, price = $5, image = $6,
                category_id = $7, available = $8, updated_at = NOW()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(restaurant_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image)
        .bind(category_id)
        .bind(available)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    // Escopado pelo restaurante: um admin não apaga produto de outro tenant.
    pub async fn delete_product(&self, id: Uuid, restaurant_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND restaurant_id = $2")
            .bind(id)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  OPÇÕES DE PRODUTO
    // =========================================================================

    pub async fn list_options(&self, product_id: Uuid) -> Result<Vec<ProductOption>, AppError> {
        let options = sqlx::query_as::<_, ProductOption>(
            "SELECT * FROM product_options WHERE product_id = $1 ORDER BY display_order",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn list_option_values(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductOptionValue>, AppError> {
        let values = sqlx::query_as::<_, ProductOptionValue>(
            r#"
            SELECT v.* FROM product_option_values v
            JOIN product_options o ON v.option_id = o.id
            WHERE o.product_id = $1
            ORDER BY v.display_order
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    pub async fn find_option(&self, id: Uuid) -> Result<Option<ProductOption>, AppError> {
        let option = sqlx::query_as::<_, ProductOption>(
            "SELECT * FROM product_options WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(option)
    }

    pub async fn create_option(
        &self,
        product_id: Uuid,
        name: &str,
        option_type: OptionType,
        required: bool,
        display_order: i32,
    ) -> Result<ProductOption, AppError> {
        let option = sqlx::query_as::<_, ProductOption>(
            r#"
            INSERT INTO product_options (product_id, name, option_type, required, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(name)
        .bind(option_type)
        .bind(required)
        .bind(display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(option)
    }

    pub async fn create_option_value(
        &self,
        option_id: Uuid,
        name: &str,
        price_modifier: Decimal,
        display_order: i32,
        available: bool,
    ) -> Result<ProductOptionValue, AppError> {
        let value = sqlx::query_as::<_, ProductOptionValue>(
            r#"
            INSERT INTO product_option_values (option_id, name, price_modifier, display_order, available)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(option_id)
        .bind(name)
        .bind(price_modifier)
        .bind(display_order)
        .bind(available)
        .fetch_one(&self.pool)
        .await?;

        Ok(value)
    }
}
