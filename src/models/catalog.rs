// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Lanches")]
    pub name: String,
    pub image: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

// `restaurant_id` nulo identifica produto legado, anterior ao multi-tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "X-Burger")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "20.00")]
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<Uuid>,
    pub available: bool,
    pub restaurant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    // Produtos legados (sem dono) não pertencem a nenhum painel admin
    pub fn owned_by(&self, restaurant_id: Uuid) -> bool {
        self.restaurant_id == Some(restaurant_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "option_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Escolhe no máximo um valor (ex: tamanho)
    Single,
    /// Escolhe zero ou mais valores (ex: adicionais)
    Multiple,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductOption {
    pub id: Uuid,
    pub product_id: Uuid,
    #[schema(example = "Tamanho")]
    pub name: String,
    pub option_type: OptionType,
    pub required: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    // Preenchido pelo service, não vem do SELECT em product_options
    #[sqlx(skip)]
    #[serde(default)]
    pub values: Vec<ProductOptionValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductOptionValue {
    pub id: Uuid,
    pub option_id: Uuid,
    #[schema(example = "Grande")]
    pub name: String,
    #[schema(example = "5.00")]
    pub price_modifier: Decimal,
    pub display_order: i32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

// Snapshot feito no momento do add-to-cart. Mudanças posteriores no catálogo
// de opções não afetam carrinhos nem pedidos já existentes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectedOption {
    pub option_id: Uuid,
    pub option_value_id: Uuid,
    #[schema(example = "5.00")]
    pub price_modifier: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produto(restaurant_id: Option<Uuid>) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: "X-Burger".into(),
            description: None,
            price: Decimal::new(2000, 2),
            image: None,
            category_id: None,
            available: true,
            restaurant_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn produto_so_pertence_ao_proprio_dono() {
        let dono = Uuid::new_v4();
        let product = produto(Some(dono));

        assert!(product.owned_by(dono));
        assert!(!product.owned_by(Uuid::new_v4()));
    }

    #[test]
    fn produto_legado_nao_pertence_a_nenhum_admin() {
        let product = produto(None);

        assert!(!product.owned_by(Uuid::new_v4()));
    }
}
