// src/models/settings.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Configurações públicas de um restaurante, buscadas pelo slug na vitrine
// e editadas pelo próprio restaurante no painel admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RestaurantSettings {
    pub restaurant_id: Uuid,
    #[schema(example = "Tom & Jerry")]
    pub restaurant_name: String,
    #[schema(example = "tomjerry")]
    pub slug: Option<String>,
    pub home_title: Option<String>,
    pub home_subtitle: Option<String>,
    pub home_description: Option<String>,
    pub logo_url: Option<String>,
    #[schema(example = "#E4002B")]
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub address: Option<String>,
    pub phone_1: Option<String>,
    pub instagram: Option<String>,
    #[schema(example = "5.00")]
    pub delivery_fee: Decimal,
}
