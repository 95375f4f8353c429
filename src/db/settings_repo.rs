// src/db/settings_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::settings::RestaurantSettings};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Vitrine: resolve o restaurante pelo slug da URL
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<RestaurantSettings>, AppError> {
        let settings = sqlx::query_as::<_, RestaurantSettings>(
            "SELECT * FROM restaurant_settings WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    pub async fn find_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Option<RestaurantSettings>, AppError> {
        let settings = sqlx::query_as::<_, RestaurantSettings>(
            "SELECT * FROM restaurant_settings WHERE restaurant_id = $1",
        )
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    // Upsert: o painel admin salva tudo de uma vez, exista a linha ou não
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        restaurant_id: Uuid,
        restaurant_name: &str,
        slug: Option<&str>,
        home_title: Option<&str>,
        home_subtitle: Option<&str>,
        home_description: Option<&str>,
        logo_url: Option<&str>,
        primary_color: Option<&str>,
        secondary_color: Option<&str>,
        address: Option<&str>,
        phone_1: Option<&str>,
        instagram: Option<&str>,
        delivery_fee: Decimal,
    ) -> Result<RestaurantSettings, AppError> {
        let settings = sqlx::query_as::<_, RestaurantSettings>(
            r#"
            INSERT INTO restaurant_settings (
                restaurant_id, restaurant_name, slug, home_title, home_subtitle,
                home_description, logo_url, primary_color, secondary_color,
                address, phone_1, instagram, delivery_fee
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (restaurant_id) DO UPDATE SET
                restaurant_name = EXCLUDED.restaurant_name,
                slug = EXCLUDED.slug,
                home_title = EXCLUDED.home_title,
                home_subtitle = EXCLUDED.home_subtitle,
                home_description = EXCLUDED.home_description,
                logo_url = EXCLUDED.logo_url,
                primary_color = EXCLUDED.primary_color,
                secondary_color = EXCLUDED.secondary_color,
                address = EXCLUDED.address,
                phone_1 = EXCLUDED.phone_1,
                instagram = EXCLUDED.instagram,
                delivery_fee = EXCLUDED.delivery_fee
            RETURNING *
            "#,
        )
        .bind(restaurant_id)
        .bind(restaurant_name)
        .bind(slug)
        .bind(home_title)
        .bind(home_subtitle)
        .bind(home_description)
        .bind(logo_url)
        .bind(primary_color)
        .bind(secondary_color)
        .bind(address)
        .bind(phone_1)
        .bind(instagram)
        .bind(delivery_fee)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
