// src/services/catalog_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, SettingsRepository},
    models::catalog::{Category, OptionType, Product, ProductOption, ProductOptionValue},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    settings_repo: SettingsRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository, settings_repo: SettingsRepository) -> Self {
        Self { repo, settings_repo }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.repo.list_categories().await
    }

    pub async fn create_category(
        &self,
        name: &str,
        image: Option<&str>,
        display_order: i32,
    ) -> Result<Category, AppError> {
        self.repo.create_category(name, image, display_order).await
    }

    // Vitrine: aceita o slug do restaurante (contexto salvo no cliente) e o
    // traduz para o tenant antes de filtrar.
    pub async fn list_storefront_products(
        &self,
        category_id: Option<Uuid>,
        restaurant_slug: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        let restaurant_id = match restaurant_slug {
            Some(slug) => {
                let settings = self
                    .settings_repo
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| AppError::ResourceNotFound("Restaurante".to_string()))?;
                Some(settings.restaurant_id)
            }
            None => None,
        };

        self.repo.list_available_products(category_id, restaurant_id).await
    }

    /// Produto com seus grupos de opções e valores, para o modal da vitrine.
    pub async fn get_product_detail(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_product(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Produto".to_string()))
    }

    pub async fn get_product_options(&self, id: Uuid) -> Result<Vec<ProductOption>, AppError> {
        let mut options = self.repo.list_options(id).await?;
        let values = self.repo.list_option_values(id).await?;

        for option in options.iter_mut() {
            option.values = values
                .iter()
                .filter(|value| value.option_id == option.id)
                .cloned()
                .collect();
        }

        Ok(options)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        restaurant_id: Uuid,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        image: Option<&str>,
        category_id: Option<Uuid>,
        available: bool,
    ) -> Result<Product, AppError> {
        self.repo
            .create_product(name, description, price, image, category_id, available, restaurant_id)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        restaurant_id: Uuid,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        image: Option<&str>,
        category_id: Option<Uuid>,
        available: bool,
    ) -> Result<Product, AppError> {
        self.repo
            .update_product(id, restaurant_id, name, description, price, image, category_id, available)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Produto".to_string()))
    }

    pub async fn delete_product(&self, restaurant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_product(id, restaurant_id).await?;
        if !deleted {
            return Err(AppError::ResourceNotFound("Produto".to_string()));
        }
        Ok(())
    }

    /// Cria um grupo de opções com seus valores. O produto precisa pertencer
    /// ao restaurante autenticado.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_option_group(
        &self,
        restaurant_id: Uuid,
        product_id: Uuid,
        name: &str,
        option_type: OptionType,
        required: bool,
        display_order: i32,
        values: &[(String, Decimal, i32, bool)],
    ) -> Result<ProductOption, AppError> {
        let product = self
            .repo
            .find_product(product_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Produto".to_string()))?;

        if !product.owned_by(restaurant_id) {
            return Err(AppError::ResourceNotFound("Produto".to_string()));
        }

        if required && !values.iter().any(|(_, _, _, available)| *available) {
            return Err(AppError::RequiredOptionNeedsValue);
        }

        let mut option = self
            .repo
            .create_option(product_id, name, option_type, required, display_order)
            .await?;

        for (value_name, price_modifier, value_order, available) in values {
            let value = self
                .repo
                .create_option_value(option.id, value_name, *price_modifier, *value_order, *available)
                .await?;
            option.values.push(value);
        }

        Ok(option)
    }

    /// Adiciona um valor a um grupo existente. O grupo precisa pertencer a um
    /// produto do restaurante autenticado.
    pub async fn add_option_value(
        &self,
        restaurant_id: Uuid,
        option_id: Uuid,
        name: &str,
        price_modifier: Decimal,
        display_order: i32,
        available: bool,
    ) -> Result<ProductOptionValue, AppError> {
        let option = self
            .repo
            .find_option(option_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Grupo de opções".to_string()))?;

        let product = self
            .repo
            .find_product(option.product_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Grupo de opções".to_string()))?;

        if !product.owned_by(restaurant_id) {
            return Err(AppError::ResourceNotFound("Grupo de opções".to_string()));
        }

        self.repo
            .create_option_value(option_id, name, price_modifier, display_order, available)
            .await
    }
}
