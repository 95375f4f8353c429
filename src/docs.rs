// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Catalog ---
        handlers::catalog::list_categories,
        handlers::catalog::create_category,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::create_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,
        handlers::catalog::create_option,
        handlers::catalog::add_option_value,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_or_get_orders,
        handlers::orders::update_status,
        handlers::orders::update_order,
        handlers::orders::delete_order,

        // --- Kitchen ---
        handlers::kitchen::list_kitchen_orders,

        // --- Restaurants ---
        handlers::restaurants::get_by_slug,
        handlers::restaurants::get_settings,
        handlers::restaurants::update_settings,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            handlers::auth::RegisterPayload,
            handlers::auth::LoginPayload,

            // --- Catalog ---
            models::catalog::Category,
            models::catalog::Product,
            models::catalog::OptionType,
            models::catalog::ProductOption,
            models::catalog::ProductOptionValue,
            models::catalog::SelectedOption,
            handlers::catalog::CreateCategoryPayload,
            handlers::catalog::ProductPayload,
            handlers::catalog::ProductDetailResponse,
            handlers::catalog::CreateOptionPayload,
            handlers::catalog::OptionValuePayload,

            // --- Orders ---
            models::orders::PaymentMethod,
            models::orders::OrderStatus,
            models::orders::Order,
            models::orders::OrderItem,
            models::orders::OrderItemOption,
            models::orders::OrderStatusHistory,
            models::orders::OrderItemDetail,
            models::orders::OrderDetail,
            models::orders::KitchenOrder,
            models::orders::SelectedOptionPayload,
            models::orders::OrderItemPayload,
            models::orders::CreateOrderPayload,
            models::orders::UpdateStatusPayload,
            models::orders::UpdateOrderPayload,

            // --- SLA ---
            services::sla::SlaLevel,
            services::sla::SlaState,

            // --- Restaurants ---
            models::settings::RestaurantSettings,
            handlers::restaurants::UpdateSettingsPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Registro e login do painel admin"),
        (name = "Catalog", description = "Cardápio: categorias, produtos e opções"),
        (name = "Orders", description = "Checkout e ciclo de vida do pedido"),
        (name = "Kitchen", description = "Fila da cozinha com SLA"),
        (name = "Restaurants", description = "Configurações públicas e do painel")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn with_security() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(components) = doc.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
        doc
    }
}
