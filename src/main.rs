//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa_swagger_ui::SwaggerUi;

mod cart;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Vitrine pública: cardápio, contexto de restaurante e checkout
    let storefront_routes = Router::new()
        .route("/categories", get(handlers::catalog::list_categories))
        .route("/products", get(handlers::catalog::list_products))
        .route("/products/{id}", get(handlers::catalog::get_product))
        .route("/restaurants/{slug}", get(handlers::restaurants::get_by_slug))
        .route(
            "/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_or_get_orders),
        );

    // Painel admin: gestão do cardápio, dos pedidos e das configurações
    let admin_routes = Router::new()
        .route("/categories", post(handlers::catalog::create_category))
        .route("/products", post(handlers::catalog::create_product))
        .route(
            "/products/{id}",
            put(handlers::catalog::update_product).delete(handlers::catalog::delete_product),
        )
        .route("/products/{id}/options", post(handlers::catalog::create_option))
        .route("/options/{id}/values", post(handlers::catalog::add_option_value))
        .route("/orders/{id}/status", patch(handlers::orders::update_status))
        .route(
            "/orders/{id}",
            put(handlers::orders::update_order).delete(handlers::orders::delete_order),
        )
        .route("/kitchen/orders", get(handlers::kitchen::list_kitchen_orders))
        .route(
            "/settings",
            get(handlers::restaurants::get_settings).put(handlers::restaurants::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api", storefront_routes)
        .nest("/api", admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::with_security()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener.local_addr().expect("endereço local indisponível")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
