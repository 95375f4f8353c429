// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, OrderRepository, SettingsRepository, UserRepository},
    services::{auth::AuthService, catalog_service::CatalogService, order_service::OrderService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub order_service: OrderService,
    pub settings_repo: SettingsRepository,
}

impl AppState {
    // Carrega as configurações do ambiente e monta o grafo de dependências
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let catalog_service = CatalogService::new(catalog_repo.clone(), settings_repo.clone());
        let order_service = OrderService::new(order_repo, catalog_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            catalog_service,
            order_service,
            settings_repo,
        })
    }
}
