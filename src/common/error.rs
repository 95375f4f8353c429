use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::orders::OrderStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Carrinho vazio")]
    EmptyCart,

    // Os produtos enviados no checkout não existem no catálogo
    #[error("Nenhum produto encontrado")]
    NoProductsFound,

    // Isolamento de tenant: carrinho mistura produtos de donos diferentes
    #[error("Produtos de restaurantes diferentes no mesmo pedido")]
    MixedRestaurants,

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    // Grupo obrigatório sem valor disponível nunca seria satisfeito no checkout
    #[error("Grupo de opções obrigatório sem valor disponível")]
    RequiredOptionNeedsValue,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::ResourceNotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado.", resource))
            }
            AppError::EmptyCart => (
                StatusCode::BAD_REQUEST,
                "O carrinho está vazio. Adicione produtos antes de finalizar.".to_string(),
            ),
            AppError::NoProductsFound => (
                StatusCode::BAD_REQUEST,
                "Nenhum produto do pedido foi encontrado no cardápio.".to_string(),
            ),
            AppError::MixedRestaurants => (
                StatusCode::BAD_REQUEST,
                "Os produtos selecionados são de restaurantes diferentes. \
                 Por favor, faça pedidos separados."
                    .to_string(),
            ),
            AppError::InvalidTransition { from, to } => (
                StatusCode::BAD_REQUEST,
                format!("Não é possível mudar o pedido de '{}' para '{}'.", from, to),
            ),
            AppError::RequiredOptionNeedsValue => (
                StatusCode::BAD_REQUEST,
                "Um grupo de opções obrigatório precisa de pelo menos um valor disponível."
                    .to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
