use thiserror::Error;

use crate::email::EmailError;
use crate::scpc::ScpcError;

pub type Result<T> = std::result::Result<T, CreditoError>;

#[derive(Debug, Error)]
pub enum CreditoError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Nenhum operador autenticado. Defina `operator` em credito.toml ou CREDITO_OPERADOR.")]
    NotAuthenticated,

    #[error("Dados inválidos: {0}")]
    Validation(String),

    #[error("Requisição não encontrada: {0}")]
    RequestNotFound(String),

    #[error("Imóvel não encontrado: {0}")]
    PropertyNotFound(String),

    /// Mudança de status recusada pelo validador do fluxo; a mensagem é exibida como está.
    #[error("{0}")]
    IllegalTransition(String),

    #[error("Contrato já registrado para a requisição {0}")]
    ContractAlreadyDecided(String),

    #[error("Resposta do bureau incompleta: {0}")]
    IncompleteReport(String),

    #[error("SCPC error: {0}")]
    Scpc(#[from] ScpcError),

    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
