//! Identidade do operador que executa ações administrativas.
//!
//! A autenticação em si é feita fora desta ferramenta; aqui só existe o
//! operador já identificado, passado explicitamente para os serviços.

use crate::config::CreditoConfig;
use crate::error::{CreditoError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub operator: String,
}

impl Session {
    pub fn new(operator: impl Into<String>) -> Result<Self> {
        let operator = operator.into();
        if operator.trim().is_empty() {
            return Err(CreditoError::NotAuthenticated);
        }
        Ok(Self {
            operator: operator.trim().to_string(),
        })
    }

    /// Sessão do operador configurado; falha se nenhum estiver definido.
    pub fn from_config(config: &CreditoConfig) -> Result<Self> {
        match config.operator.as_deref() {
            Some(op) => Self::new(op),
            None => Err(CreditoError::NotAuthenticated),
        }
    }
}
