//! Tipos de erro para o cliente do bureau de crédito (SCPC).
//!
//! Define [`ScpcError`] com variantes para credenciais ausentes, erros HTTP
//! retornados pela API e falhas de rede. Usa `thiserror` para derivar
//! `Display` e `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao consultar o bureau.
#[derive(Debug, Error)]
pub enum ScpcError {
    /// Usuário ou senha da API não configurados.
    #[error("Configuração da API incompleta: credenciais SCPC ausentes")]
    MissingCredentials,

    /// A API respondeu com status diferente de 2xx.
    /// Contém o código HTTP e o corpo textual da resposta.
    #[error("Erro ao consultar SCPC (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ScpcError::Api {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert_eq!(
            err.to_string(),
            "Erro ao consultar SCPC (status 401): Unauthorized"
        );
    }

    #[test]
    fn missing_credentials_display() {
        assert_eq!(
            ScpcError::MissingCredentials.to_string(),
            "Configuração da API incompleta: credenciais SCPC ausentes"
        );
    }
}
