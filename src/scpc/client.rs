use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::ScpcError;
use super::types::{ConsultaRequest, Contract};
use crate::format::Cpf;

pub const API_URL: &str = "https://api.scpc.inf.br/consulta";

/// Consulta de crédito por CPF.
///
/// Implementado por [`ScpcClient`]; os testes usam implementações em memória.
pub trait CreditBureau {
    async fn consultar(&self, cpf: &Cpf) -> Result<Value, ScpcError>;
}

pub struct ScpcClient {
    usuario: String,
    senha: String,
    contract: Contract,
    client: Client,
    base_url: String,
}

impl ScpcClient {
    /// `base_url` vem da configuração; o padrão é [`API_URL`].
    pub fn with_base_url(
        usuario: String,
        senha: String,
        contract: Contract,
        base_url: String,
    ) -> Result<Self, ScpcError> {
        if usuario.is_empty() || senha.is_empty() {
            return Err(ScpcError::MissingCredentials);
        }
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            usuario,
            senha,
            contract,
            client,
            base_url,
        })
    }
}

impl CreditBureau for ScpcClient {
    async fn consultar(&self, cpf: &Cpf) -> Result<Value, ScpcError> {
        let body = ConsultaRequest::new(&self.contract, cpf);
        info!(cpf = %cpf, "consultando SCPC");

        let response = self
            .client
            .post(&self.base_url)
            .basic_auth(&self.usuario, Some(&self.senha))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "resposta SCPC");

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(status = status.as_u16(), %message, "erro da API SCPC");
            return Err(ScpcError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data = response.json::<Value>().await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn contract() -> Contract {
        Contract {
            regional: 1,
            codigo: 2,
            senha_sistema: "s".into(),
        }
    }

    fn cpf() -> Cpf {
        Cpf::parse("01234567890").unwrap()
    }

    #[test]
    fn missing_credentials_rejected() {
        let result =
            ScpcClient::with_base_url(String::new(), "x".into(), contract(), API_URL.into());
        assert!(matches!(result, Err(ScpcError::MissingCredentials)));
    }

    #[tokio::test]
    async fn consultar_posts_basic_auth_and_cpf() {
        let server = MockServer::start().await;
        // "user:pass" em base64
        Mock::given(method("POST"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(body_partial_json(json!({
                "SPCA-XML": { "SOLICITACAO": { "S-CPF": "01234567890", "S-CONSULTA": 353 } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "SPCA-XML": { "RESPOSTA": { "NUMERO-RESPOSTA": "42" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            ScpcClient::with_base_url("user".into(), "pass".into(), contract(), server.uri())
                .unwrap();
        let data = client.consultar(&cpf()).await.unwrap();
        assert_eq!(data["SPCA-XML"]["RESPOSTA"]["NUMERO-RESPOSTA"], "42");
    }

    #[tokio::test]
    async fn consultar_maps_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("indisponível"))
            .mount(&server)
            .await;

        let client =
            ScpcClient::with_base_url("user".into(), "pass".into(), contract(), server.uri())
                .unwrap();
        let err = client.consultar(&cpf()).await.unwrap_err();
        match err {
            ScpcError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "indisponível");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
