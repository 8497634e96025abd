use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::EmailError;

/// Corpo aceito pelo relay de email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl EmailMessage {
    pub fn html(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: None,
            html: Some(html.into()),
        }
    }

    /// Exige destinatário, assunto e ao menos um corpo (texto ou html).
    pub fn validate(&self) -> Result<(), EmailError> {
        let blank = |s: &Option<String>| s.as_deref().is_none_or(|v| v.trim().is_empty());
        if self.to.trim().is_empty()
            || self.subject.trim().is_empty()
            || (blank(&self.text) && blank(&self.html))
        {
            return Err(EmailError::MissingFields);
        }
        Ok(())
    }
}

/// Resposta de sucesso do relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    #[serde(default)]
    pub message_id: Option<String>,
}

pub trait Mailer {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, EmailError>;
}

pub struct EmailClient {
    client: Client,
    url: String,
}

impl EmailClient {
    pub fn new(url: String) -> Result<Self, EmailError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, url })
    }
}

impl Mailer for EmailClient {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, EmailError> {
        message.validate()?;

        let response = self.client.post(&self.url).json(message).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(EmailError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        let receipt = response.json::<SendReceipt>().await?;
        debug!(message_id = ?receipt.message_id, "email enviado");
        Ok(receipt)
    }
}
