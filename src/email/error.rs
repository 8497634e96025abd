use thiserror::Error;

/// Erros do envio de email pelo relay HTTP.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Mensagem sem destinatário, assunto ou corpo.
    #[error("Campos obrigatórios: to, subject, e (text ou html)")]
    MissingFields,

    #[error("relay returned status {status}: {message}")]
    Relay { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
