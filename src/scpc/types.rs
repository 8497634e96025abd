//! Corpo da requisição de consulta ao SCPC.
//!
//! Os nomes de campo seguem o formato `SPCA-XML` esperado pela API; cada
//! campo Rust é renomeado via `serde(rename)`.

use serde::{Deserialize, Serialize};

use crate::format::Cpf;

/// Versão do layout `SPCA-XML` aceita pela API.
pub const LAYOUT_VERSION: &str = "14042025";

/// Código do produto de consulta (score + renda presumida + decisão).
pub const CONSULTA_CODE: u32 = 353;

/// Identificação do sistema solicitante enviada em toda consulta.
pub const SOLICITANTE: &str = "Sistema CreditAnalysis";

/// Credenciais do contrato com o bureau, além do Basic auth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contract {
    pub regional: u32,
    pub codigo: u32,
    pub senha_sistema: String,
}

/// Envelope de nível superior: `{"SPCA-XML": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultaRequest {
    #[serde(rename = "SPCA-XML")]
    pub spca: SpcaEnvelope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpcaEnvelope {
    #[serde(rename = "VERSAO")]
    pub versao: String,
    #[serde(rename = "SOLICITACAO")]
    pub solicitacao: Solicitacao,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solicitacao {
    #[serde(rename = "S-REGIONAL")]
    pub regional: u32,
    #[serde(rename = "S-CODIGO")]
    pub codigo: u32,
    #[serde(rename = "S-SENHA")]
    pub senha: String,
    #[serde(rename = "S-CONSULTA")]
    pub consulta: u32,
    #[serde(rename = "S-SOLICITANTE")]
    pub solicitante: String,
    /// Enviado como string para preservar zeros à esquerda.
    #[serde(rename = "S-CPF")]
    pub cpf: String,
}

impl ConsultaRequest {
    pub fn new(contract: &Contract, cpf: &Cpf) -> Self {
        Self {
            spca: SpcaEnvelope {
                versao: LAYOUT_VERSION.to_string(),
                solicitacao: Solicitacao {
                    regional: contract.regional,
                    codigo: contract.codigo,
                    senha: contract.senha_sistema.clone(),
                    consulta: CONSULTA_CODE,
                    solicitante: SOLICITANTE.to_string(),
                    cpf: cpf.as_str().to_string(),
                },
            },
        }
    }
}
