use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::Status;
use crate::error::{CreditoError, Result};
use crate::format::{Centavos, Cpf};

/// Valores mensais do imóvel informados na análise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseValues {
    pub aluguel: Centavos,
    pub condominio: Centavos,
    pub seguro: Centavos,
}

impl LeaseValues {
    /// Soma de aluguel, condomínio e seguro.
    pub fn total(&self) -> Result<Centavos> {
        self.aluguel
            .checked_add(self.condominio)
            .and_then(|t| t.checked_add(self.seguro))
            .ok_or_else(|| CreditoError::Validation("valor total do imóvel excede o limite".into()))
    }
}

/// Registro de uma mudança de status aplicada manualmente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub de: Status,
    pub para: Status,
    pub por: String,
    pub em: DateTime<Utc>,
}

/// Uma requisição de crédito criada a partir de uma consulta ao bureau.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRequest {
    pub id: String,
    pub nome: String,
    pub cpf: Cpf,
    #[serde(flatten)]
    pub valores: LeaseValues,
    pub valor_total: Centavos,
    /// Decisão automática do bureau; não muda depois de criada.
    pub aprovado: bool,
    /// Marcado quando um operador aprova manualmente uma requisição reprovada.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aprovacao_manual: Option<bool>,
    pub status: Status,
    #[serde(default)]
    pub numero_resposta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dados_completos: Option<String>,
    pub data_analise: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analisado_por: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrato_assinado: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_assinatura: Option<DateTime<Utc>>,
    #[serde(default)]
    pub historico: Vec<StatusEntry>,
}

impl CreditRequest {
    /// Cria a requisição com o status derivado da decisão do bureau.
    pub fn new(nome: String, cpf: Cpf, valores: LeaseValues, aprovado: bool) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            nome,
            cpf,
            valores,
            valor_total: valores.total()?,
            aprovado,
            aprovacao_manual: None,
            status: Status::from_decision(aprovado),
            numero_resposta: String::new(),
            dados_completos: None,
            data_analise: Utc::now(),
            analisado_por: None,
            contrato_assinado: None,
            data_assinatura: None,
            historico: Vec::new(),
        })
    }

    pub fn is_manually_approved(&self) -> bool {
        self.aprovacao_manual.unwrap_or(false)
    }
}
