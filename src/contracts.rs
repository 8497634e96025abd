//! Contratos assinados a partir de requisições de crédito.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CreditoError, Result};
use crate::format::{Centavos, Cpf};
use crate::storage::Store;
use crate::workflow::CreditRequest;

/// Contrato em vigor; o id é o mesmo da requisição de origem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveContract {
    pub id: String,
    pub cpf: Cpf,
    pub valor_assegurado: Centavos,
    pub data_assinatura: DateTime<Utc>,
}

impl ActiveContract {
    fn from_request(request: &CreditRequest, data_assinatura: DateTime<Utc>) -> Self {
        Self {
            id: request.id.clone(),
            cpf: request.cpf.clone(),
            valor_assegurado: request.valor_total,
            data_assinatura,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractSummary {
    pub count: usize,
    pub valor_total_assegurado: Centavos,
}

impl ContractSummary {
    pub fn of(contracts: &[ActiveContract]) -> Self {
        Self {
            count: contracts.len(),
            valor_total_assegurado: contracts.iter().map(|c| c.valor_assegurado).sum(),
        }
    }
}

/// Registra se o contrato da requisição `id` foi assinado.
///
/// A resposta é definitiva: uma requisição já marcada não pode ser
/// marcada de novo. Quando assinado, cria o [`ActiveContract`].
pub fn mark_signed(store: &Store, id: &str, assinado: bool) -> Result<Option<ActiveContract>> {
    let mut request = store.get_request(id)?;
    if request.contrato_assinado.is_some() {
        return Err(CreditoError::ContractAlreadyDecided(id.to_string()));
    }

    let now = Utc::now();
    // O contrato é gravado antes da requisição: se a gravação falhar, a
    // requisição continua em aberto e a resposta pode ser repetida.
    let contract = assinado.then(|| ActiveContract::from_request(&request, now));
    if let Some(contract) = &contract {
        store.save_contract(contract)?;
    }

    request.contrato_assinado = Some(assinado);
    request.data_assinatura = assinado.then_some(now);
    store.update_request(&request)?;

    match &contract {
        Some(c) => info!(id, valor = %c.valor_assegurado, "contrato ativo registrado"),
        None => info!(id, "contrato não assinado"),
    }
    Ok(contract)
}
