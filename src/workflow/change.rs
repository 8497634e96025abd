//! Mudança de status validada pelo fluxo.
//!
//! [`change_status`] é o único caminho que altera o status de uma requisição
//! depois de criada. Ele consulta [`validate_transition`], pede confirmação
//! e só então grava, marcando `aprovacao_manual` quando um operador aprova
//! uma requisição reprovada pelo bureau.

use chrono::Utc;
use tracing::info;

use super::request::{CreditRequest, StatusEntry};
use super::status::{Status, validate_transition};
use crate::error::{CreditoError, Result};
use crate::session::Session;
use crate::storage::Store;

/// O que aconteceu com o pedido de mudança.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// O status proposto é o atual; nada foi gravado.
    Unchanged(Status),
    /// O operador não confirmou; nada foi gravado.
    Declined { from: Status, to: Status },
    Applied { from: Status, to: Status, manual_approval: bool },
}

/// Aplica `proposed` à requisição em memória, sem validar.
fn apply(request: &mut CreditRequest, proposed: Status, session: &Session) -> bool {
    let from = request.status;
    let manual_approval = from == Status::Reprovado && proposed == Status::Aprovado;
    if manual_approval {
        request.aprovacao_manual = Some(true);
    }
    request.historico.push(StatusEntry {
        de: from,
        para: proposed,
        por: session.operator.clone(),
        em: Utc::now(),
    });
    request.status = proposed;
    manual_approval
}

/// Valida, confirma e grava a mudança de status da requisição `id`.
///
/// `confirm` recebe a requisição atual e o status proposto e só é chamado
/// quando a transição é legal.
pub fn change_status<F>(
    store: &Store,
    session: &Session,
    id: &str,
    proposed: Status,
    confirm: F,
) -> Result<StatusChange>
where
    F: FnOnce(&CreditRequest, Status) -> bool,
{
    let mut request = store.get_request(id)?;
    let from = request.status;

    if from == proposed {
        return Ok(StatusChange::Unchanged(from));
    }

    let check = validate_transition(from, proposed);
    if !check.valid {
        return Err(CreditoError::IllegalTransition(
            check.message.unwrap_or_default(),
        ));
    }

    if !confirm(&request, proposed) {
        return Ok(StatusChange::Declined { from, to: proposed });
    }

    let manual_approval = apply(&mut request, proposed, session);
    store.update_request(&request)?;
    info!(
        id,
        from = %from,
        to = %proposed,
        manual_approval,
        operator = %session.operator,
        "status atualizado"
    );

    Ok(StatusChange::Applied {
        from,
        to: proposed,
        manual_approval,
    })
}
