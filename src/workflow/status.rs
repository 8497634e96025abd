use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status de uma requisição de crédito no painel.
///
/// O fluxo segue: REPROVADO → APROVADO → EM_ANDAMENTO → REGULAR,
/// com CANCELADO alcançável a partir de qualquer etapa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Reprovado,
    Aprovado,
    EmAndamento,
    Regular,
    Cancelado,
}

impl Status {
    /// Todos os status na ordem em que aparecem no painel.
    pub const ALL: [Status; 5] = [
        Status::Reprovado,
        Status::Aprovado,
        Status::EmAndamento,
        Status::Regular,
        Status::Cancelado,
    ];

    /// Identificador persistido (`em-andamento`, `regular`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Reprovado => "reprovado",
            Status::Aprovado => "aprovado",
            Status::EmAndamento => "em-andamento",
            Status::Regular => "regular",
            Status::Cancelado => "cancelado",
        }
    }

    /// Rótulo exibido ao usuário.
    pub fn label(self) -> &'static str {
        match self {
            Status::Reprovado => "Reprovado",
            Status::Aprovado => "Aprovado",
            Status::EmAndamento => "Em andamento",
            Status::Regular => "Regular",
            Status::Cancelado => "Cancelado",
        }
    }

    /// Status derivado da decisão automática do bureau.
    pub fn from_decision(aprovado: bool) -> Self {
        if aprovado {
            Status::Aprovado
        } else {
            Status::Reprovado
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                let valid: Vec<&str> = Status::ALL.iter().map(|s| s.as_str()).collect();
                format!("status desconhecido '{s}' (use: {})", valid.join(", "))
            })
    }
}

/// Próximos status permitidos a partir de `current`.
///
/// `Cancelado` aparece em toda linha exceto na própria; a regra universal
/// de cancelamento é aplicada separadamente em [`validate_transition`].
pub fn next_states(current: Status) -> &'static [Status] {
    match current {
        Status::Reprovado => &[Status::Aprovado, Status::Cancelado],
        Status::Aprovado => &[Status::EmAndamento, Status::Cancelado],
        Status::EmAndamento => &[Status::Regular, Status::Cancelado],
        Status::Regular => &[Status::Cancelado],
        Status::Cancelado => &[],
    }
}

/// Resultado da validação de uma mudança de status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCheck {
    pub valid: bool,
    /// Explicação para o usuário quando `valid` é falso.
    pub message: Option<String>,
}

impl TransitionCheck {
    pub fn allowed() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn illegal(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Decide se `current → proposed` é uma transição legal.
///
/// Função pura e total: não faz I/O e não altera a requisição. Chamadores
/// devem tratar `current == proposed` como no-op antes de chegar aqui.
pub fn validate_transition(current: Status, proposed: Status) -> TransitionCheck {
    if proposed == Status::Cancelado {
        return TransitionCheck::allowed();
    }

    if next_states(current).contains(&proposed) {
        return TransitionCheck::allowed();
    }

    let forward: Vec<&str> = next_states(current)
        .iter()
        .filter(|s| **s != Status::Cancelado)
        .map(|s| s.label())
        .collect();

    let attempted = format!(
        "Transição inválida: não é possível mover de \"{}\" para \"{}\".",
        current.label(),
        proposed.label()
    );

    if forward.is_empty() {
        TransitionCheck::illegal(format!(
            "{attempted} O status \"{}\" não possui próxima etapa, apenas o cancelamento.",
            current.label()
        ))
    } else {
        TransitionCheck::illegal(format!(
            "{attempted} Próximas etapas permitidas: {} (o cancelamento é sempre permitido).",
            forward.join(", ")
        ))
    }
}
