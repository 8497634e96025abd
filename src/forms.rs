//! Imóveis e formulário público de interesse.
//!
//! O formulário não exige sessão: qualquer pessoa com o link do imóvel
//! pode enviar seus dados. Depois de gravado, o inquilino recebe uma
//! confirmação e o administrador um aviso; falhas de email não desfazem
//! o envio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::email::{Mailer, templates};
use crate::error::{CreditoError, Result};
use crate::format::{self, Centavos, Cpf};
use crate::storage::Store;

/// Um imóvel anunciado, dono de um link público de formulário.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub endereco: String,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(endereco: &str) -> Result<Self> {
        let endereco = endereco.trim();
        if endereco.is_empty() {
            return Err(CreditoError::Validation("endereço é obrigatório".into()));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            endereco: endereco.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// `<base>/preencher/<id>`
pub fn public_link(base_url: &str, property_id: &str) -> String {
    format!("{}/preencher/{property_id}", base_url.trim_end_matches('/'))
}

/// Dados como digitados no formulário, ainda com máscaras.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub nome_completo: String,
    pub cpf: String,
    pub telefone: String,
    pub renda_mensal: String,
    pub email: String,
}

/// Formulário gravado, com campos normalizados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: String,
    pub imovel_id: String,
    pub nome_completo: String,
    pub cpf: Cpf,
    /// Somente dígitos (10 ou 11).
    pub telefone: String,
    pub renda_mensal: Centavos,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl FormRecord {
    /// Remove máscaras e valida os campos do formulário.
    pub fn from_input(imovel_id: &str, input: &FormInput) -> Result<Self> {
        let nome = input.nome_completo.trim();
        if nome.is_empty() {
            return Err(CreditoError::Validation("nome completo é obrigatório".into()));
        }

        let email = input.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CreditoError::Validation(format!("email inválido: '{email}'")));
        }

        let telefone = format::digits(&input.telefone);
        if !(10..=11).contains(&telefone.len()) {
            return Err(CreditoError::Validation(
                "telefone deve ter 10 ou 11 dígitos".into(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            imovel_id: imovel_id.to_string(),
            nome_completo: nome.to_string(),
            cpf: Cpf::parse(&input.cpf)?,
            telefone,
            renda_mensal: format::parse_money(&input.renda_mensal)?,
            email: email.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Destino dos emails enviados após um formulário.
pub struct Notifier<'a, M: Mailer> {
    pub mailer: &'a M,
    pub admin_email: &'a str,
}

impl<M: Mailer> Notifier<'_, M> {
    /// Envia confirmação e aviso; erros só são registrados em log.
    async fn notify(&self, form: &FormRecord) -> usize {
        let messages = [
            templates::tenant_confirmation(&form.email, &form.nome_completo, form.renda_mensal),
            templates::admin_notification(
                self.admin_email,
                &form.nome_completo,
                &form.email,
                form.renda_mensal,
            ),
        ];

        let mut sent = 0;
        for message in &messages {
            match self.mailer.send(message).await {
                Ok(_) => sent += 1,
                Err(e) => warn!(to = %message.to, error = %e, "falha ao enviar email"),
            }
        }
        sent
    }
}

/// Resultado do envio de um formulário.
#[derive(Debug, Clone)]
pub struct Submission {
    pub form: FormRecord,
    pub emails_sent: usize,
}

/// Grava o formulário do imóvel `imovel_id` e dispara os emails.
pub async fn submit_form<M: Mailer>(
    store: &Store,
    notifier: Option<&Notifier<'_, M>>,
    imovel_id: &str,
    input: &FormInput,
) -> Result<Submission> {
    store.get_property(imovel_id)?;
    let form = FormRecord::from_input(imovel_id, input)?;
    store.insert_form(&form)?;
    info!(imovel_id, form_id = %form.id, "formulário recebido");

    let emails_sent = match notifier {
        Some(n) => n.notify(&form).await,
        None => {
            warn!("relay de email não configurado; nenhum aviso enviado");
            0
        }
    };

    Ok(Submission { form, emails_sent })
}
