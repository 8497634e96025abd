//! Modelos de email enviados após o preenchimento do formulário público.

use super::client::EmailMessage;
use crate::format::{Centavos, format_decimal};

/// Escapa texto digitado pelo usuário antes de entrar no HTML.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Confirmação de recebimento para o inquilino.
pub fn tenant_confirmation(to: &str, nome: &str, renda: Centavos) -> EmailMessage {
    let nome = escape_html(nome);
    let html = format!(
        "<h2>Olá {nome}!</h2>\
         <p>Recebemos seu formulário de análise de crédito com sucesso.</p>\
         <p>Entraremos em contato em breve com o resultado da análise.</p>\
         <br>\
         <p><strong>Dados enviados:</strong></p>\
         <ul>\
         <li>Nome: {nome}</li>\
         <li>Renda Mensal: R$ {renda}</li>\
         </ul>\
         <br>\
         <p>Atenciosamente,<br>Equipe de Análise de Crédito</p>",
        renda = format_decimal(renda)
    );
    EmailMessage::html(to, "Formulário Recebido - Análise de Crédito", html)
}

/// Aviso ao administrador de que um novo formulário chegou.
pub fn admin_notification(admin: &str, nome: &str, email: &str, renda: Centavos) -> EmailMessage {
    let subject = format!("Novo Formulário - {nome}");
    let nome = escape_html(nome);
    let email = escape_html(email);
    let html = format!(
        "<h2>Novo Formulário Recebido!</h2>\
         <p><strong>Nome:</strong> {nome}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Renda:</strong> R$ {renda}</p>\
         <br>\
         <p>Acesse o sistema para ver os detalhes completos.</p>",
        renda = format_decimal(renda)
    );
    EmailMessage::html(admin, subject, html)
}
