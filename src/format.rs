//! Máscaras de campos (CPF, telefone) e valores monetários em reais.
//!
//! Valores em dinheiro são guardados como centavos inteiros ([`Centavos`])
//! para evitar arredondamento de ponto flutuante. As máscaras "progressivas"
//! formatam entradas parciais enquanto o usuário digita; as funções
//! `format_*` formatam valores já armazenados para exibição.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::CreditoError;

/// Remove tudo que não é dígito ASCII.
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CPF normalizado: exatamente 11 dígitos, zeros à esquerda preservados.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Aceita CPF com ou sem máscara.
    pub fn parse(input: &str) -> Result<Self, CreditoError> {
        let d = digits(input);
        if d.len() != 11 {
            return Err(CreditoError::Validation("CPF deve ter 11 dígitos".into()));
        }
        Ok(Self(d))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `000.000.000-00`
    pub fn formatted(&self) -> String {
        format_cpf(&self.0)
    }
}

impl TryFrom<String> for Cpf {
    type Error = CreditoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cpf::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Máscara progressiva de CPF para entrada digitada.
pub fn mask_cpf(input: &str) -> String {
    let d: String = digits(input).chars().take(11).collect();
    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
    }
}

/// Formata um CPF armazenado; entradas que não têm 11 dígitos voltam intactas.
pub fn format_cpf(cpf: &str) -> String {
    if cpf.len() != 11 || !cpf.chars().all(|c| c.is_ascii_digit()) {
        return cpf.to_string();
    }
    format!("{}.{}.{}-{}", &cpf[..3], &cpf[3..6], &cpf[6..9], &cpf[9..])
}

/// Máscara progressiva de telefone: `(00) 00000-0000`.
pub fn mask_phone(input: &str) -> String {
    let d: String = digits(input).chars().take(11).collect();
    if d.len() <= 2 {
        return d;
    }
    let (ddd, rest) = d.split_at(2);
    if rest.len() <= 5 {
        format!("({ddd}) {rest}")
    } else {
        format!("({ddd}) {}-{}", &rest[..5], &rest[5..])
    }
}

/// Formata um telefone armazenado: fixo (10 dígitos) ou celular (11).
pub fn format_phone(phone: &str) -> String {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return phone.to_string();
    }
    match phone.len() {
        10 => format!("({}) {}-{}", &phone[..2], &phone[2..6], &phone[6..]),
        11 => mask_phone(phone),
        _ => phone.to_string(),
    }
}

/// Quantia em centavos de real.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centavos(pub i64);

impl Centavos {
    pub const ZERO: Centavos = Centavos(0);

    pub fn checked_add(self, rhs: Self) -> Option<Centavos> {
        self.0.checked_add(rhs.0).map(Centavos)
    }
}

/// Soma para totais de exibição; satura em vez de estourar.
impl Add for Centavos {
    type Output = Centavos;

    fn add(self, rhs: Self) -> Self::Output {
        Centavos(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Centavos {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Centavos::ZERO, Add::add)
    }
}

impl fmt::Display for Centavos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_brl(*self))
    }
}

/// Lê um valor digitado (com ou sem máscara) como centavos.
///
/// `"R$ 1.234,56"` → `123456`. Segue a mesma regra da máscara de entrada:
/// todos os dígitos são lidos e os dois últimos são os centavos.
pub fn parse_money(input: &str) -> Result<Centavos, CreditoError> {
    let d = digits(input);
    if d.is_empty() {
        return Err(CreditoError::Validation(format!(
            "valor monetário vazio ou inválido: '{input}'"
        )));
    }
    d.parse::<i64>()
        .map(Centavos)
        .map_err(|_| CreditoError::Validation(format!("valor monetário muito grande: '{input}'")))
}

/// `1.234,56`
pub fn format_decimal(value: Centavos) -> String {
    let negative = value.0 < 0;
    let abs = value.0.unsigned_abs();
    let reais = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, c) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{cents:02}")
}

/// `R$ 1.234,56`
pub fn format_brl(value: Centavos) -> String {
    format!("R$ {}", format_decimal(value))
}
