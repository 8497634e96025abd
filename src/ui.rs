//! Saída de terminal: spinner da consulta, painel e confirmações.
//!
//! Usa `indicatif` para o spinner de progresso e `console` para cores.

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::AnalysisOutcome;
use crate::contracts::{ActiveContract, ContractSummary};
use crate::format::{format_phone, mask_cpf};
use crate::forms::{FormRecord, Property};
use crate::scpc::{DecisionKind, ScoreModel};
use crate::workflow::{CreditRequest, Status, StatusBoard};

/// Spinner exibido enquanto o bureau responde.
pub struct BureauProgress {
    pb: ProgressBar,
}

impl BureauProgress {
    pub fn start(cpf: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Consultando SCPC para {}...", mask_cpf(cpf)));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

fn status_style(status: Status) -> Style {
    match status {
        Status::Reprovado => Style::new().red().bold(),
        Status::Aprovado => Style::new().green().bold(),
        Status::EmAndamento => Style::new().yellow().bold(),
        Status::Regular => Style::new().cyan().bold(),
        Status::Cancelado => Style::new().dim(),
    }
}

fn decision_style(kind: DecisionKind) -> (Style, &'static str) {
    match kind {
        DecisionKind::Aprovado => (Style::new().green().bold(), "✓"),
        DecisionKind::Cautela => (Style::new().yellow().bold(), "⚠"),
        DecisionKind::Reprovado => (Style::new().red().bold(), "✗"),
    }
}

fn print_model(icon: &str, model: &Option<ScoreModel>, field: &str) {
    if let Some(m) = model {
        println!(
            "  {icon} {}: {}",
            m.descricao.as_deref().unwrap_or(field),
            m.texto.as_deref().unwrap_or("-")
        );
        if let Some(p) = &m.probabilidade {
            println!("      Probabilidade: {p}");
        }
    }
}

/// Resultado da análise recém-concluída; `detalhes` inclui a resposta completa.
pub fn print_outcome(outcome: &AnalysisOutcome, detalhes: bool) {
    let (style, icon) = decision_style(outcome.report.decision());
    let req = &outcome.request;

    println!();
    println!(
        "  {} {}",
        style.apply_to(icon),
        style.apply_to(outcome.report.decision().headline())
    );
    println!("  Nome: {}", req.nome);
    println!("  CPF: {}", req.cpf);
    println!("  Valor total do imóvel: {}", req.valor_total);
    println!("  Renda média estimada: {}", outcome.renda_media);
    if let Some(texto) = outcome.report.decisao.as_ref().and_then(|d| d.texto.as_deref()) {
        println!("  {texto}");
    }
    println!();
    print_model("•", &outcome.report.score, "Score");
    print_model("•", &outcome.report.renda_presumida, "Renda presumida");
    print_model("•", &outcome.report.limite_parcela, "Limite de parcela");
    println!();
    println!(
        "  Requisição {} registrada como {}",
        req.id,
        status_style(req.status).apply_to(req.status.label())
    );

    if detalhes {
        println!();
        println!("{}", Style::new().dim().apply_to("─── Dados completos da API ───"));
        println!("{}", serde_json::to_string_pretty(&outcome.raw).unwrap_or_default());
    }
}

fn print_request_line(req: &CreditRequest) {
    let manual = if req.is_manually_approved() { " (aprovação manual)" } else { "" };
    let contrato = match req.contrato_assinado {
        Some(true) => " [contrato assinado]",
        Some(false) => " [contrato não assinado]",
        None => "",
    };
    println!(
        "    {}  {}  {}  {}  {}{manual}{contrato}",
        req.id,
        req.nome,
        req.cpf,
        req.valor_total,
        req.data_analise.format("%d/%m/%Y %H:%M")
    );
}

/// Painel de status em colunas.
pub fn print_board(board: &StatusBoard) {
    if board.is_empty() {
        println!("Nenhuma requisição de crédito registrada ainda.");
        return;
    }
    for column in &board.columns {
        let style = status_style(column.status);
        println!(
            "{} ({}) — {}",
            style.apply_to(column.status.label().to_uppercase()),
            column.count(),
            column.total()
        );
        for req in &column.requests {
            print_request_line(req);
        }
        println!();
    }
}

pub fn print_contracts(contracts: &[ActiveContract]) {
    let summary = ContractSummary::of(contracts);
    let bold = Style::new().bold();
    println!(
        "{} {}",
        bold.apply_to("Valor total assegurado:"),
        summary.valor_total_assegurado
    );
    let label = if summary.count == 1 { "contrato ativo" } else { "contratos ativos" };
    println!("{} {label}", summary.count);
    if contracts.is_empty() {
        println!("Nenhum contrato ativo no momento.");
        return;
    }
    println!();
    for c in contracts {
        println!(
            "  {}  CPF: {}  Assinado em {}  {}",
            c.id,
            c.cpf,
            c.data_assinatura.format("%d/%m/%Y"),
            Style::new().green().apply_to(c.valor_assegurado)
        );
    }
}

pub fn print_property(property: &Property, link: &str, forms: &[FormRecord]) {
    println!("{}", Style::new().bold().apply_to(&property.endereco));
    println!("  id: {}", property.id);
    println!("  link público: {link}");
    println!();
    if forms.is_empty() {
        println!("  Nenhum formulário recebido.");
        return;
    }
    for f in forms {
        println!(
            "  {}  CPF {}  {}  {}  renda {}  {}",
            f.nome_completo,
            f.cpf,
            format_phone(&f.telefone),
            f.email,
            f.renda_mensal,
            f.created_at
                .with_timezone(&chrono::Local)
                .format("%d/%m/%Y %H:%M")
        );
    }
}

/// Pergunta sim/não no terminal; qualquer resposta diferente de "s" recusa.
pub fn confirm(prompt: &str) -> bool {
    let term = Term::stdout();
    if term.write_str(&format!("{prompt} [s/N] ")).is_err() {
        return false;
    }
    match term.read_line() {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y"),
        Err(_) => false,
    }
}

pub fn success(message: &str) {
    println!("  {} {message}", Style::new().green().bold().apply_to("✓"));
}

pub fn failure(message: &str) {
    eprintln!("  {} {message}", Style::new().red().bold().apply_to("✗"));
}
