use serde_json::Value;
use tracing::{info, warn};

use crate::error::{CreditoError, Result};
use crate::format::{self, Centavos, Cpf};
use crate::scpc::report::expand_embedded_json;
use crate::scpc::{BureauReport, CreditBureau};
use crate::session::Session;
use crate::storage::Store;
use crate::workflow::{CreditRequest, LeaseValues};

/// Campos digitados na tela de nova análise.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub cpf: String,
    pub aluguel: String,
    pub condominio: String,
    pub seguro: String,
}

impl AnalysisInput {
    /// Valida CPF e valores antes de qualquer chamada ao bureau.
    fn validate(&self) -> Result<(Cpf, LeaseValues)> {
        let cpf = Cpf::parse(&self.cpf)?;

        if [&self.aluguel, &self.condominio, &self.seguro]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(CreditoError::Validation(
                "Preencha todos os valores (aluguel, condomínio e seguro)".into(),
            ));
        }

        let valores = LeaseValues {
            aluguel: format::parse_money(&self.aluguel)?,
            condominio: format::parse_money(&self.condominio)?,
            seguro: format::parse_money(&self.seguro)?,
        };
        valores.total()?;
        Ok((cpf, valores))
    }
}

/// Resultado de uma análise concluída e gravada.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub request: CreditRequest,
    pub report: BureauReport,
    pub renda_media: Centavos,
    /// Resposta completa do bureau, já expandida.
    pub raw: Value,
}

/// Consulta o bureau e registra a requisição de crédito resultante.
pub struct CreditAnalysis<'a, B: CreditBureau> {
    pub bureau: &'a B,
    pub store: &'a Store,
}

impl<'a, B: CreditBureau> CreditAnalysis<'a, B> {
    pub fn new(bureau: &'a B, store: &'a Store) -> Self {
        Self { bureau, store }
    }

    pub async fn run(&self, session: &Session, input: &AnalysisInput) -> Result<AnalysisOutcome> {
        let (cpf, valores) = input.validate()?;

        let raw = expand_embedded_json(self.bureau.consultar(&cpf).await?);
        let report = BureauReport::extract(&raw)?;
        if report.decisao.is_none() {
            warn!(cpf = %cpf, "resposta sem DECISAO; tratando como reprovado");
        }

        let mut request = CreditRequest::new(report.nome.clone(), cpf, valores, report.aprovado())?;
        request.numero_resposta = report.numero_resposta.clone();
        request.dados_completos = Some(serde_json::to_string(&raw)?);
        request.analisado_por = Some(session.operator.clone());

        self.store.insert_request(&request)?;
        info!(
            id = %request.id,
            status = %request.status,
            decision = ?report.decision(),
            operator = %session.operator,
            "análise registrada"
        );

        Ok(AnalysisOutcome {
            renda_media: report.renda_media(),
            request,
            report,
            raw,
        })
    }
}
