//! Extração tipada da resposta do SCPC.
//!
//! A resposta chega como JSON com campos opcionais e, dependendo do proxy,
//! com objetos serializados dentro de strings. [`expand_embedded_json`]
//! desfaz essa codificação e [`BureauReport::extract`] localiza os campos
//! usados na análise.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::CreditoError;
use crate::format::Centavos;

/// Código do modelo "Score Positivo PF".
pub const SCORE_CODE: &str = "115";
/// Código do modelo "Renda Presumida".
pub const RENDA_PRESUMIDA_CODE: &str = "116";
/// Código do modelo "Limite de Parcela".
pub const LIMITE_PARCELA_CODE: &str = "109";

const NOME_PADRAO: &str = "Nome não informado";

static REAIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*([\d.]+)").expect("valid regex"));

/// Substitui recursivamente strings que contêm objetos ou arrays JSON
/// pelo valor decodificado.
///
/// Strings que decodificam para escalares (ex.: `"115"`) ficam como estão,
/// para que códigos numéricos continuem sendo texto.
pub fn expand_embedded_json(value: Value) -> Value {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(inner @ (Value::Object(_) | Value::Array(_))) => expand_embedded_json(inner),
            _ => Value::String(s),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(expand_embedded_json).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, expand_embedded_json(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Lê um campo como texto, aceitando números e booleanos.
fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Um modelo de classificação retornado em `SCORE-CLASSIFICACAO-VARIOS-MODELOS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreModel {
    pub codigo: Option<String>,
    pub descricao: Option<String>,
    pub probabilidade: Option<String>,
    pub texto: Option<String>,
}

impl ScoreModel {
    fn from_value(value: &Value) -> Self {
        Self {
            codigo: text(value, "CODIGONATUREZAMODELO"),
            descricao: text(value, "DESCRICAONATUREZA"),
            probabilidade: text(value, "PROBABILIDADE"),
            texto: text(value, "TEXTO"),
        }
    }
}

/// Decisão automática do bureau (`DECISAO.APROVA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionKind {
    /// `S`
    Aprovado,
    /// `C`: analisar com cautela; não conta como aprovação.
    Cautela,
    /// `N` ou qualquer outro valor.
    Reprovado,
}

impl DecisionKind {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "S" => DecisionKind::Aprovado,
            "C" => DecisionKind::Cautela,
            _ => DecisionKind::Reprovado,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            DecisionKind::Aprovado => "CRÉDITO APROVADO",
            DecisionKind::Cautela => "ANALISAR COM CAUTELA",
            DecisionKind::Reprovado => "CRÉDITO REPROVADO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BureauDecision {
    pub kind: DecisionKind,
    pub texto: Option<String>,
}

/// Campos da resposta do bureau usados na análise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BureauReport {
    pub nome: String,
    pub numero_resposta: String,
    pub score: Option<ScoreModel>,
    pub renda_presumida: Option<ScoreModel>,
    pub limite_parcela: Option<ScoreModel>,
    pub decisao: Option<BureauDecision>,
}

impl BureauReport {
    /// Extrai o relatório de uma resposta já expandida.
    ///
    /// Aceita a resposta direta da API ou o envelope `{"body": ...}` do proxy.
    pub fn extract(data: &Value) -> Result<Self, CreditoError> {
        let body = data.get("body").unwrap_or(data);
        if !body.is_object() {
            return Err(CreditoError::IncompleteReport(
                "resposta não é um objeto JSON".into(),
            ));
        }

        let resposta = body.get("SPCA-XML").and_then(|s| s.get("RESPOSTA"));
        let acerta = resposta.and_then(|r| r.get("ACERTA")).unwrap_or(body);

        let models: Vec<ScoreModel> = match acerta.get("SCORE-CLASSIFICACAO-VARIOS-MODELOS") {
            Some(Value::Array(items)) => items.iter().map(ScoreModel::from_value).collect(),
            Some(single @ Value::Object(_)) => vec![ScoreModel::from_value(single)],
            _ => Vec::new(),
        };
        let find = |code: &str| {
            models
                .iter()
                .find(|m| m.codigo.as_deref().map(str::trim) == Some(code))
                .cloned()
        };

        let nome = acerta
            .get("IDENTIFICACAO")
            .and_then(|i| text(i, "NOME"))
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| NOME_PADRAO.to_string());

        let numero_resposta = resposta
            .and_then(|r| text(r, "NUMERO-RESPOSTA"))
            .unwrap_or_default();

        let decisao = acerta.get("DECISAO").map(|d| BureauDecision {
            kind: DecisionKind::from_code(&text(d, "APROVA").unwrap_or_default()),
            texto: text(d, "TEXTO"),
        });

        Ok(Self {
            nome,
            numero_resposta,
            score: find(SCORE_CODE),
            renda_presumida: find(RENDA_PRESUMIDA_CODE),
            limite_parcela: find(LIMITE_PARCELA_CODE),
            decisao,
        })
    }

    /// Decisão do bureau; ausência de `DECISAO` conta como reprovação.
    pub fn decision(&self) -> DecisionKind {
        self.decisao
            .as_ref()
            .map(|d| d.kind)
            .unwrap_or(DecisionKind::Reprovado)
    }

    /// Somente `APROVA = S` aprova automaticamente.
    pub fn aprovado(&self) -> bool {
        self.decision() == DecisionKind::Aprovado
    }

    pub fn renda_media(&self) -> Centavos {
        average_income(
            self.renda_presumida
                .as_ref()
                .and_then(|m| m.texto.as_deref())
                .unwrap_or_default(),
        )
    }
}

/// Média de uma faixa de renda como `"De R$ 2.001 ate R$ 3.000"`.
///
/// Retorna zero se o texto não tiver exatamente dois valores.
pub fn average_income(texto: &str) -> Centavos {
    let values: Vec<i64> = REAIS_RE
        .captures_iter(texto)
        .filter_map(|c| crate::format::digits(&c[1]).parse::<i64>().ok())
        .collect();

    match values.as_slice() {
        [min, max] => min
            .checked_add(*max)
            .and_then(|sum| sum.checked_mul(50))
            .map_or(Centavos::ZERO, Centavos),
        _ => Centavos::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "SPCA-XML": {
                "RESPOSTA": {
                    "NUMERO-RESPOSTA": "987654",
                    "ACERTA": {
                        "IDENTIFICACAO": { "NOME": "MARIA DA SILVA" },
                        "SCORE-CLASSIFICACAO-VARIOS-MODELOS": [
                            {
                                "CODIGONATUREZAMODELO": "109",
                                "DESCRICAONATUREZA": "LIMITE DE PARCELA",
                                "TEXTO": "R$ 1.200"
                            },
                            {
                                "CODIGONATUREZAMODELO": "115",
                                "DESCRICAONATUREZA": "SCORE POSITIVO PF",
                                "PROBABILIDADE": "3,5%",
                                "TEXTO": "Baixo risco"
                            },
                            {
                                "CODIGONATUREZAMODELO": "116",
                                "DESCRICAONATUREZA": "RENDA PRESUMIDA",
                                "TEXTO": "De R$ 2.001 ate R$ 3.000"
                            }
                        ],
                        "DECISAO": { "APROVA": "S", "TEXTO": "Aprovar" }
                    }
                }
            }
        })
    }

    #[test]
    fn extract_reads_all_fields() {
        let report = BureauReport::extract(&sample_response()).unwrap();
        assert_eq!(report.nome, "MARIA DA SILVA");
        assert_eq!(report.numero_resposta, "987654");
        assert_eq!(report.score.as_ref().unwrap().probabilidade.as_deref(), Some("3,5%"));
        assert_eq!(
            report.limite_parcela.as_ref().unwrap().texto.as_deref(),
            Some("R$ 1.200")
        );
        assert_eq!(report.decision(), DecisionKind::Aprovado);
        assert!(report.aprovado());
    }

    #[test]
    fn lookup_is_order_independent() {
        let mut data = sample_response();
        let models = data["SPCA-XML"]["RESPOSTA"]["ACERTA"]["SCORE-CLASSIFICACAO-VARIOS-MODELOS"]
            .as_array_mut()
            .unwrap();
        models.reverse();
        let report = BureauReport::extract(&data).unwrap();
        assert_eq!(report.score.unwrap().codigo.as_deref(), Some("115"));
        assert_eq!(report.renda_presumida.unwrap().codigo.as_deref(), Some("116"));
    }

    #[test]
    fn numeric_codes_match() {
        let data = json!({
            "SCORE-CLASSIFICACAO-VARIOS-MODELOS": [{ "CODIGONATUREZAMODELO": 115, "TEXTO": "ok" }]
        });
        let report = BureauReport::extract(&data).unwrap();
        assert_eq!(report.score.unwrap().texto.as_deref(), Some("ok"));
    }

    #[test]
    fn missing_sections_degrade_gracefully() {
        let report = BureauReport::extract(&json!({})).unwrap();
        assert_eq!(report.nome, "Nome não informado");
        assert!(report.numero_resposta.is_empty());
        assert!(report.score.is_none());
        assert_eq!(report.decision(), DecisionKind::Reprovado);
        assert!(!report.aprovado());
        assert_eq!(report.renda_media(), Centavos::ZERO);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = BureauReport::extract(&json!("texto")).unwrap_err();
        assert!(matches!(err, CreditoError::IncompleteReport(_)));
    }

    #[test]
    fn cautela_is_not_approval() {
        let data = json!({ "DECISAO": { "APROVA": "C", "TEXTO": "Cautela" } });
        let report = BureauReport::extract(&data).unwrap();
        assert_eq!(report.decision(), DecisionKind::Cautela);
        assert!(!report.aprovado());
    }

    #[test]
    fn proxy_body_envelope_with_embedded_json() {
        let inner = serde_json::to_string(&sample_response()).unwrap();
        let wrapped = json!({ "statusCode": 200, "body": inner });
        let expanded = expand_embedded_json(wrapped);
        let report = BureauReport::extract(&expanded).unwrap();
        assert_eq!(report.nome, "MARIA DA SILVA");
        assert!(report.aprovado());
    }

    #[test]
    fn expand_keeps_scalar_strings() {
        let value = expand_embedded_json(json!({ "code": "115", "flag": "true", "nested": "[1,2]" }));
        assert_eq!(value["code"], "115");
        assert_eq!(value["flag"], "true");
        assert_eq!(value["nested"], json!([1, 2]));
    }

    #[test]
    fn average_income_of_range() {
        assert_eq!(average_income("De R$ 2.001 ate R$ 3.000"), Centavos(250_050));
        assert_eq!(average_income("Acima de R$ 10.000"), Centavos::ZERO);
        assert_eq!(average_income(""), Centavos::ZERO);
        assert_eq!(
            average_income("De R$ 9.000.000.000.000.000.000 ate R$ 9.000.000.000.000.000.000"),
            Centavos::ZERO
        );
    }

    #[test]
    fn report_renda_media_uses_presumed_income() {
        let report = BureauReport::extract(&sample_response()).unwrap();
        assert_eq!(report.renda_media(), Centavos(250_050));
    }
}
