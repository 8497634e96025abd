//! Painel de status: requisições agrupadas por etapa do fluxo.

use serde::Serialize;

use super::request::CreditRequest;
use super::status::Status;
use crate::format::Centavos;

#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: Status,
    pub requests: Vec<CreditRequest>,
}

impl BoardColumn {
    pub fn count(&self) -> usize {
        self.requests.len()
    }

    /// Soma de `valor_total` das requisições da coluna.
    pub fn total(&self) -> Centavos {
        self.requests.iter().map(|r| r.valor_total).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBoard {
    pub columns: Vec<BoardColumn>,
}

impl StatusBoard {
    /// Uma coluna por status, na ordem do fluxo; análises mais recentes primeiro.
    pub fn build(requests: impl IntoIterator<Item = CreditRequest>) -> Self {
        let mut columns: Vec<BoardColumn> = Status::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                requests: Vec::new(),
            })
            .collect();

        for request in requests {
            if let Some(column) = columns.iter_mut().find(|c| c.status == request.status) {
                column.requests.push(request);
            }
        }
        for column in &mut columns {
            column
                .requests
                .sort_by(|a, b| b.data_analise.cmp(&a.data_analise));
        }

        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.requests.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Cpf;
    use crate::workflow::LeaseValues;
    use chrono::{Duration, Utc};

    fn column(board: &StatusBoard, status: Status) -> Option<&BoardColumn> {
        board.columns.iter().find(|c| c.status == status)
    }

    fn request(nome: &str, status: Status, age_days: i64, aluguel: i64) -> CreditRequest {
        let mut req = CreditRequest::new(
            nome.into(),
            Cpf::parse("12345678909").unwrap(),
            LeaseValues {
                aluguel: Centavos(aluguel),
                condominio: Centavos::ZERO,
                seguro: Centavos::ZERO,
            },
            status != Status::Reprovado,
        )
        .unwrap();
        req.status = status;
        req.data_analise = Utc::now() - Duration::days(age_days);
        req
    }

    #[test]
    fn columns_follow_workflow_order() {
        let board = StatusBoard::build(Vec::new());
        let order: Vec<Status> = board.columns.iter().map(|c| c.status).collect();
        assert_eq!(order, Status::ALL.to_vec());
        assert!(board.is_empty());
    }

    #[test]
    fn requests_grouped_and_sorted() {
        let board = StatusBoard::build(vec![
            request("a", Status::Aprovado, 3, 100_000),
            request("b", Status::Aprovado, 1, 50_000),
            request("c", Status::Regular, 0, 70_000),
        ]);

        let aprovado = column(&board, Status::Aprovado).unwrap();
        assert_eq!(aprovado.count(), 2);
        assert_eq!(aprovado.requests[0].nome, "b");
        assert_eq!(aprovado.total(), Centavos(150_000));

        assert_eq!(column(&board, Status::Regular).unwrap().count(), 1);
        assert_eq!(column(&board, Status::Cancelado).unwrap().count(), 0);
        assert!(!board.is_empty());
    }
}
