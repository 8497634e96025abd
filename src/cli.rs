//! Interface de linha de comando baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] e flags globais
//! (--data-dir, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::workflow::Status;

/// Análise de crédito para locação: consulta ao bureau, painel e contratos.
#[derive(Debug, Parser)]
#[command(name = "analise-credito", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Diretório de dados (sobrescreve credito.toml e CREDITO_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Resposta à pergunta "contrato assinado?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resposta {
    Sim,
    Nao,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Consulta o CPF no bureau e registra a análise.
    Consultar {
        /// CPF do cliente, com ou sem máscara.
        #[arg(long)]
        cpf: String,
        /// Valor do aluguel (ex.: "2.500,00").
        #[arg(long)]
        aluguel: String,
        /// Valor do condomínio.
        #[arg(long)]
        condominio: String,
        /// Valor do seguro.
        #[arg(long)]
        seguro: String,
    },

    /// Mostra o painel de requisições agrupadas por status.
    Painel,

    /// Altera o status de uma requisição.
    Status {
        /// Id da requisição.
        id: String,
        /// Novo status (reprovado, aprovado, em-andamento, regular, cancelado).
        novo: Status,
        /// Confirma sem perguntar.
        #[arg(long, short)]
        sim: bool,
    },

    /// Verifica se uma transição de status é permitida, sem gravar nada.
    Validar {
        atual: Status,
        proposto: Status,
    },

    /// Registra se o contrato de uma requisição foi assinado.
    Contrato {
        id: String,
        #[arg(value_enum)]
        resposta: Resposta,
    },

    /// Lista os contratos ativos e o valor total assegurado.
    Contratos,

    /// Gerencia imóveis e seus formulários.
    Imovel {
        #[command(subcommand)]
        command: ImovelCommand,
    },

    /// Envia o formulário público de um imóvel (não exige operador).
    Formulario {
        /// Id do imóvel.
        imovel: String,
        #[arg(long)]
        nome: String,
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        telefone: String,
        /// Renda mensal (ex.: "4.500,00").
        #[arg(long)]
        renda: String,
        #[arg(long)]
        email: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ImovelCommand {
    /// Cadastra um imóvel e mostra o link público do formulário.
    Novo { endereco: String },
    /// Lista os imóveis cadastrados.
    Listar,
    /// Mostra um imóvel e os formulários recebidos.
    Ver { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_consultar() {
        let cli = Cli::parse_from([
            "analise-credito",
            "consultar",
            "--cpf",
            "123.456.789-09",
            "--aluguel",
            "2.000,00",
            "--condominio",
            "500,00",
            "--seguro",
            "50,00",
        ]);
        match cli.command {
            Command::Consultar { cpf, aluguel, .. } => {
                assert_eq!(cpf, "123.456.789-09");
                assert_eq!(aluguel, "2.000,00");
            }
            _ => panic!("expected Consultar command"),
        }
    }

    #[test]
    fn cli_parses_status_values() {
        let cli = Cli::parse_from(["analise-credito", "status", "abc", "em-andamento", "--sim"]);
        match cli.command {
            Command::Status { id, novo, sim } => {
                assert_eq!(id, "abc");
                assert_eq!(novo, Status::EmAndamento);
                assert!(sim);
            }
            _ => panic!("expected Status command"),
        }
    }

    #[test]
    fn cli_rejects_unknown_status() {
        let result = Cli::try_parse_from(["analise-credito", "status", "abc", "pendente"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["analise-credito", "--data-dir", "/tmp/x", "-v", "painel"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Command::Painel));
    }

    #[test]
    fn cli_parses_contrato_resposta() {
        let cli = Cli::parse_from(["analise-credito", "contrato", "abc", "nao"]);
        assert!(matches!(
            cli.command,
            Command::Contrato { resposta: Resposta::Nao, .. }
        ));
    }

    #[test]
    fn cli_parses_imovel_subcommand() {
        let cli = Cli::parse_from(["analise-credito", "imovel", "novo", "Rua A, 1"]);
        match cli.command {
            Command::Imovel {
                command: ImovelCommand::Novo { endereco },
            } => assert_eq!(endereco, "Rua A, 1"),
            _ => panic!("expected Imovel Novo"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
