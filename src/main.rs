mod analysis;
mod cli;
mod config;
mod contracts;
mod email;
mod error;
mod format;
mod forms;
mod logging;
mod scpc;
mod session;
mod storage;
mod ui;
mod workflow;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ImovelCommand, Resposta};

use analysis::{AnalysisInput, CreditAnalysis};
use config::CreditoConfig;
use email::EmailClient;
use error::CreditoError;
use forms::{FormInput, Notifier, Property};
use scpc::ScpcClient;
use session::Session;
use storage::Store;
use workflow::{StatusBoard, StatusChange, validate_transition};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        ui::failure(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    let mut config = CreditoConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Command::Validar { atual, proposto } => {
            if atual == proposto {
                println!("Nenhuma mudança: o status já é \"{}\".", atual.label());
                return Ok(());
            }
            let check = validate_transition(atual, proposto);
            match check.message {
                None => ui::success(&format!("{} → {} permitido", atual.label(), proposto.label())),
                Some(msg) => return Err(CreditoError::IllegalTransition(msg).into()),
            }
        }

        Command::Consultar {
            cpf,
            aluguel,
            condominio,
            seguro,
        } => {
            let session = Session::from_config(&config)?;
            let store = Store::open(&config.data_dir)?;
            let bureau = ScpcClient::with_base_url(
                config.scpc.usuario.clone(),
                config.scpc.senha.clone(),
                config.scpc.contract(),
                config.scpc.url.clone(),
            )?;
            let input = AnalysisInput {
                cpf,
                aluguel,
                condominio,
                seguro,
            };

            let progress = ui::BureauProgress::start(&input.cpf);
            let outcome = CreditAnalysis::new(&bureau, &store).run(&session, &input).await;
            progress.finish();
            ui::print_outcome(&outcome?, verbose);
        }

        Command::Painel => {
            Session::from_config(&config)?;
            let store = Store::open(&config.data_dir)?;
            ui::print_board(&StatusBoard::build(store.list_requests()?));
        }

        Command::Status { id, novo, sim } => {
            let session = Session::from_config(&config)?;
            let store = Store::open(&config.data_dir)?;
            let change = workflow::change_status(&store, &session, &id, novo, |req, to| {
                sim || ui::confirm(&format!(
                    "Mover {} de \"{}\" para \"{}\"?",
                    req.nome,
                    req.status.label(),
                    to.label()
                ))
            })?;
            match change {
                StatusChange::Unchanged(s) => {
                    println!("Nenhuma mudança: o status já é \"{}\".", s.label())
                }
                StatusChange::Declined { .. } => println!("Mudança cancelada."),
                StatusChange::Applied {
                    from,
                    to,
                    manual_approval,
                } => {
                    ui::success(&format!("{} → {}", from.label(), to.label()));
                    if manual_approval {
                        println!("  Aprovação manual registrada.");
                    }
                }
            }
        }

        Command::Contrato { id, resposta } => {
            Session::from_config(&config)?;
            let store = Store::open(&config.data_dir)?;
            match contracts::mark_signed(&store, &id, resposta == Resposta::Sim)? {
                Some(c) => ui::success(&format!(
                    "Contrato assinado: {} assegurado",
                    c.valor_assegurado
                )),
                None => println!("Contrato marcado como não assinado."),
            }
        }

        Command::Contratos => {
            Session::from_config(&config)?;
            let store = Store::open(&config.data_dir)?;
            ui::print_contracts(&store.list_contracts()?);
        }

        Command::Imovel { command } => {
            Session::from_config(&config)?;
            let store = Store::open(&config.data_dir)?;
            match command {
                ImovelCommand::Novo { endereco } => {
                    let property = Property::new(&endereco)?;
                    store.insert_property(&property)?;
                    ui::success(&format!("Imóvel cadastrado: {}", property.id));
                    println!(
                        "  link público: {}",
                        forms::public_link(&config.public_base_url, &property.id)
                    );
                }
                ImovelCommand::Listar => {
                    let properties = store.list_properties()?;
                    if properties.is_empty() {
                        println!("Nenhum imóvel cadastrado.");
                    }
                    for p in properties {
                        println!("{}  {}", p.id, p.endereco);
                    }
                }
                ImovelCommand::Ver { id } => {
                    let property = store.get_property(&id)?;
                    let link = forms::public_link(&config.public_base_url, &property.id);
                    ui::print_property(&property, &link, &store.list_forms(&id)?);
                }
            }
        }

        Command::Formulario {
            imovel,
            nome,
            cpf,
            telefone,
            renda,
            email,
        } => {
            let store = Store::open(&config.data_dir)?;
            let input = FormInput {
                nome_completo: nome,
                cpf,
                telefone,
                renda_mensal: renda,
                email,
            };

            let mailer = match &config.email.api_url {
                Some(url) => Some(EmailClient::new(url.clone())?),
                None => None,
            };
            let notifier = match (&mailer, &config.email.admin_email) {
                (Some(mailer), Some(admin_email)) => Some(Notifier {
                    mailer,
                    admin_email: admin_email.as_str(),
                }),
                _ => None,
            };

            let submission = forms::submit_form(&store, notifier.as_ref(), &imovel, &input).await?;
            ui::success(&format!(
                "Formulário {} enviado com sucesso!",
                submission.form.id
            ));
            println!("  Emails enviados: {}", submission.emails_sent);
        }
    }

    Ok(())
}
