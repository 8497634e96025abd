//! Inicialização do `tracing`.

use tracing_subscriber::EnvFilter;

/// Configura o subscriber global; `RUST_LOG` tem precedência sobre `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "analise_credito=debug" } else { "analise_credito=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("logging inicializado (verbose = {verbose})");
}
