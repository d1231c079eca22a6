use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use storyfill_core::Config;

/// Fill story records with the visible text of their linked pages.
#[derive(Debug, Parser)]
#[command(name = "storyfill", version, about)]
struct Cli {
    /// Stories file to update in place. Overrides `store.path`.
    input: Option<PathBuf>,

    /// TOML configuration file. Built-in defaults apply if it does not exist.
    #[arg(long, env = "STORYFILL_CONFIG", default_value = "config/default.toml")]
    config: PathBuf,

    /// Per-request timeout in seconds. Overrides `fetch.timeout`.
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_subscriber();
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match storyfill_core::run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("cannot load {}", cli.config.display()))?;
    if let Some(input) = &cli.input {
        config.store.path.clone_from(input);
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout = timeout;
    }
    config.validate()?;
    Ok(config)
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
