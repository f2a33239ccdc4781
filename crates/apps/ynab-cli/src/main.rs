//! `ynab-mcp-server` binary entry point.

use clap::Parser;
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

use ynab_cli::{
    cli::{Cli, Commands},
    commands,
    config::ServerConfig,
    error::{CliError, CliResult},
    signals::cancel_on_shutdown,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize logging on stderr; stdout carries MCP frames on stdio.
///
/// `RUST_LOG` wins over the configured level; `--verbose` forces debug for
/// this workspace's crates.
fn init_logging(level: &str, verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if verbose {
        for directive in ["ynab_mcp=debug", "ynab_client=debug", "ynab_cli=debug"] {
            if let Ok(d) = directive.parse::<Directive>() {
                filter = filter.add_directive(d);
            }
        }
    }
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Print a user-friendly error message with error code and recovery hint.
fn print_error(e: &CliError) {
    eprintln!(
        "{} [{}]: {}",
        "Error".red().bold(),
        e.error_code().to_string().yellow(),
        e
    );
    eprintln!("{}: {}", "Hint".cyan(), e.hint());
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command.unwrap_or_default() {
        Commands::Version => {
            println!("{}", commands::version());
        }
        Commands::Serve {
            transport,
            port,
            host,
        } => {
            let mut config = ServerConfig::load_from(cli.config.as_deref())?;
            config.apply_env()?;
            config.apply_overrides(transport.map(Into::into), port, host);

            init_logging(&config.log_level, cli.verbose);

            let shutdown = CancellationToken::new();
            cancel_on_shutdown(shutdown.clone());
            let message = commands::serve(config, shutdown).await?;
            tracing::info!("{}", message);
        }
    }
    Ok(())
}
