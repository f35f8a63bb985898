use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use shelf_cli::cli::{Cli, Commands};
use shelf_cli::commands;
use shelf_cli::error::CliError;
use shelf_cli::logging::init_tracing;
use shelf_cli::output::OutputWriter;
use shelf_core::config::GeneralConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Browse(args) => {
            let config = commands::load_config(&cli.config).await?;
            setup_logging(&config.general, cli.log_level.as_deref());
            tracing::debug!(config = %cli.config.display(), "shelf browse starting");
            commands::browse::execute(args, &config, &writer).await
        }
        // `config` must work even when the file itself is broken
        Commands::Config(args) => {
            setup_logging(&GeneralConfig::default(), cli.log_level.as_deref());
            commands::config::execute(args, &cli.config, &writer).await
        }
    }
}

fn setup_logging(general: &GeneralConfig, level_override: Option<&str>) {
    if let Err(e) = init_tracing(general, level_override) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }
    shelf_core::metrics::describe_all();
}
