mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "litdoc=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(&cli)?;

    match &cli.command {
        Commands::Sections { file, format } => {
            cli::show_sections(file, format, &config)?;
        }
        Commands::Render { files, output } => {
            cli::render_files(files, output.as_deref(), &config)?;
        }
        Commands::Languages => {
            cli::list_languages()?;
        }
    }

    Ok(())
}
