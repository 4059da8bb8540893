mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Features { io, format } => commands::features::run(&io, format),
        Commands::Terms { io, top } => commands::terms::run(&io, top),
        Commands::Activity {
            io,
            period,
            dense,
            format,
        } => commands::activity::run(&io, period.as_deref(), dense, format),
        Commands::Summarize { io, num_results } => commands::summarize::run(&io, num_results),
        Commands::Report { io } => commands::report::run(&io),
        Commands::Version => commands::version::run(),
    }
}
