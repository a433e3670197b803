use clap::Parser;
use tracing_subscriber::EnvFilter;

use dna_analyzer::{cli, web};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins; otherwise logging follows the verbosity flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("dna_analyzer=debug,tower_http=debug,info")
        } else {
            match cli.command {
                cli::Commands::Serve(_) => EnvFilter::new("dna_analyzer=info,warn"),
                cli::Commands::Analyze(_) => EnvFilter::new("dna_analyzer=error"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Serve(args) => {
            web::server::run(args.to_config())?;
        }
        cli::Commands::Analyze(args) => {
            cli::analyze::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
