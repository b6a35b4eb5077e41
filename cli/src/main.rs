mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{compare, layers};

/// Install the fmt subscriber; `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Compare(args) => compare::run(&cli, args),
        Commands::Layers(args) => layers::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
