use std::path::PathBuf;

/// Floor-surface accounting CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "planchers", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compare the existing and project drawings of a floor file
    Compare(CompareArgs),

    /// List the layers of a floor file with their role and destination
    Layers(LayersArgs),
}

#[derive(clap::Args, Debug)]
pub struct CompareArgs {
    /// Input floor file (JSON polylines of both drawings)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub floor: PathBuf,

    /// Output result file, printed to stdout if omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// JSON tolerance configuration
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Decimal places of the written areas (overrides the config file)
    #[arg(long)]
    pub precision: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct LayersArgs {
    /// Input floor file (JSON polylines of both drawings)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub floor: PathBuf,
}
