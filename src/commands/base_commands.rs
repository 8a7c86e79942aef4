use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportEncoding {
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast pipeline revenue with a Monte Carlo simulation
    Simulate {
        /// Opportunities YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file
        #[arg(short, long)]
        output: String,
        /// Number of simulation trials
        #[arg(short = 'n', long, default_value_t = 10000)]
        trials: usize,
        /// Only include opportunities closing within this many days
        #[arg(long)]
        horizon_days: Option<u32>,
        /// Revenue target to report a hit probability for (repeatable)
        #[arg(short = 't', long = "target")]
        targets: Vec<f64>,
        /// Seed for the random number generator (omit for a fresh run)
        #[arg(long)]
        seed: Option<u64>,
        /// Report encoding
        #[arg(short, long, value_enum, default_value_t = ReportEncoding::Yaml)]
        format: ReportEncoding,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
