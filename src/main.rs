mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::simulate_cmd::simulate_command;

fn main() {
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            generate(shell, &mut command, "revcast", &mut std::io::stdout());
        }
    }
}
