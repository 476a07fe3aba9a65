mod categorizer;
mod cli;
mod error;
mod fmt;
mod ledger;
mod markdown;
mod models;
mod parser;
mod pdf;
mod pipeline;
mod reports;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Extract { input, csv } => cli::extract::run(&config, input, csv),
        Commands::Report { csv, report } => cli::report::run(&config, csv, report),
        Commands::Run(args) => cli::run::run(&config, args),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(&config),
            ConfigCommands::Init { force } => cli::config::init(&config, force),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
