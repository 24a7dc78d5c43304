//! dif: busca interactores de un nodo del grafo de conocimiento y puntúa
//! los que son diana de fármacos.

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() {
  // Parse command line arguments first to get log level
  let cli = Cli::parse();

  // Default to Warn (can still be overridden by RUST_LOG env var)
  let log_level = cli.log_level.map(|l| l.to_level_filter()).unwrap_or(log::LevelFilter::Warn);
  env_logger::Builder::from_default_env().filter_level(log_level).init();
  dotenvy::dotenv().ok();

  let result = match cli.command {
    Commands::Find(args) => cli::handle_find(args, cli.db.as_deref()),
    Commands::Rank(args) => cli::handle_rank(args, cli.db.as_deref()),
  };

  if let Err(e) = result {
    eprintln!("{} {:#}", "Error:".bold().red(), e);
    std::process::exit(1);
  }
}
