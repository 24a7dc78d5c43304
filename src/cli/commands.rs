use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dif", version, about = "Busca y puntúa interactores druggables en el graphstore")]
pub struct Cli {
  /// Base de datos de la caché (por defecto DIF_DB_URL o ~/.dif/cache/dif.db)
  #[arg(long, global = true, value_name = "URL")]
  pub db: Option<String>,

  /// Nivel de log: error, warn, info, debug, trace
  #[arg(long, global = true, value_name = "LEVEL")]
  pub log_level: Option<log::Level>,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Interactores directos de un nodo
  Find(FindArgs),
  /// Ranking de los interactores druggables de un nodo
  Rank(RankArgs),
}

#[derive(Args, Debug)]
pub struct FindArgs {
  /// Nombre del nodo objetivo, p.ej. MAPT
  pub symbol: String,

  /// Tipo de nodo
  #[arg(short, long, default_value = "protein")]
  pub node: String,

  /// Clase de arista (causal, correlative, E, ...)
  #[arg(short, long, default_value = "causal")]
  pub edge: String,

  /// Modificaciones separadas por comas, p.ej. "pho,ace" o "all"
  #[arg(short = 'm', long)]
  pub pmods: Option<String>,

  /// Sólo interactores que son diana de algún fármaco
  #[arg(short, long)]
  pub druggable: bool,

  /// Imprime las consultas enviadas al graphstore
  #[arg(short, long)]
  pub sql: bool,

  /// Exporta la tabla (.csv, .tsv o .json)
  #[arg(short, long, value_name = "PATH")]
  pub output: Option<PathBuf>,

  /// Muestra la tabla por pantalla
  #[arg(short, long)]
  pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct RankArgs {
  /// Nombre del nodo objetivo, p.ej. MAPT
  pub symbol: String,

  /// Modificaciones separadas por comas
  #[arg(short = 'm', long)]
  pub pmods: Option<String>,

  /// Puntos cuando se cumple un criterio
  #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
  pub reward: i64,

  /// Puntos cuando no se cumple un criterio
  #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
  pub penalty: i64,

  /// Exporta el resumen (.csv, .tsv o .json)
  #[arg(short, long, value_name = "PATH")]
  pub output: Option<PathBuf>,

  /// Resumen por interactor en lugar de por par fármaco/interactor
  #[arg(short = 't', long)]
  pub pivot: bool,

  /// Muestra la tabla por pantalla
  #[arg(short, long)]
  pub verbose: bool,

  /// Enfermedad de referencia para los ensayos clínicos
  #[arg(long, default_value = "Alzheimer Disease")]
  pub disease: String,

  /// Enfermedades similares separadas por comas
  #[arg(long, value_name = "LIST")]
  pub similar: Option<String>,

  /// Imprime las consultas enviadas al graphstore
  #[arg(short, long)]
  pub sql: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rank_accepts_negative_penalty() {
    let cli = Cli::try_parse_from(["dif", "rank", "MAPT", "-r", "2", "-p", "-3", "-t"]).unwrap();
    match cli.command {
      Commands::Rank(args) => {
        assert_eq!((args.reward, args.penalty), (2, -3));
        assert!(args.pivot);
        assert_eq!(args.disease, "Alzheimer Disease");
      }
      other => panic!("unexpected command: {:?}", other),
    }
  }

  #[test]
  fn find_defaults_and_global_flags() {
    let cli = Cli::try_parse_from(["dif", "find", "MAPT", "-m", "pho", "-d", "--db", "/tmp/x.db", "--log-level", "info"])
      .unwrap();
    assert_eq!(cli.db.as_deref(), Some("/tmp/x.db"));
    assert_eq!(cli.log_level, Some(log::Level::Info));
    let Commands::Find(args) = cli.command else { panic!("expected find") };
    assert_eq!((args.node.as_str(), args.edge.as_str()), ("protein", "causal"));
    assert_eq!(args.pmods.as_deref(), Some("pho"));
    assert!(args.druggable && !args.verbose);
  }
}
