use crate::cli::commands::{FindArgs, RankArgs};
use crate::cli::output::{export, render_table};
use anyhow::{Context, Result};
use colored::*;
use dif_domain::{parse_pmods, CacheRepository, InteractorQuery, ScoringRules, Tabular, TrialCriteria};
use dif_persistence::{new_cache_from_env, open_cache};
use dif_pipeline::{InteractorFinder, Ranker, Summary};
use dif_providers::{PubChemClient, RestGraphStore};
use log::info;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

fn cache_for(db: Option<&str>) -> Result<Arc<dyn CacheRepository>> {
  let cache = match db {
                Some(url) => open_cache(url),
                None => new_cache_from_env(),
              }.context("no se pudo abrir la caché local")?;
  Ok(Arc::new(cache))
}

fn graphstore() -> Result<Arc<RestGraphStore>> {
  let graph = RestGraphStore::from_env().context("configuración del graphstore")?;
  info!("graphstore: {}", graph.config().endpoint());
  Ok(Arc::new(graph))
}

/// Imprime y/o exporta la tabla.
fn emit<T: Tabular + Serialize>(title: &str, rows: &[T], output: Option<&Path>, verbose: bool) -> Result<()> {
  if verbose {
    print!("{}", render_table(title, rows));
  }
  if let Some(path) = output {
    let format = export(rows, path)?;
    println!("{} {} filas exportadas a {} ({:?})", "✔".green(), rows.len(), path.display(), format);
  }
  if !verbose && output.is_none() {
    println!("{}: {} filas (use -v para verlas o -o para exportarlas)", title.bold(), rows.len());
  }
  Ok(())
}

fn pmods_of(raw: Option<&str>) -> Vec<String> {
  raw.map(parse_pmods).unwrap_or_default()
}

pub fn handle_find(args: FindArgs, db: Option<&str>) -> Result<()> {
  let query = InteractorQuery::new(&args.symbol)?.with_node_type(&args.node)?
                                                 .with_edge(&args.edge)?
                                                 .with_pmods(pmods_of(args.pmods.as_deref()));
  let mut finder = InteractorFinder::new(graphstore()?, cache_for(db)?, query).with_print_sql(args.sql);

  if args.druggable {
    let rows = finder.druggable_interactors()
                     .with_context(|| format!("búsqueda de interactores druggables de {}", args.symbol))?;
    emit(&format!("Interactores druggables de {}", args.symbol), &rows, args.output.as_deref(), args.verbose)
  } else {
    let rows = finder.find_interactors()
                     .with_context(|| format!("búsqueda de interactores de {}", args.symbol))?;
    emit(&format!("Interactores de {}", args.symbol), &rows, args.output.as_deref(), args.verbose)
  }
}

pub fn handle_rank(args: RankArgs, db: Option<&str>) -> Result<()> {
  let query = InteractorQuery::new(&args.symbol)?.with_pmods(pmods_of(args.pmods.as_deref()));
  let criteria = TrialCriteria { disease_keyword: args.disease.clone(),
                                 similar_diseases: pmods_of(args.similar.as_deref()) };
  let rules = ScoringRules::new(args.reward, args.penalty);
  let bioassays = Arc::new(PubChemClient::from_env().context("configuración de PubChem")?);

  let mut ranker = Ranker::new(graphstore()?, cache_for(db)?, bioassays, query).with_rules(rules)
                                                                                .with_criteria(criteria)
                                                                                .with_print_sql(args.sql);
  let summary = ranker.summarize(args.pivot).with_context(|| format!("ranking de {}", args.symbol))?;
  let finder = ranker.finder();
  info!("{} fármacos sobre {} interactores druggables",
        finder.unique_drugs().len(),
        finder.unique_interactors().len());

  let output = args.output.as_deref();
  match summary {
    Summary::Pairs(rows) => emit(&format!("Ranking de {}", args.symbol), &rows, output, args.verbose),
    Summary::Pivot(rows) => emit(&format!("Ranking por interactor de {}", args.symbol), &rows, output, args.verbose),
  }
}
