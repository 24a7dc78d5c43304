// finder.rs
//! Buscador de interactores de un nodo del grafo de conocimiento.

use crate::errors::PipelineError;
use dif_domain::{dedup_rows, unique_interactors, CacheRepository, DruggableRecord, InteractorQuery,
                 InteractorRecord};
use dif_providers::GraphStore;
use indexmap::IndexSet;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Busca los interactores directos de un nodo, consultando primero la caché
/// local y después el graphstore.
pub struct InteractorFinder {
  graph: Arc<dyn GraphStore>,
  cache: Arc<dyn CacheRepository>,
  query: InteractorQuery,
  print_sql: bool,
  interactors: Vec<InteractorRecord>,
  druggable: Vec<DruggableRecord>,
  last_was_druggable: bool,
}

impl InteractorFinder {
  pub fn new(graph: Arc<dyn GraphStore>, cache: Arc<dyn CacheRepository>, query: InteractorQuery) -> Self {
    Self { graph,
           cache,
           query,
           print_sql: false,
           interactors: Vec::new(),
           druggable: Vec::new(),
           last_was_druggable: false }
  }

  /// Imprime cada consulta por stdout antes de enviarla.
  pub fn with_print_sql(mut self, print_sql: bool) -> Self {
    self.print_sql = print_sql;
    self
  }

  pub fn query(&self) -> &InteractorQuery {
    &self.query
  }

  fn run<T: DeserializeOwned>(&self, sql: &str) -> Result<Vec<T>, PipelineError> {
    if self.print_sql {
      println!("{}\n", sql);
    }
    debug!("consulta: {}", sql);
    let rows: Vec<JsonValue> = self.graph.sql(sql)?;
    let decoded = rows.into_iter().map(serde_json::from_value).collect::<Result<Vec<T>, _>>()?;
    Ok(decoded)
  }

  /// Interactores de cualquier tipo unidos al nodo por la clase de arista
  /// de la consulta.
  pub fn find_interactors(&mut self) -> Result<Vec<InteractorRecord>, PipelineError> {
    let key = self.query.cache_key(false);
    let symbol = self.query.cache_symbol();
    self.last_was_druggable = false;

    let cached = self.cache.get_interactors(&key)?;
    if !cached.is_empty() {
      info!("{} interactores de {} leídos de la caché", cached.len(), symbol);
      self.interactors = cached.clone();
      return Ok(cached);
    }

    let mut rows: Vec<InteractorRecord> = self.run(&self.query.interactor_sql())?;
    rows.retain(|r| self.query.accepts_relation(r.relation_type.as_deref()));
    let rows: Vec<InteractorRecord> = dedup_rows(rows).into_iter().map(InteractorRecord::normalized).collect();

    if rows.is_empty() {
      warn!("{} no tiene interactores con los filtros indicados", self.query.node_name());
    } else {
      self.cache.save_interactors(&key, &symbol, &rows)?;
    }
    self.interactors = rows.clone();
    Ok(rows)
  }

  /// Interactores que además son diana de algún fármaco (aristas causales).
  /// Une los interactores puros con los que se alcanzan a través de un nodo
  /// "cápsula".
  pub fn druggable_interactors(&mut self) -> Result<Vec<DruggableRecord>, PipelineError> {
    let key = self.query.cache_key(true);
    let symbol = self.query.cache_symbol();
    self.last_was_druggable = true;

    let cached = self.cache.get_druggable(&key)?;
    if !cached.is_empty() {
      info!("{} interactores druggables de {} leídos de la caché", cached.len(), symbol);
      self.druggable = cached.clone();
      return Ok(cached);
    }

    let mut rows: Vec<DruggableRecord> = self.run(&self.query.pure_druggable_sql())?;
    let capsule: Vec<DruggableRecord> = self.run(&self.query.capsule_druggable_sql())?;
    rows.extend(capsule);
    let rows = dedup_rows(rows);

    if rows.is_empty() {
      warn!("{} no tiene interactores druggables", self.query.node_name());
    } else {
      self.cache.save_druggable(&key, &symbol, &rows)?;
    }
    self.druggable = rows.clone();
    Ok(rows)
  }

  /// Nombres únicos de los interactores de la última búsqueda.
  pub fn unique_interactors(&self) -> Vec<String> {
    if self.last_was_druggable {
      unique_interactors(self.druggable.iter().map(|r| r.interactor_name.as_deref()))
    } else {
      unique_interactors(self.interactors.iter().map(|r| r.interactor_name.as_deref()))
    }
  }

  /// Fármacos únicos de la última búsqueda druggable.
  pub fn unique_drugs(&self) -> Vec<String> {
    let set: IndexSet<&str> = self.druggable.iter().filter_map(|r| r.drug.as_deref()).collect();
    set.into_iter().map(str::to_string).collect()
  }

  /// Pares (fármaco, interactor) sin repetir, en orden de aparición.
  pub fn drug_and_interactors(&self) -> Vec<(String, String)> {
    let set: IndexSet<(&str, &str)> = self.druggable
                                          .iter()
                                          .filter_map(|r| Some((r.drug.as_deref()?, r.interactor_name.as_deref()?)))
                                          .collect();
    set.into_iter().map(|(d, i)| (d.to_string(), i.to_string())).collect()
  }
}
