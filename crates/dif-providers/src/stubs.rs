use crate::errors::ProviderError;
use crate::graphstore::GraphStore;
use crate::pubchem::BioAssaySource;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Graphstore guionizado para tests: cada regla asocia un fragmento de la
/// consulta con las filas a devolver. Gana la primera regla que aparezca en
/// la consulta; sin coincidencias devuelve cero filas.
#[derive(Default)]
pub struct StaticGraphStore {
  rules: Vec<(String, Vec<JsonValue>)>,
  calls: AtomicUsize,
  log: Mutex<Vec<String>>,
  fail: bool,
}

impl StaticGraphStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Graphstore que falla en cada consulta (servicio caído).
  pub fn unavailable() -> Self {
    Self { fail: true, ..Self::default() }
  }

  pub fn with_rows(mut self, needle: &str, rows: Vec<JsonValue>) -> Self {
    self.rules.push((needle.to_string(), rows));
    self
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  /// Consultas recibidas, en orden.
  pub fn queries(&self) -> Vec<String> {
    self.log.lock().map(|l| l.clone()).unwrap_or_default()
  }
}

impl GraphStore for StaticGraphStore {
  fn sql(&self, query: &str) -> Result<Vec<JsonValue>, ProviderError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut log) = self.log.lock() {
      log.push(query.to_string());
    }
    if self.fail {
      return Err(ProviderError::Status { url: "stub://graphstore".into(), status: 503 });
    }
    Ok(self.rules
           .iter()
           .find(|(needle, _)| query.contains(needle.as_str()))
           .map(|(_, rows)| rows.clone())
           .unwrap_or_default())
  }
}

/// Conteos de BioAssays fijos por acceso UniProt; accesos desconocidos
/// devuelven 0 como el 404 de PubChem.
#[derive(Default)]
pub struct StaticBioAssays {
  counts: HashMap<String, u64>,
  calls: AtomicUsize,
}

impl StaticBioAssays {
  pub fn new<I, S>(counts: I) -> Self
    where I: IntoIterator<Item = (S, u64)>,
          S: Into<String>
  {
    Self { counts: counts.into_iter().map(|(k, v)| (k.into(), v)).collect(), calls: AtomicUsize::new(0) }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl BioAssaySource for StaticBioAssays {
  fn assay_count(&self, uniprot_accession: &str) -> Result<u64, ProviderError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.counts.get(uniprot_accession).copied().unwrap_or(0))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn first_matching_rule_wins() {
    let store = StaticGraphStore::new().with_rows("has_drug_target", vec![json!({"drug": "dasatinib"})])
                                       .with_rows("MATCH", vec![json!({"interactor_name": "FYN"})]);
    let rows = store.sql("MATCH {class:protein}.inE(){class:has_drug_target}").unwrap();
    assert_eq!(rows[0]["drug"], "dasatinib");
    assert!(store.sql("SELECT 1").unwrap().is_empty());
    assert_eq!(store.calls(), 2);
    assert_eq!(store.queries()[1], "SELECT 1");
  }
}
