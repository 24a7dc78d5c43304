// interactor.rs
//! Filas de resultados del buscador de interactores.

use crate::lenient::{opt_i64, opt_string, string_list};
use crate::table::{opt_cell, Tabular};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Interactor de un nodo del grafo (consulta general, cualquier arista).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractorRecord {
  #[serde(default, deserialize_with = "opt_i64")]
  pub target_species: Option<i64>,
  #[serde(default, deserialize_with = "opt_i64")]
  pub pmid: Option<i64>,
  #[serde(default, deserialize_with = "opt_string")]
  pub pmc: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub interactor_type: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub interactor_name: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub interactor_bel: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub relation_type: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub target_bel: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub target_type: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub target_symbol: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub pmod_type: Option<String>,
}

/// Interactor que además es diana de al menos un fármaco del grafo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DruggableRecord {
  #[serde(default, deserialize_with = "opt_string")]
  pub drug: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub capsule_interactor_type: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub capsule_interactor_bel: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub interactor_bel: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub interactor_type: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub interactor_name: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub relation_type: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub target_bel: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub target_symbol: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub target_type: Option<String>,
  #[serde(default, deserialize_with = "opt_i64")]
  pub pmid: Option<i64>,
  #[serde(default, deserialize_with = "opt_string")]
  pub pmc: Option<String>,
  #[serde(default, deserialize_with = "opt_i64")]
  pub rel_pub_year: Option<i64>,
  #[serde(default, deserialize_with = "opt_string")]
  pub rel_rid: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub drug_rel_rid: Option<String>,
  #[serde(default, deserialize_with = "string_list")]
  pub drug_rel_actions: Vec<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub drugbank_id: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub chembl_id: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub pubchem_id: Option<String>,
  #[serde(default, deserialize_with = "opt_string")]
  pub pmod_type: Option<String>,
}

impl InteractorRecord {
  /// Normaliza la especie (`None` pasa a 0), igual que la tabla cacheada.
  pub fn normalized(mut self) -> Self {
    self.target_species = Some(self.target_species.unwrap_or(0));
    self
  }
}

/// Elimina filas repetidas conservando el orden de la primera aparición.
pub fn dedup_rows<T: Clone + Eq + Hash>(rows: Vec<T>) -> Vec<T> {
  let set: IndexSet<T> = rows.into_iter().collect();
  set.into_iter().collect()
}

/// Nombres únicos de interactores, en orden de aparición.
pub fn unique_interactors<'a, I>(names: I) -> Vec<String>
  where I: IntoIterator<Item = Option<&'a str>>
{
  let set: IndexSet<&str> = names.into_iter().flatten().collect();
  set.into_iter().map(str::to_string).collect()
}

impl Tabular for InteractorRecord {
  fn columns() -> &'static [&'static str] {
    &["target_species",
      "pmid",
      "pmc",
      "interactor_type",
      "interactor_name",
      "interactor_bel",
      "relation_type",
      "target_bel",
      "target_type",
      "target_symbol",
      "pmod_type"]
  }

  fn cells(&self) -> Vec<String> {
    vec![opt_cell(&self.target_species),
         opt_cell(&self.pmid),
         opt_cell(&self.pmc),
         opt_cell(&self.interactor_type),
         opt_cell(&self.interactor_name),
         opt_cell(&self.interactor_bel),
         opt_cell(&self.relation_type),
         opt_cell(&self.target_bel),
         opt_cell(&self.target_type),
         opt_cell(&self.target_symbol),
         opt_cell(&self.pmod_type)]
  }
}

impl Tabular for DruggableRecord {
  fn columns() -> &'static [&'static str] {
    &["drug",
      "capsule_interactor_type",
      "capsule_interactor_bel",
      "interactor_bel",
      "interactor_type",
      "interactor_name",
      "relation_type",
      "target_bel",
      "target_symbol",
      "target_type",
      "pmid",
      "pmc",
      "rel_pub_year",
      "rel_rid",
      "drug_rel_rid",
      "drug_rel_actions",
      "drugbank_id",
      "chembl_id",
      "pubchem_id",
      "pmod_type"]
  }

  fn cells(&self) -> Vec<String> {
    vec![opt_cell(&self.drug),
         opt_cell(&self.capsule_interactor_type),
         opt_cell(&self.capsule_interactor_bel),
         opt_cell(&self.interactor_bel),
         opt_cell(&self.interactor_type),
         opt_cell(&self.interactor_name),
         opt_cell(&self.relation_type),
         opt_cell(&self.target_bel),
         opt_cell(&self.target_symbol),
         opt_cell(&self.target_type),
         opt_cell(&self.pmid),
         opt_cell(&self.pmc),
         opt_cell(&self.rel_pub_year),
         opt_cell(&self.rel_rid),
         opt_cell(&self.drug_rel_rid),
         self.drug_rel_actions.join("|"),
         opt_cell(&self.drugbank_id),
         opt_cell(&self.chembl_id),
         opt_cell(&self.pubchem_id),
         opt_cell(&self.pmod_type)]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn druggable_row_decodes_graph_json() {
    let row = json!({
      "drug": "Dasatinib",
      "interactor_name": "FYN",
      "relation_type": "increases",
      "pmid": "123456",
      "rel_pub_year": "2015",
      "drug_rel_actions": ["inhibitor", "multitarget"],
      "pubchem_id": 3062316,
      "@type": "d"
    });
    let rec: DruggableRecord = serde_json::from_value(row).unwrap();
    assert_eq!(rec.drug.as_deref(), Some("Dasatinib"));
    assert_eq!(rec.pmid, Some(123456));
    assert_eq!(rec.rel_pub_year, Some(2015));
    assert_eq!(rec.drug_rel_actions, vec!["inhibitor", "multitarget"]);
    assert_eq!(rec.pubchem_id.as_deref(), Some("3062316"));
    assert!(rec.capsule_interactor_bel.is_none());
    assert_eq!(rec.cells().len(), DruggableRecord::columns().len());
  }

  #[test]
  fn dedup_keeps_first_occurrence_order() {
    let a = InteractorRecord { interactor_name: Some("A".into()), ..Default::default() };
    let b = InteractorRecord { interactor_name: Some("B".into()), ..Default::default() };
    let rows = dedup_rows(vec![a.clone(), b.clone(), a.clone()]);
    assert_eq!(rows, vec![a, b]);
  }

  #[test]
  fn unique_names_skip_missing() {
    let names = unique_interactors(vec![Some("FYN"), None, Some("GSK3B"), Some("FYN")]);
    assert_eq!(names, vec!["FYN", "GSK3B"]);
  }
}
