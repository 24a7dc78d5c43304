// drug_metadata.rs
//! Metadatos de fármacos e interactores que alimentan el ranking: patentes,
//! productos genéricos, ensayos clínicos, BioAssays y conteo de aristas.

use crate::lenient::{one_or_many, scalar_to_string};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Resumen de patentes de un fármaco a una fecha dada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentSummary {
  pub drug_name: String,
  pub has_patent: bool,
  /// Todas las patentes han expirado (cierto también si no tiene ninguna).
  pub expired: bool,
  pub patent_numbers: Vec<String>,
}

impl PatentSummary {
  /// Interpreta el campo `drug_patents` del graphstore. Acepta `null`, un
  /// objeto `{"patent": ...}` o una lista de ellos; cada patente puede venir
  /// sola o en lista. Una fecha de expiración ilegible cuenta como vigente.
  pub fn from_graph(drug_name: &str, raw: &JsonValue, today: NaiveDate) -> Self {
    let mut numbers = Vec::new();
    let mut all_expired = true;
    for entry in one_or_many(raw) {
      let patents = match entry.get("patent") {
        Some(inner) => one_or_many(inner),
        None => vec![entry],
      };
      for patent in patents {
        if let Some(number) = patent.get("number").and_then(scalar_to_string) {
          numbers.push(number);
        }
        let expired = patent.get("expires")
                            .and_then(|v| v.as_str())
                            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
                            .map(|d| today > d)
                            .unwrap_or(false);
        all_expired &= expired;
      }
    }
    Self { drug_name: drug_name.to_string(), has_patent: !numbers.is_empty(), expired: all_expired, patent_numbers: numbers }
  }
}

/// Resumen de productos comerciales de un fármaco.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
  pub drug_name: String,
  pub has_generic: bool,
  pub has_approved_generic: bool,
  pub generic_products: Vec<String>,
}

impl ProductSummary {
  /// Interpreta el campo `drug_products` (lista de productos, posiblemente
  /// anidada un nivel). `generic` y `approved` llegan como `"true"`/`"false"`.
  pub fn from_graph(drug_name: &str, raw: &JsonValue) -> Self {
    let mut summary = Self { drug_name: drug_name.to_string(), ..Self::default() };
    let products = one_or_many(raw).into_iter().flat_map(one_or_many);
    for product in products {
      if !flag(product.get("generic")) {
        continue;
      }
      summary.has_generic = true;
      if flag(product.get("approved")) {
        summary.has_approved_generic = true;
      }
      if let Some(name) = product.get("name").and_then(scalar_to_string) {
        if !summary.generic_products.contains(&name) {
          summary.generic_products.push(name);
        }
      }
    }
    summary
  }
}

fn flag(value: Option<&JsonValue>) -> bool {
  match value {
    Some(JsonValue::Bool(b)) => *b,
    Some(JsonValue::String(s)) => s.eq_ignore_ascii_case("true"),
    _ => false,
  }
}

/// Ensayo clínico asociado a un fármaco.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
  pub trial_id: String,
  pub status: Option<String>,
  pub conditions: Vec<String>,
  pub drugs_in_trial: Vec<String>,
}

impl TrialRecord {
  /// Construye el ensayo desde una fila de `expand(clinical_trials)`. Las
  /// condiciones son la unión de `condition` y `mesh_conditions`. Devuelve
  /// `None` si la fila no trae `trial_id`.
  pub fn from_graph(row: &JsonValue) -> Option<Self> {
    let trial_id = row.get("trial_id").and_then(scalar_to_string)?;
    let list = |key: &str| -> Vec<String> {
      row.get(key).map(|v| one_or_many(v).into_iter().filter_map(scalar_to_string).collect()).unwrap_or_default()
    };
    let mut conditions = list("condition");
    conditions.extend(list("mesh_conditions"));
    conditions.sort();
    conditions.dedup();
    Some(Self { trial_id,
                status: row.get("overall_status").and_then(scalar_to_string),
                conditions,
                drugs_in_trial: list("drugs_in_trial") })
  }
}

/// Número de BioAssays de PubChem para un símbolo. `count == None` indica
/// que no hay datos (sin acceso UniProt o consulta vacía).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioAssayCount {
  pub symbol: String,
  pub uniprot_accession: Option<String>,
  pub count: Option<u64>,
}

impl BioAssayCount {
  pub fn has_data(&self) -> bool {
    self.count.map(|c| c > 0).unwrap_or(false)
  }
}

/// Aristas causales de un interactor en el grafo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
  pub symbol: String,
  pub in_count: i64,
  pub out_count: i64,
  pub both_count: i64,
}

impl EdgeCounts {
  pub fn new(symbol: &str, in_count: i64, out_count: i64) -> Self {
    Self { symbol: symbol.to_string(), in_count, out_count, both_count: in_count + out_count }
  }
}
