// steps.rs
//! Criterios del ranking. Cada paso es independiente y puede sustituirse
//! sin tocar los demás.

use crate::errors::PipelineError;
use crate::ranking::context::RankingContext;
use crate::ranking::step::RankingStep;
use dif_domain::{clinical_trials_sql, in_count_sql, out_count_sql, patents_products_sql, uniprot_id_sql, BioAssayCount,
                 EdgeCounts, PatentSummary, ProductSummary, TrialRecord};
use indexmap::IndexMap;
use log::info;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Identificadores DrugBank por consulta de patentes y productos.
pub const DRUGBANK_CHUNK_SIZE: usize = 400;

/// Pasos por defecto, en el orden en que se ejecutan.
pub fn default_steps() -> Vec<Box<dyn RankingStep>> {
  vec![Box::new(RelationshipStep),
       Box::new(PatentProductStep),
       Box::new(ClinicalTrialStep),
       Box::new(BioAssayStep),
       Box::new(EdgeCountStep)]
}

fn first_str(value: Option<&JsonValue>) -> Option<String> {
  match value? {
    JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
    JsonValue::Array(items) => first_str(items.first()),
    _ => None,
  }
}

fn first_number(rows: &[JsonValue]) -> i64 {
  rows.first().and_then(|r| r.get("number")).and_then(JsonValue::as_i64).unwrap_or(0)
}

/// Compara las acciones del fármaco con las relaciones interactor → objetivo.
pub struct RelationshipStep;

impl RankingStep for RelationshipStep {
  fn name(&self) -> &str {
    "relationship"
  }

  fn execute(&self, ctx: &mut RankingContext) -> Result<(), PipelineError> {
    let scores: Vec<_> = ctx.pairs
                            .iter()
                            .map(|(pair, info)| (pair.clone(), ctx.rules.relationship(&info.relations, &info.actions)))
                            .collect();
    ctx.relationships.extend(scores);
    Ok(())
  }
}

/// Patentes y productos genéricos de cada fármaco.
pub struct PatentProductStep;

impl RankingStep for PatentProductStep {
  fn name(&self) -> &str {
    "patents_products"
  }

  fn execute(&self, ctx: &mut RankingContext) -> Result<(), PipelineError> {
    let cache = ctx.services.cache.clone();
    // drugbank_id -> nombres de fármaco que lo comparten
    let mut missing: IndexMap<String, Vec<String>> = IndexMap::new();

    for (drug, drugbank_id) in ctx.drugs() {
      match (cache.get_patents(&drug)?, cache.get_products(&drug)?) {
        (Some(p), Some(g)) => {
          ctx.patents.insert(drug.clone(), p);
          ctx.products.insert(drug, g);
        }
        _ => match drugbank_id {
          Some(id) => missing.entry(id).or_default().push(drug),
          // sin identificador no hay metadatos que consultar
          None => {
            ctx.patents.insert(drug.clone(), PatentSummary::from_graph(&drug, &JsonValue::Null, ctx.today));
            ctx.products.insert(drug.clone(), ProductSummary::from_graph(&drug, &JsonValue::Null));
          }
        },
      }
    }

    if missing.is_empty() {
      return Ok(());
    }
    let ids: Vec<String> = missing.keys().cloned().collect();
    info!("importando patentes y productos de {} fármacos", ids.len());
    for chunk in ids.chunks(DRUGBANK_CHUNK_SIZE) {
      let rows = ctx.services.sql(&patents_products_sql(chunk))?;
      let mut found: HashMap<String, &JsonValue> = HashMap::new();
      for row in &rows {
        if let Some(id) = first_str(row.get("drugbank_id")) {
          found.entry(id).or_insert(row);
        }
      }
      for id in chunk {
        let Some(drugs) = missing.get(id) else { continue };
        let row = found.get(id).copied();
        let raw_patents = row.and_then(|r| r.get("drug_patents")).unwrap_or(&JsonValue::Null);
        let raw_products = row.and_then(|r| r.get("drug_products")).unwrap_or(&JsonValue::Null);
        for drug in drugs {
          let patents = PatentSummary::from_graph(drug, raw_patents, ctx.today);
          let products = ProductSummary::from_graph(drug, raw_products);
          cache.save_patents(&patents)?;
          cache.save_products(&products)?;
          ctx.patents.insert(drug.clone(), patents);
          ctx.products.insert(drug.clone(), products);
        }
      }
    }
    Ok(())
  }
}

/// Ensayos clínicos de cada fármaco.
pub struct ClinicalTrialStep;

impl RankingStep for ClinicalTrialStep {
  fn name(&self) -> &str {
    "clinical_trials"
  }

  fn execute(&self, ctx: &mut RankingContext) -> Result<(), PipelineError> {
    let cache = ctx.services.cache.clone();
    for (drug, drugbank_id) in ctx.drugs() {
      let trials = match drugbank_id {
        Some(id) => match cache.get_trials(&id)? {
          Some(trials) => trials,
          None => {
            info!("importando ensayos clínicos de {} ({})", drug, id);
            let rows = ctx.services.sql(&clinical_trials_sql(&id))?;
            let trials: Vec<TrialRecord> = rows.iter().filter_map(TrialRecord::from_graph).collect();
            cache.save_trials(&id, &drug, &trials)?;
            trials
          }
        },
        None => Vec::new(),
      };
      let score = ctx.rules.trial_points(&trials, &ctx.criteria);
      ctx.trials.insert(drug, (trials.len(), score));
    }
    Ok(())
  }
}

/// BioAssays de PubChem de cada interactor.
pub struct BioAssayStep;

impl RankingStep for BioAssayStep {
  fn name(&self) -> &str {
    "bioassays"
  }

  fn execute(&self, ctx: &mut RankingContext) -> Result<(), PipelineError> {
    let cache = ctx.services.cache.clone();
    for symbol in ctx.interactors() {
      let bioassay = match cache.get_bioassay(&symbol)? {
        Some(b) => b,
        None => {
          let rows = ctx.services.sql(&uniprot_id_sql(&symbol))?;
          let accession = rows.first().and_then(|r| first_str(r.get("uniprot_id")));
          let count = match &accession {
            Some(acc) => Some(ctx.services.bioassays.assay_count(acc)?),
            None => None,
          };
          info!("BioAssays de {}: {:?}", symbol, count);
          let b = BioAssayCount { symbol: symbol.clone(), uniprot_accession: accession, count };
          cache.save_bioassay(&b)?;
          b
        }
      };
      ctx.bioassays.insert(symbol, bioassay);
    }
    Ok(())
  }
}

/// Aristas causales de entrada y salida de cada interactor.
pub struct EdgeCountStep;

impl RankingStep for EdgeCountStep {
  fn name(&self) -> &str {
    "edges"
  }

  fn execute(&self, ctx: &mut RankingContext) -> Result<(), PipelineError> {
    let cache = ctx.services.cache.clone();
    for symbol in ctx.interactors() {
      let counts = match cache.get_edge_counts(&symbol)? {
        Some(c) => c,
        None => {
          let in_count = first_number(&ctx.services.sql(&in_count_sql(&symbol))?);
          let out_count = first_number(&ctx.services.sql(&out_count_sql(&symbol))?);
          let c = EdgeCounts::new(&symbol, in_count, out_count);
          cache.save_edge_counts(&c)?;
          c
        }
      };
      ctx.edges.insert(symbol, counts);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn first_str_reads_scalars_and_lists() {
    assert_eq!(first_str(Some(&json!("P06241"))), Some("P06241".to_string()));
    assert_eq!(first_str(Some(&json!(["P06241", "X"]))), Some("P06241".to_string()));
    assert_eq!(first_str(Some(&json!(""))), None);
    assert_eq!(first_str(None), None);
  }

  #[test]
  fn first_number_defaults_to_zero() {
    assert_eq!(first_number(&[json!({"number": 7})]), 7);
    assert_eq!(first_number(&[]), 0);
  }
}
