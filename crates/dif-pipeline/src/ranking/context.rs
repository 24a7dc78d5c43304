use crate::errors::PipelineError;
use chrono::NaiveDate;
use dif_domain::{BioAssayCount, CacheRepository, DruggableRecord, EdgeCounts, PatentSummary, ProductSummary,
                 RelationshipScore, ScoringRules, TrialCriteria, TrialScore};
use dif_providers::{BioAssaySource, GraphStore};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde_json::Value as JsonValue;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Relación que se ignora al comparar fármaco e interactor.
const IGNORED_RELATION: &str = "regulates";

/// Datos agregados de un par (fármaco, interactor).
#[derive(Debug, Clone, Default)]
pub struct PairInfo {
  pub drugbank_id: Option<String>,
  pub relations: BTreeSet<String>,
  pub actions: Vec<String>,
}

/// Servicios que usan los pasos del ranking.
#[derive(Clone)]
pub struct RankingServices {
  pub graph: Arc<dyn GraphStore>,
  pub cache: Arc<dyn CacheRepository>,
  pub bioassays: Arc<dyn BioAssaySource>,
  pub print_sql: bool,
}

impl RankingServices {
  /// Ejecuta una consulta auxiliar en el graphstore.
  pub fn sql(&self, query: &str) -> Result<Vec<JsonValue>, PipelineError> {
    if self.print_sql {
      println!("{}\n", query);
    }
    debug!("consulta: {}", query);
    Ok(self.graph.sql(query)?)
  }
}

/// Estado compartido por los pasos de un ranking. Cada paso lee los pares
/// y deja sus resultados en su propio mapa.
pub struct RankingContext {
  pub services: RankingServices,
  pub rules: ScoringRules,
  pub criteria: TrialCriteria,
  pub today: NaiveDate,
  /// Pares (fármaco, interactor) en orden de aparición.
  pub pairs: IndexMap<(String, String), PairInfo>,
  pub relationships: HashMap<(String, String), RelationshipScore>,
  pub patents: HashMap<String, PatentSummary>,
  pub products: HashMap<String, ProductSummary>,
  /// Número de ensayos y puntuación, por nombre de fármaco.
  pub trials: HashMap<String, (usize, TrialScore)>,
  pub bioassays: HashMap<String, BioAssayCount>,
  pub edges: HashMap<String, EdgeCounts>,
}

impl RankingContext {
  pub fn new(rows: &[DruggableRecord],
             services: RankingServices,
             rules: ScoringRules,
             criteria: TrialCriteria,
             today: NaiveDate)
             -> Self {
    let mut pairs: IndexMap<(String, String), PairInfo> = IndexMap::new();
    for row in rows {
      let (Some(drug), Some(interactor)) = (row.drug.as_ref(), row.interactor_name.as_ref()) else {
        continue;
      };
      if row.relation_type.as_deref() == Some(IGNORED_RELATION) {
        continue;
      }
      let info = pairs.entry((drug.clone(), interactor.clone())).or_default();
      if info.drugbank_id.is_none() {
        info.drugbank_id = row.drugbank_id.clone();
      }
      if let Some(rel) = &row.relation_type {
        info.relations.insert(rel.clone());
      }
      for action in &row.drug_rel_actions {
        if !info.actions.contains(action) {
          info.actions.push(action.clone());
        }
      }
    }
    Self { services,
           rules,
           criteria,
           today,
           pairs,
           relationships: HashMap::new(),
           patents: HashMap::new(),
           products: HashMap::new(),
           trials: HashMap::new(),
           bioassays: HashMap::new(),
           edges: HashMap::new() }
  }

  /// Fármacos únicos con su identificador DrugBank (si lo tienen).
  pub fn drugs(&self) -> Vec<(String, Option<String>)> {
    let mut seen = IndexSet::new();
    let mut drugs = Vec::new();
    for ((drug, _), info) in &self.pairs {
      if seen.insert(drug.clone()) {
        drugs.push((drug.clone(), info.drugbank_id.clone()));
      }
    }
    drugs
  }

  /// Interactores únicos, en orden de aparición.
  pub fn interactors(&self) -> Vec<String> {
    let set: IndexSet<&String> = self.pairs.keys().map(|(_, i)| i).collect();
    set.into_iter().cloned().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use dif_domain::{DomainStubs, InMemoryCacheRepository};
  use dif_providers::{StaticBioAssays, StaticGraphStore};

  fn services() -> RankingServices {
    RankingServices { graph: Arc::new(StaticGraphStore::new()),
                      cache: Arc::new(InMemoryCacheRepository::new()),
                      bioassays: Arc::new(StaticBioAssays::default()),
                      print_sql: false }
  }

  #[test]
  fn pairs_merge_rows_and_skip_regulates() {
    let mut rows = DomainStubs::druggable_rows();
    let mut extra = rows[0].clone();
    extra.relation_type = Some("directly_increases".into());
    extra.drug_rel_actions = vec!["inhibitor".into(), "antagonist".into()];
    let mut regulates = rows[1].clone();
    regulates.interactor_name = Some("APP".into());
    regulates.relation_type = Some("regulates".into());
    rows.push(extra);
    rows.push(regulates);

    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let ctx = RankingContext::new(&rows, services(), ScoringRules::default(), TrialCriteria::default(), today);
    assert_eq!(ctx.pairs.len(), 4);
    let fyn = &ctx.pairs[&("dasatinib".to_string(), "FYN".to_string())];
    assert_eq!(fyn.relations.iter().collect::<Vec<_>>(), vec!["directly_increases", "increases"]);
    assert_eq!(fyn.actions, vec!["inhibitor", "antagonist"]);
    assert_eq!(ctx.interactors(), vec!["FYN", "GSK3B", "CDK5"]);
    assert_eq!(ctx.drugs()[0], ("dasatinib".to_string(), Some("DB01254".to_string())));
  }
}
