// summary.rs
//! Tablas de resultados del ranking.

use crate::ranking::context::RankingContext;
use dif_domain::Tabular;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Una fila por par (fármaco, interactor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
  pub drug: String,
  pub interactor: String,
  pub drugbank_id: Option<String>,
  pub relation_types: Vec<String>,
  pub target_interactor_contradiction: bool,
  pub drug_action_contradiction: bool,
  pub synergy: bool,
  pub relationship_points: i64,
  pub has_patent: bool,
  pub patents_expired: bool,
  pub patent_points: i64,
  pub has_generic: bool,
  pub has_approved_generic: bool,
  pub generic_points: i64,
  pub num_trials: usize,
  pub trial_points: i64,
  pub bioassay_count: Option<u64>,
  pub bioassay_points: i64,
  pub in_edges: i64,
  pub out_edges: i64,
  pub both_edges: i64,
  pub total: i64,
}

/// Una fila por interactor, con su mejor fármaco.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
  pub interactor: String,
  pub num_drugs: usize,
  pub bioassay_count: Option<u64>,
  pub bioassay_points: i64,
  pub in_edges: i64,
  pub out_edges: i64,
  pub both_edges: i64,
  pub best_drug: String,
  pub best_total: i64,
}

/// Resultado de `Ranker::summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Summary {
  Pairs(Vec<SummaryRow>),
  Pivot(Vec<PivotRow>),
}

impl Summary {
  pub fn len(&self) -> usize {
    match self {
      Summary::Pairs(rows) => rows.len(),
      Summary::Pivot(rows) => rows.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

pub(crate) fn summary_rows(ctx: &RankingContext) -> Vec<SummaryRow> {
  let rules = ctx.rules;
  let mut rows = Vec::with_capacity(ctx.pairs.len());
  for ((drug, interactor), info) in &ctx.pairs {
    let rel = ctx.relationships.get(&(drug.clone(), interactor.clone())).copied().unwrap_or_default();
    let patents = ctx.patents.get(drug);
    let products = ctx.products.get(drug);
    let (num_trials, trial_points) =
      ctx.trials.get(drug).map(|(n, s)| (*n, s.points)).unwrap_or((0, rules.reward));
    let bioassay = ctx.bioassays.get(interactor);
    let edges = ctx.edges.get(interactor);

    // sin datos de patentes se asume que no tiene ninguna vigente
    let patent_points = patents.map(|p| rules.patent_points(p)).unwrap_or(rules.reward);
    let generic_points = rules.generic_points(products);
    let bioassay_points = rules.bioassay_points(bioassay);
    let total = rel.points + patent_points + generic_points + trial_points + bioassay_points;

    rows.push(SummaryRow { drug: drug.clone(),
                           interactor: interactor.clone(),
                           drugbank_id: info.drugbank_id.clone(),
                           relation_types: info.relations.iter().cloned().collect(),
                           target_interactor_contradiction: rel.target_interactor_contradiction,
                           drug_action_contradiction: rel.drug_action_contradiction,
                           synergy: rel.synergy,
                           relationship_points: rel.points,
                           has_patent: patents.map(|p| p.has_patent).unwrap_or(false),
                           patents_expired: patents.map(|p| p.expired).unwrap_or(true),
                           patent_points,
                           has_generic: products.map(|p| p.has_generic).unwrap_or(false),
                           has_approved_generic: products.map(|p| p.has_approved_generic).unwrap_or(false),
                           generic_points,
                           num_trials,
                           trial_points,
                           bioassay_count: bioassay.and_then(|b| b.count),
                           bioassay_points,
                           in_edges: edges.map(|e| e.in_count).unwrap_or(0),
                           out_edges: edges.map(|e| e.out_count).unwrap_or(0),
                           both_edges: edges.map(|e| e.both_count).unwrap_or(0),
                           total });
  }
  rows
}

impl PivotRow {
  fn seed(row: &SummaryRow) -> Self {
    Self { interactor: row.interactor.clone(),
           num_drugs: 0,
           bioassay_count: row.bioassay_count,
           bioassay_points: row.bioassay_points,
           in_edges: row.in_edges,
           out_edges: row.out_edges,
           both_edges: row.both_edges,
           best_drug: row.drug.clone(),
           best_total: row.total }
  }
}

/// Agrupa las filas por interactor. Ordena por mejor total descendente y
/// después por nombre.
pub fn pivot_rows(rows: &[SummaryRow]) -> Vec<PivotRow> {
  let mut by_interactor: IndexMap<&str, PivotRow> = IndexMap::new();
  for row in rows {
    let entry = by_interactor.entry(row.interactor.as_str()).or_insert_with(|| PivotRow::seed(row));
    entry.num_drugs += 1;
    if row.total > entry.best_total {
      entry.best_total = row.total;
      entry.best_drug = row.drug.clone();
    }
  }
  let mut pivot: Vec<PivotRow> = by_interactor.into_values().collect();
  pivot.sort_by(|a, b| b.best_total.cmp(&a.best_total).then_with(|| a.interactor.cmp(&b.interactor)));
  pivot
}

fn flag(value: bool) -> String {
  value.to_string()
}

fn opt<T: ToString>(value: &Option<T>) -> String {
  value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

impl Tabular for SummaryRow {
  fn columns() -> &'static [&'static str] {
    &["drug",
      "interactor",
      "drugbank_id",
      "relation_types",
      "target_interactor_contradiction",
      "drug_action_contradiction",
      "synergy",
      "relationship_points",
      "has_patent",
      "patents_expired",
      "patent_points",
      "has_generic",
      "has_approved_generic",
      "generic_points",
      "num_trials",
      "trial_points",
      "bioassay_count",
      "bioassay_points",
      "in_edges",
      "out_edges",
      "both_edges",
      "total"]
  }

  fn cells(&self) -> Vec<String> {
    vec![self.drug.clone(),
         self.interactor.clone(),
         opt(&self.drugbank_id),
         self.relation_types.join("|"),
         flag(self.target_interactor_contradiction),
         flag(self.drug_action_contradiction),
         flag(self.synergy),
         self.relationship_points.to_string(),
         flag(self.has_patent),
         flag(self.patents_expired),
         self.patent_points.to_string(),
         flag(self.has_generic),
         flag(self.has_approved_generic),
         self.generic_points.to_string(),
         self.num_trials.to_string(),
         self.trial_points.to_string(),
         opt(&self.bioassay_count),
         self.bioassay_points.to_string(),
         self.in_edges.to_string(),
         self.out_edges.to_string(),
         self.both_edges.to_string(),
         self.total.to_string()]
  }
}

impl Tabular for PivotRow {
  fn columns() -> &'static [&'static str] {
    &["interactor",
      "num_drugs",
      "bioassay_count",
      "bioassay_points",
      "in_edges",
      "out_edges",
      "both_edges",
      "best_drug",
      "best_total"]
  }

  fn cells(&self) -> Vec<String> {
    vec![self.interactor.clone(),
         self.num_drugs.to_string(),
         opt(&self.bioassay_count),
         self.bioassay_points.to_string(),
         self.in_edges.to_string(),
         self.out_edges.to_string(),
         self.both_edges.to_string(),
         self.best_drug.clone(),
         self.best_total.to_string()]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(drug: &str, interactor: &str, total: i64) -> SummaryRow {
    SummaryRow { drug: drug.into(),
                 interactor: interactor.into(),
                 drugbank_id: None,
                 relation_types: vec!["increases".into()],
                 target_interactor_contradiction: false,
                 drug_action_contradiction: false,
                 synergy: false,
                 relationship_points: 0,
                 has_patent: false,
                 patents_expired: true,
                 patent_points: 0,
                 has_generic: false,
                 has_approved_generic: false,
                 generic_points: 0,
                 num_trials: 0,
                 trial_points: 0,
                 bioassay_count: Some(3),
                 bioassay_points: 1,
                 in_edges: 1,
                 out_edges: 2,
                 both_edges: 3,
                 total }
  }

  #[test]
  fn pivot_keeps_best_drug_and_sorts() {
    let rows = vec![row("a", "CDK5", 1), row("b", "FYN", 3), row("c", "CDK5", 2), row("d", "ABL1", 3)];
    let pivot = pivot_rows(&rows);
    let order: Vec<&str> = pivot.iter().map(|p| p.interactor.as_str()).collect();
    assert_eq!(order, vec!["ABL1", "FYN", "CDK5"]);
    assert_eq!(pivot[2].num_drugs, 2);
    assert_eq!(pivot[2].best_drug, "c");
    assert_eq!(pivot[2].best_total, 2);
  }

  #[test]
  fn cells_match_columns() {
    let r = row("a", "FYN", 1);
    assert_eq!(r.cells().len(), SummaryRow::columns().len());
    let p = &pivot_rows(&[r])[0];
    assert_eq!(p.cells().len(), PivotRow::columns().len());
  }
}
