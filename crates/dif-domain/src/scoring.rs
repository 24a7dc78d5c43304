// scoring.rs
//! Reglas de puntuación del ranking. Todas usan las mismas dos constantes
//! configurables: `reward` (se suma cuando un criterio se cumple) y
//! `penalty` (se suma cuando falla; normalmente negativa).

use crate::drug_metadata::{BioAssayCount, PatentSummary, ProductSummary, TrialRecord};
use crate::relations::{is_trial_ongoing, DrugEffect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

const POSITIVE_RELATIONS: [&str; 2] = ["increases", "directly_increases"];
const NEGATIVE_RELATIONS: [&str; 2] = ["decreases", "directly_decreases"];

/// Pares de relaciones contradictorias entre interactor y objetivo.
const CONTRADICTIONS: [(&str, &str); 4] = [("increases", "decreases"),
                                           ("increases", "directly_decreases"),
                                           ("decreases", "directly_increases"),
                                           ("directly_increases", "directly_decreases")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
  pub reward: i64,
  pub penalty: i64,
}

impl Default for ScoringRules {
  fn default() -> Self {
    Self { reward: 1, penalty: -1 }
  }
}

/// Resultado de comparar la acción del fármaco con la relación
/// interactor → objetivo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipScore {
  /// Aristas contradictorias entre interactor y objetivo.
  pub target_interactor_contradiction: bool,
  /// Acciones contradictorias del fármaco sobre el interactor.
  pub drug_action_contradiction: bool,
  pub synergy: bool,
  pub points: i64,
}

/// Criterios de relevancia de los ensayos clínicos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialCriteria {
  pub disease_keyword: String,
  pub similar_diseases: Vec<String>,
}

impl Default for TrialCriteria {
  fn default() -> Self {
    Self { disease_keyword: "Alzheimer Disease".to_string(), similar_diseases: Vec::new() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialAssessment {
  pub trial_id: String,
  pub keyword_disease_investigated: bool,
  pub similar_disease_investigated: bool,
  pub trial_ongoing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialScore {
  pub trials: Vec<TrialAssessment>,
  pub points: i64,
}

impl ScoringRules {
  pub fn new(reward: i64, penalty: i64) -> Self {
    Self { reward, penalty }
  }

  /// `reward` si el interactor tiene BioAssays, `penalty` si no hay datos.
  pub fn bioassay_points(&self, bioassays: Option<&BioAssayCount>) -> i64 {
    if bioassays.map(BioAssayCount::has_data).unwrap_or(false) {
      self.reward
    } else {
      self.penalty
    }
  }

  /// Sin patentes vigentes se premia; cualquier patente vigente penaliza.
  pub fn patent_points(&self, patents: &PatentSummary) -> i64 {
    if patents.expired {
      self.reward
    } else {
      self.penalty
    }
  }

  /// Sólo un genérico aprobado se premia.
  pub fn generic_points(&self, products: Option<&ProductSummary>) -> i64 {
    match products {
      Some(p) if p.has_generic && p.has_approved_generic => self.reward,
      _ => self.penalty,
    }
  }

  /// Puntúa el par fármaco/interactor a partir de las relaciones del
  /// interactor con el objetivo y de las acciones del fármaco.
  ///
  /// La sinergia busca disminuir el objetivo: inhibir un interactor que lo
  /// aumenta, o activar uno que lo disminuye.
  pub fn relationship(&self, relations: &BTreeSet<String>, actions: &[String]) -> RelationshipScore {
    let mut score = RelationshipScore::default();
    let has = |r: &str| relations.contains(r);

    if CONTRADICTIONS.iter().any(|(a, b)| has(a) && has(b)) {
      score.target_interactor_contradiction = true;
      score.points = self.penalty;
      return score;
    }

    if actions.is_empty() {
      score.points = self.penalty;
      return score;
    }

    let effects: HashSet<DrugEffect> = actions.iter().map(|a| DrugEffect::from_action(a)).collect();
    let positive = effects.contains(&DrugEffect::PositiveRegulator);
    let negative = effects.contains(&DrugEffect::NegativeRegulator);
    if positive && negative {
      score.drug_action_contradiction = true;
      score.points = self.penalty;
      return score;
    }

    let increases = POSITIVE_RELATIONS.iter().any(|r| has(r));
    let decreases = NEGATIVE_RELATIONS.iter().any(|r| has(r));
    score.synergy = match (negative, positive) {
      (true, _) => !decreases && increases,
      (_, true) => !increases && decreases,
      _ => false,
    };
    score.points = if score.synergy { self.reward } else { self.penalty };
    score
  }

  /// Parte de `reward` y ajusta por cada ensayo: un ensayo en curso de la
  /// enfermedad clave o de otra enfermedad penaliza; uno de una enfermedad
  /// similar suma el doble de `reward`.
  pub fn trial_points(&self, trials: &[TrialRecord], criteria: &TrialCriteria) -> TrialScore {
    let mut points = self.reward;
    let mut assessed = Vec::with_capacity(trials.len());
    for trial in trials {
      let ongoing = trial.status.as_deref().map(is_trial_ongoing).unwrap_or(false);
      let mut a = TrialAssessment { trial_id: trial.trial_id.clone(),
                                    keyword_disease_investigated: false,
                                    similar_disease_investigated: false,
                                    trial_ongoing: false };
      let keyword = trial.conditions.iter().any(|c| mentions(c, &criteria.disease_keyword));
      if keyword {
        a.keyword_disease_investigated = true;
        if ongoing {
          a.trial_ongoing = true;
          points += self.penalty;
        }
      } else if trial.conditions
                     .iter()
                     .any(|c| criteria.similar_diseases.iter().any(|s| mentions(c, s)))
      {
        a.similar_disease_investigated = true;
        points += self.reward * 2;
      } else if ongoing {
        a.trial_ongoing = true;
        points += self.penalty;
      }
      assessed.push(a);
    }
    TrialScore { trials: assessed, points }
  }
}

/// La condición nombra la enfermedad, sin distinguir mayúsculas
/// ("Alzheimer Disease, Late Onset" nombra "alzheimer disease").
fn mentions(condition: &str, disease: &str) -> bool {
  let disease = disease.trim();
  !disease.is_empty() && condition.to_lowercase().contains(&disease.to_lowercase())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rels(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  fn actions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  fn trial(id: &str, status: &str, conditions: &[&str]) -> TrialRecord {
    TrialRecord { trial_id: id.to_string(),
                  status: Some(status.to_string()),
                  conditions: conditions.iter().map(|s| s.to_string()).collect(),
                  drugs_in_trial: Vec::new() }
  }

  #[test]
  fn bioassay_points_follow_data_presence() {
    let rules = ScoringRules::new(1, -1);
    let with = BioAssayCount { symbol: "FYN".into(), uniprot_accession: Some("P06241".into()), count: Some(12) };
    let zero = BioAssayCount { count: Some(0), ..with.clone() };
    let missing = BioAssayCount { count: None, uniprot_accession: None, ..with.clone() };
    assert_eq!(rules.bioassay_points(Some(&with)), 1);
    assert_eq!(rules.bioassay_points(Some(&zero)), -1);
    assert_eq!(rules.bioassay_points(Some(&missing)), -1);
    assert_eq!(rules.bioassay_points(None), -1);

    let custom = ScoringRules::new(5, -3);
    assert_eq!(custom.bioassay_points(Some(&with)), 5);
    assert_eq!(custom.bioassay_points(None), -3);
  }

  #[test]
  fn contradicting_relations_penalize() {
    let s = ScoringRules::default().relationship(&rels(&["increases", "decreases"]), &actions(&["inhibitor"]));
    assert!(s.target_interactor_contradiction);
    assert!(!s.synergy);
    assert_eq!(s.points, -1);
  }

  #[test]
  fn missing_actions_penalize() {
    let s = ScoringRules::default().relationship(&rels(&["increases"]), &[]);
    assert_eq!(s.points, -1);
    assert!(!s.target_interactor_contradiction && !s.drug_action_contradiction);
  }

  #[test]
  fn contradicting_actions_penalize() {
    let s = ScoringRules::default().relationship(&rels(&["increases"]), &actions(&["inhibitor", "agonist"]));
    assert!(s.drug_action_contradiction);
    assert_eq!(s.points, -1);
  }

  #[test]
  fn synergy_rules() {
    let r = ScoringRules::new(2, -1);
    assert!(r.relationship(&rels(&["increases"]), &actions(&["inhibitor"])).synergy);
    assert!(r.relationship(&rels(&["directly_decreases"]), &actions(&["agonist"])).synergy);
    assert!(!r.relationship(&rels(&["decreases"]), &actions(&["antagonist"])).synergy);
    assert!(!r.relationship(&rels(&["increases"]), &actions(&["activator"])).synergy);
    let neutral = r.relationship(&rels(&["increases"]), &actions(&["binder"]));
    assert!(!neutral.synergy);
    assert_eq!(neutral.points, -1);
    assert_eq!(r.relationship(&rels(&["increases"]), &actions(&["inhibitor"])).points, 2);
  }

  #[test]
  fn patent_and_generic_points() {
    let rules = ScoringRules::default();
    let expired = PatentSummary { drug_name: "x".into(), has_patent: true, expired: true, patent_numbers: vec![] };
    let active = PatentSummary { expired: false, ..expired.clone() };
    assert_eq!(rules.patent_points(&expired), 1);
    assert_eq!(rules.patent_points(&active), -1);

    let generic = ProductSummary { drug_name: "x".into(),
                                   has_generic: true,
                                   has_approved_generic: true,
                                   generic_products: vec!["g".into()] };
    let unapproved = ProductSummary { has_approved_generic: false, ..generic.clone() };
    assert_eq!(rules.generic_points(Some(&generic)), 1);
    assert_eq!(rules.generic_points(Some(&unapproved)), -1);
    assert_eq!(rules.generic_points(None), -1);
  }

  #[test]
  fn trial_points_accumulate() {
    let rules = ScoringRules::default();
    let criteria = TrialCriteria { disease_keyword: "Alzheimer Disease".into(),
                                   similar_diseases: vec!["Parkinson Disease".into()] };
    assert_eq!(rules.trial_points(&[], &criteria).points, 1);

    let trials = vec![trial("NCT1", "Recruiting", &["Alzheimer Disease"]),
                      trial("NCT2", "Completed", &["Alzheimer Disease"]),
                      trial("NCT3", "Completed", &["Parkinson Disease"]),
                      trial("NCT4", "Active, not recruiting", &["Leukemia"])];
    let score = rules.trial_points(&trials, &criteria);
    // 1 - 1 (NCT1) + 0 (NCT2) + 2 (NCT3) - 1 (NCT4)
    assert_eq!(score.points, 1);
    assert!(score.trials[0].keyword_disease_investigated && score.trials[0].trial_ongoing);
    assert!(score.trials[2].similar_disease_investigated);
    assert!(score.trials[3].trial_ongoing);
  }

  #[test]
  fn disease_keyword_matches_inside_longer_conditions() {
    let rules = ScoringRules::default();
    let criteria = TrialCriteria { disease_keyword: "Alzheimer Disease".into(),
                                   similar_diseases: vec!["parkinson".into(), " ".into()] };
    let late_onset = [trial("NCT1", "Recruiting", &["Alzheimer Disease, Late Onset"])];
    let score = rules.trial_points(&late_onset, &criteria);
    assert!(score.trials[0].keyword_disease_investigated);
    assert_eq!(score.points, 0);

    let similar = [trial("NCT2", "Completed", &["Parkinson Disease"])];
    assert!(rules.trial_points(&similar, &criteria).trials[0].similar_disease_investigated);

    let unrelated = [trial("NCT3", "Completed", &["Diabetes"])];
    let score = rules.trial_points(&unrelated, &criteria);
    assert!(!score.trials[0].similar_disease_investigated);
    assert_eq!(score.points, 1);
  }
}
