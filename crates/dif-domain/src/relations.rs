// relations.rs
//! Tablas fijas del grafo de conocimiento: clases de aristas, acciones de
//! fármacos y estados de ensayos clínicos.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const COMPILER: [&str; 7] =
  ["has_modification", "has_product", "reactant_in", "acts_in", "has_variant", "translocates", "includes"];

pub const CAUSAL: [&str; 7] = ["increases",
                               "decreases",
                               "directly_increases",
                               "directly_decreases",
                               "causes_no_change",
                               "rate_limiting_step_of",
                               "regulates"];

pub const CORRELATIVE: [&str; 4] = ["association", "no_correlation", "positive_correlation", "negative_correlation"];

pub const OTHER: [&str; 10] = ["has_member",
                               "has_members",
                               "has_component",
                               "has_components",
                               "equivalent_to",
                               "is_a",
                               "sub_process_of",
                               "analogous_to",
                               "biomarker_for",
                               "prognostic_biomarker_for"];

pub const GENOMIC: [&str; 3] = ["transcribed_to", "translated_to", "orthologous"];

/// Clase de arista usada por las consultas de interactores druggables.
pub const CAUSAL_CLASS: &str = "causal";

/// Clase que engloba todas las aristas del grafo.
pub const ALL_EDGES: &str = "E";

static EDGE_MAPPER: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
  let bel_relation: Vec<&str> = CAUSAL.iter().chain(CORRELATIVE.iter()).chain(OTHER.iter()).chain(GENOMIC.iter()).copied().collect();
  let mut all = bel_relation.clone();
  all.extend(COMPILER.iter().copied());

  let mut m = HashMap::new();
  m.insert("bel_relation", bel_relation);
  m.insert("causal", CAUSAL.to_vec());
  m.insert("correlative", CORRELATIVE.to_vec());
  m.insert("other", OTHER.to_vec());
  m.insert("genomic", GENOMIC.to_vec());
  m.insert("compiler", COMPILER.to_vec());
  m.insert(ALL_EDGES, all);
  m
});

/// Devuelve las relaciones concretas que agrupa una clase de arista conocida.
/// `None` si la clase no está en la tabla (p.ej. una relación concreta como
/// `increases` o una superclase que no conocemos).
pub fn relations_for(edge_class: &str) -> Option<&'static [&'static str]> {
  EDGE_MAPPER.get(edge_class).map(|v| v.as_slice())
}

/// Efecto regulador de la acción de un fármaco sobre su diana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrugEffect {
  PositiveRegulator,
  NegativeRegulator,
  Neutral,
}

impl DrugEffect {
  /// Traduce la acción DrugBank (`inhibitor`, `agonist`, ...) a su efecto.
  /// Acciones desconocidas se consideran neutras.
  pub fn from_action(action: &str) -> Self {
    use DrugEffect::*;
    match action.trim().to_lowercase().as_str() {
      "activator" | "agonist" | "cofactor" | "inducer" | "partial agonist" | "stabilization" => PositiveRegulator,
      "aggregation inhibitor" | "antagonist" | "inhibitor" | "multitarget" | "neutralizer" | "potentiator"
      | "weak inhibitor" => NegativeRegulator,
      // allosteric modulator, antibody, binder, ligand, modulator, other/unknown, substrate
      _ => Neutral,
    }
  }
}

/// Estados de ensayo clínico que se consideran "en curso".
pub const ONGOING_TRIAL_STATUSES: [&str; 5] =
  ["Recruiting", "Enrolling by invitation", "Active, not recruiting", "Approved for marketing", "Available"];

pub fn is_trial_ongoing(status: &str) -> bool {
  ONGOING_TRIAL_STATUSES.iter().any(|s| s.eq_ignore_ascii_case(status.trim()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn edge_classes_expand_to_relations() {
    let causal = relations_for("causal").unwrap();
    assert!(causal.contains(&"directly_increases"));
    let all = relations_for(ALL_EDGES).unwrap();
    assert_eq!(all.len(), CAUSAL.len() + CORRELATIVE.len() + OTHER.len() + GENOMIC.len() + COMPILER.len());
    assert!(relations_for("increases").is_none());
  }

  #[test]
  fn drug_actions_map_to_effects() {
    assert_eq!(DrugEffect::from_action("inhibitor"), DrugEffect::NegativeRegulator);
    assert_eq!(DrugEffect::from_action("Agonist"), DrugEffect::PositiveRegulator);
    assert_eq!(DrugEffect::from_action("binder"), DrugEffect::Neutral);
    assert_eq!(DrugEffect::from_action("something new"), DrugEffect::Neutral);
  }

  #[test]
  fn trial_status_classes() {
    assert!(is_trial_ongoing("Recruiting"));
    assert!(is_trial_ongoing("Active, not recruiting"));
    assert!(!is_trial_ongoing("Completed"));
    assert!(!is_trial_ongoing("Withdrawn"));
  }
}
