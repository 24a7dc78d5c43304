use dif_domain::{CacheRepository, DomainStubs, InMemoryCacheRepository, InteractorQuery, InteractorRecord};
use dif_pipeline::{InteractorFinder, PipelineError};
use dif_providers::StaticGraphStore;
use serde_json::{json, Value as JsonValue};
use std::collections::HashSet;
use std::sync::Arc;

fn to_json<T: serde::Serialize>(rows: &[T]) -> Vec<JsonValue> {
  rows.iter().map(|r| serde_json::to_value(r).unwrap()).collect()
}

fn scripted_store() -> StaticGraphStore {
  StaticGraphStore::new().with_rows("capsule_interactor", vec![])
                         .with_rows("has_drug_target", to_json(&DomainStubs::druggable_rows()))
                         .with_rows("class:bel, as:interactor}", to_json(&DomainStubs::interactor_rows()))
}

#[test]
fn query_flags_shape_the_match_statement() {
  let store = Arc::new(scripted_store());
  let cache = Arc::new(InMemoryCacheRepository::new());
  let query = InteractorQuery::new("mapt").unwrap().with_edge("causal").unwrap().with_pmods(["pho"]);
  let mut finder = InteractorFinder::new(store.clone(), cache, query);
  finder.find_interactors().expect("find");

  let sql = &store.queries()[0];
  assert!(sql.starts_with("MATCH {class:pmod, as:pmod, WHERE:(type in ['pho'] OR name like '%phosphorylat%')}<-has__pmod-"));
  assert!(sql.contains("name in ['MAPT', 'Mapt', 'mapt']"));
  assert!(sql.contains("{class:causal, as:relation"));
  assert!(sql.contains("pmod.type as pmod_type"));
}

#[test]
fn known_edge_class_filters_relations() {
  let cache = Arc::new(InMemoryCacheRepository::new());
  let causal = InteractorQuery::new("MAPT").unwrap().with_edge("causal").unwrap();
  let rows = InteractorFinder::new(Arc::new(scripted_store()), cache.clone(), causal).find_interactors().unwrap();
  assert_eq!(rows.len(), 3);
  assert!(rows.iter().all(|r| r.relation_type.as_deref() != Some("association")));

  let all = InteractorQuery::new("MAPT").unwrap();
  let rows = InteractorFinder::new(Arc::new(scripted_store()), cache, all).find_interactors().unwrap();
  assert_eq!(rows.len(), 4);
}

#[test]
fn rows_are_deduplicated_and_species_normalised() {
  let row = json!({"interactor_name": "FYN", "relation_type": "increases", "pmid": "1001"});
  let store = Arc::new(StaticGraphStore::new().with_rows("MATCH", vec![row.clone(), row]));
  let cache = Arc::new(InMemoryCacheRepository::new());
  let mut finder = InteractorFinder::new(store, cache, InteractorQuery::new("MAPT").unwrap());
  let rows = finder.find_interactors().unwrap();
  assert_eq!(rows,
             vec![InteractorRecord { target_species: Some(0),
                                     pmid: Some(1001),
                                     interactor_name: Some("FYN".into()),
                                     relation_type: Some("increases".into()),
                                     ..Default::default() }]);
  assert_eq!(finder.unique_interactors(), vec!["FYN".to_string()]);
}

#[test]
fn druggable_interactors_are_a_subset_of_all_interactors() {
  let cache = Arc::new(InMemoryCacheRepository::new());
  let store = Arc::new(scripted_store());
  let query = InteractorQuery::new("MAPT").unwrap().with_edge("causal").unwrap();
  let mut finder = InteractorFinder::new(store.clone(), cache, query);

  finder.find_interactors().unwrap();
  let all: HashSet<String> = finder.unique_interactors().into_iter().collect();
  let druggable = finder.druggable_interactors().unwrap();
  assert_eq!(druggable.len(), 4);
  let druggable_names: HashSet<String> = finder.unique_interactors().into_iter().collect();
  assert!(druggable_names.is_subset(&all));

  // pura + cápsula
  assert_eq!(store.calls(), 3);
  assert_eq!(finder.unique_drugs(), vec!["dasatinib", "lithium", "roscovitine", "flavopiridol"]);
  assert_eq!(finder.drug_and_interactors()[0], ("dasatinib".to_string(), "FYN".to_string()));
}

#[test]
fn cached_rows_are_reused_only_for_the_same_query() {
  let cache = Arc::new(InMemoryCacheRepository::new());
  let query = InteractorQuery::new("MAPT").unwrap();
  let first = InteractorFinder::new(Arc::new(scripted_store()), cache.clone(), query.clone()).druggable_interactors()
                                                                                           .unwrap();

  let offline = Arc::new(StaticGraphStore::unavailable());
  let mut again = InteractorFinder::new(offline.clone(), cache.clone(), query);
  assert_eq!(again.druggable_interactors().unwrap(), first);
  assert_eq!(offline.calls(), 0);

  let pho = InteractorQuery::new("MAPT").unwrap().with_pmods(["pho"]);
  let mut other = InteractorFinder::new(offline.clone(), cache, pho);
  assert!(matches!(other.druggable_interactors(), Err(PipelineError::Provider(_))));
  assert!(offline.calls() > 0);
}

#[test]
fn empty_results_are_not_cached() {
  let cache = Arc::new(InMemoryCacheRepository::new());
  let store = Arc::new(StaticGraphStore::new());
  let query = InteractorQuery::new("NOPE").unwrap();
  let mut finder = InteractorFinder::new(store.clone(), cache.clone(), query.clone());
  assert!(finder.find_interactors().unwrap().is_empty());
  assert!(cache.get_interactors(&query.cache_key(false)).unwrap().is_empty());
  finder.find_interactors().unwrap();
  assert_eq!(store.calls(), 2);
}

#[test]
fn prefilled_cache_answers_without_the_graphstore() {
  let query = InteractorQuery::new("MAPT").unwrap();
  let cache = Arc::new(DomainStubs::sample_repo(&query.cache_key(true)));
  let offline = Arc::new(StaticGraphStore::unavailable());
  let mut finder = InteractorFinder::new(offline.clone(), cache, query);
  assert_eq!(finder.druggable_interactors().unwrap(), DomainStubs::druggable_rows());
  assert_eq!(finder.unique_interactors(), vec!["FYN", "GSK3B", "CDK5"]);
  assert_eq!(offline.calls(), 0);
}
