use dif_domain::{BioAssayCount, CacheRepository, DomainStubs, EdgeCounts, InteractorQuery, PatentSummary, ProductSummary,
                 TrialRecord};
use dif_persistence::{open_cache, DieselCacheRepository};
use uuid::Uuid;

fn temp_repo() -> (DieselCacheRepository, std::path::PathBuf) {
  // Fichero temporal: un pool sobre `:memory:` daría una base distinta por conexión
  let tmp_path = std::env::temp_dir().join(format!("dif_test_{}", Uuid::new_v4())).join("cache.db");
  let db_url = tmp_path.to_str().unwrap().to_string();
  let repo = open_cache(&db_url).expect("failed to open cache");
  (repo, tmp_path)
}

#[test]
fn druggable_rows_round_trip_in_order() {
  let (repo, _path) = temp_repo();
  let key = InteractorQuery::new("MAPT").unwrap().cache_key(true);
  let rows = DomainStubs::druggable_rows();
  repo.save_druggable(&key, "MAPT", &rows).expect("save druggable");
  let loaded = repo.get_druggable(&key).expect("get druggable");
  assert_eq!(loaded, rows);
  assert_eq!(loaded[2].drug_rel_actions, vec!["inhibitor".to_string(), "activator".to_string()]);
  // otra combinación de filtros no reutiliza las filas
  let other = InteractorQuery::new("MAPT").unwrap().with_pmods(["pho"]).cache_key(true);
  assert!(repo.get_druggable(&other).unwrap().is_empty());
}

#[test]
fn saving_again_replaces_rows_under_the_key() {
  let (repo, _path) = temp_repo();
  let rows = DomainStubs::interactor_rows();
  repo.save_interactors("k", "MAPT", &rows).unwrap();
  repo.save_interactors("k", "MAPT", &rows[..1]).unwrap();
  let loaded = repo.get_interactors("k").unwrap();
  assert_eq!(loaded.len(), 1);
  assert_eq!(loaded[0], rows[0]);
}

#[test]
fn metadata_tables_round_trip() {
  let (repo, _path) = temp_repo();
  let bio = BioAssayCount { symbol: "FYN".into(), uniprot_accession: Some("P06241".into()), count: Some(1520) };
  let no_data = BioAssayCount { symbol: "CDK5".into(), uniprot_accession: None, count: None };
  repo.save_bioassay(&bio).unwrap();
  repo.save_bioassay(&no_data).unwrap();
  assert_eq!(repo.get_bioassay("FYN").unwrap(), Some(bio));
  assert_eq!(repo.get_bioassay("CDK5").unwrap(), Some(no_data));
  assert_eq!(repo.get_bioassay("GSK3B").unwrap(), None);

  let edges = EdgeCounts::new("FYN", 12, 30);
  repo.save_edge_counts(&edges).unwrap();
  repo.save_edge_counts(&edges).unwrap();
  assert_eq!(repo.get_edge_counts("FYN").unwrap(), Some(edges));

  let patents = PatentSummary { drug_name: "dasatinib".into(),
                                has_patent: true,
                                expired: false,
                                patent_numbers: vec!["US6596746".into()] };
  repo.save_patents(&patents).unwrap();
  assert_eq!(repo.get_patents("dasatinib").unwrap(), Some(patents));

  let products = ProductSummary { drug_name: "lithium".into(),
                                  has_generic: true,
                                  has_approved_generic: true,
                                  generic_products: vec!["Lithium Carbonate".into()] };
  repo.save_products(&products).unwrap();
  assert_eq!(repo.get_products("lithium").unwrap(), Some(products));
  assert_eq!(repo.get_products("dasatinib").unwrap(), None);
}

#[test]
fn trials_marker_row_means_checked_without_trials() {
  let (repo, _path) = temp_repo();
  assert_eq!(repo.get_trials("DB01254").unwrap(), None);
  repo.save_trials("DB01254", "dasatinib", &[]).unwrap();
  assert_eq!(repo.get_trials("DB01254").unwrap(), Some(vec![]));

  let trial = TrialRecord { trial_id: "NCT02121925".into(),
                            status: Some("Completed".into()),
                            conditions: vec!["Alzheimer Disease".into()],
                            drugs_in_trial: vec!["Lithium".into()] };
  repo.save_trials("DB01356", "lithium", &[trial.clone()]).unwrap();
  assert_eq!(repo.get_trials("DB01356").unwrap(), Some(vec![trial]));
}

#[test]
fn reopening_the_file_keeps_the_cache() {
  let (repo, path) = temp_repo();
  repo.save_edge_counts(&EdgeCounts::new("GSK3B", 1, 2)).unwrap();
  drop(repo);
  let reopened = open_cache(path.to_str().unwrap()).unwrap();
  assert_eq!(reopened.get_edge_counts("GSK3B").unwrap().map(|e| e.both_count), Some(3));
}
