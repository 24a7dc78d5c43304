mod cache_repository;
mod domain_stubs;
mod drug_metadata;
mod errors;
mod interactor;
mod lenient;
mod query;
mod relations;
mod scoring;
mod table;

pub use cache_repository::{CacheRepository, InMemoryCacheRepository};
pub use domain_stubs::DomainStubs;
pub use drug_metadata::{BioAssayCount, EdgeCounts, PatentSummary, ProductSummary, TrialRecord};
pub use errors::DomainError;
pub use interactor::{dedup_rows, unique_interactors, DruggableRecord, InteractorRecord};
pub use query::{clinical_trials_sql, in_count_sql, out_count_sql, parse_pmods, patents_products_sql, uniprot_id_sql,
                InteractorQuery, DEFAULT_NODE_TYPE};
// Tablas fijas del grafo, expuestas para el filtrado de relaciones y los pasos del ranking
pub use relations::{is_trial_ongoing, relations_for, DrugEffect, ALL_EDGES, CAUSAL_CLASS};
pub use scoring::{RelationshipScore, ScoringRules, TrialAssessment, TrialCriteria, TrialScore};
pub use table::Tabular;
