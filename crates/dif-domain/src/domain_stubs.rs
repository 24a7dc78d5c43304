use crate::cache_repository::{CacheRepository, InMemoryCacheRepository};
use crate::interactor::{DruggableRecord, InteractorRecord};

pub struct DomainStubs;

impl DomainStubs {
    /// Interactores generales de MAPT: tres proteínas y un proceso biológico.
    pub fn interactor_rows() -> Vec<InteractorRecord> {
        let row = |name: &str, kind: &str, bel: &str, relation: &str, pmid: i64| InteractorRecord {
            target_species: Some(9606),
            pmid: Some(pmid),
            interactor_type: Some(kind.to_string()),
            interactor_name: Some(name.to_string()),
            interactor_bel: Some(bel.to_string()),
            relation_type: Some(relation.to_string()),
            target_bel: Some("p(HGNC:MAPT)".to_string()),
            target_type: Some("protein".to_string()),
            target_symbol: Some("MAPT".to_string()),
            ..Default::default()
        };
        vec![row("FYN", "protein", "p(HGNC:FYN)", "increases", 1001),
             row("GSK3B", "protein", "p(HGNC:GSK3B)", "directly_increases", 1002),
             row("CDK5", "protein", "p(HGNC:CDK5)", "increases", 1004),
             row("apoptotic process", "bio_process", "bp(GO:\"apoptotic process\")", "association", 1003)]
    }

    /// Interactores druggables de MAPT. Cubren sinergia (dasatinib/FYN),
    /// contradicción de acciones (CDK5) y un fármaco sin acciones conocidas.
    pub fn druggable_rows() -> Vec<DruggableRecord> {
        let row = |drug: &str, db: &str, name: &str, relation: &str, actions: &[&str]| DruggableRecord {
            drug: Some(drug.to_string()),
            interactor_bel: Some(format!("p(HGNC:{})", name)),
            interactor_type: Some("protein".to_string()),
            interactor_name: Some(name.to_string()),
            relation_type: Some(relation.to_string()),
            target_bel: Some("p(HGNC:MAPT)".to_string()),
            target_symbol: Some("MAPT".to_string()),
            target_type: Some("protein".to_string()),
            pmid: Some(2001),
            rel_pub_year: Some(2015),
            drug_rel_actions: actions.iter().map(|a| a.to_string()).collect(),
            drugbank_id: Some(db.to_string()),
            ..Default::default()
        };
        vec![row("dasatinib", "DB01254", "FYN", "increases", &["inhibitor"]),
             row("lithium", "DB01356", "GSK3B", "directly_increases", &["inhibitor"]),
             row("roscovitine", "DB06195", "CDK5", "increases", &["inhibitor", "activator"]),
             row("flavopiridol", "DB03496", "CDK5", "increases", &[])]
    }

    /// Repositorio en memoria con las filas druggables bajo `query_key`.
    pub fn sample_repo(query_key: &str) -> InMemoryCacheRepository {
        let repo = InMemoryCacheRepository::new();
        let _ = repo.save_druggable(query_key, "MAPT", &Self::druggable_rows());
        repo
    }
}
