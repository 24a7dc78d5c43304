use crate::drug_metadata::{BioAssayCount, EdgeCounts, PatentSummary, ProductSummary, TrialRecord};
use crate::interactor::{DruggableRecord, InteractorRecord};
use crate::DomainError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Trait que define la caché local de resultados del grafo y de metadatos
/// usados por el ranking.
///
/// Las filas de interactores se guardan bajo la clave de consulta
/// (`InteractorQuery::cache_key`). Los metadatos se guardan por símbolo,
/// nombre de fármaco o identificador DrugBank, y no se invalidan nunca.
pub trait CacheRepository: Send + Sync {
    /// Filas de interactores generales guardadas bajo `query_key`. Vacío si
    /// no hay nada en caché.
    fn get_interactors(&self, query_key: &str) -> Result<Vec<InteractorRecord>, DomainError>;

    /// Reemplaza las filas guardadas bajo `query_key`.
    fn save_interactors(&self, query_key: &str, symbol: &str, rows: &[InteractorRecord]) -> Result<(), DomainError>;

    fn get_druggable(&self, query_key: &str) -> Result<Vec<DruggableRecord>, DomainError>;
    fn save_druggable(&self, query_key: &str, symbol: &str, rows: &[DruggableRecord]) -> Result<(), DomainError>;

    fn get_bioassay(&self, symbol: &str) -> Result<Option<BioAssayCount>, DomainError>;
    fn save_bioassay(&self, bioassay: &BioAssayCount) -> Result<(), DomainError>;

    fn get_edge_counts(&self, symbol: &str) -> Result<Option<EdgeCounts>, DomainError>;
    fn save_edge_counts(&self, counts: &EdgeCounts) -> Result<(), DomainError>;

    fn get_patents(&self, drug_name: &str) -> Result<Option<PatentSummary>, DomainError>;
    fn save_patents(&self, patents: &PatentSummary) -> Result<(), DomainError>;

    fn get_products(&self, drug_name: &str) -> Result<Option<ProductSummary>, DomainError>;
    fn save_products(&self, products: &ProductSummary) -> Result<(), DomainError>;

    /// Ensayos de un fármaco. `Some(vec![])` significa "consultado, sin
    /// ensayos"; `None` que nunca se consultó.
    fn get_trials(&self, drugbank_id: &str) -> Result<Option<Vec<TrialRecord>>, DomainError>;

    /// Guarda los ensayos de un fármaco. Una lista vacía deja constancia de
    /// que el fármaco no tiene ensayos.
    fn save_trials(&self, drugbank_id: &str, drug_name: &str, trials: &[TrialRecord]) -> Result<(), DomainError>;
}

/// Implementación en memoria para tests y desarrollo.
#[derive(Default)]
pub struct InMemoryCacheRepository {
    interactors: Arc<Mutex<HashMap<String, Vec<InteractorRecord>>>>,
    druggable: Arc<Mutex<HashMap<String, Vec<DruggableRecord>>>>,
    bioassays: Arc<Mutex<HashMap<String, BioAssayCount>>>,
    edges: Arc<Mutex<HashMap<String, EdgeCounts>>>,
    patents: Arc<Mutex<HashMap<String, PatentSummary>>>,
    products: Arc<Mutex<HashMap<String, ProductSummary>>>,
    trials: Arc<Mutex<HashMap<String, Vec<TrialRecord>>>>,
}

impl InMemoryCacheRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Helper to map poisoned mutex errors into DomainError
    fn lock_map<'a, T>(&'a self, m: &'a Mutex<T>, name: &str) -> Result<std::sync::MutexGuard<'a, T>, DomainError> {
        m.lock()
         .map_err(|e| DomainError::ExternalError(format!("Mutex '{}' poisoned: {}", name, e)))
    }
}

impl CacheRepository for InMemoryCacheRepository {
    fn get_interactors(&self, query_key: &str) -> Result<Vec<InteractorRecord>, DomainError> {
        let map = self.lock_map(&self.interactors, "interactors")?;
        Ok(map.get(query_key).cloned().unwrap_or_default())
    }

    fn save_interactors(&self, query_key: &str, _symbol: &str, rows: &[InteractorRecord]) -> Result<(), DomainError> {
        let mut map = self.lock_map(&self.interactors, "interactors")?;
        map.insert(query_key.to_string(), rows.to_vec());
        Ok(())
    }

    fn get_druggable(&self, query_key: &str) -> Result<Vec<DruggableRecord>, DomainError> {
        let map = self.lock_map(&self.druggable, "druggable")?;
        Ok(map.get(query_key).cloned().unwrap_or_default())
    }

    fn save_druggable(&self, query_key: &str, _symbol: &str, rows: &[DruggableRecord]) -> Result<(), DomainError> {
        let mut map = self.lock_map(&self.druggable, "druggable")?;
        map.insert(query_key.to_string(), rows.to_vec());
        Ok(())
    }

    fn get_bioassay(&self, symbol: &str) -> Result<Option<BioAssayCount>, DomainError> {
        let map = self.lock_map(&self.bioassays, "bioassays")?;
        Ok(map.get(symbol).cloned())
    }

    fn save_bioassay(&self, bioassay: &BioAssayCount) -> Result<(), DomainError> {
        let mut map = self.lock_map(&self.bioassays, "bioassays")?;
        map.insert(bioassay.symbol.clone(), bioassay.clone());
        Ok(())
    }

    fn get_edge_counts(&self, symbol: &str) -> Result<Option<EdgeCounts>, DomainError> {
        let map = self.lock_map(&self.edges, "edges")?;
        Ok(map.get(symbol).cloned())
    }

    fn save_edge_counts(&self, counts: &EdgeCounts) -> Result<(), DomainError> {
        let mut map = self.lock_map(&self.edges, "edges")?;
        map.insert(counts.symbol.clone(), counts.clone());
        Ok(())
    }

    fn get_patents(&self, drug_name: &str) -> Result<Option<PatentSummary>, DomainError> {
        let map = self.lock_map(&self.patents, "patents")?;
        Ok(map.get(drug_name).cloned())
    }

    fn save_patents(&self, patents: &PatentSummary) -> Result<(), DomainError> {
        let mut map = self.lock_map(&self.patents, "patents")?;
        map.insert(patents.drug_name.clone(), patents.clone());
        Ok(())
    }

    fn get_products(&self, drug_name: &str) -> Result<Option<ProductSummary>, DomainError> {
        let map = self.lock_map(&self.products, "products")?;
        Ok(map.get(drug_name).cloned())
    }

    fn save_products(&self, products: &ProductSummary) -> Result<(), DomainError> {
        let mut map = self.lock_map(&self.products, "products")?;
        map.insert(products.drug_name.clone(), products.clone());
        Ok(())
    }

    fn get_trials(&self, drugbank_id: &str) -> Result<Option<Vec<TrialRecord>>, DomainError> {
        let map = self.lock_map(&self.trials, "trials")?;
        Ok(map.get(drugbank_id).cloned())
    }

    fn save_trials(&self, drugbank_id: &str, _drug_name: &str, trials: &[TrialRecord]) -> Result<(), DomainError> {
        let mut map = self.lock_map(&self.trials, "trials")?;
        map.insert(drugbank_id.to_string(), trials.to_vec());
        Ok(())
    }
}
