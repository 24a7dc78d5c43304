use crate::schema;
use crate::schema::bioassays::dsl as bio_dsl;
use crate::schema::druggable::dsl as drug_dsl;
use crate::schema::edges::dsl as edges_dsl;
use crate::schema::general::dsl as general_dsl;
use crate::schema::patents::dsl as patents_dsl;
use crate::schema::products::dsl as products_dsl;
use crate::schema::trials::dsl as trials_dsl;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DieselError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dif_domain::{BioAssayCount, CacheRepository, DomainError, DruggableRecord, EdgeCounts, InteractorRecord,
                 PatentSummary, ProductSummary, TrialRecord};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
type DbPool = Pool<ConnectionManager<SqliteConnection>>;
type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;
/// Repo Diesel (SQLite) que implementa `CacheRepository`.
pub struct DieselCacheRepository {
  pool: Arc<DbPool>,
}
impl DieselCacheRepository {
  /// Abre (o crea) la base de datos y aplica las migraciones pendientes.
  pub fn new(database_url: &str) -> Result<Self, DomainError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder().max_size(4)
                              .build(manager)
                              .map_err(pool_error)?;
    let repo = DieselCacheRepository { pool: Arc::new(pool) };
    let mut c = repo.conn()?;
    let _ = diesel::sql_query("PRAGMA journal_mode = WAL;").execute(&mut c);
    let _ = diesel::sql_query("PRAGMA busy_timeout = 5000;").execute(&mut c);
    c.run_pending_migrations(MIGRATIONS)
     .map_err(|e| DomainError::ExternalError(format!("migraciones: {}", e)))?;
    debug!("caché abierta en {}", database_url);
    Ok(repo)
  }
  fn conn_raw(&self) -> Result<DbConn, r2d2::Error> {
    self.pool.get()
  }
  fn conn(&self) -> Result<DbConn, DomainError> {
    self.conn_raw().map_err(pool_error)
  }
}

fn pool_error(e: r2d2::Error) -> DomainError {
  DomainError::ExternalError(format!("pool: {}", e))
}
// Diesel row structs for the cache tables
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::general)]
struct GeneralRow {
  pub query_key: String,
  pub symbol: String,
  pub position: i64,
  pub target_species: Option<i64>,
  pub pmid: Option<i64>,
  pub pmc: Option<String>,
  pub interactor_type: Option<String>,
  pub interactor_name: Option<String>,
  pub interactor_bel: Option<String>,
  pub relation_type: Option<String>,
  pub target_bel: Option<String>,
  pub target_type: Option<String>,
  pub target_symbol: Option<String>,
  pub pmod_type: Option<String>,
}
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::druggable)]
struct DruggableRow {
  pub query_key: String,
  pub symbol: String,
  pub position: i64,
  pub drug: Option<String>,
  pub capsule_interactor_type: Option<String>,
  pub capsule_interactor_bel: Option<String>,
  pub interactor_bel: Option<String>,
  pub interactor_type: Option<String>,
  pub interactor_name: Option<String>,
  pub relation_type: Option<String>,
  pub target_bel: Option<String>,
  pub target_symbol: Option<String>,
  pub target_type: Option<String>,
  pub pmid: Option<i64>,
  pub pmc: Option<String>,
  pub rel_pub_year: Option<i64>,
  pub rel_rid: Option<String>,
  pub drug_rel_rid: Option<String>,
  pub drug_rel_actions: String,
  pub drugbank_id: Option<String>,
  pub chembl_id: Option<String>,
  pub pubchem_id: Option<String>,
  pub pmod_type: Option<String>,
}
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::bioassays)]
struct BioAssayRow {
  pub symbol: String,
  pub uniprot_accession: Option<String>,
  pub assay_count: Option<i64>,
}
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::edges)]
struct EdgeRow {
  pub symbol: String,
  pub in_count: i64,
  pub out_count: i64,
  pub both_count: i64,
}
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::patents)]
struct PatentRow {
  pub drug_name: String,
  pub has_patent: bool,
  pub expired: bool,
  pub patent_numbers: String,
}
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::products)]
struct ProductRow {
  pub drug_name: String,
  pub has_generic: bool,
  pub has_approved_generic: bool,
  pub generic_products: String,
}
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::trials)]
struct TrialRow {
  pub drugbank_id: String,
  pub drug_name: String,
  pub trial_id: Option<String>,
  pub status: Option<String>,
  pub conditions: String,
  pub drugs_in_trial: String,
}
fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T, DomainError> {
  res.map_err(|e| DomainError::ExternalError(format!("db: {}", e)))
}
fn to_json_list(items: &[String]) -> Result<String, DomainError> {
  Ok(serde_json::to_string(items)?)
}
fn from_json_list(raw: &str) -> Result<Vec<String>, DomainError> {
  Ok(serde_json::from_str(raw)?)
}
impl GeneralRow {
  fn from_record(query_key: &str, symbol: &str, position: usize, r: &InteractorRecord) -> Self {
    GeneralRow { query_key: query_key.to_string(),
                 symbol: symbol.to_string(),
                 position: position as i64,
                 target_species: r.target_species,
                 pmid: r.pmid,
                 pmc: r.pmc.clone(),
                 interactor_type: r.interactor_type.clone(),
                 interactor_name: r.interactor_name.clone(),
                 interactor_bel: r.interactor_bel.clone(),
                 relation_type: r.relation_type.clone(),
                 target_bel: r.target_bel.clone(),
                 target_type: r.target_type.clone(),
                 target_symbol: r.target_symbol.clone(),
                 pmod_type: r.pmod_type.clone() }
  }
  fn into_record(self) -> InteractorRecord {
    InteractorRecord { target_species: self.target_species,
                       pmid: self.pmid,
                       pmc: self.pmc,
                       interactor_type: self.interactor_type,
                       interactor_name: self.interactor_name,
                       interactor_bel: self.interactor_bel,
                       relation_type: self.relation_type,
                       target_bel: self.target_bel,
                       target_type: self.target_type,
                       target_symbol: self.target_symbol,
                       pmod_type: self.pmod_type }
  }
}
impl DruggableRow {
  fn from_record(query_key: &str, symbol: &str, position: usize, r: &DruggableRecord) -> Result<Self, DomainError> {
    Ok(DruggableRow { query_key: query_key.to_string(),
                      symbol: symbol.to_string(),
                      position: position as i64,
                      drug: r.drug.clone(),
                      capsule_interactor_type: r.capsule_interactor_type.clone(),
                      capsule_interactor_bel: r.capsule_interactor_bel.clone(),
                      interactor_bel: r.interactor_bel.clone(),
                      interactor_type: r.interactor_type.clone(),
                      interactor_name: r.interactor_name.clone(),
                      relation_type: r.relation_type.clone(),
                      target_bel: r.target_bel.clone(),
                      target_symbol: r.target_symbol.clone(),
                      target_type: r.target_type.clone(),
                      pmid: r.pmid,
                      pmc: r.pmc.clone(),
                      rel_pub_year: r.rel_pub_year,
                      rel_rid: r.rel_rid.clone(),
                      drug_rel_rid: r.drug_rel_rid.clone(),
                      drug_rel_actions: to_json_list(&r.drug_rel_actions)?,
                      drugbank_id: r.drugbank_id.clone(),
                      chembl_id: r.chembl_id.clone(),
                      pubchem_id: r.pubchem_id.clone(),
                      pmod_type: r.pmod_type.clone() })
  }
  fn into_record(self) -> Result<DruggableRecord, DomainError> {
    Ok(DruggableRecord { drug: self.drug,
                         capsule_interactor_type: self.capsule_interactor_type,
                         capsule_interactor_bel: self.capsule_interactor_bel,
                         interactor_bel: self.interactor_bel,
                         interactor_type: self.interactor_type,
                         interactor_name: self.interactor_name,
                         relation_type: self.relation_type,
                         target_bel: self.target_bel,
                         target_symbol: self.target_symbol,
                         target_type: self.target_type,
                         pmid: self.pmid,
                         pmc: self.pmc,
                         rel_pub_year: self.rel_pub_year,
                         rel_rid: self.rel_rid,
                         drug_rel_rid: self.drug_rel_rid,
                         drug_rel_actions: from_json_list(&self.drug_rel_actions)?,
                         drugbank_id: self.drugbank_id,
                         chembl_id: self.chembl_id,
                         pubchem_id: self.pubchem_id,
                         pmod_type: self.pmod_type })
  }
}
impl CacheRepository for DieselCacheRepository {
  fn get_interactors(&self, query_key: &str) -> Result<Vec<InteractorRecord>, DomainError> {
    let mut conn = self.conn()?;
    let rows = map_db_err(general_dsl::general.filter(general_dsl::query_key.eq(query_key))
                                              .order(general_dsl::position.asc())
                                              .select(GeneralRow::as_select())
                                              .load::<GeneralRow>(&mut conn))?;
    Ok(rows.into_iter().map(GeneralRow::into_record).collect())
  }
  fn save_interactors(&self, query_key: &str, symbol: &str, rows: &[InteractorRecord]) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let new_rows: Vec<GeneralRow> =
      rows.iter().enumerate().map(|(i, r)| GeneralRow::from_record(query_key, symbol, i, r)).collect();
    map_db_err(conn.transaction::<_, DieselError, _>(|conn| {
                     diesel::delete(general_dsl::general.filter(general_dsl::query_key.eq(query_key))).execute(conn)?;
                     for row in &new_rows {
                       diesel::insert_into(general_dsl::general).values(row).execute(conn)?;
                     }
                     Ok(())
                   }))?;
    info!("caché: {} interactores guardados para {}", new_rows.len(), symbol);
    Ok(())
  }
  fn get_druggable(&self, query_key: &str) -> Result<Vec<DruggableRecord>, DomainError> {
    let mut conn = self.conn()?;
    let rows = map_db_err(drug_dsl::druggable.filter(drug_dsl::query_key.eq(query_key))
                                             .order(drug_dsl::position.asc())
                                             .select(DruggableRow::as_select())
                                             .load::<DruggableRow>(&mut conn))?;
    rows.into_iter().map(DruggableRow::into_record).collect()
  }
  fn save_druggable(&self, query_key: &str, symbol: &str, rows: &[DruggableRecord]) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let new_rows = rows.iter()
                       .enumerate()
                       .map(|(i, r)| DruggableRow::from_record(query_key, symbol, i, r))
                       .collect::<Result<Vec<_>, _>>()?;
    map_db_err(conn.transaction::<_, DieselError, _>(|conn| {
                     diesel::delete(drug_dsl::druggable.filter(drug_dsl::query_key.eq(query_key))).execute(conn)?;
                     for row in &new_rows {
                       diesel::insert_into(drug_dsl::druggable).values(row).execute(conn)?;
                     }
                     Ok(())
                   }))?;
    info!("caché: {} interactores druggables guardados para {}", new_rows.len(), symbol);
    Ok(())
  }
  fn get_bioassay(&self, symbol: &str) -> Result<Option<BioAssayCount>, DomainError> {
    let mut conn = self.conn()?;
    let opt = map_db_err(bio_dsl::bioassays.filter(bio_dsl::symbol.eq(symbol))
                                           .select(BioAssayRow::as_select())
                                           .first::<BioAssayRow>(&mut conn)
                                           .optional())?;
    Ok(opt.map(|r| BioAssayCount { symbol: r.symbol,
                                   uniprot_accession: r.uniprot_accession,
                                   count: r.assay_count.and_then(|c| u64::try_from(c).ok()) }))
  }
  fn save_bioassay(&self, bioassay: &BioAssayCount) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let row = BioAssayRow { symbol: bioassay.symbol.clone(),
                            uniprot_accession: bioassay.uniprot_accession.clone(),
                            assay_count: bioassay.count.map(|c| c as i64) };
    map_db_err(diesel::replace_into(bio_dsl::bioassays).values(&row).execute(&mut conn))?;
    Ok(())
  }
  fn get_edge_counts(&self, symbol: &str) -> Result<Option<EdgeCounts>, DomainError> {
    let mut conn = self.conn()?;
    let opt = map_db_err(edges_dsl::edges.filter(edges_dsl::symbol.eq(symbol))
                                         .select(EdgeRow::as_select())
                                         .first::<EdgeRow>(&mut conn)
                                         .optional())?;
    Ok(opt.map(|r| EdgeCounts { symbol: r.symbol, in_count: r.in_count, out_count: r.out_count, both_count: r.both_count }))
  }
  fn save_edge_counts(&self, counts: &EdgeCounts) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let row = EdgeRow { symbol: counts.symbol.clone(),
                        in_count: counts.in_count,
                        out_count: counts.out_count,
                        both_count: counts.both_count };
    map_db_err(diesel::replace_into(edges_dsl::edges).values(&row).execute(&mut conn))?;
    Ok(())
  }
  fn get_patents(&self, drug_name: &str) -> Result<Option<PatentSummary>, DomainError> {
    let mut conn = self.conn()?;
    let opt = map_db_err(patents_dsl::patents.filter(patents_dsl::drug_name.eq(drug_name))
                                             .select(PatentRow::as_select())
                                             .first::<PatentRow>(&mut conn)
                                             .optional())?;
    match opt {
      Some(r) => Ok(Some(PatentSummary { drug_name: r.drug_name,
                                         has_patent: r.has_patent,
                                         expired: r.expired,
                                         patent_numbers: from_json_list(&r.patent_numbers)? })),
      None => Ok(None),
    }
  }
  fn save_patents(&self, patents: &PatentSummary) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let row = PatentRow { drug_name: patents.drug_name.clone(),
                          has_patent: patents.has_patent,
                          expired: patents.expired,
                          patent_numbers: to_json_list(&patents.patent_numbers)? };
    map_db_err(diesel::replace_into(patents_dsl::patents).values(&row).execute(&mut conn))?;
    Ok(())
  }
  fn get_products(&self, drug_name: &str) -> Result<Option<ProductSummary>, DomainError> {
    let mut conn = self.conn()?;
    let opt = map_db_err(products_dsl::products.filter(products_dsl::drug_name.eq(drug_name))
                                               .select(ProductRow::as_select())
                                               .first::<ProductRow>(&mut conn)
                                               .optional())?;
    match opt {
      Some(r) => Ok(Some(ProductSummary { drug_name: r.drug_name,
                                          has_generic: r.has_generic,
                                          has_approved_generic: r.has_approved_generic,
                                          generic_products: from_json_list(&r.generic_products)? })),
      None => Ok(None),
    }
  }
  fn save_products(&self, products: &ProductSummary) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let row = ProductRow { drug_name: products.drug_name.clone(),
                           has_generic: products.has_generic,
                           has_approved_generic: products.has_approved_generic,
                           generic_products: to_json_list(&products.generic_products)? };
    map_db_err(diesel::replace_into(products_dsl::products).values(&row).execute(&mut conn))?;
    Ok(())
  }
  fn get_trials(&self, drugbank_id: &str) -> Result<Option<Vec<TrialRecord>>, DomainError> {
    let mut conn = self.conn()?;
    let rows = map_db_err(trials_dsl::trials.filter(trials_dsl::drugbank_id.eq(drugbank_id))
                                            .order(trials_dsl::id.asc())
                                            .select(TrialRow::as_select())
                                            .load::<TrialRow>(&mut conn))?;
    if rows.is_empty() {
      return Ok(None);
    }
    let mut trials = Vec::new();
    for r in rows {
      // la fila marcadora no tiene trial_id
      if let Some(trial_id) = r.trial_id {
        trials.push(TrialRecord { trial_id,
                                  status: r.status,
                                  conditions: from_json_list(&r.conditions)?,
                                  drugs_in_trial: from_json_list(&r.drugs_in_trial)? });
      }
    }
    Ok(Some(trials))
  }
  fn save_trials(&self, drugbank_id: &str, drug_name: &str, trials: &[TrialRecord]) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let mut rows = Vec::with_capacity(trials.len().max(1));
    for t in trials {
      rows.push(TrialRow { drugbank_id: drugbank_id.to_string(),
                           drug_name: drug_name.to_string(),
                           trial_id: Some(t.trial_id.clone()),
                           status: t.status.clone(),
                           conditions: to_json_list(&t.conditions)?,
                           drugs_in_trial: to_json_list(&t.drugs_in_trial)? });
    }
    if rows.is_empty() {
      rows.push(TrialRow { drugbank_id: drugbank_id.to_string(),
                           drug_name: drug_name.to_string(),
                           trial_id: None,
                           status: None,
                           conditions: "[]".into(),
                           drugs_in_trial: "[]".into() });
    }
    map_db_err(conn.transaction::<_, DieselError, _>(|conn| {
                     diesel::delete(trials_dsl::trials.filter(trials_dsl::drugbank_id.eq(drugbank_id))).execute(conn)?;
                     for row in &rows {
                       diesel::insert_into(trials_dsl::trials).values(row).execute(conn)?;
                     }
                     Ok(())
                   }))?;
    Ok(())
  }
}
/// Ruta por defecto de la caché: `$HOME/.dif/cache/dif.db`.
pub fn default_cache_path() -> Result<PathBuf, DomainError> {
  let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))
                                     .ok_or_else(|| DomainError::ExternalError("HOME no está definido".into()))?;
  Ok(PathBuf::from(home).join(".dif").join("cache").join("dif.db"))
}
// Crea el directorio padre cuando la URL es una ruta de fichero simple.
fn ensure_parent_dir(url: &str) -> Result<(), DomainError> {
  if url.starts_with("file:") || url == ":memory:" {
    return Ok(());
  }
  if let Some(parent) = Path::new(url).parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).map_err(|e| {
                                      DomainError::ExternalError(format!("no se pudo crear {}: {}", parent.display(), e))
                                    })?;
  }
  Ok(())
}
/// Abre la caché en `url`, creando el directorio si hace falta.
pub fn open_cache(url: &str) -> Result<DieselCacheRepository, DomainError> {
  ensure_parent_dir(url)?;
  DieselCacheRepository::new(url)
}
/// Abre la caché indicada por `DIF_DB_URL` (o `DATABASE_URL`); sin ninguna de
/// las dos usa la ruta por defecto.
pub fn new_cache_from_env() -> Result<DieselCacheRepository, DomainError> {
  dotenvy::dotenv().ok();
  let url = match std::env::var("DIF_DB_URL").or_else(|_| std::env::var("DATABASE_URL")) {
    Ok(url) if !url.trim().is_empty() => url,
    _ => default_cache_path()?.to_string_lossy().into_owned(),
  };
  open_cache(&url)
}
