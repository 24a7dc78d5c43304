// query.rs
//! Construcción de consultas MATCH contra el graphstore.
//!
//! `InteractorQuery` agrupa los parámetros de una búsqueda (nombre y tipo
//! del nodo, modificaciones y clase de arista) y genera el texto de las
//! consultas. Las consultas auxiliares que usa el ranking (UniProt, conteo de
//! aristas, patentes, ensayos clínicos) son funciones libres.

use crate::relations::{relations_for, ALL_EDGES, CAUSAL_CLASS};
use crate::DomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Tipo de nodo por defecto: las búsquedas suelen partir de una proteína.
pub const DEFAULT_NODE_TYPE: &str = "protein";

/// Aristas que unen un nodo "cápsula" (proteína modificada, variante,
/// fragmento, ...) con su proteína pura.
const CAPSULE_EDGES: [&str; 5] =
  ["has__protein", "has_modified_protein", "has_variant_protein", "has_located_protein", "has_fragmented_protein"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractorQuery {
  node_name: String,
  node_type: String,
  pmods: Vec<String>,
  edge: String,
}

impl InteractorQuery {
  /// Crea la consulta para `node_name` con los valores por defecto: nodo
  /// `protein`, sin modificaciones y todas las aristas (`E`).
  pub fn new(node_name: &str) -> Result<Self, DomainError> {
    let name = node_name.trim();
    if name.is_empty() {
      return Err(DomainError::ValidationError("El nombre del nodo objetivo no puede estar vacío".to_string()));
    }
    Ok(Self { node_name: name.to_string(),
              node_type: DEFAULT_NODE_TYPE.to_string(),
              pmods: Vec::new(),
              edge: ALL_EDGES.to_string() })
  }

  pub fn with_node_type(mut self, node_type: &str) -> Result<Self, DomainError> {
    let t = node_type.trim();
    if t.is_empty() {
      return Err(DomainError::ValidationError("El tipo de nodo no puede estar vacío".to_string()));
    }
    self.node_type = t.to_string();
    Ok(self)
  }

  pub fn with_edge(mut self, edge: &str) -> Result<Self, DomainError> {
    let e = edge.trim();
    if e.is_empty() {
      return Err(DomainError::ValidationError("La clase de arista no puede estar vacía".to_string()));
    }
    self.edge = e.to_string();
    Ok(self)
  }

  pub fn with_pmods<I, S>(mut self, pmods: I) -> Self
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
  {
    self.pmods = pmods.into_iter()
                      .map(|p| p.as_ref().trim().to_string())
                      .filter(|p| !p.is_empty())
                      .collect();
    self
  }

  pub fn node_name(&self) -> &str {
    &self.node_name
  }

  pub fn node_type(&self) -> &str {
    &self.node_type
  }

  pub fn pmods(&self) -> &[String] {
    &self.pmods
  }

  pub fn edge(&self) -> &str {
    &self.edge
  }

  /// Variantes de capitalización del nombre: tal cual, MAYÚSCULAS,
  /// minúsculas y Capitalizado. Sin repetidos y ordenadas.
  pub fn names(&self) -> Vec<String> {
    let mut names = vec![self.node_name.clone(),
                         self.node_name.to_uppercase(),
                         self.node_name.to_lowercase(),
                         capitalize(&self.node_name)];
    names.sort();
    names.dedup();
    names
  }

  /// Símbolo con el que se indexan los resultados (convención humana).
  pub fn cache_symbol(&self) -> String {
    self.node_name.to_uppercase()
  }

  /// El filtro de modificaciones sólo aplica a proteínas.
  pub fn uses_pmod_filter(&self) -> bool {
    self.node_type == DEFAULT_NODE_TYPE && !self.pmods.is_empty()
  }

  /// Clave estable de la consulta para la caché local.
  pub fn cache_key(&self, druggable: bool) -> String {
    let edge = if druggable { CAUSAL_CLASS } else { self.edge.as_str() };
    let mut pmods = if self.uses_pmod_filter() { self.pmods.clone() } else { Vec::new() };
    pmods.sort();
    let signature = format!("{}|{}|{}|{}|{}",
                            self.cache_symbol(),
                            self.node_type,
                            edge,
                            pmods.join(","),
                            if druggable { "druggable" } else { "general" });
    let mut hasher = Sha256::new();
    hasher.update(signature.as_bytes());
    format!("{:x}", hasher.finalize())
  }

  /// Condición sobre el nodo `pmod`, p.ej. `type in ['pho']`.
  pub fn pmod_condition(&self) -> Option<String> {
    if !self.uses_pmod_filter() {
      return None;
    }
    let has = |p: &str| self.pmods.iter().any(|m| m == p);
    let mut condition =
      if has("all") { "type != '' or name != ''".to_string() } else { format!("type in {}", list_literal(&self.pmods)) };
    if has("pho") || has("all") {
      condition.push_str(" OR name like '%phosphorylat%'");
    }
    Some(condition)
  }

  fn match_prefix(&self) -> String {
    match self.pmod_condition() {
      Some(cond) => format!("MATCH {{class:pmod, as:pmod, WHERE:({})}}<-has__pmod-\n", cond),
      None => "MATCH ".to_string(),
    }
  }

  fn target_clause(&self, names: &[String]) -> String {
    format!("{{class:{}, as:target, WHERE:(name in {})}}", self.node_type, list_literal(names))
  }

  /// Nombres usados en las consultas druggables: con filtro de pmods sólo
  /// se busca el símbolo humano.
  fn druggable_names(&self) -> Vec<String> {
    if self.uses_pmod_filter() {
      vec![self.cache_symbol()]
    } else {
      self.names()
    }
  }

  fn pmod_return(&self) -> &'static str {
    if self.uses_pmod_filter() {
      "pmod.type as pmod_type,\n"
    } else {
      ""
    }
  }

  /// Consulta de interactores directos del nodo por la clase de arista
  /// configurada.
  pub fn interactor_sql(&self) -> String {
    format!("{prefix}{target}\n.inE(){{class:{edge}, as:relation, where:(@class != 'causes_no_change')}}\n\
             .outV(){{class:bel, as:interactor}}\n\
             RETURN\n{pmod}relation.@class as relation_type,\n\
             target.name as target_symbol,\n\
             target.bel as target_bel,\n\
             target.@class as target_type,\n\
             interactor.bel as interactor_bel,\n\
             interactor.name as interactor_name,\n\
             interactor.@class as interactor_type,\n\
             relation.pmid as pmid,\n\
             relation.pmc as pmc,\n\
             target.species as target_species",
            prefix = self.match_prefix(),
            target = self.target_clause(&self.names()),
            edge = self.edge,
            pmod = self.pmod_return())
  }

  /// Interactores puros (proteínas) con arista causal hacia el objetivo y
  /// diana de algún fármaco.
  pub fn pure_druggable_sql(&self) -> String {
    format!("{prefix}{target}\n.inE(){{class:{causal}, as:relation, where:(@class != 'causes_no_change')}}\n\
             .outV(){{class:bel, as:interactor}}\n\
             .inE(){{class:has_drug_target, as:drug_rel}}\n\
             .outV(){{class:drug, as:drug}}\n\
             RETURN\n{pmod}relation.@class as relation_type,\n\
             relation.citation.pub_date.subString(0, 4) as rel_pub_year,\n\
             target.name as target_symbol,\n\
             target.bel as target_bel,\n\
             target.@class as target_type,\n\
             interactor.bel as interactor_bel,\n\
             interactor.name as interactor_name,\n\
             interactor.@class as interactor_type,\n\
             drug.label as drug,\n\
             drug.drugbank_id as drugbank_id,\n\
             drug.drugbank.chembl_id as chembl_id,\n\
             drug.drugbank.pubchem_cid as pubchem_id,\n\
             relation.pmid as pmid,\n\
             relation.pmc as pmc,\n\
             relation.@rid.asString() as rel_rid,\n\
             drug_rel.@rid.asString() as drug_rel_rid,\n\
             drug_rel.actions as drug_rel_actions",
            prefix = self.match_prefix(),
            target = self.target_clause(&self.druggable_names()),
            causal = CAUSAL_CLASS,
            pmod = self.pmod_return())
  }

  /// Interactores "cápsula" (complejos, variantes, proteínas modificadas)
  /// cuya proteína pura es diana de algún fármaco.
  pub fn capsule_druggable_sql(&self) -> String {
    let capsule_edges = CAPSULE_EDGES.iter().map(|e| format!("'{}'", e)).collect::<Vec<_>>().join(", ");
    format!("{prefix}{target}\n.inE(){{class:{causal}, as:relation, where:(@class != 'causes_no_change')}}\n\
             .outV(){{class:bel, as:capsule_interactor}}\n\
             .bothE({capsule_edges})\n\
             .bothV(){{class:protein, as:pure_interactor, WHERE:(pure=true)}}\n\
             .inE(){{class:has_drug_target, as:drug_rel}}\n\
             .outV(){{class:drug, as:drug}}\n\
             RETURN\n{pmod}drug.label as drug,\n\
             drug.drugbank_id as drugbank_id,\n\
             drug.drugbank.chembl_id as chembl_id,\n\
             drug.drugbank.pubchem_cid as pubchem_id,\n\
             pure_interactor.@class as interactor_type,\n\
             pure_interactor.bel as interactor_bel,\n\
             pure_interactor.name as interactor_name,\n\
             capsule_interactor.bel as capsule_interactor_bel,\n\
             capsule_interactor.@class as capsule_interactor_type,\n\
             relation.@class as relation_type,\n\
             relation.citation.pub_date.subString(0, 4) as rel_pub_year,\n\
             target.name as target_symbol,\n\
             target.bel as target_bel,\n\
             target.@class as target_type,\n\
             relation.pmid as pmid,\n\
             relation.pmc as pmc,\n\
             relation.@rid.asString() as rel_rid,\n\
             drug_rel.@rid.asString() as drug_rel_rid,\n\
             drug_rel.actions as drug_rel_actions",
            prefix = self.match_prefix(),
            target = self.target_clause(&self.druggable_names()),
            causal = CAUSAL_CLASS,
            pmod = self.pmod_return())
  }

  /// Indica si una relación devuelta cumple el filtro de aristas. Sólo se
  /// filtra cuando la clase de arista es conocida; con clases desconocidas
  /// se confía en el graphstore.
  pub fn accepts_relation(&self, relation: Option<&str>) -> bool {
    match relations_for(&self.edge) {
      Some(allowed) => relation.map(|r| r != "causes_no_change" && allowed.contains(&r)).unwrap_or(false),
      None => true,
    }
  }
}

/// Divide una lista de pmods separada por comas (`"pho, ace"`).
pub fn parse_pmods(raw: &str) -> Vec<String> {
  raw.split(',').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect()
}

pub fn uniprot_id_sql(symbol: &str) -> String {
  format!("SELECT uniprot.id as uniprot_id FROM protein WHERE name = '{}' and pure = true LIMIT 1", quote(symbol))
}

/// Aristas causales que llegan a la proteína pura `symbol`.
pub fn in_count_sql(symbol: &str) -> String {
  format!("SELECT count(*) as number FROM causal WHERE in.name = '{}' AND in.pure = true AND in.@class = 'protein'",
          quote(symbol))
}

/// Aristas causales que salen de la proteína pura `symbol`.
pub fn out_count_sql(symbol: &str) -> String {
  format!("SELECT count(*) as number FROM causal WHERE out.name = '{}' AND out.pure = true AND out.@class = 'protein'",
          quote(symbol))
}

pub fn patents_products_sql(drugbank_ids: &[String]) -> String {
  format!("SELECT id as drugbank_id, name, patents as drug_patents, products.product as drug_products \
           FROM drugbank WHERE id in {}",
          list_literal(drugbank_ids))
}

pub fn clinical_trials_sql(drugbank_id: &str) -> String {
  format!("SELECT expand(clinical_trials) FROM drugbank WHERE id = '{}'", quote(drugbank_id))
}

fn quote(value: &str) -> String {
  value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn list_literal(items: &[String]) -> String {
  let quoted: Vec<String> = items.iter().map(|i| format!("'{}'", quote(i))).collect();
  format!("[{}]", quoted.join(", "))
}

fn capitalize(value: &str) -> String {
  let lower = value.to_lowercase();
  let mut chars = lower.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_name_is_rejected() {
    assert!(matches!(InteractorQuery::new("   "), Err(DomainError::ValidationError(_))));
    assert!(InteractorQuery::new("MAPT").unwrap().with_node_type("").is_err());
  }

  #[test]
  fn names_cover_case_variants() {
    let q = InteractorQuery::new("mapt").unwrap();
    assert_eq!(q.names(), vec!["MAPT", "Mapt", "mapt"]);
    assert_eq!(q.cache_symbol(), "MAPT");
  }

  #[test]
  fn interactor_query_without_pmods_has_no_pmod_match() {
    let q = InteractorQuery::new("MAPT").unwrap().with_edge("causal").unwrap();
    let sql = q.interactor_sql();
    assert!(sql.starts_with("MATCH {class:protein, as:target, WHERE:(name in ['MAPT', 'Mapt', 'mapt'])}"));
    assert!(sql.contains(".inE(){class:causal, as:relation"));
    assert!(!sql.contains("pmod"));
  }

  #[test]
  fn pmod_filter_builds_type_condition() {
    let q = InteractorQuery::new("MAPT").unwrap().with_pmods(parse_pmods("pho, ace"));
    assert_eq!(q.pmod_condition().unwrap(), "type in ['pho', 'ace'] OR name like '%phosphorylat%'");
    let sql = q.interactor_sql();
    assert!(sql.starts_with("MATCH {class:pmod, as:pmod, WHERE:(type in ['pho', 'ace'] OR name like '%phosphorylat%')}<-has__pmod-"));
    assert!(sql.contains("pmod.type as pmod_type"));
  }

  #[test]
  fn pmod_all_matches_any_modification() {
    let q = InteractorQuery::new("MAPT").unwrap().with_pmods(["all"]);
    assert_eq!(q.pmod_condition().unwrap(), "type != '' or name != '' OR name like '%phosphorylat%'");
    let q = InteractorQuery::new("MAPT").unwrap().with_pmods(["ace"]);
    assert_eq!(q.pmod_condition().unwrap(), "type in ['ace']");
  }

  #[test]
  fn pmods_ignored_for_non_protein_nodes() {
    let q = InteractorQuery::new("autophagy").unwrap().with_node_type("bel").unwrap().with_pmods(["pho"]);
    assert!(q.pmod_condition().is_none());
    assert!(q.interactor_sql().starts_with("MATCH {class:bel, as:target"));
    let plain = InteractorQuery::new("autophagy").unwrap().with_node_type("bel").unwrap();
    assert_eq!(q.cache_key(false), plain.cache_key(false));
  }

  #[test]
  fn druggable_queries_use_causal_edges_and_human_symbol_with_pmods() {
    let q = InteractorQuery::new("mapt").unwrap().with_edge("correlative").unwrap().with_pmods(["pho"]);
    let pure = q.pure_druggable_sql();
    assert!(pure.contains("{class:causal, as:relation"));
    assert!(pure.contains("name in ['MAPT']"));
    assert!(pure.contains("{class:has_drug_target, as:drug_rel}"));
    let capsule = q.capsule_druggable_sql();
    assert!(capsule.contains(".bothE('has__protein', 'has_modified_protein'"));
    assert!(capsule.contains("as:pure_interactor, WHERE:(pure=true)"));
  }

  #[test]
  fn cache_key_depends_on_flags() {
    let base = InteractorQuery::new("MAPT").unwrap();
    let causal = base.clone().with_edge("causal").unwrap();
    assert_ne!(base.cache_key(false), causal.cache_key(false));
    assert_ne!(causal.cache_key(false), causal.cache_key(true));
    // druggable lookups ignore the edge class
    assert_eq!(base.cache_key(true), causal.cache_key(true));
    let lower = InteractorQuery::new("mapt").unwrap();
    assert_eq!(base.cache_key(false), lower.cache_key(false));
  }

  #[test]
  fn relation_filter_only_for_known_classes() {
    let causal = InteractorQuery::new("MAPT").unwrap().with_edge("causal").unwrap();
    assert!(causal.accepts_relation(Some("increases")));
    assert!(!causal.accepts_relation(Some("association")));
    assert!(!causal.accepts_relation(Some("causes_no_change")));
    let concrete = InteractorQuery::new("MAPT").unwrap().with_edge("increases").unwrap();
    assert!(concrete.accepts_relation(Some("increases")));
  }

  #[test]
  fn auxiliary_queries_escape_values() {
    assert_eq!(uniprot_id_sql("FYN"), "SELECT uniprot.id as uniprot_id FROM protein WHERE name = 'FYN' and pure = true LIMIT 1");
    assert!(clinical_trials_sql("DB0'1").contains("id = 'DB0\\'1'"));
    assert!(patents_products_sql(&["DB01254".to_string(), "DB00945".to_string()]).ends_with("id in ['DB01254', 'DB00945']"));
  }
}
