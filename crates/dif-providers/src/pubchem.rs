// pubchem.rs
//! Conteo de BioAssays de PubChem por acceso UniProt.

use crate::errors::ProviderError;
use crate::graphstore::{non_empty_var, timeout_from_env};
use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_PUBCHEM_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

/// Fuente del número de BioAssays de una proteína.
pub trait BioAssaySource: Send + Sync {
  fn assay_count(&self, uniprot_accession: &str) -> Result<u64, ProviderError>;
}

pub struct PubChemClient {
  client: Client,
  base_url: String,
}

impl PubChemClient {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
  }

  /// Usa `DIF_PUBCHEM_URL` y `DIF_HTTP_TIMEOUT_SECS`.
  pub fn from_env() -> Result<Self, ProviderError> {
    let _ = dotenvy::dotenv();
    let url = non_empty_var("DIF_PUBCHEM_URL").unwrap_or_else(|| DEFAULT_PUBCHEM_URL.to_string());
    Self::new(&url, timeout_from_env()?)
  }

  pub fn assay_ids_url(&self, uniprot_accession: &str) -> String {
    format!("{}/assay/target/accession/{}/aids/TXT", self.base_url, uniprot_accession)
  }
}

/// Cuenta los identificadores de ensayo (uno por línea no vacía).
pub fn count_assay_lines(body: &str) -> u64 {
  body.lines().filter(|l| !l.trim().is_empty()).count() as u64
}

impl BioAssaySource for PubChemClient {
  fn assay_count(&self, uniprot_accession: &str) -> Result<u64, ProviderError> {
    let url = self.assay_ids_url(uniprot_accession);
    debug!("pubchem GET {}", url);
    let response = self.client.get(&url).send()?;
    match response.status() {
      // PubChem responde 404 cuando no hay ensayos para la diana
      StatusCode::NOT_FOUND => Ok(0),
      s if s.is_success() => Ok(count_assay_lines(&response.text()?)),
      s => Err(ProviderError::Status { url, status: s.as_u16() }),
    }
  }
}
