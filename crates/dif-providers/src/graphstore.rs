// graphstore.rs
//! Cliente REST del graphstore (servidor tipo OrientDB).
//!
//! Cada consulta se envía como `POST {url}/command/{db}/sql` con el cuerpo
//! `{"command": "<sql>"}`; la respuesta trae las filas en `result`.

use crate::errors::ProviderError;
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::env;
use std::time::Duration;

pub const DEFAULT_GRAPHSTORE_URL: &str = "https://graphstore.scai.fraunhofer.de";
pub const DEFAULT_GRAPHSTORE_DB: &str = "pharmacome";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Fuente de filas del grafo de conocimiento.
pub trait GraphStore: Send + Sync {
  /// Ejecuta una consulta de lectura y devuelve sus filas.
  fn sql(&self, query: &str) -> Result<Vec<JsonValue>, ProviderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStoreConfig {
  pub url: String,
  pub database: String,
  pub user: Option<String>,
  pub password: Option<String>,
  pub timeout: Duration,
}

impl Default for GraphStoreConfig {
  fn default() -> Self {
    Self { url: DEFAULT_GRAPHSTORE_URL.to_string(),
           database: DEFAULT_GRAPHSTORE_DB.to_string(),
           user: None,
           password: None,
           timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
  }
}

impl GraphStoreConfig {
  /// Lee `DIF_GRAPHSTORE_URL`, `DIF_GRAPHSTORE_DB`, `DIF_GRAPHSTORE_USER`,
  /// `DIF_GRAPHSTORE_PASSWORD` y `DIF_HTTP_TIMEOUT_SECS` (cargando `.env`
  /// si existe).
  pub fn from_env() -> Result<Self, ProviderError> {
    let _ = dotenvy::dotenv();
    let defaults = Self::default();
    Ok(Self { url: non_empty_var("DIF_GRAPHSTORE_URL").unwrap_or(defaults.url),
              database: non_empty_var("DIF_GRAPHSTORE_DB").unwrap_or(defaults.database),
              user: non_empty_var("DIF_GRAPHSTORE_USER"),
              password: non_empty_var("DIF_GRAPHSTORE_PASSWORD"),
              timeout: timeout_from_env()? })
  }

  pub fn endpoint(&self) -> String {
    format!("{}/command/{}/sql", self.url.trim_end_matches('/'), self.database)
  }
}

pub(crate) fn non_empty_var(key: &str) -> Option<String> {
  env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub(crate) fn timeout_from_env() -> Result<Duration, ProviderError> {
  match non_empty_var("DIF_HTTP_TIMEOUT_SECS") {
    Some(raw) => raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ProviderError::Config(format!("DIF_HTTP_TIMEOUT_SECS no es un número: {}", raw))),
    None => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
  }
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
  #[serde(default)]
  result: Vec<JsonValue>,
}

/// Extrae las filas de una respuesta del graphstore.
pub fn parse_command_response(body: &str) -> Result<Vec<JsonValue>, ProviderError> {
  let response: CommandResponse = serde_json::from_str(body)?;
  Ok(response.result)
}

pub struct RestGraphStore {
  client: Client,
  config: GraphStoreConfig,
}

impl RestGraphStore {
  pub fn new(config: GraphStoreConfig) -> Result<Self, ProviderError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  pub fn from_env() -> Result<Self, ProviderError> {
    Self::new(GraphStoreConfig::from_env()?)
  }

  pub fn config(&self) -> &GraphStoreConfig {
    &self.config
  }
}

impl GraphStore for RestGraphStore {
  fn sql(&self, query: &str) -> Result<Vec<JsonValue>, ProviderError> {
    let url = self.config.endpoint();
    debug!("graphstore POST {}: {}", url, query);
    let mut request = self.client.post(&url).json(&json!({ "command": query }));
    if let Some(user) = &self.config.user {
      request = request.basic_auth(user, self.config.password.as_ref());
    }
    let response = request.send()?;
    let status = response.status();
    if !status.is_success() {
      return Err(ProviderError::Status { url, status: status.as_u16() });
    }
    let body = response.text()?;
    parse_command_response(&body)
  }
}
