use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
  #[error("Error HTTP: {0}")]
  Http(#[from] reqwest::Error),
  #[error("Respuesta inesperada de {url}: estado {status}")]
  Status { url: String, status: u16 },
  #[error("Respuesta mal formada: {0}")]
  Decode(String),
  #[error("Configuración inválida: {0}")]
  Config(String),
}

impl From<serde_json::Error> for ProviderError {
  fn from(e: serde_json::Error) -> Self {
    Self::Decode(e.to_string())
  }
}
