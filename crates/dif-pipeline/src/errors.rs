use thiserror::Error;

// Errores comunes del buscador y del ranking.
//
// Este enum centraliza los errores que pueden ocurrir durante una
// búsqueda: errores del dominio y de la caché (`DomainError`), de los
// servicios remotos (`ProviderError`) y de serialización.
#[derive(Error, Debug)]
pub enum PipelineError {
  /// Errores del dominio y de la caché local.
  #[error("Error de dominio: {0}")]
  Domain(#[from] dif_domain::DomainError),

  /// Errores del graphstore o de PubChem.
  #[error("Error de servicio remoto: {0}")]
  Provider(#[from] dif_providers::ProviderError),

  /// Filas del graphstore que no encajan con el registro esperado.
  #[error("Error de serializacion: {0}")]
  Serialization(#[from] serde_json::Error),
}
