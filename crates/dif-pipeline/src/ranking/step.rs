use crate::errors::PipelineError;
use crate::ranking::context::RankingContext;

/// Trait que representa un criterio del ranking.
///
/// Los pasos se ejecutan en orden sobre el mismo `RankingContext`; cada uno
/// consulta la caché, completa lo que falte desde los servicios remotos y
/// deja su resultado en el contexto.
pub trait RankingStep: Send + Sync {
    /// Nombre o identificador del paso
    fn name(&self) -> &str;

    /// Ejecuta la logica del paso
    fn execute(&self, ctx: &mut RankingContext) -> Result<(), PipelineError>;
}
