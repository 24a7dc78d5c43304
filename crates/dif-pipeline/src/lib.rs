//! dif-pipeline: búsqueda y ranking de interactores druggables
//!
//! Une el graphstore (`dif_providers::GraphStore`), PubChem
//! (`dif_providers::BioAssaySource`) y la caché local
//! (`dif_domain::CacheRepository`).

pub mod errors;
pub mod finder;
pub mod ranking;

pub use errors::PipelineError;
pub use finder::InteractorFinder;
pub use ranking::{PivotRow, Ranker, RankingStep, Summary, SummaryRow};
