pub mod context;
pub mod ranker;
pub mod step;
pub mod steps;
pub mod summary;

pub use context::{PairInfo, RankingContext, RankingServices};
pub use ranker::Ranker;
pub use step::RankingStep;
pub use steps::{default_steps, BioAssayStep, ClinicalTrialStep, EdgeCountStep, PatentProductStep, RelationshipStep};
pub use summary::{pivot_rows, PivotRow, Summary, SummaryRow};
