pub mod errors;
pub mod graphstore;
pub mod pubchem;
pub mod stubs;

pub use errors::ProviderError;
pub use graphstore::{parse_command_response, GraphStore, GraphStoreConfig, RestGraphStore};
pub use pubchem::{count_assay_lines, BioAssaySource, PubChemClient};
pub use stubs::{StaticBioAssays, StaticGraphStore};
