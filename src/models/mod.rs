pub mod dataset;
pub mod identifier;

pub use dataset::{DatasetKind, DatasetSummary, DatasetTarget, PerDay};
pub use identifier::MunicipalityId;
