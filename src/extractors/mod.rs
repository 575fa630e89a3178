// src/extractors/mod.rs
pub mod sukta;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use sukta::{
    ExtractionOutcome,
    ExtractorConfig,
    MarkerNumber,
    SuktaExtractor,
    SuktaRecord,
    UnreadablePolicy,
};
