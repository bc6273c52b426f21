// src/lib.rs
pub mod error;
pub mod process;

pub use error::{MetadataError, Result};
pub use process::{process_metadata, MetadataNormalizer, NormalizerConfig};
