//! Brand DNA ingestion
//!
//! Loads a collection of brand documents enumerated by a manifest:
//! - `manifest.json` lists source ids (file names), generated offline by
//!   scanning the data directory;
//! - when the manifest cannot be read, a fixed fallback list is tried;
//! - every source is fetched independently and a failed or malformed source
//!   is dropped from the collection, never admitted partially.
//!
//! The result is an immutable `Vec<BrandRecord>` plus a report of what was
//! skipped and why.

pub mod error;
pub mod loader;
pub mod manifest;
pub mod source;

pub use error::LoadError;
pub use loader::{load_collection, LoadReport, LoaderConfig, SkippedSource};
pub use manifest::{generate_manifest, write_manifest, MANIFEST_FILE};
pub use source::{BrandSource, DirectorySource};
