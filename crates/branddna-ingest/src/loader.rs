//! Manifest-driven collection loading.
//!
//! The manifest is read first. If it is missing or unreadable the configured
//! fallback list is used instead. Documents are fetched and parsed in
//! parallel; admission happens afterwards, sequentially, in manifest order so
//! the collection is deterministic regardless of fetch completion order.

use std::collections::HashSet;

use branddna_core::BrandRecord;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::LoadError;
use crate::manifest::MANIFEST_FILE;
use crate::source::BrandSource;

/// Source ids tried when no manifest is available.
pub const DEFAULT_FALLBACK_SOURCES: [&str; 3] = ["color_blue.json", "gef.json", "stop.json"];

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub manifest_name: String,
    pub fallback_sources: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            manifest_name: MANIFEST_FILE.to_string(),
            fallback_sources: DEFAULT_FALLBACK_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub brands: Vec<BrandRecord>,
    pub skipped: Vec<SkippedSource>,
    pub used_fallback: bool,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

fn load_one<S: BrandSource + ?Sized>(source: &S, id: &str) -> Result<BrandRecord, LoadError> {
    let bytes = source.fetch(id)?;
    Ok(BrandRecord::from_slice(&bytes)?)
}

/// Load every source the manifest (or fallback list) names.
///
/// Never fails as a whole: an unreadable source is logged and reported in
/// `skipped`, and a collection where every source failed is simply empty.
pub fn load_collection<S: BrandSource + ?Sized>(source: &S, config: &LoaderConfig) -> LoadReport {
    let (ids, used_fallback) = match source.manifest(&config.manifest_name) {
        Ok(ids) => (ids, false),
        Err(err) => {
            tracing::info!(
                manifest = %config.manifest_name,
                error = %err,
                "manifest unavailable; using fallback sources"
            );
            (config.fallback_sources.clone(), true)
        }
    };

    let fetched: Vec<(String, Result<BrandRecord, LoadError>)> = ids
        .par_iter()
        .map(|id| (id.clone(), load_one(source, id)))
        .collect();

    let mut report = LoadReport {
        used_fallback,
        ..LoadReport::default()
    };
    let mut seen: HashSet<String> = HashSet::new();
    for (id, result) in fetched {
        let outcome = result.and_then(|record| {
            if seen.insert(record.name().to_string()) {
                Ok(record)
            } else {
                Err(LoadError::DuplicateName(record.name().to_string()))
            }
        });
        match outcome {
            Ok(record) => report.brands.push(record),
            Err(err) => {
                tracing::warn!(source = %id, error = %err, "skipping brand source");
                report.skipped.push(SkippedSource {
                    source: id,
                    reason: err.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        loaded = report.brands.len(),
        skipped = report.skipped.len(),
        used_fallback,
        "brand collection loaded"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DirectorySource;
    use std::collections::BTreeMap;

    /// In-memory source for exercising the loader without touching disk.
    struct MemorySource {
        manifest: Option<Vec<String>>,
        docs: BTreeMap<String, String>,
    }

    impl MemorySource {
        fn new(manifest: Option<&[&str]>) -> Self {
            Self {
                manifest: manifest.map(|ids| ids.iter().map(|s| s.to_string()).collect()),
                docs: BTreeMap::new(),
            }
        }

        fn with_doc(mut self, id: &str, body: &str) -> Self {
            self.docs.insert(id.to_string(), body.to_string());
            self
        }
    }

    impl BrandSource for MemorySource {
        fn manifest(&self, name: &str) -> Result<Vec<String>, LoadError> {
            if name != MANIFEST_FILE {
                return Err(LoadError::NotFound(name.to_string()));
            }
            self.manifest
                .clone()
                .ok_or_else(|| LoadError::NotFound(name.to_string()))
        }

        fn fetch(&self, id: &str) -> Result<Vec<u8>, LoadError> {
            self.docs
                .get(id)
                .map(|body| body.as_bytes().to_vec())
                .ok_or_else(|| LoadError::NotFound(id.to_string()))
        }
    }

    fn doc(name: &str) -> String {
        format!(r#"{{ "brand": {{ "name": "{name}" }}, "dna": {{}} }}"#)
    }

    #[test]
    fn admits_in_manifest_order() {
        let source = MemorySource::new(Some(&["c.json", "a.json", "b.json"]))
            .with_doc("a.json", &doc("A"))
            .with_doc("b.json", &doc("B"))
            .with_doc("c.json", &doc("C"));
        let report = load_collection(&source, &LoaderConfig::default());
        let names: Vec<&str> = report.brands.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!(!report.used_fallback);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn missing_manifest_uses_fallback_list() {
        let source = MemorySource::new(None)
            .with_doc("gef.json", &doc("GEF"))
            .with_doc("stop.json", &doc("Stop"));
        let report = load_collection(&source, &LoaderConfig::default());
        let names: Vec<&str> = report.brands.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["GEF", "Stop"]);
        assert!(report.used_fallback);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].source, "color_blue.json");
    }

    #[test]
    fn malformed_and_nameless_documents_are_skipped() {
        let source = MemorySource::new(Some(&["ok.json", "broken.json", "nameless.json"]))
            .with_doc("ok.json", &doc("Ok"))
            .with_doc("broken.json", "{ not json")
            .with_doc("nameless.json", r#"{ "brand": {}, "dna": {} }"#);
        let report = load_collection(&source, &LoaderConfig::default());
        assert_eq!(report.brands.len(), 1);
        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(skipped, vec!["broken.json", "nameless.json"]);
    }

    #[test]
    fn duplicate_names_keep_first() {
        let source = MemorySource::new(Some(&["one.json", "two.json"]))
            .with_doc("one.json", r#"{ "brand": { "name": "Same", "country": "ES" } }"#)
            .with_doc("two.json", r#"{ "brand": { "name": "Same", "country": "FR" } }"#);
        let report = load_collection(&source, &LoaderConfig::default());
        assert_eq!(report.brands.len(), 1);
        assert_eq!(report.brands[0].identity.country.as_deref(), Some("ES"));
        assert_eq!(report.skipped[0].source, "two.json");
    }

    #[test]
    fn configured_manifest_name_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("brands.json"), r#"["a.json"]"#).unwrap();
        std::fs::write(dir.path().join("a.json"), doc("A")).unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"["missing.json"]"#).unwrap();

        let config = LoaderConfig {
            manifest_name: "brands.json".to_string(),
            ..LoaderConfig::default()
        };
        let report = load_collection(&DirectorySource::new(dir.path()), &config);
        assert!(!report.used_fallback);
        assert!(report.skipped.is_empty());
        let names: Vec<&str> = report.brands.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn unknown_manifest_name_falls_back() {
        let source = MemorySource::new(Some(&["a.json"]))
            .with_doc("a.json", &doc("A"))
            .with_doc("gef.json", &doc("GEF"));
        let config = LoaderConfig {
            manifest_name: "brands.json".to_string(),
            ..LoaderConfig::default()
        };
        let report = load_collection(&source, &config);
        assert!(report.used_fallback);
        let names: Vec<&str> = report.brands.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["GEF"]);
    }

    #[test]
    fn all_failures_yield_empty_collection() {
        let source = MemorySource::new(None);
        let report = load_collection(&source, &LoaderConfig::default());
        assert!(report.is_empty());
        assert_eq!(report.skipped.len(), 3);
    }
}
