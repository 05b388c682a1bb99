//! Where brand documents come from.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::LoadError;

/// A store of brand documents addressed by source id.
///
/// Implementations must be shareable across threads: the loader fetches
/// sources in parallel.
pub trait BrandSource: Sync {
    /// Ordered source ids listed by the manifest called `name`.
    fn manifest(&self, name: &str) -> Result<Vec<String>, LoadError>;

    /// Raw bytes of one document.
    fn fetch(&self, id: &str) -> Result<Vec<u8>, LoadError>;
}

/// A directory of `*.json` documents with a manifest beside them.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source ids are plain relative paths inside the root.
    fn resolve(&self, id: &str) -> Result<PathBuf, LoadError> {
        let rel = Path::new(id);
        let plain = !id.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(LoadError::InvalidSourceId(id.to_string()));
        }
        Ok(self.root.join(rel))
    }

    fn read(&self, id: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(id)?;
        std::fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => LoadError::NotFound(id.to_string()),
            _ => LoadError::Io(err),
        })
    }
}

impl BrandSource for DirectorySource {
    fn manifest(&self, name: &str) -> Result<Vec<String>, LoadError> {
        let bytes = self.read(name)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn fetch(&self, id: &str) -> Result<Vec<u8>, LoadError> {
        self.read(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MANIFEST_FILE;
    use tempfile::tempdir;

    #[test]
    fn rejects_ids_that_escape_the_root() {
        let dir = tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        for id in ["../secret.json", "/etc/passwd", "", "a/../../b.json"] {
            assert!(
                matches!(source.fetch(id), Err(LoadError::InvalidSourceId(_))),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(source.fetch("gef.json"), Err(LoadError::NotFound(_))));
        assert!(matches!(
            source.manifest(MANIFEST_FILE),
            Err(LoadError::NotFound(_))
        ));
    }

    #[test]
    fn malformed_manifest_is_a_json_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ \"not\": \"a list\" }").unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(source.manifest(MANIFEST_FILE), Err(LoadError::Json(_))));
    }

    #[test]
    fn manifest_name_is_resolved_inside_the_root() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("brands.json"), r#"["gef.json"]"#).unwrap();
        let source = DirectorySource::new(dir.path());
        assert_eq!(source.manifest("brands.json").unwrap(), vec!["gef.json"]);
        assert!(matches!(
            source.manifest("../brands.json"),
            Err(LoadError::InvalidSourceId(_))
        ));
    }
}
