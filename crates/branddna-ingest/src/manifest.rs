//! Offline manifest generation.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::LoadError;

pub const MANIFEST_FILE: &str = "manifest.json";

/// `*.json` files directly inside `dir`, excluding the manifest itself,
/// sorted by name.
pub fn generate_manifest(dir: &Path) -> Result<Vec<String>, LoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        if name.ends_with(".json") && name != MANIFEST_FILE {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}

/// Regenerate `dir/manifest.json` and return the listed files.
pub fn write_manifest(dir: &Path) -> Result<Vec<String>, LoadError> {
    let files = generate_manifest(dir)?;
    let mut rendered = serde_json::to_string_pretty(&files)?;
    rendered.push('\n');
    std::fs::write(dir.join(MANIFEST_FILE), rendered)?;
    tracing::info!(dir = %dir.display(), count = files.len(), "manifest updated");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_json_files_sorted_without_manifest() {
        let dir = tempdir().unwrap();
        for name in ["stop.json", "gef.json", "notes.txt", MANIFEST_FILE] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();
        std::fs::write(dir.path().join("nested.json").join("inner.json"), "{}").unwrap();

        let files = generate_manifest(dir.path()).unwrap();
        assert_eq!(files, vec!["gef.json", "stop.json"]);
    }

    #[test]
    fn write_manifest_round_trips() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("color_blue.json"), "{}").unwrap();
        let files = write_manifest(dir.path()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert!(raw.ends_with("]\n"));
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, files);
        assert_eq!(parsed, vec!["color_blue.json"]);
    }
}
