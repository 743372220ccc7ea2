//! Block type discovery from manifest descriptors.
//!
//! A plugins directory contains one subdirectory per installed block, each
//! holding a `manifest.json` descriptor:
//!
//! ```json
//! { "contentBlockType": "greeting", "name": "Greeting", "description": "..." }
//! ```
//!
//! Discovery is tolerant: a single unreadable or malformed descriptor is
//! recorded as a failure and skipped, never aborting discovery of the
//! others. Only total unavailability of the plugins directory itself is an
//! error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use inlay_config::Config;
use inlay_renderer::directive::is_valid_type_key;
use serde::Deserialize;

/// Descriptor filename expected in each plugin subdirectory.
const MANIFEST_FILENAME: &str = "manifest.json";

/// Descriptive metadata for one installed block type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Block type key, unique across the plugins directory.
    #[serde(rename = "contentBlockType")]
    pub type_key: String,
    /// Human-readable name shown in the editor toolbar.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Short description of what the block renders.
    #[serde(default)]
    pub description: String,
}

/// Error making the manifest source itself unavailable.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The plugins directory cannot be read at all.
    #[error("cannot read plugins directory {}: {source}", path.display())]
    Unreadable {
        /// The directory that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Strict mode: one or more descriptors were malformed.
    #[error("{count} malformed plugin manifest(s); see discovery log")]
    MalformedEntries {
        /// Number of rejected descriptors.
        count: usize,
    },
}

/// One descriptor that was rejected during discovery.
#[derive(Debug)]
pub struct DiscoveryFailure {
    /// Path of the offending descriptor (or its directory).
    pub path: PathBuf,
    /// Why the descriptor was rejected.
    pub reason: String,
}

/// Outcome of one discovery pass: valid manifests plus a side list of
/// per-entry failures for logging.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Manifests that loaded and validated, in directory order.
    pub manifests: Vec<Manifest>,
    /// Descriptors that were skipped.
    pub failures: Vec<DiscoveryFailure>,
}

impl DiscoveryReport {
    /// Log every recorded failure at warn level.
    pub fn log_failures(&self) {
        for failure in &self.failures {
            tracing::warn!(
                path = %failure.path.display(),
                reason = %failure.reason,
                "Skipped plugin manifest"
            );
        }
    }
}

/// Discovers installed block types from a plugins directory.
pub struct ManifestStore {
    plugins_dir: PathBuf,
}

impl ManifestStore {
    /// Create a store reading from the given plugins directory.
    #[must_use]
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
        }
    }

    /// Create a store from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.plugins_dir())
    }

    /// Scan the plugins directory for manifests.
    ///
    /// Subdirectories are visited in name order so discovery is
    /// deterministic. Two manifests claiming the same type key resolve to
    /// the later-discovered one, with a warning.
    pub fn load(&self) -> Result<DiscoveryReport, DiscoveryError> {
        let entries = fs::read_dir(&self.plugins_dir).map_err(|source| {
            DiscoveryError::Unreadable {
                path: self.plugins_dir.clone(),
                source,
            }
        })?;

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        let mut report = DiscoveryReport::default();
        // type_key -> index into report.manifests, for collision handling
        let mut seen: HashMap<String, usize> = HashMap::new();

        for dir in dirs {
            let manifest_path = dir.join(MANIFEST_FILENAME);
            match load_manifest(&manifest_path) {
                Ok(manifest) => {
                    if let Some(&idx) = seen.get(&manifest.type_key) {
                        tracing::warn!(
                            type_key = %manifest.type_key,
                            path = %manifest_path.display(),
                            "Duplicate block type in plugins directory; later manifest wins"
                        );
                        report.manifests[idx] = manifest;
                    } else {
                        seen.insert(manifest.type_key.clone(), report.manifests.len());
                        report.manifests.push(manifest);
                    }
                }
                Err(reason) => report.failures.push(DiscoveryFailure {
                    path: manifest_path,
                    reason,
                }),
            }
        }

        Ok(report)
    }
}

/// Read and validate one descriptor file.
fn load_manifest(path: &Path) -> Result<Manifest, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let manifest: Manifest = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    if !is_valid_type_key(&manifest.type_key) {
        return Err(format!(
            "invalid contentBlockType: {:?}",
            manifest.type_key
        ));
    }
    Ok(manifest)
}

/// Load the available block types as directed by configuration.
///
/// Per-entry failures are logged; when `plugins.strict` is set they abort
/// discovery instead.
pub fn load_available(config: &Config) -> Result<Vec<Manifest>, DiscoveryError> {
    let report = ManifestStore::from_config(config).load()?;
    report.log_failures();
    if config.plugins.strict && !report.failures.is_empty() {
        return Err(DiscoveryError::MalformedEntries {
            count: report.failures.len(),
        });
    }
    Ok(report.manifests)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_manifest(root: &Path, dir: &str, json: &str) {
        let plugin_dir = root.join(dir);
        fs::create_dir_all(&plugin_dir).unwrap();
        fs::write(plugin_dir.join(MANIFEST_FILENAME), json).unwrap();
    }

    #[test]
    fn test_discovers_valid_manifests_in_order() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            "greeting",
            r#"{"contentBlockType":"greeting","name":"Greeting","description":"Says hello"}"#,
        );
        write_manifest(
            tmp.path(),
            "videoEmbed",
            r#"{"contentBlockType":"videoEmbed","name":"Video Embed"}"#,
        );

        let report = ManifestStore::new(tmp.path()).load().unwrap();
        assert!(report.failures.is_empty());
        assert_eq!(
            report.manifests,
            vec![
                Manifest {
                    type_key: "greeting".to_owned(),
                    display_name: "Greeting".to_owned(),
                    description: "Says hello".to_owned(),
                },
                Manifest {
                    type_key: "videoEmbed".to_owned(),
                    display_name: "Video Embed".to_owned(),
                    description: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_bad_entry_does_not_abort_discovery() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "broken", "{not json");
        write_manifest(
            tmp.path(),
            "greeting",
            r#"{"contentBlockType":"greeting","name":"Greeting"}"#,
        );
        // Missing descriptor entirely
        fs::create_dir_all(tmp.path().join("empty")).unwrap();

        let report = ManifestStore::new(tmp.path()).load().unwrap();
        assert_eq!(report.manifests.len(), 1);
        assert_eq!(report.manifests[0].type_key, "greeting");
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_missing_type_key_is_a_failure() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "anon", r#"{"name":"No Key"}"#);

        let report = ManifestStore::new(tmp.path()).load().unwrap();
        assert!(report.manifests.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_invalid_type_key_is_a_failure() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            "bad",
            r#"{"contentBlockType":"has spaces","name":"Bad"}"#,
        );

        let report = ManifestStore::new(tmp.path()).load().unwrap();
        assert!(report.manifests.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].reason.contains("contentBlockType"));
    }

    #[test]
    fn test_collision_keeps_later_manifest() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            "a_first",
            r#"{"contentBlockType":"dup","name":"First"}"#,
        );
        write_manifest(
            tmp.path(),
            "b_second",
            r#"{"contentBlockType":"dup","name":"Second"}"#,
        );

        let report = ManifestStore::new(tmp.path()).load().unwrap();
        assert_eq!(report.manifests.len(), 1);
        assert_eq!(report.manifests[0].display_name, "Second");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = ManifestStore::new(tmp.path().join("nope"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, DiscoveryError::Unreadable { .. }));
    }

    #[test]
    fn test_loose_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("stray.json"), "{}").unwrap();
        write_manifest(
            tmp.path(),
            "greeting",
            r#"{"contentBlockType":"greeting","name":"Greeting"}"#,
        );

        let report = ManifestStore::new(tmp.path()).load().unwrap();
        assert_eq!(report.manifests.len(), 1);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_load_available_strict_mode() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "broken", "{not json");
        write_manifest(
            tmp.path(),
            "greeting",
            r#"{"contentBlockType":"greeting","name":"Greeting"}"#,
        );

        let lenient = Config::for_plugins_dir(tmp.path(), false);
        let manifests = load_available(&lenient).unwrap();
        assert_eq!(manifests.len(), 1);

        let strict = Config::for_plugins_dir(tmp.path(), true);
        let err = load_available(&strict).unwrap_err();
        assert!(matches!(err, DiscoveryError::MalformedEntries { count: 1 }));
    }
}
