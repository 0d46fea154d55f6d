//! Archive access
//!
//! The aggregation core never touches storage itself. It asks an
//! [`ArchiveAccessor`] for the parsed content of one category file at a time.
//!
//! Two implementations ship here:
//! - [`MemoryArchive`]: category name → JSON value map (fixtures, snapshots of
//!   already-parsed archives)
//! - [`DirArchive`]: an unpacked export directory on disk

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Failure to produce the content of one archive category file
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Category file does not exist in this archive
    #[error("Archive file not found: {0}")]
    NotFound(String),

    /// Category file exists but its content is not valid JSON
    #[error("Failed to parse archive file {name}: {message}")]
    Parse { name: String, message: String },

    /// Storage could not be read
    #[error("IO error reading archive file {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only access to the parsed files of one export archive
///
/// Implementations must be shareable across concurrently running extractors.
#[async_trait]
pub trait ArchiveAccessor: Send + Sync {
    /// Return the parsed JSON content of the named category file
    ///
    /// # Errors
    /// * `ArchiveError::NotFound` - file absent from the archive
    /// * `ArchiveError::Parse` - file present but unparsable
    /// * `ArchiveError::Io` - storage failure
    async fn get_file(&self, name: &str) -> Result<Value, ArchiveError>;
}

/// In-memory archive keyed by category file name
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    files: HashMap<String, Value>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_file(mut self, name: impl Into<String>, content: Value) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: Value) {
        self.files.insert(name.into(), content);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.files.remove(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl ArchiveAccessor for MemoryArchive {
    async fn get_file(&self, name: &str) -> Result<Value, ArchiveError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| ArchiveError::NotFound(name.to_string()))
    }
}

/// Archive backed by an unpacked export directory
///
/// Category files are looked up under `<root>/data/` first, then `<root>/`.
/// Export files are JavaScript assignments (`window.YTD.ageinfo.part0 = [...]`);
/// the assignment prefix is stripped before parsing.
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, name: &str) -> [PathBuf; 2] {
        [self.root.join("data").join(name), self.root.join(name)]
    }
}

#[async_trait]
impl ArchiveAccessor for DirArchive {
    async fn get_file(&self, name: &str) -> Result<Value, ArchiveError> {
        for path in self.candidates(name) {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    debug!(file = %path.display(), "Read archive file");
                    return parse_archive_content(name, &content);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(ArchiveError::Io {
                        name: name.to_string(),
                        source,
                    })
                }
            }
        }

        Err(ArchiveError::NotFound(name.to_string()))
    }
}

/// Parse the text of one export file, stripping a `window.YTD.* =` prefix if present
pub fn parse_archive_content(name: &str, content: &str) -> Result<Value, ArchiveError> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let json = if content.starts_with("window.") {
        match content.find('=') {
            Some(idx) => &content[idx + 1..],
            None => {
                return Err(ArchiveError::Parse {
                    name: name.to_string(),
                    message: "assignment prefix without '='".to_string(),
                })
            }
        }
    } else {
        content
    };

    serde_json::from_str(json.trim().trim_end_matches(';')).map_err(|e| ArchiveError::Parse {
        name: name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_archive_get_and_missing() {
        let archive = MemoryArchive::new().with_file("verified.js", json!([{"verified": {"verified": true}}]));

        assert_eq!(archive.len(), 1);
        let value = archive.get_file("verified.js").await.unwrap();
        assert_eq!(value[0]["verified"]["verified"], json!(true));

        match archive.get_file("ageinfo.js").await {
            Err(ArchiveError::NotFound(name)) => assert_eq!(name, "ageinfo.js"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_strips_window_prefix() {
        let content = "window.YTD.account_timezone.part0 = [ {\n  \"accountTimezone\" : { \"timeZone\" : \"Paris\" }\n} ]";
        let value = parse_archive_content("account-timezone.js", content).unwrap();
        assert_eq!(value[0]["accountTimezone"]["timeZone"], json!("Paris"));
    }

    #[test]
    fn test_parse_plain_json_and_trailing_semicolon() {
        let value = parse_archive_content("x.js", "[1, 2, 3];").unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_parse_error_carries_name() {
        match parse_archive_content("ip-audit.js", "window.YTD.ip_audit.part0 = [ {") {
            Err(ArchiveError::Parse { name, .. }) => assert_eq!(name, "ip-audit.js"),
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dir_archive_prefers_data_subfolder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data").join("verified.js"),
            "window.YTD.verified.part0 = [ { \"verified\" : { \"verified\" : true } } ]",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("verified.js"),
            "window.YTD.verified.part0 = [ { \"verified\" : { \"verified\" : false } } ]",
        )
        .unwrap();
        std::fs::write(dir.path().join("phone-number.js"), "[]").unwrap();

        let archive = DirArchive::new(dir.path());
        let verified = archive.get_file("verified.js").await.unwrap();
        assert_eq!(verified[0]["verified"]["verified"], json!(true));

        // Falls back to the archive root
        assert_eq!(archive.get_file("phone-number.js").await.unwrap(), json!([]));

        assert!(matches!(
            archive.get_file("ageinfo.js").await,
            Err(ArchiveError::NotFound(_))
        ));
    }
}
