//! JSON files for the library and the review session.
//!
//! Writes go to a temp file that is synced and then renamed over the target,
//! so a crash never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use sdcard_session::Session;

use crate::error::{Result, StoreError};
use crate::library::{LIBRARY_SCHEMA_VERSION, Library};

/// Current session file schema version.
pub const SESSION_SCHEMA_VERSION: u32 = 1;

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    schema_version: u32,
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    schema_version: u32,
    session: Session,
}

/// Loads the library, or a fresh one if the file does not exist yet.
pub fn load_library(path: &Path) -> Result<Library> {
    match read_versioned::<Library>(path, LIBRARY_SCHEMA_VERSION)? {
        Some(library) => {
            info!(path = %path.display(), sequences = library.len(), "loaded library");
            Ok(library)
        }
        None => {
            info!(path = %path.display(), "no library yet, starting a new one");
            Ok(Library::new())
        }
    }
}

pub fn save_library(library: &Library, path: &Path) -> Result<()> {
    write_json(library, path)?;
    info!(path = %path.display(), sequences = library.len(), "saved library");
    Ok(())
}

/// Loads the session, or an empty one if the file does not exist yet.
pub fn load_session(path: &Path) -> Result<Session> {
    let file: Option<SessionFile> = read_versioned(path, SESSION_SCHEMA_VERSION)?;
    Ok(file.map(|file| file.session).unwrap_or_default())
}

pub fn save_session(session: &Session, path: &Path) -> Result<()> {
    let file = SessionFile {
        schema_version: SESSION_SCHEMA_VERSION,
        session: session.clone(),
    };
    write_json(&file, path)
}

/// Reads a JSON file carrying a `schema_version`. A missing file is `None`.
fn read_versioned<T: DeserializeOwned>(path: &Path, max_supported: u32) -> Result<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let probe: VersionProbe =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })?;
    if probe.schema_version > max_supported {
        return Err(StoreError::UnsupportedVersion {
            found: probe.schema_version,
            max_supported,
            path: path.to_path_buf(),
        });
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(&bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdcard_query::Query;
    use tempfile::tempdir;

    #[test]
    fn missing_files_load_as_fresh_values() {
        let dir = tempdir().unwrap();
        let library = load_library(&dir.path().join("library.json")).unwrap();
        assert!(library.is_empty());
        assert!(library.catalog().tag_by_name("weird").is_some());
        let session = load_session(&dir.path().join("session.json")).unwrap();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn save_creates_parent_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("library.json");
        save_library(&Library::new(), &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn session_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = Session::new();
        session.add_stack("everything", Query::default());
        save_session(&session, &path).unwrap();
        assert_eq!(load_session(&path).unwrap(), session);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, r#"{"schema_version": 99, "sequences": "whatever"}"#).unwrap();
        assert!(matches!(
            load_library(&path),
            Err(StoreError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(
            load_library(&path),
            Err(StoreError::Deserialization { .. })
        ));
    }
}
