//! Versioned model persistence.
//!
//! A model file is one CBOR map `{ magic, version, payload }`. The header is read first
//! with the payload skipped; the payload is only decoded after the header matched, so a
//! file from another format version is reported as such instead of as a decoding error.
//! The payload is decoded straight from the bytes, so ordered maps keep their order.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize, Serialize,
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{ClassifierError, Result};

pub const MAGIC: &str = "TFIDF-NB";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a, T> {
    magic: &'a str,
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Header {
    #[serde(default)]
    magic: Option<String>,
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    payload: Option<IgnoredAny>,
}

#[derive(Deserialize)]
struct Body<T> {
    payload: T,
}

fn expected() -> String {
    format!("{MAGIC} v{FORMAT_VERSION}")
}

/// Writes `state` next to `path` and renames it into place.
pub fn save<T: Serialize, P: AsRef<Path>>(state: &T, path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        let envelope = Envelope { magic: MAGIC, version: FORMAT_VERSION, payload: state };
        serde_cbor::to_writer(&mut writer, &envelope)?;
        writer.flush()?;
    }
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), version = FORMAT_VERSION, "model saved");
    Ok(path.to_path_buf())
}

pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let header: Header = serde_cbor::from_slice(&bytes)?;

    let (magic, version) = (header.magic.unwrap_or_default(), header.version.unwrap_or(0));
    if magic != MAGIC || version != FORMAT_VERSION {
        return Err(ClassifierError::IncompatibleModelVersion {
            found: format!("{} v{}", if magic.is_empty() { "<none>" } else { magic.as_str() }, version),
            expected: expected(),
        });
    }
    if header.payload.is_none() {
        return Err(ClassifierError::IncompatibleModelVersion {
            found: format!("{magic} v{version} without payload"),
            expected: expected(),
        });
    }
    let body: Body<T> = serde_cbor::from_slice(&bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "model loaded");
    Ok(body.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct State {
        name: String,
        weights: Vec<f64>,
    }

    fn state() -> State {
        State { name: "flu".into(), weights: vec![0.1, -2.5, 1e-300] }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.cbor");
        let written = save(&state(), &path).unwrap();
        assert_eq!(written, path);
        let loaded: State = load(&path).unwrap();
        assert_eq!(loaded, state());
    }

    #[test]
    fn map_order_survives_round_trip() {
        let mut baselines: IndexMap<String, f64> = IndexMap::new();
        for label in ["Asma", "Demam Berdarah", "Diabetes", "Flu"] {
            baselines.insert(label.to_string(), 0.5);
        }
        let dir = tempfile::tempdir().unwrap();
        let path = save(&baselines, dir.path().join("ordered.cbor")).unwrap();
        let loaded: IndexMap<String, f64> = load(&path).unwrap();
        let keys: Vec<&str> = loaded.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Asma", "Demam Berdarah", "Diabetes", "Flu"]);
    }

    #[test]
    fn wrong_version_is_incompatible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.cbor");
        let envelope = Envelope { magic: MAGIC, version: FORMAT_VERSION + 1, payload: &state() };
        fs::write(&path, serde_cbor::to_vec(&envelope).unwrap()).unwrap();

        match load::<State, _>(&path) {
            Err(ClassifierError::IncompatibleModelVersion { found, expected }) => {
                assert_eq!(found, "TFIDF-NB v2");
                assert_eq!(expected, "TFIDF-NB v1");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn foreign_blob_is_incompatible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.cbor");
        fs::write(&path, serde_cbor::to_vec(&state()).unwrap()).unwrap();
        assert!(matches!(
            load::<State, _>(&path),
            Err(ClassifierError::IncompatibleModelVersion { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load::<State, _>(dir.path().join("none.cbor")),
            Err(ClassifierError::Io(_))
        ));
    }
}
