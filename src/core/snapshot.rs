//! Postman globals documents.
//!
//! A globals file is a JSON object whose `values` array holds
//! `{ key, value, type, enabled }` entries. Only `key` and `value` matter
//! here; every other field, in the document and in each entry, round-trips
//! unchanged and in its original order.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::core::domain::Binding;
use crate::error::{Result, SnapshotError};

const VALUES_FIELD: &str = "values";

/// A single named variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    #[serde(default, deserialize_with = "value_as_string")]
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// Postman exports occasionally carry booleans or numbers as values.
fn value_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A globals document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    document: Map<String, Value>,
    values: Vec<Entry>,
}

impl Snapshot {
    /// Build a document holding only a `values` array.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            document: Map::new(),
            values: entries,
        }
    }

    /// Parse a globals document.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let parse_err = |source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let document: Map<String, Value> = serde_json::from_str(contents).map_err(parse_err)?;
        let values = match document.get(VALUES_FIELD) {
            Some(values) => serde_json::from_value(values.clone()).map_err(parse_err)?,
            None => Vec::new(),
        };

        Ok(Self { document, values })
    }

    /// Load a globals file that must exist.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::NotFound` if the file is missing, or
    /// `SnapshotError::Parse` if it is not a globals document.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_optional(path)?.ok_or_else(|| SnapshotError::NotFound(path.to_path_buf()).into())
    }

    /// Load a globals file, treating a missing file as `None`.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %path.display(), "globals file absent");
                return Ok(None);
            }
            Err(source) => {
                return Err(SnapshotError::Read {
                    path: path.to_path_buf(),
                    source,
                }
                .into())
            }
        };

        let snapshot = Self::parse(&contents, path)?;
        debug!(path = %path.display(), entries = snapshot.values.len(), "globals loaded");
        Ok(Some(snapshot))
    }

    /// Serialize as 2-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut document = self.document.clone();
        let values = serde_json::to_value(&self.values).map_err(SnapshotError::Serialize)?;
        // Replacing an existing key keeps its position.
        document.insert(VALUES_FIELD.to_string(), values);

        let mut json =
            serde_json::to_string_pretty(&Value::Object(document)).map_err(SnapshotError::Serialize)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the whole document, replacing any previous file.
    ///
    /// The document is written to a sibling temp file first and renamed into
    /// place, so readers never observe a half-written file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let write_err = |source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = tmp_path(path);
        {
            let mut file = fs::File::create(&tmp).map_err(write_err)?;
            file.write_all(json.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }
        fs::rename(&tmp, path).map_err(write_err)?;

        debug!(path = %path.display(), entries = self.values.len(), "globals written");
        Ok(())
    }

    /// Raw value of the first entry with `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Value of `key` classified as placeholder or bound. Missing and empty
    /// values are both `None`.
    pub fn binding(&self, key: &str) -> Option<Binding> {
        self.get(key).and_then(Binding::from_value)
    }

    /// Overwrite every entry named `key`. Returns whether any entry matched.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let mut found = false;
        for entry in self.values.iter_mut().filter(|e| e.key == key) {
            entry.value = value.to_string();
            found = true;
        }
        found
    }

    /// Overwrite `key`, appending a new entry when it is absent.
    pub fn upsert(&mut self, key: &str, value: &str) {
        if !self.set(key, value) {
            self.values.push(Entry::new(key, value));
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.iter().any(|e| e.key == key)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.values
    }

    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
