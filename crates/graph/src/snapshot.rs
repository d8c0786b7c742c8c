//! Snapshot documents the graph is built from.
//!
//! A snapshot is three JSON documents: the lens catalog, the curated
//! relationships and the thematic frames. Documents are parsed record by
//! record so one malformed entry does not take the rest of its document down.

use crate::config::SnapshotConfig;
use crate::error::{GraphError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub episode: Option<Episode>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub lens_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definition: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_concepts: Vec<String>,
}

/// Episode markers arrive as integers, floats or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Episode {
    Number(i64),
    Float(f64),
    Text(String),
}

impl Episode {
    /// Integer sequence index, when the marker is integer-like.
    #[must_use]
    pub fn sequence_index(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for Episode {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// An explicitly authored or discovered connection between two lenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub source_id: String,
    pub target_id: String,
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub insight: String,
}

/// A thematic grouping of lenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lens_ids: Vec<String>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of the three snapshot documents.
///
/// Each loader is independent: the builder logs and skips a failing document
/// and keeps whatever the others produced.
pub trait SnapshotSource {
    fn load_lenses(&self) -> Result<Vec<LensRecord>>;
    fn load_relationships(&self) -> Result<Vec<RelationshipRecord>>;
    fn load_frames(&self) -> Result<Vec<FrameRecord>>;
}

/// In-memory snapshot, mostly used by tests and embedders that already hold
/// the documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lenses: Vec<LensRecord>,
    pub relationships: Vec<RelationshipRecord>,
    pub frames: Vec<FrameRecord>,
}

impl SnapshotSource for Snapshot {
    fn load_lenses(&self) -> Result<Vec<LensRecord>> {
        Ok(self.lenses.clone())
    }

    fn load_relationships(&self) -> Result<Vec<RelationshipRecord>> {
        Ok(self.relationships.clone())
    }

    fn load_frames(&self) -> Result<Vec<FrameRecord>> {
        Ok(self.frames.clone())
    }
}

/// Snapshot read from JSON files in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    catalog: PathBuf,
    relationships: PathBuf,
    frames: PathBuf,
}

impl DirectorySnapshot {
    #[must_use]
    pub fn new(config: &SnapshotConfig) -> Self {
        Self::with_dir(&config.data_dir, config)
    }

    /// Same file names as `config`, rooted at `dir`.
    #[must_use]
    pub fn with_dir(dir: &Path, config: &SnapshotConfig) -> Self {
        Self {
            catalog: dir.join(&config.catalog_file),
            relationships: dir.join(&config.relationships_file),
            frames: dir.join(&config.frames_file),
        }
    }

    fn read(path: &Path) -> Result<Value> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl SnapshotSource for DirectorySnapshot {
    fn load_lenses(&self) -> Result<Vec<LensRecord>> {
        parse_lenses(Self::read(&self.catalog)?)
    }

    fn load_relationships(&self) -> Result<Vec<RelationshipRecord>> {
        parse_relationships(Self::read(&self.relationships)?)
    }

    fn load_frames(&self) -> Result<Vec<FrameRecord>> {
        parse_frames(Self::read(&self.frames)?)
    }
}

/// Parse the catalog document: a JSON array of lens records.
pub fn parse_lenses(doc: Value) -> Result<Vec<LensRecord>> {
    parse_records(doc, None, "lens catalog")
}

/// Parse the curated relationships document: an array or `{"connections": [...]}`.
pub fn parse_relationships(doc: Value) -> Result<Vec<RelationshipRecord>> {
    parse_records(doc, Some("connections"), "relationships")
}

/// Parse the frames document: an array or `{"frames": [...]}`.
pub fn parse_frames(doc: Value) -> Result<Vec<FrameRecord>> {
    parse_records(doc, Some("frames"), "frames")
}

fn parse_records<T: DeserializeOwned>(
    doc: Value,
    wrapper_key: Option<&str>,
    what: &str,
) -> Result<Vec<T>> {
    let items = match (doc, wrapper_key) {
        (Value::Array(items), _) => items,
        (Value::Object(mut map), Some(key)) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            // A wrapper object without the key is an empty document, not a broken one.
            None => Vec::new(),
            Some(_) => {
                return Err(GraphError::BuildError(format!(
                    "{what}: `{key}` is not an array"
                )))
            }
        },
        _ => {
            return Err(GraphError::BuildError(format!(
                "{what}: expected a JSON array"
            )))
        }
    };

    let total = items.len();
    let mut records = Vec::with_capacity(total);
    for item in items {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => log::debug!("Skipping malformed {what} record: {e}"),
        }
    }

    let skipped = total - records.len();
    if skipped > 0 {
        log::warn!("Skipped {skipped} of {total} malformed {what} records");
    }

    Ok(records)
}
