use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::folder::FolderKey;
use crate::error::BrainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Link,
    Voice,
}

impl Modality {
    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Link => "link",
            Modality::Voice => "voice",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = BrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Modality::Text),
            "image" => Ok(Modality::Image),
            "link" => Ok(Modality::Link),
            "voice" => Ok(Modality::Voice),
            other => Err(BrainError::Validation(format!(
                "Unsupported modality: {}",
                other
            ))),
        }
    }
}

/// Not enforced by any transition rule yet; persisted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtStatus {
    #[default]
    Active,
    Snoozed,
    Archived,
}

/// Value stored in a thought's `meta` bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Map(Meta),
}

pub type Meta = BTreeMap<String, MetaValue>;

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::String(v.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::String(v)
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Number(v.into())
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(MetaValue::Number)
            .unwrap_or(MetaValue::Null)
    }
}

impl From<Meta> for MetaValue {
    fn from(v: Meta) -> Self {
        MetaValue::Map(v)
    }
}

/// A captured unit of content with its routing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub title: Option<String>,
    pub content: Option<String>,
    pub modality: Modality,
    pub source_url: Option<String>,
    /// Inline data URL for image captures.
    pub image_data_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub folder: FolderKey,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub status: ThoughtStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Thought {
    pub fn new(modality: Modality, folder: FolderKey) -> Self {
        Self {
            title: None,
            content: None,
            modality,
            source_url: None,
            image_data_url: None,
            tags: Vec::new(),
            folder,
            meta: Meta::new(),
            pinned: false,
            status: ThoughtStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    /// Fill in missing timestamps. Existing values are kept; `updated_at`
    /// never precedes `created_at`.
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        let created = *self.created_at.get_or_insert(now);
        match self.updated_at {
            Some(updated) if updated >= created => {}
            _ => self.updated_at = Some(created.max(now)),
        }
    }
}

/// A persisted thought as it crosses the store boundary: the internal
/// identifier is always materialized as a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub id: String,
    #[serde(flatten)]
    pub thought: Thought,
}
