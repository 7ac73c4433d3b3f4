//! Task Entity
//!
//! A single to-do item as the remote service reports it, plus the payloads
//! sent to create or edit one.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ValidationError;

/// Server-assigned task identifier
pub type TaskId = u32;

/// Longest title accepted by the new/edit forms
pub const TITLE_MAX_LEN: usize = 255;

/// A to-do item (matches the remote service's JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, immutable
    pub id: TaskId,
    /// Non-empty title
    pub title: String,
    /// Optional free text
    #[serde(default)]
    pub description: Option<String>,
    /// Completion flag
    #[serde(default, deserialize_with = "flag")]
    pub is_finished: bool,
    /// Creation timestamp as sent by the service
    #[serde(default)]
    pub created_at: Option<String>,
}

// SQLite-backed services report booleans as 0/1.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

/// Trim a title and check it against the form limits
fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::TitleTooLong { max: TITLE_MAX_LEN });
    }
    Ok(title.to_string())
}

/// Blank descriptions are not sent at all
fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Body of `POST /task/new`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_finished: bool,
}

impl NewTask {
    /// Validate and normalize user input; new tasks always start unfinished
    pub fn new(title: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_title(title)?,
            description: normalize_description(description),
            is_finished: false,
        })
    }
}

/// Body of `PATCH /task/update/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskPatch {
    /// A provided title must survive trimming; absent fields stay unchanged
    pub fn new(title: Option<&str>, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: title.map(normalize_title).transpose()?,
            description: normalize_description(description),
        })
    }
}

/// Body of `PATCH /task/update/status/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub is_finished: bool,
}
