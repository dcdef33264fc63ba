//! Schema definitions for Healthz requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::path::Path;

/// Health state reported for a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Unspecified,
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Unspecified => write!(f, "STATUS_UNSPECIFIED"),
            Status::Healthy => write!(f, "STATUS_HEALTHY"),
            Status::Unhealthy => write!(f, "STATUS_UNHEALTHY"),
        }
    }
}

/// Header describing a debug artifact collected for a health event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHeader {
    /// Artifact identifier, used to fetch the artifact contents.
    pub id: String,

    /// Artifact kind (e.g., "file", "proto", "custom").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Health state of a single addressed component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentStatus {
    /// Path of the component this status describes.
    pub path: Option<Path>,

    /// Child components that contributed to this status.
    pub subcomponents: Vec<Path>,

    pub status: Status,

    /// Identifier of the health event.
    pub id: String,

    /// Whether the event has been acknowledged by a client.
    pub acknowledged: bool,

    /// When the event was created.
    pub created: Option<DateTime<Utc>>,

    /// When the event data will be discarded by the device.
    pub expires: Option<DateTime<Utc>>,

    pub artifacts: Vec<ArtifactHeader>,
}

/// Point lookup of the latest status for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub path: Path,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetResponse {
    pub component: Option<ComponentStatus>,
}

/// Listing of all health events under a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub path: Path,
    /// Include events that were already acknowledged.
    pub include_acknowledged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListResponse {
    pub statuses: Vec<ComponentStatus>,
}

/// Request to re-evaluate the health of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub path: Path,
    /// Event to re-check. Empty means the latest state.
    pub event_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResponse {
    pub status: Option<ComponentStatus>,
}

impl ComponentStatus {
    /// Create a status record for a path.
    pub fn new(path: Path, status: Status, id: impl Into<String>) -> Self {
        Self {
            path: Some(path),
            status,
            id: id.into(),
            ..Default::default()
        }
    }
}
