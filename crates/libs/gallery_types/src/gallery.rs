use crate::instant::lenient_instant;
use crate::photo::Photo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque publication-status label. The label set is owned by the
/// backend and fetched at runtime; which labels gate viewing is
/// configuration (`StatusOptions`), never a constant in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryStatus(String);

impl GalleryStatus {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GalleryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The server-owned status label set plus the configured gated subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOptions {
    pub labels: Vec<GalleryStatus>,
    #[serde(default)]
    pub gated: Vec<GalleryStatus>,
}

impl StatusOptions {
    #[must_use]
    pub fn new(labels: Vec<GalleryStatus>, gated: Vec<GalleryStatus>) -> Self {
        Self { labels, gated }
    }

    /// The default status for a new gallery: the first label of the
    /// fetched set. Empty sets (not yet fetched) yield an empty label;
    /// callers are expected to fetch the set before editing.
    #[must_use]
    pub fn default_status(&self) -> GalleryStatus {
        self.labels
            .first()
            .cloned()
            .unwrap_or_else(|| GalleryStatus::new(""))
    }

    #[must_use]
    pub fn is_gated(&self, status: &GalleryStatus) -> bool {
        self.gated.contains(status)
    }
}

// --- Read payloads ---

/// Full gallery record as fetched for editing or gated viewing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDetails {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "lenient_instant")]
    pub date: Option<DateTime<Utc>>,
    pub status: GalleryStatus,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// One row of a paginated gallery listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "lenient_instant")]
    pub date: Option<DateTime<Utc>>,
    pub status: GalleryStatus,
    #[serde(default)]
    pub cover_url: Option<String>,
}

// --- Write payloads ---

/// Minimal patch of changed scalar fields. The outer `Option` means
/// "unchanged when absent"; for the nullable fields the inner `Option`
/// distinguishes clearing the value from leaving it alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GalleryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<Option<String>>,
}

impl GalleryPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.status.is_none()
            && self.passphrase.is_none()
    }
}

/// Creation payload for a gallery that has never been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCreate {
    pub title: String,
    pub description: String,
    #[serde(default, with = "lenient_instant")]
    pub date: Option<DateTime<Utc>>,
    pub status: GalleryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}
