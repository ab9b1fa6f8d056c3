use crate::instant::lenient_instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of client-generated photo ids. A provisional id exists only
/// between local creation and server confirmation.
pub const PROVISIONAL_ID_PREFIX: &str = "local_";

/// One image record within a gallery. `position` is a derived cache of the
/// photo's index in its collection; the collection reducer keeps both in
/// agreement after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub thumb_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, with = "lenient_instant")]
    pub taken_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub position: usize,
}

impl Photo {
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.id.starts_with(PROVISIONAL_ID_PREFIX)
    }
}

// --- Mutation payloads ---

/// One entry of the order batch sent per Save action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoOrderUpdate {
    pub photo_id: String,
    pub position: usize,
}

/// Metadata for one photo being created after its file upload completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhotoItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    pub image_url: String,
    pub thumb_url: String,
    #[serde(default, with = "lenient_instant")]
    pub taken_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// Partial update of one photo's descriptive metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<Option<DateTime<Utc>>>,
}
