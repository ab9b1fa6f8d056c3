use crate::gallery::GallerySummary;
use serde::{Deserialize, Serialize};

/// Cursor state of a forward-only paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// One page of gallery summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPage {
    #[serde(default)]
    pub galleries: Vec<GallerySummary>,
    #[serde(default)]
    pub page_info: PageInfo,
}
