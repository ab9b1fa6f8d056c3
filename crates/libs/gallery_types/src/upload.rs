use serde::{Deserialize, Serialize};

/// A file handed to the storage collaborator for upload. `preview_url` is
/// an optional local preview location (object URL, temp path) used for the
/// provisional grid entry while the upload is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSource {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview_url: Option<String>,
}

impl UploadSource {
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased file extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, extension) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || extension.is_empty() {
            return None;
        }
        Some(extension.to_ascii_lowercase())
    }

    /// Default photo title: the file name with its extension stripped.
    #[must_use]
    pub fn title_from_file_name(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => self.file_name.clone(),
        }
    }
}

/// Upload confirmation from the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
    pub bytes: u64,
}
