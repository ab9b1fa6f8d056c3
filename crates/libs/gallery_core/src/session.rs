//! Editing orchestration: everything that pairs the local draft with the
//! remote collaborators.
//!
//! Mutations stay synchronous and local; the awaited gateway calls are
//! the only suspension points. A save is two sequential remote calls,
//! the scalar patch and the photo-order batch, committed independently,
//! so a partial failure leaves exactly the unsaved half dirty and a retry
//! re-sends only that half.

use crate::draft::GalleryDraft;
use crate::error::{EditorError, GatewayError, UploadError};
use crate::gateway::{FileStorage, PersistenceGateway};
use crate::ids::provisional_id;
use crate::token_store::AccessTokenStore;
use gallery_types::{
    AccessCheck, CreatePhotoItem, DisplaySettingsPayload, GalleryDetails, Photo, PhotoPatch,
    StatusOptions, UploadSource,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

/// Limits applied before any upload traffic, mirroring what the backend
/// enforces.
pub const MAX_FILES_PER_BATCH: usize = 5;
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Shared collaborators handed to every session.
#[derive(Clone)]
pub struct EditorContext {
    gateway: Arc<dyn PersistenceGateway>,
    storage: Arc<dyn FileStorage>,
    tokens: Arc<AccessTokenStore>,
}

/// Which half of a save failed.
#[derive(Debug, Error)]
pub enum SaveFailure {
    #[error("save failed: {0}")]
    Gallery(GatewayError),

    #[error("gallery saved, but photo order failed: {0}")]
    PhotoOrder(GatewayError),
}

/// Outcome of one save action. Both halves report independently so the
/// rendering layer can tell a partial save from a full failure.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub gallery_saved: bool,
    pub order_saved: bool,
    pub failure: Option<SaveFailure>,
}

impl SaveReport {
    /// Scalar fields were persisted but the order batch was not.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self.failure, Some(SaveFailure::PhotoOrder(_)))
    }
}

impl EditorContext {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        storage: Arc<dyn FileStorage>,
        tokens: Arc<AccessTokenStore>,
    ) -> Self {
        Self {
            gateway,
            storage,
            tokens,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &AccessTokenStore {
        &self.tokens
    }

    /// Fetch a gallery, attaching the stored access token if one exists.
    /// An authorization failure drops the token so the caller re-prompts
    /// instead of silently retrying stale credentials.
    #[instrument(skip(self))]
    pub async fn fetch_gallery(&self, gallery_id: &str) -> Result<GalleryDetails, GatewayError> {
        let token = self.tokens.get(gallery_id);
        match self.gateway.fetch_gallery(gallery_id, token.as_deref()).await {
            Err(GatewayError::Unauthorized(message)) => {
                self.tokens.clear(gallery_id);
                Err(GatewayError::Unauthorized(message))
            }
            other => other,
        }
    }

    /// Exchange a passphrase/PIN for an access token. A failed check
    /// leaves no token behind.
    #[instrument(skip(self, secret))]
    pub async fn verify_access(
        &self,
        gallery_id: &str,
        secret: &str,
    ) -> Result<AccessCheck, GatewayError> {
        let check = self.gateway.verify_gallery_access(gallery_id, secret).await?;
        if check.ok {
            if let Some(token) = &check.token {
                self.tokens.set(gallery_id, token);
            }
        }
        Ok(check)
    }

    /// Open an editor over an existing gallery.
    pub async fn open(
        &self,
        gallery_id: &str,
        status_options: StatusOptions,
    ) -> Result<EditorSession, EditorError> {
        let details = self.fetch_gallery(gallery_id).await?;
        Ok(EditorSession {
            context: self.clone(),
            draft: GalleryDraft::from_remote(details, status_options),
        })
    }

    /// Open an editor over a brand-new, not-yet-persisted gallery.
    #[must_use]
    pub fn create(&self, status_options: StatusOptions) -> EditorSession {
        EditorSession {
            context: self.clone(),
            draft: GalleryDraft::new_untitled(status_options),
        }
    }

    #[instrument(skip(self))]
    pub async fn archive_gallery(&self, gallery_id: &str) -> Result<(), GatewayError> {
        self.gateway.archive_gallery(gallery_id).await
    }

    #[instrument(skip(self))]
    pub async fn restore_gallery(&self, gallery_id: &str) -> Result<(), GatewayError> {
        self.gateway.restore_gallery(gallery_id).await
    }

    /// Hard delete, distinct from archiving.
    #[instrument(skip(self))]
    pub async fn delete_gallery(&self, gallery_id: &str) -> Result<(), GatewayError> {
        self.gateway.delete_gallery(gallery_id).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_display_settings(
        &self,
    ) -> Result<DisplaySettingsPayload, GatewayError> {
        self.gateway.fetch_display_settings().await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_display_settings(
        &self,
        payload: &DisplaySettingsPayload,
    ) -> Result<DisplaySettingsPayload, GatewayError> {
        self.gateway.update_display_settings(payload).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_status_options(&self) -> Result<StatusOptions, GatewayError> {
        self.gateway.fetch_status_options().await
    }

    pub(crate) fn gateway(&self) -> &Arc<dyn PersistenceGateway> {
        &self.gateway
    }
}

pub struct EditorSession {
    context: EditorContext,
    draft: GalleryDraft,
}

impl EditorSession {
    #[must_use]
    pub fn draft(&self) -> &GalleryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut GalleryDraft {
        &mut self.draft
    }

    /// The explicit Save action: scalar patch first, then the photo-order
    /// batch, each committed on its own. A failed half leaves its edits
    /// dirty for a retry; nothing is retried automatically.
    #[instrument(skip(self), fields(gallery_id = self.draft.id()))]
    pub async fn save(&mut self) -> Result<SaveReport, EditorError> {
        let ticket = self.draft.begin_save()?;
        let mut report = SaveReport::default();

        if !ticket.patch.is_empty() {
            let result = match self.draft.id() {
                Some(id) => {
                    self.context
                        .gateway()
                        .save_gallery_patch(id, &ticket.patch)
                        .await
                }
                None => {
                    self.context
                        .gateway()
                        .create_gallery(&self.draft.create_payload())
                        .await
                }
            };
            match result {
                Ok(details) => {
                    if self.draft.id().is_none() {
                        self.draft.commit_create(&ticket, &details);
                    } else {
                        self.draft.commit_patch(&ticket);
                    }
                    report.gallery_saved = true;
                }
                Err(error) => {
                    warn!("Gallery save failed: {error}");
                    self.draft.finish_save(&ticket);
                    report.failure = Some(SaveFailure::Gallery(error));
                    return Ok(report);
                }
            }
        }

        if let Some(order) = &ticket.order {
            match self.context.gateway().save_photo_order(order).await {
                Ok(()) => {
                    self.draft.commit_order(&ticket);
                    report.order_saved = true;
                }
                Err(error) => {
                    warn!("Photo order save failed: {error}");
                    report.failure = Some(SaveFailure::PhotoOrder(error));
                }
            }
        }

        self.draft.finish_save(&ticket);
        Ok(report)
    }

    /// Upload files and attach the confirmed photo records. The grid gets
    /// provisional entries for the duration of the round-trip; they are
    /// swapped for the server records on success and rolled back on
    /// failure.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn add_photos(&mut self, files: &[UploadSource]) -> Result<Vec<Photo>, EditorError> {
        validate_uploads(files)?;
        let Some(gallery_id) = self.draft.id().map(str::to_string) else {
            return Err(EditorError::UnsavedGallery);
        };

        let order_was_dirty = self.draft.photos().order_dirty();
        let provisional: Vec<Photo> = files
            .iter()
            .map(|source| Photo {
                id: provisional_id(),
                image_url: source.preview_url.clone().unwrap_or_default(),
                thumb_url: source.preview_url.clone().unwrap_or_default(),
                title: Some(source.title_from_file_name()),
                caption: None,
                taken_at: None,
                file_size: Some(source.size()),
                position: 0,
            })
            .collect();
        self.draft.photos_mut().insert_batch(provisional.clone());

        match self.upload_and_create(&gallery_id, files).await {
            Ok(created) => {
                for (placeholder, confirmed) in provisional.iter().zip(created.iter()) {
                    self.draft
                        .photos_mut()
                        .replace(&placeholder.id, confirmed.clone());
                }
                Ok(created)
            }
            Err(error) => {
                for placeholder in &provisional {
                    self.draft.photos_mut().remove(&placeholder.id);
                }
                if !order_was_dirty {
                    self.draft.photos_mut().commit_order();
                }
                Err(error)
            }
        }
    }

    /// Persist a photo's descriptive metadata and mirror the confirmed
    /// record locally.
    #[instrument(skip(self, patch))]
    pub async fn update_photo(
        &mut self,
        photo_id: &str,
        patch: &PhotoPatch,
    ) -> Result<Photo, EditorError> {
        let updated = self.context.gateway().update_photo(photo_id, patch).await?;
        self.draft.photos_mut().update_metadata(&updated);
        Ok(updated)
    }

    /// Delete remotely first, then close the local gap; a failed call
    /// leaves the grid untouched.
    #[instrument(skip(self))]
    pub async fn remove_photo(&mut self, photo_id: &str) -> Result<(), EditorError> {
        self.context.gateway().delete_photo(photo_id).await?;
        self.draft.photos_mut().remove(photo_id);
        Ok(())
    }

    /// Re-parent a photo to another gallery. Returns the updated record
    /// for the caller to append to the destination collection; the two
    /// collections are separate reducers.
    #[instrument(skip(self))]
    pub async fn move_photo_to(
        &mut self,
        photo_id: &str,
        to_gallery_id: &str,
    ) -> Result<Photo, EditorError> {
        let moved = self
            .context
            .gateway()
            .move_photo(photo_id, to_gallery_id)
            .await?;
        self.draft.photos_mut().move_out(photo_id);
        Ok(moved)
    }

    /// Accept a photo moved out of another gallery into this one.
    pub fn adopt_photo(&mut self, photo: Photo) {
        self.draft.photos_mut().insert_batch(vec![photo]);
    }

    /// Soft-delete this gallery. The caller discards the session on
    /// success.
    #[instrument(skip(self), fields(gallery_id = self.draft.id()))]
    pub async fn archive(&self) -> Result<(), EditorError> {
        let Some(id) = self.draft.id() else {
            return Err(EditorError::UnsavedGallery);
        };
        self.context.archive_gallery(id).await?;
        Ok(())
    }

    async fn upload_and_create(
        &self,
        gallery_id: &str,
        files: &[UploadSource],
    ) -> Result<Vec<Photo>, EditorError> {
        let uploaded = self.context.storage.upload_files(files).await?;
        let items: Vec<CreatePhotoItem> = files
            .iter()
            .zip(uploaded.iter())
            .map(|(source, upload)| CreatePhotoItem {
                title: Some(source.title_from_file_name()),
                caption: None,
                image_url: upload.url.clone(),
                thumb_url: upload.url.clone(),
                taken_at: None,
                file_size: Some(upload.bytes),
            })
            .collect();
        let created = self
            .context
            .gateway()
            .create_photos(gallery_id, &items)
            .await?;
        Ok(created)
    }
}

/// Check a selection against the upload limits before any traffic.
/// Reports every issue at once, like the upload dialog does.
pub fn validate_uploads(files: &[UploadSource]) -> Result<(), UploadError> {
    let mut issues = Vec::new();
    if files.is_empty() {
        issues.push("Please select at least 1 photo.".to_string());
    }
    if files.len() > MAX_FILES_PER_BATCH {
        issues.push(format!(
            "You can upload max {MAX_FILES_PER_BATCH} photos at once."
        ));
    }
    for source in files {
        let supported = source
            .extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));
        if !supported {
            issues.push(format!("{} has unsupported format.", source.file_name));
        }
        if source.size() > MAX_FILE_BYTES {
            issues.push(format!(
                "{} exceeds {}MB.",
                source.file_name,
                MAX_FILE_BYTES / (1024 * 1024)
            ));
        }
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(UploadError { issues })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, size: usize) -> UploadSource {
        UploadSource {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0; size],
            preview_url: None,
        }
    }

    #[test]
    fn upload_preflight_collects_every_issue() {
        let files = vec![source("notes.txt", 10), source("huge.jpg", 6 * 1024 * 1024)];
        let error = validate_uploads(&files).expect_err("two issues");
        assert_eq!(error.issues.len(), 2);
        assert!(error.issues[0].contains("notes.txt"));
        assert!(error.issues[1].contains("huge.jpg"));
    }

    #[test]
    fn upload_preflight_enforces_batch_limit() {
        let files: Vec<UploadSource> = (0..6).map(|i| source(&format!("p{i}.jpg"), 10)).collect();
        let error = validate_uploads(&files).expect_err("too many");
        assert!(error.issues[0].contains("max 5"));
    }

    #[test]
    fn upload_preflight_accepts_valid_batch() {
        let files = vec![source("a.JPG", 10), source("b.webp", 10)];
        assert!(validate_uploads(&files).is_ok());
    }

    #[test]
    fn empty_selection_is_rejected() {
        let error = validate_uploads(&[]).expect_err("empty");
        assert!(error.issues[0].contains("at least 1"));
    }
}
