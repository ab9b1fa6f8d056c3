//! Port contracts for the external collaborators. The core only ever
//! talks to the backend and the file store through these traits; the
//! transport lives in an adapter crate.

use crate::error::GatewayError;
use async_trait::async_trait;
use gallery_types::{
    AccessCheck, CreatePhotoItem, DisplaySettingsPayload, GalleryCreate, GalleryDetails,
    GalleryPage, GalleryPatch, Photo, PhotoOrderUpdate, PhotoPatch, StatusOptions, UploadSource,
    UploadedFile,
};

/// Persistence contract for galleries and photos.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    // Gallery reads
    async fn fetch_gallery(
        &self,
        gallery_id: &str,
        token: Option<&str>,
    ) -> Result<GalleryDetails, GatewayError>;
    async fn verify_gallery_access(
        &self,
        gallery_id: &str,
        secret: &str,
    ) -> Result<AccessCheck, GatewayError>;
    async fn list_galleries_paginated(
        &self,
        after: Option<&str>,
        page_size: usize,
    ) -> Result<GalleryPage, GatewayError>;
    async fn list_archives_paginated(
        &self,
        after: Option<&str>,
        page_size: usize,
    ) -> Result<GalleryPage, GatewayError>;

    // Gallery writes
    async fn create_gallery(&self, create: &GalleryCreate) -> Result<GalleryDetails, GatewayError>;
    async fn save_gallery_patch(
        &self,
        gallery_id: &str,
        patch: &GalleryPatch,
    ) -> Result<GalleryDetails, GatewayError>;
    async fn archive_gallery(&self, gallery_id: &str) -> Result<(), GatewayError>;
    async fn restore_gallery(&self, gallery_id: &str) -> Result<(), GatewayError>;
    async fn delete_gallery(&self, gallery_id: &str) -> Result<(), GatewayError>;

    // Photo writes
    /// Persist the display order, one batch per Save action.
    async fn save_photo_order(&self, updates: &[PhotoOrderUpdate]) -> Result<(), GatewayError>;
    async fn create_photos(
        &self,
        gallery_id: &str,
        items: &[CreatePhotoItem],
    ) -> Result<Vec<Photo>, GatewayError>;
    async fn update_photo(
        &self,
        photo_id: &str,
        patch: &PhotoPatch,
    ) -> Result<Photo, GatewayError>;
    async fn move_photo(&self, photo_id: &str, to_gallery_id: &str)
    -> Result<Photo, GatewayError>;
    async fn delete_photo(&self, photo_id: &str) -> Result<(), GatewayError>;

    // App-wide records
    async fn fetch_display_settings(&self) -> Result<DisplaySettingsPayload, GatewayError>;
    async fn update_display_settings(
        &self,
        payload: &DisplaySettingsPayload,
    ) -> Result<DisplaySettingsPayload, GatewayError>;
    /// The server-owned status label set (which labels exist, which gate).
    async fn fetch_status_options(&self) -> Result<StatusOptions, GatewayError>;
}

/// Storage contract for image files, invoked before `create_photos`.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn upload_file(&self, source: &UploadSource) -> Result<UploadedFile, GatewayError>;
    async fn upload_files(&self, sources: &[UploadSource])
    -> Result<Vec<UploadedFile>, GatewayError>;
}
