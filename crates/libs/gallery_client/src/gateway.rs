//! `PersistenceGateway` over the product's GraphQL API.
//!
//! Query documents mirror the front-end's operations one to one; the
//! adapter only shuttles payloads between the core types and the wire.

use crate::graphql::GraphqlClient;
use async_trait::async_trait;
use color_eyre::eyre;
use gallery_core::error::GatewayError;
use gallery_core::gateway::PersistenceGateway;
use gallery_types::{
    AccessCheck, CreatePhotoItem, DisplaySettingsPayload, GalleryCreate, GalleryDetails,
    GalleryPage, GalleryPatch, GalleryStatus, Photo, PhotoOrderUpdate, PhotoPatch, StatusOptions,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

const GET_GALLERY: &str = r"
query GetGallery($id: ID!) {
  gallery(id: $id) {
    id
    title
    description
    date
    status
    photos { id imageUrl thumbUrl title caption takenAt fileSize position }
  }
}";

const VERIFY_GALLERY_ACCESS: &str = r"
mutation VerifyGalleryAccess($id: ID!, $secret: String!) {
  verifyGalleryAccess(id: $id, secret: $secret) {
    ok
    token
    message
  }
}";

const CREATE_GALLERY: &str = r"
mutation CreateGallery($data: CreateGalleryInput!) {
  createGallery(data: $data) {
    id
    title
    description
    date
    status
  }
}";

const UPDATE_GALLERY: &str = r"
mutation UpdateGallery($id: ID!, $data: UpdateGalleryInput!) {
  updateGallery(id: $id, data: $data) {
    id
    title
    description
    date
    status
  }
}";

const ARCHIVE_GALLERY: &str = r"
mutation ArchiveGallery($id: ID!) {
  archiveGallery(id: $id) { id }
}";

const RESTORE_ARCHIVE: &str = r"
mutation RestoreArchive($id: ID!) {
  restoreArchive(id: $id) { id }
}";

const DELETE_ARCHIVE: &str = r"
mutation DeleteArchive($id: ID!) {
  deleteArchive(id: $id) { id }
}";

const UPDATE_PHOTO_ORDER: &str = r"
mutation UpdatePhotoOrder($updates: [PhotoOrderInput!]!) {
  updatePhotoOrder(updates: $updates) { count }
}";

const CREATE_PHOTOS: &str = r"
mutation CreatePhotos($galleryId: ID!, $data: [CreatePhotoInput!]!) {
  createPhotos(galleryId: $galleryId, data: $data) {
    id imageUrl thumbUrl title caption takenAt fileSize position
  }
}";

const UPDATE_PHOTO: &str = r"
mutation UpdatePhoto($id: ID!, $data: UpdatePhotoInput!) {
  updatePhoto(id: $id, data: $data) {
    id imageUrl thumbUrl title caption takenAt fileSize position
  }
}";

const MOVE_PHOTO: &str = r"
mutation MovePhoto($id: ID!, $toGalleryId: ID!) {
  movePhoto(id: $id, toGalleryId: $toGalleryId) {
    id imageUrl thumbUrl title caption takenAt fileSize position
  }
}";

const DELETE_PHOTO: &str = r"
mutation DeletePhoto($id: ID!) {
  deletePhoto(id: $id) { id }
}";

const GALLERIES_PAGINATED: &str = r"
query GetPaginatedGalleries($after: String, $first: Int!) {
  galleriesPaginated(after: $after, first: $first) {
    galleries { id title description date status coverUrl }
    pageInfo { endCursor hasNextPage }
  }
}";

const ARCHIVES_PAGINATED: &str = r"
query GetPaginatedArchives($after: String, $first: Int!) {
  archivesPaginated(after: $after, first: $first) {
    galleries { id title description date status coverUrl }
    pageInfo { endCursor hasNextPage }
  }
}";

const GET_APP_SETTING: &str = r"
query GetAppSetting($id: ID!) {
  appSetting(id: $id) {
    id
    applicationName
    lightboxMode
    defaultSortOrder
    defaultDateFormat
  }
}";

const UPDATE_APP_SETTING: &str = r"
mutation UpdateAppSetting($id: ID!, $data: UpdateAppSettingInput!) {
  updateAppSetting(id: $id, data: $data) {
    id
    applicationName
    lightboxMode
    defaultSortOrder
    defaultDateFormat
  }
}";

const STATUS_ENUM_VALUES: &str = r#"
query GalleryStatusValues {
  __type(name: "GalleryStatus") {
    enumValues { name }
  }
}"#;

pub struct GraphqlGateway {
    client: GraphqlClient,
    /// Id of the singleton application-settings record.
    settings_id: String,
    /// Configured gated subset; the label set itself comes from the
    /// schema.
    gated_statuses: Vec<GalleryStatus>,
}

impl GraphqlGateway {
    #[must_use]
    pub fn new(
        http: Client,
        endpoint: Url,
        settings_id: impl Into<String>,
        gated_statuses: Vec<GalleryStatus>,
    ) -> Self {
        Self {
            client: GraphqlClient::new(http, endpoint),
            settings_id: settings_id.into(),
            gated_statuses,
        }
    }
}

fn take_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<T, GatewayError> {
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| GatewayError::Remote(format!("response missing field {field}")))?;
    serde_json::from_value(value)
        .map_err(|error| GatewayError::Internal(eyre::Report::new(error)))
}

fn variables<T: serde::Serialize>(payload: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(payload).map_err(|error| GatewayError::Internal(eyre::Report::new(error)))
}

#[async_trait]
impl PersistenceGateway for GraphqlGateway {
    #[instrument(skip(self, token))]
    async fn fetch_gallery(
        &self,
        gallery_id: &str,
        token: Option<&str>,
    ) -> Result<GalleryDetails, GatewayError> {
        let data = self
            .client
            .execute(GET_GALLERY, json!({ "id": gallery_id }), token)
            .await?;
        take_field(data, "gallery")
    }

    #[instrument(skip(self, secret))]
    async fn verify_gallery_access(
        &self,
        gallery_id: &str,
        secret: &str,
    ) -> Result<AccessCheck, GatewayError> {
        let data = self
            .client
            .execute(
                VERIFY_GALLERY_ACCESS,
                json!({ "id": gallery_id, "secret": secret }),
                None,
            )
            .await?;
        take_field(data, "verifyGalleryAccess")
    }

    #[instrument(skip(self))]
    async fn list_galleries_paginated(
        &self,
        after: Option<&str>,
        page_size: usize,
    ) -> Result<GalleryPage, GatewayError> {
        let data = self
            .client
            .execute(
                GALLERIES_PAGINATED,
                json!({ "after": after, "first": page_size }),
                None,
            )
            .await?;
        take_field(data, "galleriesPaginated")
    }

    #[instrument(skip(self))]
    async fn list_archives_paginated(
        &self,
        after: Option<&str>,
        page_size: usize,
    ) -> Result<GalleryPage, GatewayError> {
        let data = self
            .client
            .execute(
                ARCHIVES_PAGINATED,
                json!({ "after": after, "first": page_size }),
                None,
            )
            .await?;
        take_field(data, "archivesPaginated")
    }

    #[instrument(skip(self, create))]
    async fn create_gallery(&self, create: &GalleryCreate) -> Result<GalleryDetails, GatewayError> {
        let data = self
            .client
            .execute(CREATE_GALLERY, json!({ "data": variables(create)? }), None)
            .await?;
        take_field(data, "createGallery")
    }

    #[instrument(skip(self, patch))]
    async fn save_gallery_patch(
        &self,
        gallery_id: &str,
        patch: &GalleryPatch,
    ) -> Result<GalleryDetails, GatewayError> {
        let data = self
            .client
            .execute(
                UPDATE_GALLERY,
                json!({ "id": gallery_id, "data": variables(patch)? }),
                None,
            )
            .await?;
        take_field(data, "updateGallery")
    }

    #[instrument(skip(self))]
    async fn archive_gallery(&self, gallery_id: &str) -> Result<(), GatewayError> {
        self.client
            .execute(ARCHIVE_GALLERY, json!({ "id": gallery_id }), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn restore_gallery(&self, gallery_id: &str) -> Result<(), GatewayError> {
        self.client
            .execute(RESTORE_ARCHIVE, json!({ "id": gallery_id }), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_gallery(&self, gallery_id: &str) -> Result<(), GatewayError> {
        self.client
            .execute(DELETE_ARCHIVE, json!({ "id": gallery_id }), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, updates), fields(count = updates.len()))]
    async fn save_photo_order(&self, updates: &[PhotoOrderUpdate]) -> Result<(), GatewayError> {
        self.client
            .execute(
                UPDATE_PHOTO_ORDER,
                json!({ "updates": variables(&updates)? }),
                None,
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn create_photos(
        &self,
        gallery_id: &str,
        items: &[CreatePhotoItem],
    ) -> Result<Vec<Photo>, GatewayError> {
        let data = self
            .client
            .execute(
                CREATE_PHOTOS,
                json!({ "galleryId": gallery_id, "data": variables(&items)? }),
                None,
            )
            .await?;
        take_field(data, "createPhotos")
    }

    #[instrument(skip(self, patch))]
    async fn update_photo(
        &self,
        photo_id: &str,
        patch: &PhotoPatch,
    ) -> Result<Photo, GatewayError> {
        let data = self
            .client
            .execute(
                UPDATE_PHOTO,
                json!({ "id": photo_id, "data": variables(patch)? }),
                None,
            )
            .await?;
        take_field(data, "updatePhoto")
    }

    #[instrument(skip(self))]
    async fn move_photo(
        &self,
        photo_id: &str,
        to_gallery_id: &str,
    ) -> Result<Photo, GatewayError> {
        let data = self
            .client
            .execute(
                MOVE_PHOTO,
                json!({ "id": photo_id, "toGalleryId": to_gallery_id }),
                None,
            )
            .await?;
        take_field(data, "movePhoto")
    }

    #[instrument(skip(self))]
    async fn delete_photo(&self, photo_id: &str) -> Result<(), GatewayError> {
        self.client
            .execute(DELETE_PHOTO, json!({ "id": photo_id }), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_display_settings(&self) -> Result<DisplaySettingsPayload, GatewayError> {
        let data = self
            .client
            .execute(GET_APP_SETTING, json!({ "id": self.settings_id }), None)
            .await?;
        take_field(data, "appSetting")
    }

    #[instrument(skip(self, payload))]
    async fn update_display_settings(
        &self,
        payload: &DisplaySettingsPayload,
    ) -> Result<DisplaySettingsPayload, GatewayError> {
        let data = self
            .client
            .execute(
                UPDATE_APP_SETTING,
                json!({ "id": self.settings_id, "data": variables(payload)? }),
                None,
            )
            .await?;
        take_field(data, "updateAppSetting")
    }

    /// Labels come from schema introspection; the gated subset is the
    /// configured one this gateway was constructed with.
    #[instrument(skip(self))]
    async fn fetch_status_options(&self) -> Result<StatusOptions, GatewayError> {
        let data = self
            .client
            .execute(STATUS_ENUM_VALUES, json!({}), None)
            .await?;
        let labels: Vec<GalleryStatus> = data
            .pointer("/__type/enumValues")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|entry| entry.get("name"))
                    .filter_map(Value::as_str)
                    .map(GalleryStatus::new)
                    .collect()
            })
            .unwrap_or_default();
        Ok(StatusOptions::new(labels, self.gated_statuses.clone()))
    }
}
