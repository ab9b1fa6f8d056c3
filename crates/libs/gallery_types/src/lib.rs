#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod date_format;
pub mod gallery;
pub mod instant;
pub mod page;
pub mod photo;
pub mod settings;
pub mod upload;

pub use date_format::DateFormat;
pub use gallery::{GalleryCreate, GalleryDetails, GalleryPatch, GalleryStatus, GallerySummary, StatusOptions};
pub use page::{GalleryPage, PageInfo};
pub use photo::{CreatePhotoItem, Photo, PhotoOrderUpdate, PhotoPatch, PROVISIONAL_ID_PREFIX};
pub use settings::{AccessCheck, DisplaySettingsPayload, LightboxMode};
pub use upload::{UploadSource, UploadedFile};
