#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod browse;
pub mod collection;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod ids;
pub mod passphrase;
pub mod session;
pub mod token_store;

pub use browse::{GalleryPager, ListScope};
pub use collection::PhotoCollection;
pub use draft::{GalleryDraft, SaveState, SaveTicket};
pub use error::{EditorError, GatewayError, SaveRequestError, UploadError, ValidationError};
pub use gateway::{FileStorage, PersistenceGateway};
pub use session::{EditorContext, EditorSession, SaveFailure, SaveReport};
pub use token_store::AccessTokenStore;
