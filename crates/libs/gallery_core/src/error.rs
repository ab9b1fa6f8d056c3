use color_eyre::eyre;
use thiserror::Error;

/// Local, synchronous validation failures. These never reach the network
/// and never change a draft's dirty state. `validate()` reports the first
/// failing rule in a fixed order, so each variant doubles as the
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title cannot be empty.")]
    EmptyTitle,

    #[error("Please select a valid date.")]
    InvalidDate,

    #[error("Passphrase must be at least {MIN_PASSPHRASE_LEN} characters.")]
    PassphraseTooShort,
}

/// Minimum length of a gallery passphrase.
pub const MIN_PASSPHRASE_LEN: usize = 4;

/// Failures reported by the persistence gateway or the storage
/// collaborator. The core never retries; every failure is surfaced once
/// and retrying is a user action.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Gated gallery fetched without a valid token. Callers clear the
    /// stored token and re-prompt; this is not fatal.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The remote call failed (transport or server-reported error).
    #[error("remote error: {0}")]
    Remote(String),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

/// Why a save could not be started. None of these reach the network.
#[derive(Debug, Error)]
pub enum SaveRequestError {
    #[error("a save is already in flight for this gallery")]
    InFlight,

    #[error("nothing to save")]
    Clean,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Upload preflight rejection. Carries every issue found so the user can
/// fix the whole selection at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upload rejected: {}", .issues.join(" "))]
pub struct UploadError {
    pub issues: Vec<String>,
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Save(#[from] SaveRequestError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Photos cannot be attached before the gallery itself exists.
    #[error("the gallery has not been saved yet")]
    UnsavedGallery,
}
