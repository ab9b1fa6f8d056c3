use crate::date_format::DateFormat;
use serde::{Deserialize, Serialize};

/// Lightbox overlay presentation. Recognized options only; the viewer
/// falls back to `Black` for anything a newer backend might add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightboxMode {
    #[default]
    Black,
    Blurred,
}

impl LightboxMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "BLACK",
            Self::Blurred => "BLURRED",
        }
    }
}

/// The remote application-settings record. Every field is optional so a
/// partially migrated backend record degrades to local defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettingsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lightbox_mode: Option<LightboxMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_date_format: Option<DateFormat>,
}

/// Result of exchanging a passphrase/PIN for a gallery access token.
/// `ok == false` means no token was issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheck {
    pub ok: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
