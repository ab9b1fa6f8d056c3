use crate::RawSettings;
use gallery_types::settings::{DisplaySettingsPayload, LightboxMode};
use gallery_types::{DateFormat, GalleryStatus, StatusOptions};
use tracing::warn;

/// Application display settings, passed by value into whatever needs them.
/// Loaded once at the application boundary; refreshed from the backend's
/// settings record via [`DisplaySettings::apply_remote`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub application_name: String,
    pub lightbox_mode: LightboxMode,
    pub default_sort_order: String,
    pub default_date_format: DateFormat,
    pub gated_statuses: Vec<GalleryStatus>,
}

impl From<RawSettings> for DisplaySettings {
    fn from(raw: RawSettings) -> Self {
        let lightbox_mode = match raw.display.lightbox_mode.as_deref() {
            None | Some("BLACK") => LightboxMode::Black,
            Some("BLURRED") => LightboxMode::Blurred,
            Some(other) => {
                warn!("Unknown lightbox mode {other:?}, using BLACK");
                LightboxMode::Black
            }
        };

        Self {
            application_name: raw.display.application_name,
            lightbox_mode,
            default_sort_order: raw
                .display
                .default_sort_order
                .unwrap_or_else(|| "ALPHABETICAL".to_string()),
            default_date_format: raw
                .display
                .default_date_format
                .as_deref()
                .map(DateFormat::from_name)
                .unwrap_or_default(),
            gated_statuses: raw
                .access
                .gated_statuses
                .into_iter()
                .map(GalleryStatus::new)
                .collect(),
        }
    }
}

impl DisplaySettings {
    /// Overlay the backend's settings record on top of the local defaults.
    /// Absent fields keep their current values.
    pub fn apply_remote(&mut self, payload: &DisplaySettingsPayload) {
        if let Some(name) = &payload.application_name {
            self.application_name.clone_from(name);
        }
        if let Some(mode) = payload.lightbox_mode {
            self.lightbox_mode = mode;
        }
        if let Some(order) = &payload.default_sort_order {
            self.default_sort_order.clone_from(order);
        }
        if let Some(format) = payload.default_date_format {
            self.default_date_format = format;
        }
    }

    /// Combine the fetched status label set with the configured gated
    /// subset into the options a draft is constructed with.
    #[must_use]
    pub fn status_options(&self, labels: Vec<GalleryStatus>) -> StatusOptions {
        StatusOptions::new(labels, self.gated_statuses.clone())
    }
}
