use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub display: RawDisplaySettings,
    #[serde(default)]
    pub access: RawAccessSettings,
}

/// Display defaults as written in the YAML file. Enum-valued fields stay
/// strings here; conversion happens in `From<RawSettings>` so a typo in a
/// config file degrades to the documented fallback instead of aborting.
#[derive(Debug, Deserialize, Clone)]
pub struct RawDisplaySettings {
    pub application_name: String,
    #[serde(default)]
    pub lightbox_mode: Option<String>,
    #[serde(default)]
    pub default_sort_order: Option<String>,
    #[serde(default)]
    pub default_date_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawAccessSettings {
    /// Status labels that require passphrase verification before viewing.
    /// The label set is owned by the backend; this list only has to match
    /// the deployed schema.
    #[serde(default)]
    pub gated_statuses: Vec<String>,
}
