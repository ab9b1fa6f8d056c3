use crate::{DisplaySettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;

/// Load display settings from a YAML file plus `APP__`-prefixed
/// environment variables (environment wins).
pub fn load_display_settings_from(path: &Path) -> Result<DisplaySettings> {
    let config_path = path.canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}

/// Load from the conventional `config/settings.yaml` location, reading
/// `.env` first so local overrides land in the environment source.
pub fn load_display_settings() -> Result<DisplaySettings> {
    dotenv::from_path(".env").ok();
    load_display_settings_from(Path::new("config/settings.yaml"))
}
