//! Wire the settings loader, the GraphQL gateway and an editor session
//! together: load a gallery, touch its description, save.
//!
//! ```sh
//! GALLERY_API_URL=http://localhost:4000/graphql \
//! APP_SETTINGS_ID=app-settings-1 \
//! cargo run --example edit_gallery -- <gallery-id>
//! ```

use app_settings::load_display_settings;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use gallery_client::{GraphqlGateway, HttpFileStorage};
use gallery_core::session::EditorContext;
use gallery_core::token_store::AccessTokenStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edit_gallery=info,gallery_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    color_eyre::install()?;

    let gallery_id = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre!("usage: edit_gallery <gallery-id>"))?;

    let settings = load_display_settings()?;
    let endpoint: Url = std::env::var("GALLERY_API_URL")
        .unwrap_or_else(|_| "http://localhost:4000/graphql".to_string())
        .parse()?;
    let settings_id =
        std::env::var("APP_SETTINGS_ID").unwrap_or_else(|_| "app-settings-1".to_string());
    let base: Url = endpoint.join("/")?;

    let http = reqwest::Client::new();
    let gateway = Arc::new(GraphqlGateway::new(
        http.clone(),
        endpoint,
        settings_id,
        settings.gated_statuses.clone(),
    ));
    let storage = Arc::new(HttpFileStorage::from_base(http, &base)?);
    let context = EditorContext::new(gateway, storage, Arc::new(AccessTokenStore::new()));

    let status_options = context.fetch_status_options().await?;
    let mut session = context.open(&gallery_id, status_options).await?;
    info!(
        "Loaded \"{}\" ({} photos), date: {}",
        session.draft().title(),
        session.draft().photos().len(),
        session.draft().display_date(settings.default_date_format),
    );

    session
        .draft_mut()
        .set_description("Touched by the edit_gallery example");
    let report = session.save().await?;
    info!(
        "Save finished: gallery_saved={}, order_saved={}",
        report.gallery_saved, report.order_saved
    );
    if let Some(failure) = report.failure {
        info!("Save failure detail: {failure}");
    }

    Ok(())
}
