//! `FileStorage` over the upload endpoints. Files go up as multipart
//! form-data; the response carries the CDN location and byte size for
//! each stored file.

use crate::graphql::request_error;
use async_trait::async_trait;
use gallery_core::error::GatewayError;
use gallery_core::gateway::FileStorage;
use gallery_types::{UploadSource, UploadedFile};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

#[derive(Debug, Deserialize)]
struct StoredFile {
    secure_url: String,
    bytes: u64,
}

#[derive(Debug, Deserialize)]
struct SingleUploadResponse {
    result: StoredFile,
}

#[derive(Debug, Deserialize)]
struct MultiUploadResponse {
    results: Vec<StoredFile>,
}

pub struct HttpFileStorage {
    http: Client,
    upload_endpoint: Url,
    multi_upload_endpoint: Url,
}

impl HttpFileStorage {
    #[must_use]
    pub fn new(http: Client, upload_endpoint: Url, multi_upload_endpoint: Url) -> Self {
        Self {
            http,
            upload_endpoint,
            multi_upload_endpoint,
        }
    }

    /// Conventional endpoints (`api/upload`, `api/upload/multi`) under an
    /// application base URL.
    pub fn from_base(http: Client, base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self::new(
            http,
            base.join("api/upload")?,
            base.join("api/upload/multi")?,
        ))
    }

    fn part(source: &UploadSource) -> Result<Part, GatewayError> {
        Part::bytes(source.bytes.clone())
            .file_name(source.file_name.clone())
            .mime_str(&source.content_type)
            .map_err(request_error)
    }
}

#[async_trait]
impl FileStorage for HttpFileStorage {
    #[instrument(skip(self, source), fields(file = %source.file_name))]
    async fn upload_file(&self, source: &UploadSource) -> Result<UploadedFile, GatewayError> {
        let form = Form::new().part("file", Self::part(source)?);
        let response = self
            .http
            .post(self.upload_endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;
        if !response.status().is_success() {
            return Err(GatewayError::Remote(format!(
                "upload failed with status {}",
                response.status()
            )));
        }

        let body: SingleUploadResponse = response.json().await.map_err(request_error)?;
        Ok(UploadedFile {
            url: body.result.secure_url,
            bytes: body.result.bytes,
        })
    }

    #[instrument(skip(self, sources), fields(count = sources.len()))]
    async fn upload_files(
        &self,
        sources: &[UploadSource],
    ) -> Result<Vec<UploadedFile>, GatewayError> {
        let mut form = Form::new();
        for source in sources {
            form = form.part("files", Self::part(source)?);
        }
        let response = self
            .http
            .post(self.multi_upload_endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;
        if !response.status().is_success() {
            return Err(GatewayError::Remote(format!(
                "multi-upload failed with status {}",
                response.status()
            )));
        }

        // Results arrive in the same order the files were appended.
        let body: MultiUploadResponse = response.json().await.map_err(request_error)?;
        Ok(body
            .results
            .into_iter()
            .map(|stored| UploadedFile {
                url: stored.secure_url,
                bytes: stored.bytes,
            })
            .collect())
    }
}
