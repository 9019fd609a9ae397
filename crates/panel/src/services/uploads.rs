//! Image upload service client.
//!
//! Profile images are not stored locally; they are pushed to the hosted media
//! service and only the resulting URL is persisted.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use verve_core::UserId;

use crate::config::UploadsConfig;

/// Folder on the media service that holds profile images.
const PROFILE_FOLDER: &str = "profile";

/// Errors that can occur when interacting with the upload service.
#[derive(Debug, Error)]
pub enum UploadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upload service returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or build the request.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// An image file received from a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Upload service API client.
#[derive(Clone)]
pub struct UploadClient {
    client: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    /// Create a new upload service client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &UploadsConfig) -> Result<Self, UploadError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| UploadError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Upload a user's profile image, replacing any previous one.
    ///
    /// The image is stored under the profile folder with a per-user public
    /// id, so re-uploading overwrites rather than accumulates.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the service rejects the upload,
    /// or the response cannot be parsed.
    pub async fn upload_profile_image(
        &self,
        user_id: UserId,
        image: &ImageUpload,
    ) -> Result<String, UploadError> {
        let url = format!("{}/uploads", self.base_url);

        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| UploadError::Parse(format!("Invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .text("folder", PROFILE_FOLDER)
            .text("public_id", format!("{PROFILE_FOLDER}-{user_id}"))
            .part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::Parse(e.to_string()))?;

        Ok(uploaded.secure_url)
    }
}

/// Successful upload response from the media service.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}
