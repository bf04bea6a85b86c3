//! Object storage for generated hero images.

use async_trait::async_trait;

use crate::config::Settings;
use crate::error::AppError;

/// Pluggable object store returning a stable public reference per key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`, overwriting any prior object at that key.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;
}

/// Client for an HTTP bucket API with upsert-by-key semantics.
pub struct BucketClient {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl BucketClient {
    pub fn new(base_url: String, bucket: String, service_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            bucket,
            service_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        if settings.storage_service_key.is_empty() {
            return Err(AppError::MissingCredentials("STORAGE_SERVICE_KEY"));
        }
        Ok(Self::new(
            settings.storage_url.clone(),
            settings.storage_bucket.clone(),
            settings.storage_service_key.clone(),
        ))
    }

    /// Public download URL for an object in this bucket.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for BucketClient {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, key);
        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Persistence(format!("image upload failed: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::Persistence(format!(
                "image upload returned {}",
                res.status()
            )));
        }
        Ok(self.public_url(key))
    }
}
