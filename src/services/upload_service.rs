use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::AppError;

/// Remote image-hosting seam. Hosting a binary yields a durable URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn host(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, AppError>;
}

/// Cloudinary-backed host. One configured cloud/preset pair, one
/// attempt per upload, no retry.
pub struct UploadClient {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    cloud_name: String,
}

impl UploadClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: config.upload_url(),
            upload_preset: config.upload_preset.clone(),
            cloud_name: config.cloud_name.clone(),
        }
    }
}

/// Cloudinary reports both `url` and `secure_url`; prefer the latter.
pub fn hosted_url(body: &serde_json::Value) -> Option<String> {
    body.get("secure_url")
        .or_else(|| body.get("url"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl ImageHost for UploadClient {
    async fn host(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, AppError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| AppError::Upload(format!("Multipart error: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("cloud_name", self.cloud_name.clone());

        let resp = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("Network error: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::Upload(format!(
                "Upload failed: {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("Parse error: {e}")))?;

        hosted_url(&body).ok_or_else(|| {
            AppError::Upload("Upload response contained no URL".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_secure_url_over_url() {
        let body = json!({
            "url": "http://host/image.jpg",
            "secure_url": "https://host/image.jpg",
        });
        assert_eq!(hosted_url(&body).unwrap(), "https://host/image.jpg");
    }

    #[test]
    fn falls_back_to_plain_url() {
        let body = json!({ "url": "http://host/image.jpg" });
        assert_eq!(hosted_url(&body).unwrap(), "http://host/image.jpg");
    }

    #[test]
    fn missing_url_is_none() {
        assert!(hosted_url(&json!({ "public_id": "abc" })).is_none());
        assert!(hosted_url(&json!({ "url": 42 })).is_none());
    }
}
