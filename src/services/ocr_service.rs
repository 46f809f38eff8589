use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::AppError;

pub const DEFAULT_CONFIDENCE: f64 = 0.75;

/// Text extraction produced by the recognition endpoint, with defaults
/// already applied.
#[derive(Debug, Clone)]
pub struct Recognition {
    pub id: String,
    pub text: String,
    pub confidence: f64,
}

/// Remote recognition seam. Both routes hit the same endpoint: the file
/// route posts the binary, the URL route posts a hosted image URL.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Cheap pre-flight so callers can fail before any network work.
    fn ensure_configured(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn recognize_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<Recognition, AppError>;
    async fn recognize_url(&self, image_url: &str) -> Result<Recognition, AppError>;
}

/// Wire shape of the recognition response. Every field is optional;
/// `Recognition::from` fills the gaps.
#[derive(Debug, Deserialize)]
struct RawRecognition {
    id: Option<String>,
    text: Option<String>,
    confidence: Option<f64>,
}

impl From<RawRecognition> for Recognition {
    fn from(raw: RawRecognition) -> Self {
        Self {
            id: raw.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            text: raw.text.unwrap_or_default(),
            confidence: raw.confidence.unwrap_or(DEFAULT_CONFIDENCE),
        }
    }
}

pub struct OcrClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl OcrClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.ocr_base_url.clone(),
        }
    }

    /// Checked before any network call.
    fn base_url(&self) -> Result<&str, AppError> {
        self.base_url
            .as_deref()
            .ok_or_else(|| AppError::Configuration("OCR API URL not configured".to_string()))
    }

    async fn settle(resp: reqwest::Response) -> Result<Recognition, AppError> {
        if !resp.status().is_success() {
            return Err(AppError::Recognition(format!(
                "Failed to process image: {}",
                resp.status()
            )));
        }
        let raw: RawRecognition = resp
            .json()
            .await
            .map_err(|e| AppError::Recognition(format!("Parse error: {e}")))?;
        Ok(raw.into())
    }
}

#[async_trait]
impl TextRecognizer for OcrClient {
    fn ensure_configured(&self) -> Result<(), AppError> {
        self.base_url().map(|_| ())
    }

    async fn recognize_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<Recognition, AppError> {
        let base = self.base_url()?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| AppError::Recognition(format!("Multipart error: {e}")))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let resp = self
            .client
            .post(base)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Recognition(format!("Network error: {e}")))?;

        Self::settle(resp).await
    }

    async fn recognize_url(&self, image_url: &str) -> Result<Recognition, AppError> {
        let base = self.base_url()?;

        let resp = self
            .client
            .post(format!("{base}/url"))
            .json(&serde_json::json!({ "imageUrl": image_url }))
            .send()
            .await
            .map_err(|e| AppError::Recognition(format!("Network error: {e}")))?;

        Self::settle(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> Recognition {
        let raw: RawRecognition = serde_json::from_value(body).unwrap();
        raw.into()
    }

    #[test]
    fn full_response_passes_through() {
        let rec = parse(json!({ "id": "r-1", "text": "hello", "confidence": 0.92 }));
        assert_eq!(rec.id, "r-1");
        assert_eq!(rec.text, "hello");
        assert_eq!(rec.confidence, 0.92);
    }

    #[test]
    fn missing_text_defaults_to_empty() {
        let rec = parse(json!({ "id": "r-2", "confidence": 0.5 }));
        assert_eq!(rec.text, "");
    }

    #[test]
    fn missing_confidence_defaults() {
        let rec = parse(json!({ "text": "hi" }));
        assert_eq!(rec.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn missing_id_gets_generated() {
        let a = parse(json!({}));
        let b = parse(json!({}));
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn configured_endpoint_passes_preflight() {
        let client = OcrClient {
            client: reqwest::Client::new(),
            base_url: Some("http://127.0.0.1:9/ocr".to_string()),
        };
        assert!(client.ensure_configured().is_ok());
    }

    #[tokio::test]
    async fn unconfigured_endpoint_fails_before_any_network_call() {
        let client = OcrClient {
            client: reqwest::Client::new(),
            base_url: None,
        };
        assert!(matches!(
            client.ensure_configured().unwrap_err(),
            AppError::Configuration(_)
        ));

        let err = client
            .recognize_url("https://host/image.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let err = client
            .recognize_bytes(vec![1, 2, 3], "a.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
