//! Process configuration, read once at startup.
//!
//! The OCR base URL is optional here: its absence only becomes a hard
//! `Configuration` error when a recognition call is first attempted.

const OCR_URL_ENV: &str = "SCANLENS_OCR_API_URL";
const CLOUD_NAME_ENV: &str = "SCANLENS_CLOUD_NAME";
const UPLOAD_PRESET_ENV: &str = "SCANLENS_UPLOAD_PRESET";

const DEFAULT_CLOUD_NAME: &str = "dxc5curxy";
const DEFAULT_UPLOAD_PRESET: &str = "pfa_preset";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ocr_base_url: Option<String>,
    pub cloud_name: String,
    pub upload_preset: String,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            ocr_base_url: env_non_empty(OCR_URL_ENV),
            cloud_name: env_non_empty(CLOUD_NAME_ENV)
                .unwrap_or_else(|| DEFAULT_CLOUD_NAME.to_string()),
            upload_preset: env_non_empty(UPLOAD_PRESET_ENV)
                .unwrap_or_else(|| DEFAULT_UPLOAD_PRESET.to_string()),
        }
    }

    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_targets_configured_cloud() {
        let config = AppConfig {
            ocr_base_url: None,
            cloud_name: "mycloud".to_string(),
            upload_preset: "mypreset".to_string(),
        };
        assert_eq!(
            config.upload_url(),
            "https://api.cloudinary.com/v1_1/mycloud/image/upload"
        );
    }
}
