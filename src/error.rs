use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Failed to restore session")]
    SessionRestore,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("A scan is already being processed")]
    ScanInProgress,

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Please select an image file")]
    InvalidImage,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    General(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
