use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed text extraction. Created by the scan pipeline on OCR
/// success, immutable afterwards; there is no delete operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub id: String,
    pub owner_id: String,
    pub image_url: String,
    pub extracted_text: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

/// Derived on every read from the scan history, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_scans: usize,
    pub successful_scans: usize,
    pub average_confidence: f64,
    pub recent_scans: Vec<ScanResult>,
}
