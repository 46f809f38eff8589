use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use log::info;

use crate::error::AppError;
use crate::models::scan::{DashboardStats, ScanResult};
use crate::services::ocr_service::TextRecognizer;
use crate::services::upload_service::ImageHost;

/// No multi-tenant scoping; every result belongs to this placeholder.
const PLACEHOLDER_OWNER: &str = "1";

const RECENT_SCANS: usize = 5;
const SUCCESS_THRESHOLD: f64 = 0.7;

/// What a submission starts from: a staged binary, or an already
/// hosted image URL (in which case the upload phase is skipped).
#[derive(Debug, Clone)]
pub enum ScanInput {
    File { bytes: Vec<u8>, file_name: String },
    Url(String),
}

/// Orchestrates upload + recognition into one submission and owns the
/// in-memory scan history (newest first). One submission at a time; a
/// second one while the first is pending is rejected.
pub struct ScanPipeline {
    history: Mutex<Vec<ScanResult>>,
    processing: AtomicBool,
}

struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for ScanPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanPipeline {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            processing: AtomicBool::new(false),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, Vec<ScanResult>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn submit(
        &self,
        host: &dyn ImageHost,
        recognizer: &dyn TextRecognizer,
        input: ScanInput,
    ) -> Result<ScanResult, AppError> {
        if self.processing.swap(true, Ordering::AcqRel) {
            return Err(AppError::ScanInProgress);
        }
        let _guard = ProcessingGuard(&self.processing);

        // An unconfigured recognizer must fail the submission before
        // the upload phase touches the network.
        recognizer.ensure_configured()?;

        let (image_url, recognition) = match input {
            ScanInput::Url(url) => {
                let recognition = recognizer.recognize_url(&url).await?;
                (url, recognition)
            }
            ScanInput::File { bytes, file_name } => {
                // The hosted URL is for display/history; the OCR route
                // gets the binary itself.
                let hosted = host.host(bytes.clone(), &file_name).await?;
                let recognition = recognizer.recognize_bytes(bytes, &file_name).await?;
                (hosted, recognition)
            }
        };

        let result = ScanResult {
            id: recognition.id,
            owner_id: PLACEHOLDER_OWNER.to_string(),
            image_url,
            extracted_text: recognition.text,
            confidence: recognition.confidence,
            created_at: Utc::now(),
        };

        info!(
            "scan {} completed with confidence {:.2}",
            result.id, result.confidence
        );
        self.lock_history().insert(0, result.clone());
        Ok(result)
    }

    /// Snapshot of the history, newest first.
    pub fn history(&self) -> Vec<ScanResult> {
        self.lock_history().clone()
    }

    pub fn get(&self, id: &str) -> Option<ScanResult> {
        self.lock_history().iter().find(|s| s.id == id).cloned()
    }

    /// Recomputed from the live history on every call.
    pub fn stats(&self) -> DashboardStats {
        let history = self.lock_history();
        let total_scans = history.len();
        let successful_scans = history
            .iter()
            .filter(|s| s.confidence > SUCCESS_THRESHOLD)
            .count();
        let average_confidence =
            history.iter().map(|s| s.confidence).sum::<f64>() / total_scans.max(1) as f64;

        let mut recent_scans = history.clone();
        recent_scans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_scans.truncate(RECENT_SCANS);

        DashboardStats {
            total_scans,
            successful_scans,
            average_confidence,
            recent_scans,
        }
    }
}
