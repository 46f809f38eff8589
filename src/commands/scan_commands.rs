use tauri::{command, State};

use crate::error::AppError;
use crate::models::scan::{DashboardStats, ScanResult};
use crate::services::scan_service::ScanInput;
use crate::services::upload_service::ImageHost;
use crate::state::AppState;

/// Standalone "upload now" action; also what the scan pipeline performs
/// internally as phase one of a file submission.
#[command]
pub async fn upload_image(
    bytes: Vec<u8>,
    file_name: String,
    state: State<'_, AppState>,
) -> Result<String, AppError> {
    state.uploader.host(bytes, &file_name).await
}

/// Submit an already-hosted image. The upload phase is skipped.
#[command]
pub async fn submit_scan(
    image_url: String,
    state: State<'_, AppState>,
) -> Result<ScanResult, AppError> {
    state
        .scans
        .submit(&state.uploader, &state.recognizer, ScanInput::Url(image_url))
        .await
}

/// Submit the currently staged image (file pick, drop, or camera
/// capture). The staged image stays in the tray; the user removes or
/// replaces it from the UI.
#[command]
pub async fn submit_staged_scan(state: State<'_, AppState>) -> Result<ScanResult, AppError> {
    let staged = state
        .tray
        .current()
        .ok_or_else(|| AppError::General("No image staged for scanning".to_string()))?;

    state
        .scans
        .submit(
            &state.uploader,
            &state.recognizer,
            ScanInput::File {
                bytes: staged.bytes,
                file_name: staged.file_name,
            },
        )
        .await
}

#[command]
pub fn get_scan(id: String, state: State<'_, AppState>) -> Option<ScanResult> {
    state.scans.get(&id)
}

#[command]
pub fn get_scan_history(state: State<'_, AppState>) -> Vec<ScanResult> {
    state.scans.history()
}

#[command]
pub fn get_dashboard_stats(state: State<'_, AppState>) -> DashboardStats {
    state.scans.stats()
}

#[command]
pub fn is_processing(state: State<'_, AppState>) -> bool {
    state.scans.is_processing()
}
