use log::warn;
use tauri::{command, AppHandle, Emitter, State};

use crate::error::AppError;
use crate::services::capture_service::{CameraFrame, StagedImageInfo, CAMERA_CAPTURE_NAME};
use crate::state::AppState;

/// Tells the webview to stop its media tracks.
const CAMERA_STOP_EVENT: &str = "camera-stop";

#[command]
pub fn stage_image(
    bytes: Vec<u8>,
    file_name: String,
    state: State<'_, AppState>,
) -> Result<StagedImageInfo, AppError> {
    state.tray.stage(bytes, &file_name)
}

#[command]
pub fn clear_staged_image(state: State<'_, AppState>) {
    state.tray.clear();
}

#[command]
pub fn start_camera(state: State<'_, AppState>) {
    if state.open_camera() {
        warn!("camera session was still open; replaced it");
    }
}

#[command]
pub fn push_camera_frame(
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    state: State<'_, AppState>,
) -> Result<(), AppError> {
    let mut slot = state.lock_camera();
    let session = slot
        .as_mut()
        .ok_or_else(|| AppError::Camera("camera is not running".to_string()))?;
    session.push_frame(CameraFrame {
        width,
        height,
        rgba,
    })
}

/// Snapshot the live preview into a staged JPEG and release the camera.
/// The camera goes away whether or not the snapshot succeeds.
#[command]
pub fn capture_photo(
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<StagedImageInfo, AppError> {
    let mut session = state
        .lock_camera()
        .take()
        .ok_or_else(|| AppError::Camera("camera is not running".to_string()))?;

    let snapshot = session.snapshot_jpeg();
    session.release();
    let _ = app.emit(CAMERA_STOP_EVENT, ());

    let jpeg = snapshot?;
    state.tray.stage(jpeg, CAMERA_CAPTURE_NAME)
}

#[command]
pub fn stop_camera(app: AppHandle, state: State<'_, AppState>) {
    if state.close_camera() {
        let _ = app.emit(CAMERA_STOP_EVENT, ());
    }
}

/// The webview reports camera-access failures (e.g. permission denial)
/// here; there is no session to tear down in that case.
#[command]
pub fn camera_error(message: String) {
    warn!("camera access failed: {message}");
}
