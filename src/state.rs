use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::services::capture_service::{CameraSession, ImageTray};
use crate::services::ocr_service::OcrClient;
use crate::services::product_service::ProductCatalog;
use crate::services::scan_service::ScanPipeline;
use crate::services::session_service::SessionStore;
use crate::services::upload_service::UploadClient;

pub struct AppState {
    pub session: SessionStore,
    pub scans: ScanPipeline,
    pub tray: ImageTray,
    pub camera: Mutex<Option<CameraSession>>,
    pub products: ProductCatalog,
    pub uploader: UploadClient,
    pub recognizer: OcrClient,
}

impl AppState {
    pub fn new(config: &AppConfig, data_dir: PathBuf, cache_dir: PathBuf) -> Self {
        Self {
            session: SessionStore::new(
                Box::new(crate::services::auth_service::MockAuthenticator),
                data_dir,
            ),
            scans: ScanPipeline::new(),
            tray: ImageTray::new(cache_dir.join("previews")),
            camera: Mutex::new(None),
            products: ProductCatalog::new(),
            uploader: UploadClient::new(config),
            recognizer: OcrClient::new(config),
        }
    }

    /// Opens a fresh camera session, releasing any session that was
    /// still live. Returns whether a previous session had to go.
    pub fn open_camera(&self) -> bool {
        let mut slot = self.lock_camera();
        let replaced = match slot.take() {
            Some(mut previous) => {
                previous.release();
                true
            }
            None => false,
        };
        *slot = Some(CameraSession::new());
        replaced
    }

    /// Releases the current camera session, if any. Returns whether one
    /// was actually open.
    pub fn close_camera(&self) -> bool {
        match self.lock_camera().take() {
            Some(mut session) => {
                session.release();
                true
            }
            None => false,
        }
    }

    pub fn lock_camera(&self) -> std::sync::MutexGuard<'_, Option<CameraSession>> {
        self.camera
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(dir: &std::path::Path) -> AppState {
        let config = AppConfig {
            ocr_base_url: Some("http://127.0.0.1:9/ocr".to_string()),
            cloud_name: "testcloud".to_string(),
            upload_preset: "testpreset".to_string(),
        };
        AppState::new(&config, dir.to_path_buf(), dir.join("cache"))
    }

    #[test]
    fn camera_slot_opens_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        assert!(!state.close_camera());
        assert!(!state.open_camera());
        assert!(state.lock_camera().is_some());
        assert!(state.close_camera());
        assert!(state.lock_camera().is_none());
    }

    #[test]
    fn reopening_replaces_a_live_session() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        state.open_camera();
        assert!(state.open_camera());
    }
}
