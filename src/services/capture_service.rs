use std::path::PathBuf;
use std::sync::Mutex;

use image::ImageFormat;
use log::warn;
use serde::Serialize;

use crate::error::AppError;

pub const CAMERA_CAPTURE_NAME: &str = "camera-capture.jpg";

/// The one image currently queued for scanning: the raw bytes that go
/// to the remote services plus a local preview file for the webview.
#[derive(Debug, Clone)]
pub struct StagedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub preview_path: PathBuf,
}

/// Webview-facing description of the staged image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedImageInfo {
    pub file_name: String,
    pub preview_path: String,
    pub byte_len: usize,
}

impl From<&StagedImage> for StagedImageInfo {
    fn from(staged: &StagedImage) -> Self {
        Self {
            file_name: staged.file_name.clone(),
            preview_path: staged.preview_path.to_string_lossy().to_string(),
            byte_len: staged.bytes.len(),
        }
    }
}

/// Holds at most one staged image. Staging a new image or clearing the
/// tray removes the previous preview file.
pub struct ImageTray {
    preview_dir: PathBuf,
    staged: Mutex<Option<StagedImage>>,
}

impl ImageTray {
    pub fn new(preview_dir: PathBuf) -> Self {
        Self {
            preview_dir,
            staged: Mutex::new(None),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<StagedImage>> {
        self.staged
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Rejects anything that doesn't sniff as an image; the tray is
    /// left unchanged in that case.
    pub fn stage(&self, bytes: Vec<u8>, file_name: &str) -> Result<StagedImageInfo, AppError> {
        let format = image::guess_format(&bytes).map_err(|_| AppError::InvalidImage)?;

        let ext = format.extensions_str().first().copied().unwrap_or("img");
        let preview_path = self
            .preview_dir
            .join(format!("preview-{}.{ext}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&self.preview_dir)?;
        std::fs::write(&preview_path, &bytes)?;

        let staged = StagedImage {
            bytes,
            file_name: file_name.to_string(),
            preview_path,
        };
        let info = StagedImageInfo::from(&staged);

        if let Some(previous) = self.lock().replace(staged) {
            remove_preview(&previous.preview_path);
        }
        Ok(info)
    }

    pub fn current(&self) -> Option<StagedImage> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        if let Some(previous) = self.lock().take() {
            remove_preview(&previous.preview_path);
        }
    }
}

fn remove_preview(path: &std::path::Path) {
    if let Err(err) = std::fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!("failed to remove preview {}: {err}", path.display());
        }
    }
}

/// One raw frame pushed from the webview's live video preview.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Scoped camera resource. The webview owns the actual media stream
/// and mirrors frames here; the session guarantees its own release on
/// every exit path, including teardown.
pub struct CameraSession {
    latest: Option<CameraFrame>,
    released: bool,
}

impl CameraSession {
    pub fn new() -> Self {
        Self {
            latest: None,
            released: false,
        }
    }

    pub fn push_frame(&mut self, frame: CameraFrame) -> Result<(), AppError> {
        if self.released {
            return Err(AppError::Camera("camera session already released".to_string()));
        }
        let expected = frame.width as usize * frame.height as usize * 4;
        if frame.width == 0 || frame.height == 0 || frame.rgba.len() != expected {
            return Err(AppError::Camera(format!(
                "bad frame: {}x{} with {} bytes",
                frame.width,
                frame.height,
                frame.rgba.len()
            )));
        }
        self.latest = Some(frame);
        Ok(())
    }

    /// Snapshot the most recent frame as a JPEG still.
    pub fn snapshot_jpeg(&self) -> Result<Vec<u8>, AppError> {
        let frame = self
            .latest
            .as_ref()
            .ok_or_else(|| AppError::Camera("no frame available yet".to_string()))?;

        let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
            .ok_or_else(|| AppError::Camera("frame buffer mismatch".to_string()))?;
        let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

        let mut jpeg = Vec::new();
        rgb.write_to(&mut std::io::Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .map_err(|e| AppError::Camera(format!("encode failed: {e}")))?;
        Ok(jpeg)
    }

    pub fn release(&mut self) {
        self.latest = None;
        self.released = true;
    }

    /// Releases a still-open session. Returns whether it was open.
    pub fn release_if_open(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.release();
        true
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Default for CameraSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        if self.release_if_open() {
            warn!("camera session dropped while still open; releasing");
        }
    }
}
