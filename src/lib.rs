mod commands;
mod config;
mod error;
mod models;
mod services;
mod state;

use commands::{capture_commands, product_commands, scan_commands, session_commands};
use config::AppConfig;
use state::AppState;

use tauri::Manager;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn init_state(app: &tauri::App) -> Result<AppState, Box<dyn std::error::Error>> {
    let data_dir = app.path().app_data_dir()?;
    let cache_dir = app.path().app_cache_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    std::fs::create_dir_all(&cache_dir)?;

    let config = AppConfig::from_env();
    if config.ocr_base_url.is_none() {
        log::warn!("OCR API URL not configured; scans will fail until it is set");
    }

    Ok(AppState::new(&config, data_dir, cache_dir))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let state = init_state(app)?;
            state.session.restore();
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            session_commands::restore_session,
            session_commands::current_session,
            session_commands::login,
            session_commands::sign_up,
            session_commands::logout,
            capture_commands::stage_image,
            capture_commands::clear_staged_image,
            capture_commands::start_camera,
            capture_commands::push_camera_frame,
            capture_commands::capture_photo,
            capture_commands::stop_camera,
            capture_commands::camera_error,
            scan_commands::upload_image,
            scan_commands::submit_scan,
            scan_commands::submit_staged_scan,
            scan_commands::get_scan,
            scan_commands::get_scan_history,
            scan_commands::get_dashboard_stats,
            scan_commands::is_processing,
            product_commands::list_products,
            product_commands::create_product,
            product_commands::update_product,
            product_commands::delete_product,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
