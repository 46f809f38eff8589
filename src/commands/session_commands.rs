use tauri::{command, State};

use crate::error::AppError;
use crate::models::identity::{Identity, SessionSnapshot};
use crate::state::AppState;

#[command]
pub fn restore_session(state: State<'_, AppState>) -> SessionSnapshot {
    state.session.restore()
}

#[command]
pub fn current_session(state: State<'_, AppState>) -> SessionSnapshot {
    state.session.snapshot()
}

#[command]
pub fn login(
    email: String,
    password: String,
    state: State<'_, AppState>,
) -> Result<Identity, AppError> {
    state.session.login(&email, &password)
}

#[command]
pub fn sign_up(
    email: String,
    password: String,
    name: String,
    state: State<'_, AppState>,
) -> Result<Identity, AppError> {
    state.session.sign_up(&email, &password, &name)
}

#[command]
pub fn logout(state: State<'_, AppState>) -> Result<(), AppError> {
    state.session.logout()
}
