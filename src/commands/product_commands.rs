use tauri::{command, State};

use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;

#[command]
pub fn list_products(state: State<'_, AppState>) -> Vec<Product> {
    state.products.list()
}

#[command]
pub fn create_product(name: String, state: State<'_, AppState>) -> Product {
    state.products.create(&name)
}

#[command]
pub fn update_product(
    id: String,
    name: String,
    state: State<'_, AppState>,
) -> Result<Product, AppError> {
    state.products.update(&id, &name)
}

#[command]
pub fn delete_product(id: String, state: State<'_, AppState>) -> Result<(), AppError> {
    state.products.delete(&id)
}
