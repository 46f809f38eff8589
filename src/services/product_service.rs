use std::sync::Mutex;

use chrono::Utc;

use crate::error::AppError;
use crate::models::product::Product;

/// In-memory product catalog. Purely client-side, no persistence, no
/// coupling to the scan lifecycle.
pub struct ProductCatalog {
    items: Mutex<Vec<Product>>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Product>> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn list(&self) -> Vec<Product> {
        self.lock().clone()
    }

    pub fn create(&self, name: &str) -> Product {
        let now = Utc::now();
        let product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().push(product.clone());
        product
    }

    pub fn update(&self, id: &str, name: &str) -> Result<Product, AppError> {
        let mut items = self.lock();
        let product = items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::General(format!("unknown product: {id}")))?;
        product.name = name.to_string();
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|p| p.id != id);
        if items.len() == before {
            return Err(AppError::General(format!("unknown product: {id}")));
        }
        Ok(())
    }
}
