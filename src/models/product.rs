use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry managed purely in memory. Unrelated to the scan
/// lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
