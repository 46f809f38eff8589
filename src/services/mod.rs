pub mod auth_service;
pub mod capture_service;
pub mod ocr_service;
pub mod product_service;
pub mod scan_service;
pub mod session_service;
pub mod upload_service;
