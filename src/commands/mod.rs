pub mod capture_commands;
pub mod product_commands;
pub mod scan_commands;
pub mod session_commands;
