pub mod health_handlers;
pub mod qr_handlers;
pub mod scan_handlers;
