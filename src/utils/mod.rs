pub mod jwt;
pub mod qr_render;
