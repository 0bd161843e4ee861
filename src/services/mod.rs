pub mod minter;
pub mod qr_codes;
pub mod resolver;

pub use minter::QrMinter;
pub use qr_codes::QrCodeService;
pub use resolver::Resolver;
