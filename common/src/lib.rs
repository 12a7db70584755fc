pub mod error;
pub mod types;
pub mod config;
pub mod mac;
pub mod qr_hash;
pub mod validation;

pub use error::{InventoryError, Result};
pub use types::*;
pub use config::*;
pub use mac::{format_mac, normalize_mac, validate_mac};
pub use qr_hash::{derive_qr_hash, is_qr_hash, QR_HASH_LEN};
pub use validation::{DeviceForm, FieldError, ValidationErrors};
