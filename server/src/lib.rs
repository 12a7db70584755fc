pub mod access;
pub mod directory;
pub mod mock;
pub mod qr;
pub mod server;

pub use directory::{Directory, DeviceStore, MemoryStore, RedisStore};
pub use server::InventoryServer;
