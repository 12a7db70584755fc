use common::{Device, Result};

/// Persistence behind the directory. Implementations must keep insertion
/// order for `load_all` and return the first stored match from
/// `load_by_hash`.
pub trait DeviceStore: Send + Sync {
    fn save(&self, device: Device) -> Result<()>;

    fn load_all(&self) -> Result<Vec<Device>>;

    fn load_by_hash(&self, qr_hash: &str) -> Result<Option<Device>>;

    fn kind(&self) -> &'static str;

    fn health(&self) -> Result<()> {
        Ok(())
    }
}
