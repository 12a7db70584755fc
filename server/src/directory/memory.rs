use common::{Device, Result};
use parking_lot::RwLock;
use super::store::DeviceStore;

/// Session-lifetime store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    devices: RwLock<Vec<Device>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceStore for MemoryStore {
    fn save(&self, device: Device) -> Result<()> {
        self.devices.write().push(device);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Device>> {
        Ok(self.devices.read().clone())
    }

    fn load_by_hash(&self, qr_hash: &str) -> Result<Option<Device>> {
        let devices = self.devices.read();
        Ok(devices.iter().find(|d| d.qr_hash == qr_hash).cloned())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::DeviceStatus;

    fn device(id: &str, qr_hash: &str) -> Device {
        Device {
            id: id.to_string(),
            name: format!("Device {}", id),
            model: "ESP32 DevKit".to_string(),
            mac_address: "24:6F:28:00:00:01".to_string(),
            location: "Lab".to_string(),
            status: DeviceStatus::Offline,
            qr_hash: qr_hash.to_string(),
            last_activity: Utc::now(),
            device_type: "iot".to_string(),
            manufacturer: None,
            description: None,
        }
    }

    #[test]
    fn keeps_insertion_order_and_first_match() {
        let store = MemoryStore::new();
        store.save(device("b", "hash")).unwrap();
        store.save(device("a", "other")).unwrap();
        store.save(device("c", "hash")).unwrap();

        let ids: Vec<_> = store.load_all().unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(store.load_by_hash("hash").unwrap().unwrap().id, "b");
        assert!(store.load_by_hash("missing").unwrap().is_none());
    }
}
