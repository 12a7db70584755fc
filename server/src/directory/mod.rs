//! Device directory: the set of known devices and the queries the
//! dashboard and the scan page run against it.

mod store;
mod memory;
mod redis_store;

use chrono::{DateTime, Duration, Utc};
use common::{
    derive_qr_hash, Device, DeviceStats, DeviceStatus, InventoryError, NewDevice, Result,
    StatusFilter,
};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::HashSet;

pub use store::DeviceStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

pub struct Directory {
    store: Box<dyn DeviceStore>,
    /// Serializes `add` so the duplicate check and the save are atomic.
    /// Holds the last id handed out.
    insert_lock: Mutex<i64>,
    active_window: Duration,
}

impl Directory {
    pub fn new(store: Box<dyn DeviceStore>, active_window: Duration) -> Self {
        Self {
            store,
            insert_lock: Mutex::new(0),
            active_window,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Duration::days(7))
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub fn health(&self) -> Result<()> {
        self.store.health()
    }

    /// Registers a device that already passed form validation. Assigns the
    /// id, derives the QR hash from the MAC address and stamps the
    /// activity time.
    pub fn add(&self, new_device: NewDevice) -> Result<Device> {
        let mut last_id = self.insert_lock.lock();
        let now = Utc::now();
        let qr_hash = derive_qr_hash(&new_device.mac_address);

        if let Some(existing) = self.store.load_by_hash(&qr_hash)? {
            warn!(
                "Rejected device {} ({}): QR hash {} already used by device {}",
                new_device.name, new_device.mac_address, qr_hash, existing.id
            );
            return Err(InventoryError::DuplicateHash {
                hash: qr_hash,
                existing_id: existing.id,
            });
        }

        // Timestamp derived, bumped when two inserts land in the same millisecond.
        let id = now.timestamp_millis().max(*last_id + 1);

        let device = Device {
            id: id.to_string(),
            name: new_device.name,
            model: new_device.model,
            mac_address: new_device.mac_address,
            location: new_device.location,
            status: new_device.status,
            qr_hash,
            last_activity: now,
            device_type: new_device.device_type,
            manufacturer: new_device.manufacturer,
            description: new_device.description,
        };

        self.store.save(device.clone())?;
        *last_id = id;

        info!("Registered device {} ({}) with QR hash {}", device.id, device.mac_address, device.qr_hash);
        Ok(device)
    }

    /// Inserts records built elsewhere (mock data, imports) as they are.
    /// Records whose QR hash is already stored, or repeated within the
    /// batch, are skipped. Returns the number actually inserted.
    pub fn preload(&self, devices: Vec<Device>) -> Result<usize> {
        let _guard = self.insert_lock.lock();
        let mut seen: HashSet<String> = self
            .store
            .load_all()?
            .into_iter()
            .map(|d| d.qr_hash)
            .collect();

        let mut inserted = 0;
        for device in devices {
            if !seen.insert(device.qr_hash.clone()) {
                warn!(
                    "Skipped preloaded device {} ({}): QR hash {} already in use",
                    device.id, device.mac_address, device.qr_hash
                );
                continue;
            }
            self.store.save(device)?;
            inserted += 1;
        }
        info!("Preloaded {} devices", inserted);
        Ok(inserted)
    }

    pub fn find_by_hash(&self, qr_hash: &str) -> Result<Device> {
        match self.store.load_by_hash(qr_hash)? {
            Some(device) => {
                debug!("Resolved QR hash {} to device {}", qr_hash, device.id);
                Ok(device)
            }
            None => {
                debug!("No device for QR hash {}", qr_hash);
                Err(InventoryError::NotFound(qr_hash.to_string()))
            }
        }
    }

    pub fn all(&self) -> Result<Vec<Device>> {
        self.store.load_all()
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.load_all()?.is_empty())
    }

    /// Case-insensitive substring match on name, MAC address and location.
    pub fn search(&self, text: &str) -> Result<Vec<Device>> {
        let needle = text.to_lowercase();
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .filter(|d| matches_text(d, &needle))
            .collect())
    }

    pub fn filter_by_status(&self, filter: StatusFilter) -> Result<Vec<Device>> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .filter(|d| filter.matches(d.status))
            .collect())
    }

    /// Text search narrowed by status, in insertion order.
    pub fn query(&self, text: &str, filter: StatusFilter) -> Result<Vec<Device>> {
        Ok(self
            .search(text)?
            .into_iter()
            .filter(|d| filter.matches(d.status))
            .collect())
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Result<DeviceStats> {
        let devices = self.store.load_all()?;
        let mut stats = DeviceStats {
            total: devices.len(),
            ..Default::default()
        };

        for device in &devices {
            match device.status {
                DeviceStatus::Online => stats.online += 1,
                DeviceStatus::Offline => stats.offline += 1,
            }
            if now.signed_duration_since(device.last_activity) <= self.active_window {
                stats.active += 1;
            }
        }

        Ok(stats)
    }
}

fn matches_text(device: &Device, needle: &str) -> bool {
    needle.is_empty()
        || device.name.to_lowercase().contains(needle)
        || device.mac_address.to_lowercase().contains(needle)
        || device.location.to_lowercase().contains(needle)
}
