use chrono::Utc;
use common::AccessLog;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

/// Entries kept per device before the oldest are dropped.
pub const MAX_ENTRIES_PER_DEVICE: usize = 100;

/// Record of successful QR hash resolutions, kept in memory for the
/// session and bounded per device.
pub struct AccessLogBook {
    entries: RwLock<HashMap<String, VecDeque<AccessLog>>>,
    limit: usize,
}

impl Default for AccessLogBook {
    fn default() -> Self {
        Self::with_limit(MAX_ENTRIES_PER_DEVICE)
    }
}

impl AccessLogBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            limit: limit.max(1),
        }
    }

    pub fn record(
        &self,
        device_id: &str,
        ip_address: &str,
        user_agent: &str,
        scanned_by: Option<String>,
    ) -> AccessLog {
        let entry = AccessLog {
            id: Uuid::new_v4().to_string(),
            device_id: device_id.to_string(),
            timestamp: Utc::now(),
            ip_address: ip_address.to_string(),
            user_agent: user_agent.to_string(),
            scanned_by,
        };

        let mut entries = self.entries.write();
        let log = entries.entry(entry.device_id.clone()).or_default();
        if log.len() == self.limit {
            log.pop_front();
        }
        log.push_back(entry.clone());
        entry
    }

    /// Newest first.
    pub fn for_device(&self, device_id: &str) -> Vec<AccessLog> {
        self.entries
            .read()
            .get(device_id)
            .map(|log| log.iter().rev().cloned().collect())
            .unwrap_or_default()
    }
}
