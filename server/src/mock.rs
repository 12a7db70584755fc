//! Seeded demo inventory. Builds complete records directly and never goes
//! through `Directory::add`.

use chrono::{DateTime, Duration, Utc};
use common::{derive_qr_hash, Device, DeviceStatus};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const DEVICE_TYPES: &[&str] = &["router", "switch", "access-point", "server", "printer", "camera", "iot"];

const LOCATIONS: &[&str] = &[
    "Server Room",
    "Main Office",
    "Reception",
    "Laboratory",
    "Storeroom",
    "Meeting Room 1",
    "Meeting Room 2",
    "Main Hallway",
    "Workstation 1",
    "Workstation 2",
];

const HEX: &[u8] = b"0123456789ABCDEF";

/// Number of distinct leading-three-octet prefixes.
pub const MAX_DISTINCT_HASHES: usize = 1 << 24;

fn models_for(device_type: &str) -> &'static [&'static str] {
    match device_type {
        "router" => &["TP-Link Archer C7", "ASUS RT-AX88U", "Netgear Nighthawk AX12", "Linksys EA7500"],
        "switch" => &["Cisco Catalyst 2960", "HP ProCurve 2510", "D-Link DGS-1016A", "Netgear GS308"],
        "access-point" => &["Ubiquiti UniFi AP", "Cisco Aironet 2702i", "Aruba AP-305", "Ruckus R320"],
        "server" => &["Dell PowerEdge R740", "HP ProLiant DL380", "IBM System x3650", "Supermicro SuperServer"],
        "printer" => &["HP LaserJet Pro 404n", "Canon ImageRunner 2645i", "Brother HL-L2350DW", "Epson WorkForce Pro"],
        "camera" => &["Hikvision DS-2CD2385G1", "Dahua IPC-HFW4431R-Z", "Axis M3046-V", "Vivotek IP8160"],
        "iot" => &["Raspberry Pi 4", "Arduino Uno WiFi", "ESP32 DevKit", "Intel NUC Kit"],
        _ => &["Generic Model"],
    }
}

fn manufacturers_for(device_type: &str) -> &'static [&'static str] {
    match device_type {
        "router" => &["TP-Link", "ASUS", "Netgear", "Linksys"],
        "switch" => &["Cisco", "HP", "D-Link", "Netgear"],
        "access-point" => &["Ubiquiti", "Cisco", "Aruba", "Ruckus"],
        "server" => &["Dell", "HP", "IBM", "Supermicro"],
        "printer" => &["HP", "Canon", "Brother", "Epson"],
        "camera" => &["Hikvision", "Dahua", "Axis", "Vivotek"],
        "iot" => &["Raspberry Pi Foundation", "Arduino", "Espressif", "Intel"],
        _ => &["Generic Manufacturer"],
    }
}

/// "access-point" -> "Access point"
fn display_type(device_type: &str) -> String {
    let mut chars = device_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replacen('-', " ", 1),
        None => String::new(),
    }
}

pub struct MockDeviceGenerator {
    rng: StdRng,
}

impl MockDeviceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, items: &'static [&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn mac_address(&mut self) -> String {
        (0..6)
            .map(|_| {
                let hi = HEX[self.rng.gen_range(0..16)] as char;
                let lo = HEX[self.rng.gen_range(0..16)] as char;
                format!("{}{}", hi, lo)
            })
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Draws MACs until the derived hash is unused in this batch. The hash
    /// only covers the first three octets, so at most `MAX_DISTINCT_HASHES`
    /// devices can be told apart.
    fn unique_mac_address(&mut self, used: &mut HashSet<String>) -> String {
        loop {
            let mac_address = self.mac_address();
            if used.insert(derive_qr_hash(&mac_address)) {
                return mac_address;
            }
        }
    }

    /// Up to `count` devices with ids "1".."count", distinct QR hashes and
    /// activity up to 30 days before `now`.
    pub fn generate(&mut self, count: usize, now: DateTime<Utc>) -> Vec<Device> {
        let mut used = HashSet::new();
        (1..=count.min(MAX_DISTINCT_HASHES))
            .map(|i| {
                let device_type = self.pick(DEVICE_TYPES);
                let location = self.pick(LOCATIONS);
                let mac_address = self.unique_mac_address(&mut used);
                let online = self.rng.gen_bool(0.7);
                let days_ago = self.rng.gen_range(0..30);

                Device {
                    id: i.to_string(),
                    name: format!("{} {}", display_type(device_type), i),
                    model: self.pick(models_for(device_type)).to_string(),
                    qr_hash: derive_qr_hash(&mac_address),
                    mac_address,
                    location: location.to_string(),
                    status: if online { DeviceStatus::Online } else { DeviceStatus::Offline },
                    last_activity: now - Duration::days(days_ago),
                    device_type: device_type.to_string(),
                    description: Some(format!("{} device located at {}", device_type, location)),
                    manufacturer: Some(self.pick(manufacturers_for(device_type)).to_string()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::validate_mac;

    #[test]
    fn same_seed_same_devices() {
        let now = Utc::now();
        let a = MockDeviceGenerator::new(7).generate(12, now);
        let b = MockDeviceGenerator::new(7).generate(12, now);
        assert_eq!(a, b);
        assert_ne!(a, MockDeviceGenerator::new(8).generate(12, now));
    }

    #[test]
    fn generated_devices_are_well_formed() {
        let now = Utc::now();
        let devices = MockDeviceGenerator::new(42).generate(12, now);
        assert_eq!(devices.len(), 12);

        for (i, device) in devices.iter().enumerate() {
            assert_eq!(device.id, (i + 1).to_string());
            assert!(validate_mac(&device.mac_address).is_ok());
            assert_eq!(device.mac_address, device.mac_address.to_uppercase());
            assert_eq!(device.qr_hash, derive_qr_hash(&device.mac_address));
            assert!(device.name.ends_with(&device.id));
            assert!(now.signed_duration_since(device.last_activity) < Duration::days(30));
            assert!(models_for(&device.device_type).contains(&device.model.as_str()));
        }
    }

    #[test]
    fn large_batches_have_distinct_hashes() {
        let devices = MockDeviceGenerator::new(42).generate(20_000, Utc::now());
        let hashes: HashSet<&str> = devices.iter().map(|d| d.qr_hash.as_str()).collect();
        assert_eq!(devices.len(), 20_000);
        assert_eq!(hashes.len(), 20_000);
    }

    #[test]
    fn display_type_capitalizes_and_spaces() {
        assert_eq!(display_type("access-point"), "Access point");
        assert_eq!(display_type("iot"), "Iot");
    }
}
