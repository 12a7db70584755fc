//! Main entry point for the device inventory server

use actix_web::main as actix_main;
use chrono::{Duration, Local, Utc};
use common::{Config, Result};
use env_logger::fmt::Color;
use env_logger::Builder;
use inventory_server::directory::{DeviceStore, Directory, MemoryStore, RedisStore};
use inventory_server::mock::MockDeviceGenerator;
use inventory_server::InventoryServer;
use log::{error, info, LevelFilter};
use std::io::Write;
use std::sync::Arc;

const BANNER: &str = r#"
╔═══════════════════════════════════════════════════════════════════╗
║                                                                   ║
║   Device Inventory Server v0.1.0                                  ║
║   register devices - print QR codes - resolve scans               ║
║                                                                   ║
╚═══════════════════════════════════════════════════════════════════╝
"#;

fn setup_logger() {
    let mut builder = Builder::from_default_env();

    builder
        .format(|buf, record| {
            let mut timestamp_style = buf.style();
            let mut level_style = buf.style();
            let mut target_style = buf.style();
            let mut message_style = buf.style();

            let level_color = match record.level() {
                log::Level::Error => Color::Red,
                log::Level::Warn => Color::Yellow,
                log::Level::Info => Color::Green,
                log::Level::Debug => Color::Cyan,
                log::Level::Trace => Color::White,
            };

            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            writeln!(
                buf,
                "{} {} [{}] {}",
                timestamp_style.set_color(Color::Rgb(100, 100, 100)).value(timestamp),
                level_style.set_color(level_color).value(record.level()),
                target_style.set_color(Color::Blue).value(record.target()),
                message_style.set_color(Color::White).value(record.args())
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
}

fn build_store(config: &Config) -> Result<Box<dyn DeviceStore>> {
    match &config.redis_url {
        Some(url) => {
            info!("Using Redis store at {}", url);
            let store = RedisStore::open(url)?;
            store.health().map_err(|e| {
                error!("Failed to connect to Redis: {}", e);
                e
            })?;
            info!("✓ Redis connection established");
            Ok(Box::new(store))
        }
        None => {
            info!("REDIS_URL not set, using in-memory store");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

#[actix_main]
async fn main() -> Result<()> {
    setup_logger();
    println!("{}", BANNER);

    info!("Starting device inventory server...");
    let config = Config::load()?;
    info!("Configuration loaded successfully");

    let store = build_store(&config)?;
    let directory = Arc::new(Directory::new(store, Duration::days(config.active_window_days)));
    info!("✓ Device directory initialized ({} store)", directory.store_kind());

    if config.seed_mock_devices && directory.is_empty()? {
        let devices = MockDeviceGenerator::new(config.mock_seed)
            .generate(config.mock_device_count, Utc::now());
        directory.preload(devices)?;
        info!("✓ Seeded {} mock devices (seed {})", config.mock_device_count, config.mock_seed);
    }

    let server = InventoryServer::new(directory, config.public_base_url.clone());
    server.start(&config).await
}
