use common::{Device, InventoryError, Result};
use redis::Client as RedisClient;
use log::{debug, error};
use super::store::DeviceStore;

const DEVICE_ORDER_KEY: &str = "devices";

fn device_key(qr_hash: &str) -> String {
    format!("device:{}", qr_hash)
}

/// Record and order entry go in one MULTI/EXEC so a save is all-or-nothing.
fn save_pipeline(qr_hash: &str, data: &str) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(device_key(qr_hash))
        .arg(data)
        .ignore()
        .cmd("RPUSH")
        .arg(DEVICE_ORDER_KEY)
        .arg(qr_hash)
        .ignore();
    pipe
}

/// Stores each device as JSON under `device:{qrHash}` and keeps insertion
/// order in the `devices` list.
pub struct RedisStore {
    redis_client: RedisClient,
}

impl RedisStore {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    pub fn open(url: &str) -> Result<Self> {
        let redis_client = RedisClient::open(url)
            .map_err(|e| InventoryError::Storage(e.to_string()))?;
        Ok(Self::new(redis_client))
    }

    fn connection(&self) -> Result<redis::Connection> {
        self.redis_client.get_connection().map_err(|e| {
            error!("Failed to connect to Redis: {}", e);
            InventoryError::Storage(e.to_string())
        })
    }
}

impl DeviceStore for RedisStore {
    fn save(&self, device: Device) -> Result<()> {
        let mut conn = self.connection()?;
        let data = serde_json::to_string(&device)?;

        save_pipeline(&device.qr_hash, &data).query::<()>(&mut conn)?;

        debug!("Stored device {} in Redis", device.id);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Device>> {
        let mut conn = self.connection()?;

        let hashes: Vec<String> = redis::cmd("LRANGE")
            .arg(DEVICE_ORDER_KEY)
            .arg(0)
            .arg(-1)
            .query(&mut conn)?;

        let mut devices = Vec::with_capacity(hashes.len());
        for qr_hash in hashes {
            let data: Option<String> = redis::cmd("GET")
                .arg(device_key(&qr_hash))
                .query(&mut conn)?;

            match data {
                Some(data) => devices.push(serde_json::from_str(&data)?),
                None => debug!("Device list references missing key for {}", qr_hash),
            }
        }

        Ok(devices)
    }

    fn load_by_hash(&self, qr_hash: &str) -> Result<Option<Device>> {
        let mut conn = self.connection()?;

        let data: Option<String> = redis::cmd("GET")
            .arg(device_key(qr_hash))
            .query(&mut conn)?;

        match data {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    fn kind(&self) -> &'static str {
        "redis"
    }

    fn health(&self) -> Result<()> {
        let mut conn = self.connection()?;
        let response: String = redis::cmd("PING").query(&mut conn)?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(InventoryError::Storage(format!("Unexpected Redis response: {}", response)))
        }
    }
}
