//! HTTP request handlers for the inventory server.

use super::InventoryServer;
use crate::directory::Directory;
use crate::qr::device_url;
use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use common::{
    is_qr_hash, DeviceForm, FieldError, InventoryError, Result, StatusFilter, ValidationErrors,
};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct DeviceQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanQuery {
    pub scanned_by: Option<String>,
}

/// Runs a directory call on the blocking pool; the Redis store does
/// synchronous I/O.
async fn with_directory<F, T>(server: &InventoryServer, f: F) -> Result<T>
where
    F: FnOnce(&Directory) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let directory = Arc::clone(&server.directory);
    web::block(move || f(&directory))
        .await
        .map_err(|e| InventoryError::Server(e.to_string()))?
}

/// Hashes that cannot have been derived are rejected before touching the store.
fn checked_hash(qr_hash: &str) -> Result<String> {
    if is_qr_hash(qr_hash) {
        Ok(qr_hash.to_string())
    } else {
        warn!("Rejected malformed QR hash {:?}", qr_hash);
        Err(InventoryError::NotFound(qr_hash.to_string()))
    }
}

pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(json!({
        "error": format!("invalid request body: {}", err),
    }));
    actix_web::error::InternalError::from_response(err, response).into()
}

pub async fn get_status(server: web::Data<InventoryServer>) -> impl Responder {
    let store = server.directory.store_kind();
    match with_directory(&server, |d| d.health()).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "timestamp": Utc::now().timestamp(),
            "services": {
                "store": store,
                "storeHealth": "healthy",
            }
        })),
        Err(e) => {
            error!("Store health check failed: {}", e);
            HttpResponse::Ok().json(json!({
                "status": "error",
                "timestamp": Utc::now().timestamp(),
                "services": {
                    "store": store,
                    "storeHealth": "unhealthy",
                }
            }))
        }
    }
}

/// Dashboard listing: text search first, then the status filter.
pub async fn list_devices(
    server: web::Data<InventoryServer>,
    query: web::Query<DeviceQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let filter = match query.status.as_deref() {
        Some(raw) => raw.parse::<StatusFilter>().map_err(|message| {
            let mut errors = ValidationErrors::default();
            errors.push(FieldError::new("status", message));
            InventoryError::Validation(errors)
        })?,
        None => StatusFilter::All,
    };
    let text = query.search.unwrap_or_default();

    let devices = with_directory(&server, move |d| d.query(&text, filter)).await?;
    Ok(HttpResponse::Ok().json(devices))
}

pub async fn create_device(
    server: web::Data<InventoryServer>,
    form: web::Json<DeviceForm>,
) -> Result<HttpResponse> {
    let new_device = form.validate().map_err(|errors| {
        info!("Device form rejected: {}", errors);
        InventoryError::Validation(errors)
    })?;

    let device = with_directory(&server, move |d| d.add(new_device)).await?;
    Ok(HttpResponse::Created().json(device))
}

pub async fn get_stats(server: web::Data<InventoryServer>) -> Result<HttpResponse> {
    let stats = with_directory(&server, |d| d.stats(Utc::now())).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Scan landing: resolves a hash and records the access.
pub async fn resolve_device(
    req: HttpRequest,
    server: web::Data<InventoryServer>,
    qr_hash: web::Path<String>,
    scan: web::Query<ScanQuery>,
) -> Result<HttpResponse> {
    let qr_hash = checked_hash(&qr_hash)?;
    let device = with_directory(&server, move |d| d.find_by_hash(&qr_hash)).await?;

    let ip_address = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    server
        .access_log
        .record(&device.id, &ip_address, user_agent, scan.into_inner().scanned_by);
    info!("Device scanned: {} ({}) from {}", device.name, device.id, ip_address);

    Ok(HttpResponse::Ok().json(device))
}

pub async fn get_device_url(
    server: web::Data<InventoryServer>,
    qr_hash: web::Path<String>,
) -> Result<HttpResponse> {
    let qr_hash = checked_hash(&qr_hash)?;
    let device = with_directory(&server, move |d| d.find_by_hash(&qr_hash)).await?;

    Ok(HttpResponse::Ok().json(json!({
        "qrHash": device.qr_hash,
        "url": device_url(&server.public_base_url, &device.qr_hash),
    })))
}

pub async fn get_device_qr(
    server: web::Data<InventoryServer>,
    qr_hash: web::Path<String>,
) -> Result<HttpResponse> {
    let qr_hash = checked_hash(&qr_hash)?;
    let device = with_directory(&server, move |d| d.find_by_hash(&qr_hash)).await?;
    let url = device_url(&server.public_base_url, &device.qr_hash);

    let image = server.renderer.render(&url).map_err(|e| {
        error!("Failed to render QR code for device {}: {}", device.id, e);
        e
    })?;

    Ok(HttpResponse::Ok()
        .content_type(server.renderer.content_type())
        .body(image))
}

pub async fn get_access_logs(
    server: web::Data<InventoryServer>,
    qr_hash: web::Path<String>,
) -> Result<HttpResponse> {
    let qr_hash = checked_hash(&qr_hash)?;
    let device = with_directory(&server, move |d| d.find_by_hash(&qr_hash)).await?;

    Ok(HttpResponse::Ok().json(server.access_log.for_device(&device.id)))
}
