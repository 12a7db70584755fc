//! HTTP surface of the inventory: device registration, dashboard queries
//! and QR hash resolution.

use crate::access::AccessLogBook;
use crate::directory::Directory;
use crate::qr::{QrRenderer, SvgQrRenderer};
use actix_web::{web, App, HttpServer};
use common::{Config, InventoryError, Result};
use log::info;
use std::sync::Arc;

pub mod handlers;

/// Shared state handed to every worker.
#[derive(Clone)]
pub struct InventoryServer {
    pub directory: Arc<Directory>,
    pub access_log: Arc<AccessLogBook>,
    pub renderer: Arc<dyn QrRenderer>,
    /// Origin used in the lookup URL printed in QR codes
    pub public_base_url: String,
}

impl InventoryServer {
    pub fn new(directory: Arc<Directory>, public_base_url: impl Into<String>) -> Self {
        Self {
            directory,
            access_log: Arc::new(AccessLogBook::new()),
            renderer: Arc::new(SvgQrRenderer::default()),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn QrRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Registers shared state and routes. `/api/devices/stats` is listed
    /// before the `{qr_hash}` routes so it is never taken for a hash.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.clone()))
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error))
            .service(
                web::scope("/api")
                    .service(web::resource("/status").route(web::get().to(handlers::get_status)))
                    .service(
                        web::resource("/devices")
                            .route(web::get().to(handlers::list_devices))
                            .route(web::post().to(handlers::create_device)),
                    )
                    .service(web::resource("/devices/stats").route(web::get().to(handlers::get_stats)))
                    .service(web::resource("/devices/{qr_hash}").route(web::get().to(handlers::resolve_device)))
                    .service(web::resource("/devices/{qr_hash}/url").route(web::get().to(handlers::get_device_url)))
                    .service(web::resource("/devices/{qr_hash}/qr").route(web::get().to(handlers::get_device_qr)))
                    .service(
                        web::resource("/devices/{qr_hash}/access-logs")
                            .route(web::get().to(handlers::get_access_logs)),
                    ),
            );
    }

    pub async fn start(&self, config: &Config) -> Result<()> {
        info!("Starting HTTP server on {}", config.bind_address);
        info!("Lookup URLs use base {}", self.public_base_url);

        let server = self.clone();
        HttpServer::new(move || {
            App::new()
                .configure(|cfg| server.configure(cfg))
                .wrap(
                    actix_cors::Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
        })
        .bind(&config.bind_address)
        .map_err(|e| InventoryError::Configuration(format!("bind {}: {}", config.bind_address, e)))?
        .run()
        .await
        .map_err(|e| InventoryError::Server(e.to_string()))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
