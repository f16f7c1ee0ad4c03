//! Server startup and lifecycle.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use tracing::warn;

use crate::api::jwt::JwtService;
use crate::api::middleware::AdminAuth;
use crate::api::services::admin::routes::admin_routes;
use crate::api::services::{capture_routes, lure_routes};
use crate::config::get_config;
use crate::services::{AdminService, IpInfoProvider, LureService, ViewService};
use crate::storage::StorageFactory;

/// Captured photos arrive as base64 JSON; the source system stores them
/// uncapped, so the request body limit only guards against the absurd.
const PAYLOAD_LIMIT: usize = 32 * 1024 * 1024;

/// Run the HTTP server until it exits or a shutdown signal arrives.
pub async fn run_server() -> Result<()> {
    let config = get_config();

    // Fails fast when the JWT keypair is missing or malformed
    let jwt = Arc::new(JwtService::from_config()?);

    let storage = StorageFactory::create().await?;
    let lure_service = Arc::new(LureService::new(storage.clone()));
    let view_service = Arc::new(ViewService::new(storage.clone()));
    let admin_service = Arc::new(AdminService::new(storage.clone()));
    let ipinfo = Arc::new(IpInfoProvider::new(&config.ipinfo));

    let first_password = (!config.auth.first_admin_password.is_empty())
        .then_some(config.auth.first_admin_password.as_str());
    admin_service
        .seed_first_admin(&config.auth.first_admin_email, first_password)
        .await?;

    let cpu_count = config.server.cpu_count.min(32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            // The admin panel is served from its own origin
            .wrap(Cors::permissive())
            .wrap(Compress::default())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(lure_service.clone()))
            .app_data(web::Data::new(view_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(web::Data::new(ipinfo.clone()))
            .app_data(web::Data::new(Arc::clone(&jwt)))
            .app_data(web::JsonConfig::default().limit(PAYLOAD_LIMIT))
            .app_data(web::PayloadConfig::new(PAYLOAD_LIMIT))
            .service(
                web::scope("/api/admin")
                    .wrap(AdminAuth::new(Arc::clone(&jwt)))
                    .service(admin_routes()),
            )
            .service(capture_routes())
            .service(lure_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .bind(bind_address)?
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = shutdown_signal() => {
            warn!("Shutdown signal received, stopping server");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
