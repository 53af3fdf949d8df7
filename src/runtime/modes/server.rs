//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::services::{AppStartTime, JSON_PAYLOAD_LIMIT, configure_routes};
use crate::runtime::lifetime;

/// 启动 HTTP 服务器
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime::default();

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    // web::Data 内部是 Arc，各 worker 共享同一实例
    let storage = web::Data::new(startup.storage.clone());
    let tracker = web::Data::new(startup.tracker.clone());
    let analytics_service = web::Data::from(startup.analytics_service.clone());
    let resume_service = web::Data::from(startup.resume_service.clone());
    let image_service = web::Data::from(startup.image_service.clone());
    let jwt = web::Data::from(startup.jwt.clone());
    let app_start_time = web::Data::new(app_start_time);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(storage.clone())
            .app_data(tracker.clone())
            .app_data(analytics_service.clone())
            .app_data(resume_service.clone())
            .app_data(image_service.clone())
            .app_data(jwt.clone())
            .app_data(app_start_time.clone())
            .app_data(web::PayloadConfig::new(JSON_PAYLOAD_LIMIT))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&startup.storage) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
