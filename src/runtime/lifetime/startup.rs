use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::analytics::{UniqueViewRule, ViewTracker};
use crate::api::jwt::JwtService;
use crate::services::{AnalyticsService, ImageService, ResumeService};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub tracker: ViewTracker,
    pub analytics_service: Arc<AnalyticsService>,
    pub resume_service: Arc<ResumeService>,
    pub image_service: Arc<ImageService>,
    pub jwt: Arc<JwtService>,
}

/// 准备服务器启动的上下文
/// 包括存储、服务实例和上传目录
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = crate::config::get_config();

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.get_backend_name());

    let view_store = storage.as_view_store();
    let rule = UniqueViewRule::with_hours(config.analytics.unique_window_hours);
    let tracker = ViewTracker::new(view_store.clone(), rule);
    debug!(
        "ViewTracker initialized with a {}h unique window",
        rule.window().num_hours()
    );

    let analytics_service = Arc::new(AnalyticsService::new(view_store, &config.analytics));
    let resume_service = Arc::new(ResumeService::new(storage.clone()));

    let image_service = Arc::new(ImageService::new(storage.clone(), &config.uploads));
    image_service
        .ensure_upload_dir()
        .await
        .context("Failed to prepare upload directory")?;
    info!(
        "Uploads stored in {} (max {} bytes)",
        image_service.upload_dir().display(),
        image_service.max_file_size()
    );

    let jwt = Arc::new(JwtService::from_config());
    if !jwt.is_configured() {
        warn!("Bearer auth is not configured, owner routes are unavailable");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        tracker,
        analytics_service,
        resume_service,
        image_service,
        jwt,
    })
}
