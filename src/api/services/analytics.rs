//! 浏览统计接口
//!
//! - `POST /api/track-view`
//! - `GET /api/views/{id}`
//! - `GET /api/analytics/{id}`

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{info, trace};

use crate::analytics::{ClientInfo, TrackViewRequest, ViewTracker};
use crate::services::{AnalyticsService, ViewListQuery};

use super::helpers::{api_result, created_response, error_from_resumetrack};
use super::types::TrackViewData;

pub struct AnalyticsApi;

impl AnalyticsApi {
    pub async fn track_view(
        req: HttpRequest,
        body: web::Json<TrackViewRequest>,
        tracker: web::Data<ViewTracker>,
    ) -> impl Responder {
        let client = ClientInfo::from_request(&req);
        trace!("Track view request from {}", client.ip_address);

        match tracker.record(body.into_inner(), client).await {
            Ok(event) => {
                info!(
                    "Resume view tracked: {} from {} ({})",
                    event.resume_id, event.ip_address, event.device_type
                );
                created_response(
                    "View tracked successfully",
                    TrackViewData {
                        view_id: event.id,
                        resume_id: event.resume_id,
                        timestamp: event.timestamp,
                        is_unique_view: event.is_unique_view,
                    },
                )
            }
            Err(e) => error_from_resumetrack(&e),
        }
    }

    pub async fn list_views(
        path: web::Path<String>,
        query: web::Query<ViewListQuery>,
        service: web::Data<AnalyticsService>,
    ) -> HttpResponse {
        api_result(service.list_views(&path, &query).await)
    }

    pub async fn summary(
        path: web::Path<String>,
        service: web::Data<AnalyticsService>,
    ) -> HttpResponse {
        api_result(service.get_summary(&path).await)
    }
}

/// 统计路由（挂在 `/api` 下）
pub fn analytics_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/track-view", web::post().to(AnalyticsApi::track_view))
        .route("/views/{id}", web::get().to(AnalyticsApi::list_views))
        .route("/analytics/{id}", web::get().to(AnalyticsApi::summary));
}
