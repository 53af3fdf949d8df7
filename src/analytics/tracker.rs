//! 浏览记录写入
//!
//! 解析请求元数据 → 判定唯一性 → 写入一条事件。

use std::sync::Arc;

use actix_web::HttpRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::dedup::UniqueViewRule;
use super::store::{NewView, ViewEvent, ViewStore};
use super::user_agent::{UNKNOWN, parse_user_agent};
use crate::errors::{ResumeTrackError, Result};
use crate::utils::ip::client_ip;

/// 浏览上报请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackViewRequest {
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub view_duration: Option<f64>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl TrackViewRequest {
    pub fn for_resume(resume_id: impl Into<String>) -> Self {
        Self {
            resume_id: Some(resume_id.into()),
            ..Default::default()
        }
    }
}

/// 从请求中提取的客户端信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: Option<String>,
}

impl ClientInfo {
    pub fn from_request(req: &HttpRequest) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            ip_address: client_ip(req),
            user_agent: header("user-agent")
                .filter(|ua| !ua.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            referrer: header("referer").or_else(|| header("referrer")),
        }
    }
}

/// 浏览记录器
#[derive(Clone)]
pub struct ViewTracker {
    store: Arc<dyn ViewStore>,
    rule: UniqueViewRule,
}

impl ViewTracker {
    pub fn new(store: Arc<dyn ViewStore>, rule: UniqueViewRule) -> Self {
        Self { store, rule }
    }

    /// 记录一次浏览
    pub async fn record(&self, request: TrackViewRequest, client: ClientInfo) -> Result<ViewEvent> {
        self.record_at(request, client, Utc::now()).await
    }

    /// 以指定时间记录一次浏览
    pub async fn record_at(
        &self,
        request: TrackViewRequest,
        client: ClientInfo,
        now: DateTime<Utc>,
    ) -> Result<ViewEvent> {
        let resume_id = request
            .resume_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ResumeTrackError::validation("resumeId is required"))?;

        let unique_id = request
            .unique_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| resume_id.clone());

        let view_duration = request
            .view_duration
            .filter(|d| d.is_finite())
            .map(|d| d.max(0.0))
            .unwrap_or(0.0);

        let session_id = request
            .session_id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let parsed = parse_user_agent(&client.user_agent);

        let seen = self
            .store
            .has_view_in_window(&resume_id, &client.ip_address, &self.rule, now)
            .await?;

        let view = NewView {
            resume_id,
            unique_id,
            ip_address: client.ip_address,
            user_agent: client.user_agent,
            browser_name: parsed.browser_name,
            browser_version: parsed.browser_version,
            device_type: parsed.device_type.to_string(),
            operating_system: parsed.operating_system,
            referrer_url: client.referrer,
            view_duration,
            is_unique_view: !seen,
            session_id,
            timestamp: now,
        };

        let event = self.store.insert_view(view).await?;
        debug!(
            "View tracked: resume={} ip={} unique={}",
            event.resume_id, event.ip_address, event.is_unique_view
        );
        Ok(event)
    }

    /// 后台记录浏览，错误只记日志
    pub fn spawn_track(&self, request: TrackViewRequest, client: ClientInfo) {
        let tracker = self.clone();
        tokio::spawn(async move {
            let resume_id = request.resume_id.clone().unwrap_or_default();
            match tracker.record(request, client).await {
                Ok(event) => info!(
                    "Background view tracked for resume {} (unique={})",
                    event.resume_id, event.is_unique_view
                ),
                Err(e) => error!("Failed to track view for resume {}: {}", resume_id, e),
            }
        });
    }
}
