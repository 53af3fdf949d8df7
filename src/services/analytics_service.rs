//! Analytics service layer
//!
//! 浏览事件的分页查询与汇总统计，HTTP 层只负责参数解析与响应封装。

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analytics::{BreakdownField, BreakdownRow, DailyCount, ViewEvent, ViewFilter, ViewStore};
use crate::config::AnalyticsConfig;
use crate::errors::Result;

// ============ 公共类型定义 ============

/// 分页查询参数（query string）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// 只有字面值 `true` 才启用过滤
    pub unique: Option<String>,
}

impl ViewListQuery {
    pub fn unique_only(&self) -> bool {
        self.unique.as_deref() == Some("true")
    }
}

/// 分页信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    /// Count of the filtered query
    pub total_views: u64,
    /// Unique views of the resume, independent of the filter
    pub unique_views: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub views_per_page: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewPage {
    pub views: Vec<ViewEvent>,
    pub analytics: PageStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    pub total_views: u64,
    pub unique_views: u64,
    pub duplicate_views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdowns {
    pub devices: Vec<BreakdownRow>,
    pub browsers: Vec<BreakdownRow>,
    pub operating_systems: Vec<BreakdownRow>,
}

/// 单份简历的统计汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalytics {
    pub summary: ViewSummary,
    pub breakdowns: Breakdowns,
    pub views_over_time: Vec<DailyCount>,
}

// ============ AnalyticsService ============

pub struct AnalyticsService {
    store: Arc<dyn ViewStore>,
    series_days: i64,
    default_limit: u64,
    max_limit: u64,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn ViewStore>, config: &AnalyticsConfig) -> Self {
        Self {
            store,
            series_days: config.series_days.max(1),
            default_limit: config.default_page_limit.max(1),
            max_limit: config.max_page_limit.max(1),
        }
    }

    /// 规范化分页参数：page 至少为 1，limit 为 0 时取默认值并限制上限
    pub fn normalize_page(&self, page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
        let page = page.unwrap_or(1).max(1);
        let limit = match limit {
            Some(0) | None => self.default_limit,
            Some(l) => l,
        }
        .min(self.max_limit);
        (page, limit)
    }

    /// 分页列出浏览事件，按时间倒序
    pub async fn list_views(&self, resume_id: &str, query: &ViewListQuery) -> Result<ViewPage> {
        let (page, limit) = self.normalize_page(query.page, query.limit);
        let filter = ViewFilter {
            resume_id: resume_id.to_string(),
            unique_only: query.unique_only(),
        };
        let offset = (page - 1).saturating_mul(limit);

        info!(
            "Analytics: list_views for '{}' page={} limit={} unique={}",
            resume_id, page, limit, filter.unique_only
        );

        let unique_filter = ViewFilter::unique(resume_id);
        let (views, total_views, unique_views) = tokio::try_join!(
            self.store.find_views(&filter, offset, limit),
            self.store.count_views(&filter),
            self.store.count_views(&unique_filter),
        )?;

        debug!(
            "Analytics: list_views returned {} of {} views",
            views.len(),
            total_views
        );

        Ok(ViewPage {
            views,
            analytics: PageStats {
                total_views,
                unique_views,
                total_pages: total_views.div_ceil(limit),
                current_page: page,
                views_per_page: limit,
            },
        })
    }

    pub async fn get_summary(&self, resume_id: &str) -> Result<ResumeAnalytics> {
        self.get_summary_at(resume_id, Utc::now()).await
    }

    /// 统计汇总
    ///
    /// 使用 `tokio::try_join!` 并发执行 6 个查询，任一失败则整体失败
    pub async fn get_summary_at(
        &self,
        resume_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ResumeAnalytics> {
        info!("Analytics: get_summary for '{}'", resume_id);

        let since = now - Duration::days(self.series_days);
        let all = ViewFilter::all(resume_id);
        let unique = ViewFilter::unique(resume_id);

        let (total_views, unique_views, devices, browsers, operating_systems, views_over_time) = tokio::try_join!(
            self.store.count_views(&all),
            self.store.count_views(&unique),
            self.store.breakdown(resume_id, BreakdownField::DeviceType),
            self.store.breakdown(resume_id, BreakdownField::BrowserName),
            self.store.breakdown(resume_id, BreakdownField::OperatingSystem),
            self.store.daily_counts(resume_id, since),
        )?;

        debug!(
            "Analytics: get_summary '{}' total={} unique={} days={}",
            resume_id,
            total_views,
            unique_views,
            views_over_time.len()
        );

        Ok(ResumeAnalytics {
            summary: ViewSummary {
                total_views,
                unique_views,
                duplicate_views: total_views.saturating_sub(unique_views),
            },
            breakdowns: Breakdowns {
                devices,
                browsers,
                operating_systems,
            },
            views_over_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyStore;

    #[async_trait::async_trait]
    impl ViewStore for EmptyStore {
        async fn has_view_in_window(
            &self,
            _: &str,
            _: &str,
            _: &crate::analytics::UniqueViewRule,
            _: DateTime<Utc>,
        ) -> Result<bool> {
            Ok(false)
        }

        async fn insert_view(&self, _: crate::analytics::NewView) -> Result<ViewEvent> {
            Err(crate::errors::ResumeTrackError::database_operation("read-only"))
        }

        async fn find_views(&self, _: &ViewFilter, _: u64, _: u64) -> Result<Vec<ViewEvent>> {
            Ok(Vec::new())
        }

        async fn count_views(&self, _: &ViewFilter) -> Result<u64> {
            Ok(0)
        }

        async fn breakdown(&self, _: &str, _: BreakdownField) -> Result<Vec<BreakdownRow>> {
            Ok(Vec::new())
        }

        async fn daily_counts(&self, _: &str, _: DateTime<Utc>) -> Result<Vec<DailyCount>> {
            Err(crate::errors::ResumeTrackError::database_operation(
                "daily query failed",
            ))
        }
    }

    fn service() -> AnalyticsService {
        AnalyticsService::new(Arc::new(EmptyStore), &AnalyticsConfig::default())
    }

    #[test]
    fn test_normalize_page() {
        let svc = service();
        assert_eq!(svc.normalize_page(None, None), (1, 50));
        assert_eq!(svc.normalize_page(Some(0), Some(0)), (1, 50));
        assert_eq!(svc.normalize_page(Some(3), Some(10)), (3, 10));
        assert_eq!(svc.normalize_page(Some(1), Some(5000)), (1, 1000));
    }

    #[test]
    fn test_unique_flag_requires_literal_true() {
        let mut query = ViewListQuery::default();
        assert!(!query.unique_only());
        query.unique = Some("1".into());
        assert!(!query.unique_only());
        query.unique = Some("true".into());
        assert!(query.unique_only());
    }

    #[tokio::test]
    async fn test_unknown_resume_lists_nothing() {
        let page = service()
            .list_views("nope", &ViewListQuery::default())
            .await
            .unwrap();
        assert!(page.views.is_empty());
        assert_eq!(page.analytics.total_views, 0);
        assert_eq!(page.analytics.total_pages, 0);
        assert_eq!(page.analytics.current_page, 1);
        assert_eq!(page.analytics.views_per_page, 50);
    }

    #[tokio::test]
    async fn test_summary_fails_when_any_query_fails() {
        let err = service().get_summary("r1").await.unwrap_err();
        assert!(err.is_persistence());
    }
}
