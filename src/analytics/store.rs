//! 浏览事件存储抽象
//!
//! 统计核心只通过 `ViewStore` 访问存储，具体实现由 `storage` 层注入。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::dedup::UniqueViewRule;
use crate::errors::Result;

/// 已持久化的浏览事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvent {
    #[serde(rename = "_id")]
    pub id: i64,
    pub resume_id: String,
    pub unique_id: String,
    pub ip_address: String,
    pub user_agent: String,
    pub browser_name: String,
    pub browser_version: String,
    pub device_type: String,
    pub operating_system: String,
    pub referrer_url: Option<String>,
    pub view_duration: f64,
    pub is_unique_view: bool,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

/// 待写入的浏览事件
#[derive(Debug, Clone, PartialEq)]
pub struct NewView {
    pub resume_id: String,
    pub unique_id: String,
    pub ip_address: String,
    pub user_agent: String,
    pub browser_name: String,
    pub browser_version: String,
    pub device_type: String,
    pub operating_system: String,
    pub referrer_url: Option<String>,
    pub view_duration: f64,
    pub is_unique_view: bool,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

/// 列表/计数查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    pub resume_id: String,
    pub unique_only: bool,
}

impl ViewFilter {
    pub fn all(resume_id: impl Into<String>) -> Self {
        Self {
            resume_id: resume_id.into(),
            unique_only: false,
        }
    }

    pub fn unique(resume_id: impl Into<String>) -> Self {
        Self {
            resume_id: resume_id.into(),
            unique_only: true,
        }
    }
}

/// 分组维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "camelCase")]
pub enum BreakdownField {
    DeviceType,
    BrowserName,
    OperatingSystem,
}

/// 分组计数 `{ "_id": value, "count": n }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    #[serde(rename = "_id")]
    pub value: String,
    pub count: u64,
}

/// UTC 日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// 按天计数 `{ "_id": {year, month, day}, "count": n }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    #[serde(rename = "_id")]
    pub date: DayKey,
    pub count: u64,
}

/// 浏览事件存储
///
/// Events are append-only: there is no update or delete operation.
#[async_trait::async_trait]
pub trait ViewStore: Send + Sync {
    /// Whether any event for `(resume_id, ip_address)` falls inside
    /// `rule`'s window ending at `now` (see [`UniqueViewRule::in_window`]).
    async fn has_view_in_window(
        &self,
        resume_id: &str,
        ip_address: &str,
        rule: &UniqueViewRule,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    async fn insert_view(&self, view: NewView) -> Result<ViewEvent>;

    /// Events matching `filter`, newest first.
    async fn find_views(&self, filter: &ViewFilter, offset: u64, limit: u64)
    -> Result<Vec<ViewEvent>>;

    async fn count_views(&self, filter: &ViewFilter) -> Result<u64>;

    /// `(value, count)` pairs for one column, highest count first.
    async fn breakdown(&self, resume_id: &str, field: BreakdownField)
    -> Result<Vec<BreakdownRow>>;

    /// Per-day counts of events with `timestamp >= since`, ascending by day.
    async fn daily_counts(&self, resume_id: &str, since: DateTime<Utc>)
    -> Result<Vec<DailyCount>>;
}
