//! 简历浏览统计核心
//!
//! - `user_agent`: UA 规则解析
//! - `dedup`: 24 小时唯一浏览判定
//! - `store`: 事件存储 trait 及数据类型
//! - `tracker`: 写入流程（同步上报与后台上报）

pub mod dedup;
pub mod store;
pub mod tracker;
pub mod user_agent;

pub use dedup::UniqueViewRule;
pub use store::{
    BreakdownField, BreakdownRow, DailyCount, DayKey, NewView, ViewEvent, ViewFilter, ViewStore,
};
pub use tracker::{ClientInfo, TrackViewRequest, ViewTracker};
pub use user_agent::{DeviceType, ParsedUserAgent, parse_user_agent};
