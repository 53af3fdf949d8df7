//! 唯一浏览判定
//!
//! 同一 (resumeId, ipAddress) 在 `now` 之前的滑动窗口内没有任何浏览记录时，
//! 本次浏览记为唯一。窗口两端闭合：恰好 24 小时前的记录仍然计入。
//!
//! 存储层按 [`UniqueViewRule::window_start`] 与 `now` 做区间查询，
//! 判定只在这一处定义。

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueViewRule {
    window: Duration,
}

impl Default for UniqueViewRule {
    fn default() -> Self {
        Self::with_hours(24)
    }
}

impl UniqueViewRule {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// 非正数按默认 24 小时处理
    pub fn with_hours(hours: i64) -> Self {
        let hours = if hours > 0 { hours } else { 24 };
        Self::new(Duration::hours(hours))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// 窗口起点（含）
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    /// `window_start(now) <= timestamp <= now`
    pub fn in_window(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        timestamp >= self.window_start(now) && timestamp <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_recent_view_is_in_window() {
        let rule = UniqueViewRule::default();
        assert!(rule.in_window(t0(), t0() + Duration::hours(1)));
        assert!(rule.in_window(t0(), t0()));
    }

    #[test]
    fn test_window_start_is_inclusive() {
        let rule = UniqueViewRule::default();
        let now = t0() + Duration::hours(24);
        assert_eq!(rule.window_start(now), t0());
        assert!(rule.in_window(t0(), now));
        assert!(!rule.in_window(t0(), now + Duration::seconds(1)));
    }

    #[test]
    fn test_old_view_is_outside_window() {
        let rule = UniqueViewRule::default();
        assert!(!rule.in_window(t0(), t0() + Duration::hours(25)));
    }

    #[test]
    fn test_future_events_ignored() {
        let rule = UniqueViewRule::default();
        assert!(!rule.in_window(t0() + Duration::hours(2), t0()));
    }

    #[test]
    fn test_non_positive_hours_fall_back() {
        assert_eq!(UniqueViewRule::with_hours(0).window(), Duration::hours(24));
        assert_eq!(UniqueViewRule::with_hours(6).window(), Duration::hours(6));
    }
}
