//! 浏览统计集成测试（SQLite 临时库）
//!
//! 覆盖唯一浏览判定、分页、汇总与按天统计。

use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

use resumetrack::analytics::{
    BreakdownField, ClientInfo, DayKey, TrackViewRequest, UniqueViewRule, ViewFilter, ViewTracker,
};
use resumetrack::config::{AnalyticsConfig, init_config};
use resumetrack::services::{AnalyticsService, ViewListQuery};
use resumetrack::storage::SeaOrmStorage;

// =============================================================================
// 全局初始化
// =============================================================================

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_static_config();
    let td = TempDir::new().unwrap();
    let p = td.path().join("analytics_test.db");
    let u = format!("sqlite://{}?mode=rwc", p.display());
    let s = SeaOrmStorage::new(&u, "sqlite").await.unwrap();
    (Arc::new(s), td)
}

fn setup(storage: &SeaOrmStorage) -> (ViewTracker, AnalyticsService) {
    let store = storage.as_view_store();
    (
        ViewTracker::new(store.clone(), UniqueViewRule::default()),
        AnalyticsService::new(store, &AnalyticsConfig::default()),
    )
}

const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";
const SAFARI_IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";

fn client(ip: &str, ua: &str) -> ClientInfo {
    ClientInfo {
        ip_address: ip.to_string(),
        user_agent: ua.to_string(),
        referrer: None,
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

// =============================================================================
// 唯一浏览
// =============================================================================

#[tokio::test]
async fn test_unique_window_against_database() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, service) = setup(&storage);
    let t = base_time();

    let mut flags = Vec::new();
    for offset in [0, 1, 25] {
        let event = tracker
            .record_at(
                TrackViewRequest::for_resume("r1"),
                client("10.0.0.1", CHROME_WINDOWS),
                t + Duration::hours(offset),
            )
            .await
            .unwrap();
        flags.push(event.is_unique_view);
    }
    assert_eq!(flags, vec![true, false, true]);

    let summary = service.get_summary_at("r1", t + Duration::hours(26)).await.unwrap();
    assert_eq!(summary.summary.total_views, 3);
    assert_eq!(summary.summary.unique_views, 2);
    assert_eq!(summary.summary.duplicate_views, 1);
}

#[tokio::test]
async fn test_view_exactly_24h_later_is_duplicate() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, _) = setup(&storage);
    let t = base_time();

    let mut flags = Vec::new();
    for at in [
        t,
        t + Duration::hours(24),
        t + Duration::hours(48) + Duration::seconds(1),
    ] {
        let event = tracker
            .record_at(
                TrackViewRequest::for_resume("r1"),
                client("1.2.3.4", CHROME_WINDOWS),
                at,
            )
            .await
            .unwrap();
        flags.push(event.is_unique_view);
    }
    assert_eq!(flags, vec![true, false, true]);
}

#[tokio::test]
async fn test_unique_scope_is_per_resume_and_ip() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, _) = setup(&storage);
    let t = base_time();

    let first = tracker
        .record_at(
            TrackViewRequest::for_resume("r1"),
            client("10.0.0.1", CHROME_WINDOWS),
            t,
        )
        .await
        .unwrap();
    let other_resume = tracker
        .record_at(
            TrackViewRequest::for_resume("r2"),
            client("10.0.0.1", CHROME_WINDOWS),
            t + Duration::minutes(1),
        )
        .await
        .unwrap();
    let other_ip = tracker
        .record_at(
            TrackViewRequest::for_resume("r1"),
            client("10.0.0.2", CHROME_WINDOWS),
            t + Duration::minutes(2),
        )
        .await
        .unwrap();

    assert!(first.is_unique_view);
    assert!(other_resume.is_unique_view);
    assert!(other_ip.is_unique_view);
}

#[tokio::test]
async fn test_rejected_request_writes_nothing() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, _) = setup(&storage);

    let err = tracker
        .record(TrackViewRequest::default(), client("10.0.0.1", CHROME_WINDOWS))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "resumeId is required");

    let store = storage.as_view_store();
    assert_eq!(store.count_views(&ViewFilter::all("")).await.unwrap(), 0);
}

// =============================================================================
// 分页
// =============================================================================

#[tokio::test]
async fn test_second_page_returns_events_eleven_to_twenty() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, service) = setup(&storage);
    let t = base_time();

    let mut ids = Vec::new();
    for i in 0..25 {
        let event = tracker
            .record_at(
                TrackViewRequest::for_resume("r1"),
                client(&format!("10.0.1.{}", i), CHROME_WINDOWS),
                t + Duration::minutes(i),
            )
            .await
            .unwrap();
        ids.push(event.id);
    }
    // 新的在前
    ids.reverse();

    let query = ViewListQuery {
        page: Some(2),
        limit: Some(10),
        unique: None,
    };
    let page = service.list_views("r1", &query).await.unwrap();

    let got: Vec<i64> = page.views.iter().map(|v| v.id).collect();
    assert_eq!(got, ids[10..20].to_vec());
    assert_eq!(page.analytics.total_views, 25);
    assert_eq!(page.analytics.unique_views, 25);
    assert_eq!(page.analytics.total_pages, 3);
    assert_eq!(page.analytics.current_page, 2);
    assert_eq!(page.analytics.views_per_page, 10);
}

#[tokio::test]
async fn test_unique_filter_on_listing() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, service) = setup(&storage);
    let t = base_time();

    for i in 0..4 {
        tracker
            .record_at(
                TrackViewRequest::for_resume("r1"),
                client("10.0.0.1", CHROME_WINDOWS),
                t + Duration::minutes(i),
            )
            .await
            .unwrap();
    }

    let query = ViewListQuery {
        unique: Some("true".to_string()),
        ..Default::default()
    };
    let page = service.list_views("r1", &query).await.unwrap();
    assert_eq!(page.views.len(), 1);
    assert!(page.views[0].is_unique_view);
    assert_eq!(page.analytics.total_views, 1);

    let all = service
        .list_views("r1", &ViewListQuery::default())
        .await
        .unwrap();
    assert_eq!(all.analytics.total_views, 4);
    assert_eq!(all.analytics.unique_views, 1);
}

// =============================================================================
// 汇总
// =============================================================================

#[tokio::test]
async fn test_unknown_resume_summary_is_empty() {
    let (storage, _td) = create_temp_storage().await;
    let (_, service) = setup(&storage);

    let summary = service.get_summary("missing").await.unwrap();
    assert_eq!(summary.summary.total_views, 0);
    assert_eq!(summary.summary.unique_views, 0);
    assert_eq!(summary.summary.duplicate_views, 0);
    assert!(summary.breakdowns.devices.is_empty());
    assert!(summary.breakdowns.browsers.is_empty());
    assert!(summary.breakdowns.operating_systems.is_empty());
    assert!(summary.views_over_time.is_empty());
}

#[tokio::test]
async fn test_breakdowns_sorted_by_count() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, service) = setup(&storage);
    let t = base_time();

    let uas = [CHROME_WINDOWS, CHROME_WINDOWS, CHROME_WINDOWS, FIREFOX_LINUX, SAFARI_IPAD];
    for (i, ua) in uas.iter().enumerate() {
        tracker
            .record_at(
                TrackViewRequest::for_resume("r1"),
                client(&format!("10.0.2.{}", i), ua),
                t + Duration::minutes(i as i64),
            )
            .await
            .unwrap();
    }

    let summary = service.get_summary_at("r1", t + Duration::hours(1)).await.unwrap();
    let browsers = &summary.breakdowns.browsers;
    assert_eq!(browsers[0].value, "Chrome");
    assert_eq!(browsers[0].count, 3);
    assert_eq!(browsers.iter().map(|b| b.count).sum::<u64>(), 5);

    let devices = &summary.breakdowns.devices;
    assert_eq!(devices[0].value, "desktop");
    assert_eq!(devices[0].count, 4);

    let store = storage.as_view_store();
    let os = store
        .breakdown("r1", BreakdownField::OperatingSystem)
        .await
        .unwrap();
    assert_eq!(os[0].value, "Windows");
    assert_eq!(os[0].count, 3);
}

#[tokio::test]
async fn test_views_over_time_limited_to_thirty_days() {
    let (storage, _td) = create_temp_storage().await;
    let (tracker, service) = setup(&storage);
    let now = base_time();

    for (ip, days_ago) in [("1.1.1.1", 40), ("1.1.1.2", 10), ("1.1.1.3", 10), ("1.1.1.4", 1)] {
        tracker
            .record_at(
                TrackViewRequest::for_resume("r1"),
                client(ip, CHROME_WINDOWS),
                now - Duration::days(days_ago),
            )
            .await
            .unwrap();
    }

    let summary = service.get_summary_at("r1", now).await.unwrap();
    let series = &summary.views_over_time;
    assert_eq!(series.len(), 2);
    assert_eq!(
        series[0].date,
        DayKey {
            year: 2026,
            month: 2,
            day: 19
        }
    );
    assert_eq!(series[0].count, 2);
    assert_eq!(
        series[1].date,
        DayKey {
            year: 2026,
            month: 2,
            day: 28
        }
    );
    assert_eq!(series[1].count, 1);

    // 总数不受时间窗口限制
    assert_eq!(summary.summary.total_views, 4);
}
