//! ViewStore implementation for SeaOrmStorage
//!
//! 浏览事件的写入、分页与聚合查询。

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbBackend, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, sea_query::Expr,
};
use tracing::warn;

use super::SeaOrmStorage;
use super::converters::{model_to_view_event, new_view_to_active_model};
use crate::analytics::{
    BreakdownField, BreakdownRow, DailyCount, DayKey, NewView, UniqueViewRule, ViewEvent,
    ViewFilter, ViewStore,
};
use crate::errors::Result;

use migration::entities::view;

/// 分组查询结果行
#[derive(Debug, FromQueryResult)]
struct GroupRow {
    value: String,
    count: i64,
}

/// 按天查询结果行
#[derive(Debug, FromQueryResult)]
struct DayRow {
    label: String,
    count: i64,
}

fn breakdown_column(field: BreakdownField) -> view::Column {
    match field {
        BreakdownField::DeviceType => view::Column::DeviceType,
        BreakdownField::BrowserName => view::Column::BrowserName,
        BreakdownField::OperatingSystem => view::Column::OperatingSystem,
    }
}

/// 按 UTC 日期格式化 timestamp 列
fn day_label_expr(backend: DbBackend) -> Expr {
    match backend {
        DbBackend::Sqlite => Expr::cust("strftime('%Y-%m-%d', \"timestamp\")"),
        DbBackend::MySql => Expr::cust("DATE_FORMAT(`timestamp`, '%Y-%m-%d')"),
        DbBackend::Postgres | _ => {
            Expr::cust("TO_CHAR(\"timestamp\" AT TIME ZONE 'UTC', 'YYYY-MM-DD')")
        }
    }
}

fn parse_day_label(label: &str) -> Option<DayKey> {
    use chrono::Datelike;

    let date = NaiveDate::parse_from_str(label, "%Y-%m-%d").ok()?;
    Some(DayKey {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    })
}

fn filtered(filter: &ViewFilter) -> Select<view::Entity> {
    let mut query = view::Entity::find().filter(view::Column::ResumeId.eq(filter.resume_id.as_str()));
    if filter.unique_only {
        query = query.filter(view::Column::IsUniqueView.eq(true));
    }
    query
}

#[async_trait]
impl ViewStore for SeaOrmStorage {
    async fn has_view_in_window(
        &self,
        resume_id: &str,
        ip_address: &str,
        rule: &UniqueViewRule,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        // 与 UniqueViewRule::in_window 相同的闭区间
        let count = view::Entity::find()
            .filter(view::Column::ResumeId.eq(resume_id))
            .filter(view::Column::IpAddress.eq(ip_address))
            .filter(view::Column::Timestamp.gte(rule.window_start(now)))
            .filter(view::Column::Timestamp.lte(now))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn insert_view(&self, view: NewView) -> Result<ViewEvent> {
        let model = new_view_to_active_model(view).insert(&self.db).await?;
        Ok(model_to_view_event(model))
    }

    async fn find_views(
        &self,
        filter: &ViewFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ViewEvent>> {
        let models = filtered(filter)
            .order_by_desc(view::Column::Timestamp)
            .order_by_desc(view::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_view_event).collect())
    }

    async fn count_views(&self, filter: &ViewFilter) -> Result<u64> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn breakdown(&self, resume_id: &str, field: BreakdownField) -> Result<Vec<BreakdownRow>> {
        let column = breakdown_column(field);
        let rows = view::Entity::find()
            .select_only()
            .column_as(column, "value")
            .column_as(view::Column::Id.count(), "count")
            .filter(view::Column::ResumeId.eq(resume_id))
            .group_by(column)
            .order_by_desc(Expr::cust("count"))
            .order_by_asc(column)
            .into_model::<GroupRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| BreakdownRow {
                value: row.value,
                count: row.count.max(0) as u64,
            })
            .collect())
    }

    async fn daily_counts(&self, resume_id: &str, since: DateTime<Utc>) -> Result<Vec<DailyCount>> {
        let date_expr = day_label_expr(self.db_backend());
        let rows = view::Entity::find()
            .select_only()
            .column_as(date_expr.clone(), "label")
            .column_as(view::Column::Id.count(), "count")
            .filter(view::Column::ResumeId.eq(resume_id))
            .filter(view::Column::Timestamp.gte(since))
            .group_by(date_expr)
            .order_by_asc(Expr::cust("label"))
            .into_model::<DayRow>()
            .all(&self.db)
            .await?;

        let mut series = Vec::with_capacity(rows.len());
        for row in rows {
            match parse_day_label(&row.label) {
                Some(date) => series.push(DailyCount {
                    date,
                    count: row.count.max(0) as u64,
                }),
                None => warn!("Skipping unparsable day label: {}", row.label),
            }
        }
        series.sort_by_key(|d| d.date);
        Ok(series)
    }
}
