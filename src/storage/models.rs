use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 简历记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub unique_id: String,
    pub name: String,
    pub resume_data: serde_json::Value,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 上传文件记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub title: Option<String>,
    pub filename: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}
