//! API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::SavedResume;

/// 统一响应外壳 `{success, code, message, data}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 上报成功后的返回数据
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TrackViewData {
    pub view_id: i64,
    pub resume_id: String,
    pub timestamp: DateTime<Utc>,
    pub is_unique_view: bool,
}

/// 保存简历的响应，`uniqueId` 同时出现在顶层
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeResponse {
    pub success: bool,
    pub code: i32,
    pub message: String,
    pub unique_id: String,
    pub data: SavedResume,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ResumeListData<T> {
    pub count: usize,
    pub resumes: Vec<T>,
}

/// 上传成功响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadResponse {
    pub msg: String,
    pub filename: String,
    pub id: i64,
}

/// 上传列表项
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadListItem {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: Option<String>,
    pub filename: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub msg: String,
}

/// 管理员列表响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AdminImagesData {
    pub admin: Option<String>,
    pub images: Vec<UploadListItem>,
}

/// Health check response
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
