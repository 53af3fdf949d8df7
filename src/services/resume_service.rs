//! Resume service layer
//!
//! 简历保存、公开预览与所有者管理。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ResumeTrackError, Result};
use crate::storage::{Resume, SeaOrmStorage};

pub const DEFAULT_RESUME_NAME: &str = "Untitled Resume";
const LIST_LIMIT: u64 = 50;

/// 保存请求体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resume_data: Option<serde_json::Value>,
}

/// 更新请求体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resume_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub id: i64,
    pub unique_id: String,
    pub name: String,
}

/// 公开预览内容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePreview {
    pub name: String,
    pub resume_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// 列表项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeListItem {
    pub unique_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Resume> for SavedResume {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id,
            unique_id: resume.unique_id,
            name: resume.name,
        }
    }
}

impl From<Resume> for ResumePreview {
    fn from(resume: Resume) -> Self {
        Self {
            name: resume.name,
            resume_data: resume.resume_data,
            created_at: resume.created_at,
        }
    }
}

impl From<Resume> for ResumeListItem {
    fn from(resume: Resume) -> Self {
        Self {
            unique_id: resume.unique_id,
            name: resume.name,
            created_at: resume.created_at,
        }
    }
}

/// `null` 视为缺失
fn present(data: Option<serde_json::Value>) -> Option<serde_json::Value> {
    data.filter(|v| !v.is_null())
}

pub struct ResumeService {
    storage: Arc<SeaOrmStorage>,
}

impl ResumeService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn save(&self, user_id: &str, request: SaveResumeRequest) -> Result<SavedResume> {
        let data = present(request.resume_data)
            .ok_or_else(|| ResumeTrackError::validation("Resume data is required"))?;
        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_RESUME_NAME.to_string());

        let unique_id = uuid::Uuid::new_v4().to_string();
        let resume = self
            .storage
            .insert_resume(&unique_id, &name, data, Some(user_id.to_string()))
            .await?;

        info!("Resume saved: {} by user {}", resume.unique_id, user_id);
        Ok(resume.into())
    }

    pub async fn preview(&self, unique_id: &str) -> Result<ResumePreview> {
        self.storage
            .find_resume(unique_id)
            .await?
            .map(ResumePreview::from)
            .ok_or_else(|| ResumeTrackError::not_found("Resume not found"))
    }

    /// 当前用户的简历，新的在前，最多 50 条
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<ResumeListItem>> {
        let resumes = self.storage.list_resumes_by_user(user_id, LIST_LIMIT).await?;
        Ok(resumes.into_iter().map(ResumeListItem::from).collect())
    }

    pub async fn update(
        &self,
        user_id: &str,
        unique_id: &str,
        request: UpdateResumeRequest,
    ) -> Result<SavedResume> {
        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let data = present(request.resume_data);

        if name.is_none() && data.is_none() {
            return Err(ResumeTrackError::validation(
                "Nothing to update: provide name or resumeData",
            ));
        }

        let resume = self
            .storage
            .update_resume(unique_id, user_id, name, data)
            .await?
            .ok_or_else(|| ResumeTrackError::not_found("Resume not found"))?;

        info!("Resume updated: {} by user {}", unique_id, user_id);
        Ok(resume.into())
    }

    pub async fn delete(&self, user_id: &str, unique_id: &str) -> Result<()> {
        if !self.storage.delete_resume(unique_id, user_id).await? {
            return Err(ResumeTrackError::not_found("Resume not found"));
        }
        info!("Resume deleted: {} by user {}", unique_id, user_id);
        Ok(())
    }
}
