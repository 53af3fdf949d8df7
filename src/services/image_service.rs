//! Upload service layer
//!
//! 上传文件落盘到 `uploads.dir`，数据库只保存文件名与路径。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::UploadConfig;
use crate::errors::{ResumeTrackError, Result};
use crate::storage::{ImageRecord, SeaOrmStorage};
use crate::utils::{is_safe_file_name, stored_file_name};

pub struct ImageService {
    storage: Arc<SeaOrmStorage>,
    upload_dir: PathBuf,
    max_file_size: usize,
}

impl ImageService {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &UploadConfig) -> Self {
        Self {
            storage,
            upload_dir: PathBuf::from(&config.dir),
            max_file_size: config.max_file_size,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// 启动时创建上传目录
    pub async fn ensure_upload_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                ResumeTrackError::file_operation(format!(
                    "无法创建上传目录 {}: {}",
                    self.upload_dir.display(),
                    e
                ))
            })
    }

    /// 保存上传内容并写入记录
    pub async fn save_upload(
        &self,
        original_name: &str,
        title: Option<String>,
        bytes: &[u8],
    ) -> Result<ImageRecord> {
        if bytes.len() > self.max_file_size {
            return Err(ResumeTrackError::validation(format!(
                "File too large (max {} bytes)",
                self.max_file_size
            )));
        }

        self.ensure_upload_dir().await?;

        let filename = stored_file_name(original_name, Utc::now().timestamp_millis());
        let path = self.upload_dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        let title = title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        let path_str = path.to_string_lossy().to_string();
        match self.storage.insert_image(title, &filename, &path_str).await {
            Ok(record) => {
                info!("Upload stored: {} ({} bytes)", filename, bytes.len());
                Ok(record)
            }
            Err(e) => {
                // 记录写入失败时不保留孤儿文件
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    warn!("Failed to remove orphaned upload {}: {}", path.display(), rm);
                }
                Err(e)
            }
        }
    }

    /// 按 id 定位磁盘文件
    pub async fn locate(&self, id: i64) -> Result<(ImageRecord, PathBuf)> {
        let record = self
            .storage
            .find_image(id)
            .await?
            .ok_or_else(|| ResumeTrackError::not_found("Image Not Found"))?;

        let path = PathBuf::from(&record.path);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ResumeTrackError::not_found(
                "Image file missing on server disk.",
            ));
        }
        Ok((record, path))
    }

    pub async fn list(&self) -> Result<Vec<ImageRecord>> {
        self.storage.list_images().await
    }

    /// 删除记录与文件（文件不存在时忽略）
    pub async fn delete(&self, id: i64) -> Result<ImageRecord> {
        let record = self
            .storage
            .delete_image(id)
            .await?
            .ok_or_else(|| ResumeTrackError::not_found("Resume not found."))?;

        match tokio::fs::remove_file(&record.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove file {}: {}", record.path, e),
        }

        info!("Upload deleted: {} ({})", record.filename, record.id);
        Ok(record)
    }

    /// 静态文件路径（拒绝路径穿越）
    pub async fn static_path(&self, filename: &str) -> Result<PathBuf> {
        if !is_safe_file_name(filename) {
            return Err(ResumeTrackError::validation("Invalid file name"));
        }
        let path = self.upload_dir.join(filename);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ResumeTrackError::not_found("File not found"));
        }
        Ok(path)
    }
}
