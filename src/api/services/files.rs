//! 文件上传与下载接口
//!
//! - `POST /single`            multipart 上传（字段 `image`，可选 `title`）
//! - `GET /img/{id}`           按记录返回文件
//! - `GET /resumes`            上传列表
//! - `DELETE /resumes/{id}`    删除记录与文件
//! - `GET /uploads/{filename}` 静态访问
//! - `GET /admin/images`       管理员列表

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use std::path::Path;
use tracing::{error, info};

use crate::api::jwt::AuthUser;
use crate::api::middleware::BearerAuth;
use crate::errors::ResumeTrackError;
use crate::services::ImageService;
use crate::storage::ImageRecord;

use super::error_code::ErrorCode;
use super::helpers::{error_from_resumetrack, error_response, success_response};
use super::types::{AdminImagesData, MessageResponse, UploadListItem, UploadResponse};

impl From<ImageRecord> for UploadListItem {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            filename: record.filename,
        }
    }
}

/// 根据文件扩展名确定 Content-Type
fn get_content_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain; charset=utf-8",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

async fn send_file(path: &Path) -> HttpResponse {
    match tokio::fs::read(path).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(get_content_type(&path.to_string_lossy()))
            .body(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            "Image file missing on server disk.",
        ),
        Err(e) => error_from_resumetrack(&ResumeTrackError::from(e)),
    }
}

pub struct FilesApi;

impl FilesApi {
    pub async fn upload(mut payload: Multipart, service: web::Data<ImageService>) -> HttpResponse {
        let max_size = service.max_file_size();
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut title: Option<String> = None;

        while let Some(item) = payload.next().await {
            let mut field = match item {
                Ok(f) => f,
                Err(e) => {
                    error!("Failed to parse multipart field: {}", e);
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::InvalidMultipartData,
                        &format!("Invalid multipart data: {}", e),
                    );
                }
            };

            let field_name = field.name().unwrap_or("").to_string();
            match field_name.as_str() {
                "image" => {
                    let original = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .unwrap_or("upload")
                        .to_string();

                    let mut data = Vec::new();
                    while let Some(chunk) = field.next().await {
                        match chunk {
                            Ok(bytes) => {
                                if data.len() + bytes.len() > max_size {
                                    return error_response(
                                        StatusCode::BAD_REQUEST,
                                        ErrorCode::FileTooLarge,
                                        &format!(
                                            "File size exceeds maximum {} MB",
                                            max_size / 1024 / 1024
                                        ),
                                    );
                                }
                                data.extend_from_slice(&bytes);
                            }
                            Err(e) => {
                                error!("Failed to read file chunk: {}", e);
                                return error_response(
                                    StatusCode::BAD_REQUEST,
                                    ErrorCode::InvalidMultipartData,
                                    &format!("Failed to read file: {}", e),
                                );
                            }
                        }
                    }
                    file = Some((original, data));
                }
                "title" => {
                    let mut data = Vec::new();
                    while let Some(chunk) = field.next().await {
                        match chunk {
                            Ok(bytes) => data.extend_from_slice(&bytes),
                            Err(e) => {
                                error!("Failed to read title field: {}", e);
                                return error_response(
                                    StatusCode::BAD_REQUEST,
                                    ErrorCode::InvalidMultipartData,
                                    &format!("Failed to read title: {}", e),
                                );
                            }
                        }
                    }
                    title = Some(String::from_utf8_lossy(&data).to_string());
                }
                _ => {
                    // 忽略未知字段
                }
            }
        }

        let Some((original, data)) = file else {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                "No file uploaded.",
            );
        };

        match service.save_upload(&original, title, &data).await {
            Ok(record) => HttpResponse::Created().json(UploadResponse {
                msg: "Image Uploaded Successfully".to_string(),
                filename: record.filename,
                id: record.id,
            }),
            Err(e) => error_from_resumetrack(&e),
        }
    }

    pub async fn get_image(path: web::Path<i64>, service: web::Data<ImageService>) -> HttpResponse {
        match service.locate(path.into_inner()).await {
            Ok((_, file_path)) => send_file(&file_path).await,
            Err(e) => error_from_resumetrack(&e),
        }
    }

    pub async fn list(service: web::Data<ImageService>) -> HttpResponse {
        match service.list().await {
            Ok(records) => HttpResponse::Ok().json(
                records
                    .into_iter()
                    .map(UploadListItem::from)
                    .collect::<Vec<_>>(),
            ),
            Err(e) => error_from_resumetrack(&e),
        }
    }

    pub async fn delete(path: web::Path<i64>, service: web::Data<ImageService>) -> HttpResponse {
        match service.delete(path.into_inner()).await {
            Ok(_) => HttpResponse::Ok().json(MessageResponse {
                msg: "Resume deleted successfully".to_string(),
            }),
            Err(e) => error_from_resumetrack(&e),
        }
    }

    pub async fn serve_upload(
        path: web::Path<String>,
        service: web::Data<ImageService>,
    ) -> HttpResponse {
        match service.static_path(&path).await {
            Ok(file_path) => send_file(&file_path).await,
            Err(e) => error_from_resumetrack(&e),
        }
    }

    pub async fn admin_images(user: AuthUser, service: web::Data<ImageService>) -> HttpResponse {
        if !user.is_admin() {
            info!("Admin listing denied for user {}", user.id);
            return error_from_resumetrack(&ResumeTrackError::forbidden(
                "Access denied: admins only",
            ));
        }

        match service.list().await {
            Ok(records) => success_response(AdminImagesData {
                admin: user.email,
                images: records.into_iter().map(UploadListItem::from).collect(),
            }),
            Err(e) => error_from_resumetrack(&e),
        }
    }
}

/// 文件路由（挂在根路径下）
pub fn file_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/single", web::post().to(FilesApi::upload))
        .route("/img/{id}", web::get().to(FilesApi::get_image))
        .route("/resumes", web::get().to(FilesApi::list))
        .route("/resumes/{id}", web::delete().to(FilesApi::delete))
        .route("/uploads/{filename}", web::get().to(FilesApi::serve_upload))
        .service(
            web::resource("/admin/images")
                .wrap(BearerAuth)
                .route(web::get().to(FilesApi::admin_images)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(get_content_type("uploads/a-1.PNG"), "image/png");
        assert_eq!(get_content_type("cv-2.pdf"), "application/pdf");
        assert_eq!(get_content_type("noext"), "application/octet-stream");
    }
}
