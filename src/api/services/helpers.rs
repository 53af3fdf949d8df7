//! API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::errors::ResumeTrackError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            success: code == ErrorCode::Success,
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 响应
pub fn created_response<T: Serialize>(message: &str, data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, message, Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 ResumeTrackError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_resumetrack(err: &ResumeTrackError) -> HttpResponse {
    if err.http_status().is_server_error() {
        tracing::error!("Request failed: {}", err);
    }
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 ResumeTrackError。
pub fn api_result<T: Serialize>(result: Result<T, ResumeTrackError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_resumetrack(&e),
    }
}

impl ResponseError for ResumeTrackError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        error_from_resumetrack(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_error_envelope() {
        let resp = error_from_resumetrack(&ResumeTrackError::validation("resumeId is required"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 1000);
        assert_eq!(json["message"], "resumeId is required");
        assert!(json.get("data").is_none());
    }

    #[actix_rt::test]
    async fn test_success_envelope() {
        let resp = success_response(serde_json::json!({"n": 1}));
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["n"], 1);
    }
}
