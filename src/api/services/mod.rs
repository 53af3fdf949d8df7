pub mod analytics;
pub mod error_code;
pub mod files;
pub mod health;
pub mod helpers;
pub mod resume;
pub mod types;

use actix_web::{
    HttpRequest,
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    web,
};

pub use analytics::{AnalyticsApi, analytics_routes};
pub use error_code::ErrorCode;
pub use files::{FilesApi, file_routes};
pub use health::{AppStartTime, HealthService};
pub use helpers::{
    api_result, created_response, error_from_resumetrack, error_response, json_response,
    success_response,
};
pub use resume::{ResumeApi, resume_routes};
pub use types::ApiResponse;

/// JSON 请求体上限
pub const JSON_PAYLOAD_LIMIT: usize = 50 * 1024 * 1024;

/// JSON 解析失败时返回统一外壳
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let (status, code) = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    (StatusCode::PAYLOAD_TOO_LARGE, ErrorCode::FileTooLarge)
                }
                _ => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
            };
            let message = format!("Invalid JSON body: {}", err);
            actix_web::error::InternalError::from_response(
                err,
                error_response(status, code, &message),
            )
            .into()
        })
}

/// 查询参数解析失败时返回统一外壳
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let message = format!("Invalid query string: {}", err);
        actix_web::error::InternalError::from_response(
            err,
            error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message),
        )
        .into()
    })
}

/// 路径参数无法解析时按 404 返回统一外壳
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        let message = format!("Invalid path parameter: {}", err);
        actix_web::error::InternalError::from_response(
            err,
            error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, &message),
        )
        .into()
    })
}

/// 注册全部路由
///
/// Handlers expect these `web::Data` entries: `ViewTracker`, `AnalyticsService`,
/// `ResumeService`, `ImageService`, `JwtService`, `Arc<SeaOrmStorage>` and
/// `AppStartTime`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/", web::get().to(HealthService::banner))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::health_check))
        .service(
            web::scope("/api")
                .configure(analytics_routes)
                .service(resume_routes()),
        )
        .configure(file_routes);
}
