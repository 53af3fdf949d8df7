//! 简历接口（挂在 `/api/resume` 下）

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::analytics::{ClientInfo, TrackViewRequest, ViewTracker};
use crate::api::jwt::AuthUser;
use crate::api::middleware::BearerAuth;
use crate::services::{ResumeService, SaveResumeRequest, UpdateResumeRequest};

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_resumetrack, json_response};
use super::types::{ResumeListData, SaveResumeResponse};

pub struct ResumeApi;

impl ResumeApi {
    pub async fn save(
        user: AuthUser,
        body: web::Json<SaveResumeRequest>,
        service: web::Data<ResumeService>,
    ) -> HttpResponse {
        match service.save(&user.id, body.into_inner()).await {
            Ok(saved) => HttpResponse::Created().json(SaveResumeResponse {
                success: true,
                code: ErrorCode::Success as i32,
                message: "Resume saved successfully".to_string(),
                unique_id: saved.unique_id.clone(),
                data: saved,
            }),
            Err(e) => error_from_resumetrack(&e),
        }
    }

    /// 公开预览，成功后后台记录一次浏览
    pub async fn preview(
        req: HttpRequest,
        path: web::Path<String>,
        service: web::Data<ResumeService>,
        tracker: web::Data<ViewTracker>,
    ) -> HttpResponse {
        let unique_id = path.into_inner();
        match service.preview(&unique_id).await {
            Ok(preview) => {
                let request = TrackViewRequest {
                    unique_id: Some(unique_id.clone()),
                    ..TrackViewRequest::for_resume(unique_id)
                };
                tracker.spawn_track(request, ClientInfo::from_request(&req));
                json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(preview))
            }
            Err(e) => error_from_resumetrack(&e),
        }
    }

    pub async fn list(user: AuthUser, service: web::Data<ResumeService>) -> HttpResponse {
        api_result(
            service
                .list_for_user(&user.id)
                .await
                .map(|resumes| ResumeListData {
                    count: resumes.len(),
                    resumes,
                }),
        )
    }

    pub async fn update(
        user: AuthUser,
        path: web::Path<String>,
        body: web::Json<UpdateResumeRequest>,
        service: web::Data<ResumeService>,
    ) -> HttpResponse {
        api_result(service.update(&user.id, &path, body.into_inner()).await)
    }

    pub async fn delete(
        user: AuthUser,
        path: web::Path<String>,
        service: web::Data<ResumeService>,
    ) -> HttpResponse {
        match service.delete(&user.id, &path).await {
            Ok(()) => json_response::<()>(
                StatusCode::OK,
                ErrorCode::Success,
                "Resume deleted successfully",
                None,
            ),
            Err(e) => error_from_resumetrack(&e),
        }
    }
}

/// 简历路由
pub fn resume_routes() -> actix_web::Scope {
    web::scope("/resume")
        .route("/preview/{unique_id}", web::get().to(ResumeApi::preview))
        .service(
            web::resource("/save")
                .wrap(BearerAuth)
                .route(web::post().to(ResumeApi::save)),
        )
        .service(
            web::resource("/all")
                .wrap(BearerAuth)
                .route(web::get().to(ResumeApi::list)),
        )
        .service(
            web::resource("/{unique_id}")
                .wrap(BearerAuth)
                .route(web::put().to(ResumeApi::update))
                .route(web::delete().to(ResumeApi::delete)),
        )
}
