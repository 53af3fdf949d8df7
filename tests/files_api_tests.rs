//! 上传接口集成测试

use std::sync::{Arc, Once};

use actix_web::{App, http::StatusCode, test, web};
use serde_json::Value;
use tempfile::TempDir;

use resumetrack::api::jwt::{JwtService, UserClaims};
use resumetrack::api::services::configure_routes;
use resumetrack::config::{UploadConfig, init_config};
use resumetrack::services::ImageService;
use resumetrack::storage::SeaOrmStorage;

const SECRET: &str = "files_test_secret_32_bytes_long!";
const BOUNDARY: &str = "----resumetrack-test-boundary";

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_context() -> (Arc<SeaOrmStorage>, web::Data<ImageService>, TempDir) {
    init_static_config();
    let td = TempDir::new().unwrap();
    let p = td.path().join("files_test.db");
    let u = format!("sqlite://{}?mode=rwc", p.display());
    let storage = Arc::new(SeaOrmStorage::new(&u, "sqlite").await.unwrap());

    let uploads = UploadConfig {
        dir: td.path().join("uploads").to_string_lossy().to_string(),
        max_file_size: 1024,
    };
    let images = web::Data::new(ImageService::new(storage.clone(), &uploads));
    (storage, images, td)
}

macro_rules! init_app {
    ($storage:expr, $images:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data($images.clone())
                .app_data(web::Data::new(JwtService::new(SECRET)))
                .configure(configure_routes),
        )
        .await
    };
}

/// 构造 multipart 请求体
fn multipart_body(file: Option<(&str, &[u8])>, title: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(title) = title {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{}\r\n",
                BOUNDARY, title
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/single")
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

fn token(role: &str) -> String {
    JwtService::new(SECRET)
        .sign(&UserClaims {
            id: Some("u1".to_string()),
            email: Some("admin@example.com".to_string()),
            role: Some(role.to_string()),
            ..Default::default()
        })
        .unwrap()
}

#[actix_rt::test]
async fn test_upload_list_fetch_delete() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    let req = upload_request(multipart_body(
        Some(("photo.png", &b"fake-png-bytes"[..])),
        Some("Headshot"),
    ))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "Image Uploaded Successfully");
    let filename = body["filename"].as_str().unwrap().to_string();
    let id = body["id"].as_i64().unwrap();
    assert!(filename.starts_with("photo-"));
    assert!(filename.ends_with(".png"));
    assert!(images.upload_dir().join(&filename).exists());

    // list
    let req = test::TestRequest::get().uri("/resumes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["_id"], id);
    assert_eq!(list[0]["title"], "Headshot");

    // by id
    let req = test::TestRequest::get()
        .uri(&format!("/img/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "image/png"
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], b"fake-png-bytes");

    // static path
    let req = test::TestRequest::get()
        .uri(&format!("/uploads/{}", filename))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // delete
    let req = test::TestRequest::delete()
        .uri(&format!("/resumes/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["msg"], "Resume deleted successfully");
    assert!(!images.upload_dir().join(&filename).exists());

    let req = test::TestRequest::get()
        .uri(&format!("/img/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/resumes/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_upload_without_file_is_rejected() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    let req = upload_request(multipart_body(None, Some("x"))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No file uploaded.");
}

#[actix_rt::test]
async fn test_oversized_upload_is_rejected() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    let big = vec![b'a'; 4096];
    let req = upload_request(multipart_body(Some(("big.txt", big.as_slice())), None)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(storage.list_images().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_missing_file_on_disk_is_not_found() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    let record = storage
        .insert_image(None, "ghost-1.png", "/nonexistent/ghost-1.png")
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/img/{}", record.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Image file missing on server disk.");
}

#[actix_rt::test]
async fn test_non_numeric_image_id_uses_envelope() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    let req = test::TestRequest::get().uri("/img/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 1004);
}

#[actix_rt::test]
async fn test_truncated_title_field_is_rejected() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    // title 字段没有结束边界
    let body = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHeadsh",
        BOUNDARY
    )
    .into_bytes();
    let resp = test::call_service(&app, upload_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1020);
    assert!(storage.list_images().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_static_path_traversal_rejected() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    let req = test::TestRequest::get()
        .uri("/uploads/..%2Ffiles_test.db")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

#[actix_rt::test]
async fn test_admin_listing_requires_admin_role() {
    let (storage, images, _td) = create_context().await;
    let app = init_app!(storage, images);

    let req = test::TestRequest::get().uri("/admin/images").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/admin/images")
        .insert_header(("Authorization", format!("Bearer {}", token("user"))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Access denied: admins only");

    let req = test::TestRequest::get()
        .uri("/admin/images")
        .insert_header(("Authorization", format!("Bearer {}", token("admin"))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["admin"], "admin@example.com");
    assert_eq!(body["data"]["images"], serde_json::json!([]));
}
