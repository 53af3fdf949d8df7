//! 客户端 IP 提取
//!
//! 优先级：X-Forwarded-For 第一个地址 → X-Real-IP → 连接地址 → 127.0.0.1

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// 无法获取任何地址时的兜底值
pub const FALLBACK_IP: &str = "127.0.0.1";

/// 从 HttpRequest 提取客户端 IP（尽力而为，不做可信代理校验）
pub fn client_ip(req: &HttpRequest) -> String {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| FALLBACK_IP.to_string())
}

/// 从 HeaderMap 提取转发的 IP（X-Forwarded-For 或 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    // 优先 X-Forwarded-For（取第一个，即原始客户端 IP）
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            // 其次 X-Real-IP
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_used_without_forwarded_for() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req), "198.51.100.2");
    }

    #[test]
    fn test_peer_addr_then_fallback() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:51234".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req), "192.0.2.10");

        let req = TestRequest::default().to_http_request();
        assert_eq!(client_ip(&req), FALLBACK_IP);
    }

    #[test]
    fn test_blank_forwarded_for_is_ignored() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", " "))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req), "198.51.100.2");
    }
}
