//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::ResumeTrackError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 存储错误
/// - 5000-5099: 配置错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    FileTooLarge = 1011,
    InvalidMultipartData = 1020,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    TokenExpired = 2001,
    TokenInvalid = 2002,

    // 存储错误 3000-3099
    DatabaseError = 3000,
    FileError = 3001,

    // 配置错误 5000-5099
    ConfigurationError = 5000,
}

impl From<&ResumeTrackError> for ErrorCode {
    fn from(err: &ResumeTrackError) -> Self {
        match err {
            ResumeTrackError::Validation(_) => ErrorCode::BadRequest,
            ResumeTrackError::NotFound(_) => ErrorCode::NotFound,
            ResumeTrackError::Unauthorized(_) => ErrorCode::Unauthorized,
            ResumeTrackError::Forbidden(_) => ErrorCode::Forbidden,
            ResumeTrackError::DatabaseConfig(_)
            | ResumeTrackError::DatabaseConnection(_)
            | ResumeTrackError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            ResumeTrackError::FileOperation(_) => ErrorCode::FileError,
            ResumeTrackError::Configuration(_) => ErrorCode::ConfigurationError,
            ResumeTrackError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::TokenExpired).unwrap(), "2001");
        let code: ErrorCode = serde_json::from_str("1004").unwrap();
        assert_eq!(code, ErrorCode::NotFound);
    }

    #[test]
    fn test_from_error() {
        let err = ResumeTrackError::database_operation("locked");
        assert_eq!(ErrorCode::from(&err), ErrorCode::DatabaseError);
        let err = ResumeTrackError::validation("resumeId is required");
        assert_eq!(ErrorCode::from(&err), ErrorCode::BadRequest);
    }
}
