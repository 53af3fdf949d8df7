use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum ResumeTrackError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Serialization(String),
    Configuration(String),
}

impl ResumeTrackError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ResumeTrackError::DatabaseConfig(_) => "E001",
            ResumeTrackError::DatabaseConnection(_) => "E002",
            ResumeTrackError::DatabaseOperation(_) => "E003",
            ResumeTrackError::FileOperation(_) => "E004",
            ResumeTrackError::Validation(_) => "E005",
            ResumeTrackError::NotFound(_) => "E006",
            ResumeTrackError::Unauthorized(_) => "E007",
            ResumeTrackError::Forbidden(_) => "E008",
            ResumeTrackError::Serialization(_) => "E009",
            ResumeTrackError::Configuration(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ResumeTrackError::DatabaseConfig(_) => "Database Configuration Error",
            ResumeTrackError::DatabaseConnection(_) => "Database Connection Error",
            ResumeTrackError::DatabaseOperation(_) => "Database Operation Error",
            ResumeTrackError::FileOperation(_) => "File Operation Error",
            ResumeTrackError::Validation(_) => "Validation Error",
            ResumeTrackError::NotFound(_) => "Resource Not Found",
            ResumeTrackError::Unauthorized(_) => "Unauthorized",
            ResumeTrackError::Forbidden(_) => "Forbidden",
            ResumeTrackError::Serialization(_) => "Serialization Error",
            ResumeTrackError::Configuration(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ResumeTrackError::DatabaseConfig(msg)
            | ResumeTrackError::DatabaseConnection(msg)
            | ResumeTrackError::DatabaseOperation(msg)
            | ResumeTrackError::FileOperation(msg)
            | ResumeTrackError::Validation(msg)
            | ResumeTrackError::NotFound(msg)
            | ResumeTrackError::Unauthorized(msg)
            | ResumeTrackError::Forbidden(msg)
            | ResumeTrackError::Serialization(msg)
            | ResumeTrackError::Configuration(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            ResumeTrackError::Validation(_) => StatusCode::BAD_REQUEST,
            ResumeTrackError::NotFound(_) => StatusCode::NOT_FOUND,
            ResumeTrackError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ResumeTrackError::Forbidden(_) => StatusCode::FORBIDDEN,
            ResumeTrackError::DatabaseConfig(_)
            | ResumeTrackError::DatabaseConnection(_)
            | ResumeTrackError::DatabaseOperation(_)
            | ResumeTrackError::FileOperation(_)
            | ResumeTrackError::Serialization(_)
            | ResumeTrackError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为存储层错误
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            ResumeTrackError::DatabaseConnection(_) | ResumeTrackError::DatabaseOperation(_)
        )
    }

    /// 格式化为彩色输出（用于启动失败时打印到终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ResumeTrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ResumeTrackError {}

// 便捷的构造函数
impl ResumeTrackError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::Unauthorized(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::Forbidden(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::Serialization(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        ResumeTrackError::Configuration(msg.into())
    }
}

impl From<sea_orm::DbErr> for ResumeTrackError {
    fn from(err: sea_orm::DbErr) -> Self {
        ResumeTrackError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ResumeTrackError {
    fn from(err: std::io::Error) -> Self {
        ResumeTrackError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ResumeTrackError {
    fn from(err: serde_json::Error) -> Self {
        ResumeTrackError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ResumeTrackError>;
