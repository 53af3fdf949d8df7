use std::collections::HashSet;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Bearer Token Claims
///
/// Tokens come from an external login provider. The user id is carried in
/// either `id` or `sub`; `exp` is checked only when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// 已认证用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Token 校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// No signing secret configured
    MissingSecret,
    Expired,
    Invalid,
}

/// JWT Service for validating bearer tokens (HS256)
pub struct JwtService {
    keys: Option<(EncodingKey, DecodingKey)>,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let keys = (!secret.is_empty()).then(|| {
            (
                EncodingKey::from_secret(secret.as_bytes()),
                DecodingKey::from_secret(secret.as_bytes()),
            )
        });

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;

        Self { keys, validation }
    }

    /// Create JwtService from config
    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        if config.auth.access_token_secret.is_empty() {
            tracing::warn!("auth.access_token_secret is empty, protected routes will answer 500");
        }
        Self::new(&config.auth.access_token_secret)
    }

    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    /// 校验 token 并解析出用户
    pub fn verify(&self, token: &str) -> Result<AuthUser, TokenError> {
        let (_, decoding_key) = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;

        let data = decode::<UserClaims>(token, decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        let claims = data.claims;
        let id = claims
            .id
            .or(claims.sub)
            .filter(|id| !id.is_empty())
            .ok_or(TokenError::Invalid)?;

        Ok(AuthUser {
            id,
            email: claims.email,
            role: claims.role.unwrap_or_else(|| "user".to_string()),
        })
    }

    /// 签发 token（用于联调与测试）
    pub fn sign(&self, claims: &UserClaims) -> Result<String, TokenError> {
        let (encoding_key, _) = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;
        encode(&Header::new(Algorithm::HS256), claims, encoding_key).map_err(|_| TokenError::Invalid)
    }
}
