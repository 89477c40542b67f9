//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 생성, 검증을 담당합니다.
//! 서명 알고리즘(HS256/HS384/HS512)과 수명은 [`JwtSettings`]에서 읽습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};

const CREDENTIALS_ERROR: &str = "Could not validate credentials";

/// JWT 토큰 관리 서비스
///
/// 토큰 클레임의 `sub`는 사용자명, `role`은 사용자 역할입니다.
/// 모든 토큰은 고유한 `jti`(UUID v4)를 가지므로 같은 초에 발급된 토큰도 서로 다릅니다.
#[derive(Debug, Clone)]
pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    pub fn generate_access_token(&self, user: &User) -> AppResult<String> {
        self.generate_token(user, TokenType::Access, self.settings.access_token_minutes())
    }

    /// 사용자를 위한 리프레시 토큰 생성
    pub fn generate_refresh_token(&self, user: &User) -> AppResult<String> {
        self.generate_token(user, TokenType::Refresh, self.settings.refresh_token_minutes())
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// ```rust,ignore
    /// let pair = token_service.generate_token_pair(&user)?;
    /// println!("Expires in: {} seconds", pair.expires_in);
    /// ```
    pub fn generate_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user)?,
            refresh_token: self.generate_refresh_token(user)?,
            expires_in: self.settings.access_token_minutes() * 60,
            refresh_expires_in: self.settings.refresh_token_minutes() * 60,
        })
    }

    fn generate_token(&self, user: &User, token_type: TokenType, minutes: i64) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(minutes);

        let claims = TokenClaims {
            sub: Some(user.username.clone()),
            role: Some(user.role),
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        self.encode_claims(&claims)
    }

    /// 클레임을 설정된 알고리즘으로 서명합니다.
    pub fn encode_claims(&self, claims: &TokenClaims) -> AppResult<String> {
        let header = Header::new(self.settings.algorithm());

        encode(&header, claims, &self.settings.encoding_key())
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 서명, 만료 시각, 토큰 종류를 모두 확인합니다.
    /// 리프레시 토큰을 액세스 토큰 자리에 넣는 경우(또는 그 반대)도 401입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 잘못된 서명/형식, 토큰 종류 불일치
    pub fn verify_token(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let validation = Validation::new(self.settings.algorithm());

        let claims = decode::<TokenClaims>(token, &self.settings.decoding_key(), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token has expired".to_string())
                }
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError(CREDENTIALS_ERROR.to_string())
                }
            })?;

        if claims.token_type != expected {
            log::debug!(
                "토큰 종류 불일치 - 기대: {:?}, 실제: {:?}",
                expected,
                claims.token_type
            );
            return Err(AppError::AuthenticationError(CREDENTIALS_ERROR.to_string()));
        }

        Ok(claims)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// 스킴 이름은 대소문자를 구분하지 않습니다.
    ///
    /// ```rust,ignore
    /// let token = token_service.extract_bearer_token("Bearer eyJhbGciOi...")?;
    /// ```
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        let (scheme, token) = auth_header
            .trim()
            .split_once(' ')
            .ok_or_else(|| AppError::AuthenticationError(CREDENTIALS_ERROR.to_string()))?;

        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AppError::AuthenticationError(CREDENTIALS_ERROR.to_string()));
        }

        Ok(token)
    }
}
