//! # Authentication Configuration Module
//!
//! JWT 서명과 토큰 수명 설정을 관리합니다.
//! 값은 `config.ini`의 `[AUTHORIZATION]` 섹션에서 읽고, 같은 이름의
//! 환경 변수가 있으면 그 값을 사용합니다.
//!
//! | 키 | 기본값 | 설명 |
//! |----|--------|------|
//! | `SECRET_KEY` | (개발/테스트 환경만 기본값 허용) | HMAC 서명 키 |
//! | `ALGORITHM` | `HS256` | `HS256`, `HS384`, `HS512` |
//! | `ACCESS_TOKEN_EXPIRE_MINUTES` | `15` | 액세스 토큰 수명 |
//! | `REFRESH_TOKEN_EXPIRE_MINUTES` | `120` | 리프레시 토큰 수명 |
//!
//! ```bash
//! # 안전한 키 생성
//! openssl rand -hex 32
//! ```

use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::config::app_config::Environment;
use crate::config::file_config::ConfigFile;
use crate::core::errors::{AppError, AppResult};

const SECTION: &str = "AUTHORIZATION";
const DEVELOPMENT_SECRET: &str = "acsams-development-secret-do-not-use-in-production";

/// 기본 액세스 토큰 수명 (분)
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 15;

/// 기본 리프레시 토큰 수명 (분)
pub const DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES: i64 = 120;

/// JWT 설정
///
/// 서명 키는 `Debug` 출력에 포함되지 않습니다.
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    algorithm: Algorithm,
    access_token_minutes: i64,
    refresh_token_minutes: i64,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_minutes", &self.refresh_token_minutes)
            .finish()
    }
}

impl JwtSettings {
    pub fn new(
        secret: impl Into<String>,
        algorithm: Algorithm,
        access_token_minutes: i64,
        refresh_token_minutes: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            access_token_minutes,
            refresh_token_minutes,
        }
    }

    /// 설정 파일과 환경 변수에서 JWT 설정을 구성합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError` - 개발/테스트가 아닌 환경에서 `SECRET_KEY` 누락,
    ///   지원하지 않는 `ALGORITHM`, 0 이하 또는 숫자가 아닌 수명 값
    pub fn from_file(file: &ConfigFile, environment: &Environment) -> AppResult<Self> {
        let secret = match file.value(SECTION, "SECRET_KEY") {
            Some(secret) => secret,
            None if environment.is_local() => {
                log::warn!("SECRET_KEY not set, using development default (not secure for production!)");
                DEVELOPMENT_SECRET.to_string()
            }
            None => {
                return Err(AppError::ConfigError(
                    "SECRET_KEY must be set outside development".to_string(),
                ));
            }
        };

        let algorithm = match file.value(SECTION, "ALGORITHM") {
            Some(name) => Self::parse_algorithm(&name)?,
            None => Algorithm::HS256,
        };

        let access_token_minutes = file
            .parsed::<i64>(SECTION, "ACCESS_TOKEN_EXPIRE_MINUTES")?
            .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES);
        let refresh_token_minutes = file
            .parsed::<i64>(SECTION, "REFRESH_TOKEN_EXPIRE_MINUTES")?
            .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES);

        if access_token_minutes <= 0 || refresh_token_minutes <= 0 {
            return Err(AppError::ConfigError(
                "token lifetimes must be positive minutes".to_string(),
            ));
        }

        Ok(Self::new(secret, algorithm, access_token_minutes, refresh_token_minutes))
    }

    /// HMAC 계열 알고리즘만 허용합니다.
    pub fn parse_algorithm(name: &str) -> AppResult<Algorithm> {
        let algorithm = Algorithm::from_str(name.trim().to_uppercase().as_str())
            .map_err(|_| AppError::ConfigError(format!("unknown JWT algorithm '{}'", name)))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            other => Err(AppError::ConfigError(format!(
                "JWT algorithm {:?} needs a key pair; use HS256, HS384 or HS512",
                other
            ))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn access_token_minutes(&self) -> i64 {
        self.access_token_minutes
    }

    pub fn refresh_token_minutes(&self) -> i64 {
        self.refresh_token_minutes
    }

    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}
