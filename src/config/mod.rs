//! # Configuration Module
//!
//! 서비스 설정을 한곳에서 구성합니다.
//!
//! ## 모듈 구성
//!
//! - [`file_config`] - `config.ini` 로더 (환경 변수 우선)
//! - [`app_config`] - 실행 환경, 서버, 저장소, bcrypt 설정 (환경 변수)
//! - [`auth_config`] - JWT 서명/수명 설정
//!
//! ## 우선순위
//!
//! 1. 프로세스 환경 변수 (`.env.<profile>` 파일로 주입된 값 포함)
//! 2. `config.ini` 의 해당 섹션
//! 3. `config.ini` 의 다른 섹션
//! 4. 기본값
//!
//! ```rust,ignore
//! use acsams::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("{} / {}", config.mongo.url, config.mongo.database);
//! ```

pub mod app_config;
pub mod auth_config;
pub mod file_config;

pub use app_config::*;
pub use auth_config::*;
pub use file_config::*;

use crate::core::errors::AppResult;

/// 기본 MongoDB 주소
pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017/";

/// 기본 데이터베이스 이름
pub const DEFAULT_MONGODB_DATABASE: &str = "ACSAMS";

/// `[MONGODB]` 섹션 설정
#[derive(Debug, Clone, PartialEq)]
pub struct MongoSettings {
    pub url: String,
    pub database: String,
}

impl MongoSettings {
    pub fn from_file(file: &ConfigFile) -> Self {
        Self {
            url: file
                .value("MONGODB", "MONGODB_URL")
                .unwrap_or_else(|| DEFAULT_MONGODB_URL.to_string()),
            database: file
                .value("MONGODB", "MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
        }
    }
}

/// `config.ini` 기반 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub mongo: MongoSettings,
    pub jwt: JwtSettings,
}

impl AppConfig {
    /// 기본 경로의 `config.ini`와 환경 변수에서 설정을 읽습니다.
    pub fn load() -> AppResult<Self> {
        let file = ConfigFile::load_default()?;
        Self::from_file(&file, Environment::current())
    }

    pub fn from_file(file: &ConfigFile, environment: Environment) -> AppResult<Self> {
        let jwt = JwtSettings::from_file(file, &environment)?;

        Ok(Self {
            mongo: MongoSettings::from_file(file),
            jwt,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_settings_defaults() {
        if std::env::var("MONGODB_URL").is_ok() || std::env::var("MONGODB_DATABASE").is_ok() {
            return;
        }

        let settings = MongoSettings::from_file(&ConfigFile::default());

        assert_eq!(settings.url, "mongodb://localhost:27017/");
        assert_eq!(settings.database, "ACSAMS");
    }

    #[test]
    fn test_app_config_from_file() {
        let file = ConfigFile::parse(
            "[MONGODB]\nMONGODB_URL = mongodb://mongo:27017/\nMONGODB_DATABASE = ACSAMS\n[AUTHORIZATION]\nSECRET_KEY = abc\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&file, Environment::Test).unwrap();

        assert_eq!(config.environment, Environment::Test);
        if std::env::var("MONGODB_URL").is_err() {
            assert_eq!(config.mongo.url, "mongodb://mongo:27017/");
        }
    }
}
