//! 서버, 저장소, 실행 환경 설정 관리 모듈
//!
//! 이 값들은 `config.ini`가 아닌 환경 변수(`.env.<profile>` 포함)에서만 읽습니다.

use std::env;
use std::path::PathBuf;

use crate::core::errors::{AppError, AppResult};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_name(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다. (대소문자 무관)
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 개발/테스트처럼 기본 비밀키를 허용하는 환경인지 확인합니다.
    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "127.0.0.1"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// 워커 스레드 수. 기본값: 4
    pub fn workers() -> usize {
        env::var("WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
            .filter(|w| *w > 0)
            .unwrap_or(4)
    }

    /// CORS 허용 Origin 목록 (`CORS_ALLOWED_ORIGINS`, 쉼표 구분)
    pub fn cors_allowed_origins() -> Vec<String> {
        let raw = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

        raw.split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 데이터 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// MongoDB + Redis
    MongoDb,
    /// 프로세스 메모리 (로컬 개발, 데모, 테스트)
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            "memory" | "in-memory" | "inmemory" => Ok(StorageBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "STORAGE_BACKEND must be 'mongodb' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// 저장소 관련 설정
pub struct StorageConfig;

impl StorageConfig {
    /// `STORAGE_BACKEND` (기본값: mongodb)
    pub fn backend() -> AppResult<StorageBackend> {
        env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "mongodb".to_string())
            .parse()
    }

    /// `REDIS_URL` (기본값: redis://localhost:6379)
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// 메모리 저장소 시작 시 가져올 시드 파일 (`SEED_FILE`)
    pub fn seed_file() -> Option<PathBuf> {
        env::var("SEED_FILE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("DEV"), Environment::Development);
        assert_eq!(Environment::from_name("test"), Environment::Test);
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
    }

    #[test]
    fn test_local_environments() {
        assert!(Environment::Development.is_local());
        assert!(Environment::Test.is_local());
        assert!(!Environment::Staging.is_local());
        assert!(!Environment::Production.is_local());
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("mongodb".parse::<StorageBackend>().unwrap(), StorageBackend::MongoDb);
        assert_eq!(" Memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!(matches!(
            "postgres".parse::<StorageBackend>(),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("WORKERS").is_err() {
            assert_eq!(ServerConfig::workers(), 4);
        }
    }
}
