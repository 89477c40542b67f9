//! `config.ini` 로더
//!
//! 저장소 루트의 `config.ini`를 읽어 섹션/키 단위로 값을 조회합니다.
//! 같은 이름의 환경 변수가 있으면 파일 값보다 우선합니다.
//!
//! ```ini
//! [MONGODB]
//! MONGODB_URL = mongodb://localhost:27017/
//! MONGODB_DATABASE = ACSAMS
//!
//! [AUTHORIZATION]
//! SECRET_KEY = change-me
//! ALGORITHM = HS256
//! ACCESS_TOKEN_EXPIRE_MINUTES = 15
//! REFRESH_TOKEN_EXPIRE_MINUTES = 120
//! ```

use std::env;
use std::path::Path;

use ini::Ini;
use log::{info, warn};

use crate::core::errors::{AppError, AppResult};

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_PATH_ENV: &str = "ACSAMS_CONFIG";

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "config.ini";

/// 파싱된 `config.ini`
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    ini: Ini,
}

impl ConfigFile {
    /// `ACSAMS_CONFIG` 또는 `config.ini`에서 설정을 읽습니다.
    pub fn load_default() -> AppResult<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }

    /// 지정한 경로의 설정 파일을 읽습니다.
    ///
    /// 파일이 없으면 빈 설정으로 시작하고 환경 변수와 기본값만 사용합니다.
    /// 파일은 있지만 형식이 잘못된 경우 `ConfigError`를 반환합니다.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            warn!("⚠️ 설정 파일 없음: {} (환경 변수와 기본값 사용)", path.display());
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)
            .map_err(|e| AppError::ConfigError(format!("{}: {}", path.display(), e)))?;

        info!("📄 설정 파일 로드됨: {}", path.display());
        Ok(Self { ini })
    }

    /// 문자열에서 설정을 파싱합니다.
    pub fn parse(content: &str) -> AppResult<Self> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        Ok(Self { ini })
    }

    /// 파일에서만 값을 찾습니다.
    ///
    /// 지정한 섹션을 먼저 보고, 없으면 다른 모든 섹션에서 같은 키를 찾습니다.
    /// 빈 문자열은 값이 없는 것으로 취급합니다.
    pub fn lookup(&self, section: &str, key: &str) -> Option<String> {
        let in_section = self
            .ini
            .section(Some(section))
            .and_then(|props| props.get(key));

        in_section
            .or_else(|| self.ini.iter().find_map(|(_, props)| props.get(key)))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 환경 변수 → 설정 파일 순으로 값을 찾습니다.
    pub fn value(&self, section: &str, key: &str) -> Option<String> {
        env::var(key)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.lookup(section, key))
    }

    /// 값을 찾아 숫자로 파싱합니다. 형식이 잘못되면 `ConfigError`입니다.
    pub fn parsed<T>(&self, section: &str, key: &str) -> AppResult<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.value(section, key)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| AppError::ConfigError(format!("{} = {:?}: {}", key, raw, e)))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[MONGODB]
MONGODB_URL = mongodb://db.internal:27017/
MONGODB_DATABASE = ACSAMS_TEST

[AUTHORIZATION]
SECRET_KEY = unit-test-secret
ALGORITHM = HS512
ACCESS_TOKEN_EXPIRE_MINUTES = 5
"#;

    #[test]
    fn test_lookup_in_section() {
        let file = ConfigFile::parse(SAMPLE).unwrap();

        assert_eq!(
            file.lookup("MONGODB", "MONGODB_URL").as_deref(),
            Some("mongodb://db.internal:27017/")
        );
        assert_eq!(file.lookup("AUTHORIZATION", "ALGORITHM").as_deref(), Some("HS512"));
    }

    #[test]
    fn test_lookup_falls_back_to_any_section() {
        let file = ConfigFile::parse(SAMPLE).unwrap();

        assert_eq!(
            file.lookup("AUTHORIZATION", "MONGODB_DATABASE").as_deref(),
            Some("ACSAMS_TEST")
        );
        assert_eq!(file.lookup("MONGODB", "NOT_THERE"), None);
    }

    #[test]
    fn test_empty_value_is_missing() {
        let file = ConfigFile::parse("[AUTHORIZATION]\nSECRET_KEY =\n").unwrap();

        assert_eq!(file.lookup("AUTHORIZATION", "SECRET_KEY"), None);
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let file = ConfigFile::load(Path::new("/nonexistent/acsams/config.ini")).unwrap();

        assert_eq!(file.lookup("MONGODB", "MONGODB_URL"), None);
    }
}
