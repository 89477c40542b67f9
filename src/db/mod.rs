//! Database Connection Management Module
//!
//! MongoDB 연결 관리를 담당하는 모듈입니다.
//! 연결 정보는 `config.ini`의 `[MONGODB]` 섹션(`MONGODB_URL`, `MONGODB_DATABASE`)에서 옵니다.
//!
//! ```rust,ignore
//! use acsams::config::AppConfig;
//! use acsams::db::Database;
//!
//! let config = AppConfig::load()?;
//! let database = Database::connect(&config.mongo).await?;
//! let users = database.get_database().collection::<User>("users");
//! ```

use log::info;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, options::ClientOptions};

use crate::config::MongoSettings;
use crate::core::errors::AppResult;

/// `users` 컬렉션 이름
pub const USERS_COLLECTION: &str = "users";
/// `permissions` 컬렉션 이름
pub const PERMISSIONS_COLLECTION: &str = "permissions";
/// `plans` 컬렉션 이름
pub const PLANS_COLLECTION: &str = "plans";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 데이터베이스 연결 래퍼
///
/// 드라이버의 `Client`가 내부적으로 커넥션 풀을 가지므로 복제해서 공유합니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 새 MongoDB 연결을 만들고 `ping`으로 확인합니다.
    pub async fn connect(settings: &MongoSettings) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&settings.url).await?;

        // 애플리케이션 이름 설정 (서버 측 로그에서 식별용)
        client_options.app_name = Some("acsams".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&settings.database)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", settings.database);

        Ok(Self {
            client,
            database_name: settings.database.clone(),
        })
    }

    /// MongoDB 데이터베이스 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}

/// 유니크 인덱스 위반(E11000) 여부
///
/// `insert_one`은 쓰기 에러로, `find_one_and_update`는 명령 에러로 돌려줍니다.
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{Document, doc, from_document};
    use mongodb::error::{CommandError, Error, WriteError};

    use super::*;

    fn command_error(fields: Document) -> Error {
        let command_error: CommandError = from_document(fields).unwrap();
        Error::from(ErrorKind::Command(command_error))
    }

    #[test]
    fn test_duplicate_key_from_find_and_modify() {
        let duplicate = command_error(doc! {
            "code": 11000,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error collection: ACSAMS.permissions index: endpoint_1",
        });
        assert!(is_duplicate_key(&duplicate));

        let other = command_error(doc! { "code": 2, "codeName": "BadValue", "errmsg": "bad" });
        assert!(!is_duplicate_key(&other));
    }

    #[test]
    fn test_duplicate_key_from_insert() {
        let write_error: WriteError =
            from_document(doc! { "code": 11000, "errmsg": "E11000 duplicate key error" }).unwrap();
        let error = Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)));

        assert!(is_duplicate_key(&error));
    }
}
