//! 사용자 관리 서비스 모듈
//!
//! 사용자 조회(관리자용 목록, 본인 프로필)와 시드 가져오기를 제공합니다.
//!
//! ```rust,ignore
//! let records = read_seed_file(Path::new("sample/ACAMS.user.json"))?;
//! let report = state.users.seed(records).await?;
//! ```

pub mod user_service;

pub use user_service::*;
