//! 권한 데이터 액세스 계층 (MongoDB)

pub mod permission_repo;

pub use permission_repo::MongoPermissionRepository;
