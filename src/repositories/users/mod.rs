//! 사용자 데이터 액세스 계층 (MongoDB)

pub mod user_repo;

pub use user_repo::MongoUserRepository;
