//! 플랜 데이터 액세스 계층 (MongoDB)

pub mod plan_repo;

pub use plan_repo::MongoPlanRepository;
