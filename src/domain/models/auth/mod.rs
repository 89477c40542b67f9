//! 인증 관련 도메인 모델

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::AuthenticatedUser;
pub use authentication_request::RequiredRole;
