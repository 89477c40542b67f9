//! 통합 테스트 공용 도우미
//!
//! 메모리 저장소 위에 전체 라우트 테이블을 올립니다.
#![allow(dead_code)]

use acsams::config::JwtSettings;
use acsams::core::state::AppState;
use acsams::domain::dto::users::SeedUserRecord;
use acsams::repositories::Repositories;
use jsonwebtoken::Algorithm;
use serde_json::json;

pub const ADMIN: (&str, &str) = ("admin", "admin-pw");
pub const ALICE: (&str, &str) = ("alice", "alice-pw");
pub const BOB: (&str, &str) = ("bob", "bob-pw");

/// 전체 라우트를 등록한 테스트 서비스를 만듭니다.
///
/// ```rust,ignore
/// let app = init_app!(state);
/// ```
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(acsams::routes::configure_all_routes),
        )
        .await
    };
}

/// admin, alice, bob 세 계정이 있는 상태
pub async fn seeded_state() -> AppState {
    let state = AppState::with_bcrypt_cost(
        Repositories::in_memory(),
        JwtSettings::new("integration-test-secret", Algorithm::HS256, 15, 120),
        4,
    );

    let records: Vec<SeedUserRecord> = serde_json::from_value(json!([
        { "username": ADMIN.0, "password": ADMIN.1, "role": "admin" },
        { "username": ALICE.0, "password": ALICE.1, "role": "user" },
        { "username": BOB.0, "password": BOB.1, "role": "user" },
    ]))
    .expect("seed records");

    state.users.seed(records).await.expect("seed users");
    state
}

/// 액세스 토큰만 필요할 때 HTTP를 거치지 않고 로그인합니다.
pub async fn access_token(state: &AppState, (username, password): (&str, &str)) -> String {
    state
        .auth
        .login(username, password)
        .await
        .expect("login")
        .access_token
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub async fn user_id(state: &AppState, username: &str) -> String {
    state
        .users
        .get_user_by_username(username)
        .await
        .expect("user exists")
        .id
}
