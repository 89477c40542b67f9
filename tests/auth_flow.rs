//! 로그인, 토큰 회전, 로그아웃, 역할 검사

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{ADMIN, ALICE, access_token, bearer, seeded_state};

#[actix_web::test]
async fn test_public_endpoints() {
    let app = init_app!(seeded_state().await);

    let hello: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/hello").to_request()).await;
    assert_eq!(hello, json!("Hello World"));

    let data: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/data").to_request()).await;
    assert_eq!(data["data"], "This is important data");

    let health: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(health["status"], "healthy");

    let docs = test::call_service(&app, test::TestRequest::get().uri("/docs").to_request()).await;
    assert_eq!(docs.status(), StatusCode::OK);

    let openapi: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/openapi.json").to_request(),
    )
    .await;
    assert!(openapi["paths"]["/token"].is_object());
}

#[actix_web::test]
async fn test_login_with_form() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri("/token")
        .set_form([("username", ALICE.0), ("password", ALICE.1)])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));

    let me = test::TestRequest::get()
        .uri("/me")
        .insert_header(bearer(body["access_token"].as_str().unwrap()))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, me).await;
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["role"], "user");
    assert!(profile.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_login_failures() {
    let app = init_app!(seeded_state().await);

    let wrong_password = test::TestRequest::post()
        .uri("/token")
        .set_form([("username", ALICE.0), ("password", "nope")])
        .to_request();
    let res = test::call_service(&app, wrong_password).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("Incorrect username or password"));

    let unknown_user = test::TestRequest::post()
        .uri("/token")
        .set_form([("username", "mallory"), ("password", "x")])
        .to_request();
    assert_eq!(test::call_service(&app, unknown_user).await.status(), StatusCode::BAD_REQUEST);

    let missing_field = test::TestRequest::post()
        .uri("/token")
        .set_form([("username", ALICE.0)])
        .to_request();
    assert_eq!(test::call_service(&app, missing_field).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_protected_route_without_token() {
    let app = init_app!(seeded_state().await);

    let res = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers().get("www-authenticate").unwrap(), "Bearer");

    let garbage = test::TestRequest::get()
        .uri("/me")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    assert_eq!(test::call_service(&app, garbage).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_token_rotates_once() {
    let state = seeded_state().await;
    let pair = state.auth.login(ALICE.0, ALICE.1).await.unwrap();
    let app = init_app!(state);

    let first = test::TestRequest::post()
        .uri("/refresh")
        .insert_header(bearer(&pair.refresh_token))
        .to_request();
    let res = test::call_service(&app, first).await;
    assert_eq!(res.status(), StatusCode::OK);
    let rotated: Value = test::read_body_json(res).await;
    assert_ne!(rotated["refresh_token"], json!(pair.refresh_token));

    let replay = test::TestRequest::post()
        .uri("/refresh")
        .insert_header(bearer(&pair.refresh_token))
        .to_request();
    assert_eq!(test::call_service(&app, replay).await.status(), StatusCode::UNAUTHORIZED);

    let with_body = test::TestRequest::post()
        .uri("/refresh")
        .set_json(json!({ "refresh_token": rotated["refresh_token"] }))
        .to_request();
    assert_eq!(test::call_service(&app, with_body).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_access_token_is_not_a_refresh_token() {
    let state = seeded_state().await;
    let access = access_token(&state, ALICE).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/refresh")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let no_token = test::TestRequest::post().uri("/refresh").to_request();
    assert_eq!(test::call_service(&app, no_token).await.status(), StatusCode::UNAUTHORIZED);

    let malformed = test::TestRequest::post()
        .uri("/refresh")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"refresh_token\": 42}")
        .to_request();
    assert_eq!(test::call_service(&app, malformed).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_logout_revokes_refresh_token() {
    let state = seeded_state().await;
    let pair = state.auth.login(ALICE.0, ALICE.1).await.unwrap();
    let app = init_app!(state);

    let logout = test::TestRequest::post()
        .uri("/logout")
        .insert_header(bearer(&pair.refresh_token))
        .to_request();
    assert_eq!(test::call_service(&app, logout).await.status(), StatusCode::NO_CONTENT);

    let again = test::TestRequest::post()
        .uri("/logout")
        .insert_header(bearer(&pair.refresh_token))
        .to_request();
    assert_eq!(test::call_service(&app, again).await.status(), StatusCode::NO_CONTENT);

    let refresh = test::TestRequest::post()
        .uri("/refresh")
        .insert_header(bearer(&pair.refresh_token))
        .to_request();
    assert_eq!(test::call_service(&app, refresh).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_realdata_requires_admin() {
    let state = seeded_state().await;
    let user_token = access_token(&state, ALICE).await;
    let admin_token = access_token(&state, ADMIN).await;
    let app = init_app!(state);

    let as_user = test::TestRequest::get()
        .uri("/realdata")
        .insert_header(bearer(&user_token))
        .to_request();
    let res = test::call_service(&app, as_user).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("You don't have enough permissions"));

    let as_admin = test::TestRequest::get()
        .uri("/realdata")
        .insert_header(bearer(&admin_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, as_admin).await;
    assert_eq!(body["data"], "This is REALLY important data");
}
