//! 관리자 권한/플랜/사용자 관리

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{ADMIN, ALICE, access_token, bearer, seeded_state, user_id};

#[actix_web::test]
async fn test_admin_scope_rejects_users() {
    let state = seeded_state().await;
    let user_token = access_token(&state, ALICE).await;
    let app = init_app!(state);

    let anonymous = test::TestRequest::get().uri("/admin/permissions").to_request();
    assert_eq!(test::call_service(&app, anonymous).await.status(), StatusCode::UNAUTHORIZED);

    let as_user = test::TestRequest::get()
        .uri("/admin/users")
        .insert_header(bearer(&user_token))
        .to_request();
    assert_eq!(test::call_service(&app, as_user).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_permission_lifecycle() {
    let state = seeded_state().await;
    let admin = access_token(&state, ADMIN).await;
    let app = init_app!(state);

    let create = test::TestRequest::post()
        .uri("/admin/permissions")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "Random one", "endpoint": "/random1", "description": "first" }))
        .to_request();
    let res = test::call_service(&app, create).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let permission: Value = test::read_body_json(res).await;
    let id = permission["id"].as_str().unwrap().to_string();
    assert_eq!(permission["endpoint"], "/random1");

    let duplicate = test::TestRequest::post()
        .uri("/admin/permissions")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "Again", "endpoint": "/random1" }))
        .to_request();
    assert_eq!(test::call_service(&app, duplicate).await.status(), StatusCode::CONFLICT);

    let unknown_endpoint = test::TestRequest::post()
        .uri("/admin/permissions")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "Bad", "endpoint": "/random9" }))
        .to_request();
    assert_eq!(test::call_service(&app, unknown_endpoint).await.status(), StatusCode::BAD_REQUEST);

    let update = test::TestRequest::put()
        .uri(&format!("/admin/permissions/{}", id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "description": "renamed", "name": null }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, update).await;
    assert_eq!(updated["description"], "renamed");
    assert_eq!(updated["name"], "Random one");

    let list = test::TestRequest::get()
        .uri("/admin/permissions")
        .insert_header(bearer(&admin))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let delete = test::TestRequest::delete()
        .uri(&format!("/admin/permissions/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::NO_CONTENT);

    let gone = test::TestRequest::get()
        .uri(&format!("/admin/permissions/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, gone).await.status(), StatusCode::NOT_FOUND);

    let malformed = test::TestRequest::get()
        .uri("/admin/permissions/not-an-object-id")
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, malformed).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_plan_locks_permission_and_subscription_locks_plan() {
    let state = seeded_state().await;
    let admin = access_token(&state, ADMIN).await;
    let alice_id = user_id(&state, ALICE.0).await;
    let app = init_app!(state.clone());

    let create = test::TestRequest::post()
        .uri("/admin/permissions")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "Random two", "endpoint": "/random2" }))
        .to_request();
    let permission: Value = test::call_and_read_body_json(&app, create).await;
    let permission_id = permission["id"].as_str().unwrap().to_string();

    let empty_plan = test::TestRequest::post()
        .uri("/admin/plans")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "empty", "apilimit": {} }))
        .to_request();
    assert_eq!(test::call_service(&app, empty_plan).await.status(), StatusCode::BAD_REQUEST);

    let dangling = test::TestRequest::post()
        .uri("/admin/plans")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "dangling", "apilimit": { "66a0f1c2e4b0a1b2c3d4e5ff": 1 } }))
        .to_request();
    assert_eq!(test::call_service(&app, dangling).await.status(), StatusCode::BAD_REQUEST);

    let create_plan = test::TestRequest::post()
        .uri("/admin/plans")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "basic", "description": "two calls", "apilimit": { &permission_id: 2 } }))
        .to_request();
    let res = test::call_service(&app, create_plan).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let plan: Value = test::read_body_json(res).await;
    let plan_id = plan["id"].as_str().unwrap().to_string();

    // 플랜이 참조 중인 권한
    let modify_permission = test::TestRequest::put()
        .uri(&format!("/admin/permissions/{}", permission_id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "changed" }))
        .to_request();
    assert_eq!(test::call_service(&app, modify_permission).await.status(), StatusCode::CONFLICT);

    let delete_permission = test::TestRequest::delete()
        .uri(&format!("/admin/permissions/{}", permission_id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, delete_permission).await.status(), StatusCode::CONFLICT);

    // 구독 전에는 플랜 수정 가능
    let rename = test::TestRequest::put()
        .uri(&format!("/admin/plans/{}", plan_id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "description": "still two calls" }))
        .to_request();
    assert_eq!(test::call_service(&app, rename).await.status(), StatusCode::OK);

    state.subscriptions.subscribe(&alice_id, &plan_id).await.unwrap();

    let modify_plan = test::TestRequest::put()
        .uri(&format!("/admin/plans/{}", plan_id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "premium" }))
        .to_request();
    assert_eq!(test::call_service(&app, modify_plan).await.status(), StatusCode::CONFLICT);

    let delete_plan = test::TestRequest::delete()
        .uri(&format!("/admin/plans/{}", plan_id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, delete_plan).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_admin_user_listing_hides_password_hashes() {
    let state = seeded_state().await;
    let admin = access_token(&state, ADMIN).await;
    let alice_id = user_id(&state, ALICE.0).await;
    let app = init_app!(state);

    let list = test::TestRequest::get()
        .uri("/admin/users")
        .insert_header(bearer(&admin))
        .to_request();
    let users: Value = test::call_and_read_body_json(&app, list).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    let one = test::TestRequest::get()
        .uri(&format!("/admin/users/{}", alice_id))
        .insert_header(bearer(&admin))
        .to_request();
    let alice: Value = test::call_and_read_body_json(&app, one).await;
    assert_eq!(alice["username"], "alice");

    let not_subscribed = test::TestRequest::get()
        .uri(&format!("/admin/users/{}/usage", alice_id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, not_subscribed).await.status(), StatusCode::BAD_REQUEST);
}
