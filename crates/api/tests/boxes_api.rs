//! HTTP-level integration tests for `/boxes`, covering the ownership guard
//! chain shared by every owned collection.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{
    body_json, create_owned, delete_auth, get_auth, patch_json_auth, post_json_auth,
    post_raw_auth, register_and_login,
};
use movingday_core::resource::OwnedStore;
use movingday_db::models::moving_box::MovingBox;
use movingday_db::repositories::PgOwnedStore;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_box(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = register_and_login(&app, "kevin").await;

    let body = json!({
        "box_name": "Chili",
        "coming_from": "Kitchen",
        "inventory": ["pot", "ladle"],
        "unknown_field": "ignored",
    });
    let response = post_json_auth(app, "/api/v1/boxes", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[LOCATION].to_str().unwrap().to_string();
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(location, format!("/api/v1/boxes/{}", data["id"]));
    assert_eq!(data["user_id"], user_id);
    assert_eq!(data["box_name"], "Chili");
    assert_eq!(data["coming_from"], "Kitchen");
    assert_eq!(data["going_to"], serde_json::Value::Null);
    assert_eq!(data["inventory"], json!(["pot", "ladle"]));
    assert!(data["date_created"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_box_requires_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;

    for body in [json!({ "coming_from": "Kitchen" }), json!({ "box_name": "  " })] {
        let response = post_json_auth(app.clone(), "/api/v1/boxes", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Missing 'box_name' in request body"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_only_own_boxes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_and_login(&app, "alice").await;
    let (_, bob) = register_and_login(&app, "bob").await;

    create_owned(&app, "boxes", json!({ "box_name": "A1" }), &alice).await;
    create_owned(&app, "boxes", json!({ "box_name": "B1" }), &bob).await;
    create_owned(&app, "boxes", json!({ "box_name": "A2" }), &alice).await;

    let json = body_json(get_auth(app, "/api/v1/boxes", &alice).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["box_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A1", "A2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_for_new_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "newbie").await;

    let json = body_json(get_auth(app, "/api/v1/boxes", &token).await).await;
    assert_eq!(json["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Guard chain
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_foreign_box_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_and_login(&app, "alice").await;
    let (_, mallory) = register_and_login(&app, "mallory").await;
    let created = create_owned(&app, "boxes", json!({ "box_name": "Secret" }), &alice).await;

    let uri = format!("/api/v1/boxes/{}", created["id"]);
    let response = get_auth(app, &uri, &mallory).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Box belongs to a different user");
    assert!(json.get("data").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_box_is_not_found_for_every_operation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;

    let responses = [
        get_auth(app.clone(), "/api/v1/boxes/424242", &token).await,
        patch_json_auth(
            app.clone(),
            "/api/v1/boxes/424242",
            json!({ "box_name": "x" }),
            &token,
        )
        .await,
        patch_json_auth(app.clone(), "/api/v1/boxes/424242", json!({}), &token).await,
        delete_auth(app, "/api/v1/boxes/424242", &token).await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Box doesn't exist");
    }
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_changes_only_given_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;
    let created = create_owned(
        &app,
        "boxes",
        json!({ "box_name": "Books", "coming_from": "Den", "going_to": "Attic" }),
        &token,
    )
    .await;
    let uri = format!("/api/v1/boxes/{}", created["id"]);

    let response =
        patch_json_auth(app.clone(), &uri, json!({ "going_to": "Office" }), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["data"]["going_to"], "Office");
    assert_eq!(json["data"]["box_name"], "Books");
    assert_eq!(json["data"]["coming_from"], "Den");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_without_recognized_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;
    let created = create_owned(&app, "boxes", json!({ "box_name": "Books" }), &token).await;
    let uri = format!("/api/v1/boxes/{}", created["id"]);

    let body = json!({ "colour": "red", "box_notes": "" });
    let response = patch_json_auth(app, &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Request body must contain one of 'box_name', 'coming_from', 'going_to', \
         'getting_there', 'color_code', 'box_notes', or 'inventory'"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_update_and_delete_leave_row_untouched(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = register_and_login(&app, "alice").await;
    let (_, mallory) = register_and_login(&app, "mallory").await;
    let created = create_owned(&app, "boxes", json!({ "box_name": "Mine" }), &alice).await;
    let uri = format!("/api/v1/boxes/{}", created["id"]);

    let response =
        patch_json_auth(app.clone(), &uri, json!({ "box_name": "Stolen" }), &mallory).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, &uri, &mallory).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let store = PgOwnedStore::<MovingBox>::new(pool);
    let row = store
        .find_by_id(created["id"].as_i64().unwrap())
        .await
        .unwrap()
        .expect("row must survive");
    assert_eq!(row.box_name, "Mine");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_box(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;
    let created = create_owned(&app, "boxes", json!({ "box_name": "Trash" }), &token).await;
    let uri = format!("/api/v1/boxes/{}", created["id"]);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_box_text_escaped_on_read_but_stored_raw(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = register_and_login(&app, "kevin").await;

    let body = json!({
        "box_name": r#"<img src=x onerror="alert(1)">"#,
        "inventory": ["<b>mug</b>"],
    });
    let created = create_owned(&app, "boxes", body, &token).await;
    assert_eq!(
        created["box_name"],
        "&lt;img src=x onerror=&quot;alert(1)&quot;&gt;"
    );

    let uri = format!("/api/v1/boxes/{}", created["id"]);
    let json = body_json(get_auth(app.clone(), &uri, &token).await).await;
    assert_eq!(json["data"]["inventory"], json!(["&lt;b&gt;mug&lt;/b&gt;"]));

    let listed = body_json(get_auth(app, "/api/v1/boxes", &token).await).await;
    assert_eq!(listed["data"][0]["box_name"], created["box_name"]);

    let store = PgOwnedStore::<MovingBox>::new(pool);
    let row = store
        .find_by_id(created["id"].as_i64().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.box_name, r#"<img src=x onerror="alert(1)">"#);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_inventory_serializes_as_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;

    let created = create_owned(&app, "boxes", json!({ "box_name": "Empty" }), &token).await;
    assert_eq!(created["inventory"], json!([]));
}

// ---------------------------------------------------------------------------
// Mistyped bodies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mistyped_update_on_missing_box_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;

    let response = patch_json_auth(
        app,
        "/api/v1/boxes/424242",
        json!({ "box_name": 5 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Box doesn't exist");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mistyped_update_on_foreign_box_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, alice) = register_and_login(&app, "alice").await;
    let (_, mallory) = register_and_login(&app, "mallory").await;
    let created = create_owned(
        &app,
        "boxes",
        json!({ "box_name": "Mine", "inventory": ["lamp"] }),
        &alice,
    )
    .await;
    let uri = format!("/api/v1/boxes/{}", created["id"]);

    let response = patch_json_auth(app, &uri, json!({ "inventory": "x" }), &mallory).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Box belongs to a different user");

    let row = PgOwnedStore::<MovingBox>::new(pool)
        .find_by_id(created["id"].as_i64().unwrap())
        .await
        .unwrap()
        .expect("row must survive");
    assert_eq!(row.inventory, Some(vec!["lamp".to_string()]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mistyped_update_on_own_box_is_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;
    let created = create_owned(&app, "boxes", json!({ "box_name": "Books" }), &token).await;
    let uri = format!("/api/v1/boxes/{}", created["id"]);

    let response =
        patch_json_auth(app.clone(), &uri, json!({ "inventory": "x" }), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["data"]["inventory"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mistyped_or_malformed_create_is_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "kevin").await;

    let mistyped =
        post_json_auth(app.clone(), "/api/v1/boxes", json!({ "box_name": 5 }), &token).await;
    let malformed = post_raw_auth(app.clone(), "/api/v1/boxes", "{\"box_name\":", &token).await;

    for response in [mistyped, malformed] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let json = body_json(get_auth(app, "/api/v1/boxes", &token).await).await;
    assert_eq!(json["data"], json!([]));
}
