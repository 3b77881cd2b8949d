//! Item endpoint tests.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::helpers::{JPEG, TestApp, encode};

async fn seed_category(app: &TestApp) {
    let res = app
        .post("/api/categories", json!({ "name": "Books", "description": "" }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
}

async fn create_dune(app: &TestApp) {
    let res = app
        .multipart(
            Method::POST,
            "/api/items",
            &[("title", "Dune"), ("category_id", "1")],
            Some(JPEG),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_item_with_local_image_is_listed_and_served() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    seed_category(&app).await;

    let created = app
        .multipart(
            Method::POST,
            "/api/items",
            &[
                ("title", "Dune"),
                ("description", "Arrakis"),
                ("alt_text", "Dune cover"),
                ("category_id", "1"),
            ],
            Some(JPEG),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["message"], "Dune Item added successfully");

    let listed = app.get("/api/items").await;
    assert_eq!(listed.body[0]["category"], "Books");
    assert_eq!(
        listed.body[0]["url"],
        "http://localhost:8000/static/item-images/1.jpg"
    );

    let served = app.get("/static/item-images/1.jpg").await;
    assert_eq!(served.status, StatusCode::OK);
    let stored = tokio::fs::read(app.store_dir().join("1.jpg"))
        .await
        .expect("stored image");
    assert_eq!(stored, JPEG);

    let by_category = app
        .get(&format!("/api/items/count?filter={}", encode(r#"{"category":"book"}"#)))
        .await;
    assert_eq!(by_category.body["count"], 1);
}

#[tokio::test]
async fn test_request_naming_a_server_file_publishes_nothing() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    seed_category(&app).await;

    let as_json = app
        .post(
            "/api/items",
            json!({ "title": "Leak", "image_path": "/etc/passwd", "category_id": 1 }),
        )
        .await;
    assert_eq!(as_json.status, StatusCode::BAD_REQUEST);

    let as_field = app
        .multipart(
            Method::POST,
            "/api/items",
            &[("title", "Leak"), ("category_id", "1"), ("image_path", "/etc/passwd")],
            None,
        )
        .await;
    assert_eq!(as_field.status, StatusCode::BAD_REQUEST);

    let count = app.get("/api/items/count").await;
    assert_eq!(count.body["count"], 0);
    let mut stored = tokio::fs::read_dir(app.store_dir()).await.expect("store dir");
    assert!(stored.next_entry().await.expect("entry").is_none());
}

#[tokio::test]
async fn test_failed_upload_reports_bad_gateway_and_writes_nothing() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    seed_category(&app).await;
    tokio::fs::remove_dir_all(app.store_dir())
        .await
        .expect("remove store");

    let res = app
        .multipart(
            Method::POST,
            "/api/items",
            &[("title", "Ghost"), ("category_id", "1")],
            Some(JPEG),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["origin"], "item_service::add_item");

    let count = app.get("/api/items/count").await;
    assert_eq!(count.body["count"], 0);
}

#[tokio::test]
async fn test_update_and_delete_item() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    seed_category(&app).await;
    create_dune(&app).await;

    let updated = app
        .put("/api/items/1", json!({ "title": "Dune Messiah", "description": "Book two" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let image_res = app
        .multipart(
            Method::PUT,
            "/api/items/1/image",
            &[("alt_text", "New cover")],
            Some(b"\xFF\xD8\xFF second cover"),
        )
        .await;
    assert_eq!(image_res.status, StatusCode::OK);
    assert_eq!(image_res.body["message"], "Image updated successfully");

    let missing_part = app
        .multipart(Method::PUT, "/api/items/1/image", &[], None)
        .await;
    assert_eq!(missing_part.status, StatusCode::BAD_REQUEST);

    let detail = app.get("/api/items/1").await;
    assert_eq!(detail.body[0]["title"], "Dune Messiah");
    assert_eq!(detail.body.as_array().map(Vec::len), Some(2));

    let deleted = app.delete("/api/items/1").await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Item Deleted Successfully.");

    let again = app.delete("/api/items/1").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
