//! Category endpoint tests.

use axum::http::StatusCode;
use axum::http::header::CONTENT_RANGE;
use serde_json::json;

use crate::helpers::{TestApp, encode};

#[tokio::test]
async fn test_category_lifecycle() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let created = app
        .post("/api/categories", json!({ "name": "Books", "description": "Paper" }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["message"], "Books Category Added");

    let fetched = app.get("/api/categories/1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body[0]["name"], "Books");

    let updated = app
        .put("/api/categories/1", json!({ "name": "Novels", "description": "" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["message"], "Novels Category Updated.");

    let deleted = app.delete("/api/categories/1").await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app.get("/api/categories/1").await;
    assert_eq!(missing.body, json!([]));

    let again = app.delete("/api/categories/1").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["message"], "Category 1 does not exist, add it first");
}

#[tokio::test]
async fn test_listing_pages_and_content_range() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    for name in ["Books", "Music", "Audiobooks", "Games", "Comic books"] {
        let res = app
            .post("/api/categories", json!({ "name": name, "description": "" }))
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let page = app
        .get(&format!("/api/categories?range={}", encode("[0,1]")))
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body.as_array().map(Vec::len), Some(2));
    assert_eq!(page.body[0]["id"], 5);
    assert_eq!(
        page.headers.get(CONTENT_RANGE).and_then(|v| v.to_str().ok()),
        Some("categories 0-1/5")
    );

    let filter = encode(r#"{"name":"books"}"#);
    let sort = encode(r#"["name","ASC"]"#);
    let filtered = app
        .get(&format!("/api/categories?filter={filter}&sort={sort}"))
        .await;
    let names: Vec<&str> = filtered
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Audiobooks", "Books", "Comic books"]);

    let count = app.get(&format!("/api/categories/count?filter={filter}")).await;
    assert_eq!(count.body, json!({ "count": 3 }));
}
