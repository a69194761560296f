//! End-to-end tests for the bakery API.
//!
//! Run with: cargo test -p bakehouse-integration-tests

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use bakehouse_integration_tests::TestContext;

/// Helper: create a baked good through the API, returning the response body.
async fn create_baked_good(ctx: &TestContext, name: &str, price: &str, bakery_id: i64) -> Value {
    let bakery_id = bakery_id.to_string();
    let resp = ctx
        .client
        .post(ctx.url("/baked_goods"))
        .form(&[
            ("name", name),
            ("price", price),
            ("bakery_id", bakery_id.as_str()),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_home_serves_static_html() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert_eq!(body, "<h1>Bakery GET-POST-PATCH-DELETE API</h1>");
}

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_bakeries_embeds_goods() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;
    ctx.seed_bakery("Crusty Corner").await;
    create_baked_good(&ctx, "Croissant", "3.50", bakery_id).await;

    let resp = ctx.client.get(ctx.url("/bakeries")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    let bakeries = body.as_array().unwrap();
    assert_eq!(bakeries.len(), 2);

    let first = &bakeries[0];
    assert_eq!(first["name"], "Flour Power");
    assert_eq!(first["baked_goods"][0]["name"], "Croissant");
    assert_eq!(first["baked_goods"][0]["bakery_id"], bakery_id);
    // Embedded goods are scalar-only: no bakery nested back inside.
    assert!(first["baked_goods"][0].get("bakery").is_none());

    let second = &bakeries[1];
    assert_eq!(second["name"], "Crusty Corner");
    assert_eq!(second["baked_goods"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_bakery_by_id_matches_requested_id() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;

    let resp = ctx
        .client
        .get(ctx.url(&format!("/bakeries/{bakery_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], bakery_id);
    assert_eq!(body["name"], "Flour Power");
}

#[tokio::test]
async fn test_get_unknown_bakery_returns_404() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/bakeries/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_patch_bakery_renames() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;

    let resp = ctx
        .client
        .patch(ctx.url(&format!("/bakeries/{bakery_id}")))
        .form(&[("name", "Flour Power 2.0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], bakery_id);
    assert_eq!(body["name"], "Flour Power 2.0");
}

#[tokio::test]
async fn test_patch_bakery_without_name_returns_400_and_leaves_name() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;

    let resp = ctx
        .client
        .patch(ctx.url(&format!("/bakeries/{bakery_id}")))
        .form(&[] as &[(&str, &str)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "name is required to update");

    // The bakery keeps its original name.
    let resp = ctx
        .client
        .get(ctx.url(&format!("/bakeries/{bakery_id}")))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Flour Power");
}

#[tokio::test]
async fn test_patch_unknown_bakery_returns_404() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .patch(ctx.url("/bakeries/999"))
        .form(&[("name", "Nowhere")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_baked_good_round_trip() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;

    let created = create_baked_good(&ctx, "Croissant", "3.50", bakery_id).await;
    assert_eq!(created["name"], "Croissant");
    assert_eq!(created["price"], 3.5);
    assert_eq!(created["bakery"]["id"], bakery_id);
    assert_eq!(created["bakery"]["name"], "Flour Power");
    // The embedded bakery summary carries no goods list (no cycles).
    assert!(created["bakery"].get("baked_goods").is_none());

    let id = created["id"].as_i64().unwrap();
    let resp = ctx
        .client
        .get(ctx.url(&format!("/baked_goods/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // A subsequent read returns identical data.
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_baked_good_missing_price_returns_400_without_insert() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;

    let bakery_id = bakery_id.to_string();
    let resp = ctx
        .client
        .post(ctx.url("/baked_goods"))
        .form(&[("name", "Croissant"), ("bakery_id", bakery_id.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "price is required");

    assert_eq!(ctx.baked_good_count().await, 0);
}

#[tokio::test]
async fn test_create_baked_good_malformed_price_returns_400() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;

    let bakery_id = bakery_id.to_string();
    let resp = ctx
        .client
        .post(ctx.url("/baked_goods"))
        .form(&[
            ("name", "Croissant"),
            ("price", "cheap"),
            ("bakery_id", bakery_id.as_str()),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "price must be a number");
    assert_eq!(ctx.baked_good_count().await, 0);
}

#[tokio::test]
async fn test_create_baked_good_unknown_bakery_returns_400() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/baked_goods"))
        .form(&[("name", "Croissant"), ("price", "3.50"), ("bakery_id", "999")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        "bakery_id does not reference an existing bakery"
    );
    assert_eq!(ctx.baked_good_count().await, 0);
}

#[tokio::test]
async fn test_by_price_is_monotonically_non_increasing() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;
    create_baked_good(&ctx, "Roll", "1.00", bakery_id).await;
    create_baked_good(&ctx, "Cake", "15.00", bakery_id).await;
    create_baked_good(&ctx, "Croissant", "3.50", bakery_id).await;
    create_baked_good(&ctx, "Baguette", "3.50", bakery_id).await;

    let resp = ctx
        .client
        .get(ctx.url("/baked_goods/by_price"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    let prices: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|good| good["price"].as_f64().unwrap())
        .collect();

    assert_eq!(prices.len(), 4);
    for pair in prices.windows(2) {
        assert!(pair[0] >= pair[1], "prices not sorted: {prices:?}");
    }
}

#[tokio::test]
async fn test_most_expensive_returns_highest_priced_good() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;
    create_baked_good(&ctx, "Roll", "1.00", bakery_id).await;
    create_baked_good(&ctx, "Cake", "15.00", bakery_id).await;

    let resp = ctx
        .client
        .get(ctx.url("/baked_goods/most_expensive"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Cake");
    assert_eq!(body["price"], 15.0);
}

#[tokio::test]
async fn test_most_expensive_on_empty_table_returns_404() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/baked_goods/most_expensive"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "no baked goods exist");
}

#[tokio::test]
async fn test_patch_baked_good_price_only_keeps_name() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;
    let created = create_baked_good(&ctx, "Croissant", "3.50", bakery_id).await;
    let id = created["id"].as_i64().unwrap();

    let resp = ctx
        .client
        .patch(ctx.url(&format!("/baked_goods/{id}")))
        .form(&[("price", "4.00")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Croissant");
    assert_eq!(body["price"], 4.0);
}

#[tokio::test]
async fn test_patch_unknown_baked_good_returns_404() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .patch(ctx.url("/baked_goods/999"))
        .form(&[("price", "4.00")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_baked_good_then_get_returns_404() {
    let ctx = TestContext::new().await;
    let bakery_id = ctx.seed_bakery("Flour Power").await;
    let created = create_baked_good(&ctx, "Croissant", "3.50", bakery_id).await;
    let id = created["id"].as_i64().unwrap();

    let resp = ctx
        .client
        .delete(ctx.url(&format!("/baked_goods/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains(&id.to_string()));

    let resp = ctx
        .client
        .get(ctx.url(&format!("/baked_goods/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_baked_good_returns_404() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .delete(ctx.url("/baked_goods/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
