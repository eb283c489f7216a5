mod common;

use ads_shortener::api::handlers::redirect_handler;
use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

fn server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/link/{alias}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_without_ads(pool: PgPool) {
    common::create_test_link(&pool, "plain", "https://example.com/target", common::AUTHOR, vec![])
        .await;
    let server = server(pool);

    let response = server.get("/link/plain").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "url": "https://example.com/target", "ad": null }));
}

#[sqlx::test]
async fn test_redirect_with_published_ad(pool: PgPool) {
    let ad = common::create_test_ad(&pool, "banner", true).await;
    common::create_test_link(&pool, "withad", "https://example.com", common::AUTHOR, vec![ad])
        .await;
    let server = server(pool);

    let response = server.get("/link/withad").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "url": "https://example.com",
        "ad": { "id": ad, "title": "banner", "text": "banner text" }
    }));
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = server(pool);

    let response = server.get("/link/missing").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}
