#![allow(dead_code)]

use ads_shortener::domain::entities::NewLink;
use ads_shortener::domain::repositories::LinkRepository;
use ads_shortener::infrastructure::persistence::PgLinkRepository;
use ads_shortener::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub const AUTHOR: i64 = 100;
pub const OTHER_AUTHOR: i64 = 200;

pub async fn create_test_ad(pool: &PgPool, title: &str, published: bool) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO ads (title, text, published) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(title)
    .bind(format!("{title} text"))
    .bind(published)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link(
    pool: &PgPool,
    alias: &str,
    url: &str,
    author_id: i64,
    ads: Vec<i64>,
) -> i64 {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    repo.store(NewLink::new(url.to_string(), alias.to_string(), author_id, ads))
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_associations(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM link_ads WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), Duration::from_secs(2))
}
