mod common;

use ads_shortener::domain::entities::NewLink;
use ads_shortener::domain::repositories::LinkRepository;
use ads_shortener::error::ErrorKind;
use ads_shortener::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(alias: &str, author_id: i64, ads: Vec<i64>) -> NewLink {
    NewLink::new(
        "https://example.com".to_string(),
        alias.to_string(),
        author_id,
        ads,
    )
}

#[sqlx::test]
async fn test_store_and_get_round_trip(pool: PgPool) {
    let ad2 = common::create_test_ad(&pool, "second", true).await;
    let ad1 = common::create_test_ad(&pool, "first", false).await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let id = repo.store(new_link("abcd", 1, vec![ad1, ad2])).await.unwrap();

    let by_id = repo.get_by_id(id).await.unwrap();
    assert_eq!(by_id.id, id);
    assert_eq!(by_id.url, "https://example.com");
    assert_eq!(by_id.alias, "abcd");
    assert_eq!(by_id.author_id, 1);
    let mut expected = vec![ad1, ad2];
    expected.sort();
    assert_eq!(by_id.ads, expected);

    let by_alias = repo.get_by_alias("abcd").await.unwrap();
    assert_eq!(by_alias, by_id);
}

#[sqlx::test]
async fn test_get_missing_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let err = repo.get_by_id(999).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let err = repo.get_by_alias("nope").await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[sqlx::test]
async fn test_store_duplicate_alias(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.store(new_link("taken", 1, vec![])).await.unwrap();
    let err = repo.store(new_link("taken", 2, vec![])).await.unwrap_err();

    assert!(err.is(ErrorKind::AlreadyExists));
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_store_rolls_back_on_unknown_ad(pool: PgPool) {
    let ad = common::create_test_ad(&pool, "real", true).await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let err = repo
        .store(new_link("orphan", 1, vec![ad, 987_654]))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::AdNotExists));
    assert_eq!(err.details()["ad_id"], 987_654);
    assert_eq!(common::count_links(&pool).await, 0);
    assert!(repo.get_by_alias("orphan").await.unwrap_err().is(ErrorKind::NotFound));
}

#[sqlx::test]
async fn test_get_by_author(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let first = repo.store(new_link("a1", 1, vec![])).await.unwrap();
    repo.store(new_link("b1", 2, vec![])).await.unwrap();
    let second = repo.store(new_link("a2", 1, vec![])).await.unwrap();

    let links = repo.get_by_author(1).await.unwrap();
    let ids: Vec<i64> = links.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert!(links.iter().all(|l| l.author_id == 1));

    assert!(repo.get_by_author(3).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_update_alias(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let id = repo.store(new_link("old", 1, vec![])).await.unwrap();
    repo.store(new_link("other", 1, vec![])).await.unwrap();

    repo.update_alias(id, "new").await.unwrap();
    assert_eq!(repo.get_by_id(id).await.unwrap().alias, "new");
    assert!(repo.get_by_alias("old").await.unwrap_err().is(ErrorKind::NotFound));

    let err = repo.update_alias(id, "other").await.unwrap_err();
    assert!(err.is(ErrorKind::AlreadyExists));
    assert_eq!(repo.get_by_id(id).await.unwrap().alias, "new");

    let err = repo.update_alias(999, "free").await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[sqlx::test]
async fn test_add_ad(pool: PgPool) {
    let ad = common::create_test_ad(&pool, "ad", true).await;
    let repo = PgLinkRepository::new(Arc::new(pool));
    let id = repo.store(new_link("abcd", 1, vec![])).await.unwrap();

    repo.add_ad(id, ad).await.unwrap();
    assert_eq!(repo.get_by_id(id).await.unwrap().ads, vec![ad]);

    let err = repo.add_ad(id, ad).await.unwrap_err();
    assert!(err.is(ErrorKind::AlreadyAdded));

    let err = repo.add_ad(id, 987_654).await.unwrap_err();
    assert!(err.is(ErrorKind::AdNotExists));

    let err = repo.add_ad(999, ad).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[sqlx::test]
async fn test_delete_ad(pool: PgPool) {
    let ad1 = common::create_test_ad(&pool, "one", true).await;
    let ad2 = common::create_test_ad(&pool, "two", true).await;
    let repo = PgLinkRepository::new(Arc::new(pool));
    let id = repo.store(new_link("abcd", 1, vec![ad1, ad2])).await.unwrap();

    repo.delete_ad(id, ad1).await.unwrap();
    assert_eq!(repo.get_by_id(id).await.unwrap().ads, vec![ad2]);

    let err = repo.delete_ad(id, ad1).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[sqlx::test]
async fn test_delete_removes_associations(pool: PgPool) {
    let ad = common::create_test_ad(&pool, "ad", true).await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let id = repo.store(new_link("abcd", 1, vec![ad])).await.unwrap();
    assert_eq!(common::count_associations(&pool, id).await, 1);

    repo.delete(id).await.unwrap();

    assert_eq!(common::count_associations(&pool, id).await, 0);
    assert!(repo.get_by_id(id).await.unwrap_err().is(ErrorKind::NotFound));
    assert!(repo.get_by_alias("abcd").await.unwrap_err().is(ErrorKind::NotFound));

    let err = repo.delete(id).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[sqlx::test]
async fn test_alias_reusable_after_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let id = repo.store(new_link("reuse", 1, vec![])).await.unwrap();

    repo.delete(id).await.unwrap();

    let new_id = repo.store(new_link("reuse", 2, vec![])).await.unwrap();
    assert_ne!(new_id, id);
    assert_eq!(repo.get_by_alias("reuse").await.unwrap().author_id, 2);
}

#[sqlx::test]
async fn test_size_approx(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    assert!(repo.size_approx().await.unwrap() >= 0);

    for alias in ["s1", "s2", "s3"] {
        repo.store(new_link(alias, 1, vec![])).await.unwrap();
    }
    sqlx::query("ANALYZE links").execute(&pool).await.unwrap();

    assert_eq!(repo.size_approx().await.unwrap(), 3);
}

#[sqlx::test]
async fn test_size_approx_ignores_same_named_table_in_other_schema(pool: PgPool) {
    sqlx::query("CREATE SCHEMA other_svc").execute(&pool).await.unwrap();
    sqlx::query("CREATE TABLE other_svc.links (id INT)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO other_svc.links SELECT generate_series(1, 1000)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("ANALYZE other_svc.links").execute(&pool).await.unwrap();

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    for alias in ["o1", "o2", "o3"] {
        repo.store(new_link(alias, 1, vec![])).await.unwrap();
    }
    sqlx::query("ANALYZE links").execute(&pool).await.unwrap();

    assert_eq!(repo.size_approx().await.unwrap(), 3);
}
