mod common;

use ads_shortener::error::ErrorKind;
use common::{AUTHOR, OTHER_AUTHOR};
use sqlx::PgPool;
use std::collections::HashSet;

#[sqlx::test]
async fn test_create_with_generated_alias(pool: PgPool) {
    let state = common::create_test_state(pool);

    let link = state
        .shortener
        .create("https://example.com".to_string(), None, AUTHOR, vec![])
        .await
        .unwrap();

    assert!(link.alias.len() >= 4);
    assert!(link.alias.chars().all(|c| c.is_ascii_alphanumeric()));

    let resolved = state.shortener.get_redirect(&link.alias).await.unwrap();
    assert_eq!(resolved.link, link);
    assert!(resolved.ad.is_none());
}

#[sqlx::test]
async fn test_generated_aliases_are_distinct(pool: PgPool) {
    let state = common::create_test_state(pool);

    let mut aliases = HashSet::new();
    for _ in 0..50 {
        let link = state
            .shortener
            .create("https://example.com".to_string(), None, AUTHOR, vec![])
            .await
            .unwrap();
        assert!(aliases.insert(link.alias));
    }
}

#[sqlx::test]
async fn test_custom_alias_collision(pool: PgPool) {
    let state = common::create_test_state(pool);

    state
        .shortener
        .create(
            "https://example.com/a".to_string(),
            Some("promo".to_string()),
            AUTHOR,
            vec![],
        )
        .await
        .unwrap();

    let err = state
        .shortener
        .create(
            "https://example.com/b".to_string(),
            Some("promo".to_string()),
            OTHER_AUTHOR,
            vec![],
        )
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::AlreadyExists));
    assert_eq!(
        state.shortener.get_by_alias("promo").await.unwrap().url,
        "https://example.com/a"
    );
}

#[sqlx::test]
async fn test_redirect_picks_published_ads_only(pool: PgPool) {
    let live1 = common::create_test_ad(&pool, "live1", true).await;
    let live2 = common::create_test_ad(&pool, "live2", true).await;
    let draft = common::create_test_ad(&pool, "draft", false).await;
    let state = common::create_test_state(pool);

    let link = state
        .shortener
        .create(
            "https://example.com".to_string(),
            Some("ads".to_string()),
            AUTHOR,
            vec![live1, live2, draft],
        )
        .await
        .unwrap();

    let mut seen = HashSet::new();
    for _ in 0..50 {
        let redirect = state.shortener.get_redirect(&link.alias).await.unwrap();
        let ad = redirect.ad.expect("published ad expected");
        assert!(ad.id == live1 || ad.id == live2);
        seen.insert(ad.id);
    }
    assert!(!seen.contains(&draft));
}

#[sqlx::test]
async fn test_redirect_with_only_drafts(pool: PgPool) {
    let draft = common::create_test_ad(&pool, "draft", false).await;
    let state = common::create_test_state(pool);

    state
        .shortener
        .create(
            "https://example.com".to_string(),
            Some("drafts".to_string()),
            AUTHOR,
            vec![draft],
        )
        .await
        .unwrap();

    let redirect = state.shortener.get_redirect("drafts").await.unwrap();
    assert!(redirect.ad.is_none());
    assert_eq!(redirect.url(), "https://example.com");
}

#[sqlx::test]
async fn test_ownership_is_enforced(pool: PgPool) {
    let ad = common::create_test_ad(&pool, "ad", true).await;
    let state = common::create_test_state(pool);

    let link = state
        .shortener
        .create(
            "https://example.com".to_string(),
            Some("owned".to_string()),
            AUTHOR,
            vec![],
        )
        .await
        .unwrap();

    let err = state.shortener.add_ad(link.id, ad, OTHER_AUTHOR).await.unwrap_err();
    assert!(err.is(ErrorKind::PermissionDenied));

    let err = state.shortener.delete(link.id, OTHER_AUTHOR).await.unwrap_err();
    assert!(err.is(ErrorKind::PermissionDenied));

    let unchanged = state.shortener.get_by_id(link.id).await.unwrap();
    assert_eq!(unchanged, link);
}

#[sqlx::test]
async fn test_ad_membership_round_trip(pool: PgPool) {
    let ad = common::create_test_ad(&pool, "ad", true).await;
    let state = common::create_test_state(pool);

    let link = state
        .shortener
        .create(
            "https://example.com".to_string(),
            Some("member".to_string()),
            AUTHOR,
            vec![],
        )
        .await
        .unwrap();

    let with_ad = state.shortener.add_ad(link.id, ad, AUTHOR).await.unwrap();
    assert_eq!(with_ad.ads, vec![ad]);

    let err = state.shortener.add_ad(link.id, ad, AUTHOR).await.unwrap_err();
    assert!(err.is(ErrorKind::AlreadyAdded));

    let without_ad = state.shortener.delete_ad(link.id, ad, AUTHOR).await.unwrap();
    assert!(without_ad.ads.is_empty());

    let err = state.shortener.delete_ad(link.id, ad, AUTHOR).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[sqlx::test]
async fn test_update_alias_regenerates(pool: PgPool) {
    let state = common::create_test_state(pool);

    let link = state
        .shortener
        .create(
            "https://example.com".to_string(),
            Some("before".to_string()),
            AUTHOR,
            vec![],
        )
        .await
        .unwrap();

    let renamed = state
        .shortener
        .update_alias(link.id, AUTHOR, None)
        .await
        .unwrap();

    assert_ne!(renamed.alias, "before");
    assert_eq!(
        state.shortener.get_by_alias(&renamed.alias).await.unwrap().id,
        link.id
    );
    assert!(
        state
            .shortener
            .get_by_alias("before")
            .await
            .unwrap_err()
            .is(ErrorKind::NotFound)
    );
}
