//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::{
    LINK_ADS_AD_FKEY, LINK_ADS_LINK_FKEY, LINK_ADS_PKEY, LINKS_ALIAS_KEY,
    is_foreign_key_violation_on, is_unique_violation_on,
};

/// Selects links with their ad ids aggregated into a sorted array.
const SELECT_LINKS: &str = r#"
    SELECT
        l.id,
        l.alias,
        l.url,
        l.author_id,
        COALESCE(
            ARRAY_AGG(la.ad_id ORDER BY la.ad_id) FILTER (WHERE la.ad_id IS NOT NULL),
            '{}'
        ) AS ads
    FROM links l
    LEFT JOIN link_ads la ON la.link_id = l.id
"#;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    alias: String,
    url: String,
    author_id: i64,
    ads: Vec<i64>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.url, row.alias, row.author_id, row.ads)
    }
}

/// PostgreSQL repository for links and their ad associations.
///
/// Multi-row writes run in a transaction; a dropped transaction rolls back.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        op: &'static str,
        condition: &str,
        bind: LinkKey<'_>,
    ) -> Result<Link, AppError> {
        let sql = format!("{SELECT_LINKS} WHERE {condition} GROUP BY l.id");
        let query = sqlx::query_as::<_, LinkRow>(&sql);
        let query = match bind {
            LinkKey::Id(id) => query.bind(id),
            LinkKey::Alias(alias) => query.bind(alias),
        };

        let row = query
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| storage_error(op, e))?;

        row.map(Link::from).ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "op": op, "key": bind.to_string() }))
        })
    }
}

#[derive(Clone, Copy)]
enum LinkKey<'a> {
    Id(i64),
    Alias(&'a str),
}

impl std::fmt::Display for LinkKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkKey::Id(id) => write!(f, "id={id}"),
            LinkKey::Alias(alias) => write!(f, "alias={alias}"),
        }
    }
}

fn storage_error(op: &'static str, e: sqlx::Error) -> AppError {
    warn!(op, error = %e, "Storage operation failed");
    AppError::internal("Database error", json!({ "op": op, "reason": e.to_string() }))
}

fn alias_taken(op: &'static str, alias: &str) -> AppError {
    AppError::already_exists(
        "Alias already exists",
        json!({ "op": op, "alias": alias }),
    )
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn size_approx(&self) -> Result<i64, AppError> {
        let estimate = sqlx::query_scalar::<_, i64>(
            "SELECT reltuples::bigint FROM pg_catalog.pg_class WHERE oid = to_regclass('links')",
        )
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| storage_error("links.size_approx", e))?;

        // reltuples is -1 until the table is first analyzed
        Ok(estimate.unwrap_or(0).max(0))
    }

    async fn store(&self, new_link: NewLink) -> Result<i64, AppError> {
        const OP: &str = "links.store";

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error(OP, e))?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO links (alias, url, author_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&new_link.alias)
        .bind(&new_link.url)
        .bind(new_link.author_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, LINKS_ALIAS_KEY) {
                alias_taken(OP, &new_link.alias)
            } else {
                storage_error(OP, e)
            }
        })?;

        for &ad_id in &new_link.ads {
            sqlx::query("INSERT INTO link_ads (link_id, ad_id) VALUES ($1, $2)")
                .bind(id)
                .bind(ad_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_foreign_key_violation_on(&e, LINK_ADS_AD_FKEY) {
                        AppError::ad_not_exists(
                            format!("Ad {ad_id} does not exist"),
                            json!({ "op": OP, "ad_id": ad_id }),
                        )
                    } else {
                        storage_error(OP, e)
                    }
                })?;
        }

        tx.commit().await.map_err(|e| storage_error(OP, e))?;

        debug!(link_id = id, ads = new_link.ads.len(), "Link stored");
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<Link, AppError> {
        self.fetch_one_where("links.get_by_id", "l.id = $1", LinkKey::Id(id))
            .await
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Link, AppError> {
        self.fetch_one_where("links.get_by_alias", "l.alias = $1", LinkKey::Alias(alias))
            .await
    }

    async fn get_by_author(&self, author_id: i64) -> Result<Vec<Link>, AppError> {
        let sql = format!("{SELECT_LINKS} WHERE l.author_id = $1 GROUP BY l.id ORDER BY l.id");

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(author_id)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| storage_error("links.get_by_author", e))?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn update_alias(&self, id: i64, alias: &str) -> Result<(), AppError> {
        const OP: &str = "links.update_alias";

        let result = sqlx::query("UPDATE links SET alias = $1 WHERE id = $2")
            .bind(alias)
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, LINKS_ALIAS_KEY) {
                    alias_taken(OP, alias)
                } else {
                    storage_error(OP, e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "op": OP, "link_id": id }),
            ));
        }

        Ok(())
    }

    async fn add_ad(&self, link_id: i64, ad_id: i64) -> Result<(), AppError> {
        const OP: &str = "link_ads.add";

        sqlx::query("INSERT INTO link_ads (link_id, ad_id) VALUES ($1, $2)")
            .bind(link_id)
            .bind(ad_id)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                let details = json!({ "op": OP, "link_id": link_id, "ad_id": ad_id });
                if is_foreign_key_violation_on(&e, LINK_ADS_AD_FKEY) {
                    AppError::ad_not_exists(format!("Ad {ad_id} does not exist"), details)
                } else if is_foreign_key_violation_on(&e, LINK_ADS_LINK_FKEY) {
                    AppError::not_found("Link not found", details)
                } else if is_unique_violation_on(&e, LINK_ADS_PKEY) {
                    AppError::already_added("Ad has already been added", details)
                } else {
                    storage_error(OP, e)
                }
            })?;

        Ok(())
    }

    async fn delete_ad(&self, link_id: i64, ad_id: i64) -> Result<(), AppError> {
        const OP: &str = "link_ads.delete";

        let result = sqlx::query("DELETE FROM link_ads WHERE link_id = $1 AND ad_id = $2")
            .bind(link_id)
            .bind(ad_id)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| storage_error(OP, e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Ad is not associated with this link",
                json!({ "op": OP, "link_id": link_id, "ad_id": ad_id }),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        const OP: &str = "links.delete";

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error(OP, e))?;

        sqlx::query("DELETE FROM link_ads WHERE link_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error(OP, e))?;

        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error(OP, e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "op": OP, "link_id": id }),
            ));
        }

        tx.commit().await.map_err(|e| storage_error(OP, e))?;

        debug!(link_id = id, "Link deleted");
        Ok(())
    }
}
