//! PostgreSQL implementation of the ads lookup port.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::AdSummary;
use crate::domain::repositories::AdsLookup;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AdRow {
    id: i64,
    title: String,
    text: String,
}

/// Reads published ads from the `ads` table.
pub struct PgAdsLookup {
    pool: Arc<PgPool>,
}

impl PgAdsLookup {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdsLookup for PgAdsLookup {
    async fn get_only_published(&self, ad_ids: &[i64]) -> Result<Vec<AdSummary>, AppError> {
        if ad_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, AdRow>(
            "SELECT id, title, text FROM ads WHERE id = ANY($1) AND published ORDER BY id",
        )
        .bind(ad_ids)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| {
            warn!(error = %e, "Ads lookup failed");
            AppError::internal(
                "Ads lookup failed",
                json!({ "op": "ads.get_only_published", "reason": e.to_string() }),
            )
        })?;

        Ok(rows
            .into_iter()
            .map(|r| AdSummary::new(r.id, r.title, r.text))
            .collect())
    }
}
