//! Classification of PostgreSQL constraint violations.

pub const LINKS_ALIAS_KEY: &str = "links_alias_key";
pub const LINK_ADS_PKEY: &str = "link_ads_pkey";
pub const LINK_ADS_LINK_FKEY: &str = "link_ads_link_id_fkey";
pub const LINK_ADS_AD_FKEY: &str = "link_ads_ad_id_fkey";

/// Returns true if `e` is a unique violation on `constraint`.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

/// Returns true if `e` is a foreign key violation on `constraint`.
pub fn is_foreign_key_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_foreign_key_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
