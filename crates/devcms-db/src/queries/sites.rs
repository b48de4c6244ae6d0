//! Site lookup queries.

use crate::pool::{DbPool, DbResult};

/// Subquery resolving a site identifier (slug or id) to the site's id.
pub(crate) const SITE_ID_SUBQUERY: &str = "(SELECT id FROM sites WHERE slug = $1 OR id::text = $1)";

/// Site row with its owner's profile names.
#[derive(Debug, Clone)]
pub struct SiteRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub owner_id: Option<String>,
    pub settings: serde_json::Value,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub owner_first_name: Option<String>,
    pub owner_last_name: Option<String>,
}

/// Find every site whose slug or id equals `identifier`.
///
/// Callers decide what to do when this is not exactly one row.
pub async fn find_sites(pool: &DbPool, identifier: &str) -> DbResult<Vec<SiteRow>> {
    let rows = pool
        .client()
        .query(
            "SELECT
                s.id::text AS id,
                s.name,
                s.slug,
                s.description,
                s.domain,
                s.owner_id::text AS owner_id,
                COALESCE(s.settings, '{}'::jsonb) AS settings,
                s.is_active,
                s.created_at::text AS created_at,
                s.updated_at::text AS updated_at,
                p.first_name AS owner_first_name,
                p.last_name AS owner_last_name
             FROM sites s
             LEFT JOIN profiles p ON s.owner_id = p.id
             WHERE s.slug = $1 OR s.id::text = $1",
            &[&identifier],
        )
        .await?;

    rows.iter()
        .map(|row| -> DbResult<SiteRow> {
            Ok(SiteRow {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                description: row.try_get("description")?,
                domain: row.try_get("domain")?,
                owner_id: row.try_get("owner_id")?,
                settings: row.try_get("settings")?,
                is_active: row.try_get("is_active")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
                owner_first_name: row.try_get("owner_first_name")?,
                owner_last_name: row.try_get("owner_last_name")?,
            })
        })
        .collect()
}
