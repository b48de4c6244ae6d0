//! Category and tag queries.

use super::sites::SITE_ID_SUBQUERY;
use crate::pool::{DbPool, DbResult};

#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct TagRow {
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub created_at: String,
}

/// List the site's categories ordered by sort order, then name.
pub async fn list_categories(pool: &DbPool, site: &str) -> DbResult<Vec<CategoryRow>> {
    let sql = format!(
        "SELECT
            id::text AS id,
            site_id::text AS site_id,
            name,
            slug,
            description,
            parent_id::text AS parent_id,
            COALESCE(sort_order, 0)::int4 AS sort_order,
            created_at::text AS created_at,
            updated_at::text AS updated_at
         FROM categories
         WHERE site_id = {SITE_ID_SUBQUERY}
         ORDER BY sort_order, name"
    );

    let rows = pool.client().query(sql.as_str(), &[&site]).await?;

    rows.iter()
        .map(|row| -> DbResult<CategoryRow> {
            Ok(CategoryRow {
                id: row.try_get("id")?,
                site_id: row.try_get("site_id")?,
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                description: row.try_get("description")?,
                parent_id: row.try_get("parent_id")?,
                sort_order: row.try_get("sort_order")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .collect()
}

/// List the site's tags ordered by name.
pub async fn list_tags(pool: &DbPool, site: &str) -> DbResult<Vec<TagRow>> {
    let sql = format!(
        "SELECT
            id::text AS id,
            site_id::text AS site_id,
            name,
            slug,
            color,
            created_at::text AS created_at
         FROM tags
         WHERE site_id = {SITE_ID_SUBQUERY}
         ORDER BY name"
    );

    let rows = pool.client().query(sql.as_str(), &[&site]).await?;

    rows.iter()
        .map(|row| -> DbResult<TagRow> {
            Ok(TagRow {
                id: row.try_get("id")?,
                site_id: row.try_get("site_id")?,
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                color: row.try_get("color")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}
