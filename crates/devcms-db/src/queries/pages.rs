//! Page queries.

use super::sites::SITE_ID_SUBQUERY;
use crate::pool::{DbPool, DbResult};

/// Published page with its author's profile names.
#[derive(Debug, Clone)]
pub struct PageRow {
    pub id: String,
    pub site_id: String,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub status: String,
    pub is_homepage: bool,
    pub show_in_navigation: bool,
    pub navigation_order: i32,
    pub template_override: Option<String>,
    pub published_at: Option<String>,
    pub author_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
}

/// List the site's published pages ordered by navigation order, then title.
pub async fn list_published_pages(pool: &DbPool, site: &str) -> DbResult<Vec<PageRow>> {
    let sql = format!(
        "SELECT
            p.id::text AS id,
            p.site_id::text AS site_id,
            p.title,
            p.slug,
            p.content,
            p.excerpt,
            p.meta_title,
            p.meta_description,
            p.status::text AS status,
            COALESCE(p.is_homepage, false) AS is_homepage,
            COALESCE(p.show_in_navigation, false) AS show_in_navigation,
            COALESCE(p.navigation_order, 0)::int4 AS navigation_order,
            p.template_override,
            p.published_at::text AS published_at,
            p.author_id::text AS author_id,
            p.created_at::text AS created_at,
            p.updated_at::text AS updated_at,
            pr.first_name AS author_first_name,
            pr.last_name AS author_last_name
         FROM pages p
         LEFT JOIN profiles pr ON p.author_id = pr.id
         WHERE p.site_id = {SITE_ID_SUBQUERY}
           AND p.status = 'published'
         ORDER BY p.navigation_order, p.title"
    );

    let rows = pool.client().query(sql.as_str(), &[&site]).await?;

    rows.iter()
        .map(|row| -> DbResult<PageRow> {
            Ok(PageRow {
                id: row.try_get("id")?,
                site_id: row.try_get("site_id")?,
                title: row.try_get("title")?,
                slug: row.try_get("slug")?,
                content: row.try_get("content")?,
                excerpt: row.try_get("excerpt")?,
                meta_title: row.try_get("meta_title")?,
                meta_description: row.try_get("meta_description")?,
                status: row.try_get("status")?,
                is_homepage: row.try_get("is_homepage")?,
                show_in_navigation: row.try_get("show_in_navigation")?,
                navigation_order: row.try_get("navigation_order")?,
                template_override: row.try_get("template_override")?,
                published_at: row.try_get("published_at")?,
                author_id: row.try_get("author_id")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
                author_first_name: row.try_get("author_first_name")?,
                author_last_name: row.try_get("author_last_name")?,
            })
        })
        .collect()
}
