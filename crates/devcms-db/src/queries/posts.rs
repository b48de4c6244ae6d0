//! Post queries.

use serde::{Deserialize, Serialize};

use super::sites::SITE_ID_SUBQUERY;
use crate::pool::{DbPool, DbResult};

/// A tag attached to a post, as aggregated by the posts query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTagRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}

/// Published post with denormalized category, author and tags.
#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: String,
    pub site_id: String,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub is_featured: bool,
    pub reading_time: Option<i32>,
    pub published_at: Option<String>,
    pub author_id: Option<String>,
    pub category_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub tags: Vec<PostTagRow>,
}

/// List the site's published posts, newest first, with their tags aggregated.
pub async fn list_published_posts(pool: &DbPool, site: &str) -> DbResult<Vec<PostRow>> {
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
            p.featured_image,
            p.status::text AS status,
            COALESCE(p.is_featured, false) AS is_featured,
            p.reading_time::int4 AS reading_time,
            p.published_at::text AS published_at,
            p.author_id::text AS author_id,
            p.category_id::text AS category_id,
            p.created_at::text AS created_at,
            p.updated_at::text AS updated_at,
            c.name AS category_name,
            c.slug AS category_slug,
            pr.first_name AS author_first_name,
            pr.last_name AS author_last_name,
            COALESCE(
                json_agg(
                    json_build_object(
                        'id', t.id::text,
                        'name', t.name,
                        'slug', t.slug,
                        'color', t.color
                    )
                ) FILTER (WHERE t.id IS NOT NULL),
                '[]'
            ) AS tags
         FROM posts p
         LEFT JOIN categories c ON p.category_id = c.id
         LEFT JOIN profiles pr ON p.author_id = pr.id
         LEFT JOIN post_tags pt ON p.id = pt.post_id
         LEFT JOIN tags t ON pt.tag_id = t.id
         WHERE p.site_id = {SITE_ID_SUBQUERY}
           AND p.status = 'published'
         GROUP BY p.id, c.name, c.slug, pr.first_name, pr.last_name
         ORDER BY p.published_at DESC"
    );

    let rows = pool.client().query(sql.as_str(), &[&site]).await?;

    rows.iter()
        .map(|row| -> DbResult<PostRow> {
            let tags: serde_json::Value = row.try_get("tags")?;
            Ok(PostRow {
                id: row.try_get("id")?,
                site_id: row.try_get("site_id")?,
                title: row.try_get("title")?,
                slug: row.try_get("slug")?,
                content: row.try_get("content")?,
                excerpt: row.try_get("excerpt")?,
                meta_title: row.try_get("meta_title")?,
                meta_description: row.try_get("meta_description")?,
                featured_image: row.try_get("featured_image")?,
                status: row.try_get("status")?,
                is_featured: row.try_get("is_featured")?,
                reading_time: row.try_get("reading_time")?,
                published_at: row.try_get("published_at")?,
                author_id: row.try_get("author_id")?,
                category_id: row.try_get("category_id")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
                category_name: row.try_get("category_name")?,
                category_slug: row.try_get("category_slug")?,
                author_first_name: row.try_get("author_first_name")?,
                author_last_name: row.try_get("author_last_name")?,
                tags: decode_tags(tags)?,
            })
        })
        .collect()
}

/// Decode the aggregated tag array. Anything that is not an array becomes empty.
pub fn decode_tags(value: serde_json::Value) -> DbResult<Vec<PostTagRow>> {
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_tags_array() {
        let tags = decode_tags(json!([
            {"id": "t1", "name": "Rust", "slug": "rust", "color": "#DEA584"},
            {"id": "t2", "name": "SQL", "slug": "sql", "color": null}
        ]))
        .unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].slug, "rust");
        assert_eq!(tags[1].color, None);
    }

    #[test]
    fn test_decode_tags_null_is_empty() {
        assert!(decode_tags(serde_json::Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_decode_tags_malformed_entry() {
        assert!(decode_tags(json!([{"name": "missing id"}])).is_err());
    }
}
