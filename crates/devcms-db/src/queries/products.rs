//! Product queries.

use super::sites::SITE_ID_SUBQUERY;
use crate::pool::{DbPool, DbResult};

#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sale_price: Option<f64>,
    pub sku: Option<String>,
    pub stock_quantity: i32,
    pub status: String,
    pub featured_image: Option<String>,
    pub gallery: Vec<String>,
    pub attributes: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

/// List the site's active products ordered by name.
pub async fn list_active_products(pool: &DbPool, site: &str) -> DbResult<Vec<ProductRow>> {
    let sql = format!(
        "SELECT
            id::text AS id,
            site_id::text AS site_id,
            name,
            slug,
            description,
            price::float8 AS price,
            sale_price::float8 AS sale_price,
            sku,
            COALESCE(stock_quantity, 0)::int4 AS stock_quantity,
            status::text AS status,
            featured_image,
            COALESCE(gallery::text[], ARRAY[]::text[]) AS gallery,
            COALESCE(attributes::jsonb, '{{}}'::jsonb) AS attributes,
            created_at::text AS created_at,
            updated_at::text AS updated_at
         FROM products
         WHERE site_id = {SITE_ID_SUBQUERY}
           AND status = 'active'
         ORDER BY name"
    );

    let rows = pool.client().query(sql.as_str(), &[&site]).await?;

    rows.iter()
        .map(|row| -> DbResult<ProductRow> {
            Ok(ProductRow {
                id: row.try_get("id")?,
                site_id: row.try_get("site_id")?,
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                description: row.try_get("description")?,
                price: row.try_get("price")?,
                sale_price: row.try_get("sale_price")?,
                sku: row.try_get("sku")?,
                stock_quantity: row.try_get("stock_quantity")?,
                status: row.try_get("status")?,
                featured_image: row.try_get("featured_image")?,
                gallery: row.try_get("gallery")?,
                attributes: row.try_get("attributes")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .collect()
}
