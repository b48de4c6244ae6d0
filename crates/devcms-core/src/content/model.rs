//! Content snapshot models.

use serde::{Deserialize, Serialize};

use devcms_db::queries::pages::PageRow;
use devcms_db::queries::posts::{PostRow, PostTagRow};
use devcms_db::queries::products::ProductRow;
use devcms_db::queries::sites::SiteRow;
use devcms_db::queries::taxonomy::{CategoryRow, TagRow};

/// One consistent, site-scoped load of every content collection.
///
/// Built once by the loader and shared read-only by component and route
/// generation within the same run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub site: Site,
    pub posts: Vec<Post>,
    pub pages: Vec<Page>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub products: Vec<Product>,
    pub navigation: Vec<NavigationItem>,
}

impl ContentSnapshot {
    /// Posts filed under the given category, in snapshot order.
    pub fn posts_in_category(&self, category_id: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.category_id.as_deref() == Some(category_id))
            .collect()
    }

    /// The page flagged as homepage, if any.
    pub fn homepage(&self) -> Option<&Page> {
        self.pages.iter().find(|p| p.is_homepage)
    }
}

/// Denormalized author (or owner) names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: Option<String>,
}

impl Author {
    /// Build from joined profile columns; a missing or empty first name
    /// means no author.
    fn from_names(first_name: Option<String>, last_name: Option<String>) -> Option<Self> {
        first_name.filter(|name| !name.is_empty()).map(|first_name| Self {
            first_name,
            last_name,
        })
    }

    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
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
    pub owner: Option<Author>,
}

impl Site {
    /// Create from database row.
    pub fn from_row(row: SiteRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            domain: row.domain,
            owner_id: row.owner_id,
            settings: row.settings,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner: Author::from_names(row.owner_first_name, row.owner_last_name),
        }
    }
}

/// Category summary carried on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCategory {
    pub name: String,
    pub slug: String,
}

/// Tag summary carried on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTag {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}

impl PostTag {
    pub fn from_row(row: PostTagRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            color: row.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
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
    pub author: Option<Author>,
    pub category: Option<PostCategory>,
    /// Never null: posts without tags carry an empty list.
    pub tags: Vec<PostTag>,
}

impl Post {
    /// Create from database row.
    pub fn from_row(row: PostRow) -> Self {
        let category = match (row.category_name, row.category_slug) {
            (Some(name), Some(slug)) => Some(PostCategory { name, slug }),
            _ => None,
        };

        Self {
            id: row.id,
            site_id: row.site_id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            excerpt: row.excerpt,
            meta_title: row.meta_title,
            meta_description: row.meta_description,
            featured_image: row.featured_image,
            status: row.status,
            is_featured: row.is_featured,
            reading_time: row.reading_time,
            published_at: row.published_at,
            author_id: row.author_id,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: Author::from_names(row.author_first_name, row.author_last_name),
            category,
            tags: row.tags.into_iter().map(PostTag::from_row).collect(),
        }
    }

    /// Whether both posts are filed under the same category. Two
    /// uncategorized posts count as sharing one.
    pub fn shares_category_with(&self, other: &Post) -> bool {
        self.category_id == other.category_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
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
    pub author: Option<Author>,
}

impl Page {
    /// Create from database row.
    pub fn from_row(row: PageRow) -> Self {
        Self {
            id: row.id,
            site_id: row.site_id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            excerpt: row.excerpt,
            meta_title: row.meta_title,
            meta_description: row.meta_description,
            status: row.status,
            is_homepage: row.is_homepage,
            show_in_navigation: row.show_in_navigation,
            navigation_order: row.navigation_order,
            template_override: row.template_override,
            published_at: row.published_at,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: Author::from_names(row.author_first_name, row.author_last_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
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

impl Category {
    pub fn from_row(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            site_id: row.site_id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            parent_id: row.parent_id,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub created_at: String,
}

impl Tag {
    pub fn from_row(row: TagRow) -> Self {
        Self {
            id: row.id,
            site_id: row.site_id,
            name: row.name,
            slug: row.slug,
            color: row.color,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
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

impl Product {
    pub fn from_row(row: ProductRow) -> Self {
        Self {
            id: row.id,
            site_id: row.site_id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: row.price,
            sale_price: row.sale_price,
            sku: row.sku,
            stock_quantity: row.stock_quantity,
            status: row.status,
            featured_image: row.featured_image,
            gallery: row.gallery,
            attributes: row.attributes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Link target for a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTarget {
    #[serde(rename = "_self")]
    SelfFrame,
    #[serde(rename = "_blank")]
    Blank,
}

impl LinkTarget {
    /// External links open in a new tab, internal ones in place.
    pub fn for_link(is_external: bool) -> Self {
        if is_external { Self::Blank } else { Self::SelfFrame }
    }
}

/// One entry of the derived site navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub order: i32,
    pub is_external: bool,
    pub target: LinkTarget,
    pub children: Vec<NavigationItem>,
}
