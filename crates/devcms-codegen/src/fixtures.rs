//! Content fixtures shared by the unit tests.

use devcms_core::ContentSnapshot;
use devcms_core::content::model::{Category, Page, Post, Product, Site};

pub fn site() -> Site {
    Site {
        id: "site-1".to_string(),
        name: "Demo Site".to_string(),
        slug: "demo".to_string(),
        description: None,
        domain: None,
        owner_id: None,
        settings: serde_json::json!({}),
        is_active: true,
        created_at: String::new(),
        updated_at: String::new(),
        owner: None,
    }
}

pub fn post(title: &str, slug: &str, category_id: Option<&str>) -> Post {
    Post {
        id: format!("post-{}", slug),
        site_id: "site-1".to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        content: None,
        excerpt: None,
        meta_title: None,
        meta_description: None,
        featured_image: None,
        status: "published".to_string(),
        is_featured: false,
        reading_time: None,
        published_at: None,
        author_id: None,
        category_id: category_id.map(str::to_string),
        created_at: String::new(),
        updated_at: String::new(),
        author: None,
        category: None,
        tags: Vec::new(),
    }
}

pub fn category(id: &str, name: &str, slug: &str) -> Category {
    Category {
        id: id.to_string(),
        site_id: "site-1".to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        parent_id: None,
        sort_order: 0,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

pub fn page(slug: &str) -> Page {
    Page {
        id: format!("page-{}", slug),
        site_id: "site-1".to_string(),
        title: slug.to_uppercase(),
        slug: slug.to_string(),
        content: None,
        excerpt: None,
        meta_title: None,
        meta_description: None,
        status: "published".to_string(),
        is_homepage: false,
        show_in_navigation: true,
        navigation_order: 0,
        template_override: None,
        published_at: None,
        author_id: None,
        created_at: String::new(),
        updated_at: String::new(),
        author: None,
    }
}

pub fn homepage(slug: &str) -> Page {
    Page {
        is_homepage: true,
        ..page(slug)
    }
}

pub fn product(slug: &str) -> Product {
    Product {
        id: format!("product-{}", slug),
        site_id: "site-1".to_string(),
        name: slug.to_string(),
        slug: slug.to_string(),
        description: None,
        price: Some(9.5),
        sale_price: None,
        sku: None,
        stock_quantity: 3,
        status: "active".to_string(),
        featured_image: None,
        gallery: Vec::new(),
        attributes: serde_json::json!({}),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

/// Two published posts in category A, no pages, no products.
pub fn blog_snapshot() -> ContentSnapshot {
    ContentSnapshot {
        site: site(),
        posts: vec![
            post("Getting Started", "getting-started", Some("cat-a")),
            post("DB-First Design", "db-first-design", Some("cat-a")),
        ],
        pages: Vec::new(),
        categories: vec![category("cat-a", "A", "a")],
        tags: Vec::new(),
        products: Vec::new(),
        navigation: Vec::new(),
    }
}
