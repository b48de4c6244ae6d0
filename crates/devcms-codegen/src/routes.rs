//! Route discovery and the generated routing module.

use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

use devcms_core::ContentSnapshot;
use devcms_core::content::model::{Category, Page, Post, Product};

use crate::error::CodegenError;
use crate::naming::{kebab_case, pascal_case};

/// Component identifier of the blog index route.
pub const BLOG_COMPONENT: &str = "BlogComponent";

/// Component identifier of the product index route.
pub const PRODUCT_LIST_COMPONENT: &str = "ProductListComponent";

/// Component-name prefixes and the component folder they import from.
const PREFIX_FOLDERS: &[(&str, &str)] = &[
    ("Post", "posts"),
    ("Page", "pages"),
    ("Category", "categories"),
    ("Product", "products"),
];

/// Components whose import path is not derived from their name.
const FIXED_IMPORTS: &[(&str, &str)] = &[(BLOG_COMPONENT, "./components/posts/post-list.component")];

/// Data attached to a route, shown as a comment in the generated module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteData {
    Page { page: Page },
    Blog { posts: Vec<Post> },
    Post { post: Post },
    Category { category: Category, posts: Vec<Post> },
    ProductIndex { products: Vec<Product> },
    Product { product: Product },
}

/// One row of the client-side routing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RouteData>,
}

impl RouteEntry {
    fn new(path: impl Into<String>, component: impl Into<String>, data: RouteData) -> Self {
        Self {
            path: path.into(),
            component: component.into(),
            data: Some(data),
        }
    }
}

/// Derive the route table from a content snapshot.
///
/// Order: homepage at the root, remaining pages, blog index and posts,
/// categories, product index and products. Fails when two routes would map
/// to the same component identifier.
pub fn generate_routes(content: &ContentSnapshot) -> Result<Vec<RouteEntry>, CodegenError> {
    let mut routes = Vec::new();

    if let Some(home) = content.homepage() {
        routes.push(page_route("", home));
    }

    routes.extend(
        content
            .pages
            .iter()
            .filter(|page| !page.is_homepage)
            .map(|page| page_route(&page.slug, page)),
    );

    if !content.posts.is_empty() {
        routes.push(RouteEntry::new(
            "blog",
            BLOG_COMPONENT,
            RouteData::Blog {
                posts: content.posts.clone(),
            },
        ));

        for post in &content.posts {
            routes.push(RouteEntry::new(
                format!("blog/{}", post.slug),
                format!("Post{}Component", pascal_case(&post.slug)),
                RouteData::Post { post: post.clone() },
            ));
        }
    }

    for category in &content.categories {
        routes.push(RouteEntry::new(
            format!("category/{}", category.slug),
            format!("Category{}Component", pascal_case(&category.slug)),
            RouteData::Category {
                category: category.clone(),
                posts: content.posts_in_category(&category.id).into_iter().cloned().collect(),
            },
        ));
    }

    if !content.products.is_empty() {
        routes.push(RouteEntry::new(
            "products",
            PRODUCT_LIST_COMPONENT,
            RouteData::ProductIndex {
                products: content.products.clone(),
            },
        ));

        for product in &content.products {
            routes.push(RouteEntry::new(
                format!("products/{}", product.slug),
                format!("Product{}Component", pascal_case(&product.slug)),
                RouteData::Product {
                    product: product.clone(),
                },
            ));
        }
    }

    check_collisions(&routes)?;
    debug!(count = routes.len(), "routes generated");

    Ok(routes)
}

fn page_route(path: &str, page: &Page) -> RouteEntry {
    RouteEntry::new(
        path,
        format!("Page{}Component", pascal_case(&page.slug)),
        RouteData::Page { page: page.clone() },
    )
}

fn check_collisions(routes: &[RouteEntry]) -> Result<(), CodegenError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for route in routes {
        match seen.entry(route.component.as_str()) {
            Entry::Occupied(first) => {
                return Err(CodegenError::ComponentCollision {
                    component: route.component.clone(),
                    first: first.get().to_string(),
                    second: route.path.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(route.path.as_str());
            }
        }
    }

    Ok(())
}

/// Module specifier a component is imported from.
pub fn import_path(component: &str) -> String {
    if let Some((_, path)) = FIXED_IMPORTS.iter().find(|(name, _)| *name == component) {
        return path.to_string();
    }

    let file = kebab_case(&component.replacen("Component", "", 1));
    let folder = PREFIX_FOLDERS
        .iter()
        .find(|(prefix, _)| component.starts_with(prefix))
        .map(|(_, folder)| *folder)
        .unwrap_or("shared");

    format!("./components/{}/{}.component", folder, file)
}

/// Render the routing module source for a route table.
pub fn render_routes_module(routes: &[RouteEntry]) -> Result<String, CodegenError> {
    let mut out = String::from("import { Routes } from '@angular/router';\n\n// Generated component imports\n");

    let mut imported: Vec<&str> = Vec::new();
    for route in routes {
        if !imported.contains(&route.component.as_str()) {
            imported.push(&route.component);
            let _ = writeln!(out, "import {{ {} }} from '{}';", route.component, import_path(&route.component));
        }
    }

    out.push_str("\nexport const routes: Routes = [\n");

    for route in routes {
        out.push_str("  {\n");
        let _ = writeln!(out, "    path: '{}',", escape_single_quoted(&route.path));
        let _ = writeln!(out, "    component: {},", route.component);
        if let Some(data) = &route.data {
            let json = escape_line_separators(&serde_json::to_string_pretty(data)?);
            let _ = writeln!(out, "    // data: {}", json.replace('\n', "\n    // "));
        }
        out.push_str("  },\n");
    }

    out.push_str("  {\n    path: '**',\n    redirectTo: ''\n  }\n];\n");

    Ok(out)
}

fn escape_single_quoted(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    escape_line_separators(&escaped)
}

/// U+2028 and U+2029 end a line in TypeScript source, even inside comments.
fn escape_line_separators(value: &str) -> String {
    value.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029")
}

/// Write the routing module to `output_path`, creating parent directories.
pub async fn write_routes_file(routes: &[RouteEntry], output_path: &Path) -> Result<(), CodegenError> {
    let source = render_routes_module(routes)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(output_path, source).await?;

    info!(routes = routes.len(), path = %output_path.display(), "routes file written");
    Ok(())
}

/// Generate the route table and write it in one step.
pub async fn generate_routes_file(content: &ContentSnapshot, output_path: &Path) -> Result<Vec<RouteEntry>, CodegenError> {
    let routes = generate_routes(content)?;
    write_routes_file(&routes, output_path).await?;
    Ok(routes)
}
