//! Site content loading.

pub mod model;
pub mod navigation;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{DevcmsError, DevcmsResult};
use devcms_db::queries::pages::{self, PageRow};
use devcms_db::queries::posts::{self, PostRow};
use devcms_db::queries::products::{self, ProductRow};
use devcms_db::queries::sites::{self, SiteRow};
use devcms_db::queries::taxonomy::{self, CategoryRow, TagRow};
use devcms_db::{DbPool, DbResult};
use model::{Category, ContentSnapshot, Page, Post, Product, Site, Tag};

/// Site-scoped content queries the loader depends on.
///
/// Every collection query takes the raw site identifier (slug or id) and
/// resolves the site itself.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn find_sites(&self, site: &str) -> DbResult<Vec<SiteRow>>;

    /// Published posts, newest first.
    async fn published_posts(&self, site: &str) -> DbResult<Vec<PostRow>>;

    /// Published pages by navigation order, then title.
    async fn published_pages(&self, site: &str) -> DbResult<Vec<PageRow>>;

    async fn categories(&self, site: &str) -> DbResult<Vec<CategoryRow>>;

    async fn tags(&self, site: &str) -> DbResult<Vec<TagRow>>;

    /// Active products by name.
    async fn active_products(&self, site: &str) -> DbResult<Vec<ProductRow>>;
}

#[async_trait]
impl ContentSource for DbPool {
    async fn find_sites(&self, site: &str) -> DbResult<Vec<SiteRow>> {
        sites::find_sites(self, site).await
    }

    async fn published_posts(&self, site: &str) -> DbResult<Vec<PostRow>> {
        posts::list_published_posts(self, site).await
    }

    async fn published_pages(&self, site: &str) -> DbResult<Vec<PageRow>> {
        pages::list_published_pages(self, site).await
    }

    async fn categories(&self, site: &str) -> DbResult<Vec<CategoryRow>> {
        taxonomy::list_categories(self, site).await
    }

    async fn tags(&self, site: &str) -> DbResult<Vec<TagRow>> {
        taxonomy::list_tags(self, site).await
    }

    async fn active_products(&self, site: &str) -> DbResult<Vec<ProductRow>> {
        products::list_active_products(self, site).await
    }
}

/// Loads a [`ContentSnapshot`] for one site.
pub struct ContentLoader<'a, S: ContentSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ContentSource + ?Sized> ContentLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve the site, then fetch every collection concurrently.
    ///
    /// The site must resolve to exactly one row. A failure in any collection
    /// fetch fails the whole load.
    pub async fn load_for_site(&self, site_identifier: &str) -> DevcmsResult<ContentSnapshot> {
        let site = self.resolve_site(site_identifier).await?;
        debug!(site = %site.slug, "site resolved");

        let (posts, pages, categories, tags, products) = tokio::try_join!(
            self.source.published_posts(site_identifier),
            self.source.published_pages(site_identifier),
            self.source.categories(site_identifier),
            self.source.tags(site_identifier),
            self.source.active_products(site_identifier),
        )
        .map_err(DevcmsError::ContentLoad)?;

        let posts: Vec<Post> = posts.into_iter().map(Post::from_row).collect();
        let pages: Vec<Page> = pages.into_iter().map(Page::from_row).collect();
        let navigation = navigation::build_navigation(&pages);

        let snapshot = ContentSnapshot {
            site,
            posts,
            pages,
            categories: categories.into_iter().map(Category::from_row).collect(),
            tags: tags.into_iter().map(Tag::from_row).collect(),
            products: products.into_iter().map(Product::from_row).collect(),
            navigation,
        };

        info!(
            site = %snapshot.site.slug,
            posts = snapshot.posts.len(),
            pages = snapshot.pages.len(),
            categories = snapshot.categories.len(),
            tags = snapshot.tags.len(),
            products = snapshot.products.len(),
            "content loaded"
        );

        Ok(snapshot)
    }

    async fn resolve_site(&self, site_identifier: &str) -> DevcmsResult<Site> {
        let mut rows = self
            .source
            .find_sites(site_identifier)
            .await
            .map_err(DevcmsError::ContentLoad)?;

        if rows.len() != 1 {
            return Err(DevcmsError::SiteNotFound(site_identifier.to_string()));
        }

        Ok(Site::from_row(rows.remove(0)))
    }
}
