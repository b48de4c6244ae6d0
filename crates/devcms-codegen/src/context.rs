//! Typed render contexts.
//!
//! One variant per artifact kind. Variants serialize untagged, so a template
//! sees plain top-level keys (`post`, `posts`, `site`, `navigation`, ...).

use serde::Serialize;

use devcms_core::content::model::{Category, NavigationItem, Page, Post, Product, Site};

/// Maximum number of related posts attached to a post detail.
pub const RELATED_POSTS_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TemplateContext<'a> {
    PostList {
        posts: &'a [Post],
        site: &'a Site,
        navigation: &'a [NavigationItem],
    },
    PostDetail {
        post: &'a Post,
        site: &'a Site,
        navigation: &'a [NavigationItem],
        #[serde(rename = "relatedPosts")]
        related_posts: Vec<&'a Post>,
    },
    PageDetail {
        page: &'a Page,
        site: &'a Site,
        navigation: &'a [NavigationItem],
    },
    CategoryList {
        categories: &'a [Category],
        site: &'a Site,
        navigation: &'a [NavigationItem],
    },
    CategoryDetail {
        category: &'a Category,
        posts: Vec<&'a Post>,
        site: &'a Site,
        navigation: &'a [NavigationItem],
    },
    ProductList {
        products: &'a [Product],
        site: &'a Site,
        navigation: &'a [NavigationItem],
    },
    ProductDetail {
        product: &'a Product,
        site: &'a Site,
        navigation: &'a [NavigationItem],
    },
    Navigation {
        navigation: &'a [NavigationItem],
        site: &'a Site,
    },
    Layout {
        site: &'a Site,
        navigation: &'a [NavigationItem],
    },
}

/// Other posts in the same category as `post`, in snapshot order, capped at
/// [`RELATED_POSTS_LIMIT`].
pub fn related_posts<'a>(post: &Post, posts: &'a [Post]) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|other| other.id != post.id && post.shares_category_with(other))
        .take(RELATED_POSTS_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, site};

    fn post(slug: &str, category: Option<&str>) -> Post {
        fixtures::post(slug, slug, category)
    }

    fn slugs(posts: Vec<&Post>) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_related_posts_same_category_capped() {
        let posts = vec![
            post("p1", Some("a")),
            post("p2", Some("a")),
            post("p3", Some("b")),
            post("p4", Some("a")),
            post("p5", Some("a")),
            post("p6", Some("a")),
        ];
        assert_eq!(slugs(related_posts(&posts[0], &posts)), vec!["p2", "p4", "p5"]);
        assert_eq!(slugs(related_posts(&posts[2], &posts)), Vec::<&str>::new());
    }

    #[test]
    fn test_related_posts_pair_uncategorized_posts() {
        let posts = vec![post("p1", None), post("p2", None), post("p3", Some("a"))];
        assert_eq!(slugs(related_posts(&posts[0], &posts)), vec!["p2"]);
        assert!(related_posts(&posts[2], &posts).is_empty());
    }

    #[test]
    fn test_post_detail_serializes_flat_keys() {
        let posts = vec![post("p1", Some("a")), post("p2", Some("a"))];
        let site = site();
        let ctx = TemplateContext::PostDetail {
            post: &posts[0],
            site: &site,
            navigation: &[],
            related_posts: related_posts(&posts[0], &posts),
        };

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["post"]["slug"], "p1");
        assert_eq!(json["site"]["name"], "Demo Site");
        assert_eq!(json["relatedPosts"][0]["slug"], "p2");
        assert!(json.get("PostDetail").is_none());
    }
}
