//! Navigation derived from published pages.

use super::model::{LinkTarget, NavigationItem, Page};

/// Build the navigation list: one entry per page shown in navigation,
/// ordered by `navigation_order` (stable for equal orders).
pub fn build_navigation(pages: &[Page]) -> Vec<NavigationItem> {
    let mut items: Vec<NavigationItem> = pages
        .iter()
        .filter(|page| page.show_in_navigation)
        .map(|page| {
            let is_external = false;
            NavigationItem {
                id: page.id.clone(),
                title: page.title.clone(),
                url: page_url(page),
                order: page.navigation_order,
                is_external,
                target: LinkTarget::for_link(is_external),
                children: Vec::new(),
            }
        })
        .collect();

    items.sort_by_key(|item| item.order);
    items
}

/// Public URL of a page: `/` for the homepage, `/<slug>` otherwise.
pub fn page_url(page: &Page) -> String {
    if page.is_homepage {
        "/".to_string()
    } else {
        format!("/{}", page.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(slug: &str, order: i32, nav: bool, home: bool) -> Page {
        Page {
            id: slug.to_string(),
            site_id: "s".to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            content: None,
            excerpt: None,
            meta_title: None,
            meta_description: None,
            status: "published".to_string(),
            is_homepage: home,
            show_in_navigation: nav,
            navigation_order: order,
            template_override: None,
            published_at: None,
            author_id: None,
            created_at: String::new(),
            updated_at: String::new(),
            author: None,
        }
    }

    #[test]
    fn test_only_navigation_pages_sorted_by_order() {
        let pages = vec![
            page("contact", 9, true, false),
            page("legal", 1, false, false),
            page("about", 3, true, false),
            page("home", 5, true, true),
        ];
        let nav = build_navigation(&pages);
        let titles: Vec<_> = nav.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["about", "home", "contact"]);
        assert_eq!(nav[1].url, "/");
        assert_eq!(nav[0].url, "/about");
    }

    #[test]
    fn test_equal_orders_keep_page_order() {
        let pages = vec![page("b", 1, true, false), page("a", 1, true, false)];
        let nav = build_navigation(&pages);
        assert_eq!(nav[0].title, "b");
        assert_eq!(nav[1].title, "a");
    }

    #[test]
    fn test_navigation_item_shape() {
        let nav = build_navigation(&[page("about", 0, true, false)]);
        let json = serde_json::to_value(&nav[0]).unwrap();
        assert_eq!(json["target"], "_self");
        assert_eq!(json["is_external"], false);
        assert_eq!(json["children"], serde_json::json!([]));
    }

    #[test]
    fn test_no_navigation_pages() {
        assert!(build_navigation(&[page("x", 0, false, false)]).is_empty());
    }
}
