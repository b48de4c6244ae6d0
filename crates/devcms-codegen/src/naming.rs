//! Identifier and file-name casing.

/// `getting-started` -> `GettingStarted`.
///
/// Splits on hyphens only and upper-cases the first character of each
/// segment; the rest of each segment is kept as-is.
pub fn pascal_case(slug: &str) -> String {
    slug.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `PostGettingStarted` -> `post-getting-started`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if let Some(p) = prev {
                if p.is_ascii_lowercase() || p.is_ascii_digit() {
                    out.push('-');
                }
            }
        }
        out.push(c);
        prev = Some(c);
    }

    out.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("getting-started"), "GettingStarted");
        assert_eq!(pascal_case("db-first-design"), "DbFirstDesign");
        assert_eq!(pascal_case("about"), "About");
        assert_eq!(pascal_case("v2-release"), "V2Release");
    }

    #[test]
    fn test_pascal_case_keeps_inner_casing() {
        assert_eq!(pascal_case("iOS-tips"), "IOSTips");
        assert_eq!(pascal_case("a_b"), "A_b");
    }

    #[test]
    fn test_pascal_case_collapses_empty_segments() {
        assert_eq!(pascal_case("a--b"), "AB");
        assert_eq!(pascal_case("a-b"), "AB");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("PostGettingStarted"), "post-getting-started");
        assert_eq!(kebab_case("ProductList"), "product-list");
        assert_eq!(kebab_case("Page2Column"), "page2-column");
        assert_eq!(kebab_case("PostDBDesign"), "post-dbdesign");
        assert_eq!(kebab_case("Blog"), "blog");
    }
}
