//! Template discovery, output patterns and rendering.
//!
//! Templates are `.tera` files anywhere under the templates directory,
//! addressed by base name. The directory a template lives in is its content
//! type, used only when the name has no fixed output pattern.

use anyhow::Context as _;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::Tera;
use walkdir::WalkDir;

use crate::context::TemplateContext;
use crate::error::CodegenError;

/// Extension of template files.
pub const TEMPLATE_EXTENSION: &str = "tera";

/// Extension of generated component files.
pub const COMPONENT_EXTENSION: &str = "component.ts";

/// Content type for templates placed directly in the templates root.
pub const ROOT_CONTENT_TYPE: &str = "shared";

/// Canonical output paths for known template names.
///
/// Anything not listed falls back to `components/<content type>/<name>.component.ts`.
pub const OUTPUT_PATTERNS: &[(&str, &str)] = &[
    ("post-detail", "components/posts/post-detail.component.ts"),
    ("post-list", "components/posts/post-list.component.ts"),
    ("page-detail", "components/pages/page-detail.component.ts"),
    ("category-detail", "components/categories/category-detail.component.ts"),
    ("category-list", "components/categories/category-list.component.ts"),
    ("product-detail", "components/products/product-detail.component.ts"),
    ("product-list", "components/products/product-list.component.ts"),
    ("navigation", "components/shared/navigation.component.ts"),
    ("layout", "components/shared/layout.component.ts"),
];

/// Resolve the relative output path for a template.
pub fn output_pattern(name: &str, content_type: &str) -> String {
    OUTPUT_PATTERNS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, pattern)| pattern.to_string())
        .unwrap_or_else(|| format!("components/{}/{}.{}", content_type, name, COMPONENT_EXTENSION))
}

/// Relative output path of a per-entity detail component.
pub fn detail_output(folder: &str, slug: &str) -> String {
    format!("components/{}/{}.{}", folder, slug, COMPONENT_EXTENSION)
}

/// One discovered template file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateConfig {
    pub name: String,
    pub path: PathBuf,
    /// Path relative to the templates root, `/`-joined. Other templates
    /// include or extend this one by that name.
    pub relative_path: String,
    pub content_type: String,
    pub output_pattern: String,
}

/// Templates discovered under a directory, keyed by base name.
#[derive(Debug, Default)]
pub struct TemplateSet {
    templates: HashMap<String, TemplateConfig>,
    /// Every template file as `(relative path, absolute path)`, sorted.
    files: Vec<(String, PathBuf)>,
    warnings: Vec<String>,
}

impl TemplateSet {
    /// Walk `root` recursively and register every template file.
    ///
    /// Files are registered in sorted relative-path order, so when two files
    /// share a base name the later path wins; each override is reported as
    /// a warning.
    pub fn discover(root: &Path) -> Result<Self, CodegenError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| CodegenError::TemplateDiscovery(e.to_string()))?;
            let path = entry.path();

            if entry.file_type().is_file() && path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXTENSION) {
                let relative = path.strip_prefix(root).unwrap_or(path);
                files.push((slash_path(relative), path.to_path_buf()));
            }
        }
        files.sort();

        let mut set = Self::default();
        for (relative_path, path) in &files {
            let relative = path.strip_prefix(root).unwrap_or(path);
            let name = match relative.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let content_type = content_type_of(relative);

            let config = TemplateConfig {
                output_pattern: output_pattern(&name, &content_type),
                name: name.clone(),
                path: path.clone(),
                relative_path: relative_path.clone(),
                content_type,
            };

            if let Some(previous) = set.templates.insert(name.clone(), config) {
                set.warnings.push(format!(
                    "Duplicate template name '{}': {} overrides {}",
                    name,
                    path.display(),
                    previous.path.display()
                ));
            }
        }
        set.files = files;

        if set.is_empty() {
            set.warnings
                .push(format!("No .{} templates found in {}", TEMPLATE_EXTENSION, root.display()));
        }

        tracing::debug!(count = set.len(), files = set.files.len(), root = %root.display(), "templates discovered");

        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates.get(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Warnings collected during discovery.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Render `template` against a context.
    ///
    /// Every discovered file is registered under its relative path so
    /// `{% include %}`, `{% extends %}` and `{% import %}` resolve. Files are
    /// read and parsed per call: if a sibling is unreadable or malformed the
    /// template is rendered on its own, so only renders that actually depend
    /// on the broken file fail.
    pub async fn render(&self, template: &TemplateConfig, context: &TemplateContext<'_>) -> anyhow::Result<String> {
        let source = tokio::fs::read_to_string(&template.path)
            .await
            .with_context(|| format!("Failed to read template {}", template.path.display()))?;

        let context = tera::Context::from_serialize(context)
            .with_context(|| format!("Failed to build context for {}", template.path.display()))?;

        let mut sources = vec![(template.relative_path.clone(), source.clone())];
        for (relative_path, path) in &self.files {
            if *relative_path == template.relative_path {
                continue;
            }
            if let Ok(sibling) = tokio::fs::read_to_string(path).await {
                sources.push((relative_path.clone(), sibling));
            }
        }

        let tera = match engine(sources) {
            Ok(tera) => tera,
            Err(_) => engine(vec![(template.relative_path.clone(), source)])
                .with_context(|| format!("Failed to parse template {}", template.path.display()))?,
        };

        tera.render(&template.relative_path, &context)
            .with_context(|| format!("Failed to render template {}", template.path.display()))
    }
}

/// Build a non-escaping engine holding `sources`.
fn engine(sources: Vec<(String, String)>) -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_templates(sources)?;
    Ok(tera)
}

/// `/`-joined form of a relative path.
fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent directory of a template relative to the root, `/`-joined.
fn content_type_of(relative: &Path) -> String {
    let parent = relative.parent().map(slash_path).unwrap_or_default();

    if parent.is_empty() {
        ROOT_CONTENT_TYPE.to_string()
    } else {
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use devcms_core::content::model::Site;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_output_pattern_known_names() {
        assert_eq!(output_pattern("post-list", "posts"), "components/posts/post-list.component.ts");
        assert_eq!(output_pattern("navigation", "anything"), "components/shared/navigation.component.ts");
        assert_eq!(output_pattern("layout", "shared"), "components/shared/layout.component.ts");
    }

    #[test]
    fn test_output_pattern_fallback() {
        assert_eq!(output_pattern("hero", "widgets"), "components/widgets/hero.component.ts");
    }

    #[test]
    fn test_discover_nested_templates() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::create_dir_all(dir.path().join("widgets/cards")).unwrap();
        fs::write(dir.path().join("posts/post-list.tera"), "list").unwrap();
        fs::write(dir.path().join("widgets/cards/hero.tera"), "hero").unwrap();
        fs::write(dir.path().join("layout.tera"), "layout").unwrap();
        fs::write(dir.path().join("posts/README.md"), "ignored").unwrap();

        let set = TemplateSet::discover(dir.path()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.warnings().is_empty());

        let list = set.get("post-list").unwrap();
        assert_eq!(list.content_type, "posts");
        assert_eq!(list.output_pattern, "components/posts/post-list.component.ts");

        let hero = set.get("hero").unwrap();
        assert_eq!(hero.content_type, "widgets/cards");
        assert_eq!(hero.output_pattern, "components/widgets/cards/hero.component.ts");

        assert_eq!(set.get("layout").unwrap().content_type, "shared");
        assert!(set.get("README").is_none());
    }

    #[test]
    fn test_duplicate_names_warn_and_last_wins() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/navigation.tera"), "a").unwrap();
        fs::write(dir.path().join("b/navigation.tera"), "b").unwrap();

        let set = TemplateSet::discover(dir.path()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get("navigation").unwrap().path.ends_with("b/navigation.tera"));
        assert_eq!(set.warnings().len(), 1);
        assert!(set.warnings()[0].contains("Duplicate template name 'navigation'"));
    }

    #[test]
    fn test_duplicate_names_follow_full_path_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("a-b")).unwrap();
        fs::write(dir.path().join("a/x.tera"), "a").unwrap();
        fs::write(dir.path().join("a-b/x.tera"), "a-b").unwrap();

        let set = TemplateSet::discover(dir.path()).unwrap();
        let x = set.get("x").unwrap();
        assert_eq!(x.relative_path, "a/x.tera");
        assert_eq!(x.content_type, "a");
    }

    #[test]
    fn test_empty_directory_warns() {
        let dir = tempdir().unwrap();
        let set = TemplateSet::discover(dir.path()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.warnings().len(), 1);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let err = TemplateSet::discover(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CodegenError::TemplateDiscovery(_)));
    }

    fn layout_context(site: &Site) -> TemplateContext<'_> {
        TemplateContext::Layout { site, navigation: &[] }
    }

    #[tokio::test]
    async fn test_render_resolves_includes_and_extends() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("partials")).unwrap();
        fs::create_dir_all(dir.path().join("shared")).unwrap();
        fs::write(dir.path().join("partials/brand.tera"), "[{{ site.name }}]").unwrap();
        fs::write(
            dir.path().join("partials/base.tera"),
            "<main>{% block body %}{% endblock body %}</main>",
        )
        .unwrap();
        fs::write(
            dir.path().join("shared/layout.tera"),
            "{% extends \"partials/base.tera\" %}{% block body %}{% include \"partials/brand.tera\" %}{% endblock body %}",
        )
        .unwrap();

        let set = TemplateSet::discover(dir.path()).unwrap();
        let site = fixtures::site();
        let rendered = set.render(set.get("layout").unwrap(), &layout_context(&site)).await.unwrap();
        assert_eq!(rendered, "<main>[Demo Site]</main>");
    }

    #[tokio::test]
    async fn test_broken_sibling_only_fails_dependents() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.tera"), "{% for x in %}").unwrap();
        fs::write(dir.path().join("layout.tera"), "{{ site.name }} & co").unwrap();
        fs::write(dir.path().join("navigation.tera"), "{% include \"broken.tera\" %}").unwrap();

        let set = TemplateSet::discover(dir.path()).unwrap();
        let site = fixtures::site();

        let layout = set.render(set.get("layout").unwrap(), &layout_context(&site)).await.unwrap();
        assert_eq!(layout, "Demo Site & co");

        let err = set
            .render(set.get("navigation").unwrap(), &layout_context(&site))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("navigation.tera"));
    }
}
