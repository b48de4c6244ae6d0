//! Component generation.
//!
//! Renders every template-backed artifact for a content snapshot. The six
//! artifact groups run concurrently and record their own failures, so a
//! broken template in one group never stops the others.

use futures::future::join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use devcms_core::{ContentSnapshot, SchemaGraph};

use crate::context::{TemplateContext, related_posts};
use crate::error::CodegenError;
use crate::result::{GenerationResult, ResultCollector};
use crate::templates::{TemplateConfig, TemplateSet, detail_output};

/// Where templates are read from and components are written to.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub templates_path: PathBuf,
    pub output_path: PathBuf,
    /// Remove everything under `output_path` before generating.
    pub clean_output: bool,
}

impl GeneratorOptions {
    pub fn new(templates_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
            output_path: output_path.into(),
            clean_output: false,
        }
    }

    pub fn clean(mut self, clean_output: bool) -> Self {
        self.clean_output = clean_output;
        self
    }
}

/// Artifact group a render belongs to; used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Page,
    Category,
    Product,
    Navigation,
    Layout,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Page => "page",
            Self::Category => "category",
            Self::Product => "product",
            Self::Navigation => "navigation",
            Self::Layout => "layout",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single template render bound to its output path.
struct RenderJob<'a> {
    kind: ContentKind,
    template: &'a TemplateConfig,
    output: String,
    context: TemplateContext<'a>,
}

impl<'a> RenderJob<'a> {
    /// Render to the template's own output pattern.
    fn fixed(kind: ContentKind, template: &'a TemplateConfig, context: TemplateContext<'a>) -> Self {
        Self {
            kind,
            template,
            output: template.output_pattern.clone(),
            context,
        }
    }

    /// Render to a per-entity path under `components/<folder>/`.
    fn detail(
        kind: ContentKind,
        template: &'a TemplateConfig,
        folder: &str,
        slug: &str,
        context: TemplateContext<'a>,
    ) -> Self {
        Self {
            kind,
            template,
            output: detail_output(folder, slug),
            context,
        }
    }
}

/// Generates component sources from templates and a content snapshot.
#[derive(Debug, Clone)]
pub struct ComponentGenerator {
    options: GeneratorOptions,
}

impl ComponentGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Run a full generation.
    ///
    /// Never returns an error: setup failures come back as a result with
    /// `success = false`, render failures as entries in `errors`.
    pub async fn generate(&self, schema: Option<&SchemaGraph>, content: &ContentSnapshot) -> GenerationResult {
        let started = Instant::now();
        let collector = ResultCollector::new();

        if let Some(schema) = schema {
            debug!(tables = schema.tables.len(), "generating with schema attached");
        }

        if let Err(e) = self.run(content, &collector).await {
            warn!(error = %e, "component generation aborted");
            collector.fail(e.to_string());
        }

        let result = collector.finish(started.elapsed());
        info!(
            files = result.file_count(),
            errors = result.errors.len(),
            elapsed_ms = result.execution_time_ms,
            "component generation finished"
        );
        result
    }

    async fn run(&self, content: &ContentSnapshot, collector: &ResultCollector) -> Result<(), CodegenError> {
        self.prepare_output().await?;

        let templates = TemplateSet::discover(&self.options.templates_path)?;
        for warning in templates.warnings() {
            collector.warning(warning.clone());
        }

        tokio::join!(
            self.generate_posts(&templates, content, collector),
            self.generate_pages(&templates, content, collector),
            self.generate_categories(&templates, content, collector),
            self.generate_products(&templates, content, collector),
            self.generate_navigation(&templates, content, collector),
            self.generate_layout(&templates, content, collector),
        );

        Ok(())
    }

    async fn prepare_output(&self) -> Result<(), CodegenError> {
        let output = &self.options.output_path;
        let prep_err = |source| CodegenError::OutputPreparation {
            path: output.clone(),
            source,
        };

        if self.options.clean_output && output.exists() {
            clear_dir(output).await.map_err(prep_err)?;
            debug!(path = %output.display(), "output cleaned");
        }

        tokio::fs::create_dir_all(output).await.map_err(prep_err)
    }

    async fn generate_posts(&self, templates: &TemplateSet, content: &ContentSnapshot, collector: &ResultCollector) {
        let mut jobs = Vec::new();

        if let Some(template) = templates.get("post-list") {
            jobs.push(RenderJob::fixed(
                ContentKind::Post,
                template,
                TemplateContext::PostList {
                    posts: &content.posts,
                    site: &content.site,
                    navigation: &content.navigation,
                },
            ));
        }

        if let Some(template) = templates.get("post-detail") {
            for post in &content.posts {
                jobs.push(RenderJob::detail(
                    ContentKind::Post,
                    template,
                    "posts",
                    &post.slug,
                    TemplateContext::PostDetail {
                        post,
                        site: &content.site,
                        navigation: &content.navigation,
                        related_posts: related_posts(post, &content.posts),
                    },
                ));
            }
        }

        self.render_all(templates, jobs, collector).await;
    }

    async fn generate_pages(&self, templates: &TemplateSet, content: &ContentSnapshot, collector: &ResultCollector) {
        let Some(template) = templates.get("page-detail") else {
            return;
        };

        let jobs = content
            .pages
            .iter()
            .map(|page| {
                RenderJob::detail(
                    ContentKind::Page,
                    template,
                    "pages",
                    &page.slug,
                    TemplateContext::PageDetail {
                        page,
                        site: &content.site,
                        navigation: &content.navigation,
                    },
                )
            })
            .collect();

        self.render_all(templates, jobs, collector).await;
    }

    async fn generate_categories(&self, templates: &TemplateSet, content: &ContentSnapshot, collector: &ResultCollector) {
        let mut jobs = Vec::new();

        if let Some(template) = templates.get("category-list") {
            jobs.push(RenderJob::fixed(
                ContentKind::Category,
                template,
                TemplateContext::CategoryList {
                    categories: &content.categories,
                    site: &content.site,
                    navigation: &content.navigation,
                },
            ));
        }

        if let Some(template) = templates.get("category-detail") {
            for category in &content.categories {
                jobs.push(RenderJob::detail(
                    ContentKind::Category,
                    template,
                    "categories",
                    &category.slug,
                    TemplateContext::CategoryDetail {
                        category,
                        posts: content.posts_in_category(&category.id),
                        site: &content.site,
                        navigation: &content.navigation,
                    },
                ));
            }
        }

        self.render_all(templates, jobs, collector).await;
    }

    async fn generate_products(&self, templates: &TemplateSet, content: &ContentSnapshot, collector: &ResultCollector) {
        if content.products.is_empty() {
            debug!("no products, skipping product components");
            return;
        }

        let mut jobs = Vec::new();

        if let Some(template) = templates.get("product-list") {
            jobs.push(RenderJob::fixed(
                ContentKind::Product,
                template,
                TemplateContext::ProductList {
                    products: &content.products,
                    site: &content.site,
                    navigation: &content.navigation,
                },
            ));
        }

        if let Some(template) = templates.get("product-detail") {
            for product in &content.products {
                jobs.push(RenderJob::detail(
                    ContentKind::Product,
                    template,
                    "products",
                    &product.slug,
                    TemplateContext::ProductDetail {
                        product,
                        site: &content.site,
                        navigation: &content.navigation,
                    },
                ));
            }
        }

        self.render_all(templates, jobs, collector).await;
    }

    async fn generate_navigation(&self, templates: &TemplateSet, content: &ContentSnapshot, collector: &ResultCollector) {
        if let Some(template) = templates.get("navigation") {
            let job = RenderJob::fixed(
                ContentKind::Navigation,
                template,
                TemplateContext::Navigation {
                    navigation: &content.navigation,
                    site: &content.site,
                },
            );
            self.render(templates, job, collector).await;
        }
    }

    async fn generate_layout(&self, templates: &TemplateSet, content: &ContentSnapshot, collector: &ResultCollector) {
        if let Some(template) = templates.get("layout") {
            let job = RenderJob::fixed(
                ContentKind::Layout,
                template,
                TemplateContext::Layout {
                    site: &content.site,
                    navigation: &content.navigation,
                },
            );
            self.render(templates, job, collector).await;
        }
    }

    async fn render_all(&self, templates: &TemplateSet, jobs: Vec<RenderJob<'_>>, collector: &ResultCollector) {
        join_all(jobs.into_iter().map(|job| self.render(templates, job, collector))).await;
    }

    async fn render(&self, templates: &TemplateSet, job: RenderJob<'_>, collector: &ResultCollector) {
        let path = self.options.output_path.join(&job.output);

        match write_component(templates, job.template, &job.context, &path).await {
            Ok(()) => {
                debug!(kind = %job.kind, file = %path.display(), "component written");
                collector.file(path.display().to_string());
            }
            Err(e) => {
                let message = format!("{} generation failed for {}: {:#}", job.kind, job.output, e);
                warn!("{}", message);
                collector.error(message);
            }
        }
    }
}

async fn write_component(
    templates: &TemplateSet,
    template: &TemplateConfig,
    context: &TemplateContext<'_>,
    path: &Path,
) -> anyhow::Result<()> {
    let rendered = templates.render(template, context).await?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, rendered).await?;

    Ok(())
}

/// Remove every entry under `dir`, keeping `dir` itself.
async fn clear_dir(dir: &Path) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            tokio::fs::remove_dir_all(entry.path()).await?;
        } else {
            tokio::fs::remove_file(entry.path()).await?;
        }
    }
    Ok(())
}
