//! # DevCMS Codegen
//!
//! Generates UI component sources and the client-side routing module from a
//! loaded site content snapshot.
//!
//! Component generation and route generation are pure functions of the same
//! [`devcms_core::ContentSnapshot`]; [`build_site`] runs both concurrently
//! against one snapshot.

pub mod components;
pub mod context;
pub mod error;
#[cfg(test)]
mod fixtures;
pub mod naming;
pub mod result;
pub mod routes;
pub mod templates;

pub use components::{ComponentGenerator, ContentKind, GeneratorOptions};
pub use error::CodegenError;
pub use result::GenerationResult;
pub use routes::{RouteData, RouteEntry, generate_routes, generate_routes_file, render_routes_module, write_routes_file};
pub use templates::{TemplateConfig, TemplateSet};

use std::path::Path;

use devcms_core::{ContentSnapshot, SchemaGraph};

/// Outcome of a combined component + routes build.
#[derive(Debug)]
pub struct SiteBuild {
    pub components: GenerationResult,
    pub routes: Result<Vec<RouteEntry>, CodegenError>,
}

/// Generate components and the routes module concurrently from one snapshot.
pub async fn build_site(
    generator: &ComponentGenerator,
    schema: Option<&SchemaGraph>,
    content: &ContentSnapshot,
    routes_path: &Path,
) -> SiteBuild {
    let (components, routes) = tokio::join!(
        generator.generate(schema, content),
        generate_routes_file(content, routes_path),
    );

    SiteBuild { components, routes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_build_site_produces_components_and_routes() {
        let dir = tempdir().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir_all(templates.join("posts")).unwrap();
        fs::write(templates.join("posts/post-detail.tera"), "{{ post.title }}").unwrap();

        let generator = ComponentGenerator::new(GeneratorOptions::new(&templates, dir.path().join("out")));
        let routes_path = dir.path().join("app.routes.ts");
        let content = fixtures::blog_snapshot();

        let build = build_site(&generator, None, &content, &routes_path).await;

        assert!(build.components.success);
        assert_eq!(build.components.generated_files.len(), 2);
        let routes = build.routes.unwrap();
        assert_eq!(routes.len(), 4);
        assert!(fs::read_to_string(&routes_path).unwrap().contains("PostGettingStartedComponent"));
    }
}
