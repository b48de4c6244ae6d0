//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::PathBuf;

use devcms_core::content::{ContentLoader, ContentSource};
use devcms_core::schema::{CatalogSource, SchemaIntrospector};
use devcms_core::{ContentSnapshot, DevcmsResult, SchemaGraph};
use devcms_db::DbPool;

use crate::config::Settings;

pub mod build;
pub mod components;
pub mod routes;
pub mod schema;

/// DevCMS - schema-driven site generator
#[derive(Parser)]
#[command(name = "devcms")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Config file (defaults to <project>/devcms.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// PostgreSQL connection string
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database schema to introspect
    #[arg(long, global = true, env = "DEVCMS_SCHEMA")]
    pub schema: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate components from database content
    Components(components::ComponentsArgs),

    /// Generate the routing module from database content
    Routes(routes::RoutesArgs),

    /// Introspect and display the database schema
    Schema(schema::SchemaArgs),

    /// Generate components and routes from one content load
    Build(build::BuildArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let project_dir = match self.project {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };

        let settings = Settings::resolve(project_dir, self.config.as_deref(), self.database_url, self.schema)?;
        tracing::debug!(project = %settings.project_dir.display(), schema = %settings.database.schema, "settings resolved");

        match self.command {
            Commands::Components(args) => components::execute(args, &settings, self.verbose).await,
            Commands::Routes(args) => routes::execute(args, &settings, self.verbose).await,
            Commands::Schema(args) => schema::execute(args, &settings).await,
            Commands::Build(args) => build::execute(args, &settings, self.verbose).await,
        }
    }
}

/// Schema (when requested) and content for one site.
pub(crate) struct SiteData {
    pub schema: Option<SchemaGraph>,
    pub content: ContentSnapshot,
}

/// Open a database connection for the resolved settings.
pub(crate) async fn connect(settings: &Settings) -> Result<DbPool> {
    devcms_db::init_pool(&settings.database)
        .await
        .context("Failed to connect to database")
}

/// Connect, load the site (and optionally the schema) concurrently, and
/// close the connection again.
pub(crate) async fn load_site(
    settings: &Settings,
    site_id: &str,
    with_schema: bool,
    pb: &ProgressBar,
) -> Result<SiteData> {
    pb.set_message("Connecting to database...");
    let pool = connect(settings).await?;

    pb.set_message(if with_schema {
        "Introspecting schema and loading site content..."
    } else {
        "Loading site content..."
    });
    let loaded = load_from(&pool, site_id, with_schema).await;
    pool.close().await;

    loaded.map_err(|e| {
        if e.is_site_not_found() {
            anyhow::Error::new(e).context("No matching site; set one with --site-id, SITE_ID or [site] id in devcms.toml")
        } else {
            e.into()
        }
    })
}

async fn load_from<S>(source: &S, site_id: &str, with_schema: bool) -> DevcmsResult<SiteData>
where
    S: CatalogSource + ContentSource,
{
    let introspector = SchemaIntrospector::new(source);
    let loader = ContentLoader::new(source);

    let introspect = async {
        if with_schema {
            introspector.introspect().await.map(Some)
        } else {
            Ok(None)
        }
    };

    let (schema, content) = tokio::try_join!(introspect, loader.load_for_site(site_id))?;

    Ok(SiteData { schema, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use devcms_db::queries::catalog::{ColumnRow, ForeignKeyRow, IndexRow, RelationshipRow};
    use devcms_db::queries::pages::PageRow;
    use devcms_db::queries::posts::PostRow;
    use devcms_db::queries::products::ProductRow;
    use devcms_db::queries::sites::SiteRow;
    use devcms_db::queries::taxonomy::{CategoryRow, TagRow};
    use devcms_db::DbResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeDatabase {
        sites: usize,
        catalog_calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for FakeDatabase {
        async fn columns(&self) -> DbResult<Vec<ColumnRow>> {
            self.catalog_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![ColumnRow {
                table_name: "sites".to_string(),
                column_name: "id".to_string(),
                data_type: "uuid".to_string(),
                is_nullable: false,
                column_default: None,
                character_maximum_length: None,
                numeric_precision: None,
                numeric_scale: None,
                is_primary_key: true,
                is_foreign_key: false,
            }])
        }

        async fn foreign_keys(&self, _table: &str) -> DbResult<Vec<ForeignKeyRow>> {
            Ok(Vec::new())
        }

        async fn indexes(&self, _table: &str) -> DbResult<Vec<IndexRow>> {
            Ok(Vec::new())
        }

        async fn relationships(&self) -> DbResult<Vec<RelationshipRow>> {
            self.catalog_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl ContentSource for FakeDatabase {
        async fn find_sites(&self, site: &str) -> DbResult<Vec<SiteRow>> {
            let row = SiteRow {
                id: "site-1".to_string(),
                name: "Demo".to_string(),
                slug: site.to_string(),
                description: None,
                domain: None,
                owner_id: None,
                settings: serde_json::json!({}),
                is_active: true,
                created_at: "2024-01-01".to_string(),
                updated_at: "2024-01-01".to_string(),
                owner_first_name: None,
                owner_last_name: None,
            };
            Ok(std::iter::repeat(row).take(self.sites).collect())
        }

        async fn published_posts(&self, _site: &str) -> DbResult<Vec<PostRow>> {
            Ok(Vec::new())
        }

        async fn published_pages(&self, _site: &str) -> DbResult<Vec<PageRow>> {
            Ok(Vec::new())
        }

        async fn categories(&self, _site: &str) -> DbResult<Vec<CategoryRow>> {
            Ok(Vec::new())
        }

        async fn tags(&self, _site: &str) -> DbResult<Vec<TagRow>> {
            Ok(Vec::new())
        }

        async fn active_products(&self, _site: &str) -> DbResult<Vec<ProductRow>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_load_from_joins_schema_and_content() {
        let db = FakeDatabase {
            sites: 1,
            ..Default::default()
        };
        let site = load_from(&db, "demo", true).await.unwrap();

        assert_eq!(site.content.site.slug, "demo");
        let schema = site.schema.unwrap();
        assert_eq!(schema.tables.len(), 1);
        assert_eq!(schema.tables[0].primary_key, vec!["id".to_string()]);
    }

    #[tokio::test]
    async fn test_load_from_skips_schema_when_not_requested() {
        let db = FakeDatabase {
            sites: 1,
            ..Default::default()
        };
        let site = load_from(&db, "demo", false).await.unwrap();

        assert!(site.schema.is_none());
        assert_eq!(db.catalog_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load_from_reports_missing_site() {
        let db = FakeDatabase::default();
        let err = load_from(&db, "missing", true).await.err().unwrap();
        assert!(err.is_site_not_found());
    }
}
