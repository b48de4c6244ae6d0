//! `devcms build`

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use devcms_codegen::{ComponentGenerator, GeneratorOptions, build_site};

use super::load_site;
use crate::config::Settings;
use crate::output;

#[derive(Args)]
pub struct BuildArgs {
    /// Site slug or id
    #[arg(short, long, env = "SITE_ID")]
    pub site_id: Option<String>,

    /// Output directory for generated components
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Templates directory
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Output file for the routing module
    #[arg(short, long)]
    pub routes: Option<PathBuf>,

    /// Clean the output directory before generating
    #[arg(long)]
    pub clean: bool,

    /// Do not introspect the database schema
    #[arg(long)]
    pub skip_schema: bool,

    /// Print the build result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: BuildArgs, settings: &Settings, verbose: bool) -> Result<()> {
    let site_id = settings.site_id(args.site_id);
    let routes_path = settings.routes_path(args.routes);
    let options = GeneratorOptions::new(settings.templates_path(args.templates), settings.output_path(args.output))
        .clean(args.clean);

    let pb = output::spinner("Loading content from database...", !args.json);
    let site = match load_site(settings, &site_id, !args.skip_schema, &pb).await {
        Ok(site) => site,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Generating components and routes...");
    let generator = ComponentGenerator::new(options);
    let build = build_site(&generator, site.schema.as_ref(), &site.content, &routes_path).await;
    pb.finish_and_clear();

    if args.json {
        let routes = match &build.routes {
            Ok(routes) => serde_json::json!({ "count": routes.len(), "path": routes_path, "routes": routes }),
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        let report = serde_json::json!({
            "site": site.content.site.slug,
            "components": build.components,
            "routes": routes,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_site(&site.content.site);
        output::print_generation_result(&build.components, verbose);
        println!();
        match &build.routes {
            Ok(routes) => output::print_routes(routes, verbose),
            Err(e) => println!("{} Route generation failed: {}", "✗".red().bold(), e),
        }
    }

    if !build.components.success || build.routes.is_err() {
        bail!("Build did not complete");
    }
    Ok(())
}
