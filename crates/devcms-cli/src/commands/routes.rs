//! `devcms routes`

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::load_site;
use crate::config::Settings;
use crate::output;

#[derive(Args)]
pub struct RoutesArgs {
    /// Site slug or id
    #[arg(short, long, env = "SITE_ID")]
    pub site_id: Option<String>,

    /// Output file for the routing module
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: RoutesArgs, settings: &Settings, verbose: bool) -> Result<()> {
    let site_id = settings.site_id(args.site_id);
    let routes_path = settings.routes_path(args.output);

    let pb = output::spinner("Loading content for route generation...", true);
    let site = match load_site(settings, &site_id, false, &pb).await {
        Ok(site) => site,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing routing configuration...");
    let routes = devcms_codegen::generate_routes_file(&site.content, &routes_path).await;
    pb.finish_and_clear();

    let routes = routes.with_context(|| format!("Route generation failed for {}", routes_path.display()))?;
    output::print_routes(&routes, verbose);
    Ok(())
}
