//! `devcms components`

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use devcms_codegen::{ComponentGenerator, GeneratorOptions};

use super::load_site;
use crate::config::Settings;
use crate::output;

#[derive(Args)]
pub struct ComponentsArgs {
    /// Site slug or id
    #[arg(short, long, env = "SITE_ID")]
    pub site_id: Option<String>,

    /// Output directory for generated components
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Templates directory
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Clean the output directory before generating
    #[arg(long)]
    pub clean: bool,

    /// Do not introspect the database schema
    #[arg(long)]
    pub skip_schema: bool,

    /// Print the generation result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ComponentsArgs, settings: &Settings, verbose: bool) -> Result<()> {
    let site_id = settings.site_id(args.site_id);
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

    pb.set_message("Generating components...");
    let generator = ComponentGenerator::new(options);
    let result = generator.generate(site.schema.as_ref(), &site.content).await;
    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print_site(&site.content.site);
        output::print_generation_result(&result, verbose);
        if verbose {
            println!(
                "{} {}",
                "Output:".dimmed(),
                generator.options().output_path.display()
            );
        }
    }

    if !result.success {
        bail!("Component generation failed");
    }
    Ok(())
}
