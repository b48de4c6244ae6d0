//! `devcms schema`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use devcms_core::schema::SchemaIntrospector;

use super::connect;
use crate::config::Settings;
use crate::output;

#[derive(Args)]
pub struct SchemaArgs {
    /// Print the schema graph as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: SchemaArgs, settings: &Settings) -> Result<()> {
    let pb = output::spinner("Introspecting database schema...", !args.json);

    let pool = match connect(settings).await {
        Ok(pool) => pool,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    let schema = SchemaIntrospector::new(&pool).introspect().await;
    pool.close().await;
    pb.finish_and_clear();

    let schema = schema?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        println!(
            "{} Schema introspection complete ({} tables in '{}')",
            "✓".green().bold(),
            schema.tables.len(),
            settings.database.schema
        );
        println!();
        output::print_schema(&schema);
    }

    Ok(())
}
