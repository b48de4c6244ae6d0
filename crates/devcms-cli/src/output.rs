//! Terminal output formatting.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use devcms_codegen::{GenerationResult, RouteEntry};
use devcms_core::content::model::Site;
use devcms_core::schema::model::Column;
use devcms_core::SchemaGraph;

/// Start a spinner, or a hidden bar when output is machine-readable.
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One schema column as `name[?]: type [(PK)] [(FK)]`.
pub fn format_column(column: &Column) -> String {
    format!(
        "{}{}: {}{}{}",
        column.name,
        if column.nullable { "?" } else { "" },
        column.data_type,
        if column.is_primary_key { " (PK)" } else { "" },
        if column.is_foreign_key { " (FK)" } else { "" },
    )
}

pub fn print_schema(schema: &SchemaGraph) {
    println!("{}", "Database Schema:".blue().bold());

    if schema.tables.is_empty() {
        println!("{}", "  No tables found.".dimmed());
        return;
    }

    for table in &schema.tables {
        println!();
        println!("  {}", format!("{}:", table.name).yellow());
        for column in &table.columns {
            println!("    {}", format_column(column));
        }
        if !table.indexes.is_empty() {
            let names: Vec<&str> = table.indexes.iter().map(|i| i.name.as_str()).collect();
            println!("    {} {}", "indexes:".dimmed(), names.join(", ").dimmed());
        }
    }

    if !schema.relationships.is_empty() {
        println!();
        println!("{}", "Relationships:".blue().bold());
        for rel in &schema.relationships {
            println!(
                "  {}.{} -> {}.{} {}",
                rel.table,
                rel.column,
                rel.referenced_table,
                rel.referenced_column,
                format!("({})", rel.relationship_type).dimmed()
            );
        }
    }
}

/// Short description of the site content was loaded for.
pub fn print_site(site: &Site) {
    let owner = site
        .owner
        .as_ref()
        .map(|o| format!(" owned by {}", o.full_name()))
        .unwrap_or_default();
    println!("{} {}{}", "Site:".bold(), site.name.cyan(), owner.dimmed());
}

pub fn print_generation_result(result: &GenerationResult, verbose: bool) {
    if result.success {
        println!(
            "{} Generated {} components",
            "✓".green().bold(),
            result.file_count()
        );
    } else {
        println!("{} Component generation failed", "✗".red().bold());
    }

    if verbose {
        for file in &result.generated_files {
            println!("  {}", file.dimmed());
        }
    }

    if !result.warnings.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow());
        for warning in &result.warnings {
            println!("{}", format!("  - {}", warning).yellow());
        }
    }

    if result.has_errors() {
        println!();
        println!("{}", "Errors:".red());
        for error in &result.errors {
            println!("{}", format!("  - {}", error).red());
        }
    }

    println!();
    println!("{}", format!("Execution time: {}ms", result.execution_time_ms).blue());
}

pub fn print_routes(routes: &[RouteEntry], verbose: bool) {
    println!(
        "{} Generated routing configuration with {} routes",
        "✓".green().bold(),
        routes.len()
    );

    if verbose {
        for route in routes {
            let path = if route.path.is_empty() { "/" } else { route.path.as_str() };
            println!("  {:<40} {}", path, route.component.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(nullable: bool, pk: bool, fk: bool) -> Column {
        Column {
            name: "author_id".to_string(),
            data_type: "uuid".to_string(),
            nullable,
            default_value: None,
            is_primary_key: pk,
            is_foreign_key: fk,
            max_length: None,
            precision: None,
            scale: None,
        }
    }

    #[test]
    fn test_format_column() {
        assert_eq!(format_column(&column(false, false, false)), "author_id: uuid");
        assert_eq!(format_column(&column(true, false, true)), "author_id?: uuid (FK)");
        assert_eq!(format_column(&column(false, true, true)), "author_id: uuid (PK) (FK)");
    }
}
