//! Dataset browsing handlers
//!
//! Read-only commands over the recipe dataset: list all dishes, show
//! one, tabulate category counts, and suggest a random dish.

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use colored::Colorize;
use prettytable::{row, Table};

/// Prints every dish name in the dataset
pub fn run_list(config: Config) -> Result<()> {
    let dataset = Dataset::load(&config.dataset.path)?;
    let names = dataset.list_names()?;
    println!("{}", format!("{} dishes:", names.len()).bold());
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}

/// Prints the ingredients and instructions for one dish
pub fn run_show(config: Config, name: String) -> Result<()> {
    let dataset = Dataset::load(&config.dataset.path)?;
    match dataset.lookup(&name)? {
        Some(record) => {
            let context = record.to_context();
            println!("{}", context.name.bold().green());
            println!("\n{}", "Ingredients:".bold());
            for line in context.ingredient_lines() {
                println!("  - {}", line);
            }
            println!("\n{}", "Instructions:".bold());
            println!("{}", context.instructions);
        }
        None => {
            println!("{}", format!("No dish named '{}' in the dataset.", name).yellow());
        }
    }
    Ok(())
}

/// Prints a table of dish counts per ingredient category
pub fn run_categories(config: Config) -> Result<()> {
    let dataset = Dataset::load(&config.dataset.path)?;
    let counts = dataset.category_counts()?;

    let mut table = Table::new();
    table.add_row(row!["Category", "Dishes"]);
    for (category, count) in counts {
        table.add_row(row![category, count]);
    }

    println!();
    table.printstd();
    println!();
    Ok(())
}

/// Suggests a random dish from a category
pub fn run_suggest(config: Config, category: String) -> Result<()> {
    let dataset = Dataset::load(&config.dataset.path)?;
    match dataset.random_by_category(&category)? {
        Some(record) => {
            println!(
                "{}",
                format!("How about {} today?", record.name).bold().green()
            );
            println!("\n{}", "Ingredients:".bold());
            for line in record.to_context().ingredient_lines() {
                println!("  - {}", line);
            }
        }
        None => {
            println!(
                "{}",
                format!("No dishes in the '{}' category.", category).yellow()
            );
        }
    }
    Ok(())
}
