//! Recipe dataset access
//!
//! Loads the recipe sheet from a CSV file into an in-memory SQLite
//! database and answers the lookup/browse queries the rest of the
//! application needs. The CSV reader handles quoted fields per RFC 4180
//! because ingredient cells contain embedded commas and newlines.

use crate::error::{ChefmateError, Result};
use crate::recipe::RecipeContext;
use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

/// The ingredient category flag columns of the sheet, in display order.
pub const CATEGORIES: &[&str] = &["Pork", "Beef", "Prawn", "Chicken", "Fish", "Other"];

/// One dish row from the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishRecord {
    /// English dish name
    pub name: String,
    /// Free-text ingredient list, one per line
    pub condiments: String,
    /// Free-text cooking instructions
    pub howto: String,
}

impl DishRecord {
    /// Builds the grounding context for this dish
    pub fn to_context(&self) -> RecipeContext {
        RecipeContext::from_dish(&self.name, &self.condiments, &self.howto)
    }
}

/// In-memory queryable view of the recipe sheet
#[derive(Debug)]
pub struct Dataset {
    conn: Connection,
}

impl Dataset {
    /// Loads the dataset from a CSV file
    ///
    /// # Errors
    ///
    /// Returns a dataset error if the file cannot be read or is missing
    /// a required column.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
        let dataset = Self::from_csv_str(&contents)?;
        info!(path = %path.display(), "Loaded recipe dataset");
        Ok(dataset)
    }

    /// Builds the dataset from CSV text
    pub fn from_csv_str(contents: &str) -> Result<Self> {
        let rows = parse_csv(contents);
        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| ChefmateError::Dataset("Dataset is empty".to_string()))?;

        let name_idx = column_index(&header, "name(eng)")?;
        let condiments_idx = column_index(&header, "condiments")?;
        let howto_idx = column_index(&header, "howto")?;
        let category_idx: Vec<Option<usize>> = CATEGORIES
            .iter()
            .map(|cat| column_index(&header, cat).ok())
            .collect();

        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        conn.execute(
            "CREATE TABLE dishes (
                name TEXT NOT NULL,
                condiments TEXT NOT NULL,
                howto TEXT NOT NULL,
                pork INTEGER NOT NULL DEFAULT 0,
                beef INTEGER NOT NULL DEFAULT 0,
                prawn INTEGER NOT NULL DEFAULT 0,
                chicken INTEGER NOT NULL DEFAULT 0,
                fish INTEGER NOT NULL DEFAULT 0,
                other INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )
        .context("Failed to create dishes table")?;

        let mut inserted = 0usize;
        for row in rows {
            let name = field(&row, name_idx);
            if name.trim().is_empty() {
                continue;
            }
            let flags: Vec<i64> = category_idx
                .iter()
                .map(|idx| match idx {
                    Some(i) => flag_value(field(&row, *i)),
                    None => 0,
                })
                .collect();
            conn.execute(
                "INSERT INTO dishes
                    (name, condiments, howto, pork, beef, prawn, chicken, fish, other)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    name.trim(),
                    field(&row, condiments_idx),
                    field(&row, howto_idx),
                    flags[0],
                    flags[1],
                    flags[2],
                    flags[3],
                    flags[4],
                    flags[5],
                ],
            )
            .context("Failed to insert dish row")?;
            inserted += 1;
        }

        debug!(dishes = inserted, "Populated in-memory dish table");
        Ok(Self { conn })
    }

    /// Looks up one dish by name, case-insensitively
    ///
    /// A miss is not an error; the caller falls back to the sentinel
    /// context.
    pub fn lookup(&self, name: &str) -> Result<Option<DishRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT name, condiments, howto FROM dishes
                 WHERE LOWER(name) = LOWER(?) LIMIT 1",
                params![name.trim()],
                |row| {
                    Ok(DishRecord {
                        name: row.get(0)?,
                        condiments: row.get(1)?,
                        howto: row.get(2)?,
                    })
                },
            )
            .optional()
            .context("Dish lookup failed")?;
        Ok(record)
    }

    /// Looks up a dish and returns its grounding context, or the empty
    /// sentinel when the name does not match any record
    pub fn select_dish(&self, name: &str) -> Result<RecipeContext> {
        match self.lookup(name)? {
            Some(record) => Ok(record.to_context()),
            None => {
                debug!(name, "Dish not found, using sentinel context");
                Ok(RecipeContext::empty())
            }
        }
    }

    /// All dish names, in sheet order
    pub fn list_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM dishes ORDER BY rowid")
            .context("Failed to prepare name listing")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("Failed to list dish names")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read dish name row")?;
        Ok(names)
    }

    /// Number of dishes carrying each category flag
    pub fn category_counts(&self) -> Result<Vec<(String, i64)>> {
        let row = self
            .conn
            .query_row(
                "SELECT SUM(pork), SUM(beef), SUM(prawn),
                        SUM(chicken), SUM(fish), SUM(other)
                 FROM dishes",
                [],
                |row| {
                    Ok((0..CATEGORIES.len())
                        .map(|i| row.get::<_, Option<i64>>(i).map(|v| v.unwrap_or(0)))
                        .collect::<std::result::Result<Vec<i64>, _>>()?)
                },
            )
            .context("Category count query failed")?;
        Ok(CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .zip(row)
            .collect())
    }

    /// A random dish from the given category, if the category has any
    ///
    /// # Errors
    ///
    /// Returns a dataset error for an unknown category name.
    pub fn random_by_category(&self, category: &str) -> Result<Option<DishRecord>> {
        let column = CATEGORIES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(category))
            .map(|c| c.to_lowercase())
            .ok_or_else(|| {
                ChefmateError::Dataset(format!("Unknown category: {}", category))
            })?;

        // Column name comes from the fixed CATEGORIES list, never user input.
        let query = format!(
            "SELECT name, condiments, howto FROM dishes
             WHERE {} = 1 ORDER BY RANDOM() LIMIT 1",
            column
        );
        let record = self
            .conn
            .query_row(&query, [], |row| {
                Ok(DishRecord {
                    name: row.get(0)?,
                    condiments: row.get(1)?,
                    howto: row.get(2)?,
                })
            })
            .optional()
            .context("Random dish query failed")?;
        Ok(record)
    }
}

fn column_index(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            ChefmateError::Dataset(format!("Dataset is missing the '{}' column", name)).into()
        })
}

fn field(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

fn flag_value(cell: &str) -> i64 {
    i64::from(cell.trim() == "1")
}

/// Parses CSV text per RFC 4180
///
/// Quoted fields may contain commas, newlines, and doubled quotes.
/// Handles both `\n` and `\r\n` record separators.
fn parse_csv(contents: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = contents.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        cell.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => cell.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => {
                row.push(std::mem::take(&mut cell));
            }
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut cell));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => cell.push(c),
        }
    }

    // Final record without a trailing newline
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}
