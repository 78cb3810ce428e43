//! Recipe grounding context
//!
//! A `RecipeContext` is the immutable snapshot of grounding data for one
//! chat session: the dish name, its ingredient list, and its cooking
//! instructions. Every field carries an explicit "not selected" sentinel
//! instead of being absent, so prompt building is total and never fails
//! on missing context. A context is replaced, never mutated, when the
//! user selects a different dish or processes a new video.

use serde::{Deserialize, Serialize};

/// Sentinel shown when no dish has been selected yet.
pub const NO_DISH_SELECTED: &str = "No dish selected";
/// Sentinel for the ingredient list of an unselected dish.
pub const NO_INGREDIENTS: &str = "No ingredients available";
/// Sentinel for the instructions of an unselected dish.
pub const NO_INSTRUCTIONS: &str = "No instructions available";

/// Identifies which grounding payload a context was built from.
///
/// Used by the chat session to decide whether a reselection actually
/// changed the active context (and therefore whether the transcript
/// must be reset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextSource {
    /// No dish or video selected yet
    None,
    /// A dish from the dataset, keyed by its name
    Dish(String),
    /// A recipe extracted from a video, keyed by the video id
    Video(String),
}

/// Immutable grounding snapshot for one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeContext {
    /// Dish name (or the "not selected" sentinel)
    pub name: String,
    /// Free-text ingredient list, one ingredient per line; lines may be
    /// empty and are filtered out on display
    pub ingredients: String,
    /// Free-text cooking instructions, possibly in a different language
    /// than the UI
    pub instructions: String,
    /// Where this context came from
    pub source: ContextSource,
}

impl RecipeContext {
    /// The empty sentinel context, used before any selection and when a
    /// dish lookup misses.
    pub fn empty() -> Self {
        Self {
            name: NO_DISH_SELECTED.to_string(),
            ingredients: NO_INGREDIENTS.to_string(),
            instructions: NO_INSTRUCTIONS.to_string(),
            source: ContextSource::None,
        }
    }

    /// Build a context from a dataset dish record.
    pub fn from_dish(name: &str, ingredients: &str, instructions: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: ingredients.to_string(),
            instructions: instructions.to_string(),
            source: ContextSource::Dish(name.to_string()),
        }
    }

    /// Wrap a recipe extracted from a video transcript.
    ///
    /// The extracted text is free-form (title, ingredients, and steps in
    /// one block), so it becomes the instructions payload and the other
    /// fields keep their sentinels.
    pub fn from_extracted(video_id: &str, recipe_text: &str) -> Self {
        Self {
            name: format!("Recipe from video {}", video_id),
            ingredients: NO_INGREDIENTS.to_string(),
            instructions: recipe_text.to_string(),
            source: ContextSource::Video(video_id.to_string()),
        }
    }

    /// True when this is the empty sentinel context.
    pub fn is_empty(&self) -> bool {
        self.source == ContextSource::None
    }

    /// Ingredient lines with empty entries filtered out, for display.
    pub fn ingredient_lines(&self) -> Vec<&str> {
        self.ingredients
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl Default for RecipeContext {
    fn default() -> Self {
        Self::empty()
    }
}
