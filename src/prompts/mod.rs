//! System instructions for the AI chef
//!
//! This module builds the grounding instruction sent with every
//! completion request. The instruction embeds the active recipe context
//! verbatim and is rebuilt from the live context on each request, so a
//! context switch is always reflected in the next call.

pub mod chef_prompt;
pub mod video_prompt;

use crate::recipe::{ContextSource, RecipeContext};

/// Builds the system instruction for the given recipe context
///
/// Pure and total: any context, including the empty sentinel, produces a
/// usable instruction. Dish contexts get the structured recipe prompt;
/// video contexts get the transcript-derived variant.
///
/// # Arguments
///
/// * `context` - The active recipe context to ground the assistant in
///
/// # Returns
///
/// The complete system instruction text
///
/// # Examples
///
/// ```
/// use chefmate::prompts::build_system_instruction;
/// use chefmate::recipe::RecipeContext;
///
/// let ctx = RecipeContext::from_dish("Tom Yum", "shrimp", "boil broth");
/// let instruction = build_system_instruction(&ctx);
/// assert!(instruction.contains("Tom Yum"));
/// ```
pub fn build_system_instruction(context: &RecipeContext) -> String {
    match &context.source {
        ContextSource::Video(_) => video_prompt::generate_video_chat_instruction(context),
        _ => chef_prompt::generate_chef_instruction(context),
    }
}
