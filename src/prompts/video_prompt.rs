//! Video-derived system instructions
//!
//! Two instructions live here: the extraction prompt that turns a raw
//! caption transcript into a recipe, and the chat instruction for
//! conversations grounded in that extracted recipe.

use crate::recipe::RecipeContext;

/// Generates the system instruction for a video-grounded conversation
///
/// The extracted recipe text is embedded verbatim as the grounding
/// payload.
///
/// # Arguments
///
/// * `context` - A recipe context produced by `RecipeContext::from_extracted`
///
/// # Returns
///
/// The system instruction string
pub fn generate_video_chat_instruction(context: &RecipeContext) -> String {
    format!(
        r#"Role: You are an expert Thai chef.

Context: The user is asking about a specific recipe derived from a
YouTube video. Here is the recipe information you extracted earlier:

{}

Guidelines:
- Stay in character as a friendly, knowledgeable chef.
- Base your answers on the extracted recipe; do not fabricate details
  that are not supported by it.
- You may suggest reasonable ingredient substitutions and technique tips.
"#,
        context.instructions
    )
}

/// Generates the one-shot instruction used to extract a recipe from a
/// raw video caption transcript
///
/// # Returns
///
/// The extraction instruction string; the transcript itself is sent as
/// the user content of the request.
pub fn generate_extraction_instruction() -> String {
    r#"Role: You are an expert Chef.

Task: Read the following video transcript and extract the recipe.

Output Format: Please provide a clear title, then a list of Ingredients,
then Instructions. If the transcript does not describe a recipe, say so
briefly instead of inventing one.
"#
    .to_string()
}
