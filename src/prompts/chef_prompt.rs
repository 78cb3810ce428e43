//! Dish-grounded system instruction
//!
//! This module provides the system instruction for conversations
//! grounded in a dish from the recipe dataset. The three context fields
//! are embedded verbatim, with no truncation.

use crate::recipe::RecipeContext;

/// Generates the system instruction for a dish-grounded conversation
///
/// Fixes the assistant's persona (expert Thai chef), embeds the recipe
/// fields as ground truth, and states the behavioral guardrails. Total
/// over any context, including the empty sentinel.
///
/// # Arguments
///
/// * `context` - The active recipe context
///
/// # Returns
///
/// The system instruction string
///
/// # Examples
///
/// ```
/// use chefmate::prompts::chef_prompt::generate_chef_instruction;
/// use chefmate::recipe::RecipeContext;
///
/// let instruction = generate_chef_instruction(&RecipeContext::empty());
/// assert!(instruction.contains("Thai chef"));
/// ```
pub fn generate_chef_instruction(context: &RecipeContext) -> String {
    format!(
        r#"Role: You are an expert Thai chef helping a home cook.

Context: The user is asking about the following dish. Treat this recipe
information as ground truth for your answers.

Name: {}
Ingredients: {}
Instructions: {}

Guidelines:
- Stay in character as a friendly, knowledgeable chef.
- Base your answers on the recipe above; do not fabricate facts about it.
- You may suggest reasonable ingredient substitutions and technique tips.
- If no dish is selected, help the user choose one and answer general
  cooking questions.
"#,
        context.name, context.ingredients, context.instructions
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chef_instruction_embeds_all_fields() {
        let ctx = RecipeContext::from_dish(
            "Massaman Curry",
            "beef\npotatoes\npeanuts",
            "simmer until tender",
        );
        let instruction = generate_chef_instruction(&ctx);
        assert!(instruction.contains("Massaman Curry"));
        assert!(instruction.contains("beef\npotatoes\npeanuts"));
        assert!(instruction.contains("simmer until tender"));
    }

    #[test]
    fn test_chef_instruction_is_deterministic() {
        let ctx = RecipeContext::from_dish("Pad Thai", "noodles", "stir fry");
        assert_eq!(
            generate_chef_instruction(&ctx),
            generate_chef_instruction(&ctx)
        );
    }

    #[test]
    fn test_chef_instruction_handles_sentinel() {
        let instruction = generate_chef_instruction(&RecipeContext::empty());
        assert!(instruction.contains("No dish selected"));
        assert!(instruction.contains("No ingredients available"));
        assert!(instruction.contains("No instructions available"));
    }

    #[test]
    fn test_chef_instruction_states_guardrails() {
        let instruction = generate_chef_instruction(&RecipeContext::empty());
        assert!(instruction.contains("ground truth"));
        assert!(instruction.to_lowercase().contains("substitutions"));
        assert!(instruction.to_lowercase().contains("do not fabricate"));
    }
}
