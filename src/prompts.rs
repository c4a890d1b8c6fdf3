//! Prompt templates for the external text-extraction service.
//!
//! All three prompts demand JSON-only output; the service layer rejects
//! anything that does not parse.

use crate::model::Recipe;

/// JSON schema shared by the recipe-extraction prompts.
const RECIPE_SCHEMA: &str = r#"Output valid JSON matching this schema:
{
  "recipe_name": "string",
  "description": "string (1-2 sentences)",
  "prep_time": "string or null",
  "cook_time": "string or null",
  "total_time": "string or null",
  "servings": "number or null",
  "cuisine": "string or null",
  "dish_type": "string or null",
  "dietary": ["array of tags"],
  "ingredients": [
    {"quantity": "string", "item": "string", "inferred": boolean}
  ],
  "instructions": [
    {"step": number, "text": "string", "time": "string or null"}
  ],
  "needs_review": boolean,
  "confidence_notes": "string"
}"#;

/// Verbatim extraction of a recipe already written out in a video description.
pub const DESCRIPTION_EXTRACTION_PROMPT: &str = r#"You are a recipe extraction assistant. The video description below contains
a written-out recipe. Copy it into structured form.

Rules:
- Transcribe the ingredients and steps EXACTLY as written; do not invent,
  reorder, or fill in missing quantities
- If a field is not present in the description, use null
- Ignore links, social media handles, and sponsorship text
- Set "inferred": false for everything taken verbatim"#;

/// Inference of a recipe from the full set of video signals, transcript
/// included. Used as the last-resort stage, so inference is expected.
pub const TRANSCRIPT_EXTRACTION_PROMPT: &str = r#"You are a recipe extraction assistant. Given a cooking video's transcript
and description, extract a structured recipe.

Rules:
- Extract ONLY what is shown/said in the video
- When inferring (timing, quantities, temperatures), mark with "(estimated)"
- If a field cannot be determined, use null
- Set needs_review: true if significant inference was required
- List confidence_notes explaining what was inferred vs explicit"#;

/// Extraction of supplementary tips from a transcript, excluding anything the
/// recipe already covers.
pub const TIPS_EXTRACTION_PROMPT: &str = r#"You are a cooking assistant. Extract practical cooking tips from the video
transcript below.

Rules:
- Only include tips NOT already covered by the known ingredients and
  instructions listed below
- Skip banter, sponsorships, channel promotion, and serving suggestions
  already in the recipe
- Each tip is one short, self-contained sentence
- Output a JSON array of strings and nothing else; output [] if there are
  no genuine tips"#;

/// Assemble the description-extraction prompt with the video signals.
pub fn build_description_prompt(title: &str, channel: &str, description: &str) -> String {
    format!(
        "{DESCRIPTION_EXTRACTION_PROMPT}\n\n{RECIPE_SCHEMA}\n\n\
         VIDEO TITLE: {}\nCHANNEL: {}\n\nDESCRIPTION:\n{}",
        non_empty(title, "Unknown"),
        non_empty(channel, "Unknown"),
        non_empty(description, "No description"),
    )
}

/// Assemble the transcript-fallback prompt with every signal we have.
pub fn build_transcript_prompt(
    title: &str,
    channel: &str,
    description: &str,
    transcript: &str,
) -> String {
    format!(
        "{TRANSCRIPT_EXTRACTION_PROMPT}\n\n{RECIPE_SCHEMA}\n\n\
         VIDEO TITLE: {}\nCHANNEL: {}\n\nDESCRIPTION:\n{}\n\nTRANSCRIPT:\n{}",
        non_empty(title, "Unknown"),
        non_empty(channel, "Unknown"),
        non_empty(description, "No description"),
        non_empty(transcript, "No transcript"),
    )
}

/// Assemble the tips prompt with the recipe's known content spelled out so the
/// service can exclude duplicates.
pub fn build_tips_prompt(recipe: &Recipe, transcript: &str) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| format!("- {} {} {}", i.amount, i.unit, i.item))
        .collect::<Vec<_>>()
        .join("\n");
    let instructions = recipe
        .instructions
        .iter()
        .map(|i| format!("{}. {}", i.step, i.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{TIPS_EXTRACTION_PROMPT}\n\nKNOWN INGREDIENTS:\n{}\n\n\
         KNOWN INSTRUCTIONS:\n{}\n\nTRANSCRIPT:\n{}",
        ingredients, instructions, transcript,
    )
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Provenance;

    #[test]
    fn test_description_prompt_carries_signals() {
        let prompt = build_description_prompt("Best Ragu", "PastaChannel", "Ingredients:\n...");
        assert!(prompt.contains("Best Ragu"));
        assert!(prompt.contains("PastaChannel"));
        assert!(prompt.contains("recipe_name"));
    }

    #[test]
    fn test_blank_signals_get_placeholders() {
        let prompt = build_transcript_prompt("", "", "", "");
        assert!(prompt.contains("VIDEO TITLE: Unknown"));
        assert!(prompt.contains("No transcript"));
    }

    #[test]
    fn test_tips_prompt_lists_known_content() {
        let mut recipe = Recipe::empty(Provenance::Webpage);
        recipe.ingredients.push(crate::model::Ingredient {
            amount: "2".to_string(),
            unit: "whole".to_string(),
            item: "eggs".to_string(),
            inferred: false,
        });
        recipe.instructions.push(crate::model::Instruction {
            step: 1,
            text: "Whisk the eggs".to_string(),
            duration: None,
        });

        let prompt = build_tips_prompt(&recipe, "some transcript");
        assert!(prompt.contains("- 2 whole eggs"));
        assert!(prompt.contains("1. Whisk the eggs"));
        assert!(prompt.contains("some transcript"));
    }
}
