use crate::ingredient::IngredientParser;
use crate::model::{Ingredient, Instruction, Provenance, Recipe};
use crate::prompts;
use crate::service::ExtractionService;
use log::warn;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Turns free text into a recipe via the external extraction service, then
/// validates and normalizes the service's JSON against the canonical schema.
///
/// Both entry points are best-effort: any service failure, non-JSON output,
/// or a response with no usable ingredients or instructions yields None.
pub struct TextRecipeExtractor {
    service: Arc<dyn ExtractionService>,
    ingredients: IngredientParser,
}

impl TextRecipeExtractor {
    pub fn new(service: Arc<dyn ExtractionService>, ingredients: IngredientParser) -> Self {
        TextRecipeExtractor {
            service,
            ingredients,
        }
    }

    /// Extract a recipe written out verbatim in the video description.
    pub async fn from_description(
        &self,
        title: &str,
        channel: &str,
        description: &str,
    ) -> Option<Recipe> {
        let prompt = prompts::build_description_prompt(title, channel, description);
        let value = match self.service.extract_json(&prompt).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Description extraction failed: {}", e);
                return None;
            }
        };
        let mut recipe = self.recipe_from_value(&value, Provenance::InlineDescription)?;
        recipe.needs_review = false;
        if recipe.confidence_notes.is_empty() {
            recipe.confidence_notes =
                "Recipe copied verbatim from the video description.".to_string();
        }
        Some(recipe)
    }

    /// Last-resort extraction from the full set of video signals. The result
    /// is inference, so it is always flagged for review.
    pub async fn from_transcript(
        &self,
        title: &str,
        channel: &str,
        description: &str,
        transcript: &str,
    ) -> Option<Recipe> {
        let prompt = prompts::build_transcript_prompt(title, channel, description, transcript);
        let value = match self.service.extract_json(&prompt).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Transcript extraction failed: {}", e);
                return None;
            }
        };
        let mut recipe = self.recipe_from_value(&value, Provenance::TextExtraction)?;
        recipe.needs_review = true;
        if recipe.confidence_notes.is_empty() {
            recipe.confidence_notes =
                "Recipe inferred from the video transcript by the extraction service.".to_string();
        }
        Some(recipe)
    }

    fn recipe_from_value(&self, value: &Value, provenance: Provenance) -> Option<Recipe> {
        let fields = value.as_object()?;

        if let Some(error) = fields.get("error").and_then(Value::as_str) {
            if !error.is_empty() {
                warn!("Extraction service reported: {}", error);
                return None;
            }
        }

        let mut recipe = Recipe::empty(provenance);
        if let Some(name) = fields.get("recipe_name").and_then(Value::as_str) {
            if !name.trim().is_empty() {
                recipe.name = name.trim().to_string();
            }
        }
        recipe.description = string_field(fields.get("description"));
        recipe.prep_duration = string_field(fields.get("prep_time"));
        recipe.cook_duration = string_field(fields.get("cook_time"));
        recipe.total_duration = string_field(fields.get("total_time"));
        recipe.servings = integer_field(fields.get("servings"));
        recipe.cuisine = string_field(fields.get("cuisine"));
        recipe.dish_type = string_field(fields.get("dish_type"));
        recipe.dietary_tags = tag_set(fields.get("dietary"));
        recipe.ingredients = self.parse_ingredients(fields.get("ingredients"));
        recipe.instructions = parse_instructions(fields.get("instructions"));
        recipe.confidence_notes = string_field(fields.get("confidence_notes")).unwrap_or_default();

        // a response with neither ingredients nor instructions is noise
        if recipe.ingredients.is_empty() && recipe.instructions.is_empty() {
            return None;
        }
        Some(recipe)
    }

    fn parse_ingredients(&self, value: Option<&Value>) -> Vec<Ingredient> {
        let Some(Value::Array(entries)) = value else {
            return Vec::new();
        };
        let mut result = Vec::new();
        for entry in entries {
            match entry {
                Value::String(text) if !text.trim().is_empty() => {
                    result.push(self.ingredients.parse(text));
                }
                Value::Object(fields) => {
                    let item = fields
                        .get("item")
                        .or_else(|| fields.get("name"))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    let quantity = match fields.get("quantity") {
                        Some(Value::String(q)) => q.clone(),
                        Some(Value::Number(n)) => n.to_string(),
                        _ => String::new(),
                    };
                    let text = format!("{} {}", quantity, item);
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    let mut parsed = self.ingredients.parse(text);
                    parsed.inferred = fields
                        .get("inferred")
                        .and_then(Value::as_bool)
                        .unwrap_or(false);
                    result.push(parsed);
                }
                _ => {}
            }
        }
        result
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn integer_field(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().map(|n| n as u32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn tag_set(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::Array(tags)) => tags
            .iter()
            .filter_map(Value::as_str)
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => BTreeSet::new(),
    }
}

/// Steps are renumbered contiguously from 1 no matter what the service sent.
fn parse_instructions(value: Option<&Value>) -> Vec<Instruction> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(text) => Some((text.clone(), None)),
            Value::Object(fields) => {
                let text = fields.get("text").and_then(Value::as_str)?;
                let duration = fields
                    .get("time")
                    .or_else(|| fields.get("duration"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some((text.to_string(), duration))
            }
            _ => None,
        })
        .filter(|(text, _)| !text.trim().is_empty())
        .enumerate()
        .map(|(i, (text, duration))| Instruction {
            step: i as u32 + 1,
            text,
            duration,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use async_trait::async_trait;
    use serde_json::json;

    struct StubService {
        response: Result<Value, String>,
    }

    #[async_trait]
    impl ExtractionService for StubService {
        async fn extract_json(&self, _prompt: &str) -> Result<Value, ResolveError> {
            self.response
                .clone()
                .map_err(ResolveError::Service)
        }
    }

    fn extractor(response: Result<Value, String>) -> TextRecipeExtractor {
        TextRecipeExtractor::new(
            Arc::new(StubService { response }),
            IngredientParser::default(),
        )
    }

    #[tokio::test]
    async fn test_description_extraction() {
        let extractor = extractor(Ok(json!({
            "recipe_name": "Shakshuka",
            "description": "Eggs poached in tomato sauce",
            "servings": 2,
            "cuisine": "Middle Eastern",
            "dietary": ["Vegetarian"],
            "ingredients": [
                {"quantity": "4", "item": "eggs", "inferred": false},
                {"quantity": "2 cups", "item": "crushed tomatoes", "inferred": false}
            ],
            "instructions": [
                {"step": 3, "text": "Simmer the sauce", "time": "10 minutes"},
                {"step": 7, "text": "Crack in the eggs", "time": null}
            ],
            "confidence_notes": "All quantities were written in the description."
        })));

        let recipe = extractor
            .from_description("Shakshuka!", "BreakfastTV", "Ingredients:\n...")
            .await
            .unwrap();

        assert_eq!(recipe.name, "Shakshuka");
        assert_eq!(recipe.provenance, Provenance::InlineDescription);
        assert!(!recipe.needs_review);
        assert_eq!(recipe.servings, Some(2));
        assert!(recipe.dietary_tags.contains("vegetarian"));

        assert_eq!(recipe.ingredients[0].amount, "4");
        assert_eq!(recipe.ingredients[0].unit, "whole");
        assert_eq!(recipe.ingredients[1].amount, "2");
        assert_eq!(recipe.ingredients[1].unit, "cup");

        // service sent steps 3 and 7; we renumber
        assert_eq!(
            recipe.instructions.iter().map(|i| i.step).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(recipe.instructions[0].duration.as_deref(), Some("10 minutes"));
    }

    #[tokio::test]
    async fn test_transcript_extraction_flags_review() {
        let extractor = extractor(Ok(json!({
            "recipe_name": "Pan Sauce",
            "ingredients": [{"quantity": "1 cup", "item": "stock", "inferred": true}],
            "instructions": [{"step": 1, "text": "Deglaze the pan", "time": null}]
        })));

        let recipe = extractor
            .from_transcript("title", "channel", "desc", "transcript")
            .await
            .unwrap();

        assert_eq!(recipe.provenance, Provenance::TextExtraction);
        assert!(recipe.needs_review);
        assert!(recipe.ingredients[0].inferred);
        assert!(!recipe.confidence_notes.is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_yields_none() {
        let extractor = extractor(Err("connection refused".to_string()));
        assert!(extractor
            .from_description("t", "c", "d")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_error_field_yields_none() {
        let extractor = extractor(Ok(json!({
            "error": "no recipe found in this text",
            "ingredients": [],
            "instructions": []
        })));
        assert!(extractor.from_description("t", "c", "d").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_response_yields_none() {
        let extractor = extractor(Ok(json!({"recipe_name": "Ghost"})));
        assert!(extractor.from_description("t", "c", "d").await.is_none());
    }
}
