use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fallback recipe name when a source provides none.
pub const DEFAULT_RECIPE_NAME: &str = "Untitled Recipe";

/// Which resolution stage produced a recipe record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Structured metadata scraped from a linked recipe webpage.
    #[serde(rename = "webpage")]
    Webpage,
    /// A recipe written out in the video description itself.
    #[serde(rename = "inline-description")]
    InlineDescription,
    /// Inferred from the transcript by the extraction service.
    #[serde(rename = "text-extraction")]
    TextExtraction,
}

/// A single ingredient line, normalized to amount/unit/item.
///
/// `amount` is never empty (defaults to "1") and `unit` is either a canonical
/// unit abbreviation, an informal phrase kept verbatim ("a pinch"), or "whole"
/// for unitless countable items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub amount: String,
    pub unit: String,
    pub item: String,
    #[serde(default)]
    pub inferred: bool,
}

/// A numbered instruction step. Steps are 1-based and contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: u32,
    pub text: String,
    #[serde(default)]
    pub duration: Option<String>,
}

/// The canonical recipe record produced by a resolution run.
///
/// Durations are human-readable strings ("1 hour 30 minutes"), never raw
/// ISO tokens. `source_url` is only set when `provenance` is `Webpage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub description: Option<String>,
    pub prep_duration: Option<String>,
    pub cook_duration: Option<String>,
    pub total_duration: Option<String>,
    pub servings: Option<u32>,
    pub cuisine: Option<String>,
    pub dish_type: Option<String>,
    #[serde(default)]
    pub dietary_tags: BTreeSet<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub provenance: Provenance,
    pub source_url: Option<String>,
    pub needs_review: bool,
    pub confidence_notes: String,
}

impl Recipe {
    /// An empty record for the given provenance, to be filled in by an
    /// extraction stage.
    pub fn empty(provenance: Provenance) -> Self {
        Recipe {
            name: DEFAULT_RECIPE_NAME.to_string(),
            description: None,
            prep_duration: None,
            cook_duration: None,
            total_duration: None,
            servings: None,
            cuisine: None,
            dish_type: None,
            dietary_tags: BTreeSet::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tips: Vec::new(),
            provenance,
            source_url: None,
            needs_review: false,
            confidence_notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_serialization() {
        assert_eq!(
            serde_json::to_string(&Provenance::Webpage).unwrap(),
            "\"webpage\""
        );
        assert_eq!(
            serde_json::to_string(&Provenance::InlineDescription).unwrap(),
            "\"inline-description\""
        );
        assert_eq!(
            serde_json::to_string(&Provenance::TextExtraction).unwrap(),
            "\"text-extraction\""
        );
    }

    #[test]
    fn test_empty_recipe_defaults() {
        let recipe = Recipe::empty(Provenance::Webpage);
        assert_eq!(recipe.name, DEFAULT_RECIPE_NAME);
        assert!(recipe.ingredients.is_empty());
        assert!(!recipe.needs_review);
        assert!(recipe.source_url.is_none());
    }
}
