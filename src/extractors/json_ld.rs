use crate::duration::humanize_duration;
use crate::extractors::Extractor;
use crate::ingredient::IngredientParser;
use crate::model::{Ingredient, Instruction, Provenance, Recipe};
use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::BTreeSet;

/// Extracts a recipe from the JSON-LD blocks embedded in a webpage.
///
/// Structured data is treated as ground truth: the resulting record has
/// `needs_review = false`. The caller stamps `source_url`.
pub struct JsonLdExtractor {
    ingredients: IngredientParser,
}

impl Default for JsonLdExtractor {
    fn default() -> Self {
        JsonLdExtractor::new(IngredientParser::default())
    }
}

impl JsonLdExtractor {
    pub fn new(ingredients: IngredientParser) -> Self {
        JsonLdExtractor { ingredients }
    }

    fn map_recipe(&self, json_ld: &Value) -> Recipe {
        let mut recipe = Recipe::empty(Provenance::Webpage);

        if let Some(name) = json_ld.get("name").and_then(Value::as_str) {
            let name = decode_html_symbols(name);
            if !name.trim().is_empty() {
                recipe.name = name;
            }
        }
        recipe.description = text_field(json_ld.get("description"));
        recipe.prep_duration = duration_field(json_ld.get("prepTime"));
        recipe.cook_duration = duration_field(json_ld.get("cookTime"));
        recipe.total_duration = duration_field(json_ld.get("totalTime"));
        recipe.servings = parse_servings(json_ld.get("recipeYield"));
        recipe.cuisine = first_string(json_ld.get("recipeCuisine"));
        recipe.dish_type = first_string(json_ld.get("recipeCategory"));
        recipe.dietary_tags = parse_dietary(json_ld.get("suitableForDiet"));
        recipe.ingredients = self.parse_ingredients(json_ld.get("recipeIngredient"));
        recipe.instructions = parse_instructions(json_ld.get("recipeInstructions"));
        recipe.needs_review = false;
        recipe.confidence_notes =
            "Extracted from structured JSON-LD data on recipe webpage.".to_string();
        recipe
    }

    fn parse_ingredients(&self, value: Option<&Value>) -> Vec<Ingredient> {
        let Some(Value::Array(entries)) = value else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| self.parse_ingredient_entry(entry))
            .collect()
    }

    fn parse_ingredient_entry(&self, entry: &Value) -> Option<Ingredient> {
        match entry {
            Value::String(text) => {
                let text = decode_html_symbols(text);
                if text.trim().is_empty() {
                    return None;
                }
                Some(self.ingredients.parse(&text))
            }
            Value::Object(fields) => {
                let item = fields
                    .get("name")
                    .or_else(|| fields.get("item"))
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                // objects carrying an explicit amount bypass string parsing
                if let Some(amount) = fields.get("amount") {
                    return Some(Ingredient {
                        amount: stringify(amount).unwrap_or_else(|| "1".to_string()),
                        unit: self.unit_or_whole(fields.get("unit")),
                        item: decode_html_symbols(item).to_lowercase(),
                        inferred: false,
                    });
                }
                // legacy shape with a free-form quantity field
                let quantity = fields
                    .get("quantity")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let text = format!("{} {}", quantity, item);
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(self.ingredients.parse(&decode_html_symbols(text)))
            }
            _ => None,
        }
    }

    fn unit_or_whole(&self, value: Option<&Value>) -> String {
        let raw = value.and_then(Value::as_str).unwrap_or_default().trim();
        if raw.is_empty() {
            return "whole".to_string();
        }
        match self.ingredients.normalize_unit(raw) {
            Some(unit) => unit.to_string(),
            None => raw.to_lowercase(),
        }
    }
}

impl Extractor for JsonLdExtractor {
    fn extract(&self, document: &Html) -> Option<Recipe> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        for script in document.select(&selector) {
            let cleaned_json = sanitize_json(&script.inner_html());
            let json_ld: Value = match serde_json::from_str(&cleaned_json) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Skipping malformed JSON-LD block: {}", e);
                    continue;
                }
            };

            if let Some(recipe_value) = find_recipe_value(&json_ld) {
                debug!("Found Recipe object in JSON-LD: {:#?}", recipe_value);
                return Some(self.map_recipe(recipe_value));
            }
        }

        None
    }
}

/// Whether a JSON-LD `@type` value names a Recipe. The type may be a plain
/// string or an array of type names.
fn is_recipe_type(type_value: Option<&Value>) -> bool {
    match type_value {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Depth-first search for a Recipe-typed object, descending through `@graph`
/// containers and plain arrays.
fn find_recipe_value(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => {
            if is_recipe_type(map.get("@type")) {
                return Some(value);
            }
            map.get("@graph").and_then(find_recipe_value)
        }
        Value::Array(items) => items.iter().find_map(find_recipe_value),
        _ => None,
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.as_str(),
        // some publishers wrap text in an object
        Value::Object(map) => map.get("text").and_then(Value::as_str)?,
        _ => return None,
    };
    let decoded = decode_html_symbols(text);
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

fn duration_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .and_then(humanize_duration)
}

/// Servings may be a bare number, a "4 servings" string, or a list of
/// alternates; the first embedded integer wins.
fn parse_servings(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().map(|n| n as u32),
        Value::Array(items) => parse_servings(items.first()),
        Value::String(s) => first_integer(s),
        _ => None,
    }
}

fn first_integer(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn first_string(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.as_str(),
        Value::Array(items) => items.first().and_then(Value::as_str)?,
        _ => return None,
    };
    let decoded = decode_html_symbols(text);
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

fn parse_dietary(value: Option<&Value>) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    let entries: Vec<&str> = match value {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    for entry in entries {
        let entry = entry.to_lowercase();
        if entry.contains("vegan") {
            tags.insert("vegan".to_string());
        } else if entry.contains("vegetarian") {
            tags.insert("vegetarian".to_string());
        } else if entry.contains("gluten") {
            tags.insert("gluten-free".to_string());
        } else if entry.contains("dairy") {
            tags.insert("dairy-free".to_string());
        }
    }
    tags
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Instructions arrive as a single string, a list of strings, or a list of
/// step objects, possibly grouped into sections. Whatever the shape, steps
/// come out contiguously numbered from 1.
fn parse_instructions(value: Option<&Value>) -> Vec<Instruction> {
    let mut texts = Vec::new();
    match value {
        Some(Value::String(text)) => texts.push(decode_html_symbols(text)),
        Some(Value::Array(entries)) => {
            for entry in entries {
                collect_instruction_texts(entry, &mut texts);
            }
        }
        _ => {}
    }

    texts
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .enumerate()
        .map(|(i, text)| Instruction {
            step: i as u32 + 1,
            text,
            duration: None,
        })
        .collect()
}

fn collect_instruction_texts(entry: &Value, texts: &mut Vec<String>) {
    match entry {
        Value::String(text) => texts.push(decode_html_symbols(text)),
        Value::Object(fields) => {
            // sections carry their steps in itemListElement
            if let Some(Value::Array(steps)) = fields.get("itemListElement") {
                for step in steps {
                    collect_instruction_texts(step, texts);
                }
                return;
            }
            if let Some(text) = fields
                .get("text")
                .or_else(|| fields.get("name"))
                .and_then(Value::as_str)
            {
                texts.push(decode_html_symbols(text));
            }
        }
        _ => {}
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Clean up JSON-LD script contents that real pages get wrong: stray HTML
/// comments, trailing commas, junk before the opening brace.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}
