use std::collections::HashMap;

/// Maps unit synonyms to their canonical short forms.
///
/// Lookup is case-insensitive except for the single-letter shorthands
/// `T` (tablespoon) and `t` (teaspoon), which are checked against the
/// original casing first.
#[derive(Debug, Clone)]
pub struct UnitVocabulary {
    exact: HashMap<String, String>,
    folded: HashMap<String, String>,
}

impl Default for UnitVocabulary {
    fn default() -> Self {
        let synonyms: &[(&str, &str)] = &[
            ("tablespoon", "tbsp"),
            ("tablespoons", "tbsp"),
            ("tbsp", "tbsp"),
            ("tbs", "tbsp"),
            ("teaspoon", "tsp"),
            ("teaspoons", "tsp"),
            ("tsp", "tsp"),
            ("cup", "cup"),
            ("cups", "cup"),
            ("ounce", "oz"),
            ("ounces", "oz"),
            ("oz", "oz"),
            ("pound", "lb"),
            ("pounds", "lb"),
            ("lb", "lb"),
            ("lbs", "lb"),
            ("gram", "g"),
            ("grams", "g"),
            ("g", "g"),
            ("kilogram", "kg"),
            ("kilograms", "kg"),
            ("kg", "kg"),
            ("milliliter", "ml"),
            ("milliliters", "ml"),
            ("ml", "ml"),
            ("liter", "l"),
            ("liters", "l"),
            ("l", "l"),
            ("clove", "clove"),
            ("cloves", "clove"),
            ("head", "head"),
            ("heads", "head"),
            ("knob", "knob"),
            ("knobs", "knob"),
            ("bunch", "bunch"),
            ("bunches", "bunch"),
            ("sprig", "sprig"),
            ("sprigs", "sprig"),
            ("slice", "slice"),
            ("slices", "slice"),
            ("piece", "piece"),
            ("pieces", "piece"),
            ("can", "can"),
            ("cans", "can"),
            ("whole", "whole"),
        ];
        // T/t are case-sensitive by kitchen convention: T = tablespoon, t = teaspoon
        let shorthands: &[(&str, &str)] = &[("T", "tbsp"), ("t", "tsp")];

        UnitVocabulary {
            exact: shorthands
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            folded: synonyms
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl UnitVocabulary {
    /// Build a vocabulary from explicit synonym tables. The `exact` table is
    /// consulted with the token's original casing before the case-insensitive
    /// `folded` table.
    pub fn new(exact: HashMap<String, String>, folded: HashMap<String, String>) -> Self {
        UnitVocabulary { exact, folded }
    }

    /// Resolve a token to its canonical unit, or None if it is not a known unit.
    pub fn canonical(&self, token: &str) -> Option<&str> {
        let token = token.trim_matches(|c: char| matches!(c, ',' | '.' | ';' | ':'));
        if token.is_empty() {
            return None;
        }
        if let Some(unit) = self.exact.get(token) {
            return Some(unit);
        }
        self.folded
            .get(token.to_lowercase().as_str())
            .map(String::as_str)
    }
}

/// Informal measurement phrases recognized at the start of an ingredient line.
/// The phrase itself becomes the unit and the amount defaults to "1".
#[derive(Debug, Clone)]
pub struct InformalPhrases {
    phrases: Vec<String>,
}

impl Default for InformalPhrases {
    fn default() -> Self {
        InformalPhrases::new(&[
            "a pinch",
            "a smidge",
            "a dash",
            "a sprinkle",
            "a handful",
            "a splash",
            "to taste",
            "as needed",
            "some",
            "a few",
            "a couple",
        ])
    }
}

impl InformalPhrases {
    pub fn new(phrases: &[&str]) -> Self {
        let mut phrases: Vec<String> = phrases.iter().map(|p| p.to_lowercase()).collect();
        // longest first so "a pinch" wins over any shorter overlapping phrase
        phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));
        InformalPhrases { phrases }
    }

    /// The phrase the (lowercased) text starts with, if any. The match must
    /// end at a word boundary.
    pub fn match_prefix(&self, text: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|phrase| {
                text.starts_with(phrase.as_str())
                    && text[phrase.len()..]
                        .chars()
                        .next()
                        .map_or(true, char::is_whitespace)
            })
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_normalization() {
        let vocab = UnitVocabulary::default();
        assert_eq!(vocab.canonical("tablespoons"), Some("tbsp"));
        assert_eq!(vocab.canonical("tbs"), Some("tbsp"));
        assert_eq!(vocab.canonical("teaspoon"), Some("tsp"));
        assert_eq!(vocab.canonical("pounds"), Some("lb"));
        assert_eq!(vocab.canonical("lbs"), Some("lb"));
        assert_eq!(vocab.canonical("bunches"), Some("bunch"));
        assert_eq!(vocab.canonical("cups"), Some("cup"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let vocab = UnitVocabulary::default();
        assert_eq!(vocab.canonical("Tablespoon"), Some("tbsp"));
        assert_eq!(vocab.canonical("CUP"), Some("cup"));
        assert_eq!(vocab.canonical("Grams"), Some("g"));
    }

    #[test]
    fn test_case_sensitive_shorthands() {
        let vocab = UnitVocabulary::default();
        assert_eq!(vocab.canonical("T"), Some("tbsp"));
        assert_eq!(vocab.canonical("t"), Some("tsp"));
    }

    #[test]
    fn test_unknown_unit() {
        let vocab = UnitVocabulary::default();
        assert_eq!(vocab.canonical("widget"), None);
        assert_eq!(vocab.canonical(""), None);
    }

    #[test]
    fn test_trailing_punctuation() {
        let vocab = UnitVocabulary::default();
        assert_eq!(vocab.canonical("oz."), Some("oz"));
        assert_eq!(vocab.canonical("cups,"), Some("cup"));
    }

    #[test]
    fn test_informal_prefix_match() {
        let phrases = InformalPhrases::default();
        assert_eq!(phrases.match_prefix("a pinch salt"), Some("a pinch"));
        assert_eq!(phrases.match_prefix("to taste"), Some("to taste"));
        assert_eq!(phrases.match_prefix("some chopped parsley"), Some("some"));
        assert_eq!(phrases.match_prefix("something else"), None);
        assert_eq!(phrases.match_prefix("salt"), None);
    }
}
