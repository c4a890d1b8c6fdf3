use crate::model::Ingredient;
use crate::vocab::{InformalPhrases, UnitVocabulary};
use regex::Regex;

/// Spelled-out quantities recognized at the start of an ingredient line.
const SPELLED_NUMBERS: [(&str, &str); 12] = [
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
    ("eleven", "11"),
    ("twelve", "12"),
];

/// Parses free-form ingredient text into an amount/unit/item triple.
///
/// Parsing never fails: input that matches none of the recognized shapes
/// degrades to `{amount: "1", unit: "whole", item: <text, lowercased>}`.
#[derive(Debug, Clone)]
pub struct IngredientParser {
    units: UnitVocabulary,
    informal: InformalPhrases,
    amount_grammar: Regex,
}

impl Default for IngredientParser {
    fn default() -> Self {
        IngredientParser::new(UnitVocabulary::default(), InformalPhrases::default())
    }
}

impl IngredientParser {
    pub fn new(units: UnitVocabulary, informal: InformalPhrases) -> Self {
        // whole | decimal | range | simple fraction | mixed number
        let amount_grammar = Regex::new(
            r"^(?:(?P<whole>\d+)|(?P<decimal>\d+\.\d+)|(?P<range>\d+\s*-\s*\d+)|(?P<fnum>\d+)/(?P<fden>\d+)|(?P<mwhole>\d+)\s+(?P<mnum>\d+)/(?P<mden>\d+))$",
        )
        .unwrap();
        IngredientParser {
            units,
            informal,
            amount_grammar,
        }
    }

    /// Resolve a raw unit token against the parser's vocabulary.
    pub fn normalize_unit(&self, token: &str) -> Option<&str> {
        self.units.canonical(token)
    }

    /// Parse one ingredient line. Recognized shapes, in order:
    /// inverted `"item, amount unit"`, a leading informal phrase, a trailing
    /// "to taste", a leading quantity with optional unit, and finally plain
    /// item text.
    pub fn parse(&self, text: &str) -> Ingredient {
        let text = text.trim();
        let lower = text.to_lowercase();

        // "Chicken Breasts, 500 g" - quantity tacked on after the last comma
        if let Some((head, tail)) = text.rsplit_once(',') {
            if let Some((amount, unit)) = self.parse_trailing_quantity(tail.trim()) {
                return Ingredient {
                    amount,
                    unit,
                    item: head.trim().to_lowercase(),
                    inferred: false,
                };
            }
        }

        // "a pinch of salt", "some chopped parsley"
        if let Some(phrase) = self.informal.match_prefix(&lower) {
            let remainder = strip_leading_of(lower[phrase.len()..].trim());
            return Ingredient {
                amount: "1".to_string(),
                unit: phrase.to_string(),
                item: remainder.to_string(),
                inferred: false,
            };
        }

        // "salt to taste"
        if let Some(head) = lower.strip_suffix("to taste") {
            let item = head.trim_end().trim_end_matches(',').trim_end();
            if !item.is_empty() {
                return Ingredient {
                    amount: "1".to_string(),
                    unit: "to taste".to_string(),
                    item: item.to_string(),
                    inferred: false,
                };
            }
        }

        // "1/2 cup sugar", "2 eggs", "3-4 tbsp olive oil"
        if let Some((amount, rest)) = self.take_leading_amount(text) {
            let rest = rest.trim();
            if rest.is_empty() {
                return Ingredient {
                    amount,
                    unit: "whole".to_string(),
                    item: String::new(),
                    inferred: false,
                };
            }
            let (token, remainder) = split_first_word(rest);
            if let Some(unit) = self.units.canonical(token) {
                return Ingredient {
                    amount,
                    unit: unit.to_string(),
                    item: remainder.trim().to_lowercase(),
                    inferred: false,
                };
            }
            // unknown token is part of the item, not a unit
            return Ingredient {
                amount,
                unit: "whole".to_string(),
                item: rest.to_lowercase(),
                inferred: false,
            };
        }

        Ingredient {
            amount: "1".to_string(),
            unit: "whole".to_string(),
            item: lower,
            inferred: false,
        }
    }

    /// A trailing segment qualifies as a quantity only when it is an amount
    /// followed by at most one word, and that word is a known unit. Anything
    /// looser ("2 slabs", "see notes") is left for the standard path.
    fn parse_trailing_quantity(&self, tail: &str) -> Option<(String, String)> {
        let (amount, rest) = self.take_leading_amount(tail)?;
        let rest = rest.trim();
        if rest.is_empty() {
            return Some((amount, "whole".to_string()));
        }
        let (token, remainder) = split_first_word(rest);
        if !remainder.trim().is_empty() {
            return None;
        }
        let unit = self.units.canonical(token)?;
        Some((amount, unit.to_string()))
    }

    /// Take a leading amount off the text: a spelled-out number word, or a run
    /// of digits, fractions, ranges and mixed numbers. Returns the normalized
    /// amount string and the remaining text.
    fn take_leading_amount<'a>(&self, text: &'a str) -> Option<(String, &'a str)> {
        let (word, rest) = split_first_word(text);
        let word_lower = word.to_lowercase();
        if let Some((_, digits)) = SPELLED_NUMBERS.iter().find(|(w, _)| *w == word_lower) {
            return Some((digits.to_string(), rest));
        }

        if !text.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let end = text
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '/' | '.' | '-' | ' ')))
            .unwrap_or(text.len());
        let (raw, rest) = text.split_at(end);
        let amount = self.normalize_amount(raw.trim())?;
        Some((amount, rest))
    }

    /// Apply the numeric rules: whole numbers, decimals and ranges pass
    /// through unchanged; fractions and mixed numbers become decimal strings.
    fn normalize_amount(&self, raw: &str) -> Option<String> {
        let caps = self.amount_grammar.captures(raw)?;
        if caps.name("whole").is_some()
            || caps.name("decimal").is_some()
            || caps.name("range").is_some()
        {
            return Some(raw.to_string());
        }
        if let (Some(num), Some(den)) = (caps.name("fnum"), caps.name("fden")) {
            return fraction_value(0, num.as_str(), den.as_str());
        }
        if let (Some(whole), Some(num), Some(den)) =
            (caps.name("mwhole"), caps.name("mnum"), caps.name("mden"))
        {
            let whole: u64 = whole.as_str().parse().ok()?;
            return fraction_value(whole, num.as_str(), den.as_str());
        }
        None
    }
}

fn fraction_value(whole: u64, num: &str, den: &str) -> Option<String> {
    let num: u64 = num.parse().ok()?;
    let den: u64 = den.parse().ok()?;
    if den == 0 {
        return None;
    }
    Some(format_decimal(whole as f64 + num as f64 / den as f64))
}

/// Render a value as a decimal string trimmed of trailing zeros and a
/// trailing decimal point: 0.5 stays "0.5", 2.0 becomes "2".
fn format_decimal(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn split_first_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (text, ""),
    }
}

fn strip_leading_of(text: &str) -> &str {
    text.strip_prefix("of ").map_or(text, str::trim_start)
}
