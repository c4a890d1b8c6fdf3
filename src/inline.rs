use regex::Regex;

/// Classifies whether a video description carries a written-out recipe, as
/// opposed to merely mentioning one.
///
/// The text must have an ingredients section header plus either a
/// method/instructions header or at least two quantity-with-unit matches.
/// A lone header is not enough; neither is a description that points at
/// ingredients living somewhere else (pinned comment, linked page).
#[derive(Debug, Clone)]
pub struct InlineRecipeDetector {
    reference_patterns: Vec<Regex>,
    ingredients_header: Regex,
    method_header: Regex,
    quantity: Regex,
}

impl Default for InlineRecipeDetector {
    fn default() -> Self {
        let reference_patterns = [
            r"ingredients.*(?:in|see|check|find).*(?:pinned|comment|video|link|below|description)",
            r"(?:pinned|comment).*ingredients",
            r"ingredients.*you'll need.*(?:pinned|comment)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        InlineRecipeDetector {
            reference_patterns,
            ingredients_header: Regex::new(r"(?m)^(?:\*{1,2})?ingredients(?:\*{1,2})?(?:\s*:)?$")
                .unwrap(),
            method_header: Regex::new(
                r"(?m)^(?:\*{1,2})?(?:method|instructions|directions)(?:\*{1,2})?(?:\s*:)?$",
            )
            .unwrap(),
            quantity: Regex::new(
                r"\d+\s*(?:cups?|tbsp|tsp|oz|lbs?|g|kg|ml|cloves?|bunch(?:es)?|heads?)\b",
            )
            .unwrap(),
        }
    }
}

impl InlineRecipeDetector {
    pub fn looks_like_recipe(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();

        // "ingredients in the pinned comment" and friends: the recipe is elsewhere
        if self.reference_patterns.iter().any(|p| p.is_match(&lower)) {
            return false;
        }

        if !self.ingredients_header.is_match(&lower) {
            return false;
        }

        self.method_header.is_match(&lower) || self.quantity.find_iter(&lower).count() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looks_like_recipe(text: &str) -> bool {
        InlineRecipeDetector::default().looks_like_recipe(text)
    }

    #[test]
    fn test_full_inline_recipe() {
        let text = "My best carbonara!\n\
            Ingredients:\n\
            400 g spaghetti\n\
            150 g guanciale\n\
            4 egg yolks\n\
            Method:\n\
            Boil the pasta. Render the guanciale. Combine off heat.";
        assert!(looks_like_recipe(text));
    }

    #[test]
    fn test_ingredients_with_quantity_density() {
        // no method header, but two quantity+unit lines
        let text = "Ingredients\n2 cups flour\n1 tsp baking soda\nbake it";
        assert!(looks_like_recipe(text));
    }

    #[test]
    fn test_single_marker_is_not_enough() {
        let text = "Ingredients:\nlove and patience";
        assert!(!looks_like_recipe(text));
    }

    #[test]
    fn test_one_quantity_is_not_enough() {
        let text = "Ingredients\n2 cups flour\nthat's basically it";
        assert!(!looks_like_recipe(text));
    }

    #[test]
    fn test_casual_mention() {
        let text = "Full recipe on my website! This dish uses simple ingredients.";
        assert!(!looks_like_recipe(text));
    }

    #[test]
    fn test_reference_to_pinned_comment() {
        let text = "Ingredients\n2 cups flour\n1 tsp salt\n\
            ingredients are in the pinned comment below";
        assert!(!looks_like_recipe(text));
    }

    #[test]
    fn test_bold_markdown_headers() {
        let text = "**Ingredients**\n500 g beef\n2 tbsp oil\n**Method**\nSear the beef.";
        assert!(looks_like_recipe(text));
    }

    #[test]
    fn test_empty() {
        assert!(!looks_like_recipe(""));
    }
}
