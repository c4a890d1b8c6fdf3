use crate::model::Recipe;
use scraper::Html;

mod json_ld;

pub use self::json_ld::JsonLdExtractor;

/// Pulls a structured recipe out of a fetched webpage.
///
/// Extraction is best-effort: a page with no usable structured data yields
/// None, never an error.
pub trait Extractor {
    fn extract(&self, document: &Html) -> Option<Recipe>;
}
