pub mod config;
pub mod duration;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod ingredient;
pub mod inline;
pub mod links;
pub mod model;
pub mod pipeline;
pub mod prompts;
pub mod service;
pub mod text_extract;
pub mod tips;
pub mod vocab;

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use links::DomainRules;
pub use model::{Ingredient, Instruction, Provenance, Recipe};
pub use pipeline::{RecipeResolver, ResolveRequest};

/// Resolve one video's signals into a recipe using the ambient configuration
/// (optional `resolver.toml` plus `RESOLVER__` environment variables).
///
/// Runs the full chain - linked webpage, inline description, transcript
/// fallback - and attaches supplementary transcript tips when applicable.
pub async fn resolve_recipe(request: &ResolveRequest) -> Result<Recipe, ResolveError> {
    let config = ResolverConfig::load()?;
    let resolver = RecipeResolver::new(&config);
    resolver.resolve_with_tips(request).await
}
