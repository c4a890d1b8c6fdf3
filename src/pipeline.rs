use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::extractors::{Extractor, JsonLdExtractor};
use crate::fetch::{PageFetcher, RequestFetcher};
use crate::ingredient::IngredientParser;
use crate::inline::InlineRecipeDetector;
use crate::links::{DomainRules, LinkDetector};
use crate::model::Recipe;
use crate::service::{ExtractionService, OllamaService};
use crate::text_extract::TextRecipeExtractor;
use crate::tips::TipsReconciler;
use log::{debug, info, warn};
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;

/// The noisy input signals for one cooking video.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub title: String,
    pub channel: String,
    pub description: String,
    pub transcript: String,
}

/// Resolution stages, tried strictly in order.
///
/// The chain is: a linked webpage with structured data, then a recipe written
/// out in the description, then inference from the transcript. The first
/// stage to produce a recipe wins; later stages never see (or overwrite) an
/// earlier success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Webpage,
    Inline,
    Fallback,
}

/// Orchestrates the resolution priority chain over one set of video signals.
///
/// Every per-stage failure - no link found, dead page, no structured data,
/// service hiccup - is absorbed by falling through to the next stage. The
/// only error a caller ever sees is [`ResolveError::Exhausted`].
pub struct RecipeResolver {
    fetcher: Arc<dyn PageFetcher>,
    links: LinkDetector,
    inline: InlineRecipeDetector,
    web: JsonLdExtractor,
    text: TextRecipeExtractor,
    tips: TipsReconciler,
}

impl RecipeResolver {
    pub fn new(config: &ResolverConfig) -> Self {
        let service: Arc<dyn ExtractionService> = Arc::new(OllamaService::new(
            config.extraction.base_url.clone(),
            config.extraction.model.clone(),
            Duration::from_secs(config.extraction.timeout),
        ));
        let fetcher: Arc<dyn PageFetcher> = Arc::new(RequestFetcher::new(Some(
            Duration::from_secs(config.fetch_timeout),
        )));
        Self::with_collaborators(fetcher, service, config.domains.clone())
    }

    /// Wire the pipeline over explicit collaborators. Tests use this to
    /// substitute the network-facing pieces.
    pub fn with_collaborators(
        fetcher: Arc<dyn PageFetcher>,
        service: Arc<dyn ExtractionService>,
        domains: DomainRules,
    ) -> Self {
        RecipeResolver {
            fetcher,
            links: LinkDetector::new(domains),
            inline: InlineRecipeDetector::default(),
            web: JsonLdExtractor::default(),
            text: TextRecipeExtractor::new(service.clone(), IngredientParser::default()),
            tips: TipsReconciler::new(service),
        }
    }

    /// Run the priority chain and return the single winning recipe.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<Recipe, ResolveError> {
        let mut stage = Stage::Webpage;
        loop {
            stage = match stage {
                Stage::Webpage => match self.try_webpage(&request.description).await {
                    Some(recipe) => return Ok(recipe),
                    None => Stage::Inline,
                },
                Stage::Inline => match self.try_inline(request).await {
                    Some(recipe) => return Ok(recipe),
                    None => Stage::Fallback,
                },
                Stage::Fallback => {
                    info!("Falling back to transcript extraction");
                    return self
                        .text
                        .from_transcript(
                            &request.title,
                            &request.channel,
                            &request.description,
                            &request.transcript,
                        )
                        .await
                        .ok_or(ResolveError::Exhausted);
                }
            };
        }
    }

    /// Resolve, then attach supplementary transcript tips when the winning
    /// stage did not itself consume the transcript.
    pub async fn resolve_with_tips(
        &self,
        request: &ResolveRequest,
    ) -> Result<Recipe, ResolveError> {
        let mut recipe = self.resolve(request).await?;
        recipe.tips = self.tips.reconcile(&recipe, &request.transcript).await;
        Ok(recipe)
    }

    async fn try_webpage(&self, description: &str) -> Option<Recipe> {
        let url = self.links.find_recipe_link(description)?;
        info!("Trying recipe link: {}", url);

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        let document = Html::parse_document(&page);
        let mut recipe = self.web.extract(&document)?;
        recipe.source_url = Some(url);
        Some(recipe)
    }

    async fn try_inline(&self, request: &ResolveRequest) -> Option<Recipe> {
        if !self.inline.looks_like_recipe(&request.description) {
            debug!("Description does not carry a written recipe");
            return None;
        }
        info!("Extracting recipe written in the description");
        self.text
            .from_description(&request.title, &request.channel, &request.description)
            .await
    }
}
