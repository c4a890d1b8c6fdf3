use crate::model::{Provenance, Recipe};
use crate::prompts;
use crate::service::ExtractionService;
use log::warn;
use serde_json::Value;
use std::sync::Arc;

/// Maximum number of supplementary tips kept per recipe.
const MAX_TIPS: usize = 5;

/// Surfaces supplementary cooking tips from a transcript without repeating
/// anything the resolved recipe already says.
pub struct TipsReconciler {
    service: Arc<dyn ExtractionService>,
}

impl TipsReconciler {
    pub fn new(service: Arc<dyn ExtractionService>) -> Self {
        TipsReconciler { service }
    }

    /// Reconcile a resolved recipe against the transcript.
    ///
    /// Transcript-derived recipes already absorbed the whole transcript, so
    /// they get no tips pass. Failures of any kind yield an empty list.
    pub async fn reconcile(&self, recipe: &Recipe, transcript: &str) -> Vec<String> {
        if transcript.trim().is_empty() {
            return Vec::new();
        }
        if !matches!(
            recipe.provenance,
            Provenance::Webpage | Provenance::InlineDescription
        ) {
            return Vec::new();
        }

        let prompt = prompts::build_tips_prompt(recipe, transcript);
        let value = match self.service.extract_json(&prompt).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Tips extraction failed: {}", e);
                return Vec::new();
            }
        };

        let Value::Array(entries) = value else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|tip| !tip.is_empty())
            .filter(|tip| !duplicates_recipe_content(tip, recipe))
            .map(str::to_string)
            .take(MAX_TIPS)
            .collect()
    }
}

/// A tip that restates an instruction (or is restated by one) adds nothing.
fn duplicates_recipe_content(tip: &str, recipe: &Recipe) -> bool {
    let tip_lower = tip.to_lowercase();
    recipe.instructions.iter().any(|instruction| {
        let text = instruction.text.to_lowercase();
        text.contains(&tip_lower) || tip_lower.contains(&text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::model::Instruction;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubService {
        response: Result<Value, String>,
        calls: AtomicUsize,
    }

    impl StubService {
        fn new(response: Result<Value, String>) -> Arc<Self> {
            Arc::new(StubService {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ExtractionService for StubService {
        async fn extract_json(&self, _prompt: &str) -> Result<Value, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(ResolveError::Service)
        }
    }

    fn webpage_recipe() -> Recipe {
        let mut recipe = Recipe::empty(Provenance::Webpage);
        recipe.instructions.push(Instruction {
            step: 1,
            text: "Sear the beef on all sides".to_string(),
            duration: None,
        });
        recipe
    }

    #[tokio::test]
    async fn test_returns_tips() {
        let service = StubService::new(Ok(json!([
            "Rest the meat before slicing",
            "Save the pan drippings for gravy"
        ])));
        let reconciler = TipsReconciler::new(service);

        let tips = reconciler
            .reconcile(&webpage_recipe(), "long transcript")
            .await;
        assert_eq!(tips.len(), 2);
    }

    #[tokio::test]
    async fn test_caps_at_five() {
        let service = StubService::new(Ok(json!([
            "one", "two", "three", "four", "five", "six", "seven"
        ])));
        let reconciler = TipsReconciler::new(service);

        let tips = reconciler
            .reconcile(&webpage_recipe(), "long transcript")
            .await;
        assert_eq!(tips.len(), 5);
    }

    #[tokio::test]
    async fn test_drops_duplicate_of_instruction() {
        let service = StubService::new(Ok(json!([
            "Sear the beef on all sides",
            "Warm the plates before serving"
        ])));
        let reconciler = TipsReconciler::new(service);

        let tips = reconciler
            .reconcile(&webpage_recipe(), "long transcript")
            .await;
        assert_eq!(tips, vec!["Warm the plates before serving"]);
    }

    #[tokio::test]
    async fn test_empty_transcript_skips_service() {
        let service = StubService::new(Ok(json!(["tip"])));
        let reconciler = TipsReconciler::new(service.clone());

        let tips = reconciler.reconcile(&webpage_recipe(), "   ").await;
        assert!(tips.is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transcript_provenance_skips_service() {
        let service = StubService::new(Ok(json!(["tip"])));
        let reconciler = TipsReconciler::new(service.clone());

        let recipe = Recipe::empty(Provenance::TextExtraction);
        let tips = reconciler.reconcile(&recipe, "long transcript").await;
        assert!(tips.is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_service_failure_yields_empty() {
        let service = StubService::new(Err("boom".to_string()));
        let reconciler = TipsReconciler::new(service);

        let tips = reconciler
            .reconcile(&webpage_recipe(), "long transcript")
            .await;
        assert!(tips.is_empty());
    }

    #[tokio::test]
    async fn test_non_array_response_yields_empty() {
        let service = StubService::new(Ok(json!({"tips": ["not an array at top level"]})));
        let reconciler = TipsReconciler::new(service);

        let tips = reconciler
            .reconcile(&webpage_recipe(), "long transcript")
            .await;
        assert!(tips.is_empty());
    }
}
