use regex::Regex;
use serde::Deserialize;

/// Keywords that mark a line as likely to carry a recipe link.
const RECIPE_KEYWORDS: [&str; 5] = [
    "recipe",
    "recipes",
    "full recipe",
    "written recipe",
    "ingredients",
];

/// Domain allowlist and denylist for recipe-link detection.
///
/// Both lists are configuration data, not parsing logic: new publishers and
/// new link shorteners are added in `resolver.toml` without touching code.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainRules {
    /// Domains trusted to host recipes even without a keyword nearby.
    #[serde(default = "default_known_recipe_domains")]
    pub known_recipe_domains: Vec<String>,
    /// Domains never accepted: social platforms, affiliate shorteners,
    /// the video platform itself, content-pinning sites.
    #[serde(default = "default_excluded_domains")]
    pub excluded_domains: Vec<String>,
}

impl Default for DomainRules {
    fn default() -> Self {
        DomainRules {
            known_recipe_domains: default_known_recipe_domains(),
            excluded_domains: default_excluded_domains(),
        }
    }
}

fn default_known_recipe_domains() -> Vec<String> {
    [
        "bingingwithbabish.com",
        "seriouseats.com",
        "bonappetit.com",
        "food52.com",
        "smittenkitchen.com",
        "budgetbytes.com",
        "allrecipes.com",
        "epicurious.com",
        "foodnetwork.com",
        "delish.com",
        "tasty.co",
        "thekitchn.com",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_excluded_domains() -> Vec<String> {
    [
        "patreon.com",
        "instagram.com",
        "twitter.com",
        "facebook.com",
        "tiktok.com",
        "amazon.com",
        "amzn.to",
        "youtube.com",
        "youtu.be",
        "pinterest.com",
        "pinterest.co.uk",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

impl DomainRules {
    fn is_excluded(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.excluded_domains.iter().any(|d| url.contains(d))
    }

    fn is_known_recipe_site(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.known_recipe_domains.iter().any(|d| url.contains(d))
    }
}

/// Scans a video description for the single best candidate recipe URL.
#[derive(Debug, Clone)]
pub struct LinkDetector {
    rules: DomainRules,
    url_pattern: Regex,
}

impl Default for LinkDetector {
    fn default() -> Self {
        LinkDetector::new(DomainRules::default())
    }
}

impl LinkDetector {
    pub fn new(rules: DomainRules) -> Self {
        LinkDetector {
            rules,
            url_pattern: Regex::new(r#"https?://[^\s<>"')\]]+"#).unwrap(),
        }
    }

    /// Find a recipe URL in a video description.
    ///
    /// Priority:
    /// 1. a line starting with an explicit "Recipe:" / "Full recipe:" label
    /// 2. a URL on the same line as a recipe keyword
    /// 3. a URL from a known recipe domain anywhere in the text
    ///
    /// The denylist always wins: an excluded URL is skipped even when labeled.
    /// First acceptable match wins.
    pub fn find_recipe_link(&self, description: &str) -> Option<String> {
        if description.is_empty() {
            return None;
        }

        for line in description.lines() {
            let line_lower = line.to_lowercase();
            let trimmed = line_lower.trim();
            if trimmed.starts_with("recipe:") || trimmed.starts_with("full recipe:") {
                if let Some(url) = self.first_accepted_url(line) {
                    return Some(url);
                }
            }
        }

        for line in description.lines() {
            let line_lower = line.to_lowercase();
            if RECIPE_KEYWORDS.iter().any(|kw| line_lower.contains(kw)) {
                if let Some(url) = self.first_accepted_url(line) {
                    return Some(url);
                }
            }
        }

        self.url_pattern
            .find_iter(description)
            .map(|m| m.as_str())
            .find(|url| self.rules.is_known_recipe_site(url) && !self.rules.is_excluded(url))
            .map(str::to_string)
    }

    fn first_accepted_url(&self, line: &str) -> Option<String> {
        self.url_pattern
            .find_iter(line)
            .map(|m| m.as_str())
            .find(|url| !self.rules.is_excluded(url))
            .map(str::to_string)
    }
}
