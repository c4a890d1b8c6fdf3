use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DURATION: Regex = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap();
}

/// Convert an ISO 8601 duration token (`PT1H30M`) to a human-readable phrase
/// ("1 hour 30 minutes").
///
/// Empty input and a bare `PT` yield None. Non-empty input that does not look
/// like an ISO duration is returned unchanged so a reviewer can spot it.
pub fn humanize_duration(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    let caps = match ISO_DURATION.captures(token) {
        Some(caps) => caps,
        None => return Some(token.to_string()),
    };

    let mut parts = Vec::new();
    for (group, singular) in [(1usize, "hour"), (2, "minute"), (3, "second")] {
        if let Some(m) = caps.get(group) {
            if let Ok(n) = m.as_str().parse::<u64>() {
                parts.push(format!("{} {}{}", n, singular, if n == 1 { "" } else { "s" }));
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
