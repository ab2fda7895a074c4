use crate::models::LabelParts;
use regex::Regex;
use std::sync::LazyLock;

static LABEL_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*|\s+").unwrap());

/// Split a label on commas or whitespace. The first token is the city and
/// the remaining tokens, joined with single spaces, are the state.
///
/// Multi-word cities are not recognised: "São Paulo, SP" yields city "São"
/// and state "Paulo SP".
pub fn parse_label(label: &str) -> LabelParts {
    let mut tokens = LABEL_SEPARATOR.split(label.trim());
    let city = tokens.next().unwrap_or_default().to_string();
    let state = tokens.filter(|t| !t.is_empty()).collect::<Vec<_>>().join(" ");

    LabelParts {
        city,
        state: (!state.is_empty()).then_some(state),
    }
}

/// Case-insensitive substring test used for both states and cities
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
