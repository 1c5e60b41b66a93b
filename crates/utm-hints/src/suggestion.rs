//! Suggestion entries as shown in a field's dropdown.

use serde::{Deserialize, Serialize};

/// One suggestion; only history entries can be removed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintConfig {
    pub value: String,
    pub removable: bool,
}

impl HintConfig {
    pub fn fixed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            removable: false,
        }
    }

    pub fn removable(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            removable: true,
        }
    }
}

/// A hint split into the part the user already typed and the completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintHighlight<'a> {
    pub matched: &'a str,
    pub rest: &'a str,
}

/// Split `hint` around the literally typed prefix. A hint that does not
/// start with `typed` is all completion.
pub fn highlight<'a>(hint: &'a str, typed: &str) -> HintHighlight<'a> {
    match hint.strip_prefix(typed) {
        Some(rest) => HintHighlight {
            matched: &hint[..typed.len()],
            rest,
        },
        None => HintHighlight { matched: "", rest: hint },
    }
}

/// Keep hints starting with `typed`; everything matches an empty prefix
pub fn filter_by_prefix(hints: Vec<HintConfig>, typed: &str) -> Vec<HintConfig> {
    hints
        .into_iter()
        .filter(|hint| hint.value.starts_with(typed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight() {
        assert_eq!(highlight("facebook.com", "face"), HintHighlight { matched: "face", rest: "book.com" });
        assert_eq!(highlight("facebook.com", ""), HintHighlight { matched: "", rest: "facebook.com" });
        assert_eq!(highlight("cpc", "em"), HintHighlight { matched: "", rest: "cpc" });
    }

    #[test]
    fn test_prefix_is_literal() {
        let hints = vec![HintConfig::fixed("a.b"), HintConfig::fixed("axb")];
        let kept = filter_by_prefix(hints, "a.");
        assert_eq!(kept, vec![HintConfig::fixed("a.b")]);
    }
}
