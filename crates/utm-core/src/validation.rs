//! Field validation for the link builder.
//!
//! Two rules exist:
//! - the `url` field must look like a web address (scheme and `www.` optional)
//! - every other field must contain at least one run of characters outside
//!   the URL-reserved punctuation and space; a value made only of reserved
//!   characters is rejected
//!
//! Validation is a typed predicate searching the value (not anchored). The
//! HTML `pattern` source is kept separately for the UI boundary.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::field::{FieldConfig, FieldName};

/// Relaxed URL shape: optional scheme, optional `www.`, host labels,
/// a 2-5 letter TLD, optional port and optional path/query/fragment
const URL_PATTERN_SOURCE: &str =
    r"^(http://www\.|https://www\.|http://|https://)?[a-z0-9]+([-.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$";

/// Empty, or some run of characters other than ``$&+,/:;=?@ "'<>#%{}|\^~[]`.``
const PARAM_PATTERN: &str = r#"^$|[^$&+,/:;=?@ "'<>#%{}|\\^~\[\]`.]+"#;

/// Same rule in JavaScript syntax, for an HTML `pattern` attribute
const PARAM_PATTERN_SOURCE: &str = r#"(^(?![\s\S])|[^$&+,/:;=?@ "'<>#%{}|\\^~[\]`.]+)"#;

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(URL_PATTERN_SOURCE).unwrap();
    static ref PARAM_RULE: Regex = Regex::new(PARAM_PATTERN).unwrap();
}

/// Outcome of validating a single field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationErrorKind {
    /// The value passed
    #[default]
    None,
    /// A required field was left empty
    Empty,
    /// A non-empty value failed the field's rule
    Pattern,
}

impl ValidationErrorKind {
    pub fn is_valid(self) -> bool {
        matches!(self, ValidationErrorKind::None)
    }

    /// Key of the localized message under `generatorForm.error`
    pub fn message_key(self) -> Option<&'static str> {
        match self {
            ValidationErrorKind::None => None,
            ValidationErrorKind::Empty => Some("empty"),
            ValidationErrorKind::Pattern => Some("pattern"),
        }
    }
}

/// Matching rule applied to non-empty input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Url,
    Parameter,
}

impl FieldRule {
    pub fn for_field(name: FieldName) -> Self {
        if name.is_url() {
            FieldRule::Url
        } else {
            FieldRule::Parameter
        }
    }

    pub fn matches(self, value: &str) -> bool {
        match self {
            FieldRule::Url => URL_PATTERN.is_match(value),
            FieldRule::Parameter => PARAM_RULE.is_match(value),
        }
    }

    /// Regex source suitable for an HTML `pattern` attribute
    pub fn pattern_source(self) -> &'static str {
        match self {
            FieldRule::Url => URL_PATTERN_SOURCE,
            FieldRule::Parameter => PARAM_PATTERN_SOURCE,
        }
    }
}

/// Validate a raw input value for a field
pub fn validate(config: &FieldConfig, raw: &str) -> ValidationErrorKind {
    if raw.is_empty() {
        return if config.required {
            ValidationErrorKind::Empty
        } else {
            ValidationErrorKind::None
        };
    }

    if config.rule().matches(raw) {
        ValidationErrorKind::None
    } else {
        ValidationErrorKind::Pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_field() -> FieldConfig {
        FieldConfig::new(FieldName::Url, true)
    }

    #[test]
    fn test_url_pattern() {
        let cases = [
            ("https://www.google.com", true),
            ("http://www.google.com", true),
            ("//www.google.com", false),
            ("www.google.com", true),
            ("https://www.google.com/?test1?test2", true),
            ("www.google.com/", true),
            ("www.goog?le.com/", false),
            ("garbageurl", false),
            ("www.google.com///////////////////asdasdasdasd", true),
            ("example.com:8080/landing#top", true),
            ("shop.example-store.co.uk", true),
        ];

        let failed: Vec<&str> = cases
            .iter()
            .filter(|(url, valid)| FieldRule::Url.matches(url) != *valid)
            .map(|(url, _)| *url)
            .collect();

        assert!(failed.is_empty(), "mismatched urls: {:?}", failed);
    }

    #[test]
    fn test_parameter_pattern() {
        assert!(FieldRule::Parameter.matches("BlackFriday_2024"));
        assert!(FieldRule::Parameter.matches("promo-logo"));
        assert!(FieldRule::Parameter.matches("wyprzedaż"));
        assert!(FieldRule::Parameter.matches("google.pl"));
        assert!(FieldRule::Parameter.matches("summer sale"));

        for bad in [" ", "&&", "...", "?=", "[]", "\\", "`", "% # %"] {
            assert!(!FieldRule::Parameter.matches(bad), "accepted: {:?}", bad);
        }
    }

    #[test]
    fn test_catalog_defaults_pass_their_rule() {
        let catalog = crate::field::FieldCatalog::builtin();
        let failing: Vec<String> = catalog
            .fields()
            .iter()
            .flat_map(|config| {
                config
                    .default_hints
                    .iter()
                    .filter(move |hint| !validate(config, hint).is_valid())
                    .map(move |hint| format!("{}={}", config.name, hint))
            })
            .collect();

        assert!(failing.is_empty(), "defaults failing their own rule: {:?}", failing);
    }

    #[test]
    fn test_url_rule_is_case_sensitive() {
        assert_eq!(validate(&url_field(), "Example.com"), ValidationErrorKind::Pattern);
        assert_eq!(validate(&url_field(), "https://Example.com"), ValidationErrorKind::Pattern);
        assert_eq!(validate(&url_field(), "https://example.com/Landing"), ValidationErrorKind::None);
    }

    #[test]
    fn test_parameter_source_is_html_pattern() {
        assert!(FieldRule::Parameter.pattern_source().starts_with("(^(?![\\s\\S])|"));
        assert!(FieldRule::Url.pattern_source().starts_with('^'));
    }

    #[test]
    fn test_validate_empty_depends_on_required() {
        let required = FieldConfig::new(FieldName::Campaign, true);
        let optional = FieldConfig::new(FieldName::Term, false);

        assert_eq!(validate(&required, ""), ValidationErrorKind::Empty);
        assert_eq!(validate(&optional, ""), ValidationErrorKind::None);
    }

    #[test]
    fn test_validate_pattern() {
        assert_eq!(validate(&url_field(), "garbageurl"), ValidationErrorKind::Pattern);
        assert_eq!(validate(&url_field(), "example.com"), ValidationErrorKind::None);

        let term = FieldConfig::new(FieldName::Term, false);
        assert_eq!(validate(&term, "&&"), ValidationErrorKind::Pattern);
        assert_eq!(validate(&term, "red shoes"), ValidationErrorKind::None);
    }

    #[test]
    fn test_message_keys() {
        assert_eq!(ValidationErrorKind::None.message_key(), None);
        assert_eq!(ValidationErrorKind::Empty.message_key(), Some("empty"));
        assert_eq!(ValidationErrorKind::Pattern.message_key(), Some("pattern"));
        assert_eq!(
            serde_json::to_string(&ValidationErrorKind::Empty).unwrap(),
            "\"empty\""
        );
    }
}
