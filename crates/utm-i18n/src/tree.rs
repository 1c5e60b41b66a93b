//! Label trees and selection masks.
//!
//! A [`TranslationTree`] is a nested JSON object whose leaves are strings.
//! A [`SelectionMask`] mirrors that shape with boolean leaves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use utm_core::{FieldName, ValidationErrorKind};

use crate::error::I18nError;

const EN_TREE: &str = include_str!("../translations/en.json");
const PL_TREE: &str = include_str!("../translations/pl.json");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pl,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Pl];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Language::En => EN_TREE,
            Language::Pl => PL_TREE,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| I18nError::UnknownLanguage(s.to_string()))
    }
}

/// Full, immutable label tree for one language
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationTree {
    language: Language,
    root: Map<String, Value>,
}

impl TranslationTree {
    /// The tree shipped for `language`
    pub fn load(language: Language) -> Result<Self, I18nError> {
        Self::from_json(language, language.source())
    }

    /// Parse a tree, requiring an object whose leaves are all strings
    pub fn from_json(language: Language, json: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| I18nError::MalformedTree(format!("{}: {}", language, e)))?;

        let Value::Object(root) = value else {
            return Err(I18nError::MalformedTree(format!("{}: root is not an object", language)));
        };

        check_leaves(&root, "")?;
        Ok(Self { language, root })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// String leaf at a dotted path, e.g. `generatorForm.error.empty`
    pub fn get(&self, path: &str) -> Option<&str> {
        lookup(&self.root, path)
    }

    pub fn field_label(&self, field: FieldName) -> Option<&str> {
        self.get(&format!("generatorForm.field.{}.label", field))
    }

    pub fn field_placeholder(&self, field: FieldName) -> Option<&str> {
        self.get(&format!("generatorForm.field.{}.placeholder", field))
    }

    /// Localized message for a validation error; `None` for a valid field
    pub fn error_message(&self, kind: ValidationErrorKind) -> Option<&str> {
        let key = kind.message_key()?;
        self.get(&format!("generatorForm.error.{}", key))
    }
}

fn check_leaves(map: &Map<String, Value>, path: &str) -> Result<(), I18nError> {
    for (key, value) in map {
        let here = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };

        match value {
            Value::String(_) => {}
            Value::Object(inner) => check_leaves(inner, &here)?,
            _ => {
                return Err(I18nError::MalformedTree(format!("`{}` is not a string", here)));
            }
        }
    }
    Ok(())
}

/// String leaf at a dotted path inside a full or partial tree
pub fn lookup<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a str> {
    let mut parts = path.split('.');
    let first = parts.next()?;
    let mut current = map.get(first)?;

    for part in parts {
        current = current.as_object()?.get(part)?;
    }

    current.as_str()
}

/// Boolean-leaved tree marking which labels a caller wants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMask {
    root: Map<String, Value>,
}

impl SelectionMask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a JSON mask whose leaves are booleans
    pub fn from_value(value: Value) -> Result<Self, I18nError> {
        let Value::Object(root) = value else {
            return Err(I18nError::MalformedMask("mask must be an object".to_string()));
        };
        check_mask(&root)?;
        Ok(Self { root })
    }

    /// Mark the leaf or subtree at a dotted path
    pub fn select(mut self, path: &str) -> Self {
        let parts: Vec<&str> = path.split('.').filter(|p| !p.is_empty()).collect();
        mark_path(&mut self.root, &parts);
        self
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }
}

fn mark_path(map: &mut Map<String, Value>, parts: &[&str]) {
    match parts {
        [] => {}
        [leaf] => {
            map.insert(leaf.to_string(), Value::Bool(true));
        }
        [head, rest @ ..] => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(inner) = entry {
                mark_path(inner, rest);
            }
        }
    }
}

fn check_mask(map:&Map<String, Value>) -> Result<(), I18nError> {
    for (key, value) in map {
        match value {
            Value::Bool(_) => {}
            Value::Object(inner) => check_mask(inner)?,
            _ => {
                return Err(I18nError::MalformedMask(format!("`{}` must be a boolean or object", key)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embedded_trees_load() {
        for language in Language::ALL {
            let tree = TranslationTree::load(language).unwrap();
            assert_eq!(tree.language(), language);
            assert!(tree.get("generatorForm.outputPlaceholder").is_some());
        }
    }

    #[test]
    fn test_lookup_helpers() {
        let tree = TranslationTree::load(Language::En).unwrap();
        assert_eq!(tree.field_label(FieldName::Campaign), Some("Campaign"));
        assert_eq!(tree.error_message(ValidationErrorKind::Empty), Some("cannot be empty"));
        assert_eq!(tree.error_message(ValidationErrorKind::None), None);
        assert_eq!(tree.get("generatorForm.field"), None);
    }

    #[test]
    fn test_rejects_non_string_leaves() {
        assert!(TranslationTree::from_json(Language::En, r#"{"a": {"b": 1}}"#).is_err());
        assert!(TranslationTree::from_json(Language::En, r#"["a"]"#).is_err());
    }

    #[test]
    fn test_language_codes() {
        assert_eq!("pl".parse::<Language>().unwrap(), Language::Pl);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(serde_json::to_value(Language::En).unwrap(), json!("en"));
    }

    #[test]
    fn test_mask_builder() {
        let mask = SelectionMask::new()
            .select("generatorForm.error")
            .select("generatorForm.field.url");

        assert_eq!(
            Value::Object(mask.root().clone()),
            json!({"generatorForm": {"error": true, "field": {"url": true}}})
        );
    }

    #[test]
    fn test_mask_validation() {
        assert!(SelectionMask::from_value(json!({"a": {"b": true}})).is_ok());
        assert!(SelectionMask::from_value(json!({"a": "yes"})).is_err());
        assert!(SelectionMask::from_value(json!(true)).is_err());
    }
}
