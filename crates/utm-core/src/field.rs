//! Field catalog for the link builder.
//!
//! Supports the fields.yaml format with:
//! - One entry per link parameter, in output order
//! - Required flags gating composition
//! - Default hints offered before any history exists

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UtmError;
use crate::validation::{self, FieldRule, ValidationErrorKind};

/// One named input slot of the composed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Url,
    Campaign,
    Source,
    Medium,
    Term,
    Content,
}

impl FieldName {
    /// Every field, in declaration order
    pub const ALL: [FieldName; 6] = [
        FieldName::Url,
        FieldName::Campaign,
        FieldName::Source,
        FieldName::Medium,
        FieldName::Term,
        FieldName::Content,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Url => "url",
            FieldName::Campaign => "campaign",
            FieldName::Source => "source",
            FieldName::Medium => "medium",
            FieldName::Term => "term",
            FieldName::Content => "content",
        }
    }

    /// The base address field is parsed, not appended as a parameter
    pub fn is_url(&self) -> bool {
        matches!(self, FieldName::Url)
    }

    /// Query parameter key, e.g. `utm_campaign`. `None` for the url field.
    pub fn param_key(&self) -> Option<String> {
        if self.is_url() {
            None
        } else {
            Some(format!("utm_{}", self.as_str()))
        }
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UtmError::UnknownField(s.to_string()))
    }
}

/// Static per-field descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: FieldName,
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "hints", skip_serializing_if = "Vec::is_empty")]
    pub default_hints: Vec<String>,
}

impl FieldConfig {
    pub fn new(name: FieldName, required: bool) -> Self {
        Self {
            name,
            required,
            default_hints: Vec::new(),
        }
    }

    pub fn with_hints(mut self, hints: &[&str]) -> Self {
        self.default_hints = hints.iter().map(|h| h.to_string()).collect();
        self
    }

    /// Whether `value` is one of the static default hints
    pub fn has_default(&self, value: &str) -> bool {
        self.default_hints.iter().any(|hint| hint == value)
    }

    pub fn rule(&self) -> FieldRule {
        FieldRule::for_field(self.name)
    }
}

/// Top-level fields file structure
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub fields: Vec<FieldConfig>,
}

/// Ordered, complete set of field descriptors
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    fields: Vec<FieldConfig>,
    /// position in `fields` for each `FieldName`
    index: [usize; 6],
}

impl FieldCatalog {
    /// The catalog the builder ships with
    pub fn builtin() -> Self {
        let fields = vec![
            FieldConfig::new(FieldName::Url, true),
            FieldConfig::new(FieldName::Campaign, true),
            FieldConfig::new(FieldName::Source, true).with_hints(&[
                "google.pl",
                "facebook.com",
                "instagram.com",
                "twitter.com",
            ]),
            FieldConfig::new(FieldName::Medium, true)
                .with_hints(&["cpc", "email", "social", "affiliate"]),
            FieldConfig::new(FieldName::Term, false),
            FieldConfig::new(FieldName::Content, false),
        ];

        Self {
            fields,
            index: [0, 1, 2, 3, 4, 5],
        }
    }

    /// Build a catalog, checking every field appears exactly once
    pub fn new(fields: Vec<FieldConfig>) -> Result<Self, UtmError> {
        let mut index = [usize::MAX; 6];

        for (position, config) in fields.iter().enumerate() {
            let slot = &mut index[config.name.position()];
            if *slot != usize::MAX {
                return Err(UtmError::CatalogError(format!(
                    "field `{}` declared more than once",
                    config.name
                )));
            }
            *slot = position;
        }

        if let Some(missing) = FieldName::ALL
            .iter()
            .find(|name| index[name.position()] == usize::MAX)
        {
            return Err(UtmError::CatalogError(format!(
                "field `{}` is missing",
                missing
            )));
        }

        if !fields[index[FieldName::Url.position()]].required {
            return Err(UtmError::CatalogError(
                "field `url` must be required".to_string(),
            ));
        }

        Ok(Self { fields, index })
    }

    /// Load a catalog from a YAML file
    pub fn load(path: &str) -> Result<Self, UtmError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| UtmError::ConfigError(format!("Failed to read fields file: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, UtmError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| UtmError::ConfigError(format!("Failed to parse fields YAML: {}", e)))?;
        Self::new(file.fields)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    pub fn get(&self, name: FieldName) -> &FieldConfig {
        &self.fields[self.index[name.position()]]
    }

    pub fn required(&self) -> impl Iterator<Item = &FieldConfig> {
        self.fields.iter().filter(|config| config.required)
    }

    pub fn default_hints(&self, name: FieldName) -> &[String] {
        &self.get(name).default_hints
    }

    /// Validate a raw input against the field's configuration
    pub fn validate(&self, name: FieldName, raw: &str) -> ValidationErrorKind {
        validation::validate(self.get(name), raw)
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
