//! URL composition: base address plus UTM parameters into one tracked link.

use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

use crate::field::{FieldCatalog, FieldName};

/// Currently valid, non-empty values keyed by field
pub type FieldValueMap = BTreeMap<FieldName, String>;

/// Why no link could be produced. This is a steady state while the form is
/// incomplete, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotComposable {
    #[error("required field `{0}` has no valid value")]
    MissingRequired(FieldName),
    #[error("base url `{0}` could not be parsed")]
    UnparseableUrl(String),
}

/// Compose the tracked URL.
///
/// Parameters are appended in catalog order, after any query the base URL
/// already carries and before its fragment. With `lowercase` the whole
/// result, parameter values included, is lowercased.
pub fn compose(
    catalog: &FieldCatalog,
    values: &FieldValueMap,
    lowercase: bool,
) -> Result<String, NotComposable> {
    if let Some(missing) = catalog
        .required()
        .find(|config| values.get(&config.name).map_or(true, |v| v.is_empty()))
    {
        return Err(NotComposable::MissingRequired(missing.name));
    }

    let raw = values
        .get(&FieldName::Url)
        .ok_or(NotComposable::MissingRequired(FieldName::Url))?;
    let base = parse_base(raw)?;

    let mut output = base.origin().ascii_serialization();

    if base.path() != "/" {
        output.push_str(base.path());
    }

    if let Some(query) = base.query().filter(|q| !q.is_empty()) {
        output.push('?');
        output.push_str(query);
    }

    for config in catalog.fields() {
        let Some(key) = config.name.param_key() else {
            continue;
        };
        let Some(value) = values.get(&config.name).filter(|v| !v.is_empty()) else {
            continue;
        };

        output.push(if output.contains('?') { '&' } else { '?' });
        output.push_str(&key);
        output.push('=');
        output.push_str(value);
    }

    if let Some(fragment) = base.fragment().filter(|f| !f.is_empty()) {
        output.push('#');
        output.push_str(fragment);
    }

    if lowercase {
        output = output.to_lowercase();
    }

    Ok(output)
}

/// Prefix `http://` when no web scheme is present, then parse
fn parse_base(raw: &str) -> Result<Url, NotComposable> {
    let parsed = if has_web_scheme(raw) {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://{}", raw))
    };

    parsed.map_err(|e| {
        tracing::debug!(url = raw, error = %e, "base url rejected by parser");
        NotComposable::UnparseableUrl(raw.to_string())
    })
}

fn has_web_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(FieldName, &str)]) -> FieldValueMap {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn complete(url: &str) -> FieldValueMap {
        values(&[
            (FieldName::Url, url),
            (FieldName::Campaign, "sale"),
            (FieldName::Source, "google.pl"),
            (FieldName::Medium, "cpc"),
        ])
    }

    #[test]
    fn test_scheme_is_added() {
        let url = compose(&FieldCatalog::builtin(), &complete("example.com"), false).unwrap();
        assert_eq!(
            url,
            "http://example.com?utm_campaign=sale&utm_source=google.pl&utm_medium=cpc"
        );
    }

    #[test]
    fn test_existing_scheme_is_kept() {
        let url = compose(&FieldCatalog::builtin(), &complete("https://www.example.com"), false).unwrap();
        assert!(url.starts_with("https://www.example.com?utm_campaign=sale"));
    }

    #[test]
    fn test_path_query_and_fragment() {
        let url = compose(
            &FieldCatalog::builtin(),
            &complete("example.com:8080/landing/page?ref=home#offer"),
            false,
        )
        .unwrap();
        assert_eq!(
            url,
            "http://example.com:8080/landing/page?ref=home&utm_campaign=sale&utm_source=google.pl&utm_medium=cpc#offer"
        );
    }

    #[test]
    fn test_default_port_and_root_path_are_dropped() {
        let url = compose(&FieldCatalog::builtin(), &complete("http://example.com:80/"), false).unwrap();
        assert!(url.starts_with("http://example.com?utm_"));
    }

    #[test]
    fn test_optional_fields_follow_catalog_order() {
        let mut map = complete("example.com");
        map.insert(FieldName::Content, "logo".to_string());
        map.insert(FieldName::Term, "shoes".to_string());

        let url = compose(&FieldCatalog::builtin(), &map, false).unwrap();
        assert!(url.ends_with("utm_medium=cpc&utm_term=shoes&utm_content=logo"));
    }

    #[test]
    fn test_empty_optional_values_are_skipped() {
        let mut map = complete("example.com");
        map.insert(FieldName::Term, String::new());

        let url = compose(&FieldCatalog::builtin(), &map, false).unwrap();
        assert!(!url.contains("utm_term"));
    }

    #[test]
    fn test_missing_required_field() {
        let mut map = complete("example.com");
        map.remove(&FieldName::Medium);

        assert_eq!(
            compose(&FieldCatalog::builtin(), &map, false),
            Err(NotComposable::MissingRequired(FieldName::Medium))
        );
    }

    #[test]
    fn test_lowercase_folds_everything() {
        let map = values(&[
            (FieldName::Url, "Example.com/Landing"),
            (FieldName::Campaign, "BlackFriday"),
            (FieldName::Source, "Google"),
            (FieldName::Medium, "CPC"),
        ]);
        let catalog = FieldCatalog::builtin();

        let mixed = compose(&catalog, &map, false).unwrap();
        let lower = compose(&catalog, &map, true).unwrap();

        assert_eq!(lower, mixed.to_lowercase());
        assert_eq!(
            lower,
            "http://example.com/landing?utm_campaign=blackfriday&utm_source=google&utm_medium=cpc"
        );
    }

    #[test]
    fn test_unparseable_base() {
        let map = complete("http://exa mple.com");
        assert!(matches!(
            compose(&FieldCatalog::builtin(), &map, false),
            Err(NotComposable::UnparseableUrl(_))
        ));
    }

    #[test]
    fn test_scheme_detection() {
        assert!(has_web_scheme("HTTPS://example.com"));
        assert!(has_web_scheme("http://example.com"));
        assert!(!has_web_scheme("httpbin.org"));
        assert!(!has_web_scheme("ftp://example.com"));
    }
}
