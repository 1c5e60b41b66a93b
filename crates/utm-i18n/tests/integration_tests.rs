//! Integration tests for the shipped trees and the language store

use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use utm_core::{FieldName, ValidationErrorKind};
use utm_i18n::*;
use utm_store::{FileStore, KeyValueStore, SharedStore};

fn shape(map: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    for (key, value) in map {
        let inner = match value {
            Value::Object(inner) => shape(inner),
            _ => Value::Null,
        };
        out.insert(key.clone(), inner);
    }
    Value::Object(out)
}

#[test]
fn test_all_languages_share_keys() {
    let en = TranslationTree::load(Language::En).unwrap();
    for language in Language::ALL {
        let tree = TranslationTree::load(language).unwrap();
        assert_eq!(shape(tree.root()), shape(en.root()), "{} differs from en", language);
    }
}

#[test]
fn test_every_field_is_labelled() {
    for language in Language::ALL {
        let tree = TranslationTree::load(language).unwrap();
        for field in FieldName::ALL {
            assert!(tree.field_label(field).is_some(), "{} label in {}", field, language);
            assert!(tree.field_placeholder(field).is_some(), "{} placeholder in {}", field, language);
        }
        assert!(tree.error_message(ValidationErrorKind::Pattern).is_some());
    }
}

#[test]
fn test_full_mask_reproduces_tree() {
    let tree = TranslationTree::load(Language::Pl).unwrap();
    let mask = SelectionMask::from_value(json!({"header": true, "generatorForm": true})).unwrap();

    let partial = resolve(&mask, &tree, PrunePolicy::PruneEmpty);
    assert_eq!(&partial, tree.root());
}

#[test]
fn test_component_style_mask() {
    let tree = TranslationTree::load(Language::En).unwrap();
    let mask = SelectionMask::from_value(json!({
        "generatorForm": {
            "reset": true,
            "copy": false,
            "field": {"url": {"label": true}, "nope": true},
            "error": {"missing": true}
        }
    }))
    .unwrap();

    let pruned = resolve(&mask, &tree, PrunePolicy::PruneEmpty);
    assert_eq!(
        Value::Object(pruned),
        json!({"generatorForm": {"reset": "Reset", "field": {"url": {"label": "URL"}}}})
    );

    let kept = resolve(&mask, &tree, PrunePolicy::KeepEmpty);
    assert_eq!(
        Value::Object(kept),
        json!({"generatorForm": {"reset": "Reset", "field": {"url": {"label": "URL"}}, "error": {}}})
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let tree = TranslationTree::load(Language::En).unwrap();
    let mask = SelectionMask::new().select("header").select("generatorForm.field.source");

    let first = resolve(&mask, &tree, PrunePolicy::PruneEmpty);
    let second = resolve(&mask, &tree, PrunePolicy::PruneEmpty);
    assert_eq!(first, second);
}

#[test]
fn test_language_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let shared = SharedStore::new(FileStore::open(&path));
        let mut store = LanguageStore::open(shared).unwrap();
        store.set_language(Language::Pl).unwrap();
    }

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get_raw(LANGUAGE_KEY).as_deref(), Some("\"pl\""));

    let store = LanguageStore::open(reopened).unwrap();
    assert_eq!(store.language(), Language::Pl);
}

#[test]
fn test_subscribers_see_every_switch() {
    let mut store = LanguageStore::open(utm_store::MemoryStore::new()).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let _first = store.subscribe(move |tree| sink.lock().unwrap().push(tree.language()));
    let sink = Arc::clone(&seen);
    let second = store.subscribe(move |tree| sink.lock().unwrap().push(tree.language()));
    assert_eq!(store.subscriber_count(), 2);

    store.set_language(Language::Pl).unwrap();
    drop(second);
    store.set_language(Language::En).unwrap();

    assert_eq!(*seen.lock().unwrap(), [Language::Pl, Language::Pl, Language::En]);
}
