//! The active language and its tree, observable by subscribers.
//!
//! The selection is persisted under [`LANGUAGE_KEY`]. Switching languages
//! replaces the whole tree and notifies every live subscriber.

use std::sync::{Arc, Mutex, Weak};

use serde_json::Value;
use utm_store::{KeyValueStore, SetOptions};

use crate::error::I18nError;
use crate::resolver::{resolve, PartialTranslationTree, PrunePolicy};
use crate::tree::{Language, SelectionMask, TranslationTree};

/// Storage key of the persisted language code
pub const LANGUAGE_KEY: &str = "translation-language";

type Listener = Arc<dyn Fn(&TranslationTree) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Keeps a subscription alive; dropping it unsubscribes
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.lock().unwrap_or_else(|p| p.into_inner());
            listeners.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

pub struct LanguageStore<S: KeyValueStore> {
    store: S,
    options: SetOptions,
    tree: Arc<TranslationTree>,
    listeners: Arc<Mutex<Listeners>>,
}

impl<S: KeyValueStore> LanguageStore<S> {
    /// Read the persisted language. When it is absent or unsupported the
    /// default is used and written back right away.
    pub fn open(mut store: S) -> Result<Self, I18nError> {
        let options = SetOptions::default();
        let stored = store
            .get(LANGUAGE_KEY)
            .and_then(|value| value.into_json().as_str().map(str::to_string));

        let language = match stored.as_deref().map(str::parse::<Language>) {
            Some(Ok(language)) => language,
            other => {
                if let Some(Err(e)) = other {
                    tracing::warn!(error = %e, "stored language ignored");
                }
                let language = Language::default();
                if let Err(e) = store.set(LANGUAGE_KEY, &Value::from(language.code()), &options) {
                    tracing::warn!(error = %e, "failed to persist default language");
                }
                language
            }
        };

        let tree = Arc::new(TranslationTree::load(language)?);
        tracing::info!(language = %language, "language store opened");

        Ok(Self {
            store,
            options,
            tree,
            listeners: Arc::new(Mutex::new(Listeners::default())),
        })
    }

    pub fn language(&self) -> Language {
        self.tree.language()
    }

    pub fn tree(&self) -> Arc<TranslationTree> {
        Arc::clone(&self.tree)
    }

    /// Persist `language`, swap in its tree and notify subscribers.
    /// Selecting the active language does nothing.
    pub fn set_language(&mut self, language: Language) -> Result<(), I18nError> {
        if language == self.language() {
            return Ok(());
        }

        let tree = Arc::new(TranslationTree::load(language)?);
        self.store
            .set(LANGUAGE_KEY, &Value::from(language.code()), &self.options)?;
        self.tree = tree;

        tracing::info!(language = %language, "language switched");
        self.notify();
        Ok(())
    }

    /// Call `listener` with the new tree after every language switch, for
    /// as long as the returned [`Subscription`] lives
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&TranslationTree) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().unwrap_or_else(|p| p.into_inner());
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .lock()
            .map(|l| l.entries.len())
            .unwrap_or_else(|p| p.into_inner().entries.len())
    }

    /// Labels selected by `mask` from the active tree
    pub fn partial(&self, mask: &SelectionMask, policy: PrunePolicy) -> PartialTranslationTree {
        resolve(mask, &self.tree, policy)
    }

    fn notify(&self) {
        // Snapshot first so a listener may subscribe or unsubscribe
        let snapshot: Vec<Listener> = {
            let listeners = self.listeners.lock().unwrap_or_else(|p| p.into_inner());
            listeners.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in snapshot {
            listener(&self.tree);
        }
    }
}
