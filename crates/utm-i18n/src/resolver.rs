//! Partial translation resolver.
//!
//! Walks a [`SelectionMask`] alongside a [`TranslationTree`] and copies out
//! only the selected labels, keeping the tree's shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tree::{SelectionMask, TranslationTree};

/// Nested subset of a translation tree
pub type PartialTranslationTree = Map<String, Value>;

/// What to do with a mask subtree that selected nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrunePolicy {
    /// Drop keys whose resolved subtree is empty
    #[default]
    PruneEmpty,
    /// Keep them as `{}`
    KeepEmpty,
}

/// Resolve `mask` against `tree`.
///
/// - `true` copies the tree value (leaf or whole subtree)
/// - `false` contributes nothing
/// - a nested mask recurses into the matching tree object
///
/// Keys missing from the tree, or a nested mask over a string leaf,
/// produce no output. The result depends only on the two inputs.
pub fn resolve(mask: &SelectionMask, tree: &TranslationTree, policy: PrunePolicy) -> PartialTranslationTree {
    resolve_recursive(mask.root(), tree.root(), policy)
}

fn resolve_recursive(
    mask: &Map<String, Value>,
    tree: &Map<String, Value>,
    policy: PrunePolicy,
) -> PartialTranslationTree {
    let mut out = Map::new();

    for (key, selection) in mask {
        let Some(node) = tree.get(key) else {
            continue;
        };

        match (selection, node) {
            (Value::Bool(true), _) => {
                out.insert(key.clone(), node.clone());
            }
            (Value::Object(inner_mask), Value::Object(inner_tree)) => {
                let inner = resolve_recursive(inner_mask, inner_tree, policy);
                if !inner.is_empty() || policy == PrunePolicy::KeepEmpty {
                    out.insert(key.clone(), Value::Object(inner));
                }
            }
            _ => {}
        }
    }

    out
}
