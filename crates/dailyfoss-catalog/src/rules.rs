//! Field transform rules.
//!
//! Each rule inspects one region of a document, moves or fills fields in
//! place, and reports whether it changed anything. Rules decide from document
//! content alone, never from another rule's outcome, so the whole chain is
//! idempotent.
//!
//! Untouched keys keep their slot. A key taken out of `platform` is removed
//! with `shift_remove` so its siblings keep their order, and lands on the
//! install method in place of an existing key of the same name, or after the
//! last key when there is none.

use crate::document::{CatalogDocument, DEPLOYMENT, HOSTING, PLATFORM, SAAS, UI};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which install methods the platform rules visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodScope {
    /// Only `install_methods[0]`.
    #[default]
    First,
    /// Every install method.
    All,
}

/// A named transform. `apply` returns `true` when the document changed.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub apply: fn(&mut CatalogDocument, MethodScope) -> bool,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FieldRule").field(&self.name).finish()
    }
}

pub const RELOCATE_HOSTING: &str = "relocate_hosting";
pub const RELOCATE_UI: &str = "relocate_ui";
pub const RELOCATE_DEPLOYMENT_FROM_TOP_LEVEL: &str = "relocate_deployment_from_top_level";
pub const RELOCATE_DEPLOYMENT_FROM_PLATFORM: &str = "relocate_deployment_from_platform";
pub const ENSURE_SAAS_FLAG: &str = "ensure_saas_flag";

/// The rule chain, in application order. The top-level deployment rule runs
/// before the platform one so that it wins.
pub const RULES: [FieldRule; 5] = [
    FieldRule {
        name: RELOCATE_HOSTING,
        apply: relocate_hosting,
    },
    FieldRule {
        name: RELOCATE_UI,
        apply: relocate_ui,
    },
    FieldRule {
        name: RELOCATE_DEPLOYMENT_FROM_TOP_LEVEL,
        apply: relocate_deployment_from_top_level,
    },
    FieldRule {
        name: RELOCATE_DEPLOYMENT_FROM_PLATFORM,
        apply: relocate_deployment_from_platform,
    },
    FieldRule {
        name: ENSURE_SAAS_FLAG,
        apply: ensure_saas_flag,
    },
];

fn take_from_platform(method: &mut Map<String, Value>, key: &str) -> Option<Value> {
    method
        .get_mut(PLATFORM)
        .and_then(Value::as_object_mut)
        .and_then(|platform| platform.shift_remove(key))
}

fn relocate_platform_key(doc: &mut CatalogDocument, scope: MethodScope, key: &str) -> bool {
    let mut changed = false;
    for method in doc.methods_mut(scope) {
        if let Some(value) = take_from_platform(method, key) {
            method.insert(key.to_string(), value);
            changed = true;
        }
    }
    changed
}

/// Move `platform.hosting` to the install method.
pub fn relocate_hosting(doc: &mut CatalogDocument, scope: MethodScope) -> bool {
    relocate_platform_key(doc, scope, HOSTING)
}

/// Move `platform.ui` to the install method.
pub fn relocate_ui(doc: &mut CatalogDocument, scope: MethodScope) -> bool {
    relocate_platform_key(doc, scope, UI)
}

/// Copy the normalized top-level deployment flags onto `install_methods[0]`.
///
/// The top-level object stays in place; the rule only reports a change when
/// the target differs, which keeps re-runs quiet. Always index 0, whatever
/// the scope.
pub fn relocate_deployment_from_top_level(
    doc: &mut CatalogDocument,
    _scope: MethodScope,
) -> bool {
    let Some(normalized) = doc.top_level_deployment().map(|d| d.normalized()) else {
        return false;
    };
    let Some(first) = doc.methods_mut(MethodScope::First).next() else {
        return false;
    };
    if first.get(DEPLOYMENT) == Some(&normalized) {
        return false;
    }
    first.insert(DEPLOYMENT.to_string(), normalized);
    true
}

/// Drop `platform.deployment`, keeping it only if the install method has no
/// deployment of its own yet (first writer wins).
pub fn relocate_deployment_from_platform(doc: &mut CatalogDocument, scope: MethodScope) -> bool {
    let mut changed = false;
    for method in doc.methods_mut(scope) {
        if let Some(deployment) = take_from_platform(method, DEPLOYMENT) {
            if method.get(DEPLOYMENT).is_none_or(Value::is_null) {
                method.insert(DEPLOYMENT.to_string(), deployment);
            }
            changed = true;
        }
    }
    changed
}

/// Give every visited `hosting` object an explicit `saas` flag.
pub fn ensure_saas_flag(doc: &mut CatalogDocument, scope: MethodScope) -> bool {
    let mut changed = false;
    for method in doc.methods_mut(scope) {
        if let Some(hosting) = method.get_mut(HOSTING).and_then(Value::as_object_mut)
            && hosting.get(SAAS).is_none_or(Value::is_null)
        {
            hosting.insert(SAAS.to_string(), Value::Bool(false));
            changed = true;
        }
    }
    changed
}
