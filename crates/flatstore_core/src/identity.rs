//! Model identity registry.
//!
//! # Responsibility
//! - Associate one identifier field name with each model type, process-wide.
//! - Resolve identifier values from live instances for store operations.
//!
//! # Invariants
//! - A model type has at most one bound identifier field at any moment.
//! - Re-binding with the same field name is idempotent.
//! - Re-binding with a different field name is last-write-wins.
//! - Bindings live for the process lifetime; there is no teardown.

use log::warn;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

struct Binding {
    field: &'static str,
    model: &'static str,
}

static BINDINGS: Lazy<RwLock<HashMap<TypeId, Binding>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers `field` as the unique identifier field for `T`, process-wide.
///
/// Call once per model type, at model-definition time. Calling again with the
/// same field name is a no-op; calling again with a different field name
/// replaces the binding and emits a cautionary record.
pub fn bind_identifier<T: 'static>(field: &'static str) {
    let mut bindings = BINDINGS.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(bound) = bindings.get(&TypeId::of::<T>()) {
        if bound.field == field {
            return;
        }
        warn!(
            "event=identifier_rebind module=identity model={} old_field={} new_field={}",
            bound.model, bound.field, field
        );
    }
    bindings.insert(
        TypeId::of::<T>(),
        Binding {
            field,
            model: type_name::<T>(),
        },
    );
}

/// Returns the identifier field name bound to `T`, if any.
pub fn identifier_field<T: 'static>() -> Option<&'static str> {
    BINDINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&TypeId::of::<T>())
        .map(|binding| binding.field)
}

/// Reads the bound identifier value from a live instance.
///
/// Returns `None` when `T` has no binding, when the instance cannot be
/// serialized, or when its serialized form lacks the bound field. Never fails.
pub fn identifier_value<T>(model: &T) -> Option<Value>
where
    T: Serialize + 'static,
{
    let field = identifier_field::<T>()?;
    let raw = serde_json::to_value(model).ok()?;
    raw.get(field).cloned()
}
