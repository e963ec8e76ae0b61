//! Value binding resolution.

use std::collections::HashMap;

use tablestore_model::value::ColumnValue;

use super::ast::ValueRef;
use crate::error::{TableStoreError, TableStoreResult};

/// Named values an expression may reference.
pub type Bindings = HashMap<String, ColumnValue>;

/// Resolve a value reference against `bindings`.
///
/// `context` is the rendered comparison, reported when the binding is missing.
pub fn resolve(
    value: &ValueRef,
    bindings: &Bindings,
    context: &dyn std::fmt::Display,
) -> TableStoreResult<ColumnValue> {
    match value {
        ValueRef::Literal(v) => Ok(v.clone()),
        ValueRef::Binding(name) => {
            bindings
                .get(name)
                .cloned()
                .ok_or_else(|| TableStoreError::UnboundVariable {
                    name: name.clone(),
                    expression: context.to_string(),
                })
        }
    }
}

/// Build bindings from `(name, value)` pairs.
#[must_use]
pub fn bindings<K, V, I>(pairs: I) -> Bindings
where
    K: Into<String>,
    V: Into<ColumnValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
