//! Expression compiler.
//!
//! Walks an [`Expression`] and produces the [`FilterNode`] tree sent to the
//! service. Combinators map 1:1 to composite filters with children compiled
//! in order; comparisons become single-column filters after their column
//! token and value have been resolved.

use tablestore_model::filter::{CompositeColumnValueFilter, FilterNode, SingleColumnValueFilter};
use tracing::trace;

use super::ast::{Comparison, Expression};
use super::binding::{Bindings, resolve};
use super::column::{self, IGNORE_IF_MISSING, LATEST_VERSION_ONLY};
use crate::error::TableStoreResult;

/// Compile an expression tree into a filter tree.
pub fn compile(expr: &Expression, bindings: &Bindings) -> TableStoreResult<FilterNode> {
    match expr {
        Expression::Combinator { op, children } => {
            let sub_filters = children
                .iter()
                .map(|child| compile(child, bindings))
                .collect::<TableStoreResult<Vec<_>>>()?;
            trace!(combinator = %op, children = sub_filters.len(), "compiled composite filter");
            Ok(FilterNode::Composite(CompositeColumnValueFilter {
                combinator: *op,
                sub_filters,
            }))
        }
        Expression::Comparison(comparison) => compile_comparison(comparison, bindings),
    }
}

fn compile_comparison(
    comparison: &Comparison,
    bindings: &Bindings,
) -> TableStoreResult<FilterNode> {
    let column = column::parse(&comparison.column)?;
    let value = resolve(&comparison.value, bindings, comparison)?;

    let mut filter = SingleColumnValueFilter::new(comparison.op, column.name.clone(), value);
    filter.ignore_if_missing = column.flag(IGNORE_IF_MISSING);
    if let Some(latest) = column.flag(LATEST_VERSION_ONLY) {
        filter.latest_version_only = latest;
    }
    if let Some(options) = column.options {
        filter.extra_options = options
            .into_iter()
            .filter(|(k, _)| k != IGNORE_IF_MISSING && k != LATEST_VERSION_ONLY)
            .collect();
    }

    trace!(
        column = %filter.column_name,
        comparator = %filter.comparator,
        "compiled column filter"
    );
    Ok(FilterNode::Single(filter))
}
