//! Compiled filter trees and write conditions.
//!
//! These are the outputs of the expression compiler and the condition
//! builder. They carry no behaviour; the transport encodes them and the
//! server evaluates them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ComparatorType, LogicalOperator, RowExistence};
use crate::value::ColumnValue;

/// A node of a compiled filter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterNode {
    /// Leaf comparison against one column.
    Single(SingleColumnValueFilter),
    /// Combinator over ordered sub-filters.
    Composite(CompositeColumnValueFilter),
}

impl FilterNode {
    /// Returns the leaf filter if this is a `Single` node.
    #[must_use]
    pub fn as_single(&self) -> Option<&SingleColumnValueFilter> {
        match self {
            Self::Single(f) => Some(f),
            Self::Composite(_) => None,
        }
    }

    /// Returns the composite filter if this is a `Composite` node.
    #[must_use]
    pub fn as_composite(&self) -> Option<&CompositeColumnValueFilter> {
        match self {
            Self::Composite(f) => Some(f),
            Self::Single(_) => None,
        }
    }

    /// Number of leaf comparisons in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Composite(c) => c.sub_filters.iter().map(Self::leaf_count).sum(),
        }
    }
}

/// Compare one column against a constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SingleColumnValueFilter {
    /// Comparator applied as `column <comparator> value`.
    pub comparator: ComparatorType,
    /// Column under test.
    pub column_name: String,
    /// Constant operand.
    pub column_value: ColumnValue,
    /// Whether rows lacking the column pass the filter. `None` leaves the
    /// choice to the server default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_if_missing: Option<bool>,
    /// Whether only the newest version of the column is compared.
    pub latest_version_only: bool,
    /// Inline column options that are not recognised here, passed through
    /// as written.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_options: BTreeMap<String, ColumnValue>,
}

impl SingleColumnValueFilter {
    /// Create a leaf filter with default column options.
    #[must_use]
    pub fn new(
        comparator: ComparatorType,
        column_name: impl Into<String>,
        column_value: impl Into<ColumnValue>,
    ) -> Self {
        Self {
            comparator,
            column_name: column_name.into(),
            column_value: column_value.into(),
            ignore_if_missing: None,
            latest_version_only: true,
            extra_options: BTreeMap::new(),
        }
    }
}

/// Combine sub-filters with a logical operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompositeColumnValueFilter {
    /// The combinator.
    pub combinator: LogicalOperator,
    /// Sub-filters in source order.
    pub sub_filters: Vec<FilterNode>,
}

/// Precondition attached to a write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    /// Expected existence of the row.
    pub row_existence: RowExistence,
    /// Additional column predicate. `None` means the write is conditional
    /// on row existence only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_condition: Option<FilterNode>,
}

impl Condition {
    /// A condition on row existence only.
    #[must_use]
    pub fn new(row_existence: RowExistence) -> Self {
        Self {
            row_existence,
            column_condition: None,
        }
    }

    /// Attach a column predicate.
    #[must_use]
    pub fn with_column_condition(mut self, filter: FilterNode) -> Self {
        self.column_condition = Some(filter);
        self
    }
}
