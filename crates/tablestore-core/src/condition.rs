//! Write condition builder.

use tablestore_model::filter::Condition;
use tablestore_model::types::RowExistence;

use crate::error::{TableStoreError, TableStoreResult};
use crate::expression::{Bindings, Expression, compile};

fn existence(symbol: &str) -> TableStoreResult<RowExistence> {
    RowExistence::from_symbol(symbol)
        .ok_or_else(|| TableStoreError::InvalidExistence(symbol.to_owned()))
}

/// A condition on row existence only.
///
/// `existence` is one of `ignore`, `expect_exist`, `expect_not_exist`.
pub fn build(existence_symbol: &str) -> TableStoreResult<Condition> {
    Ok(Condition::new(existence(existence_symbol)?))
}

/// A condition on row existence plus a compiled column predicate.
pub fn build_with(
    existence_symbol: &str,
    expr: &Expression,
    bindings: &Bindings,
) -> TableStoreResult<Condition> {
    let row_existence = existence(existence_symbol)?;
    let filter = compile(expr, bindings)?;
    Ok(Condition::new(row_existence).with_column_condition(filter))
}
