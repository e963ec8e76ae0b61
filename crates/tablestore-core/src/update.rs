//! Update-operation aggregator.

use tablestore_model::options::{ColumnOperand, OptionValue, RequestOptions};
use tablestore_model::request::UpdateSet;
use tablestore_model::types::OperationKind;

use crate::error::TableStoreResult;
use crate::options::columns;

/// Collect the `put`, `delete`, `delete_all`, and `increment` operand lists
/// from `options` into one update set.
///
/// Kinds are visited in declaration order. A kind that is missing or
/// `Absent` contributes nothing. Operand contents are not validated.
pub fn aggregate(options: &RequestOptions) -> TableStoreResult<UpdateSet> {
    let mut updates = UpdateSet::new();
    for kind in OperationKind::ALL {
        let key = kind.symbol();
        match options.get(key) {
            None | Some(OptionValue::Absent) => {}
            Some(value) => {
                updates.insert(kind, operands(key, value)?);
            }
        }
    }
    Ok(updates)
}

/// Operand lists arrive as operands proper, or as bare column names for
/// the delete kinds in any shape `columns_to_get` accepts.
fn operands(key: &str, value: &OptionValue) -> TableStoreResult<Vec<ColumnOperand>> {
    match value {
        OptionValue::Operands(ops) => Ok(ops.clone()),
        other => Ok(columns(key, other)?
            .iter()
            .map(ColumnOperand::name)
            .collect()),
    }
}
