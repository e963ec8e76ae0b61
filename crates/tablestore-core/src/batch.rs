//! Builders for the rows of batch requests.
//!
//! Each helper assembles one entry of a `BatchGetRow` or `BatchWriteRow`
//! request and merges the caller's options onto it, so a malformed entry
//! fails before anything is submitted.

use tablestore_model::options::RequestOptions;
use tablestore_model::request::{
    MultiRowQueryCriteria, RowInBatchWriteRequest, TableInBatchWriteRequest,
};
use tablestore_model::types::BatchWriteKind;
use tablestore_model::value::{Column, PrimaryKey};

use crate::error::{TableStoreError, TableStoreResult};
use crate::options::merge;
use crate::update::aggregate;

/// Rows to read from one table.
pub fn get(
    table_name: impl Into<String>,
    primary_keys: Vec<PrimaryKey>,
    options: &RequestOptions,
) -> TableStoreResult<MultiRowQueryCriteria> {
    merge(&MultiRowQueryCriteria::new(table_name, primary_keys), options)
}

/// A whole-row put.
pub fn write_put(
    primary_key: PrimaryKey,
    attribute_columns: Vec<Column>,
    options: &RequestOptions,
) -> TableStoreResult<RowInBatchWriteRequest> {
    let mut row = RowInBatchWriteRequest::new(BatchWriteKind::Put, primary_key);
    row.attribute_columns = attribute_columns;
    merge(&row, options)
}

/// An update driven by the `put`/`delete`/`delete_all`/`increment` options.
pub fn write_update(
    primary_key: PrimaryKey,
    options: &RequestOptions,
) -> TableStoreResult<RowInBatchWriteRequest> {
    let mut row = RowInBatchWriteRequest::new(BatchWriteKind::Update, primary_key);
    row.updates = aggregate(options)?;
    merge(&row, options)
}

/// A row delete.
pub fn write_delete(
    primary_key: PrimaryKey,
    options: &RequestOptions,
) -> TableStoreResult<RowInBatchWriteRequest> {
    merge(
        &RowInBatchWriteRequest::new(BatchWriteKind::Delete, primary_key),
        options,
    )
}

/// A batch write row selected by kind symbol (`put`, `update`, `delete`).
///
/// `attribute_columns` is used only by puts.
pub fn write(
    kind: &str,
    primary_key: PrimaryKey,
    attribute_columns: Vec<Column>,
    options: &RequestOptions,
) -> TableStoreResult<RowInBatchWriteRequest> {
    match BatchWriteKind::from_symbol(kind) {
        Some(BatchWriteKind::Put) => write_put(primary_key, attribute_columns, options),
        Some(BatchWriteKind::Update) => write_update(primary_key, options),
        Some(BatchWriteKind::Delete) => write_delete(primary_key, options),
        None => Err(TableStoreError::InvalidOperationKind(kind.to_owned())),
    }
}

/// Group write rows under their table.
#[must_use]
pub fn table(
    table_name: impl Into<String>,
    rows: Vec<RowInBatchWriteRequest>,
) -> TableInBatchWriteRequest {
    TableInBatchWriteRequest::new(table_name, rows)
}
