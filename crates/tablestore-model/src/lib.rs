//! Table store model types.
//!
//! Plain data shared by the SDK core and transport bindings: cell and key
//! values, compiled filter trees and write conditions, request and response
//! records, the caller option list, and the transport error type. Nothing in
//! this crate talks to the network.
#![allow(clippy::too_many_lines)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod filter;
pub mod operations;
pub mod options;
pub mod request;
pub mod response;
pub mod types;
pub mod value;

pub use error::{TransportError, TransportErrorCode};
pub use filter::{CompositeColumnValueFilter, Condition, FilterNode, SingleColumnValueFilter};
pub use operations::{TableStoreOperation, TableStoreRequest, TableStoreResponse};
pub use options::{ColumnOperand, OptionValue, RequestOptions};
pub use types::{ComparatorType, Direction, LogicalOperator, OperationKind, ReturnType, RowExistence};
pub use value::{Column, ColumnValue, PrimaryKey, PrimaryKeyColumn, PrimaryKeyValue, Row};
