//! Shared enums and small value records used by request and response types.
//!
//! Enum variants use idiomatic Rust `PascalCase` naming with `#[serde(rename)]`
//! attributes mapping to the `SCREAMING_SNAKE_CASE` names used on the wire.
//! Caller-facing symbols (`expect_exist`, `after_modify`, ...) are parsed with
//! the `from_symbol` constructors; they return `None` for anything unknown and
//! leave the choice of error to the caller.

use serde::{Deserialize, Serialize};

use crate::value::PrimaryKey;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Row-existence expectation attached to a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RowExistence {
    /// Write regardless of whether the row exists.
    #[default]
    #[serde(rename = "IGNORE")]
    Ignore,
    /// The row must already exist.
    #[serde(rename = "EXPECT_EXIST")]
    ExpectExist,
    /// The row must not exist yet.
    #[serde(rename = "EXPECT_NOT_EXIST")]
    ExpectNotExist,
}

impl RowExistence {
    /// Parse a caller symbol (`ignore`, `expect_exist`, `expect_not_exist`).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "ignore" => Some(Self::Ignore),
            "expect_exist" => Some(Self::ExpectExist),
            "expect_not_exist" => Some(Self::ExpectNotExist),
            _ => None,
        }
    }

    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::ExpectExist => "EXPECT_EXIST",
            Self::ExpectNotExist => "EXPECT_NOT_EXIST",
        }
    }
}

impl std::fmt::Display for RowExistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a write returns about the affected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnType {
    /// Return nothing.
    #[default]
    #[serde(rename = "RT_NONE")]
    None,
    /// Return the primary key (useful with auto-increment keys).
    #[serde(rename = "RT_PK")]
    Pk,
    /// Return the columns named in `return_columns` after modification.
    #[serde(rename = "RT_AFTER_MODIFY")]
    AfterModify,
}

impl ReturnType {
    /// Parse a caller symbol (`none`, `pk`, `after_modify`).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "none" => Some(Self::None),
            "pk" => Some(Self::Pk),
            "after_modify" => Some(Self::AfterModify),
            _ => None,
        }
    }

    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "RT_NONE",
            Self::Pk => "RT_PK",
            Self::AfterModify => "RT_AFTER_MODIFY",
        }
    }
}

impl std::fmt::Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan direction of a range read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending primary-key order.
    #[default]
    #[serde(rename = "FORWARD")]
    Forward,
    /// Descending primary-key order.
    #[serde(rename = "BACKWARD")]
    Backward,
}

impl Direction {
    /// Parse a caller symbol (`forward`, `backward`).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "forward" => Some(Self::Forward),
            "backward" => Some(Self::Backward),
            _ => None,
        }
    }

    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "FORWARD",
            Self::Backward => "BACKWARD",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparator of a single-column filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparatorType {
    /// `==`
    #[serde(rename = "EQUAL")]
    Equal,
    /// `!=`
    #[serde(rename = "NOT_EQUAL")]
    NotEqual,
    /// `>`
    #[serde(rename = "GREATER_THAN")]
    GreaterThan,
    /// `>=`
    #[serde(rename = "GREATER_EQUAL")]
    GreaterEqual,
    /// `<`
    #[serde(rename = "LESS_THAN")]
    LessThan,
    /// `<=`
    #[serde(rename = "LESS_EQUAL")]
    LessEqual,
}

impl ComparatorType {
    /// Map an expression operator symbol to a comparator.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessEqual),
            _ => None,
        }
    }

    /// The expression operator symbol for this comparator.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterEqual => ">=",
            Self::LessThan => "<",
            Self::LessEqual => "<=",
        }
    }

    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::LessThan => "LESS_THAN",
            Self::LessEqual => "LESS_EQUAL",
        }
    }
}

impl std::fmt::Display for ComparatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combinator of a composite filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// All sub-filters must pass.
    #[serde(rename = "AND")]
    And,
    /// At least one sub-filter must pass.
    #[serde(rename = "OR")]
    Or,
    /// Negation of the sub-filter.
    #[serde(rename = "NOT")]
    Not,
}

impl LogicalOperator {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl std::fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an update operand list.
///
/// Declaration order is the order in which update sets are assembled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum OperationKind {
    /// Write column values.
    #[serde(rename = "PUT")]
    Put,
    /// Delete one version of a column.
    #[serde(rename = "DELETE_ONE_VERSION")]
    Delete,
    /// Delete every version of a column.
    #[serde(rename = "DELETE_ALL_VERSION")]
    DeleteAll,
    /// Atomically add to an integer column.
    #[serde(rename = "INCREMENT")]
    Increment,
}

impl OperationKind {
    /// All kinds in assembly order.
    pub const ALL: [Self; 4] = [Self::Put, Self::Delete, Self::DeleteAll, Self::Increment];

    /// The caller-facing option key for this kind.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Put => "put",
            Self::Delete => "delete",
            Self::DeleteAll => "delete_all",
            Self::Increment => "increment",
        }
    }

    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Put => "PUT",
            Self::Delete => "DELETE_ONE_VERSION",
            Self::DeleteAll => "DELETE_ALL_VERSION",
            Self::Increment => "INCREMENT",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a row inside a batch write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchWriteKind {
    /// Put the whole row.
    #[serde(rename = "PUT")]
    Put,
    /// Apply an update set to the row.
    #[serde(rename = "UPDATE")]
    Update,
    /// Delete the row.
    #[serde(rename = "DELETE")]
    Delete,
}

impl BatchWriteKind {
    /// Parse a caller symbol (`put`, `update`, `delete`).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "put" => Some(Self::Put),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Put => "PUT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for BatchWriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a primary-key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryKeyType {
    /// Integer key.
    #[serde(rename = "INTEGER")]
    Integer,
    /// String key.
    #[serde(rename = "STRING")]
    String,
    /// Binary key.
    #[serde(rename = "BINARY")]
    Binary,
}

impl PrimaryKeyType {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::String => "STRING",
            Self::Binary => "BINARY",
        }
    }
}

impl std::fmt::Display for PrimaryKeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a pre-defined (indexable) attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefinedColumnType {
    /// Integer column.
    #[serde(rename = "DCT_INTEGER")]
    Integer,
    /// Double column.
    #[serde(rename = "DCT_DOUBLE")]
    Double,
    /// Boolean column.
    #[serde(rename = "DCT_BOOLEAN")]
    Boolean,
    /// String column.
    #[serde(rename = "DCT_STRING")]
    String,
    /// Binary column.
    #[serde(rename = "DCT_BLOB")]
    Blob,
}

/// Secondary index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IndexType {
    /// Index maintained asynchronously across partitions.
    #[default]
    #[serde(rename = "IT_GLOBAL_INDEX")]
    Global,
    /// Index co-located with the base partition.
    #[serde(rename = "IT_LOCAL_INDEX")]
    Local,
}

// ---------------------------------------------------------------------------
// Structs - table schema
// ---------------------------------------------------------------------------

/// One column of a table's primary-key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrimaryKeySchema {
    /// Column name.
    pub name: String,
    /// Column type.
    pub key_type: PrimaryKeyType,
    /// Whether the server allocates values for this column.
    #[serde(default)]
    pub auto_increment: bool,
}

impl PrimaryKeySchema {
    /// Create a primary-key schema column.
    #[must_use]
    pub fn new(name: impl Into<String>, key_type: PrimaryKeyType) -> Self {
        Self {
            name: name.into(),
            key_type,
            auto_increment: false,
        }
    }

    /// Mark the column as auto-increment.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

/// A pre-defined attribute column used by secondary indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefinedColumnSchema {
    /// Column name.
    pub name: String,
    /// Column type.
    pub column_type: DefinedColumnType,
}

/// Secondary index definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexMeta {
    /// Index name.
    pub name: String,
    /// Columns making up the index key.
    pub primary_key: Vec<String>,
    /// Defined columns carried by the index.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defined_column: Vec<String>,
    /// Index kind.
    #[serde(default)]
    pub index_type: IndexType,
}

/// Reserved read/write capacity units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReservedThroughput {
    /// Reserved read capacity units.
    pub read: i64,
    /// Reserved write capacity units.
    pub write: i64,
}

/// Table-level data retention options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableOptions {
    /// Data time-to-live in seconds; `-1` keeps data forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<i64>,
    /// Number of versions retained per column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<i64>,
    /// Maximum allowed deviation between a written version and server time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_cell_version_in_sec: Option<i64>,
    /// Whether `update_row` is allowed on the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_update: Option<bool>,
}

impl TableOptions {
    /// Service defaults applied to newly created tables.
    #[must_use]
    pub fn create_defaults() -> Self {
        Self {
            time_to_live: Some(-1),
            max_versions: Some(1),
            deviation_cell_version_in_sec: Some(86_400),
            allow_update: None,
        }
    }

    /// Options with nothing set, used by table updates.
    #[must_use]
    pub fn unset() -> Self {
        Self {
            time_to_live: None,
            max_versions: None,
            deviation_cell_version_in_sec: None,
            allow_update: None,
        }
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::unset()
    }
}

/// Change-stream settings of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSpec {
    /// Whether the change stream is enabled.
    pub is_enabled: bool,
    /// Retention of stream records in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,
}

/// Version filter for reads: either one exact version or a half-open range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeRange {
    /// Inclusive lower bound in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Exclusive upper bound in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// One exact version in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_time: Option<i64>,
}

impl TimeRange {
    /// A range `[start, end)`.
    #[must_use]
    pub fn between(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time: Some(start_time),
            end_time: Some(end_time),
            specific_time: None,
        }
    }

    /// A single version.
    #[must_use]
    pub fn specific(time: i64) -> Self {
        Self {
            start_time: None,
            end_time: None,
            specific_time: Some(time),
        }
    }
}

/// Table description returned by `describe_table`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableMeta {
    /// Table name.
    pub table_name: String,
    /// Primary-key schema in key order.
    #[serde(default)]
    pub primary_key: Vec<PrimaryKeySchema>,
    /// Pre-defined attribute columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defined_columns: Vec<DefinedColumnSchema>,
    /// Secondary indexes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index_metas: Vec<IndexMeta>,
    /// Retention options.
    #[serde(default)]
    pub table_options: TableOptions,
    /// Reserved capacity.
    #[serde(default)]
    pub reserved_throughput: ReservedThroughput,
    /// Change-stream settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_spec: Option<StreamSpec>,
    /// Partition boundaries, each the first key of a shard.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shard_splits: Vec<PrimaryKey>,
}
