//! Request assembly façade.
//!
//! Each public operation builds the bare request record from its mandatory
//! arguments, merges the caller's options onto it, and hands the finished
//! record to the transport registered for the target instance. Transport
//! results come back unchanged.

use std::sync::Arc;

use bytes::Bytes;
use tablestore_model::operations::{TableStoreOperation, TableStoreRequest, TableStoreResponse};
use tablestore_model::options::RequestOptions;
use tablestore_model::request::{
    AbortTransactionRequest, BatchGetRowRequest, BatchWriteRowRequest, CommitTransactionRequest,
    CreateTableRequest, DeleteRowRequest, DeleteTableRequest, DescribeTableRequest,
    GetRangeRequest, GetRowRequest, ListTableRequest, MultiRowQueryCriteria, PutRowRequest,
    SearchRequest, StartLocalTransactionRequest, TableInBatchWriteRequest, UpdateRowRequest,
    UpdateTableRequest,
};
use tablestore_model::response::{
    AbortTransactionResponse, BatchGetRowResponse, BatchWriteRowResponse,
    CommitTransactionResponse, CreateTableResponse, DeleteTableResponse, DescribeTableResponse,
    GetRangeResponse, GetRowResponse, ListTableResponse, SearchResponse,
    StartLocalTransactionResponse, UpdateTableResponse, WriteRowResponse,
};
use tablestore_model::types::PrimaryKeySchema;
use tablestore_model::value::{Column, PrimaryKey, PrimaryKeyColumn};
use tracing::{debug, warn};

use crate::config::{InstanceConfig, TableStoreConfig};
use crate::error::{TableStoreError, TableStoreResult};
use crate::options::merge;
use crate::transport::{InstanceBinding, InstanceId, InstanceRegistry, Transport};
use crate::update::aggregate;

/// Lower bound of a range scan.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeStart {
    /// Start a fresh scan at this key (inclusive).
    PrimaryKey(PrimaryKey),
    /// Resume a previous scan from its continuation token.
    Token(Bytes),
}

impl From<PrimaryKey> for RangeStart {
    fn from(pk: PrimaryKey) -> Self {
        Self::PrimaryKey(pk)
    }
}

impl From<Bytes> for RangeStart {
    fn from(token: Bytes) -> Self {
        Self::Token(token)
    }
}

/// Unwrap the expected response variant or report what came back instead.
macro_rules! expect_response {
    ($response:expr, $variant:ident, $op:expr) => {
        match $response {
            TableStoreResponse::$variant(output) => Ok(output),
            other => Err(TableStoreError::UnexpectedResponse {
                operation: $op.to_string(),
                received: other.kind().to_owned(),
            }),
        }
    };
}

/// Table store client routing requests to per-instance transports.
#[derive(Debug)]
pub struct TableStoreClient {
    config: TableStoreConfig,
    registry: InstanceRegistry,
}

impl TableStoreClient {
    /// Create a client with no registered instances.
    #[must_use]
    pub fn new(config: TableStoreConfig) -> Self {
        Self {
            config,
            registry: InstanceRegistry::new(),
        }
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &TableStoreConfig {
        &self.config
    }

    /// Instance used when the caller has no preference.
    #[must_use]
    pub fn default_instance(&self) -> InstanceId {
        InstanceId::new(self.config.default_instance.clone())
    }

    /// Bind a transport to an instance.
    pub fn register(
        &self,
        instance: InstanceConfig,
        transport: Arc<dyn Transport>,
    ) -> Option<InstanceBinding> {
        debug!(instance = %instance.name, endpoint = %instance.endpoint, "registering instance");
        self.registry.register(instance, transport)
    }

    /// Remove an instance binding.
    pub fn deregister(&self, instance: &InstanceId) -> Option<InstanceBinding> {
        debug!(%instance, "deregistering instance");
        self.registry.deregister(instance)
    }

    /// Registered instances.
    #[must_use]
    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    fn transport(&self, instance: &InstanceId) -> TableStoreResult<Arc<dyn Transport>> {
        self.registry
            .get(instance)
            .map(|binding| binding.transport)
            .ok_or_else(|| TableStoreError::UnknownInstance(instance.to_string()))
    }

    async fn submit(
        &self,
        instance: &InstanceId,
        request: TableStoreRequest,
    ) -> TableStoreResult<TableStoreResponse> {
        let transport = self.transport(instance)?;
        let operation = request.operation();
        let request_id = uuid::Uuid::new_v4();
        debug!(
            %operation,
            %instance,
            table = request.table_name().unwrap_or_default(),
            %request_id,
            "submitting request"
        );
        transport.submit(instance, request).await.map_err(|err| {
            warn!(%operation, %instance, %request_id, code = %err.code, error = %err, "transport error");
            TableStoreError::from(err)
        })
    }

    async fn submit_range(
        &self,
        instance: &InstanceId,
        request: GetRangeRequest,
        token: Option<Bytes>,
    ) -> TableStoreResult<GetRangeResponse> {
        let transport = self.transport(instance)?;
        let operation = TableStoreOperation::GetRange;
        let request_id = uuid::Uuid::new_v4();
        debug!(
            %operation,
            %instance,
            table = %request.table_name,
            resumed = token.is_some(),
            %request_id,
            "submitting request"
        );
        transport
            .submit_range(instance, request, token)
            .await
            .map_err(|err| {
                warn!(%operation, %instance, %request_id, code = %err.code, error = %err, "transport error");
                TableStoreError::from(err)
            })
    }

    // -----------------------------------------------------------------------
    // Table management
    // -----------------------------------------------------------------------

    /// Create a table.
    pub async fn create_table(
        &self,
        instance: &InstanceId,
        table_name: &str,
        primary_keys: Vec<PrimaryKeySchema>,
        options: &RequestOptions,
    ) -> TableStoreResult<CreateTableResponse> {
        let request = merge(&CreateTableRequest::new(table_name, primary_keys), options)?;
        let response = self
            .submit(instance, TableStoreRequest::CreateTable(request))
            .await?;
        expect_response!(response, CreateTable, TableStoreOperation::CreateTable)
    }

    /// Delete a table.
    pub async fn delete_table(
        &self,
        instance: &InstanceId,
        table_name: &str,
    ) -> TableStoreResult<DeleteTableResponse> {
        let request = DeleteTableRequest {
            table_name: table_name.to_owned(),
        };
        let response = self
            .submit(instance, TableStoreRequest::DeleteTable(request))
            .await?;
        expect_response!(response, DeleteTable, TableStoreOperation::DeleteTable)
    }

    /// List the tables of an instance.
    pub async fn list_table(&self, instance: &InstanceId) -> TableStoreResult<ListTableResponse> {
        let response = self
            .submit(instance, TableStoreRequest::ListTable(ListTableRequest {}))
            .await?;
        expect_response!(response, ListTable, TableStoreOperation::ListTable)
    }

    /// Change throughput, retention, or stream settings of a table.
    pub async fn update_table(
        &self,
        instance: &InstanceId,
        table_name: &str,
        options: &RequestOptions,
    ) -> TableStoreResult<UpdateTableResponse> {
        let request = merge(&UpdateTableRequest::new(table_name), options)?;
        let response = self
            .submit(instance, TableStoreRequest::UpdateTable(request))
            .await?;
        expect_response!(response, UpdateTable, TableStoreOperation::UpdateTable)
    }

    /// Describe a table.
    pub async fn describe_table(
        &self,
        instance: &InstanceId,
        table_name: &str,
    ) -> TableStoreResult<DescribeTableResponse> {
        let request = DescribeTableRequest {
            table_name: table_name.to_owned(),
        };
        let response = self
            .submit(instance, TableStoreRequest::DescribeTable(request))
            .await?;
        expect_response!(response, DescribeTable, TableStoreOperation::DescribeTable)
    }

    // -----------------------------------------------------------------------
    // Single-row operations
    // -----------------------------------------------------------------------

    /// Read one row.
    pub async fn get_row(
        &self,
        instance: &InstanceId,
        table_name: &str,
        primary_key: PrimaryKey,
        options: &RequestOptions,
    ) -> TableStoreResult<GetRowResponse> {
        let request = merge(&GetRowRequest::new(table_name, primary_key), options)?;
        let response = self
            .submit(instance, TableStoreRequest::GetRow(request))
            .await?;
        expect_response!(response, GetRow, TableStoreOperation::GetRow)
    }

    /// Insert or replace one row.
    pub async fn put_row(
        &self,
        instance: &InstanceId,
        table_name: &str,
        primary_key: PrimaryKey,
        attribute_columns: Vec<Column>,
        options: &RequestOptions,
    ) -> TableStoreResult<WriteRowResponse> {
        let request = merge(
            &PutRowRequest::new(table_name, primary_key, attribute_columns),
            options,
        )?;
        let response = self
            .submit(instance, TableStoreRequest::PutRow(request))
            .await?;
        expect_response!(response, WriteRow, TableStoreOperation::PutRow)
    }

    /// Apply the `put`/`delete`/`delete_all`/`increment` options to one row.
    pub async fn update_row(
        &self,
        instance: &InstanceId,
        table_name: &str,
        primary_key: PrimaryKey,
        options: &RequestOptions,
    ) -> TableStoreResult<WriteRowResponse> {
        let mut request = merge(&UpdateRowRequest::new(table_name, primary_key), options)?;
        request.updates = aggregate(options)?;
        let response = self
            .submit(instance, TableStoreRequest::UpdateRow(request))
            .await?;
        expect_response!(response, WriteRow, TableStoreOperation::UpdateRow)
    }

    /// Delete one row.
    pub async fn delete_row(
        &self,
        instance: &InstanceId,
        table_name: &str,
        primary_key: PrimaryKey,
        options: &RequestOptions,
    ) -> TableStoreResult<WriteRowResponse> {
        let request = merge(&DeleteRowRequest::new(table_name, primary_key), options)?;
        let response = self
            .submit(instance, TableStoreRequest::DeleteRow(request))
            .await?;
        expect_response!(response, WriteRow, TableStoreOperation::DeleteRow)
    }

    // -----------------------------------------------------------------------
    // Batch operations
    // -----------------------------------------------------------------------

    /// Read rows from several tables. Build entries with [`crate::batch::get`].
    pub async fn batch_get(
        &self,
        instance: &InstanceId,
        tables: Vec<MultiRowQueryCriteria>,
    ) -> TableStoreResult<BatchGetRowResponse> {
        let request = BatchGetRowRequest { tables };
        let response = self
            .submit(instance, TableStoreRequest::BatchGetRow(request))
            .await?;
        expect_response!(response, BatchGetRow, TableStoreOperation::BatchGetRow)
    }

    /// Write rows to several tables. Build rows with the [`crate::batch`] helpers.
    pub async fn batch_write(
        &self,
        instance: &InstanceId,
        tables: Vec<TableInBatchWriteRequest>,
        options: &RequestOptions,
    ) -> TableStoreResult<BatchWriteRowResponse> {
        let request = merge(
            &BatchWriteRowRequest {
                tables,
                ..BatchWriteRowRequest::default()
            },
            options,
        )?;
        let response = self
            .submit(instance, TableStoreRequest::BatchWriteRow(request))
            .await?;
        expect_response!(response, BatchWriteRow, TableStoreOperation::BatchWriteRow)
    }

    // -----------------------------------------------------------------------
    // Range scans
    // -----------------------------------------------------------------------

    /// Scan one page of `[start, end)`.
    ///
    /// A key starts a fresh scan; a token resumes an earlier one.
    pub async fn get_range(
        &self,
        instance: &InstanceId,
        table_name: &str,
        start: impl Into<RangeStart>,
        exclusive_end_primary_key: PrimaryKey,
        options: &RequestOptions,
    ) -> TableStoreResult<GetRangeResponse> {
        let base = GetRangeRequest::new(table_name, PrimaryKey::new(), exclusive_end_primary_key);
        let mut request = merge(&base, options)?;
        match start.into() {
            RangeStart::PrimaryKey(pk) => {
                request.inclusive_start_primary_key = pk;
                self.submit_range(instance, request, None).await
            }
            RangeStart::Token(token) => {
                request.token = Some(token.clone());
                self.submit_range(instance, request, Some(token)).await
            }
        }
    }

    /// Scan all of `[start, end)`, following continuation keys.
    ///
    /// Rows are concatenated in scan order. With a `limit` option the scan
    /// stops once that many rows are collected.
    pub async fn iterate_all_range(
        &self,
        instance: &InstanceId,
        table_name: &str,
        inclusive_start_primary_key: PrimaryKey,
        exclusive_end_primary_key: PrimaryKey,
        options: &RequestOptions,
    ) -> TableStoreResult<GetRangeResponse> {
        let base = merge(
            &GetRangeRequest::new(
                table_name,
                inclusive_start_primary_key,
                exclusive_end_primary_key,
            ),
            options,
        )?;
        let limit = base.limit.and_then(|l| usize::try_from(l).ok());

        let mut all = GetRangeResponse::default();
        let mut start = base.inclusive_start_primary_key.clone();
        loop {
            let mut request = base.clone();
            request.inclusive_start_primary_key = start;
            if let Some(limit) = limit {
                request.limit = i64::try_from(limit - all.rows.len()).ok();
            }
            let page = self.submit_range(instance, request, None).await?;

            all.rows.extend(page.rows);
            all.consumed.read += page.consumed.read;
            all.consumed.write += page.consumed.write;

            if let Some(limit) = limit {
                if all.rows.len() >= limit {
                    all.rows.truncate(limit);
                    break;
                }
            }
            match page.next_start_primary_key {
                Some(next) => start = next,
                None => break,
            }
        }
        debug!(table = table_name, rows = all.rows.len(), "range iteration finished");
        Ok(all)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Query a search index. The query body is the `search_query` option.
    pub async fn search(
        &self,
        instance: &InstanceId,
        table_name: &str,
        index_name: &str,
        options: &RequestOptions,
    ) -> TableStoreResult<SearchResponse> {
        let request = merge(&SearchRequest::new(table_name, index_name), options)?;
        let response = self
            .submit(instance, TableStoreRequest::Search(request))
            .await?;
        expect_response!(response, Search, TableStoreOperation::Search)
    }

    // -----------------------------------------------------------------------
    // Local transactions
    // -----------------------------------------------------------------------

    /// Open a transaction scoped to one partition key.
    pub async fn start_local_transaction(
        &self,
        instance: &InstanceId,
        table_name: &str,
        partition_key: PrimaryKeyColumn,
    ) -> TableStoreResult<StartLocalTransactionResponse> {
        let request = StartLocalTransactionRequest {
            table_name: table_name.to_owned(),
            key: partition_key,
        };
        let response = self
            .submit(instance, TableStoreRequest::StartLocalTransaction(request))
            .await?;
        expect_response!(
            response,
            StartLocalTransaction,
            TableStoreOperation::StartLocalTransaction
        )
    }

    /// Commit a transaction.
    pub async fn commit_transaction(
        &self,
        instance: &InstanceId,
        transaction_id: &str,
    ) -> TableStoreResult<CommitTransactionResponse> {
        let request = CommitTransactionRequest {
            transaction_id: transaction_id.to_owned(),
        };
        let response = self
            .submit(instance, TableStoreRequest::CommitTransaction(request))
            .await?;
        expect_response!(response, CommitTransaction, TableStoreOperation::CommitTransaction)
    }

    /// Abort a transaction.
    pub async fn abort_transaction(
        &self,
        instance: &InstanceId,
        transaction_id: &str,
    ) -> TableStoreResult<AbortTransactionResponse> {
        let request = AbortTransactionRequest {
            transaction_id: transaction_id.to_owned(),
        };
        let response = self
            .submit(instance, TableStoreRequest::AbortTransaction(request))
            .await?;
        expect_response!(response, AbortTransaction, TableStoreOperation::AbortTransaction)
    }
}
