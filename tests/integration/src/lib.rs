//! End-to-end tests for the table store client.
//!
//! The client is wired to [`MemoryTransport`], an in-process table store,
//! so every test runs the full path: option merging, expression compiling,
//! update aggregation, instance routing, and response unwrapping.
//!
//! Run them with:
//! ```text
//! cargo test -p tablestore-integration
//! ```

use std::sync::{Arc, Once};

use tablestore_core::{InstanceConfig, InstanceId, TableStoreClient, TableStoreConfig};
use tablestore_model::options::RequestOptions;
use tablestore_model::types::{PrimaryKeySchema, PrimaryKeyType};
use tablestore_model::value::{PrimaryKey, PrimaryKeyColumn};


pub use memory::MemoryTransport;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        let config = TableStoreConfig::from_env();
        let rust_log = std::env::var("RUST_LOG").ok();
        tracing_subscriber::fmt()
            .with_env_filter(log_filter(rust_log.as_deref(), &config.log_level))
            .with_test_writer()
            .init();
    });
}

/// `RUST_LOG` if set, otherwise the configured `LOG_LEVEL`.
fn log_filter(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    EnvFilter::try_new(rust_log.unwrap_or(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Instance every test client talks to by default.
pub const TEST_INSTANCE: &str = "test-instance";

/// Create a client bound to a fresh in-memory store.
#[must_use]
pub fn client() -> (TableStoreClient, Arc<MemoryTransport>) {
    client_with(MemoryTransport::new())
}

/// Create a client bound to the given store.
#[must_use]
pub fn client_with(transport: MemoryTransport) -> (TableStoreClient, Arc<MemoryTransport>) {
    init_tracing();

    let config = TableStoreConfig {
        default_instance: TEST_INSTANCE.to_owned(),
        ..TableStoreConfig::default()
    };
    let transport = Arc::new(transport);
    let client = TableStoreClient::new(config.clone());
    let _ = client.register(
        InstanceConfig::from_config(TEST_INSTANCE, "http://localhost:8080", &config),
        transport.clone(),
    );
    (client, transport)
}

/// Generate a unique table name for a test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_owned();
    format!("test_{prefix}_{id}")
}

/// Single-column primary key `id`.
#[must_use]
pub fn pk(id: i64) -> PrimaryKey {
    vec![PrimaryKeyColumn::new("id", id)]
}

/// Create a table keyed by one integer column `id` and return its name.
pub async fn create_test_table(client: &TableStoreClient, prefix: &str) -> String {
    let name = test_table_name(prefix);
    client
        .create_table(
            &InstanceId::new(TEST_INSTANCE),
            &name,
            vec![PrimaryKeySchema::new("id", PrimaryKeyType::Integer)],
            &RequestOptions::new(),
        )
        .await
        .unwrap_or_else(|e| panic!("failed to create table {name}: {e}"));
    name
}

mod test_batch;
mod test_condition;
mod test_error;
mod test_range;
mod test_row;
mod test_search;
mod test_table;

#[cfg(test)]
mod tests {
    use super::log_filter;

    #[test]
    fn test_should_prefer_rust_log_over_configured_level() {
        assert_eq!(log_filter(None, "debug").to_string(), "debug");
        assert_eq!(log_filter(Some("trace"), "debug").to_string(), "trace");
        assert_eq!(
            log_filter(None, "tablestore_core=debug").to_string(),
            "tablestore_core=debug"
        );
    }
}
