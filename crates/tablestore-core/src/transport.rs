//! Transport contract and per-instance routing.
//!
//! A [`Transport`] encodes finished request records, sends them, and decodes
//! the answer. The core never looks inside it; it only routes each request to
//! the binding registered for the target instance.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tablestore_model::error::TransportError;
use tablestore_model::operations::{TableStoreRequest, TableStoreResponse};
use tablestore_model::request::GetRangeRequest;
use tablestore_model::response::GetRangeResponse;

use crate::config::InstanceConfig;

/// Table store instance identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
    /// Create a new instance id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for InstanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Wire binding for one or more instances.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send one request and return its response.
    async fn submit(
        &self,
        instance: &InstanceId,
        request: TableStoreRequest,
    ) -> Result<TableStoreResponse, TransportError>;

    /// Run one page of a range scan, resuming from `token` when given.
    async fn submit_range(
        &self,
        instance: &InstanceId,
        request: GetRangeRequest,
        token: Option<Bytes>,
    ) -> Result<GetRangeResponse, TransportError>;
}

/// A registered instance: its settings and its transport.
#[derive(Debug, Clone)]
pub struct InstanceBinding {
    /// Instance settings.
    pub config: InstanceConfig,
    /// Transport serving the instance.
    pub transport: Arc<dyn Transport>,
}

/// Thread-safe map from instance id to transport binding.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    inner: DashMap<InstanceId, InstanceBinding>,
}

impl InstanceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the binding for `config.name`.
    ///
    /// Returns the binding it replaced, if any.
    pub fn register(
        &self,
        config: InstanceConfig,
        transport: Arc<dyn Transport>,
    ) -> Option<InstanceBinding> {
        let id = InstanceId::new(config.name.clone());
        self.inner.insert(id, InstanceBinding { config, transport })
    }

    /// Remove the binding for `instance`.
    pub fn deregister(&self, instance: &InstanceId) -> Option<InstanceBinding> {
        self.inner.remove(instance).map(|(_, binding)| binding)
    }

    /// The binding for `instance`, if registered.
    #[must_use]
    pub fn get(&self, instance: &InstanceId) -> Option<InstanceBinding> {
        self.inner.get(instance).map(|b| b.clone())
    }

    /// Ids of all registered instances, sorted.
    #[must_use]
    pub fn instances(&self) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self.inner.iter().map(|e| e.key().clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    /// Number of registered instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no instance is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
