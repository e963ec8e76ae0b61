//! Table store SDK core.
//!
//! Compiles filter expressions and write conditions, maps caller options onto
//! typed request records, and routes the finished records to a per-instance
//! [`Transport`](transport::Transport) through [`TableStoreClient`].
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod expression;
pub mod options;
pub mod transport;
pub mod update;

pub use client::{RangeStart, TableStoreClient};
pub use config::{InstanceConfig, TableStoreConfig};
pub use error::{TableStoreError, TableStoreResult};
pub use expression::{Bindings, Expression, compile, parse_filter};
pub use options::{OptionSchema, merge};
pub use transport::{InstanceId, InstanceRegistry, Transport};
pub use update::aggregate;
