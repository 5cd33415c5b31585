//! Cloudflare DNS record plugin
//!
//! Lets a declarative orchestrator manage Cloudflare DNS records. The host
//! sends create/read/update/delete/list intents with a target config and a
//! property blob; the [`RecordAdapter`] turns them into Cloudflare API calls
//! and reports typed results back. Failures are data: every operation returns
//! a result carrying an [`OperationErrorCode`], never an `Err`.
//!
//! Layers, leaf-first:
//! - [`names`]: short name <-> FQDN conversion
//! - [`properties`]: parse, validate and serialize record properties
//! - [`mapper`]: properties <-> Cloudflare wire bodies
//! - [`classifier`]: provider errors -> operation error codes
//! - [`adapter`]: the lifecycle operations
//! - [`host`]: newline-delimited JSON over stdio

pub mod adapter;
pub mod capabilities;
pub mod classifier;
pub mod config;
pub mod connector;
pub mod error;
pub mod host;
pub mod mapper;
pub mod names;
pub mod properties;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use adapter::RecordAdapter;
pub use capabilities::{Capabilities, RESOURCE_TYPE};
pub use config::{PluginSettings, TargetConfig};
pub use connector::{CloudflareConnector, Connector};
pub use error::{PluginError, PluginResult};
pub use properties::{DnsRecordProperties, RecordType};
pub use types::{
    CreateRequest, DeleteRequest, ListRequest, ListResult, Operation, OperationErrorCode,
    OperationStatus, ProgressResult, ReadRequest, ReadResult, StatusRequest, UpdateRequest,
};
