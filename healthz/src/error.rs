//! Error types for Healthz client operations.

use crate::service::RpcStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    #[error("{operation} RPC failed: {status}")]
    Rpc {
        operation: &'static str,
        status: RpcStatus,
    },

    #[error("{0} returned an empty response")]
    MissingResponse(&'static str),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Device state error: {0}")]
    DeviceState(String),
}

impl Error {
    /// Wrap a failed remote call with the operation that issued it.
    pub fn rpc(operation: &'static str, status: RpcStatus) -> Self {
        Error::Rpc { operation, status }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
