//! The remote Healthz service seam.
//!
//! Operations talk to a device through [`HealthzService`]. Transports
//! implement the trait; [`MemoryService`] answers from a local device-state
//! snapshot.

mod memory;

pub use memory::MemoryService;

use crate::context::CallContext;
use crate::schema::{
    CheckRequest, CheckResponse, GetRequest, GetResponse, ListRequest, ListResponse,
};

/// Status codes a remote call can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    PermissionDenied,
    Unimplemented,
    Internal,
    Unavailable,
    Unauthenticated,
}

/// Failure reported by a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcStatus {
    pub code: Code,
    pub message: String,
}

/// A Healthz endpoint.
///
/// Each method issues exactly one call and blocks until it completes or the
/// context deadline passes.
pub trait HealthzService {
    fn get(&self, ctx: &CallContext, req: GetRequest) -> Result<GetResponse, RpcStatus>;

    fn list(&self, ctx: &CallContext, req: ListRequest) -> Result<ListResponse, RpcStatus>;

    fn check(&self, ctx: &CallContext, req: CheckRequest) -> Result<CheckResponse, RpcStatus>;
}

impl RpcStatus {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Code::Cancelled => "Canceled",
            Code::Unknown => "Unknown",
            Code::InvalidArgument => "InvalidArgument",
            Code::DeadlineExceeded => "DeadlineExceeded",
            Code::NotFound => "NotFound",
            Code::PermissionDenied => "PermissionDenied",
            Code::Unimplemented => "Unimplemented",
            Code::Internal => "Internal",
            Code::Unavailable => "Unavailable",
            Code::Unauthenticated => "Unauthenticated",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for RpcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code = {} desc = {}", self.code, self.message)
    }
}

impl std::error::Error for RpcStatus {}
