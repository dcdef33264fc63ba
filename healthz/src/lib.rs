//! Healthz: client core for the gNOI Healthz service.
//!
//! Parses path expressions, builds Get/List/Check requests, issues them
//! through a [`HealthzService`] and renders the responses.

pub mod config;
pub mod context;
pub mod error;
pub mod ops;
pub mod path;
pub mod render;
pub mod schema;
pub mod service;

pub use config::{Config, HEALTHZ_CONFIG_VAR};
pub use context::CallContext;
pub use error::{Error, Result};
pub use ops::{execute, CheckInput, GetInput, ListInput, Operation};
pub use path::{parse_path, Path, PathElement, Segment};
pub use schema::{ArtifactHeader, ComponentStatus, Status};
pub use service::{Code, HealthzService, MemoryService, RpcStatus};
