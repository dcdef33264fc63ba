//! Healthz operations: decode input, build the request, call, render.
//!
//! Each operation parses its path exactly once, issues one remote call and
//! returns the response as a value. Any call failure is returned as
//! [`Error::Rpc`]; nothing is rendered for a failed call.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::context::CallContext;
use crate::path::{parse_path, scan_segment, Path};
use crate::render::{render_check, render_component_status, render_list};
use crate::schema::{CheckRequest, ComponentStatus, GetRequest, ListRequest, ListResponse};
use crate::service::HealthzService;
use crate::{Error, Result};

/// The three Healthz operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    List,
    Check,
}

/// Input for a Get call: `{"path": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetInput {
    pub path: String,
}

/// Input for a List call: `{"path": "...", "include_acknowledged": true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListInput {
    pub path: String,
    pub include_acknowledged: bool,
}

/// Input for a Check call: `{"path": "...", "event_id": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckInput {
    pub path: String,
    pub event_id: String,
}

/// Decode an operation payload.
pub fn decode_input<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(Error::InvalidInput)
}

/// Parse a user-supplied path, tracing the raw and parsed forms.
fn parse_traced(raw: &str) -> Path {
    log::debug!("User CLI path: {}", raw);

    for segment in raw.split('/') {
        if scan_segment(segment).has_extra_groups() {
            log::warn!(
                "segment '{}' has more than one predicate group; only the first key is used",
                segment
            );
        }
    }

    let path = parse_path(raw);
    log::debug!("Parsed CLI path: {}", path);
    path
}

pub fn build_get_request(input: &GetInput) -> GetRequest {
    GetRequest {
        path: parse_traced(&input.path),
    }
}

pub fn build_list_request(input: &ListInput) -> ListRequest {
    ListRequest {
        path: parse_traced(&input.path),
        include_acknowledged: input.include_acknowledged,
    }
}

pub fn build_check_request(input: &CheckInput) -> CheckRequest {
    CheckRequest {
        path: parse_traced(&input.path),
        event_id: input.event_id.clone(),
    }
}

/// Look up the latest status of a single component.
pub fn get<S>(service: &S, ctx: &CallContext, input: &GetInput) -> Result<ComponentStatus>
where
    S: HealthzService + ?Sized,
{
    let op = Operation::Get;
    log::info!("{} client, target {}", op.name(), ctx.target);

    let req = build_get_request(input);
    let resp = service
        .get(ctx, req)
        .map_err(|status| Error::rpc(op.name(), status))?;

    resp.component.ok_or(Error::MissingResponse(op.name()))
}

/// List all health events under a path.
pub fn list<S>(service: &S, ctx: &CallContext, input: &ListInput) -> Result<ListResponse>
where
    S: HealthzService + ?Sized,
{
    let op = Operation::List;
    log::info!("{} client, target {}", op.name(), ctx.target);

    let req = build_list_request(input);
    service
        .list(ctx, req)
        .map_err(|status| Error::rpc(op.name(), status))
}

/// Re-check the health of a component, optionally for a specific event.
pub fn check<S>(service: &S, ctx: &CallContext, input: &CheckInput) -> Result<ComponentStatus>
where
    S: HealthzService + ?Sized,
{
    let op = Operation::Check;
    log::info!("{} client, target {}", op.name(), ctx.target);

    let req = build_check_request(input);
    let resp = service
        .check(ctx, req)
        .map_err(|status| Error::rpc(op.name(), status))?;

    resp.status.ok_or(Error::MissingResponse(op.name()))
}

/// Decode `json` for `op`, run it, and render the result.
pub fn execute<S>(op: Operation, service: &S, ctx: &CallContext, json: &str) -> Result<String>
where
    S: HealthzService + ?Sized,
{
    match op {
        Operation::Get => {
            let input: GetInput = decode_input(json)?;
            get(service, ctx, &input).map(|cs| render_component_status(&cs))
        }
        Operation::List => {
            let input: ListInput = decode_input(json)?;
            list(service, ctx, &input).map(|resp| render_list(&resp))
        }
        Operation::Check => {
            let input: CheckInput = decode_input(json)?;
            check(service, ctx, &input).map(|cs| render_check(&cs))
        }
    }
}

impl Operation {
    /// Fully qualified RPC name (e.g., "Healthz.Get").
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Get => "Healthz.Get",
            Operation::List => "Healthz.List",
            Operation::Check => "Healthz.Check",
        }
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bare = s.strip_prefix("Healthz.").unwrap_or(s);
        match bare.to_ascii_lowercase().as_str() {
            "get" => Ok(Operation::Get),
            "list" => Ok(Operation::List),
            "check" => Ok(Operation::Check),
            _ => Err(Error::UnknownOperation(s.to_string())),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
