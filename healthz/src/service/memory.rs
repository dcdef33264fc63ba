//! In-memory Healthz endpoint backed by a device-state snapshot.
//!
//! The snapshot is a JSON document:
//!
//! ```json
//! {
//!   "credentials": {"username": "admin", "password": "admin"},
//!   "components": [
//!     {"path": {"elem": [{"name": "component", "key": {"name": "fan1"}}]},
//!      "status": "HEALTHY", "id": "evt-1"}
//!   ]
//! }
//! ```

use std::path::Path as FsPath;

use serde::Deserialize;

use super::{Code, HealthzService, RpcStatus};
use crate::context::CallContext;
use crate::path::Path;
use crate::schema::{
    CheckRequest, CheckResponse, ComponentStatus, GetRequest, GetResponse, ListRequest,
    ListResponse,
};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeviceState {
    credentials: Option<Credentials>,
    components: Vec<ComponentStatus>,
}

/// A Healthz endpoint answering from a fixed set of component records.
#[derive(Debug, Clone, Default)]
pub struct MemoryService {
    components: Vec<ComponentStatus>,
    credentials: Option<Credentials>,
}

impl MemoryService {
    pub fn new(components: Vec<ComponentStatus>) -> Self {
        Self {
            components,
            credentials: None,
        }
    }

    /// Require every call to carry these credentials.
    pub fn require_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Load a device-state snapshot from a JSON file.
    pub fn load(path: &FsPath) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
            .map_err(|e| Error::DeviceState(format!("{}: {}", path.display(), e)))
    }

    /// Parse a device-state snapshot.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let state: DeviceState = serde_json::from_str(json)?;
        Ok(Self {
            components: state.components,
            credentials: state.credentials,
        })
    }

    pub fn components(&self) -> &[ComponentStatus] {
        &self.components
    }

    fn admit(&self, ctx: &CallContext) -> std::result::Result<(), RpcStatus> {
        if ctx.is_expired() {
            return Err(RpcStatus::new(Code::DeadlineExceeded, "context deadline exceeded"));
        }

        if let Some(expected) = &self.credentials {
            let username = ctx.metadata_value("username");
            let password = ctx.metadata_value("password");
            if username != Some(expected.username.as_str())
                || password != Some(expected.password.as_str())
            {
                return Err(RpcStatus::new(Code::Unauthenticated, "invalid username or password"));
            }
        }

        Ok(())
    }

    /// Records addressed exactly by `path`.
    fn at<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a ComponentStatus> + 'a {
        self.components
            .iter()
            .filter(move |c| c.path.as_ref() == Some(path))
    }
}

/// Pick the most recently created record.
fn latest<'a>(records: impl Iterator<Item = &'a ComponentStatus>) -> Option<&'a ComponentStatus> {
    records.max_by_key(|c| c.created)
}

impl HealthzService for MemoryService {
    fn get(
        &self,
        ctx: &CallContext,
        req: GetRequest,
    ) -> std::result::Result<GetResponse, RpcStatus> {
        self.admit(ctx)?;

        match latest(self.at(&req.path)) {
            Some(component) => Ok(GetResponse {
                component: Some(component.clone()),
            }),
            None => Err(RpcStatus::not_found(format!("no health status for {}", req.path))),
        }
    }

    fn list(
        &self,
        ctx: &CallContext,
        req: ListRequest,
    ) -> std::result::Result<ListResponse, RpcStatus> {
        self.admit(ctx)?;

        let statuses = self
            .components
            .iter()
            .filter(|c| c.path.as_ref().is_some_and(|p| p.starts_with(&req.path)))
            .filter(|c| req.include_acknowledged || !c.acknowledged)
            .cloned()
            .collect();

        Ok(ListResponse { statuses })
    }

    fn check(
        &self,
        ctx: &CallContext,
        req: CheckRequest,
    ) -> std::result::Result<CheckResponse, RpcStatus> {
        self.admit(ctx)?;

        let found = if req.event_id.is_empty() {
            latest(self.at(&req.path))
        } else {
            latest(self.at(&req.path).filter(|c| c.id == req.event_id))
        };

        match found {
            Some(component) => Ok(CheckResponse {
                status: Some(component.clone()),
            }),
            None if req.event_id.is_empty() => {
                Err(RpcStatus::not_found(format!("no health status for {}", req.path)))
            }
            None => Err(RpcStatus::not_found(format!(
                "no event {} for {}",
                req.event_id, req.path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;
    use crate::schema::Status;
    use chrono::{TimeZone, Utc};
    use std::time::{Duration, Instant};

    fn fan(name: &str, status: Status, id: &str) -> ComponentStatus {
        let path = parse_path(&format!("/components/component[name={}]", name));
        ComponentStatus::new(path, status, id)
    }

    fn service() -> MemoryService {
        let mut acked = fan("fan2", Status::Unhealthy, "evt-2");
        acked.acknowledged = true;

        let mut old = fan("fan1", Status::Unhealthy, "evt-0");
        old.created = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let mut new = fan("fan1", Status::Healthy, "evt-1");
        new.created = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        MemoryService::new(vec![old, new, acked])
    }

    fn list_req(path: &str, include_acknowledged: bool) -> ListRequest {
        ListRequest {
            path: parse_path(path),
            include_acknowledged,
        }
    }

    fn check_req(path: &str, event_id: &str) -> CheckRequest {
        CheckRequest {
            path: parse_path(path),
            event_id: event_id.to_string(),
        }
    }

    #[test]
    fn test_get_latest() {
        let ctx = CallContext::new("dut");
        let req = GetRequest {
            path: parse_path("/components/component[name=fan1]"),
        };
        let resp = service().get(&ctx, req).unwrap();
        assert_eq!(resp.component.unwrap().id, "evt-1");
    }

    #[test]
    fn test_get_not_found() {
        let ctx = CallContext::new("dut");
        let req = GetRequest {
            path: parse_path("/components/component[name=psu9]"),
        };
        let err = service().get(&ctx, req).unwrap_err();
        assert_eq!(err.code, Code::NotFound);
        assert!(err.message.contains("psu9"));
    }

    #[test]
    fn test_list_filters_acknowledged() {
        let ctx = CallContext::new("dut");
        let svc = service();

        let resp = svc.list(&ctx, list_req("/components", false)).unwrap();
        assert_eq!(resp.statuses.len(), 2);
        assert!(resp.statuses.iter().all(|s| !s.acknowledged));

        let resp = svc.list(&ctx, list_req("/components", true)).unwrap();
        assert_eq!(resp.statuses.len(), 3);
    }

    #[test]
    fn test_list_unknown_prefix_is_empty() {
        let ctx = CallContext::new("dut");
        let resp = service().list(&ctx, list_req("/interfaces", true)).unwrap();
        assert!(resp.statuses.is_empty());
    }

    #[test]
    fn test_check_by_event_id() {
        let ctx = CallContext::new("dut");
        let svc = service();
        let path = "/components/component[name=fan1]";

        let resp = svc.check(&ctx, check_req(path, "evt-0")).unwrap();
        assert_eq!(resp.status.unwrap().status, Status::Unhealthy);

        let resp = svc.check(&ctx, check_req(path, "")).unwrap();
        assert_eq!(resp.status.unwrap().id, "evt-1");

        let err = svc.check(&ctx, check_req(path, "evt-9")).unwrap_err();
        assert_eq!(err.code, Code::NotFound);
    }

    #[test]
    fn test_expired_deadline() {
        let earlier = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);
        let ctx = CallContext::new("dut").with_deadline(earlier);
        let err = service().list(&ctx, list_req("/", true)).unwrap_err();
        assert_eq!(err.code, Code::DeadlineExceeded);
    }

    #[test]
    fn test_required_credentials() {
        let svc = service().require_credentials("admin", "secret");
        let req = || list_req("/", true);

        let err = svc.list(&CallContext::new("dut"), req()).unwrap_err();
        assert_eq!(err.code, Code::Unauthenticated);

        let wrong = CallContext::new("dut").with_credentials("admin", "nope");
        assert_eq!(svc.list(&wrong, req()).unwrap_err().code, Code::Unauthenticated);

        let right = CallContext::new("dut").with_credentials("admin", "secret");
        assert!(svc.list(&right, req()).is_ok());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "credentials": {"username": "admin", "password": "pw"},
            "components": [
                {"path": {"elem": [{"name": "component", "key": {"name": "fan1"}}]},
                 "status": "HEALTHY", "id": "evt-1"}
            ]
        }"#;
        let svc = MemoryService::from_json(json).unwrap();
        assert_eq!(svc.components().len(), 1);

        let ctx = CallContext::new("dut").with_credentials("admin", "pw");
        let req = GetRequest {
            path: parse_path("/component[name=fan1]"),
        };
        let resp = svc.get(&ctx, req).unwrap();
        assert_eq!(resp.component.unwrap().status, Status::Healthy);
    }

    #[test]
    fn test_load_bad_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(MemoryService::load(&path), Err(Error::DeviceState(_))));
    }
}
