//! Per-call context: caller identity and deadline.
//!
//! Credentials are attached to every outgoing call as `username` and
//! `password` metadata entries.

use std::time::{Duration, Instant};

use crate::Config;

/// Context handed to every remote call.
#[derive(Clone, Default)]
pub struct CallContext {
    /// Device address the call is routed to.
    pub target: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Point in time after which the call must not proceed.
    pub deadline: Option<Instant>,
}

impl CallContext {
    /// Create a context for a target with no credentials or deadline.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Build a context from configuration.
    ///
    /// The deadline starts counting now; a timeout of zero means no deadline.
    pub fn from_config(config: &Config) -> Self {
        let mut ctx = Self::new(config.target.clone());
        ctx.username = config.username.clone();
        ctx.password = config.password.clone();
        if config.timeout_secs > 0 {
            ctx = ctx.with_timeout(Duration::from_secs(config.timeout_secs));
        }
        ctx
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the deadline `timeout` from now.
    ///
    /// A timeout too large to represent leaves the call unbounded.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Outgoing metadata entries carrying the caller identity.
    pub fn metadata(&self) -> Vec<(&'static str, &str)> {
        let mut entries = Vec::new();
        if let Some(username) = &self.username {
            entries.push(("username", username.as_str()));
        }
        if let Some(password) = &self.password {
            entries.push(("password", password.as_str()));
        }
        entries
    }

    /// Check if the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Look up an outgoing metadata entry by key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Time left before the deadline (None = unbounded).
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(Instant::now()))
    }
}

impl std::fmt::Debug for CallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("target", &self.target)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("deadline", &self.deadline)
            .finish()
    }
}
