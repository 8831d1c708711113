//! Session context for remote calls
//!
//! Holds the lazily resolved credentials and the per-project snapshot cache.
//! Both are process-wide state in spirit, but live in an explicit context
//! object with explicit invalidation: an authorization failure invalidates
//! the credentials so the next request resolves fresh ones, and any issued
//! move invalidates the snapshots so no stale order is ever served.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::config::PASSWORD_ENV_VAR;
use crate::gateway::types::VersionRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Where credentials come from. Resolved lazily, on the first request that
/// needs them, and again after every invalidation.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Option<Credentials>;
}

/// Resolves the password from the environment for a configured username.
pub struct EnvCredentialSource {
    username: String,
}

impl EnvCredentialSource {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl CredentialSource for EnvCredentialSource {
    fn credentials(&self) -> Option<Credentials> {
        let password = std::env::var(PASSWORD_ENV_VAR).ok()?;
        Some(Credentials {
            username: self.username.clone(),
            password,
        })
    }
}

pub struct Session {
    source: Box<dyn CredentialSource>,
    credentials: Mutex<Option<Credentials>>,
    snapshots: Mutex<HashMap<String, Vec<VersionRecord>>>,
}

impl Session {
    pub fn new(source: Box<dyn CredentialSource>) -> Self {
        Self {
            source,
            credentials: Mutex::new(None),
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    /// Current credentials, resolving from the source on first use.
    pub fn credentials(&self) -> Option<Credentials> {
        let mut slot = self.credentials.lock().unwrap();
        if slot.is_none() {
            *slot = self.source.credentials();
        }
        slot.clone()
    }

    /// Drop the cached credentials so the next call resolves fresh ones.
    /// Called when the remote rejects the current ones.
    pub fn invalidate_credentials(&self) {
        info!("Invalidating cached credentials");
        *self.credentials.lock().unwrap() = None;
    }

    pub fn cached_versions(&self, project_key: &str) -> Option<Vec<VersionRecord>> {
        self.snapshots.lock().unwrap().get(project_key).cloned()
    }

    pub fn store_versions(&self, project_key: &str, records: Vec<VersionRecord>) {
        self.snapshots
            .lock()
            .unwrap()
            .insert(project_key.to_string(), records);
    }

    /// Every issued move shifts remote positions, so all cached snapshots
    /// become stale at once.
    pub fn invalidate_snapshots(&self) {
        debug!("Invalidating cached version snapshots");
        self.snapshots.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn credentials_are_resolved_lazily_and_cached() {
        let mut source = MockCredentialSource::new();
        source.expect_credentials().times(1).returning(|| {
            Some(Credentials {
                username: "alice".into(),
                password: "hunter2".into(),
            })
        });
        let session = Session::new(Box::new(source));

        let first = session.credentials().unwrap();
        let second = session.credentials().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalidation_forces_a_fresh_resolution() {
        let mut source = MockCredentialSource::new();
        source.expect_credentials().times(2).returning(|| {
            Some(Credentials {
                username: "alice".into(),
                password: "hunter2".into(),
            })
        });
        let session = Session::new(Box::new(source));

        session.credentials().unwrap();
        session.invalidate_credentials();
        session.credentials().unwrap();
    }

    #[test]
    fn snapshot_cache_round_trips_and_clears() {
        let mut source = MockCredentialSource::new();
        source.expect_credentials().returning(|| None);
        let session = Session::new(Box::new(source));
        let records = vec![VersionRecord {
            id: "1".into(),
            name: "140.0.0".into(),
            self_ref: "https://jira/version/1".into(),
            position: 0,
        }];

        session.store_versions("TEST", records.clone());
        assert_eq!(session.cached_versions("TEST"), Some(records));
        session.invalidate_snapshots();
        assert_eq!(session.cached_versions("TEST"), None);
    }

    #[test]
    #[serial]
    fn env_source_reads_the_password_variable() {
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "hunter2") };
        let source = EnvCredentialSource::new("alice");
        assert_eq!(
            source.credentials(),
            Some(Credentials {
                username: "alice".into(),
                password: "hunter2".into(),
            })
        );

        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };
        assert_eq!(source.credentials(), None);
    }
}
