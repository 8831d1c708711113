//! Ordered-list gateway
//!
//! The narrow seam between the reconciliation core and the remote tracker:
//! read the current version list, or ask for one version to be moved
//! directly after another. Everything else the remote involves (transport,
//! auth, retries, caching) stays behind this trait.
//!
//! # Modules
//!
//! - [`jira`]: reqwest-backed implementation against the JIRA REST API
//! - [`session`]: credentials and per-project snapshot cache
//! - [`retry`]: injectable retry policy
//! - [`types`]: version records and wire DTOs
//! - [`error`]: gateway error taxonomy

pub mod error;
pub mod jira;
pub mod retry;
pub mod session;
pub mod types;

#[cfg(test)]
use mockall::automock;

use crate::gateway::error::GatewayError;
use crate::gateway::types::VersionRecord;

/// Remote ordered version list, as the core sees it.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionGateway: Send + Sync {
    /// Fetch the project's versions in their current list order.
    ///
    /// Transient and authorization failures are retried internally per the
    /// gateway's policy; an unknown project key surfaces as
    /// [`GatewayError::ProjectNotFound`] and is never retried.
    async fn fetch_versions(
        &self,
        project_key: &str,
    ) -> Result<Vec<VersionRecord>, GatewayError>;

    /// Move `to_move` to sit immediately after `place_after` in the remote
    /// list. Re-issuing an already-applied move is a remote-side no-op.
    async fn move_version(
        &self,
        to_move: &VersionRecord,
        place_after: &VersionRecord,
    ) -> Result<(), GatewayError>;
}
