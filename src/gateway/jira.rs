//! JIRA REST implementation of the version gateway
//!
//! Endpoints:
//! - `GET /rest/api/2/project/{key}/versions`
//! - `POST /rest/api/2/version/{id}/move` with body `{"after": <self ref>}`
//!
//! Authorization failures invalidate the session credentials and retry;
//! connection errors and unexpected statuses retry after the policy's fixed
//! delay; a 404 on the versions endpoint is terminal for that project.

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::gateway::VersionGateway;
use crate::gateway::error::GatewayError;
use crate::gateway::retry::RetryPolicy;
use crate::gateway::session::Session;
use crate::gateway::types::{RemoteVersion, VersionRecord, records_from_wire};

/// A failed remote call, classified for the retry loop. 404 responses are
/// not failures at this level; callers decide what a missing resource means.
enum CallFailure {
    /// 401/403: invalidate credentials, retry without delay.
    Auth(u16),
    /// Connection trouble or an unexpected status: retry after the delay.
    Transient(String),
    /// Not worth retrying.
    Fatal(GatewayError),
}

pub struct JiraGateway {
    client: reqwest::Client,
    base_url: String,
    session: Session,
    retry: RetryPolicy,
}

impl JiraGateway {
    pub fn new(base_url: &str, session: Session, retry: RetryPolicy, verify_tls: bool) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("jira-version-sort")
                .danger_accept_invalid_certs(!verify_tls)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            retry,
        }
    }

    fn versions_url(&self, project_key: &str) -> String {
        format!(
            "{}/rest/api/2/project/{}/versions",
            self.base_url, project_key
        )
    }

    fn move_url(&self, version_id: &str) -> String {
        format!("{}/rest/api/2/version/{}/move", self.base_url, version_id)
    }

    /// Send a request with the session's credentials attached. Returns the
    /// response for 2xx and 404; every other outcome is a `CallFailure`.
    async fn send_authed(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CallFailure> {
        let creds = self
            .session
            .credentials()
            .ok_or(CallFailure::Fatal(GatewayError::MissingCredentials))?;
        let response = request
            .basic_auth(&creds.username, Some(&creds.password))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    CallFailure::Transient(format!("Connection error: {e}"))
                } else {
                    CallFailure::Fatal(e.into())
                }
            })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CallFailure::Auth(status.as_u16()))
            }
            s if s.is_success() || s == StatusCode::NOT_FOUND => Ok(response),
            s => Err(CallFailure::Transient(format!("Unexpected status: {s}"))),
        }
    }

    /// Digest one failure: `Ok(())` means try again, `Err` gives up.
    /// Every allowed retry waits out the policy delay, auth failures
    /// included; re-resolving credentials is instant here, so skipping the
    /// pause would hammer the server while the password stays wrong.
    async fn backoff(&self, failure: CallFailure, attempts: u32) -> Result<(), GatewayError> {
        match failure {
            CallFailure::Fatal(e) => return Err(e),
            CallFailure::Auth(status) => {
                if status == 403 {
                    warn!("Need to enter CAPTCHA in the web JIRA interface");
                } else {
                    warn!("Wrong password");
                }
                self.session.invalidate_credentials();
            }
            CallFailure::Transient(reason) => warn!("{}", reason),
        }
        if !self.retry.allows(attempts) {
            return Err(GatewayError::RetriesExhausted { attempts });
        }
        self.retry.pause().await;
        Ok(())
    }
}

#[async_trait::async_trait]
impl VersionGateway for JiraGateway {
    async fn fetch_versions(
        &self,
        project_key: &str,
    ) -> Result<Vec<VersionRecord>, GatewayError> {
        if let Some(cached) = self.session.cached_versions(project_key) {
            debug!("Serving cached version snapshot for {}", project_key);
            return Ok(cached);
        }

        let url = self.versions_url(project_key);
        let mut attempts = 0u32;
        let raw: Vec<RemoteVersion> = loop {
            attempts += 1;
            match self.send_authed(self.client.get(&url)).await {
                Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                    warn!("No project {}", project_key);
                    return Err(GatewayError::ProjectNotFound(project_key.to_string()));
                }
                Ok(response) => match response.json().await {
                    Ok(raw) => break raw,
                    Err(e) => return Err(GatewayError::InvalidResponse(e.to_string())),
                },
                Err(failure) => self.backoff(failure, attempts).await?,
            }
        };

        let records = records_from_wire(raw);
        self.session.store_versions(project_key, records.clone());
        Ok(records)
    }

    async fn move_version(
        &self,
        to_move: &VersionRecord,
        place_after: &VersionRecord,
    ) -> Result<(), GatewayError> {
        info!("Moving {} to be after {}", to_move.name, place_after.name);
        let url = self.move_url(&to_move.id);
        let body = serde_json::json!({ "after": place_after.self_ref });

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.send_authed(self.client.post(&url).json(&body)).await {
                Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                    // the version vanished between fetch and move
                    return Err(GatewayError::InvalidResponse(format!(
                        "Version {} no longer exists",
                        to_move.name
                    )));
                }
                Ok(_) => {
                    // remote positions shifted; every cached snapshot is stale
                    self.session.invalidate_snapshots();
                    return Ok(());
                }
                Err(failure) => self.backoff(failure, attempts).await?,
            }
        }
    }
}
