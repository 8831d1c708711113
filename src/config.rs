use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Constants
// =============================================================================

/// Fixed delay between retries of a failed remote call (5 seconds).
pub const DEFAULT_RETRY_DELAY_MS: u64 = 5_000;

/// Environment variable the password is read from.
pub const PASSWORD_ENV_VAR: &str = "JIRA_PASSWORD";

/// Connection settings for the JIRA instance.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct JiraConfig {
    /// Base URL of the instance, e.g. `https://jira.example.com`.
    pub jira_url: String,
    /// Username for basic auth.
    pub username: String,
    /// Verify the server's TLS certificate. Disable for instances behind
    /// self-signed certificates.
    pub verify_tls: bool,
    /// Delay between retries of failed remote calls.
    pub retry_delay_ms: u64,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            jira_url: String::new(),
            username: String::new(),
            verify_tls: true,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl JiraConfig {
    /// Load from a JSON file; a missing file yields the defaults so the CLI
    /// can run entirely off flags.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Returns the default config file path.
/// Uses $XDG_CONFIG_HOME/jira-version-sort if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/jira-version-sort,
/// or ./jira-version-sort if neither is available.
pub fn config_path() -> PathBuf {
    config_path_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

fn config_path_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("jira-version-sort").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<JiraConfig>(json!({
            "jiraUrl": "https://jira.example.com"
        }))
        .unwrap();

        assert_eq!(result.jira_url, "https://jira.example.com");
        assert!(result.verify_tls);
        assert_eq!(result.retry_delay_ms, DEFAULT_RETRY_DELAY_MS);
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<JiraConfig>(json!({
            "jiraUrl": "https://jira.example.com",
            "username": "alice",
            "verifyTls": false,
            "retryDelayMs": 100
        }))
        .unwrap();

        assert_eq!(
            result,
            JiraConfig {
                jira_url: "https://jira.example.com".into(),
                username: "alice".into(),
                verify_tls: false,
                retry_delay_ms: 100,
            }
        );
    }

    #[test]
    fn load_returns_defaults_when_the_file_is_missing() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = JiraConfig::load(&temp_dir.path().join("nope.json")).unwrap();
        assert_eq!(config, JiraConfig::default());
    }

    #[test]
    fn load_reads_a_json_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"jiraUrl": "https://jira.example.com"}"#).unwrap();

        let config = JiraConfig::load(&path).unwrap();
        assert_eq!(config.jira_url, "https://jira.example.com");
    }

    #[test]
    fn config_path_with_env_uses_xdg_config_home_when_set() {
        let path = config_path_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(
            path,
            PathBuf::from("/tmp/test-config/jira-version-sort/config.json")
        );
    }

    #[test]
    fn config_path_with_env_falls_back_to_home_config() {
        let path = config_path_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.config/jira-version-sort/config.json")
        );
    }
}
