use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jira_version_sort::config::{self, JiraConfig};
use jira_version_sort::gateway::jira::JiraGateway;
use jira_version_sort::gateway::retry::RetryPolicy;
use jira_version_sort::gateway::session::{EnvCredentialSource, Session};
use jira_version_sort::sorter::Sorter;

#[derive(Parser)]
#[command(name = "jira-version-sort")]
#[command(version, about = "Keeps JIRA release versions sorted")]
struct Cli {
    /// JIRA project key, e.g. BSERV
    project_key: String,

    /// Major lineages to check: a half-open range like "450..500" or a
    /// comma-separated list like "140,141"
    #[arg(long)]
    majors: String,

    /// Number of dot-separated parts in this project's version names
    /// (2 for "450.3", 3 for "140.0.3")
    #[arg(long, default_value_t = 3)]
    parts: usize,

    /// Override the configured JIRA base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let mut config = JiraConfig::load(&config_path)?;
    if let Some(base_url) = cli.base_url.clone() {
        config.jira_url = base_url;
    }
    anyhow::ensure!(
        !config.jira_url.is_empty(),
        "no JIRA base URL; set jiraUrl in {} or pass --base-url",
        config_path.display()
    );

    let majors = parse_majors(&cli.majors)?;

    let session = Session::new(Box::new(EnvCredentialSource::new(config.username.clone())));
    let retry = RetryPolicy::unbounded(Duration::from_millis(config.retry_delay_ms));
    let gateway = JiraGateway::new(&config.jira_url, session, retry, config.verify_tls);
    let sorter = Sorter::new(gateway);

    let moved = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(sorter.run(&cli.project_key, &majors, cli.parts))?;
    info!("Applied {} moves in total", moved);
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// `"450..500"` (half-open) or `"140,141"`.
fn parse_majors(spec: &str) -> anyhow::Result<Vec<i64>> {
    if let Some((start, end)) = spec.split_once("..") {
        let start: i64 = start.trim().parse()?;
        let end: i64 = end.trim().parse()?;
        anyhow::ensure!(start < end, "empty major range {spec:?}");
        return Ok((start..end).collect());
    }
    spec.split(',')
        .map(|part| Ok(part.trim().parse()?))
        .collect()
}
