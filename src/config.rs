// Configuration: command-line flags (with environment fallbacks) and the
// explicit `ClientConfig` they resolve into. The client never reads
// process-wide settings; everything it needs is passed in here.

use crate::demo::Walkthrough;
use crate::error::{ClientError, ClientResult};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Public CRS deployment used when no hostname override is given.
pub const DEFAULT_HOSTNAME: &str = "https://crs.catchoom.com";

/// Settings the management client is built from.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    /// Base URL of the deployment, e.g. `https://crs.catchoom.com`.
    pub hostname: String,
    /// Per-request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Config for the public deployment with the transport's default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            timeout: None,
        }
    }

    /// Point the client at a custom deployment.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Turns a user supplied hostname into a base URL: adds `https://` when no
/// scheme is given and strips trailing slashes.
pub fn normalize_hostname(raw: &str) -> ClientResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Config("hostname is empty".into()));
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let parsed = Url::parse(&candidate)
        .map_err(|e| ClientError::Config(format!("invalid hostname '{}': {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "unsupported scheme '{}' in hostname '{}'",
            parsed.scheme(),
            raw
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ClientError::Config(format!("hostname '{}' has no host", raw)));
    }
    Ok(candidate.trim_end_matches('/').to_string())
}

/// Lists, creates, updates and deletes every type of object on the CRS
/// management API (collection, token, item and reference image).
#[derive(Parser, Debug)]
#[command(
    name = "crs-manage",
    version,
    about = "Walk through the CRS management API",
    long_about = "Lists, creates, updates and finally deletes a collection, a token, an item \
                  and a reference image using the CRS management API. Don't set the hostname \
                  unless you are using a custom platform."
)]
pub struct Cli {
    /// Management API key
    #[arg(
        short = 'a',
        long = "api-key",
        alias = "api_key",
        env = "CRS_API_KEY",
        hide_env_values = true
    )]
    pub api_key: String,

    /// Reference image that will be uploaded
    #[arg(short = 'f', long)]
    pub filename: PathBuf,

    /// Hostname of the recognition platform
    #[arg(short = 'H', long, env = "CRS_HOSTNAME")]
    pub hostname: Option<String>,

    /// Page size used when listing objects
    #[arg(
        short = 'n',
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub items_per_page: u32,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log requests and responses to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_key.clone());
        if let Some(hostname) = &self.hostname {
            config = config.with_hostname(hostname.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn walkthrough(&self) -> Walkthrough {
        Walkthrough {
            filename: self.filename.clone(),
            items_per_page: self.items_per_page,
        }
    }
}
