use super::ModelScope;
use crate::Result;
use crate::config::Config;
use core::time::Duration;
use ohno::IntoAppError;
use url::Url;

/// A connection to one model server.
///
/// Owns the single HTTP client shared by every request in the process;
/// connection reuse is an efficiency optimization, not correctness-relevant
/// state. Constructed once at startup and passed explicitly through
/// component boundaries.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    server: Url,
    page_size: u32,
}

impl Session {
    pub fn new(server: Url, config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.http_timeout))
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            server,
            page_size: config.page_size,
        })
    }

    #[must_use]
    pub const fn server(&self) -> &Url {
        &self.server
    }

    /// Build a commit-scoped locator against this session's server.
    pub fn scope(&self, project: &str, commit: &str) -> Result<ModelScope> {
        ModelScope::new(&self.server, project, commit)
    }

    pub(crate) const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn base(&self) -> &str {
        self.server.as_str().trim_end_matches('/')
    }

    pub(crate) const fn page_size(&self) -> u32 {
        self.page_size
    }
}
