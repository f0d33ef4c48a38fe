use super::link::next_link;
use super::RawCommit;
use crate::error::{GhHeatError, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, LINK};
use std::time::Duration;
use tracing::debug;

/// One page of the commit listing plus the cursor to the following page.
#[derive(Debug, Clone)]
pub struct Page {
    pub commits: Vec<RawCommit>,
    pub next: Option<String>,
}

/// Anything that can turn a page URL into a decoded page.
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> Result<Page>;
}

pub struct HttpPageSource {
    client: Client,
    token: Option<String>,
}

impl HttpPageSource {
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, url: &str) -> Result<Page> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GhHeatError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);
        let commits: Vec<RawCommit> = response.json()?;
        debug!(url, commits = commits.len(), has_next = next.is_some(), "fetched page");

        Ok(Page { commits, next })
    }
}
