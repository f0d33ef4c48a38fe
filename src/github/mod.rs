pub mod client;
pub mod fetch;
pub mod link;

pub use client::{HttpPageSource, Page, PageSource};
pub use fetch::{commits_url, fetch_commits, normalize, FetchConfig, FetchOutcome};
pub use link::next_link;

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// One element of the `GET /repos/{owner}/{repo}/commits` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    /// Linked account of the author; null when the email maps to no user.
    #[serde(default)]
    pub author: Option<RawAccount>,
    pub commit: RawCommitBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitBody {
    #[serde(default)]
    pub author: Option<RawSignature>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSignature {
    #[serde(default)]
    pub date: Option<String>,
}
