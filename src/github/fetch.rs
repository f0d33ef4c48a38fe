use super::client::PageSource;
use super::RawCommit;
use crate::error::{GhHeatError, Result};
use crate::model::{CommitRecord, RepoSpec};
use chrono::{DateTime, SecondsFormat, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_LOOKBACK: Duration = Duration::from_secs(180 * 24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_url: String,
    pub repo: RepoSpec,
    pub lookback: Duration,
    pub per_page: u32,
    pub show_progress: bool,
}

#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<CommitRecord>,
    pub pages: usize,
    /// Raw commits dropped for lacking a linked account or author date.
    pub skipped: usize,
    /// False when pagination stopped on an error instead of running out of pages.
    pub complete: bool,
}

/// First page URL: the commits listing filtered to the lookback window.
pub fn commits_url(config: &FetchConfig, since: DateTime<Utc>) -> Result<String> {
    let base = format!(
        "{}/repos/{}/{}/commits",
        config.api_url.trim_end_matches('/'),
        config.repo.owner,
        config.repo.name
    );
    let url = Url::parse_with_params(
        &base,
        &[
            ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("per_page", config.per_page.to_string()),
        ],
    )
    .map_err(|e| GhHeatError::Other(format!("Invalid API URL '{base}': {e}")))?;
    Ok(url.into())
}

/// Map a raw API commit onto the store schema. Commits without a linked
/// account are dropped.
pub fn normalize(raw: RawCommit) -> Option<CommitRecord> {
    let login = raw.author.and_then(|a| a.login)?;
    let date = raw.commit.author.and_then(|a| a.date)?;
    Some(CommitRecord {
        sha: raw.sha,
        committer_login: login,
        commit_date: date,
        message: raw.commit.message.unwrap_or_default(),
    })
}

/// Walk the paginated listing from `now - lookback` until no next page
/// remains. A failing page ends the walk and keeps what was collected.
pub fn fetch_commits<S: PageSource>(
    source: &S,
    config: &FetchConfig,
    now: DateTime<Utc>,
) -> Result<FetchOutcome> {
    let lookback = chrono::Duration::from_std(config.lookback)
        .map_err(|e| GhHeatError::InvalidDate(format!("Lookback out of range: {e}")))?;
    let since = now - lookback;
    let mut cursor = Some(commits_url(config, since)?);

    info!(repo = %config.repo, since = %since.to_rfc3339_opts(SecondsFormat::Secs, true), "fetching commits");

    let pb = if config.show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Fetching commits...");

    let mut outcome = FetchOutcome::default();

    while let Some(url) = cursor.take() {
        let page = match source.fetch_page(&url) {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, pages = outcome.pages, "error fetching commits, keeping partial result");
                pb.finish_with_message(format!(
                    "Fetch stopped after {} pages ({} commits)",
                    outcome.pages,
                    outcome.records.len()
                ));
                return Ok(outcome);
            }
        };

        outcome.pages += 1;
        for raw in page.commits {
            let sha = raw.sha.clone();
            match normalize(raw) {
                Some(record) => outcome.records.push(record),
                None => {
                    debug!(%sha, "skipping commit without linked account");
                    outcome.skipped += 1;
                }
            }
        }

        pb.set_message(format!(
            "Fetched {} pages, {} commits",
            outcome.pages,
            outcome.records.len()
        ));
        pb.tick();

        cursor = page.next;
    }

    outcome.complete = true;
    pb.finish_with_message(format!("Fetched {} commits", outcome.records.len()));

    if outcome.skipped > 0 {
        info!(skipped = outcome.skipped, "dropped commits with no linked account");
    }
    info!(pages = outcome.pages, commits = outcome.records.len(), "fetch complete");

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{RawAccount, RawCommitBody, RawSignature};

    fn config() -> FetchConfig {
        FetchConfig {
            api_url: "https://api.github.com/".to_string(),
            repo: "apache/tvm".parse().unwrap(),
            lookback: DEFAULT_LOOKBACK,
            per_page: 100,
            show_progress: false,
        }
    }

    #[test]
    fn first_url_carries_since_and_page_size() {
        let since = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let url = commits_url(&config(), since).unwrap();
        assert_eq!(
            url,
            "https://api.github.com/repos/apache/tvm/commits?since=2024-01-02T03%3A04%3A05Z&per_page=100"
        );
    }

    #[test]
    fn normalize_requires_linked_login() {
        let raw = RawCommit {
            sha: "abc".to_string(),
            author: Some(RawAccount { login: None }),
            commit: RawCommitBody {
                author: Some(RawSignature {
                    date: Some("2024-01-01T00:00:00Z".to_string()),
                }),
                message: Some("msg".to_string()),
            },
        };
        assert!(normalize(raw).is_none());
    }

    #[test]
    fn normalize_takes_message_from_commit_body() {
        let raw = RawCommit {
            sha: "abc".to_string(),
            author: Some(RawAccount {
                login: Some("octocat".to_string()),
            }),
            commit: RawCommitBody {
                author: Some(RawSignature {
                    date: Some("2024-01-01T00:00:00Z".to_string()),
                }),
                message: Some("Fix the thing".to_string()),
            },
        };
        let record = normalize(raw).unwrap();
        assert_eq!(record.committer_login, "octocat");
        assert_eq!(record.message, "Fix the thing");
    }
}
