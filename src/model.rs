use crate::error::GhHeatError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

/// A commit as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub committer_login: String,
    /// RFC 3339 timestamp exactly as returned by the API.
    pub commit_date: String,
    pub message: String,
}

/// `owner/name` pair identifying a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSpec {
    type Err = GhHeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(".git");
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(GhHeatError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitterCount {
    pub login: String,
    pub commits: u32,
}

/// A run of consecutive calendar days on which one committer pushed work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub login: String,
    pub days: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatCell {
    pub day: String,
    pub block: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub top_committers: String,
    pub longest_streak: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: Option<String>,
    pub top_committers: Vec<CommitterCount>,
    pub longest_streak: Option<Streak>,
    pub summary: Summary,
    pub heatmap: Vec<HeatCell>,
    pub grid: Vec<Vec<u32>>,
}
