use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::types::RepoRef;

/// Invocation context of a workflow run, passed explicitly to the publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// PR number from the triggering event, if it was a pull request event
    pub pull_request_number: Option<u64>,
    pub repo: RepoRef,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to read event payload {}", path.display())]
    ReadEvent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event payload {}", path.display())]
    ParseEvent {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing repository: pass --repo or set GITHUB_REPOSITORY")]
    MissingRepo,

    #[error("invalid repository `{0}`, expected owner/repo")]
    InvalidRepo(String),
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: Option<u64>,
}

impl EventContext {
    /// Build the context from an optional event payload file
    pub fn load(event_path: Option<&Path>, repo: RepoRef) -> Result<Self, ContextError> {
        let pull_request_number = match event_path {
            Some(path) => read_event_pr_number(path)?,
            None => None,
        };
        debug!(?pull_request_number, repo = %repo.url(), "loaded event context");
        Ok(Self {
            pull_request_number,
            repo,
        })
    }
}

pub fn read_event_pr_number(path: &Path) -> Result<Option<u64>, ContextError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContextError::ReadEvent {
        path: path.to_path_buf(),
        source,
    })?;
    parse_event_pr_number(&raw).map_err(|source| ContextError::ParseEvent {
        path: path.to_path_buf(),
        source,
    })
}

/// `pull_request.number` of an event payload, absent for non-PR events
pub fn parse_event_pr_number(raw: &str) -> Result<Option<u64>, serde_json::Error> {
    let payload: EventPayload = serde_json::from_str(raw)?;
    Ok(payload.pull_request.and_then(|pr| pr.number))
}

/// Parse an `owner/repo` slug such as the value of `GITHUB_REPOSITORY`
pub fn parse_repo_slug(slug: Option<&str>) -> Result<RepoRef, ContextError> {
    let slug = slug
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ContextError::MissingRepo)?;

    let re = Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$")
        .map_err(|_| ContextError::InvalidRepo(slug.to_string()))?;
    let caps = re
        .captures(slug)
        .ok_or_else(|| ContextError::InvalidRepo(slug.to_string()))?;

    Ok(RepoRef {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    })
}
