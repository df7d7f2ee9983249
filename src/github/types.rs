use serde::{Deserialize, Serialize};

use crate::report::types::PublishOutcome;

/// Repository coordinates passed to every API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

/// Parsed PR URL components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRef {
    pub repo: RepoRef,
    pub number: u64,
}

impl PrRef {
    pub fn url(&self) -> String {
        format!("{}/pull/{}", self.repo.url(), self.number)
    }
}

/// Response from the publish command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub success: bool,
    pub action: Option<String>,
    pub comment_id: Option<u64>,
    pub html_url: Option<String>,
    pub error: Option<String>,
}

impl PublishResponse {
    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            action: None,
            comment_id: None,
            html_url: None,
            error: Some(error),
        }
    }
}

impl From<&PublishOutcome> for PublishResponse {
    fn from(outcome: &PublishOutcome) -> Self {
        let (comment_id, html_url) = outcome.comment();
        Self {
            success: true,
            action: Some(outcome.action().to_string()),
            comment_id: Some(comment_id),
            html_url: Some(html_url.to_string()),
            error: None,
        }
    }
}

/// Response from the auth command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub authenticated: bool,
    pub status: String,
}
