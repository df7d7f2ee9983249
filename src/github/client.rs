use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::CommentId;
use regex::Regex;
use tracing::debug;
use url::Url;

use super::types::{PrRef, RepoRef};
use crate::report::publisher::IssueCommentApi;
use crate::report::types::{ExistingComment, PostedComment};

/// GitHub API client wrapper
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Create a new authenticated GitHub client, optionally against a GitHub Enterprise API
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url {
            let base = parse_api_url(api_url)?;
            debug!(api_url = %base, "using custom GitHub API base");
            builder = builder.base_uri(base.as_str())?;
        }
        let octocrab = builder.build()?;
        Ok(Self { octocrab })
    }

    /// Parse a GitHub PR URL into its components
    pub fn parse_pr_url(url: &str) -> Result<PrRef> {
        let re = Regex::new(r"github\.com/([^/]+)/([^/]+)/pull/(\d+)")?;
        let caps = re
            .captures(url)
            .ok_or_else(|| anyhow!("Invalid GitHub PR URL: {}", url))?;

        Ok(PrRef {
            repo: RepoRef {
                owner: caps[1].to_string(),
                repo: caps[2].to_string(),
            },
            number: caps[3].parse()?,
        })
    }

    /// Login of the user the token belongs to
    pub async fn current_login(&self) -> Result<String> {
        let user = self.octocrab.current().user().await?;
        Ok(user.login)
    }
}

#[async_trait]
impl IssueCommentApi for GitHubClient {
    async fn list_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<ExistingComment>> {
        let page = self
            .octocrab
            .issues(&repo.owner, &repo.repo)
            .list_comments(number)
            .send()
            .await
            .with_context(|| format!("GET {}/issues/{}/comments", repo.url(), number))?;

        Ok(page
            .items
            .into_iter()
            .map(|c| ExistingComment {
                id: c.id.0,
                body: c.body,
            })
            .collect())
    }

    async fn update_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> Result<PostedComment> {
        let comment = self
            .octocrab
            .issues(&repo.owner, &repo.repo)
            .update_comment(CommentId(comment_id), body)
            .await
            .with_context(|| format!("PATCH {}/issues/comments/{}", repo.url(), comment_id))?;

        Ok(PostedComment {
            id: comment.id.0,
            html_url: comment.html_url.to_string(),
        })
    }

    async fn create_comment(&self, repo: &RepoRef, number: u64, body: &str) -> Result<PostedComment> {
        let comment = self
            .octocrab
            .issues(&repo.owner, &repo.repo)
            .create_comment(number, body)
            .await
            .with_context(|| format!("POST {}/issues/{}/comments", repo.url(), number))?;

        Ok(PostedComment {
            id: comment.id.0,
            html_url: comment.html_url.to_string(),
        })
    }
}

/// Validate a GitHub API base such as `https://ghe.example.com/api/v3`
fn parse_api_url(api_url: &str) -> Result<Url> {
    let url = Url::parse(api_url.trim()).with_context(|| format!("Invalid API URL: {}", api_url))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("Unsupported API URL scheme `{}`: {}", other, api_url)),
    }
}
