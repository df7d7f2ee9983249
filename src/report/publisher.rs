use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::format::render_body;
use super::types::{ExistingComment, PostedComment, PublishOptions, PublishOutcome, RunConfig};
use crate::github::context::EventContext;
use crate::github::types::RepoRef;

/// Issue comment operations needed to publish a report
#[async_trait]
pub trait IssueCommentApi: Send + Sync {
    async fn list_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> anyhow::Result<Vec<ExistingComment>>;

    async fn update_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> anyhow::Result<PostedComment>;

    async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> anyhow::Result<PostedComment>;
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("missing pull request number: the event has no pull_request data and no --pr-number was given")]
    MissingTarget,

    #[error("failed to {action} comment on #{number}")]
    Api {
        action: &'static str,
        number: u64,
        #[source]
        source: anyhow::Error,
    },
}

/// Looking up the previous comment failed; publishing falls back to creating one
#[derive(Debug, Error)]
#[error("failed to list comments on #{number}")]
pub struct LookupError {
    pub number: u64,
    #[source]
    pub source: anyhow::Error,
}

/// Pick the pull request to comment on. Zero counts as unset.
pub fn resolve_target(context: &EventContext, options: &PublishOptions) -> Result<u64, PublishError> {
    context
        .pull_request_number
        .filter(|n| *n > 0)
        .or(options.explicit_request_id.filter(|n| *n > 0))
        .ok_or(PublishError::MissingTarget)
}

/// First comment, in listing order, whose body starts with `heading`
pub fn find_matching<'a>(
    comments: &'a [ExistingComment],
    heading: &str,
) -> Option<&'a ExistingComment> {
    comments.iter().find(|comment| {
        comment
            .body
            .as_deref()
            .is_some_and(|body| body.starts_with(heading))
    })
}

/// Creates or edits the report comment on a pull request
pub struct CommentPublisher<'a, A: IssueCommentApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: IssueCommentApi + ?Sized> CommentPublisher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn publish(
        &self,
        config: &RunConfig,
        context: &EventContext,
        output: &str,
    ) -> Result<PublishOutcome, PublishError> {
        let rendered = render_body(&config.command, &config.target_name, output);
        let number = resolve_target(context, &config.options)?;
        let repo = &context.repo;

        if rendered.truncated {
            debug!(chars = output.chars().count(), "output trimmed to fit comment");
        }

        if config.options.edit_existing {
            match self.find_existing(repo, number, &rendered.heading).await {
                Ok(Some(existing)) => {
                    let posted = self
                        .api
                        .update_comment(repo, existing.id, &rendered.body)
                        .await
                        .map_err(|source| PublishError::Api {
                            action: "update",
                            number,
                            source,
                        })?;
                    info!(pr = number, comment_id = posted.id, "updated existing comment");
                    return Ok(PublishOutcome::Updated {
                        comment_id: posted.id,
                        html_url: posted.html_url,
                    });
                }
                Ok(None) => debug!(pr = number, "no previous comment with this heading"),
                Err(err) => warn!(
                    pr = number,
                    "{}: {:#}; creating a new comment instead",
                    err,
                    err.source
                ),
            }
        }

        let posted = self
            .api
            .create_comment(repo, number, &rendered.body)
            .await
            .map_err(|source| PublishError::Api {
                action: "create",
                number,
                source,
            })?;
        info!(pr = number, comment_id = posted.id, "created comment");
        Ok(PublishOutcome::Created {
            comment_id: posted.id,
            html_url: posted.html_url,
        })
    }

    async fn find_existing(
        &self,
        repo: &RepoRef,
        number: u64,
        heading: &str,
    ) -> Result<Option<ExistingComment>, LookupError> {
        let comments = self
            .api
            .list_comments(repo, number)
            .await
            .map_err(|source| LookupError { number, source })?;
        debug!(pr = number, count = comments.len(), "listed comments");
        Ok(find_matching(&comments, heading).cloned())
    }
}
