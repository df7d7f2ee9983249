use std::fmt;

/// Per-run switches for the publish step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Edit the previous comment with the same heading instead of adding a new one
    pub edit_existing: bool,
    /// PR number used when the event payload carries none
    pub explicit_request_id: Option<u64>,
}

/// Input for a single publish run
#[derive(Clone)]
pub struct RunConfig {
    pub credential: String,
    /// Label of the command that produced the output (e.g. `preview`)
    pub command: String,
    /// Name of the stack the command ran against
    pub target_name: String,
    pub options: PublishOptions,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("credential", &"<redacted>")
            .field("command", &self.command)
            .field("target_name", &self.target_name)
            .field("options", &self.options)
            .finish()
    }
}

/// Rendered comment. The heading is also the key used to find an earlier
/// comment from a previous run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody {
    pub heading: String,
    pub body: String,
    pub truncated: bool,
}

/// A comment as returned by the listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingComment {
    pub id: u64,
    pub body: Option<String>,
}

/// A comment after a create or update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    pub id: u64,
    pub html_url: String,
}

/// What a successful publish did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Created { comment_id: u64, html_url: String },
    Updated { comment_id: u64, html_url: String },
}

impl PublishOutcome {
    pub fn action(&self) -> &'static str {
        match self {
            PublishOutcome::Created { .. } => "created",
            PublishOutcome::Updated { .. } => "updated",
        }
    }

    pub fn comment(&self) -> (u64, &str) {
        match self {
            PublishOutcome::Created {
                comment_id,
                html_url,
            }
            | PublishOutcome::Updated {
                comment_id,
                html_url,
            } => (*comment_id, html_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod run_config_debug {
        use super::*;

        #[test]
        fn redacts_credential() {
            let config = RunConfig {
                credential: "ghp_secret".to_string(),
                command: "preview".to_string(),
                target_name: "prod".to_string(),
                options: PublishOptions::default(),
            };
            let rendered = format!("{:?}", config);
            assert!(!rendered.contains("ghp_secret"));
            assert!(rendered.contains("<redacted>"));
            assert!(rendered.contains("preview"));
        }
    }

    mod publish_outcome {
        use super::*;

        #[test]
        fn exposes_comment_fields() {
            let outcome = PublishOutcome::Created {
                comment_id: 3,
                html_url: "u".to_string(),
            };
            assert_eq!(outcome.action(), "created");
            assert_eq!(outcome.comment(), (3, "u"));
        }
    }
}
