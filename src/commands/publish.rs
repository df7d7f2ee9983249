use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::github::auth::get_token;
use crate::github::client::GitHubClient;
use crate::github::context::{EventContext, parse_repo_slug};
use crate::github::types::PublishResponse;
use crate::report::publisher::{CommentPublisher, resolve_target};
use crate::report::types::{PublishOptions, RunConfig};

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Label of the command that produced the output (e.g. preview, up)
    #[arg(long)]
    pub command: String,

    /// Stack the command ran against
    #[arg(long)]
    pub stack: String,

    /// Edit the previous comment for this command and stack instead of adding a new one
    #[arg(
        long,
        env = "EDIT_PR_COMMENT",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub edit_existing: bool,

    /// Pull request number, used when the event payload has none
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<u64>,

    /// GitHub PR URL; overrides --repo and --pr-number
    #[arg(long)]
    pub pr_url: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repo: Option<String>,

    /// Path to the workflow event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// File holding the command output; read from stdin when omitted
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}

pub async fn run(args: PublishArgs) -> Result<()> {
    let (repo, url_number) = match args.pr_url.as_deref() {
        Some(url) => {
            let pr_ref = GitHubClient::parse_pr_url(url)?;
            debug!(pr = %pr_ref.url(), "target taken from --pr-url");
            (pr_ref.repo, Some(pr_ref.number))
        }
        None => (parse_repo_slug(args.repo.as_deref())?, None),
    };
    let context = EventContext::load(args.event_path.as_deref(), repo)?;

    let options = PublishOptions {
        edit_existing: args.edit_existing,
        explicit_request_id: url_number.or(args.pr_number),
    };
    resolve_target(&context, &options)?;

    let output = read_output(args.output_file.as_deref())?;

    let (credential, source) = get_token(args.token.as_deref())?;
    debug!(%source, "resolved GitHub token");

    let config = RunConfig {
        credential,
        command: args.command,
        target_name: args.stack,
        options,
    };
    debug!(?config, "publishing report");

    let client = GitHubClient::new(&config.credential, args.api_url.as_deref())?;
    let publisher = CommentPublisher::new(&client);

    match publisher.publish(&config, &context, &output).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string(&PublishResponse::from(&outcome))?);
            Ok(())
        }
        Err(e) => {
            let e = anyhow::Error::new(e);
            let response = PublishResponse::failed(format!("{:#}", e));
            println!("{}", serde_json::to_string(&response)?);
            Err(e)
        }
    }
}

fn read_output(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read output file {}", path.display())),
        None => {
            let mut output = String::new();
            std::io::stdin()
                .read_to_string(&mut output)
                .context("Failed to read output from stdin")?;
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_output_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Previewing update (prod)\n+ 1 to create").unwrap();

        let output = read_output(Some(file.path())).unwrap();
        assert_eq!(output, "Previewing update (prod)\n+ 1 to create");
    }

    #[test]
    fn read_output_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_output(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to read output file"));
    }
}
