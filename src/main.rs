mod commands;
mod github;
mod report;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pulumi-comment")]
#[command(about = "CLI tool for posting Pulumi reports as GitHub pull request comments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post command output as a PR comment, or edit the previous one
    Publish(commands::publish::PublishArgs),

    /// Check authentication status
    Auth {
        /// GitHub token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitHub API base URL (for GitHub Enterprise)
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    // stdout carries the JSON response
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install TLS crypto provider"))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Publish(args) => {
            commands::publish::run(args).await?;
        }
        Commands::Auth { token, api_url } => {
            commands::auth::run(token.as_deref(), api_url.as_deref()).await?;
        }
    }

    Ok(())
}
