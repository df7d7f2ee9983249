use anyhow::{Result, anyhow};
use std::fmt;
use std::process::Command;

use super::client::GitHubClient;

/// Where the token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Explicit,
    GhCli,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Explicit => write!(f, "--token/GITHUB_TOKEN"),
            TokenSource::GhCli => write!(f, "gh auth token"),
        }
    }
}

/// Get GitHub token, preferring the explicit one and falling back to `gh auth token`
#[allow(clippy::collapsible_if)]
pub fn get_token(explicit: Option<&str>) -> Result<(String, TokenSource)> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok((token.to_string(), TokenSource::Explicit));
    }

    if let Ok(output) = Command::new("gh").args(["auth", "token"]).output() {
        if output.status.success() {
            let token = String::from_utf8(output.stdout)?.trim().to_string();
            if !token.is_empty() {
                return Ok((token, TokenSource::GhCli));
            }
        }
    }

    Err(anyhow!(
        "No GitHub token found.\n\
         Either pass --token, set the GITHUB_TOKEN environment variable, or run `gh auth login`."
    ))
}

/// Check if authentication is available and valid
pub async fn check_auth(explicit: Option<&str>, api_url: Option<&str>) -> AuthStatus {
    let (token, source) = match get_token(explicit) {
        Ok(found) => found,
        Err(e) => {
            return AuthStatus::NoToken {
                error: e.to_string(),
            };
        }
    };

    let client = match GitHubClient::new(&token, api_url) {
        Ok(client) => client,
        Err(e) => {
            return AuthStatus::InvalidToken {
                error: format!("{:#}", e),
            };
        }
    };

    match client.current_login().await {
        Ok(username) => AuthStatus::Authenticated { username, source },
        Err(e) => AuthStatus::InvalidToken {
            error: format!("{:#}", e),
        },
    }
}

#[derive(Debug)]
pub enum AuthStatus {
    Authenticated {
        username: String,
        source: TokenSource,
    },
    InvalidToken {
        error: String,
    },
    NoToken {
        error: String,
    },
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated { .. })
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStatus::Authenticated { username, source } => {
                write!(f, "Authenticated as {} (via {})", username, source)
            }
            AuthStatus::InvalidToken { error } => {
                write!(f, "Invalid token: {}", error)
            }
            AuthStatus::NoToken { error } => {
                write!(f, "No token: {}", error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_token_wins() {
        let (token, source) = get_token(Some("  ghp_abc \n")).unwrap();
        assert_eq!(token, "ghp_abc");
        assert_eq!(source, TokenSource::Explicit);
    }

    #[test]
    fn status_display() {
        let status = AuthStatus::Authenticated {
            username: "octocat".to_string(),
            source: TokenSource::Explicit,
        };
        assert!(status.is_authenticated());
        assert_eq!(
            status.to_string(),
            "Authenticated as octocat (via --token/GITHUB_TOKEN)"
        );

        let status = AuthStatus::NoToken {
            error: "none".to_string(),
        };
        assert!(!status.is_authenticated());
        assert_eq!(status.to_string(), "No token: none");
    }
}
