use tokio::process::Command;

use crate::error::{AppError, Result};

/// Environment variables checked for a token, in order.
const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolve a GitHub API token.
///
/// Order: the configured token, `GH_TOKEN`, `GITHUB_TOKEN`, then whatever
/// `gh auth token` prints for the logged-in GitHub CLI user.
pub async fn resolve_token(configured: Option<&str>) -> Result<String> {
    if let Some(token) = first_token(configured, |name| std::env::var(name).ok()) {
        return Ok(token);
    }

    match gh_auth_token().await {
        Some(token) => Ok(token),
        None => Err(AppError::Auth(
            "Not authenticated with GitHub. Run `gh auth login` or set GH_TOKEN".to_string(),
        )),
    }
}

fn first_token<F>(configured: Option<&str>, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .map(str::to_string)
        .into_iter()
        .chain(TOKEN_ENV_VARS.iter().filter_map(|name| env(name)))
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
}

async fn gh_auth_token() -> Option<String> {
    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(error = %e, "GitHub CLI not available");
            return None;
        }
    };

    if !output.status.success() {
        tracing::debug!(status = %output.status, "`gh auth token` failed");
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
