use std::path::Path;

use git2::Repository as GitRepository;

use crate::error::{AppError, Result};
use crate::platform::types::Repository;

/// Resolve the repository to operate on.
///
/// An explicit `OWNER/NAME` wins; otherwise the git repository containing
/// `start_dir` is inspected for a GitHub remote.
pub async fn resolve_repository(explicit: Option<&str>, start_dir: &Path) -> Result<Repository> {
    if let Some(name) = explicit {
        return parse_repo_name(name);
    }

    let start_dir = start_dir.to_path_buf();
    tokio::task::spawn_blocking(move || discover_repository(&start_dir))
        .await
        .map_err(|e| AppError::Context(format!("Repository discovery task panicked: {e}")))?
}

/// Parse an `OWNER/NAME` pair.
pub fn parse_repo_name(full_name: &str) -> Result<Repository> {
    let parts: Vec<&str> = full_name.trim().splitn(2, '/').collect();
    match parts.as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(Repository::new(*owner, *name))
        }
        _ => Err(AppError::Validation(format!(
            "Invalid repository \"{full_name}\", expected OWNER/NAME"
        ))),
    }
}

fn discover_repository(start_dir: &Path) -> Result<Repository> {
    let git_repo = GitRepository::discover(start_dir).map_err(|_| {
        AppError::Context(format!(
            "{} is not inside a git repository. Run from a clone or pass --repo OWNER/NAME",
            start_dir.display()
        ))
    })?;

    let url = remote_url(&git_repo)?.ok_or_else(|| {
        AppError::Context(
            "No git remote configured. Add an `origin` remote or pass --repo OWNER/NAME"
                .to_string(),
        )
    })?;

    let repo = parse_remote_url(&url).ok_or_else(|| {
        AppError::Context(format!(
            "Remote URL {url} does not point at a GitHub repository. Pass --repo OWNER/NAME"
        ))
    })?;

    tracing::debug!(repo = %repo, remote = %url, "Resolved repository from git remote");
    Ok(repo)
}

/// URL of `origin`, or of the first remote when there is no `origin`.
fn remote_url(git_repo: &GitRepository) -> Result<Option<String>> {
    if let Ok(origin) = git_repo.find_remote("origin") {
        if let Some(url) = origin.url() {
            return Ok(Some(url.to_string()));
        }
    }

    let names = git_repo.remotes()?;
    for name in names.iter().flatten() {
        let remote = git_repo.find_remote(name)?;
        if let Some(url) = remote.url() {
            return Ok(Some(url.to_string()));
        }
    }

    Ok(None)
}

/// Extract `owner/name` from an HTTPS, `ssh://` or scp-style git URL.
pub fn parse_remote_url(url: &str) -> Option<Repository> {
    let url = url.trim();

    let path = if let Some((_, rest)) = url.split_once("://") {
        // host[:port]/owner/name
        rest.split_once('/')?.1
    } else {
        // git@host:owner/name
        url.split_once(':')?.1
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    match path.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Some(Repository::new(*owner, *name))
        }
        _ => None,
    }
}
