use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;

use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

use super::auth::resolve_token;

pub struct GitHubPlatform {
    client: Octocrab,
}

#[derive(Debug, Serialize)]
struct ListRunsParams {
    per_page: u8,
    page: u32,
}

impl GitHubPlatform {
    /// Build a client authenticated with the first token found (see [`resolve_token`]).
    pub async fn new(config: &GitHubConfig) -> Result<Self> {
        let token = resolve_token(config.token.as_deref()).await?;

        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(api_url) = &config.api_url {
            builder = builder
                .base_uri(api_url.as_str())
                .map_err(|e| AppError::Config(format!("Invalid GitHub API URL {api_url}: {e}")))?;
        }

        let client = builder
            .build()
            .map_err(|e| AppError::GitHubApi(format!("Failed to build octocrab client: {e}")))?;

        Ok(Self { client })
    }

    fn runs_route(repo: &Repository) -> String {
        format!("/repos/{}/{}/actions/runs", repo.owner, repo.name)
    }
}

#[async_trait]
impl Platform for GitHubPlatform {
    async fn list_runs_page(
        &self,
        repo: &Repository,
        page: u32,
        per_page: u8,
    ) -> Result<RunsPage> {
        let route = Self::runs_route(repo);
        let params = ListRunsParams { per_page, page };

        self.client
            .get(&route, Some(&params))
            .await
            .map_err(|e| AppError::GitHubApi(format!("Failed to list workflow runs: {e}")))
    }

    async fn delete_run(&self, repo: &Repository, run_id: u64) -> Result<()> {
        // The endpoint answers 204 with no body, so skip deserialization.
        let route = format!("{}/{run_id}", Self::runs_route(repo));
        let response = self.client._delete(route.as_str(), None::<&()>).await?;
        octocrab::map_github_error(response).await?;

        Ok(())
    }
}
