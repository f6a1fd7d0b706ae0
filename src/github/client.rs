use crate::config::Credentials;
use crate::error::{PrReportError, Result};
use crate::options::{ItemState, ItemType, RepoType};
use octocrab::Octocrab;
use serde::Deserialize;

const PER_PAGE: usize = 100;

/// GitHub API client for one run. Built once from resolved credentials and
/// the host adapter's base URI, then shared by all concurrent fetches.
pub struct GithubClient {
    octocrab: Octocrab,
    verbose: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub name: String,
    pub html_url: Option<String>,
    pub owner: Option<Account>,
}

/// One pull request or issue as returned by the listing endpoints. Both
/// endpoints share this shape; `url` is the API permalink, not the browsable
/// one.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub user: Option<Account>,
    pub assignee: Option<Account>,
    /// Set on issues-endpoint entries that are actually pull requests.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RateLimit {
    pub resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitResources {
    pub core: RateLimitResource,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitResource {
    pub limit: u64,
    pub remaining: u64,
    pub reset: i64,
}

impl GithubClient {
    pub fn new(credentials: &Credentials, api_base: &str, verbose: bool) -> Result<Self> {
        let builder = Octocrab::builder();
        let builder = match credentials {
            Credentials::Token(token) => builder.personal_token(token.clone()),
            Credentials::Basic { username, password } => {
                builder.basic_auth(username.clone(), password.clone())
            }
        };
        let octocrab = builder
            .base_uri(api_base)
            .map_err(|e| PrReportError::Config(format!("Invalid API base '{api_base}': {e}")))?
            .build()
            .map_err(|e| PrReportError::GitHub(e.to_string()))?;
        Ok(Self { octocrab, verbose })
    }

    pub async fn list_org_repos(
        &self,
        org: &str,
        repo_type: RepoType,
    ) -> Result<Vec<RawRepository>> {
        self.get_paged(
            &format!("/orgs/{org}/repos"),
            &[("type", repo_type.as_query())],
        )
        .await
    }

    /// Lists one item type for one repository. Pull requests mirrored into
    /// the issues listing carry a `pull_request` marker and are dropped so
    /// the two endpoints never double-report.
    pub async fn list_repo_items(
        &self,
        org: &str,
        repo: &str,
        item_type: ItemType,
        state: ItemState,
    ) -> Result<Vec<RawItem>> {
        let route = format!("/repos/{org}/{repo}/{}", item_type.endpoint());
        let mut items: Vec<RawItem> = self
            .get_paged(&route, &[("state", state.as_query())])
            .await?;
        if item_type == ItemType::Issue {
            items.retain(|item| item.pull_request.is_none());
        }
        Ok(items)
    }

    pub async fn get_rate_limit(&self) -> Result<RateLimit> {
        let rate_limit: RateLimit = self.octocrab.get("/rate_limit", None::<&()>).await?;
        Ok(rate_limit)
    }

    pub async fn check_rate_limit_if_verbose(&self) {
        if !self.verbose {
            return;
        }
        match self.get_rate_limit().await {
            Ok(rl) => {
                let core = &rl.resources.core;
                eprintln!(
                    "Rate limit: {}/{} remaining (resets at {})",
                    core.remaining,
                    core.limit,
                    chrono::DateTime::from_timestamp(core.reset, 0)
                        .map(|dt| dt.format("%H:%M:%S UTC").to_string())
                        .unwrap_or_else(|| core.reset.to_string())
                );
            }
            Err(e) => eprintln!("Could not check rate limit: {e}"),
        }
    }

    pub async fn warn_if_rate_limited(&self) -> Result<()> {
        let rl = self.get_rate_limit().await?;
        if rl.resources.core.remaining < 100 {
            crate::display::warn(&format!(
                "Only {} API calls remaining (resets at {})",
                rl.resources.core.remaining,
                chrono::DateTime::from_timestamp(rl.resources.core.reset, 0)
                    .map(|dt| dt.format("%H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| rl.resources.core.reset.to_string())
            ));
        }
        Ok(())
    }

    /// Follows `per_page`/`page` pagination until a short page; the total
    /// count is unbounded, the page size is just a transfer ceiling.
    async fn get_paged<T: serde::de::DeserializeOwned>(
        &self,
        route: &str,
        extra: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut all = Vec::new();
        let mut page = 1u32;
        loop {
            let mut params: Vec<(String, String)> = extra
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            params.push(("per_page".to_string(), PER_PAGE.to_string()));
            params.push(("page".to_string(), page.to_string()));

            let items: Vec<T> = self.octocrab.get(route, Some(&params)).await?;
            let fetched = items.len();
            all.extend(items);
            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(all)
    }
}
