use crate::error::Result;
use crate::github::{GithubClient, RawItem, RawRepository};
use crate::options::ReportOptions;
use crate::report::{self, OrgReport};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashMap;

/// Ceiling on in-flight item requests per organization.
pub const MAX_CONCURRENT_FETCHES: usize = 8;

/// Raw material fetched for one organization, keyed by repository name so
/// concurrent fetches never contend on the same entry.
#[derive(Debug)]
pub struct OrgFetch {
    pub repos: Vec<RawRepository>,
    pub items_by_repo: HashMap<String, Vec<RawItem>>,
}

/// Lists an organization's repositories, then fans out one bounded task per
/// (repository, item type) pair. The first failed fetch aborts the whole
/// organization; in-flight siblings are dropped with it.
pub async fn fetch_org(
    client: &GithubClient,
    org: &str,
    opts: &ReportOptions,
) -> Result<OrgFetch> {
    let repos = client.list_org_repos(org, opts.repo_type).await?;

    let mut tasks = Vec::with_capacity(repos.len() * opts.item_types.len());
    for repo in &repos {
        for &item_type in &opts.item_types {
            tasks.push((repo.name.clone(), item_type));
        }
    }

    let fetched: Vec<(String, Vec<RawItem>)> = stream::iter(tasks)
        .map(|(repo_name, item_type)| async move {
            client
                .list_repo_items(org, &repo_name, item_type, opts.state)
                .await
                .map(|items| (repo_name, items))
        })
        .buffer_unordered(MAX_CONCURRENT_FETCHES)
        .try_collect()
        .await?;

    let mut items_by_repo: HashMap<String, Vec<RawItem>> = HashMap::new();
    for (repo_name, items) in fetched {
        items_by_repo.entry(repo_name).or_default().extend(items);
    }

    Ok(OrgFetch {
        repos,
        items_by_repo,
    })
}

/// Full pipeline for one organization: fetch, aggregate, assemble.
pub async fn org_report(
    client: &GithubClient,
    org: &str,
    opts: &ReportOptions,
) -> Result<OrgReport> {
    let fetch = fetch_org(client, org, opts).await?;
    let aggregated = report::aggregate(&fetch.repos, &fetch.items_by_repo, opts);
    Ok(report::assemble(org, &fetch.repos, aggregated))
}
