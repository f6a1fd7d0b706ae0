use crate::github::{RawItem, RawRepository};
use crate::options::ReportOptions;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A normalized pull request or issue. Immutable once built; `url` is the
/// browsable permalink and is only populated when the caller asked for URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub number: u64,
    pub title: String,
    pub author: Option<String>,
    pub assignee: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryReport {
    pub name: String,
    pub url: Option<String>,
    pub items: Vec<Item>,
}

/// Report for one organization. Repositories iterate in ascending name
/// order; organizations themselves are emitted in caller-supplied order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgReport {
    pub org: String,
    pub url: Option<String>,
    pub repos: BTreeMap<String, RepositoryReport>,
}

/// Merges per-repository item lists into the final keyed report structure.
///
/// Pure transform: repositories with no items are dropped, items are sorted
/// by number ascending, each item is normalized, the user filter is applied
/// (author OR assignee match), and repositories emptied by the filter are
/// dropped as well. Output order never depends on fetch completion order.
pub fn aggregate(
    repos: &[RawRepository],
    items_by_repo: &HashMap<String, Vec<RawItem>>,
    opts: &ReportOptions,
) -> BTreeMap<String, RepositoryReport> {
    let mut reports = BTreeMap::new();

    for repo in repos {
        let Some(raw_items) = items_by_repo.get(&repo.name) else {
            continue;
        };
        if raw_items.is_empty() {
            continue;
        }

        let mut sorted: Vec<&RawItem> = raw_items.iter().collect();
        sorted.sort_by_key(|item| item.number);

        let items: Vec<Item> = sorted
            .into_iter()
            .map(|raw| normalize(raw, opts))
            .filter(|item| matches_users(item, &opts.users))
            .collect();

        if items.is_empty() {
            continue;
        }

        reports.insert(
            repo.name.clone(),
            RepositoryReport {
                name: repo.name.clone(),
                url: repo.html_url.clone(),
                items,
            },
        );
    }

    reports
}

/// Combines aggregated repositories with the organization's own URL, taken
/// from the owner reference of the lexicographically first fetched
/// repository (deterministic regardless of response ordering).
pub fn assemble(
    org: &str,
    repos: &[RawRepository],
    aggregated: BTreeMap<String, RepositoryReport>,
) -> OrgReport {
    let url = repos
        .iter()
        .min_by(|a, b| a.name.cmp(&b.name))
        .and_then(|repo| repo.owner.as_ref())
        .and_then(|owner| owner.html_url.clone());

    OrgReport {
        org: org.to_string(),
        url,
        repos: aggregated,
    }
}

fn normalize(raw: &RawItem, opts: &ReportOptions) -> Item {
    Item {
        number: raw.number,
        title: raw.title.clone(),
        author: raw.user.as_ref().map(|account| account.login.clone()),
        assignee: raw.assignee.as_ref().map(|account| account.login.clone()),
        url: opts
            .include_urls
            .then(|| opts.host.browse_url(&raw.url)),
    }
}

/// An item survives when no filter is set, or when its author or assignee
/// is in the filter set (OR, not AND).
fn matches_users(item: &Item, users: &[String]) -> bool {
    if users.is_empty() {
        return true;
    }
    let hit = |login: &Option<String>| {
        login
            .as_deref()
            .is_some_and(|login| users.iter().any(|user| user == login))
    };
    hit(&item.author) || hit(&item.assignee)
}
