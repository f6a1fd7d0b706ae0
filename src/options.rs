use crate::error::{PrReportError, Result};
use crate::host::Host;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemState {
    Open,
    Closed,
}

impl ItemState {
    pub fn as_query(self) -> &'static str {
        match self {
            ItemState::Open => "open",
            ItemState::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemType {
    PullRequest,
    Issue,
}

impl ItemType {
    /// Path segment of the per-repository listing endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            ItemType::PullRequest => "pulls",
            ItemType::Issue => "issues",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepoType {
    All,
    Public,
    Member,
}

impl RepoType {
    pub fn as_query(self) -> &'static str {
        match self {
            RepoType::All => "all",
            RepoType::Public => "public",
            RepoType::Member => "member",
        }
    }
}

/// Fully resolved report request, validated before any network call.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub orgs: Vec<String>,
    /// Usernames to filter by; empty means no filtering.
    pub users: Vec<String>,
    pub state: ItemState,
    pub item_types: Vec<ItemType>,
    pub repo_type: RepoType,
    pub host: Host,
    pub include_urls: bool,
    pub verbose: bool,
}

impl ReportOptions {
    /// Deduplicates list fields and checks the non-empty invariants.
    pub fn normalized(mut self) -> Result<Self> {
        if self.orgs.is_empty() {
            return Err(PrReportError::Config(
                "Must specify at least one organization".into(),
            ));
        }
        if self.item_types.is_empty() {
            return Err(PrReportError::Config(
                "Must specify at least one item type".into(),
            ));
        }
        let mut seen_types = Vec::new();
        self.item_types.retain(|t| {
            if seen_types.contains(t) {
                false
            } else {
                seen_types.push(*t);
                true
            }
        });
        let mut seen_users = Vec::new();
        self.users.retain(|u| {
            if seen_users.contains(u) {
                false
            } else {
                seen_users.push(u.clone());
                true
            }
        });
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_options() -> ReportOptions {
        ReportOptions {
            orgs: vec!["acme".into()],
            users: Vec::new(),
            state: ItemState::Open,
            item_types: vec![ItemType::PullRequest],
            repo_type: RepoType::All,
            host: Host::Github,
            include_urls: false,
            verbose: false,
        }
    }

    #[test]
    fn normalized_rejects_empty_orgs() {
        let mut opts = base_options();
        opts.orgs.clear();
        assert!(opts.normalized().is_err());
    }

    #[test]
    fn normalized_rejects_empty_item_types() {
        let mut opts = base_options();
        opts.item_types.clear();
        assert!(opts.normalized().is_err());
    }

    #[test]
    fn normalized_dedups_item_types() {
        let mut opts = base_options();
        opts.item_types = vec![ItemType::PullRequest, ItemType::Issue, ItemType::PullRequest];
        let opts = opts.normalized().unwrap();
        assert_eq!(opts.item_types, vec![ItemType::PullRequest, ItemType::Issue]);
    }

    #[test]
    fn enum_query_spellings() {
        assert_eq!(ItemState::Closed.as_query(), "closed");
        assert_eq!(ItemType::PullRequest.endpoint(), "pulls");
        assert_eq!(ItemType::Issue.endpoint(), "issues");
        assert_eq!(RepoType::Member.as_query(), "member");
    }
}
