use crate::error::{PrReportError, Result};
use regex::Regex;
use std::sync::LazyLock;

const PUBLIC_API_BASE: &str = "https://api.github.com";
const PUBLIC_WEB_BASE: &str = "https://github.com";

/// Enterprise responses embed the API version segment in item permalinks,
/// e.g. `https://ghe.example.com/api/v3/repos/...`.
static ENTERPRISE_API_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"api/v[0-9]+/").expect("static pattern"));

/// A pull request API permalink ends in `pulls/{number}`; the browsable page
/// lives at `pull/{number}`.
static PULLS_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pulls/([0-9]+)$").expect("static pattern"));

/// Routing target for API requests and permalink rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    Github,
    Enterprise(String),
}

impl Host {
    /// Resolves an optional `--host` value. Accepts a bare hostname or one
    /// prefixed with a scheme; anything that does not reduce to a plain
    /// authority is a configuration error rather than a silent fallback to
    /// public routing.
    pub fn parse(host: Option<&str>) -> Result<Host> {
        let Some(raw) = host else {
            return Ok(Host::Github);
        };

        let trimmed = raw
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        if trimmed.is_empty() || trimmed.contains('/') {
            return Err(PrReportError::Config(format!(
                "Cannot determine API routing for host '{raw}'"
            )));
        }

        Ok(Host::Enterprise(trimmed.to_string()))
    }

    /// Base URI all API requests are routed through.
    pub fn api_base(&self) -> String {
        match self {
            Host::Github => PUBLIC_API_BASE.to_string(),
            Host::Enterprise(host) => format!("https://{host}/api/v3"),
        }
    }

    /// Rewrites a raw item API permalink into its browsable URL. Applied
    /// uniformly to pull requests and issues.
    pub fn browse_url(&self, raw: &str) -> String {
        let url = PULLS_TAIL.replace(raw, "pull/$1").into_owned();

        if let Some(m) = ENTERPRISE_API_PATH.find(&url) {
            // Strip the API version segment only when it sits directly
            // before a "repos/" segment.
            if url[m.end()..].starts_with("repos/") {
                let mut stripped = String::with_capacity(url.len());
                stripped.push_str(&url[..m.start()]);
                stripped.push_str(&url[m.end() + "repos/".len()..]);
                return stripped;
            }
        }

        url.replacen(
            &format!("{PUBLIC_API_BASE}/repos/"),
            &format!("{PUBLIC_WEB_BASE}/"),
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_host_routes_to_public_api() {
        let host = Host::parse(None).unwrap();
        assert_eq!(host, Host::Github);
        assert_eq!(host.api_base(), "https://api.github.com");
    }

    #[test]
    fn enterprise_host_gets_versioned_api_base() {
        let host = Host::parse(Some("ghe.acme.com")).unwrap();
        assert_eq!(host.api_base(), "https://ghe.acme.com/api/v3");
    }

    #[test]
    fn enterprise_host_accepts_scheme_prefix() {
        let host = Host::parse(Some("https://ghe.acme.com/")).unwrap();
        assert_eq!(host, Host::Enterprise("ghe.acme.com".into()));
    }

    #[test]
    fn unroutable_host_is_a_config_error() {
        assert!(matches!(
            Host::parse(Some("")),
            Err(PrReportError::Config(_))
        ));
        assert!(matches!(
            Host::parse(Some("ghe.acme.com/api")),
            Err(PrReportError::Config(_))
        ));
    }

    #[test]
    fn public_pull_url_rewrite() {
        let host = Host::Github;
        assert_eq!(
            host.browse_url("https://api.github.com/repos/acme/widgets/pulls/42"),
            "https://github.com/acme/widgets/pull/42"
        );
    }

    #[test]
    fn enterprise_pull_url_rewrite_strips_api_segment() {
        let host = Host::Enterprise("ghe.acme.com".into());
        assert_eq!(
            host.browse_url("https://ghe.acme.com/api/v3/repos/acme/widgets/pulls/7"),
            "https://ghe.acme.com/acme/widgets/pull/7"
        );
    }

    #[test]
    fn issue_urls_rewrite_without_pull_rename() {
        assert_eq!(
            Host::Github.browse_url("https://api.github.com/repos/acme/widgets/issues/9"),
            "https://github.com/acme/widgets/issues/9"
        );
        assert_eq!(
            Host::Enterprise("ghe.acme.com".into())
                .browse_url("https://ghe.acme.com/api/v3/repos/acme/widgets/issues/9"),
            "https://ghe.acme.com/acme/widgets/issues/9"
        );
    }

    #[test]
    fn api_segment_not_followed_by_repos_is_left_alone() {
        let host = Host::Enterprise("ghe.acme.com".into());
        let url = "https://ghe.acme.com/api/v3/orgs/acme";
        assert_eq!(host.browse_url(url), url);
    }

    #[test]
    fn pulls_in_the_middle_of_a_path_is_not_renamed() {
        // Only a trailing pulls/{n} is a pull request permalink.
        let url = "https://api.github.com/repos/acme/pulls/docs/issues/3";
        assert_eq!(
            Host::Github.browse_url(url),
            "https://github.com/acme/pulls/docs/issues/3"
        );
    }
}
