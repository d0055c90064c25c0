//! Repository descriptor parsing for the manifest `repository` field

use std::sync::OnceLock;

use regex::Regex;

use launchpad_core::types::RepositoryInfo;

/// `https://host/owner/repo.git`, `git+https://...`, `git://...`, `ssh://git@host/...`
const URL_PATTERN: &str = r"^(?:git\+)?(?:https?|ssh|git)://(?:[^@/]+@)?[^/:]+(?::\d+)?/(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$";

/// `git@host:owner/repo.git`
const SCP_PATTERN: &str = r"^[^@\s]+@[^:\s]+:(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?$";

/// `owner/repo`, `github:owner/repo`
const SHORTHAND_PATTERN: &str =
    r"^(?:(?:github|gitlab|bitbucket):)?(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+)$";

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [URL_PATTERN, SCP_PATTERN, SHORTHAND_PATTERN]
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

/// Parse a repository URL or shorthand into `owner/repo`
///
/// Accepts `owner/repo`, `github:owner/repo`, http(s), `git+https`, `git://`
/// and `ssh://` URLs, and scp-like `git@host:owner/repo.git`.
pub fn parse_repository(value: &str) -> Option<RepositoryInfo> {
    let value = value.trim();

    patterns()
        .iter()
        .find_map(|pattern| pattern.captures(value))
        .map(|caps| RepositoryInfo {
            owner: caps["owner"].to_string(),
            repo: caps["repo"].to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(value: &str) -> Option<String> {
        parse_repository(value).map(|info| info.to_string())
    }

    #[test]
    fn test_url_forms() {
        assert_eq!(
            parsed("https://github.com/acme/rocket.git"),
            Some("acme/rocket".to_string())
        );
        assert_eq!(
            parsed("git+https://github.com/acme/rocket.git"),
            Some("acme/rocket".to_string())
        );
        assert_eq!(
            parsed("git://github.com/acme/rocket"),
            Some("acme/rocket".to_string())
        );
        assert_eq!(
            parsed("ssh://git@github.com/acme/rocket.git"),
            Some("acme/rocket".to_string())
        );
    }

    #[test]
    fn test_scp_form() {
        assert_eq!(
            parsed("git@github.com:acme/rocket.git"),
            Some("acme/rocket".to_string())
        );
    }

    #[test]
    fn test_shorthand_forms() {
        assert_eq!(parsed("acme/rocket"), Some("acme/rocket".to_string()));
        assert_eq!(parsed("github:acme/rocket"), Some("acme/rocket".to_string()));
    }

    #[test]
    fn test_unrecognised() {
        assert_eq!(parsed("not a repository"), None);
        assert_eq!(parsed("https://example.com/only-one-segment"), None);
    }
}
