use std::fmt;

use url::Url;

/// Canonical short name of a repository, derived from whatever the operator typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(String);

impl RepoName {
    /// Rebuild a name that already came out of [`parse_repo_name`], e.g. one echoed
    /// back with a probe result. The text is kept verbatim, never re-parsed.
    pub fn from_canonical(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the canonical repository name from a locator.
///
/// Accepts full URLs (`https://host/owner/repo[.git]`), scp-style remotes
/// (`git@host:owner/repo.git`) and bare `owner/repo` or `repo` shorthands. The
/// name is the last path segment with any `.git` suffix removed.
///
/// Returns `None` for empty or unparseable input. That is not an error, only
/// "not yet actionable".
pub fn parse_repo_name(locator: &str) -> Option<RepoName> {
    let trimmed = locator.trim();
    if trimmed.is_empty() {
        return None;
    }

    let path = if trimmed.contains("://") {
        let url = Url::parse(trimmed).ok()?;
        let path = url.path().trim_matches('/').to_owned();
        // A URL only identifies a repository once both owner and repo are present.
        if path.split('/').filter(|s| !s.is_empty()).count() < 2 {
            return None;
        }
        path
    } else if let Some(path) = scp_remote_path(trimmed) {
        path.to_owned()
    } else {
        if !trimmed
            .split('/')
            .filter(|s| !s.is_empty())
            .all(is_repo_component)
        {
            return None;
        }
        trimmed.to_owned()
    };

    let last = path.split('/').filter(|s| !s.is_empty()).last()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    is_repo_component(name).then(|| RepoName(name.to_owned()))
}

fn scp_remote_path(raw: &str) -> Option<&str> {
    let (host, path) = raw.split_once(':')?;
    if host.contains('@') && !path.is_empty() {
        Some(path)
    } else {
        None
    }
}

fn is_repo_component(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
