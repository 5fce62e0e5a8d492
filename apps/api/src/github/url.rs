use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::github::client::GitHubError;

static RE_REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"github\.com[/:]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)").expect("valid regex")
});

/// An `owner/repo` pair on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn web_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Extracts `owner/repo` from anything containing `github.com/owner/repo`
/// (https, scheme-less, or `git@github.com:owner/repo.git`). A trailing `.git` is dropped.
pub fn parse_repo_url(url: &str) -> Result<RepoRef, GitHubError> {
    let invalid = || GitHubError::InvalidUrl(url.to_string());

    let captures = RE_REPO_URL.captures(url.trim()).ok_or_else(invalid)?;
    let owner = captures[1].to_string();
    let raw_repo = &captures[2];
    let repo = raw_repo.strip_suffix(".git").unwrap_or(raw_repo).to_string();

    if owner.is_empty() || repo.is_empty() || repo == "." || repo == ".." {
        return Err(invalid());
    }

    Ok(RepoRef { owner, repo })
}
