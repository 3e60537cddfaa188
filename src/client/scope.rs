use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::bail;
use url::Url;

/// A commit-scoped locator into one project of a model server.
///
/// Elements, query results, and new commits are all addressed relative to
/// this triple. Identifiers are validated once, up front, so that missing
/// caller input fails before any network activity begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelScope {
    base: String,
    project: String,
    commit: String,
}

impl ModelScope {
    pub fn new(server: &Url, project: &str, commit: &str) -> Result<Self> {
        if project.trim().is_empty() {
            bail!("a project id is required");
        }

        if commit.trim().is_empty() {
            bail!("a commit id is required");
        }

        Ok(Self {
            base: server.as_str().trim_end_matches('/').to_string(),
            project: project.to_string(),
            commit: commit.to_string(),
        })
    }

    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[must_use]
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// `GET` locator for a single element in this commit.
    #[must_use]
    pub(crate) fn element_url(&self, id: &str) -> String {
        format!("{}/projects/{}/commits/{}/elements/{}", self.base, self.project, self.commit, id)
    }

    /// `POST` locator for server-side queries evaluated against this commit.
    #[must_use]
    pub(crate) fn query_url(&self) -> String {
        format!("{}/projects/{}/query-results?commitId={}", self.base, self.project, self.commit)
    }

    /// `POST` locator for creating a commit layered on this project.
    #[must_use]
    pub(crate) fn commits_url(&self) -> String {
        format!("{}/projects/{}/commits", self.base, self.project)
    }
}

impl Display for ModelScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}", self.project, self.commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> ModelScope {
        let server = Url::parse("http://localhost:9000/").unwrap();
        ModelScope::new(&server, "p1", "c1").unwrap()
    }

    #[test]
    fn builds_element_urls() {
        assert_eq!(scope().element_url("e1"), "http://localhost:9000/projects/p1/commits/c1/elements/e1");
    }

    #[test]
    fn builds_query_urls() {
        assert_eq!(scope().query_url(), "http://localhost:9000/projects/p1/query-results?commitId=c1");
    }

    #[test]
    fn builds_commits_urls() {
        assert_eq!(scope().commits_url(), "http://localhost:9000/projects/p1/commits");
    }

    #[test]
    fn rejects_missing_identifiers() {
        let server = Url::parse("http://localhost:9000").unwrap();
        assert!(ModelScope::new(&server, "", "c1").is_err());
        assert!(ModelScope::new(&server, "p1", "  ").is_err());
    }
}
