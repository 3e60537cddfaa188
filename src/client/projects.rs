use super::{ModelScope, Session};
use crate::Result;
use crate::model::Ref;
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "  projects";

/// One project of the model server.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "declaredName", default)]
    pub declared_name: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl Project {
    /// Preferred display label for listings.
    #[must_use]
    pub fn label(&self) -> &str {
        self.declared_name.as_deref().or(self.name.as_deref()).unwrap_or("")
    }
}

/// One commit of a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRecord {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommitCreate<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    change: Vec<DataVersion<'a>>,
    #[serde(rename = "previousCommit")]
    previous_commit: Ref,
}

#[derive(Debug, Serialize)]
struct DataVersion<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    payload: Payload<'a>,
    identity: Ref,
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    #[serde(rename = "@type")]
    kind: &'a str,
    value: &'a str,
    identifier: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedCommit {
    #[serde(rename = "@id")]
    id: String,
}

impl Session {
    /// List the server's projects, sorted alphabetically by declared name
    /// (case-insensitive).
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let url = format!("{}/projects", self.base());
        log::info!(target: LOG_TARGET, "fetching projects from {url}");

        let response = self
            .client()
            .get(&url)
            .query(&[("page[size]", self.page_size().to_string())])
            .send()
            .await
            .into_app_err("could not retrieve projects")?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_else(|_| String::from("<unable to read body>"));
            bail!("failed to retrieve projects from {url}: HTTP {status}, details: {details}");
        }

        let mut projects: Vec<Project> = response.json().await.into_app_err("could not parse the project list")?;
        projects.sort_by_key(|project| project.declared_name.clone().unwrap_or_default().to_lowercase());
        Ok(projects)
    }

    /// List a project's commits, oldest first, ordered by creation time with
    /// the commit id as tie-breaker.
    pub async fn commits(&self, project_id: &str) -> Result<Vec<CommitRecord>> {
        if project_id.trim().is_empty() {
            bail!("a project id is required");
        }

        let url = format!("{}/projects/{project_id}/commits", self.base());
        log::info!(target: LOG_TARGET, "fetching commits from {url}");

        let response = self.client().get(&url).send().await.into_app_err("could not retrieve commits")?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_else(|_| String::from("<unable to read body>"));
            bail!("failed to retrieve commits: HTTP {status}, details: {details}");
        }

        let mut commits: Vec<CommitRecord> = response.json().await.into_app_err("expected a list of commits in the response")?;
        commits.sort_by(|a, b| (a.created_at, a.id.as_str()).cmp(&(b.created_at, b.id.as_str())));
        Ok(commits)
    }

    /// Write a new value for one feature by creating a commit layered on the
    /// scope's commit.
    ///
    /// Exactly one write is performed; prior commits are never mutated.
    /// Returns the new commit's identity, or an empty string on any failure
    /// (logged), so callers can treat the write as best-effort.
    pub async fn write_feature_value(&self, scope: &ModelScope, element_id: &str, value: &str) -> String {
        let Some(element) = self.element(scope, element_id).await else {
            log::warn!(target: LOG_TARGET, "cannot write a value to unresolvable element {element_id}");
            return String::new();
        };

        let commit = CommitCreate {
            kind: "Commit",
            change: vec![DataVersion {
                kind: "DataVersion",
                payload: Payload {
                    kind: &element.kind,
                    value,
                    identifier: element_id,
                },
                identity: Ref::new(element_id),
            }],
            previous_commit: Ref::new(scope.commit()),
        };

        let url = scope.commits_url();
        log::info!(target: LOG_TARGET, "creating a new commit on {url}");

        let response = match self.client().post(&url).json(&commit).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "problem creating a new commit in project {}: {e}", scope.project());
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::warn!(
                target: LOG_TARGET,
                "problem creating a new commit in project {}: HTTP {status}",
                scope.project()
            );
            return String::new();
        }

        match response.json::<CreatedCommit>().await {
            Ok(created) => created.id,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "could not parse the commit response: {e}");
                String::new()
            }
        }
    }
}
