//! In-process remote client backed by a static catalog.
//!
//! Answers every call on a tokio worker task after a configurable delay, which
//! gives the UI the same non-blocking behaviour a network backend would. The
//! catalog is either the built-in sample or a TOML fixture file.

use crate::client::future::{self, Pending};
use crate::client::{AuthResult, Executor, Project, ProjectId, ProjectStats, UserStory, WikiPage};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid credentials for user '{0}'")]
    BadCredentials(String),
    #[error("project {0} not found")]
    UnknownProject(ProjectId),
}

/// Account accepted by the offline backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

/// Everything the offline backend knows about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub user_stories: Vec<UserStory>,
    #[serde(default)]
    pub wiki_pages: Vec<WikiPage>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
        let catalog: Catalog = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        Ok(catalog)
    }

    pub fn sample() -> Self {
        let projects = vec![
            Project {
                id: 1,
                name: "Greenmine".into(),
                slug: "greenmine".into(),
                description: "Terminal client for agile backlogs".into(),
            },
            Project {
                id: 2,
                name: "Orbital".into(),
                slug: "orbital".into(),
                description: "Launch scheduling service".into(),
            },
            Project {
                id: 3,
                name: "Sandbox".into(),
                slug: "sandbox".into(),
                description: String::new(),
            },
        ];
        let story = |id, project, ref_no, subject: &str, status: &str, points| UserStory {
            id,
            project,
            ref_no,
            subject: subject.into(),
            status: status.into(),
            points,
        };
        let user_stories = vec![
            story(1, 1, 1, "Log in from the terminal", "Closed", Some(3.0)),
            story(2, 1, 2, "Browse the project list", "Closed", Some(2.0)),
            story(3, 1, 3, "Show the backlog of a project", "In progress", Some(5.0)),
            story(4, 1, 4, "Read wiki pages", "New", Some(3.0)),
            story(5, 1, 5, "Edit user stories inline", "New", None),
            story(6, 2, 1, "Window planner", "Ready", Some(8.0)),
            story(7, 2, 2, "Telemetry export", "New", Some(5.0)),
        ];
        let wiki_pages = vec![
            WikiPage {
                project: 1,
                slug: "home".into(),
                content: "Welcome to the Greenmine wiki.".into(),
            },
            WikiPage {
                project: 1,
                slug: "keybindings".into(),
                content: "Tab moves focus, Enter activates, Esc goes back.".into(),
            },
            WikiPage {
                project: 2,
                slug: "home".into(),
                content: "Orbital runbooks live here.".into(),
            },
        ];
        Self {
            accounts: vec![Account {
                username: "admin".into(),
                password: "123123".into(),
                full_name: "Administrator".into(),
            }],
            projects,
            user_stories,
            wiki_pages,
        }
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.accounts
            .iter()
            .enumerate()
            .find(|(_, a)| a.username == username && a.password == password)
            .map(|(idx, a)| AuthResult {
                id: idx as u64 + 1,
                username: a.username.clone(),
                full_name: a.full_name.clone(),
                auth_token: format!(
                    "offline-{}-{}",
                    idx + 1,
                    chrono::Utc::now().timestamp()
                ),
            })
            .ok_or_else(|| ClientError::BadCredentials(username.to_string()))
    }

    fn project(&self, id: ProjectId) -> Result<Project, ClientError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ClientError::UnknownProject(id))
    }

    fn stories_of(&self, id: ProjectId) -> Result<Vec<UserStory>, ClientError> {
        self.project(id)?;
        Ok(self
            .user_stories
            .iter()
            .filter(|us| us.project == id)
            .cloned()
            .collect())
    }

    fn stats_of(&self, id: ProjectId) -> Result<ProjectStats, ClientError> {
        let stories = self.stories_of(id)?;
        let mut stats = ProjectStats {
            project: id,
            total_stories: 0,
            closed_stories: 0,
            total_points: 0.0,
            closed_points: 0.0,
        };
        for us in &stories {
            let points = us.points.unwrap_or(0.0);
            stats.total_stories += 1;
            stats.total_points += points;
            if us.status.eq_ignore_ascii_case("closed") {
                stats.closed_stories += 1;
                stats.closed_points += points;
            }
        }
        Ok(stats)
    }

    fn wiki_of(&self, id: ProjectId) -> Result<Vec<WikiPage>, ClientError> {
        self.project(id)?;
        Ok(self
            .wiki_pages
            .iter()
            .filter(|w| w.project == id)
            .cloned()
            .collect())
    }
}

/// [`Executor`] answering from a [`Catalog`] on tokio worker tasks.
pub struct OfflineClient {
    catalog: Arc<Catalog>,
    latency: Duration,
    runtime: Handle,
}

impl OfflineClient {
    pub fn new(catalog: Catalog, latency: Duration, runtime: Handle) -> Self {
        Self {
            catalog: Arc::new(catalog),
            latency,
            runtime,
        }
    }

    fn answer<T, F>(&self, call: &'static str, lookup: F) -> Pending<T>
    where
        T: Send + 'static,
        F: FnOnce(&Catalog) -> Result<T, ClientError> + Send + 'static,
    {
        let (promise, pending) = future::pair();
        let catalog = self.catalog.clone();
        let latency = self.latency;
        tracing::debug!(call, "dispatching remote call");
        self.runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            match lookup(&catalog) {
                Ok(value) => promise.resolve(Some(value)),
                Err(e) => {
                    tracing::warn!(call, error = %e, "remote call failed");
                    promise.resolve(None);
                }
            }
        });
        pending
    }
}

impl Executor for OfflineClient {
    fn login(&self, username: &str, password: &str) -> Pending<AuthResult> {
        let (username, password) = (username.to_string(), password.to_string());
        self.answer("login", move |c| c.authenticate(&username, &password))
    }

    fn projects(&self) -> Pending<Vec<Project>> {
        self.answer("projects", |c| Ok(c.projects.clone()))
    }

    fn project_detail(&self, project: &Project) -> Pending<Project> {
        let id = project.id;
        self.answer("project_detail", move |c| c.project(id))
    }

    fn user_stories(&self, project: &Project) -> Pending<Vec<UserStory>> {
        let id = project.id;
        self.answer("user_stories", move |c| c.stories_of(id))
    }

    fn project_stats(&self, project: &Project) -> Pending<ProjectStats> {
        let id = project.id;
        self.answer("project_stats", move |c| c.stats_of(id))
    }

    fn wiki_pages(&self, project: &Project) -> Pending<Vec<WikiPage>> {
        let id = project.id;
        self.answer("wiki_pages", move |c| c.wiki_of(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    async fn resolved<T: Send + 'static>(pending: Pending<T>) -> Option<T> {
        let (tx, rx) = oneshot::channel();
        pending.on_done(move |v| {
            let _ = tx.send(v);
        });
        rx.await.unwrap()
    }

    fn client() -> OfflineClient {
        OfflineClient::new(Catalog::sample(), Duration::from_millis(1), Handle::current())
    }

    fn unknown_project() -> Project {
        Project {
            id: 99,
            name: "Ghost".into(),
            slug: "ghost".into(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let auth = resolved(client().login("admin", "123123")).await.unwrap();
        assert_eq!(auth.username, "admin");
        assert!(auth.auth_token.starts_with("offline-1-"));
    }

    #[tokio::test]
    async fn test_login_with_bad_password_is_absent() {
        assert!(resolved(client().login("admin", "nope")).await.is_none());
        assert!(resolved(client().login("", "")).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_project_is_absent() {
        let c = client();
        assert!(resolved(c.project_detail(&unknown_project())).await.is_none());
        assert!(resolved(c.user_stories(&unknown_project())).await.is_none());
        assert!(resolved(c.project_stats(&unknown_project())).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_are_derived_from_user_stories() {
        let c = client();
        let project = resolved(c.projects()).await.unwrap().remove(0);
        let stats = resolved(c.project_stats(&project)).await.unwrap();
        assert_eq!(stats.total_stories, 5);
        assert_eq!(stats.closed_stories, 2);
        assert_eq!(stats.total_points, 13.0);
        assert_eq!(stats.closed_points, 5.0);
    }

    #[tokio::test]
    async fn test_project_without_stories_has_empty_backlog() {
        let c = client();
        let sandbox = resolved(c.projects()).await.unwrap().remove(2);
        assert_eq!(resolved(c.user_stories(&sandbox)).await, Some(vec![]));
        assert_eq!(resolved(c.wiki_pages(&sandbox)).await, Some(vec![]));
    }

    #[test]
    fn test_catalog_fixture_parses() {
        let fixture = r#"
            [[accounts]]
            username = "ana"
            password = "secret"

            [[projects]]
            id = 7
            name = "Fixture"
            slug = "fixture"

            [[user_stories]]
            id = 1
            project = 7
            ref = 12
            subject = "Parse fixtures"
        "#;
        let catalog: Catalog = toml::from_str(fixture).unwrap();
        assert_eq!(catalog.accounts[0].username, "ana");
        assert_eq!(catalog.user_stories[0].ref_no, 12);
        assert!(catalog.wiki_pages.is_empty());
    }
}
