//! Test doubles for the remote client.

use crate::client::future::{self, Pending, Promise};
use crate::client::{AuthResult, Executor, Project, ProjectId, ProjectStats, UserStory, WikiPage};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login { username: String, password: String },
    Projects,
    ProjectDetail(ProjectId),
    UserStories(ProjectId),
    ProjectStats(ProjectId),
    WikiPages(ProjectId),
}

/// Outstanding promises of one remote method, or a canned answer.
struct Script<T> {
    waiting: VecDeque<Promise<T>>,
    canned: Option<Option<T>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            waiting: VecDeque::new(),
            canned: None,
        }
    }

    fn call(&mut self) -> Pending<T> {
        if let Some(value) = &self.canned {
            return Pending::ready(value.clone());
        }
        let (promise, pending) = future::pair();
        self.waiting.push_back(promise);
        pending
    }
}

/// Executor whose calls stay pending until the test resolves them, unless a
/// canned answer was set with one of the `answer_*` methods.
pub struct ScriptedExecutor {
    calls: Mutex<Vec<Call>>,
    login: Mutex<Script<AuthResult>>,
    projects: Mutex<Script<Vec<Project>>>,
    project_detail: Mutex<Script<Project>>,
    user_stories: Mutex<Script<Vec<UserStory>>>,
    project_stats: Mutex<Script<ProjectStats>>,
    wiki_pages: Mutex<Script<Vec<WikiPage>>>,
}

fn resolve_next<T: Clone>(script: &Mutex<Script<T>>, value: Option<T>) {
    let promise = script.lock().unwrap().waiting.pop_front();
    promise
        .expect("no outstanding call to resolve")
        .resolve(value);
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            login: Mutex::new(Script::new()),
            projects: Mutex::new(Script::new()),
            project_detail: Mutex::new(Script::new()),
            user_stories: Mutex::new(Script::new()),
            project_stats: Mutex::new(Script::new()),
            wiki_pages: Mutex::new(Script::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn answer_login(&self, value: Option<AuthResult>) {
        self.login.lock().unwrap().canned = Some(value);
    }

    pub fn answer_project_detail(&self, value: Option<Project>) {
        self.project_detail.lock().unwrap().canned = Some(value);
    }

    pub fn resolve_login(&self, value: Option<AuthResult>) {
        resolve_next(&self.login, value);
    }

    pub fn resolve_projects(&self, value: Option<Vec<Project>>) {
        resolve_next(&self.projects, value);
    }

    pub fn resolve_project_detail(&self, value: Option<Project>) {
        resolve_next(&self.project_detail, value);
    }

    pub fn resolve_user_stories(&self, value: Option<Vec<UserStory>>) {
        resolve_next(&self.user_stories, value);
    }

    pub fn resolve_project_stats(&self, value: Option<ProjectStats>) {
        resolve_next(&self.project_stats, value);
    }

    pub fn resolve_wiki_pages(&self, value: Option<Vec<WikiPage>>) {
        resolve_next(&self.wiki_pages, value);
    }
}

impl Executor for ScriptedExecutor {
    fn login(&self, username: &str, password: &str) -> Pending<AuthResult> {
        self.record(Call::Login {
            username: username.to_string(),
            password: password.to_string(),
        });
        self.login.lock().unwrap().call()
    }

    fn projects(&self) -> Pending<Vec<Project>> {
        self.record(Call::Projects);
        self.projects.lock().unwrap().call()
    }

    fn project_detail(&self, project: &Project) -> Pending<Project> {
        self.record(Call::ProjectDetail(project.id));
        self.project_detail.lock().unwrap().call()
    }

    fn user_stories(&self, project: &Project) -> Pending<Vec<UserStory>> {
        self.record(Call::UserStories(project.id));
        self.user_stories.lock().unwrap().call()
    }

    fn project_stats(&self, project: &Project) -> Pending<ProjectStats> {
        self.record(Call::ProjectStats(project.id));
        self.project_stats.lock().unwrap().call()
    }

    fn wiki_pages(&self, project: &Project) -> Pending<Vec<WikiPage>> {
        self.record(Call::WikiPages(project.id));
        self.wiki_pages.lock().unwrap().call()
    }
}

pub fn project() -> Project {
    Project {
        id: 1,
        name: "Project 1".into(),
        slug: "project-1".into(),
        description: "First project".into(),
    }
}

pub fn projects() -> Vec<Project> {
    (1..=3)
        .map(|id| Project {
            id,
            name: format!("Project {}", id),
            slug: format!("project-{}", id),
            description: String::new(),
        })
        .collect()
}

pub fn successful_login(username: &str) -> AuthResult {
    AuthResult {
        id: 1,
        username: username.to_string(),
        full_name: "Test User".into(),
        auth_token: "token".into(),
    }
}

pub fn project_stats() -> ProjectStats {
    ProjectStats {
        project: 1,
        total_stories: 4,
        closed_stories: 1,
        total_points: 10.0,
        closed_points: 2.0,
    }
}

pub fn wiki_pages() -> Vec<WikiPage> {
    vec![WikiPage {
        project: 1,
        slug: "home".into(),
        content: "Hello".into(),
    }]
}
