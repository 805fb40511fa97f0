//! Remote data client contract.
//!
//! The orchestration core never talks to the network itself: it asks an
//! [`Executor`] for data and receives a [`Pending`] handle that resolves later,
//! on whatever thread the executor chooses. Domain records are passed through
//! untouched; the core only cares whether a result is present or absent.

pub mod future;
pub mod offline;
#[cfg(test)]
pub mod testing;

use serde::{Deserialize, Serialize};

pub use future::Pending;
pub use offline::OfflineClient;

pub type ProjectId = u64;

/// Successful authentication payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    pub auth_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    pub id: u64,
    pub project: ProjectId,
    #[serde(rename = "ref")]
    pub ref_no: u32,
    pub subject: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub points: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub project: ProjectId,
    #[serde(default)]
    pub total_stories: u32,
    #[serde(default)]
    pub closed_stories: u32,
    #[serde(default)]
    pub total_points: f32,
    #[serde(default)]
    pub closed_points: f32,
}

impl ProjectStats {
    /// Share of total points already closed, in `0.0..=1.0`.
    pub fn completion(&self) -> f64 {
        if self.total_points > 0.0 {
            (self.closed_points / self.total_points).clamp(0.0, 1.0) as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiPage {
    pub project: ProjectId,
    pub slug: String,
    #[serde(default)]
    pub content: String,
}

/// Dispatcher of remote calls.
///
/// Implementations must not block the caller: every method returns at once
/// with a handle that resolves to `None` when the call fails.
pub trait Executor: Send + Sync {
    fn login(&self, username: &str, password: &str) -> Pending<AuthResult>;
    fn projects(&self) -> Pending<Vec<Project>>;
    fn project_detail(&self, project: &Project) -> Pending<Project>;
    fn user_stories(&self, project: &Project) -> Pending<Vec<UserStory>>;
    fn project_stats(&self, project: &Project) -> Pending<ProjectStats>;
    fn wiki_pages(&self, project: &Project) -> Pending<Vec<WikiPage>>;
}
