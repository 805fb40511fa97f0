//! Top-level views, one per controller.
//!
//! A view owns its widgets and notifier, translates keys into widget
//! activations, and paints itself. It never calls the remote client.

pub mod login;
pub mod project_detail;
pub mod projects;

pub use login::LoginView;
pub use project_detail::{ProjectDetailView, SubView};
pub use projects::ProjectsView;
