//! Per-view controllers.
//!
//! A controller binds its view's widgets through a [`SignalBus`], turns
//! activations into remote calls, and turns their completions into notices
//! or state-machine requests. Controllers never touch the state machine
//! directly: they talk to it through a [`StateMachineHandle`], which queues
//! requests on the UI event loop tagged with the controller's epoch.
//!
//! [`SignalBus`]: crate::signals::SignalBus

pub mod login;
pub mod project_detail;
pub mod projects;

use crate::app::event::AppEvent;
use crate::client::{AuthResult, Project, ProjectStats, UserStory, WikiPage};
use crate::signals::{Signal, WidgetId};
use crate::ui::widgets::Notifier;
use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

pub use login::LoginController;
pub use project_detail::ProjectDetailController;
pub use projects::ProjectsController;

/// Generation of the active controller. Bumped on every controller swap.
pub type Epoch = u64;

/// A resolved remote call, marshalled back to the UI thread.
#[derive(Debug)]
pub enum Completion {
    Login(Option<AuthResult>),
    Projects(Option<Vec<Project>>),
    ProjectFetched(Option<Project>),
    UserStories(Option<Vec<UserStory>>),
    ProjectStats(Option<ProjectStats>),
    WikiPages(Option<Vec<WikiPage>>),
}

/// A state change a controller asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    LoggedIn,
    ProjectDetail(Project),
    ProjectBacklog,
    ProjectWiki,
    Projects,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::LoggedIn => "logged_in",
            Transition::ProjectDetail(_) => "project_detail",
            Transition::ProjectBacklog => "project_backlog",
            Transition::ProjectWiki => "project_wiki",
            Transition::Projects => "projects",
        }
    }
}

/// A controller's view of the state machine.
///
/// Everything sent through the handle lands on the UI event loop, so it is
/// safe to use from completion reactions running on worker threads.
#[derive(Clone)]
pub struct StateMachineHandle {
    events: mpsc::UnboundedSender<AppEvent>,
    epoch: Epoch,
}

impl StateMachineHandle {
    pub fn new(events: mpsc::UnboundedSender<AppEvent>, epoch: Epoch) -> Self {
        Self { events, epoch }
    }

    #[cfg(test)]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn logged_in(&self) {
        self.request(Transition::LoggedIn);
    }

    pub fn project_detail(&self, project: Project) {
        self.request(Transition::ProjectDetail(project));
    }

    pub fn project_backlog(&self) {
        self.request(Transition::ProjectBacklog);
    }

    pub fn project_wiki(&self) {
        self.request(Transition::ProjectWiki);
    }

    pub fn projects(&self) {
        self.request(Transition::Projects);
    }

    fn request(&self, transition: Transition) {
        let event = AppEvent::Transition {
            epoch: self.epoch,
            transition,
        };
        if self.events.send(event).is_err() {
            tracing::debug!("event loop gone, dropping transition request");
        }
    }

    /// Completion reaction that posts the resolved value to the UI thread.
    pub fn marshal<T, F>(&self, wrap: F) -> impl FnOnce(Option<T>) + Send + 'static
    where
        T: 'static,
        F: FnOnce(Option<T>) -> Completion + Send + 'static,
    {
        let events = self.events.clone();
        let epoch = self.epoch;
        move |value| {
            let completion = wrap(value);
            if events.send(AppEvent::Completed { epoch, completion }).is_err() {
                tracing::debug!("event loop gone, dropping completion");
            }
        }
    }
}

/// The active controller. Only the state machine swaps it.
pub enum Controller {
    Login(LoginController),
    Projects(ProjectsController),
    ProjectDetail(ProjectDetailController),
}

impl Controller {
    #[cfg(test)]
    pub fn epoch(&self) -> Epoch {
        match self {
            Controller::Login(c) => c.epoch(),
            Controller::Projects(c) => c.epoch(),
            Controller::ProjectDetail(c) => c.epoch(),
        }
    }

    pub fn emit(&mut self, widget: WidgetId, signal: Signal) {
        match self {
            Controller::Login(c) => c.emit(widget, signal),
            Controller::Projects(c) => c.emit(widget, signal),
            Controller::ProjectDetail(c) => c.emit(widget, signal),
        }
    }

    /// Let the view interpret a key; a widget activation becomes a click.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let activated = match self {
            Controller::Login(c) => c.view.handle_key(key),
            Controller::Projects(c) => c.view.handle_key(key),
            Controller::ProjectDetail(c) => c.view.handle_key(key),
        };
        if let Some(widget) = activated {
            self.emit(widget, Signal::Click);
        }
    }

    pub fn on_completion(&mut self, completion: Completion) {
        match self {
            Controller::Login(c) => c.on_completion(completion),
            Controller::Projects(c) => c.on_completion(completion),
            Controller::ProjectDetail(c) => c.on_completion(completion),
        }
    }

    /// Whether printable keys belong to the view (text entry).
    pub fn captures_text(&self) -> bool {
        matches!(self, Controller::Login(_))
    }

    pub fn notifier(&self) -> &Notifier {
        match self {
            Controller::Login(c) => &c.view.notifier,
            Controller::Projects(c) => &c.view.notifier,
            Controller::ProjectDetail(c) => &c.view.notifier,
        }
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        match self {
            Controller::Login(c) => &mut c.view.notifier,
            Controller::Projects(c) => &mut c.view.notifier,
            Controller::ProjectDetail(c) => &mut c.view.notifier,
        }
    }
}
