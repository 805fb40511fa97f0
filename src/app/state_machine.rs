//! Which screen is active, and the only place controllers get swapped.
//!
//! Each transition method updates the state and, where the screen changes,
//! builds the destination controller in the same step, so the state and the
//! active controller's kind never disagree. Sub-state transitions
//! (backlog/wiki) keep the controller. Requests that make no sense from the
//! current state are rejected with [`TransitionError`] and change nothing.

use crate::app::event::AppEvent;
use crate::client::{Executor, Project};
use crate::config::UiConfig;
use crate::controllers::{
    Controller, Epoch, LoginController, ProjectDetailController, ProjectsController,
    StateMachineHandle, Transition,
};
use crate::ui::views::{LoginView, ProjectDetailView, ProjectsView};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Login,
    Projects,
    ProjectDetail,
    ProjectBacklog,
    ProjectWiki,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::Login => "LOGIN",
            State::Projects => "PROJECTS",
            State::ProjectDetail => "PROJECT_DETAIL",
            State::ProjectBacklog => "PROJECT_BACKLOG",
            State::ProjectWiki => "PROJECT_WIKI",
        }
    }

    fn in_project(&self) -> bool {
        matches!(
            self,
            State::ProjectDetail | State::ProjectBacklog | State::ProjectWiki
        )
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransitionError {
    #[error("{transition} is not allowed from {from}")]
    Illegal {
        from: State,
        transition: &'static str,
    },
}

/// What every controller gets injected with.
pub struct Session {
    pub executor: Arc<dyn Executor>,
    pub events: mpsc::UnboundedSender<AppEvent>,
    pub ui: UiConfig,
}

pub struct StateMachine {
    state: State,
    controller: Controller,
    epoch: Epoch,
    session: Session,
}

impl StateMachine {
    /// Start in `Projects` when already authenticated, `Login` otherwise.
    pub fn new(session: Session, authenticated: bool) -> Self {
        let epoch = 1;
        let handle = StateMachineHandle::new(session.events.clone(), epoch);
        let (state, controller) = if authenticated {
            (State::Projects, build_projects(&session, handle))
        } else {
            (State::Login, build_login(&session, handle))
        };
        Self {
            state,
            controller,
            epoch,
            session,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn apply(&mut self, transition: Transition) -> Result<(), TransitionError> {
        match transition {
            Transition::LoggedIn => self.logged_in(),
            Transition::ProjectDetail(project) => self.project_detail(project),
            Transition::ProjectBacklog => self.project_backlog(),
            Transition::ProjectWiki => self.project_wiki(),
            Transition::Projects => self.projects(),
        }
    }

    /// `Login` → `Projects`.
    pub fn logged_in(&mut self) -> Result<(), TransitionError> {
        self.require(self.state == State::Login, "logged_in")?;
        self.swap(State::Projects, build_projects);
        Ok(())
    }

    /// Show `project` right away; its controller loads the backlog. Also
    /// allowed from inside a project, including its wiki.
    pub fn project_detail(&mut self, project: Project) -> Result<(), TransitionError> {
        self.require(
            self.state == State::Projects || self.state.in_project(),
            "project_detail",
        )?;
        self.swap(State::ProjectDetail, move |session, handle| {
            let view = ProjectDetailView::new(project, &session.ui);
            Controller::ProjectDetail(ProjectDetailController::new(
                view,
                session.executor.clone(),
                handle,
            ))
        });
        Ok(())
    }

    /// Sub-state: the backlog sub-view is showing.
    pub fn project_backlog(&mut self) -> Result<(), TransitionError> {
        self.require(
            matches!(self.state, State::ProjectDetail | State::ProjectWiki),
            "project_backlog",
        )?;
        self.state = State::ProjectBacklog;
        Ok(())
    }

    /// Sub-state: the wiki sub-view is showing.
    pub fn project_wiki(&mut self) -> Result<(), TransitionError> {
        self.require(self.state == State::ProjectBacklog, "project_wiki")?;
        self.state = State::ProjectWiki;
        Ok(())
    }

    /// Back from a project to the project list.
    pub fn projects(&mut self) -> Result<(), TransitionError> {
        self.require(self.state.in_project(), "projects")?;
        self.swap(State::Projects, build_projects);
        Ok(())
    }

    fn require(&self, allowed: bool, transition: &'static str) -> Result<(), TransitionError> {
        if allowed {
            Ok(())
        } else {
            Err(TransitionError::Illegal {
                from: self.state,
                transition,
            })
        }
    }

    fn swap<F>(&mut self, state: State, build: F)
    where
        F: FnOnce(&Session, StateMachineHandle) -> Controller,
    {
        self.epoch += 1;
        let handle = StateMachineHandle::new(self.session.events.clone(), self.epoch);
        self.controller = build(&self.session, handle);
        self.state = state;
    }
}

fn build_login(session: &Session, handle: StateMachineHandle) -> Controller {
    let view = LoginView::new(&session.ui);
    Controller::Login(LoginController::new(view, session.executor.clone(), handle))
}

fn build_projects(session: &Session, handle: StateMachineHandle) -> Controller {
    let view = ProjectsView::new(Vec::new(), &session.ui);
    Controller::Projects(ProjectsController::new(
        view,
        session.executor.clone(),
        handle,
    ))
}
