use crate::client::{Executor, ProjectStats, UserStory};
use crate::controllers::{Completion, StateMachineHandle};
use crate::signals::{Signal, SignalBus, WidgetId};
use crate::ui::views::{ProjectDetailView, SubView};
use std::sync::Arc;

enum DetailMsg {
    ShowBacklog,
    ShowWiki,
    BackToProjects,
}

/// Barrier over the two fetches the backlog needs. Arrival order is free.
#[derive(Debug)]
struct BacklogJoin {
    remaining: u8,
    failed: bool,
    user_stories: Option<Vec<UserStory>>,
    stats: Option<ProjectStats>,
}

impl BacklogJoin {
    fn new() -> Self {
        Self {
            remaining: 2,
            failed: false,
            user_stories: None,
            stats: None,
        }
    }

    fn arrive<T>(&mut self, value: Option<T>) -> Option<T> {
        self.remaining = self.remaining.saturating_sub(1);
        if value.is_none() {
            self.failed = true;
        }
        value
    }

    /// Record the user stories; `false` when the fetch failed.
    fn user_stories(&mut self, value: Option<Vec<UserStory>>) -> bool {
        self.user_stories = self.arrive(value);
        self.user_stories.is_some()
    }

    fn stats(&mut self, value: Option<ProjectStats>) -> bool {
        self.stats = self.arrive(value);
        self.stats.is_some()
    }

    /// Both results, once every fetch has arrived and none failed.
    fn take_ready(&mut self) -> Option<(Vec<UserStory>, ProjectStats)> {
        if self.remaining > 0 || self.failed {
            return None;
        }
        Some((self.user_stories.take()?, self.stats.take()?))
    }
}

pub struct ProjectDetailController {
    pub view: ProjectDetailView,
    executor: Arc<dyn Executor>,
    state_machine: StateMachineHandle,
    bus: SignalBus<DetailMsg>,
    backlog: BacklogJoin,
    wiki_requested: bool,
}

impl ProjectDetailController {
    /// Binds the tabs and immediately fetches user stories and stats in
    /// parallel for the view's project.
    pub fn new(
        view: ProjectDetailView,
        executor: Arc<dyn Executor>,
        state_machine: StateMachineHandle,
    ) -> Self {
        let mut bus = SignalBus::new();
        bus.connect(view.backlog_tab.id, Signal::Click, || DetailMsg::ShowBacklog);
        bus.connect(view.wiki_tab.id, Signal::Click, || DetailMsg::ShowWiki);
        bus.connect(view.projects_tab.id, Signal::Click, || DetailMsg::BackToProjects);

        let project = view.project();
        tracing::debug!(project = project.id, "fetching backlog");
        executor
            .user_stories(project)
            .on_done(state_machine.marshal(Completion::UserStories));
        executor
            .project_stats(project)
            .on_done(state_machine.marshal(Completion::ProjectStats));

        Self {
            view,
            executor,
            state_machine,
            bus,
            backlog: BacklogJoin::new(),
            wiki_requested: false,
        }
    }

    #[cfg(test)]
    pub fn epoch(&self) -> crate::controllers::Epoch {
        self.state_machine.epoch()
    }

    pub fn emit(&mut self, widget: WidgetId, signal: Signal) {
        for msg in self.bus.emit(widget, signal) {
            match msg {
                DetailMsg::ShowBacklog => self.show_backlog(),
                DetailMsg::ShowWiki => self.show_wiki(),
                DetailMsg::BackToProjects => self.state_machine.projects(),
            }
        }
    }

    fn show_backlog(&mut self) {
        self.wiki_requested = false;
        if self.view.sub_view() == SubView::Backlog {
            return;
        }
        if self.view.switch_to_backlog() {
            self.state_machine.project_backlog();
        } else {
            self.view.notifier.info_msg("The backlog is still loading");
        }
    }

    fn show_wiki(&mut self) {
        if !self.view.has_backlog() {
            self.view.notifier.info_msg("The backlog is still loading");
            return;
        }
        if self.view.sub_view() == SubView::Wiki || self.wiki_requested {
            return;
        }
        self.wiki_requested = true;
        self.view.notifier.info_msg("Loading wiki pages...");
        self.executor
            .wiki_pages(self.view.project())
            .on_done(self.state_machine.marshal(Completion::WikiPages));
    }

    pub fn on_completion(&mut self, completion: Completion) {
        match completion {
            Completion::UserStories(value) => {
                if !self.backlog.user_stories(value) {
                    self.view.notifier.error_msg("Failed to fetch user stories");
                }
                self.settle_backlog();
            }
            Completion::ProjectStats(value) => {
                if !self.backlog.stats(value) {
                    self.view.notifier.error_msg("Failed to fetch project stats");
                }
                self.settle_backlog();
            }
            Completion::WikiPages(value) => {
                if !self.wiki_requested {
                    tracing::debug!("wiki pages arrived after leaving the wiki tab");
                    return;
                }
                self.wiki_requested = false;
                match value {
                    Some(pages) => {
                        self.view.show_wiki(pages);
                        self.state_machine.project_wiki();
                    }
                    None => self.view.notifier.error_msg("Failed to fetch wiki pages"),
                }
            }
            other => tracing::debug!(?other, "project detail controller ignoring completion"),
        }
    }

    fn settle_backlog(&mut self) {
        if let Some((stories, stats)) = self.backlog.take_ready() {
            self.view.show_backlog(stories, stats);
            self.state_machine.project_backlog();
        }
    }
}
