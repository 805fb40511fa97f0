use crate::client::{Executor, Project};
use crate::controllers::{Completion, StateMachineHandle};
use crate::signals::{Signal, SignalBus, WidgetId};
use crate::ui::views::ProjectsView;
use std::sync::Arc;

enum ProjectsMsg {
    Open(Project),
}

pub struct ProjectsController {
    pub view: ProjectsView,
    executor: Arc<dyn Executor>,
    state_machine: StateMachineHandle,
    bus: SignalBus<ProjectsMsg>,
}

impl ProjectsController {
    /// Binds the projects already in `view` and requests a fresh list.
    pub fn new(
        view: ProjectsView,
        executor: Arc<dyn Executor>,
        state_machine: StateMachineHandle,
    ) -> Self {
        let mut controller = Self {
            view,
            executor,
            state_machine,
            bus: SignalBus::new(),
        };
        controller.bind_project_buttons();
        controller
            .executor
            .projects()
            .on_done(controller.state_machine.marshal(Completion::Projects));
        controller
    }

    #[cfg(test)]
    pub fn epoch(&self) -> crate::controllers::Epoch {
        self.state_machine.epoch()
    }

    fn bind_project_buttons(&mut self) {
        for (button, project) in self.view.project_buttons.iter().zip(self.view.projects()) {
            let project = project.clone();
            self.bus
                .connect(button.id, Signal::Click, move || ProjectsMsg::Open(project.clone()));
        }
    }

    fn set_projects(&mut self, projects: Vec<Project>) {
        for button in &self.view.project_buttons {
            self.bus.disconnect_all(button.id);
        }
        self.view.set_projects(projects);
        self.bind_project_buttons();
    }

    pub fn emit(&mut self, widget: WidgetId, signal: Signal) {
        for msg in self.bus.emit(widget, signal) {
            match msg {
                ProjectsMsg::Open(project) => self.open_project(project),
            }
        }
    }

    fn open_project(&mut self, project: Project) {
        self.view
            .notifier
            .info_msg(format!("Loading project '{}'...", project.name));
        tracing::debug!(project = project.id, "project detail requested");
        self.executor
            .project_detail(&project)
            .on_done(self.state_machine.marshal(Completion::ProjectFetched));
    }

    pub fn on_completion(&mut self, completion: Completion) {
        match completion {
            Completion::ProjectFetched(Some(project)) => self.state_machine.project_detail(project),
            Completion::ProjectFetched(None) => {
                self.view.notifier.error_msg("Failed to fetch the project");
            }
            Completion::Projects(Some(projects)) => self.set_projects(projects),
            Completion::Projects(None) => {
                self.view.notifier.error_msg("Failed to fetch the project list");
            }
            other => tracing::debug!(?other, "projects controller ignoring completion"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{self, Call};
    use crate::config::UiConfig;
    use crate::controllers::harness::Harness;
    use crate::controllers::Transition;
    use crate::ui::widgets::NoticeLevel;

    fn controller(h: &Harness) -> ProjectsController {
        let view = ProjectsView::new(testing::projects(), &UiConfig::default());
        ProjectsController::new(view, h.executor.clone(), h.handle.clone())
    }

    fn click_first(c: &mut ProjectsController) {
        let button = c.view.project_buttons[0].id;
        c.emit(button, Signal::Click);
    }

    #[test]
    fn test_construction_requests_the_project_list() {
        let h = Harness::new();
        let _c = controller(&h);
        assert_eq!(h.executor.calls(), vec![Call::Projects]);
    }

    #[test]
    fn test_click_on_project_requests_its_detail() {
        let h = Harness::new();
        let mut c = controller(&h);
        let second = c.view.project_buttons[1].id;
        c.emit(second, Signal::Click);
        assert_eq!(h.executor.count(|call| *call == Call::ProjectDetail(2)), 1);
    }

    #[test]
    fn test_click_shows_info_message_before_the_result() {
        let h = Harness::new();
        let mut c = controller(&h);
        click_first(&mut c);
        assert_eq!(c.view.notifier.count(NoticeLevel::Info), 1);
        assert_eq!(c.view.notifier.count(NoticeLevel::Error), 0);
    }

    #[test]
    fn test_fetched_project_transitions_to_project_detail() {
        let mut h = Harness::new();
        let mut c = controller(&h);
        let fetched = testing::projects().remove(0);
        h.executor.answer_project_detail(Some(fetched.clone()));
        click_first(&mut c);

        let transitions = h.settle(|done| c.on_completion(done));
        assert_eq!(transitions, vec![Transition::ProjectDetail(fetched)]);
        assert_eq!(c.view.notifier.count(NoticeLevel::Info), 1);
        assert_eq!(c.view.notifier.count(NoticeLevel::Error), 0);
    }

    #[test]
    fn test_transition_waits_for_the_fetch_to_resolve() {
        let mut h = Harness::new();
        let mut c = controller(&h);
        click_first(&mut c);
        assert!(h.settle(|done| c.on_completion(done)).is_empty());
        assert_eq!(c.view.notifier.count(NoticeLevel::Info), 1);

        let fetched = testing::project();
        h.executor.resolve_project_detail(Some(fetched.clone()));
        assert_eq!(
            h.settle(|done| c.on_completion(done)),
            vec![Transition::ProjectDetail(fetched)]
        );
        assert_eq!(c.view.notifier.count(NoticeLevel::Error), 0);
    }

    #[test]
    fn test_failed_fetch_shows_one_error_and_no_transition() {
        let mut h = Harness::new();
        let mut c = controller(&h);
        h.executor.answer_project_detail(None);
        click_first(&mut c);

        let transitions = h.settle(|done| c.on_completion(done));
        assert!(transitions.is_empty());
        assert_eq!(c.view.notifier.count(NoticeLevel::Info), 1);
        assert_eq!(c.view.notifier.count(NoticeLevel::Error), 1);
    }

    #[test]
    fn test_refreshed_list_rebinds_buttons() {
        let mut h = Harness::new();
        let mut c = controller(&h);
        let stale = c.view.project_buttons[0].id;
        let mut fresh = testing::projects();
        fresh.reverse();
        h.executor.resolve_projects(Some(fresh));
        h.settle(|done| c.on_completion(done));

        c.emit(stale, Signal::Click);
        assert_eq!(h.executor.count(|call| matches!(call, Call::ProjectDetail(_))), 0);

        click_first(&mut c);
        assert_eq!(h.executor.count(|call| *call == Call::ProjectDetail(3)), 1);
    }

    #[test]
    fn test_failed_list_fetch_shows_error() {
        let mut h = Harness::new();
        let mut c = controller(&h);
        h.executor.resolve_projects(None);
        h.settle(|done| c.on_completion(done));
        assert_eq!(c.view.notifier.count(NoticeLevel::Error), 1);
        assert_eq!(c.view.projects().len(), 3);
    }
}
