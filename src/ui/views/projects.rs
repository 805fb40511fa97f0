use crate::client::Project;
use crate::config::UiConfig;
use crate::signals::WidgetId;
use crate::ui::theme::Theme;
use crate::ui::widgets::{Button, Notifier};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

/// List of projects, one button per project.
pub struct ProjectsView {
    projects: Vec<Project>,
    pub project_buttons: Vec<Button>,
    selected: usize,
    loaded: bool,
    pub notifier: Notifier,
}

impl ProjectsView {
    pub fn new(projects: Vec<Project>, ui: &UiConfig) -> Self {
        let mut view = Self {
            projects: Vec::new(),
            project_buttons: Vec::new(),
            selected: 0,
            loaded: false,
            notifier: Notifier::new(ui),
        };
        if !projects.is_empty() {
            view.set_projects(projects);
        }
        view
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Replace the list. Buttons are rebuilt, so previous bindings go stale.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.project_buttons = projects.iter().map(|p| Button::new(p.name.clone())).collect();
        self.projects = projects;
        self.selected = self.selected.min(self.projects.len().saturating_sub(1));
        self.loaded = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<WidgetId> {
        let last = self.project_buttons.len().saturating_sub(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1).min(last)
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            KeyCode::Enter => return self.project_buttons.get(self.selected).map(|b| b.id),
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Projects ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused());

        if self.projects.is_empty() {
            let text = if self.loaded {
                "No projects available"
            } else {
                "Loading projects..."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text, Theme::muted())).block(block),
                area,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .projects
            .iter()
            .map(|p| {
                let mut spans = vec![Span::styled(format!(" {} ", p.name), Theme::title())];
                if !p.description.is_empty() {
                    spans.push(Span::styled(format!(" {}", p.description), Theme::muted()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Theme::selected())
            .highlight_symbol("▸");
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_one_button_per_project() {
        let view = ProjectsView::new(testing::projects(), &UiConfig::default());
        assert_eq!(view.project_buttons.len(), 3);
        assert_eq!(view.project_buttons[1].label, "Project 2");
    }

    #[test]
    fn test_selection_and_activation() {
        let mut view = ProjectsView::new(testing::projects(), &UiConfig::default());
        view.handle_key(key(KeyCode::Down));
        view.handle_key(key(KeyCode::Down));
        view.handle_key(key(KeyCode::Down));
        assert_eq!(view.handle_key(key(KeyCode::Enter)), Some(view.project_buttons[2].id));
        view.handle_key(key(KeyCode::Home));
        assert_eq!(view.handle_key(key(KeyCode::Enter)), Some(view.project_buttons[0].id));
    }

    #[test]
    fn test_enter_on_empty_list_activates_nothing() {
        let mut view = ProjectsView::new(vec![], &UiConfig::default());
        assert_eq!(view.handle_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_replacing_projects_clamps_selection() {
        let mut view = ProjectsView::new(testing::projects(), &UiConfig::default());
        view.handle_key(key(KeyCode::End));
        view.set_projects(vec![testing::project()]);
        assert_eq!(view.handle_key(key(KeyCode::Enter)), Some(view.project_buttons[0].id));
    }
}
