use crate::client::{Project, ProjectStats, UserStory, WikiPage};
use crate::config::UiConfig;
use crate::signals::WidgetId;
use crate::ui::theme::Theme;
use crate::ui::widgets::{Button, Notifier};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, TableState,
    Wrap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubView {
    Loading,
    Backlog,
    Wiki,
}

struct Backlog {
    stories: Vec<UserStory>,
    stats: ProjectStats,
}

/// Outer view of one project hosting the backlog and wiki sub-views.
pub struct ProjectDetailView {
    project: Project,
    pub backlog_tab: Button,
    pub wiki_tab: Button,
    pub projects_tab: Button,
    focused_tab: usize,
    sub_view: SubView,
    backlog: Option<Backlog>,
    wiki: Vec<WikiPage>,
    selected_row: usize,
    pub notifier: Notifier,
}

impl ProjectDetailView {
    pub fn new(project: Project, ui: &UiConfig) -> Self {
        Self {
            project,
            backlog_tab: Button::new("Backlog"),
            wiki_tab: Button::new("Wiki"),
            projects_tab: Button::new("Projects"),
            focused_tab: 0,
            sub_view: SubView::Loading,
            backlog: None,
            wiki: Vec::new(),
            selected_row: 0,
            notifier: Notifier::new(ui),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn sub_view(&self) -> SubView {
        self.sub_view
    }

    pub fn has_backlog(&self) -> bool {
        self.backlog.is_some()
    }

    pub fn show_backlog(&mut self, stories: Vec<UserStory>, stats: ProjectStats) {
        self.backlog = Some(Backlog { stories, stats });
        self.sub_view = SubView::Backlog;
        self.selected_row = 0;
    }

    /// Switch back to already loaded backlog data. Returns `false` when there
    /// is nothing to show yet.
    pub fn switch_to_backlog(&mut self) -> bool {
        if self.backlog.is_none() {
            return false;
        }
        if self.sub_view != SubView::Backlog {
            self.sub_view = SubView::Backlog;
            self.selected_row = 0;
        }
        true
    }

    pub fn show_wiki(&mut self, pages: Vec<WikiPage>) {
        self.wiki = pages;
        self.sub_view = SubView::Wiki;
        self.selected_row = 0;
    }

    fn tabs(&self) -> [&Button; 3] {
        [&self.backlog_tab, &self.wiki_tab, &self.projects_tab]
    }

    fn row_count(&self) -> usize {
        match self.sub_view {
            SubView::Loading => 0,
            SubView::Backlog => self.backlog.as_ref().map_or(0, |b| b.stories.len()),
            SubView::Wiki => self.wiki.len(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<WidgetId> {
        match key.code {
            KeyCode::Left | KeyCode::BackTab => {
                self.focused_tab = (self.focused_tab + 2) % 3;
            }
            KeyCode::Right | KeyCode::Tab => {
                self.focused_tab = (self.focused_tab + 1) % 3;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row = (self.selected_row + 1).min(self.row_count().saturating_sub(1));
            }
            KeyCode::Enter => return Some(self.tabs()[self.focused_tab].id),
            KeyCode::Esc => return Some(self.projects_tab.id),
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.project.name))
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Length(1),
                Constraint::Min(3), // Sub-view
            ])
            .split(inner);

        self.render_tabs(frame, rows[0]);
        match self.sub_view {
            SubView::Loading => frame.render_widget(
                Paragraph::new(Span::styled("Loading backlog...", Theme::muted())),
                rows[2],
            ),
            SubView::Backlog => {
                if let Some(backlog) = &self.backlog {
                    self.render_backlog(frame, rows[2], backlog);
                }
            }
            SubView::Wiki => self.render_wiki(frame, rows[2]),
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let active = match self.sub_view {
            SubView::Backlog => Some(0),
            SubView::Wiki => Some(1),
            SubView::Loading => None,
        };
        let mut spans = Vec::new();
        for (idx, tab) in self.tabs().iter().enumerate() {
            let mut style = if active == Some(idx) {
                Theme::tab_active()
            } else {
                Theme::muted()
            };
            if idx == self.focused_tab {
                style = style.patch(Theme::tab_focused());
            }
            spans.push(Span::styled(format!(" {} ", tab.label), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_backlog(&self, frame: &mut Frame, area: Rect, backlog: &Backlog) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let stats = &backlog.stats;
        let gauge = Gauge::default()
            .gauge_style(Theme::tab_active())
            .ratio(stats.completion())
            .label(format!(
                "{}/{} stories closed, {:.1}/{:.1} points",
                stats.closed_stories, stats.total_stories, stats.closed_points, stats.total_points
            ));
        frame.render_widget(gauge, chunks[0]);

        if backlog.stories.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("The backlog is empty", Theme::muted())),
                chunks[2],
            );
            return;
        }

        let rows: Vec<Row> = backlog
            .stories
            .iter()
            .map(|us| {
                let style = if us.status.eq_ignore_ascii_case("closed") {
                    Theme::closed_story()
                } else {
                    Theme::input_text()
                };
                Row::new(vec![
                    Cell::from(format!("#{}", us.ref_no)),
                    Cell::from(us.subject.clone()),
                    Cell::from(us.status.clone()),
                    Cell::from(us.points.map(|p| format!("{:.1}", p)).unwrap_or_else(|| "?".into())),
                ])
                .style(style)
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(6),
            ],
        )
        .header(Row::new(vec!["Ref", "Subject", "Status", "Points"]).style(Theme::title()))
        .row_highlight_style(Theme::selected());
        let mut state = TableState::default().with_selected(Some(self.selected_row));
        frame.render_stateful_widget(table, chunks[2], &mut state);
    }

    fn render_wiki(&self, frame: &mut Frame, area: Rect) {
        if self.wiki.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("This project has no wiki pages", Theme::muted())),
                area,
            );
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .spacing(1)
            .constraints([Constraint::Length(24), Constraint::Min(20)])
            .split(area);

        let items: Vec<ListItem> = self
            .wiki
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                let style = if idx == self.selected_row {
                    Theme::selected()
                } else {
                    Theme::input_text()
                };
                ListItem::new(Span::styled(format!(" {} ", page.slug), style))
            })
            .collect();
        frame.render_widget(
            List::new(items).block(Block::default().borders(Borders::RIGHT).border_style(Theme::border())),
            chunks[0],
        );

        if let Some(page) = self.wiki.get(self.selected_row) {
            frame.render_widget(
                Paragraph::new(page.content.as_str()).wrap(Wrap { trim: false }),
                chunks[1],
            );
        }
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

    fn view() -> ProjectDetailView {
        ProjectDetailView::new(testing::project(), &UiConfig::default())
    }

    #[test]
    fn test_starts_loading() {
        let v = view();
        assert_eq!(v.sub_view(), SubView::Loading);
        assert!(!v.has_backlog());
    }

    #[test]
    fn test_switch_to_backlog_requires_data() {
        let mut v = view();
        assert!(!v.switch_to_backlog());
        v.show_backlog(vec![], testing::project_stats());
        v.show_wiki(testing::wiki_pages());
        assert_eq!(v.sub_view(), SubView::Wiki);
        assert!(v.switch_to_backlog());
        assert_eq!(v.sub_view(), SubView::Backlog);
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut v = view();
        assert_eq!(v.handle_key(key(KeyCode::Enter)), Some(v.backlog_tab.id));
        v.handle_key(key(KeyCode::Left));
        assert_eq!(v.handle_key(key(KeyCode::Enter)), Some(v.projects_tab.id));
        v.handle_key(key(KeyCode::Right));
        v.handle_key(key(KeyCode::Right));
        assert_eq!(v.handle_key(key(KeyCode::Enter)), Some(v.wiki_tab.id));
    }

    #[test]
    fn test_escape_activates_projects_tab() {
        let mut v = view();
        assert_eq!(v.handle_key(key(KeyCode::Esc)), Some(v.projects_tab.id));
    }
}
