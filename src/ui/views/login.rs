use crate::config::UiConfig;
use crate::signals::WidgetId;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use crate::ui::widgets::{Button, Editor, Notifier};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

const USERNAME_PROMPT: &str = "Username";
const PASSWORD_PROMPT: &str = "Password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
    Submit,
}

pub struct LoginView {
    username: Editor,
    password: Editor,
    pub login_button: Button,
    pub notifier: Notifier,
    focus: Field,
}

impl LoginView {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            username: Editor::new(),
            password: Editor::masked(ui.password_mask),
            login_button: Button::new("login"),
            notifier: Notifier::new(ui),
            focus: Field::Username,
        }
    }

    pub fn username(&self) -> &str {
        self.username.text()
    }

    pub fn password(&self) -> &str {
        self.password.text()
    }

    fn focused_editor(&mut self) -> Option<&mut Editor> {
        match self.focus {
            Field::Username => Some(&mut self.username),
            Field::Password => Some(&mut self.password),
            Field::Submit => None,
        }
    }

    /// Returns the widget activated by `key`, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<WidgetId> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Username => Field::Password,
                    Field::Password => Field::Submit,
                    Field::Submit => Field::Username,
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = match self.focus {
                    Field::Username => Field::Submit,
                    Field::Password => Field::Username,
                    Field::Submit => Field::Password,
                };
            }
            KeyCode::Enter => {
                if self.focus == Field::Username {
                    self.focus = Field::Password;
                } else {
                    return Some(self.login_button.id);
                }
            }
            KeyCode::Char(c) => {
                if let Some(editor) = self.focused_editor() {
                    editor.insert_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(editor) = self.focused_editor() {
                    editor.delete_back();
                }
            }
            KeyCode::Left => {
                if let Some(editor) = self.focused_editor() {
                    editor.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(editor) = self.focused_editor() {
                    editor.move_right();
                }
            }
            KeyCode::Home => {
                if let Some(editor) = self.focused_editor() {
                    editor.move_home();
                }
            }
            KeyCode::End => {
                if let Some(editor) = self.focused_editor() {
                    editor.move_end();
                }
            }
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let form = centered(area, 46, 11);
        let block = Block::default()
            .title(" Sign in ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused());
        let inner = block.inner(form);
        frame.render_widget(block, form);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Banner
                Constraint::Length(2),
                Constraint::Length(1), // Username
                Constraint::Length(1),
                Constraint::Length(1), // Password
                Constraint::Length(2),
                Constraint::Length(1), // Button
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled("G R E E N M I N E", Theme::banner()))
                .alignment(Alignment::Center),
            rows[0],
        );

        let padding = USERNAME_PROMPT.width().max(PASSWORD_PROMPT.width()) + 2;
        self.render_prompt(frame, rows[2], USERNAME_PROMPT, &self.username, Field::Username, padding);
        self.render_prompt(frame, rows[4], PASSWORD_PROMPT, &self.password, Field::Password, padding);

        let style = if self.focus == Field::Submit {
            Theme::button_focused()
        } else {
            Theme::button()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("  {}  ", self.login_button.label), style))
                .alignment(Alignment::Center),
            rows[6],
        );
    }

    fn render_prompt(
        &self,
        frame: &mut Frame,
        area: Rect,
        prompt: &str,
        editor: &Editor,
        field: Field,
        padding: usize,
    ) {
        let focused = self.focus == field;
        let label = format!("{:>width$} ", prompt, width = padding);
        let line = Line::from(vec![
            Span::styled(label.clone(), if focused { Theme::title() } else { Theme::muted() }),
            Span::styled(editor.display(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        if focused {
            let x = area.x + label.width() as u16 + editor.cursor_column();
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}

#[cfg(test)]
impl LoginView {
    pub fn with_credentials(ui: &UiConfig, username: &str, password: &str) -> Self {
        let mut view = Self::new(ui);
        view.username.set_text(username);
        view.password.set_text(password);
        view
    }
}
