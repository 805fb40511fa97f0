use crate::config::UiConfig;
use crate::signals::WidgetId;
use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use unicode_width::UnicodeWidthStr;

/// Single-line text editor with optional masking.
#[derive(Debug)]
pub struct Editor {
    text: String,
    cursor: usize,
    mask: Option<char>,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            mask: None,
        }
    }

    pub fn masked(mask: char) -> Self {
        Self {
            mask: Some(mask),
            ..Self::new()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// What the terminal should show: the text, or one mask glyph per char.
    pub fn display(&self) -> String {
        match self.mask {
            Some(m) => self.text.chars().map(|_| m).collect(),
            None => self.text.clone(),
        }
    }

    /// Column of the cursor in the rendered [`display`](Self::display) string.
    pub fn cursor_column(&self) -> u16 {
        let before = &self.text[..self.cursor];
        let width = match self.mask {
            Some(_) => before.chars().count(),
            None => before.width(),
        };
        width as u16
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    pub id: WidgetId,
    pub label: String,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: WidgetId::next(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub timestamp: String,
}

/// Transient info/error line shown under a view.
///
/// A new message replaces the current one; the current one expires after a
/// fixed number of ticks.
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notice>,
    ticks_left: u32,
    lifetime_ticks: u32,
    timestamp_format: String,
    infos: usize,
    errors: usize,
}

impl Notifier {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            current: None,
            ticks_left: 0,
            lifetime_ticks: ui.notice_ticks,
            timestamp_format: checked_timestamp_format(&ui.timestamp_format),
            infos: 0,
            errors: 0,
        }
    }

    pub fn info_msg(&mut self, text: impl Into<String>) {
        self.infos += 1;
        self.show(NoticeLevel::Info, text.into());
    }

    pub fn error_msg(&mut self, text: impl Into<String>) {
        self.errors += 1;
        self.show(NoticeLevel::Error, text.into());
    }

    fn show(&mut self, level: NoticeLevel, text: String) {
        self.current = Some(Notice {
            level,
            text,
            timestamp: Local::now().format(&self.timestamp_format).to_string(),
        });
        self.ticks_left = self.lifetime_ticks;
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Number of messages shown at `level` since construction.
    pub fn count(&self, level: NoticeLevel) -> usize {
        match level {
            NoticeLevel::Info => self.infos,
            NoticeLevel::Error => self.errors,
        }
    }

    /// Advance the expiry clock. Returns `true` when the notice just expired.
    pub fn tick(&mut self) -> bool {
        if self.current.is_none() || self.lifetime_ticks == 0 {
            return false;
        }
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left == 0 {
            self.current = None;
            return true;
        }
        false
    }
}

/// `format` when chrono can render it, the default format otherwise.
fn checked_timestamp_format(format: &str) -> String {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        let fallback = UiConfig::default().timestamp_format;
        tracing::warn!(format, fallback = %fallback, "invalid timestamp format");
        return fallback;
    }
    format.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui(notice_ticks: u32) -> UiConfig {
        UiConfig {
            notice_ticks,
            ..UiConfig::default()
        }
    }

    #[test]
    fn test_editor_editing() {
        let mut e = Editor::new();
        for c in "admn".chars() {
            e.insert_char(c);
        }
        e.move_left();
        e.insert_char('i');
        assert_eq!(e.text(), "admin");
        e.move_end();
        e.delete_back();
        assert_eq!(e.text(), "admi");
        e.move_home();
        e.delete_back();
        assert_eq!(e.text(), "admi");
    }

    #[test]
    fn test_editor_multibyte() {
        let mut e = Editor::new();
        e.insert_char('é');
        e.insert_char('x');
        e.move_left();
        e.move_left();
        e.move_right();
        e.delete_back();
        assert_eq!(e.text(), "x");
    }

    #[test]
    fn test_masked_editor_hides_text() {
        let mut e = Editor::masked('♥');
        e.set_text("123123");
        assert_eq!(e.display(), "♥♥♥♥♥♥");
        assert_eq!(e.cursor_column(), 6);
        assert_eq!(e.text(), "123123");
    }

    #[test]
    fn test_notifier_replaces_and_counts() {
        let mut n = Notifier::new(&ui(5));
        n.info_msg("Loading...");
        n.error_msg("Boom");
        assert_eq!(n.current().unwrap().text, "Boom");
        assert_eq!(n.current().unwrap().level, NoticeLevel::Error);
        assert_eq!(n.count(NoticeLevel::Info), 1);
        assert_eq!(n.count(NoticeLevel::Error), 1);
    }

    #[test]
    fn test_notifier_expires_after_lifetime() {
        let mut n = Notifier::new(&ui(2));
        assert!(!n.tick());
        n.info_msg("hi");
        assert!(!n.tick());
        assert!(n.tick());
        assert!(n.current().is_none());
    }

    #[test]
    fn test_zero_lifetime_never_expires() {
        let mut n = Notifier::new(&ui(0));
        n.error_msg("sticky");
        for _ in 0..10 {
            assert!(!n.tick());
        }
        assert!(n.current().is_some());
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back_to_default() {
        let ui = UiConfig {
            timestamp_format: "%Q".into(),
            ..UiConfig::default()
        };
        let mut n = Notifier::new(&ui);
        n.error_msg("Login failed");
        let notice = n.current().unwrap();
        assert_eq!(notice.text, "Login failed");
        assert_eq!(notice.timestamp.len(), "12:34:56".len());
    }

    #[test]
    fn test_custom_timestamp_format_is_kept() {
        assert_eq!(checked_timestamp_format("%Y-%m-%d %H:%M"), "%Y-%m-%d %H:%M");
        assert_eq!(checked_timestamp_format("%Q"), UiConfig::default().timestamp_format);
    }
}
