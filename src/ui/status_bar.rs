use crate::app::core::Core;
use crate::ui::theme::Theme;
use crate::ui::widgets::NoticeLevel;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, core: &Core) {
    let mut parts: Vec<Span> = Vec::new();

    // Active state
    parts.push(Span::styled(
        format!(" [{}] ", core.state()),
        Style::default().fg(Theme::ACCENT).bg(Color::DarkGray),
    ));

    // Current notice
    match core.controller().notifier().current() {
        Some(notice) => {
            let style = match notice.level {
                NoticeLevel::Info => Theme::info_message(),
                NoticeLevel::Error => Theme::error_message(),
            };
            parts.push(Span::styled(format!(" {} ", notice.timestamp), Theme::status_bar()));
            parts.push(Span::styled(
                format!(" {} ", notice.text),
                style.bg(Color::DarkGray),
            ));
        }
        None => parts.push(Span::styled(" ", Theme::status_bar())),
    }

    // Key hints
    let hints = if core.controller().captures_text() {
        "Tab: next field  Enter: sign in  Ctrl+C: quit"
    } else {
        "Enter: open  Esc: back  q: quit"
    };
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + hints.width() + 2);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(format!(" {} ", hints), Theme::status_bar()));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
