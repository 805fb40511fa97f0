use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Rgb(0x83, 0xc5, 0x5a);
    pub const TEXT_SECONDARY: Color = Color::Gray;

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn banner() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn button() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn button_focused() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .bg(Color::Rgb(0x26, 0x2a, 0x2e))
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn tab_focused() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn info_message() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn closed_story() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
