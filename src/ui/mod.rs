mod layout;
mod status_bar;
mod theme;
pub mod views;
pub mod widgets;

use crate::app::core::Core;
use crate::controllers::Controller;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Theme;

pub fn render(frame: &mut Frame, core: &Core) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    render_header(frame, app_layout.header, core);
    match core.controller() {
        Controller::Login(c) => c.view.render(frame, app_layout.body),
        Controller::Projects(c) => c.view.render(frame, app_layout.body),
        Controller::ProjectDetail(c) => c.view.render(frame, app_layout.body),
    }
    status_bar::render(frame, app_layout.status_bar, core);
}

fn render_header(frame: &mut Frame, area: Rect, core: &Core) {
    let mut spans = vec![Span::styled(" Greenmine ", Theme::banner())];
    if let Controller::ProjectDetail(c) = core.controller() {
        spans.push(Span::styled(format!("/ {} ", c.view.project().name), Theme::muted()));
    }
    let left = Line::from(spans);
    frame.render_widget(Paragraph::new(left), area);

    let backend = match &core.config().client.catalog {
        Some(path) => format!("catalog {} ", path.display()),
        None => "sample catalog ".to_string(),
    };
    let right = format!("{}| {} ms ", backend, core.config().client.latency_ms);
    frame.render_widget(
        Paragraph::new(Span::styled(right, Theme::muted())).alignment(Alignment::Right),
        area,
    );
}
