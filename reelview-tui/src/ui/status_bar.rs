//! Bottom status bar: key hints for the current route and the last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use reelview_core::navigation::Route;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn hints(route: &Route) -> &'static str {
    match route {
        Route::Home => " /:open j/k:select Enter:view ?:help q:quit",
        Route::Movie { .. } => " b:back c:cast r:reviews R:reload /:open ?:help q:quit",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(hints(&app.route()), theme::muted()));

    if !app.error_history.is_empty() {
        spans.push(Span::styled(
            format!(" e:errors({})", app.error_history.len()),
            theme::negative(),
        ));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{id, test_app};
    use crate::ui::tests::{render_app, screen_contains};

    #[test]
    fn hints_follow_route() {
        let (mut app, _rx, _tx) = test_app();
        let rows = render_app(&app, 120, 20);
        assert!(rows.last().unwrap().contains("Enter:view"));

        app.open_movie(id("550"));
        let rows = render_app(&app, 120, 20);
        assert!(rows.last().unwrap().contains("c:cast"));
    }

    #[test]
    fn shows_status_message_and_error_count() {
        let (mut app, _rx, _tx) = test_app();
        app.set_warning("Invalid movie id");
        let rows = render_app(&app, 120, 20);
        assert!(screen_contains(&rows, "Invalid movie id"));

        app.push_error("cast", "boom".into(), String::new());
        let rows = render_app(&app, 120, 20);
        assert!(rows.last().unwrap().contains("e:errors(1)"));
        assert!(rows.last().unwrap().contains("boom"));
    }
}
