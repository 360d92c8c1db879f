//! Home page: recently opened movies.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines = vec![
        Line::from(Span::styled("Movie details", theme::accent_bold())),
        Line::from(vec![
            Span::styled("Press ", theme::muted()),
            Span::styled("/", theme::accent()),
            Span::styled(" to open a movie by id, ", theme::muted()),
            Span::styled("?", theme::accent()),
            Span::styled(" for help.", theme::muted()),
        ]),
        Line::from(Span::styled(
            format!("Source: {}", app.provider_name),
            theme::muted(),
        )),
        Line::from(""),
    ];

    if app.recent.is_empty() {
        lines.push(Line::from(Span::styled("No recent movies.", theme::muted())));
    } else {
        lines.push(Line::from(Span::styled("Recent", theme::neutral())));
        for (i, id) in app.recent.iter().enumerate() {
            let selected = i == app.recent_cursor;
            let (marker, style) = if selected {
                ("▸ ", theme::accent_bold())
            } else {
                ("  ", theme::text())
            };
            lines.push(Line::from(vec![
                Span::styled(marker, theme::accent()),
                Span::styled(format!("/movies/{id}"), style),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use crate::app::tests::{id, test_app};
    use crate::ui::tests::{render_app, screen_contains};

    #[test]
    fn empty_home() {
        let (app, _rx, _tx) = test_app();
        let rows = render_app(&app, 80, 20);
        assert!(screen_contains(&rows, "No recent movies."));
        assert!(screen_contains(&rows, "Source: test"));
        // Idle detail slot renders nothing.
        assert!(!screen_contains(&rows, "Loading..."));
    }

    #[test]
    fn recent_list_marks_cursor() {
        let (mut app, _rx, _tx) = test_app();
        app.recent = vec![id("550"), id("13")];
        app.recent_cursor = 1;
        let rows = render_app(&app, 80, 20);
        assert!(screen_contains(&rows, "  /movies/550"));
        assert!(screen_contains(&rows, "▸ /movies/13"));
    }
}
