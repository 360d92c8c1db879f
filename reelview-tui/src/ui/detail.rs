//! Movie detail page: loading, NOT FOUND, or the full layout with its outlet.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use reelview_core::navigation::SubView;
use reelview_core::view::{
    ADDITIONAL_INFORMATION, DetailLayout, DetailView, GENRES, GO_BACK, LOADING, NOT_FOUND,
    OVERVIEW,
};

use crate::app::AppState;
use crate::theme;

const POSTER_WIDTH: u16 = 28;

/// Key that follows a sub-view link.
pub fn link_key(sub: SubView) -> char {
    match sub {
        SubView::Cast => 'c',
        SubView::Reviews => 'r',
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match app.detail_view() {
        DetailView::Empty => {}
        DetailView::Loading => render_centered(f, area, LOADING, theme::warning()),
        DetailView::NotFound => render_centered(
            f,
            area,
            NOT_FOUND,
            theme::negative().add_modifier(Modifier::BOLD),
        ),
        DetailView::Loaded(layout) => {
            let score = app
                .movie
                .status()
                .success()
                .and_then(|m| m.vote_average.parse::<i64>().ok())
                .unwrap_or(0);
            let score_style = Style::default().fg(theme::palette().score_color(score));
            render_layout(f, area, &layout, score_style, app.detail_scroll);
        }
    }
}

fn render_centered(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let para = Paragraph::new(Span::styled(text.to_string(), style)).alignment(Alignment::Center);
    f.render_widget(para, rows[1]);
}

fn render_layout(
    f: &mut Frame,
    area: Rect,
    layout: &DetailLayout,
    score_style: Style,
    scroll: u16,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let back = Line::from(vec![
        Span::styled("[b] ", theme::muted()),
        Span::styled(GO_BACK, theme::accent_bold()),
        Span::styled(format!("  {}", layout.back.path), theme::muted()),
    ]);
    f.render_widget(Paragraph::new(back), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(POSTER_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    render_poster(f, cols[0], layout);

    let para = Paragraph::new(content_lines(layout, score_style))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(para, cols[1]);
}

fn render_poster(f: &mut Frame, area: Rect, layout: &DetailLayout) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Poster ")
        .title_style(theme::neutral());

    let mut lines = Vec::new();
    match &layout.poster_alt {
        Some(alt) => lines.push(Line::from(Span::styled(alt.clone(), theme::text()))),
        None => lines.push(Line::from(Span::styled("No poster", theme::muted()))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(layout.poster.src().to_string(), theme::muted())));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

/// Title column, additional information and the outlet, top to bottom.
fn content_lines(layout: &DetailLayout, score_style: Style) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(layout.heading.clone(), theme::accent_bold())),
        Line::from(Span::styled(layout.score.clone(), score_style)),
        Line::from(""),
        Line::from(Span::styled(OVERVIEW, theme::neutral().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(layout.overview.clone(), theme::text())),
        Line::from(""),
        Line::from(Span::styled(GENRES, theme::neutral().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(layout.genres.clone(), theme::text())),
        Line::from(""),
        Line::from(Span::styled(
            ADDITIONAL_INFORMATION,
            theme::neutral().add_modifier(Modifier::BOLD),
        )),
    ];

    for link in &layout.links {
        let style = if link.active {
            theme::accent_bold()
        } else {
            theme::accent()
        };
        let marker = if link.active { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("[{}] ", link_key(link.sub_view)), theme::muted()),
            Span::styled(link.label(), style),
        ]));
    }

    let outlet = layout.outlet.to_lines();
    if !outlet.is_empty() {
        lines.push(Line::from(""));
        for text in outlet {
            lines.push(Line::from(Span::styled(text, theme::text())));
        }
    }
    lines
}
