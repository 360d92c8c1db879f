//! Keyboard input dispatch: overlays → global keys → route-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use reelview_core::domain::MovieId;
use reelview_core::navigation::{Route, SubView};

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::OpenMovie => {
            handle_prompt_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('/') | KeyCode::Char('o') => {
            app.input.clear();
            app.overlay = Overlay::OpenMovie;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('H') => {
            app.go_home();
            return;
        }
        KeyCode::Char('R') => {
            app.reload();
            return;
        }
        _ => {}
    }

    // 3. Route-specific keys.
    match app.route() {
        Route::Home => handle_home_key(app, key),
        Route::Movie { .. } => handle_detail_key(app, key),
    }
}

fn handle_prompt_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.input.clear();
        }
        KeyCode::Enter => {
            match MovieId::parse(&app.input) {
                Some(id) => app.open_movie(id),
                None => app.set_warning(format!("Invalid movie id: {:?}", app.input.trim())),
            }
            app.input.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            app.input.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_home_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.recent_cursor + 1 < app.recent.len() {
                app.recent_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.recent_cursor = app.recent_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(id) = app.recent.get(app.recent_cursor).cloned() {
                app.open_movie(id);
            }
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => {
            app.go_back();
        }
        KeyCode::Char('c') => {
            app.open_sub_view(SubView::Cast);
        }
        KeyCode::Char('r') => {
            app.open_sub_view(SubView::Reviews);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.detail_scroll = 0;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{id, raw_movie, test_app};
    use crate::worker::{WorkerCommand, WorkerResponse};
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    fn load_current(app: &mut AppState, rx: &std::sync::mpsc::Receiver<WorkerCommand>) {
        let ticket = match rx.try_recv().unwrap() {
            WorkerCommand::FetchMovie { ticket } => ticket,
            other => panic!("expected FetchMovie, got {other:?}"),
        };
        app.apply(WorkerResponse::Movie { ticket, result: Ok(raw_movie("Fight Club")) });
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _rx, _tx) = test_app();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert!(app.running);
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let (mut app, _rx, _tx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);

        let (mut app, _rx, _tx) = test_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn prompt_opens_movie() {
        let (mut app, rx, _tx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.overlay, Overlay::OpenMovie);

        // 'q' is text while the prompt is open.
        type_str(&mut app, "55q");
        handle_key(&mut app, press(KeyCode::Backspace));
        type_str(&mut app, "0");
        assert_eq!(app.input, "550");
        handle_key(&mut app, press(KeyCode::Enter));

        assert!(app.running);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.nav.current().path, "/movies/550");
        assert!(matches!(rx.try_recv().unwrap(), WorkerCommand::FetchMovie { .. }));
    }

    #[test]
    fn prompt_rejects_invalid_id() {
        let (mut app, rx, _tx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('o')));
        type_str(&mut app, "../x");
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.route(), Route::Home);
        assert!(rx.try_recv().is_err());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn detail_keys_follow_links_and_go_back() {
        let (mut app, rx, _tx) = test_app();
        app.open_movie(id("550"));
        load_current(&mut app, &rx);

        handle_key(&mut app, press(KeyCode::Char('c')));
        assert_eq!(app.nav.current().path, "/movies/550/cast");
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(app.nav.current().path, "/movies/550/reviews");
        assert_eq!(app.nav.current().state.from.as_deref(), Some("/"));

        handle_key(&mut app, press(KeyCode::Char('b')));
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn back_is_unavailable_while_loading() {
        let (mut app, _rx, _tx) = test_app();
        app.open_movie(id("550"));
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.nav.current().path, "/movies/550");
    }

    #[test]
    fn home_list_opens_selected_recent() {
        let (mut app, rx, _tx) = test_app();
        app.recent = vec![id("13"), id("550")];
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.recent_cursor, 1);
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.nav.current().path, "/movies/550");
        assert!(matches!(rx.try_recv().unwrap(), WorkerCommand::FetchMovie { .. }));
        assert_eq!(app.recent, vec![id("550"), id("13")]);
    }

    #[test]
    fn overlays_toggle() {
        let (mut app, _rx, _tx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);

        handle_key(&mut app, press(KeyCode::Char('e')));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }
}
