use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::{App, InputMode, Screen};
use crate::tui::AppEvent;

/// Apply one event to the app. Runs only on the UI task.
pub fn handle_event(app: &mut App, event: AppEvent, tx: &UnboundedSender<AppEvent>) {
    match event {
        AppEvent::Key(key) => handle_key(app, key, tx),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Translated(outcome) => app.finish_translation(outcome),
    }
}

fn handle_key(app: &mut App, key: KeyEvent, tx: &UnboundedSender<AppEvent>) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match (app.screen, app.input_mode) {
        (Screen::History, _) => handle_history(app, key),
        (Screen::Translate, InputMode::Normal) => handle_translate_normal(app, key, tx),
        (Screen::Translate, InputMode::Editing) => handle_translate_editing(app, key, tx),
    }
}

fn handle_translate_normal(app: &mut App, key: KeyEvent, tx: &UnboundedSender<AppEvent>) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('i') | KeyCode::Char('a') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Enter => {
            app.start_translation(tx);
        }
        KeyCode::Char('x') => app.clear_input(),

        // Language pickers
        KeyCode::Char('f') => app.cycle_source_language(true),
        KeyCode::Char('F') => app.cycle_source_language(false),
        KeyCode::Char('t') => app.cycle_target_language(true),
        KeyCode::Char('T') => app.cycle_target_language(false),
        KeyCode::Char('s') => app.swap_languages(),

        KeyCode::Char('h') => app.open_history(),

        _ => {}
    }
}

fn handle_translate_editing(app: &mut App, key: KeyEvent, tx: &UnboundedSender<AppEvent>) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            if app.start_translation(tx) {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Backspace => app.delete_char_before_cursor(),
        KeyCode::Delete => app.delete_char_at_cursor(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.insert_char(c);
        }
        _ => {}
    }
}

fn handle_history(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') => app.close_history(),
        KeyCode::Char('j') | KeyCode::Down => app.history_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.history_nav_up(),
        KeyCode::Char('c') => app.clear_history(),
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen != Screen::History {
        return;
    }

    let in_history = app
        .history_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_history {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.history_nav_down(),
        MouseEventKind::ScrollUp => app.history_nav_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::KeyEventState;
    use tokio::sync::mpsc;
    use traduire_core::{Language, TranslateError, TranslationResult};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_enter_with_empty_input_is_ignored() {
        let mut app = test_app();
        let (tx, mut rx) = mpsc::unbounded_channel();

        handle_event(&mut app, key(KeyCode::Enter), &tx);
        assert_eq!(app.input_mode, InputMode::Editing);

        handle_event(&mut app, key(KeyCode::Esc), &tx);
        handle_event(&mut app, key(KeyCode::Enter), &tx);

        assert!(!app.is_loading);
        assert!(rx.try_recv().is_err());
        assert!(app.history.list().unwrap().is_empty());
    }

    #[test]
    fn test_typing_and_editing() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();

        for c in "Hola".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)), &tx);
        }
        handle_event(&mut app, key(KeyCode::Backspace), &tx);
        assert_eq!(app.input, "Hol");

        handle_event(&mut app, ctrl('u'), &tx);
        assert_eq!(app.input, "");
    }

    #[test]
    fn test_normal_mode_language_keys() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();
        handle_event(&mut app, key(KeyCode::Esc), &tx);

        handle_event(&mut app, key(KeyCode::Char('t')), &tx);
        assert_eq!(app.target_language, Language::Spanish);
        handle_event(&mut app, key(KeyCode::Char('s')), &tx);
        assert_eq!(app.source_language, Language::Spanish);
        assert_eq!(app.target_language, Language::English);
        handle_event(&mut app, key(KeyCode::Char('F')), &tx);
        assert_eq!(app.source_language, Language::French);
    }

    #[test]
    fn test_history_screen_clear() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();

        handle_event(
            &mut app,
            AppEvent::Translated(Ok(TranslationResult::new("Hello", "Bonjour"))),
            &tx,
        );
        handle_event(&mut app, key(KeyCode::Esc), &tx);
        handle_event(&mut app, key(KeyCode::Char('h')), &tx);
        assert_eq!(app.screen, Screen::History);
        assert_eq!(app.history_lines, vec!["Hello -> Bonjour".to_string()]);

        handle_event(&mut app, key(KeyCode::Char('c')), &tx);
        assert!(app.history_lines.is_empty());

        handle_event(&mut app, key(KeyCode::Esc), &tx);
        assert_eq!(app.screen, Screen::Translate);
    }

    #[test]
    fn test_failed_translation_event_clears_busy_state() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.is_loading = true;

        handle_event(
            &mut app,
            AppEvent::Translated(Err(TranslateError::RequestFailed("offline".to_string()))),
            &tx,
        );

        assert!(!app.is_loading);
        assert!(app.last_result.is_none());
        assert!(app.history_lines.is_empty());
    }

    #[test]
    fn test_ctrl_c_quits_from_history() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.open_history();

        handle_event(&mut app, ctrl('c'), &tx);
        assert!(app.should_quit);
    }
}
