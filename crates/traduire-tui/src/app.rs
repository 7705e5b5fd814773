use std::path::PathBuf;

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;
use traduire_core::{
    Config, HistoryStore, Language, TranslateError, TranslationClient, TranslationResult,
};

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Translate,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// All UI state. Owned by the UI task; nothing else mutates it.
pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,

    // Source text input
    pub input: String,
    pub input_cursor: usize,

    // Language pair
    pub source_language: Language,
    pub target_language: Language,

    // Translation state
    pub last_result: Option<TranslationResult>,
    pub last_result_pair: Option<(Language, Language)>,
    pub pending_pair: Option<(Language, Language)>, // pair of the request in flight
    pub is_loading: bool,
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // History screen
    pub history: HistoryStore,
    pub history_lines: Vec<String>,
    pub history_state: ListState,
    pub history_area: Option<Rect>,

    pub client: TranslationClient,
    config: Config,
    config_path: Option<PathBuf>,
}

impl App {
    /// `config_path` is where the language pair is remembered; `None`
    /// keeps changes in memory only.
    pub fn new(config: Config, config_path: Option<PathBuf>, history: HistoryStore) -> Self {
        let client = config.build_client();
        let source_language = config.source_language();
        let target_language = config.target_language();

        let mut app = Self {
            should_quit: false,
            screen: Screen::Translate,
            input_mode: InputMode::Editing,

            input: String::new(),
            input_cursor: 0,

            source_language,
            target_language,

            last_result: None,
            last_result_pair: None,
            pending_pair: None,
            is_loading: false,
            animation_frame: 0,

            history,
            history_lines: Vec::new(),
            history_state: ListState::default(),
            history_area: None,

            client,
            config,
            config_path,
        };
        app.refresh_history();
        app
    }

    /// Translating needs text and no request already in flight
    pub fn can_translate(&self) -> bool {
        !self.input.is_empty() && !self.is_loading
    }

    /// Spawn the translate call. The outcome comes back through `tx` as
    /// `AppEvent::Translated` and is applied by `finish_translation`.
    pub fn start_translation(&mut self, tx: &UnboundedSender<AppEvent>) -> bool {
        if !self.can_translate() {
            return false;
        }

        self.is_loading = true;
        self.animation_frame = 0;
        self.pending_pair = Some((self.source_language, self.target_language));

        let client = self.client.clone();
        let text = self.input.clone();
        let from = self.source_language;
        let to = self.target_language;
        let tx = tx.clone();

        log::info!("translating {} chars {} -> {}", text.chars().count(), from, to);

        tokio::spawn(async move {
            let outcome = client
                .translate(&text, from, to)
                .await
                .map(|translated| TranslationResult::new(&text, &translated));
            if tx.send(AppEvent::Translated(outcome)).is_err() {
                log::debug!("UI closed before translation finished");
            }
        });

        true
    }

    pub fn finish_translation(&mut self, outcome: Result<TranslationResult, TranslateError>) {
        self.is_loading = false;
        let pair = self.pending_pair.take();

        match outcome {
            Ok(result) => {
                log::debug!("translation succeeded");
                if let Err(e) = self.history.append(&result) {
                    log::error!("failed to save history: {:#}", e);
                }
                self.last_result = Some(result);
                self.last_result_pair = pair;
                self.refresh_history();
            }
            Err(e) => {
                log::warn!("translation failed: {}", e);
            }
        }
    }

    pub fn refresh_history(&mut self) {
        self.history_lines = match self.history.list() {
            Ok(lines) => lines,
            Err(e) => {
                log::error!("failed to load history: {:#}", e);
                Vec::new()
            }
        };

        if self.history_lines.is_empty() {
            self.history_state.select(None);
        } else {
            let last = self.history_lines.len() - 1;
            let i = self.history_state.selected().unwrap_or(0).min(last);
            self.history_state.select(Some(i));
        }
    }

    pub fn clear_history(&mut self) {
        if let Err(e) = self.history.clear() {
            log::error!("failed to clear history: {:#}", e);
        }
        self.refresh_history();
    }

    pub fn open_history(&mut self) {
        self.refresh_history();
        self.screen = Screen::History;
    }

    pub fn close_history(&mut self) {
        self.screen = Screen::Translate;
    }

    pub fn history_nav_down(&mut self) {
        let len = self.history_lines.len();
        if len > 0 {
            let i = self.history_state.selected().unwrap_or(0);
            self.history_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn history_nav_up(&mut self) {
        if !self.history_lines.is_empty() {
            let i = self.history_state.selected().unwrap_or(0);
            self.history_state.select(Some(i.saturating_sub(1)));
        }
    }

    // Language pickers
    pub fn cycle_source_language(&mut self, forward: bool) {
        self.source_language = if forward {
            self.source_language.next()
        } else {
            self.source_language.prev()
        };
        self.remember_languages();
    }

    pub fn cycle_target_language(&mut self, forward: bool) {
        self.target_language = if forward {
            self.target_language.next()
        } else {
            self.target_language.prev()
        };
        self.remember_languages();
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_language, &mut self.target_language);
        self.remember_languages();
    }

    fn remember_languages(&mut self) {
        self.config
            .set_language_pair(self.source_language, self.target_language);
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                log::warn!("failed to save language pair: {:#}", e);
            }
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Text editing
    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input, self.input_cursor);
        self.input.insert(byte_pos, c);
        self.input_cursor += 1;
    }

    pub fn delete_char_before_cursor(&mut self) {
        if self.input_cursor > 0 {
            self.input_cursor -= 1;
            let byte_pos = char_to_byte_index(&self.input, self.input_cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn delete_char_at_cursor(&mut self) {
        if self.input_cursor < self.input.chars().count() {
            let byte_pos = char_to_byte_index(&self.input, self.input_cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let char_count = self.input.chars().count();
        self.input_cursor = (self.input_cursor + 1).min(char_count);
    }

    pub fn move_cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.input_cursor = self.input.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use traduire_core::MemorySettings;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn test_app() -> App {
        App::new(
            Config::default(),
            None,
            HistoryStore::new(Box::new(MemorySettings::new())),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_empty_input_does_not_dispatch() {
        let mut app = test_app();
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert!(!app.can_translate());
        assert!(!app.start_translation(&tx));
        assert!(!app.is_loading);
        assert!(rx.try_recv().is_err());
        assert!(app.history_lines.is_empty());
    }

    #[test]
    fn test_success_updates_result_and_history() {
        let mut app = test_app();
        app.is_loading = true;

        app.finish_translation(Ok(TranslationResult::new("Hello", "Bonjour")));

        assert!(!app.is_loading);
        assert_eq!(
            app.last_result.as_ref().map(|r| r.translated_text.as_str()),
            Some("Bonjour")
        );
        assert_eq!(app.history.raw().unwrap(), "Hello -> Bonjour");
        assert_eq!(app.history_lines, vec!["Hello -> Bonjour".to_string()]);
    }

    #[test]
    fn test_failure_leaves_result_and_history() {
        let mut app = test_app();
        app.finish_translation(Ok(TranslationResult::new("Hello", "Bonjour")));
        app.is_loading = true;

        app.finish_translation(Err(TranslateError::InvalidResponse(
            "missing field `translatedText`".to_string(),
        )));

        assert!(!app.is_loading);
        assert_eq!(
            app.last_result,
            Some(TranslationResult::new("Hello", "Bonjour"))
        );
        assert_eq!(app.history.raw().unwrap(), "Hello -> Bonjour");
    }

    #[test]
    fn test_result_pair_recorded_at_dispatch() {
        let mut app = test_app();
        app.pending_pair = Some((Language::English, Language::French));
        app.finish_translation(Ok(TranslationResult::new("Hello", "Bonjour")));
        assert_eq!(app.last_result_pair, Some((Language::English, Language::French)));
        assert_eq!(app.pending_pair, None);

        // A failed follow-up keeps the shown result and its pair
        app.pending_pair = Some((Language::English, Language::German));
        app.finish_translation(Err(TranslateError::RequestFailed("offline".to_string())));
        assert_eq!(app.last_result_pair, Some((Language::English, Language::French)));
        assert_eq!(app.pending_pair, None);
    }

    #[test]
    fn test_clear_history() {
        let mut app = test_app();
        app.finish_translation(Ok(TranslationResult::new("Hello", "Bonjour")));
        app.finish_translation(Ok(TranslationResult::new("World", "Monde")));
        assert_eq!(app.history_lines.len(), 2);

        app.clear_history();

        assert!(app.history_lines.is_empty());
        assert_eq!(app.history_state.selected(), None);
        assert!(app.history.list().unwrap().is_empty());
    }

    #[test]
    fn test_language_controls() {
        let mut app = test_app();
        assert_eq!(app.source_language, Language::English);
        assert_eq!(app.target_language, Language::French);

        app.swap_languages();
        assert_eq!(app.source_language, Language::French);
        assert_eq!(app.target_language, Language::English);

        app.cycle_target_language(true);
        assert_eq!(app.target_language, Language::French);
        app.cycle_source_language(false);
        assert_eq!(app.source_language, Language::English);
    }

    #[test]
    fn test_unicode_editing() {
        let mut app = test_app();
        type_text(&mut app, "héllo");
        app.move_cursor_left();
        app.delete_char_before_cursor();
        assert_eq!(app.input, "hélo");

        app.move_cursor_home();
        app.delete_char_at_cursor();
        assert_eq!(app.input, "élo");
        app.move_cursor_end();
        assert_eq!(app.input_cursor, 3);
    }

    #[tokio::test]
    async fn test_completion_flows_back_through_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Hello"))
            .and(query_param("langpair", "en|fr"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"responseData":{"translatedText":"Bonjour"}}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            endpoint: Some(format!("{}/get", server.uri())),
            ..Config::default()
        };
        let mut app = App::new(config, None, HistoryStore::new(Box::new(MemorySettings::new())));
        let (tx, mut rx) = mpsc::unbounded_channel();

        type_text(&mut app, "Hello");
        assert!(app.start_translation(&tx));
        assert!(app.is_loading);
        assert!(!app.start_translation(&tx), "second request while loading");

        // Nothing touches app state until the UI task applies the message
        assert!(app.history_lines.is_empty());

        match rx.recv().await {
            Some(AppEvent::Translated(outcome)) => app.finish_translation(outcome),
            other => panic!("unexpected event: {:?}", other),
        }

        assert!(!app.is_loading);
        assert_eq!(app.history.raw().unwrap(), "Hello -> Bonjour");
        assert_eq!(
            app.last_result.map(|r| r.translated_text),
            Some("Bonjour".to_string())
        );
    }
}
