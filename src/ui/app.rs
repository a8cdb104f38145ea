//! Main application state and logic.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::theme::{icons, Theme, ThemeName};
use super::widgets::{KeyHints, Logo, OptionButtons, ScoreScreen, WordCard};
use crate::catalog::{filter_by_language, Catalog, ALL_LANGUAGES};
use crate::config::Config;
use crate::models::WordEntry;
use crate::quiz::{QuizEngine, QuizOutcome};
use crate::speech::{pronounce, SpeechPort, Synthesizer};
use crate::store::Profile;

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Browse,
    Favorites,
    Quiz,
    QuizComplete,
}

pub struct App {
    pub screen: Screen,
    pub running: bool,

    // Config and theme
    pub config: Config,
    pub theme: Theme,

    // Data
    pub catalog: Catalog,
    pub profile: Profile,
    speech: Box<dyn SpeechPort>,

    // Browse state: 0 = "All", then one slot per catalog language
    pub language_idx: usize,
    pub word_list_state: ListState,

    // Favorites state: same slot scheme as the browse filter
    pub fav_language_idx: usize,
    pub fav_list_state: ListState,

    // Quiz state
    pub quiz: Option<QuizEngine>,
    pub option_cursor: usize,
    pub last_outcome: Option<QuizOutcome>,

    // Status message (shown temporarily)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(catalog: Catalog, profile: Profile, config: Config) -> Self {
        let theme = Theme::new(ThemeName::from_dark_mode(profile.dark_mode()));
        let speech = Box::new(Synthesizer::new(config.speech_command.clone()));

        Self {
            screen: Screen::Browse,
            running: true,
            config,
            theme,
            catalog,
            profile,
            speech,
            language_idx: 0,
            word_list_state: ListState::default().with_selected(Some(0)),
            fav_language_idx: 0,
            fav_list_state: ListState::default().with_selected(Some(0)),
            quiz: None,
            option_cursor: 0,
            last_outcome: None,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Language name for a filter slot; slot 0 is the "All" sentinel.
    fn slot_language(&self, idx: usize) -> &str {
        if idx == 0 {
            ALL_LANGUAGES
        } else {
            self.catalog
                .languages()
                .get(idx - 1)
                .map(|l| l.name.as_str())
                .unwrap_or(ALL_LANGUAGES)
        }
    }

    /// Name of the active browse filter.
    pub fn current_language(&self) -> &str {
        self.slot_language(self.language_idx)
    }

    /// Words visible under the active browse filter, in catalog order.
    pub fn visible_words(&self) -> Vec<WordEntry> {
        let all: Vec<WordEntry> = self
            .catalog
            .languages()
            .iter()
            .flat_map(|l| self.catalog.words(&l.name).iter().cloned())
            .collect();
        filter_by_language(&all, self.current_language())
    }

    /// Favorites visible under the favorites-screen filter.
    pub fn visible_favorites(&self) -> Vec<WordEntry> {
        filter_by_language(
            &self.profile.list_favorites(),
            self.slot_language(self.fav_language_idx),
        )
    }

    fn cycle_language(&mut self, forward: bool) {
        let slots = self.catalog.languages().len() + 1;
        self.language_idx = if forward {
            (self.language_idx + 1) % slots
        } else {
            (self.language_idx + slots - 1) % slots
        };
        self.word_list_state.select(Some(0));
    }

    fn cycle_favorites_language(&mut self, forward: bool) {
        let slots = self.catalog.languages().len() + 1;
        self.fav_language_idx = if forward {
            (self.fav_language_idx + 1) % slots
        } else {
            (self.fav_language_idx + slots - 1) % slots
        };
        let selected = if self.visible_favorites().is_empty() {
            None
        } else {
            Some(0)
        };
        self.fav_list_state.select(selected);
    }

    pub fn toggle_dark_mode(&mut self) {
        let enabled = !self.profile.dark_mode();
        if let Err(e) = self.profile.set_dark_mode(enabled) {
            self.set_status(format!("Could not save theme: {}", e));
        }
        self.theme = Theme::new(ThemeName::from_dark_mode(enabled));
    }

    fn flag_for(&self, language: &str) -> String {
        self.catalog
            .languages()
            .iter()
            .find(|l| l.name == language)
            .map(|l| l.flag.clone())
            .unwrap_or_default()
    }

    fn speak_entry(&mut self, entry: &WordEntry) {
        let locale = self
            .catalog
            .locale_for(&entry.language)
            .unwrap_or("en-US")
            .to_string();
        match pronounce(self.speech.as_ref(), entry, &locale) {
            Ok(Some(warning)) => self.set_status(warning),
            Ok(None) => {}
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn toggle_selected_favorite(&mut self) {
        let words = self.visible_words();
        if let Some(entry) = self.word_list_state.selected().and_then(|i| words.get(i)) {
            let entry = entry.clone();
            if let Err(e) = self.profile.toggle_favorite(&entry) {
                self.set_status(format!("Could not save favorites: {}", e));
            }
        }
    }

    fn remove_selected_favorite(&mut self) {
        let favorites = self.visible_favorites();
        if let Some(entry) = self.fav_list_state.selected().and_then(|i| favorites.get(i)) {
            let id = entry.id.clone();
            if let Err(e) = self.profile.remove_favorite(&id) {
                self.set_status(format!("Could not save favorites: {}", e));
            }
            let remaining = self.visible_favorites().len();
            if remaining == 0 {
                self.fav_list_state.select(None);
            } else if self.fav_list_state.selected().unwrap_or(0) >= remaining {
                self.fav_list_state.select(Some(remaining - 1));
            }
        }
    }

    pub fn start_quiz(&mut self) {
        let delay = Duration::from_millis(self.config.reveal_delay_ms);
        let engine = QuizEngine::new(self.catalog.question_bank(), delay, &mut rand::rng());
        self.quiz = Some(engine);
        self.option_cursor = 0;
        self.last_outcome = None;
        self.screen = Screen::Quiz;
    }

    fn restart_quiz(&mut self) {
        let bank: Vec<_> = self.catalog.question_bank().to_vec();
        if let Some(ref mut engine) = self.quiz {
            engine.reset(&bank, &mut rand::rng());
        }
        self.option_cursor = 0;
        self.last_outcome = None;
        self.screen = Screen::Quiz;
    }

    fn leave_quiz(&mut self) {
        self.quiz = None;
        self.last_outcome = None;
        self.screen = Screen::Browse;
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match self.screen {
                        Screen::Browse => self.handle_browse_keys(key.code),
                        Screen::Favorites => self.handle_favorites_keys(key.code),
                        Screen::Quiz => self.handle_quiz_keys(key.code),
                        Screen::QuizComplete => self.handle_complete_keys(key.code),
                    }
                }
            }
        }

        // Reveal windows elapse on wall time, not on key presses.
        if self.screen == Screen::Quiz {
            self.tick_quiz(Instant::now());
        }

        Ok(())
    }

    /// Advance the quiz clock; on completion, persist today's result.
    fn tick_quiz(&mut self, now: Instant) {
        let Some(ref mut engine) = self.quiz else {
            return;
        };
        if let Some(outcome) = engine.tick(now) {
            if let Err(e) = self.profile.record_quiz_result(outcome.score, outcome.total) {
                self.set_status(format!("Could not save quiz result: {}", e));
            }
            self.last_outcome = Some(outcome);
            self.screen = Screen::QuizComplete;
        }
    }

    fn handle_browse_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') => self.toggle_dark_mode(),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_language(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.cycle_language(true),
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.visible_words().len();
                if len > 0 {
                    let i = self.word_list_state.selected().unwrap_or(0);
                    let new_i = if i == 0 { len - 1 } else { i - 1 };
                    self.word_list_state.select(Some(new_i));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible_words().len();
                if len > 0 {
                    let i = self.word_list_state.selected().unwrap_or(0);
                    let new_i = if i >= len - 1 { 0 } else { i + 1 };
                    self.word_list_state.select(Some(new_i));
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected_favorite(),
            KeyCode::Char('s') => {
                let words = self.visible_words();
                if let Some(entry) = self.word_list_state.selected().and_then(|i| words.get(i)) {
                    let entry = entry.clone();
                    self.speak_entry(&entry);
                }
            }
            KeyCode::Char('f') => {
                self.fav_language_idx = 0;
                let selected = if self.profile.list_favorites().is_empty() {
                    None
                } else {
                    Some(0)
                };
                self.fav_list_state.select(selected);
                self.screen = Screen::Favorites;
            }
            KeyCode::Char('p') => self.start_quiz(),
            _ => {}
        }
    }

    fn handle_favorites_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Browse,
            KeyCode::Char('t') => self.toggle_dark_mode(),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_favorites_language(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.cycle_favorites_language(true)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.visible_favorites().len();
                if len > 0 {
                    let i = self.fav_list_state.selected().unwrap_or(0);
                    let new_i = if i == 0 { len - 1 } else { i - 1 };
                    self.fav_list_state.select(Some(new_i));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible_favorites().len();
                if len > 0 {
                    let i = self.fav_list_state.selected().unwrap_or(0);
                    let new_i = if i >= len - 1 { 0 } else { i + 1 };
                    self.fav_list_state.select(Some(new_i));
                }
            }
            KeyCode::Char('d') | KeyCode::Char(' ') => self.remove_selected_favorite(),
            KeyCode::Char('s') => {
                let favorites = self.visible_favorites();
                if let Some(entry) = self.fav_list_state.selected().and_then(|i| favorites.get(i))
                {
                    let entry = entry.clone();
                    self.speak_entry(&entry);
                }
            }
            _ => {}
        }
    }

    fn handle_quiz_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.leave_quiz(),
            KeyCode::Char('t') => self.toggle_dark_mode(),
            KeyCode::Char('r') => self.restart_quiz(),
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(count) = self.option_count() {
                    self.option_cursor = if self.option_cursor == 0 {
                        count - 1
                    } else {
                        self.option_cursor - 1
                    };
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(count) = self.option_count() {
                    self.option_cursor = (self.option_cursor + 1) % count;
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.select_option(idx);
            }
            KeyCode::Char(' ') => self.select_option(self.option_cursor),
            KeyCode::Enter => {
                if let Some(ref mut engine) = self.quiz {
                    engine.confirm(Instant::now());
                }
            }
            _ => {}
        }
    }

    fn option_count(&self) -> Option<usize> {
        self.quiz
            .as_ref()
            .and_then(|e| e.current_question())
            .map(|q| q.options.len())
            .filter(|c| *c > 0)
    }

    fn select_option(&mut self, idx: usize) {
        if let Some(ref mut engine) = self.quiz {
            if let Some(option) = engine.current_question().and_then(|q| q.options.get(idx)) {
                let option = option.clone();
                engine.select(&option);
                self.option_cursor = idx;
            }
        }
    }

    fn handle_complete_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.leave_quiz(),
            KeyCode::Char('r') => self.restart_quiz(),
            KeyCode::Char('t') => self.toggle_dark_mode(),
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg)),
            area,
        );

        match self.screen {
            Screen::Browse => self.render_browse(frame, area),
            Screen::Favorites => self.render_favorites(frame, area),
            Screen::Quiz => self.render_quiz(frame, area),
            Screen::QuizComplete => self.render_complete(frame, area),
        }
    }

    fn render_browse(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(12), // Logo
            Constraint::Length(1),  // Language tabs
            Constraint::Length(1),  // Spacing
            Constraint::Min(10),    // Word list + card
            Constraint::Length(2),  // Hints
        ])
        .split(area);

        Logo::render_to(&self.theme, chunks[0], frame.buffer_mut());

        self.render_language_chips(frame, chunks[1], self.language_idx);

        self.render_word_panel(frame, chunks[3], true);

        let hints = KeyHints::new(
            &[
                ("h/l", "language"),
                ("j/k", "nav"),
                ("Space", "favorite"),
                ("s", "speak"),
                ("f", "favorites"),
                ("p", "quiz"),
                ("t", "theme"),
                ("q", "quit"),
            ],
            &self.theme,
        );
        frame.render_widget(hints, chunks[4]);

        self.render_status(frame, chunks[4]);
    }

    fn render_favorites(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Language chips
            Constraint::Min(10),   // List + card
            Constraint::Length(2), // Hints
        ])
        .split(area);

        let total = self.profile.list_favorites().len();
        let title = Paragraph::new(format!("{} My Favorites ({})", icons::HEART, total))
            .alignment(Alignment::Center)
            .style(self.theme.title());
        frame.render_widget(title, chunks[0]);

        self.render_language_chips(frame, chunks[1], self.fav_language_idx);

        let favorites = self.visible_favorites();
        if favorites.is_empty() {
            let message = if total == 0 {
                "Browse the catalog and press Space on a word you love."
            } else {
                "No favorites in this language."
            };
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from("No favorites yet."),
                Line::from(""),
                Line::from(message),
            ])
            .alignment(Alignment::Center)
            .style(self.theme.subtitle());
            frame.render_widget(empty, chunks[2]);
        } else {
            self.render_word_panel(frame, chunks[2], false);
        }

        let hints = KeyHints::new(
            &[
                ("h/l", "language"),
                ("j/k", "nav"),
                ("d", "remove"),
                ("s", "speak"),
                ("t", "theme"),
                ("Esc", "back"),
            ],
            &self.theme,
        );
        frame.render_widget(hints, chunks[3]);

        self.render_status(frame, chunks[3]);
    }

    /// One-line filter chip bar: "All" followed by every catalog language.
    fn render_language_chips(&self, frame: &mut Frame, area: Rect, active_idx: usize) {
        let labels: Vec<String> = std::iter::once(ALL_LANGUAGES.to_string())
            .chain(
                self.catalog
                    .languages()
                    .iter()
                    .map(|l| format!("{} {}", l.flag, l.name)),
            )
            .collect();
        let mut spans = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            let style = if i == active_idx {
                self.theme.highlight()
            } else {
                self.theme.key_hint()
            };
            spans.push(Span::styled(label.clone(), style));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }

    /// Shared list-plus-card layout for Browse and Favorites.
    fn render_word_panel(&mut self, frame: &mut Frame, area: Rect, browse: bool) {
        let words = if browse {
            self.visible_words()
        } else {
            self.visible_favorites()
        };

        let main_chunks = Layout::horizontal([
            Constraint::Percentage(35), // Word list
            Constraint::Percentage(65), // Word card
        ])
        .split(area);

        let items: Vec<ListItem> = words
            .iter()
            .map(|entry| {
                let heart = if self.profile.is_favorite(&entry.id) {
                    Span::styled(format!("{} ", icons::HEART), self.theme.favorite())
                } else {
                    Span::raw("  ")
                };
                let content = Line::from(vec![
                    heart,
                    Span::styled(&entry.word, Style::default().fg(self.theme.colors.text)),
                    Span::styled(
                        format!("  {}", entry.language),
                        Style::default().fg(self.theme.colors.text_muted),
                    ),
                ]);
                ListItem::new(content)
            })
            .collect();

        let title = if browse {
            format!(" {} Words ", self.current_language())
        } else {
            " Saved Words ".to_string()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.primary))
                    .title(title)
                    .title_style(self.theme.highlight()),
            )
            .highlight_style(self.theme.selected())
            .highlight_symbol("> ");

        let state = if browse {
            &mut self.word_list_state
        } else {
            &mut self.fav_list_state
        };
        frame.render_stateful_widget(list, main_chunks[0], state);

        let selected = if browse {
            self.word_list_state.selected()
        } else {
            self.fav_list_state.selected()
        };
        if let Some(entry) = selected.and_then(|i| words.get(i)) {
            let flag = self.flag_for(&entry.language);
            frame.render_widget(
                WordCard::new(entry, self.profile.is_favorite(&entry.id), &flag, &self.theme),
                main_chunks[1],
            );
        }
    }

    fn render_quiz(&mut self, frame: &mut Frame, area: Rect) {
        let Some(ref engine) = self.quiz else {
            return;
        };

        if engine.is_empty() {
            let empty = Paragraph::new("The quiz bank is empty.")
                .alignment(Alignment::Center)
                .style(self.theme.subtitle());
            frame.render_widget(empty, centered_rect(60, 20, area));
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(3),  // Header
            Constraint::Length(1),  // Score line
            Constraint::Length(1),  // Spacing
            Constraint::Length(6),  // Question card
            Constraint::Length(1),  // Spacing
            Constraint::Min(12),    // Options
            Constraint::Length(2),  // Hints
        ])
        .split(area);

        let header = Paragraph::new(format!(
            "Word Quiz  ·  Question {} of {}",
            engine.current_index() + 1,
            engine.len()
        ))
        .alignment(Alignment::Center)
        .style(self.theme.title());
        frame.render_widget(header, chunks[0]);

        let score = Paragraph::new(format!("Score: {}", engine.score()))
            .alignment(Alignment::Center)
            .style(self.theme.subtitle());
        frame.render_widget(score, chunks[1]);

        if let Some(question) = engine.current_question() {
            let flag = self.flag_for(&question.language);
            let question_lines = vec![
                Line::from(Span::styled(
                    format!("{} What does this word mean?", flag),
                    self.theme.subtitle(),
                )),
                Line::from(""),
                Line::from(Span::styled(question.word.clone(), self.theme.word_native())),
            ];
            frame.render_widget(
                Paragraph::new(question_lines).alignment(Alignment::Center),
                chunks[3],
            );

            let options_area = centered_rect(60, 100, chunks[5]);
            frame.render_widget(
                OptionButtons::new(
                    question,
                    engine.selected(),
                    self.option_cursor,
                    engine.revealing(),
                    &self.theme,
                ),
                options_area,
            );
        }

        let hints = if engine.revealing() {
            KeyHints::new(&[("", "checking answer...")], &self.theme)
        } else {
            KeyHints::new(
                &[
                    ("1-4/j/k", "choose"),
                    ("Enter", "confirm"),
                    ("r", "restart"),
                    ("Esc", "back"),
                ],
                &self.theme,
            )
        };
        frame.render_widget(hints, chunks[6]);
    }

    fn render_complete(&mut self, frame: &mut Frame, area: Rect) {
        let card_area = centered_rect(50, 50, area);
        let outcome = self.last_outcome.unwrap_or(QuizOutcome { score: 0, total: 0 });
        frame.render_widget(
            ScoreScreen::new(outcome.score, outcome.total, &self.theme),
            card_area,
        );

        // Persisted history line for today's record.
        if let Some(result) = self.profile.quiz_results().get(&crate::store::today_stamp()) {
            let history = Paragraph::new(format!(
                "Saved: {} / {} on {}",
                result.score, result.total, result.date
            ))
            .alignment(Alignment::Center)
            .style(self.theme.subtitle());
            let history_area = Rect {
                x: area.x,
                y: card_area.y + card_area.height + 1,
                width: area.width,
                height: 1,
            };
            if history_area.y < area.y + area.height {
                frame.render_widget(history, history_area);
            }
        }
    }

    /// Status line drawn just above the key hints, fading after 5 seconds.
    fn render_status(&mut self, frame: &mut Frame, hints_area: Rect) {
        if let Some((ref msg, time)) = self.status_message {
            if time.elapsed().as_secs() < 5 {
                let status = Paragraph::new(msg.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(self.theme.colors.warning));
                let status_area = Rect {
                    x: hints_area.x,
                    y: hints_area.y.saturating_sub(1),
                    width: hints_area.width,
                    height: 1,
                };
                frame.render_widget(status, status_area);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
