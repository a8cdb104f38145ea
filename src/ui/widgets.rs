//! Custom widgets for the vocabulary TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Widget, Wrap},
};

use super::theme::{icons, Theme};
use crate::models::{QuizQuestion, WordEntry};

// ══════════════════════════════════════════════════════════════════════════
// Logo Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct Logo<'a> {
    theme: &'a Theme,
}

impl<'a> Logo<'a> {
    const ART: &'static str = r#"
    ╭──────────────────────────────────────────────╮
    │  _              _     _                      │
    │ | |    _____  _(_)___| |    ___  _ __ ___    │
    │ | |   / _ \ \/ / / __| |   / _ \| '__/ _ \   │
    │ | |__|  __/>  <| \__ \ |__| (_) | | |  __/   │
    │ |_____\___/_/\_\_|___/_____\___/|_|  \___|   │
    │                    ┌────────────────────┐    │
    │      ╭────╮        │ Untranslatable     │    │
    │      │ 📖 │        │ Words of the       │    │
    │      ╰────╯        │ World              │    │
    │                    └────────────────────┘    │
    ╰──────────────────────────────────────────────╯"#;

    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn render_to(theme: &Theme, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = Self::ART
            .lines()
            .skip(1)
            .map(|line| {
                Line::from(vec![Span::styled(
                    line,
                    Style::default().fg(theme.colors.primary),
                )])
            })
            .collect();

        let para = Paragraph::new(lines).alignment(Alignment::Center);

        para.render(area, buf);
    }
}

impl Widget for Logo<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_to(self.theme, area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Word Card Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct WordCard<'a> {
    entry: &'a WordEntry,
    is_favorite: bool,
    flag: &'a str,
    theme: &'a Theme,
}

impl<'a> WordCard<'a> {
    pub fn new(entry: &'a WordEntry, is_favorite: bool, flag: &'a str, theme: &'a Theme) -> Self {
        Self {
            entry,
            is_favorite,
            flag,
            theme,
        }
    }
}

impl Widget for WordCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let heart = if self.is_favorite {
            Span::styled(icons::HEART, self.theme.favorite())
        } else {
            Span::styled(icons::HEART_EMPTY, self.theme.key_hint())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.primary))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::raw(self.flag),
                Span::raw(" "),
                Span::styled(&self.entry.language, self.theme.subtitle()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Left)
            .title_top(Line::from(vec![Span::raw(" "), heart, Span::raw(" ")]).right_aligned());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(&self.entry.word, self.theme.word_native())),
            Line::from(Span::styled(
                format!("[{}]", self.entry.pronunciation),
                self.theme.key_hint(),
            )),
            Line::from(""),
            Line::from(Span::styled(&self.entry.meaning, self.theme.word_meaning())),
            Line::from(""),
        ];
        for story_line in self.entry.story.lines() {
            lines.push(Line::from(Span::styled(
                story_line,
                Style::default().fg(self.theme.colors.text),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Quiz Option Buttons Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct OptionButtons<'a> {
    question: &'a QuizQuestion,
    selected: Option<&'a str>,
    /// Highlight index from keyboard navigation.
    cursor: usize,
    revealing: bool,
    theme: &'a Theme,
}

impl<'a> OptionButtons<'a> {
    pub fn new(
        question: &'a QuizQuestion,
        selected: Option<&'a str>,
        cursor: usize,
        revealing: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            selected,
            cursor,
            revealing,
            theme,
        }
    }
}

impl Widget for OptionButtons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let constraints: Vec<Constraint> = self
            .question
            .options
            .iter()
            .map(|_| Constraint::Length(3))
            .collect();
        let chunks = Layout::vertical(constraints).split(area);

        for (i, option) in self.question.options.iter().enumerate() {
            let is_selected = self.selected == Some(option.as_str());
            let is_correct = *option == self.question.correct_answer;

            // During the reveal window the correct answer turns green and a
            // wrong selection turns red. Before that, only the cursor and
            // the selection are highlighted.
            let border_style = if self.revealing && is_correct {
                self.theme.quiz_correct()
            } else if self.revealing && is_selected {
                self.theme.quiz_wrong()
            } else if is_selected {
                self.theme.highlight()
            } else if i == self.cursor {
                Style::default().fg(self.theme.colors.accent)
            } else {
                Style::default().fg(self.theme.colors.text_dim)
            };

            let marker = if self.revealing && is_correct {
                icons::CHECK
            } else if self.revealing && is_selected {
                icons::CROSS
            } else if is_selected {
                "●"
            } else {
                "○"
            };

            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style);

            let inner = button.inner(chunks[i]);
            button.render(chunks[i], buf);

            let line = Line::from(vec![
                Span::styled(format!("{} ", marker), border_style),
                Span::styled(
                    format!("{}. ", i + 1),
                    Style::default()
                        .fg(self.theme.colors.text_muted)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(option.as_str(), Style::default().fg(self.theme.colors.text)),
            ]);
            Paragraph::new(line).render(inner, buf);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                    Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)),
                ]
            })
            .collect();

        let line = Line::from(spans);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Score Screen Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct ScoreScreen<'a> {
    score: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> ScoreScreen<'a> {
    pub fn new(score: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            score,
            total,
            theme,
        }
    }
}

impl Widget for ScoreScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.success))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("QUIZ COMPLETE", self.theme.quiz_correct()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let verdict = if self.total > 0 && self.score == self.total {
            format!("Perfect score! {}", icons::SPARKLE)
        } else if self.score * 2 >= self.total {
            "Well done!".to_string()
        } else {
            "Keep exploring!".to_string()
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                verdict,
                Style::default()
                    .fg(self.theme.colors.success)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(self.theme.colors.text_muted)),
                Span::styled(
                    format!("{} / {}", self.score, self.total),
                    Style::default()
                        .fg(self.theme.colors.primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(self.theme.colors.text_dim)),
                Span::styled("r", self.theme.key_highlight()),
                Span::styled(
                    " to retry or ",
                    Style::default().fg(self.theme.colors.text_dim),
                ),
                Span::styled("Esc", self.theme.key_highlight()),
                Span::styled(" to return", Style::default().fg(self.theme.colors.text_dim)),
            ]),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
