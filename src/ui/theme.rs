//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Background Colors
    pub bg: Color,
    pub bg_card: Color,
    pub bg_highlight: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,
}

/// Available theme names. `Dark` maps to the persisted dark-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            ThemeName::Dark
        } else {
            ThemeName::Light
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Light => Self::light_colors(),
            ThemeName::Dark => Self::dark_colors(),
        };
        Self { name, colors }
    }

    fn light_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors
            primary: Color::Rgb(79, 70, 229),      // Indigo 600
            secondary: Color::Rgb(124, 58, 237),   // Violet 600
            accent: Color::Rgb(219, 39, 119),      // Pink 600

            // Semantic Colors
            success: Color::Rgb(22, 163, 74),      // Green 600
            warning: Color::Rgb(202, 138, 4),      // Yellow 600
            error: Color::Rgb(220, 38, 38),        // Red 600

            // Background Colors
            bg: Color::Rgb(248, 250, 252),         // Slate 50
            bg_card: Color::Rgb(255, 255, 255),    // White
            bg_highlight: Color::Rgb(226, 232, 240), // Slate 200

            // Text Colors
            text: Color::Rgb(15, 23, 42),          // Slate 900
            text_muted: Color::Rgb(71, 85, 105),   // Slate 600
            text_dim: Color::Rgb(148, 163, 184),   // Slate 400
        }
    }

    fn dark_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors
            primary: Color::Rgb(129, 140, 248),    // Indigo 400
            secondary: Color::Rgb(167, 139, 250),  // Violet 400
            accent: Color::Rgb(244, 114, 182),     // Pink 400

            // Semantic Colors
            success: Color::Rgb(74, 222, 128),     // Green 400
            warning: Color::Rgb(250, 204, 21),     // Yellow 400
            error: Color::Rgb(248, 113, 113),      // Red 400

            // Background Colors
            bg: Color::Rgb(15, 23, 42),            // Slate 900
            bg_card: Color::Rgb(30, 41, 59),       // Slate 800
            bg_highlight: Color::Rgb(71, 85, 105), // Slate 600

            // Text Colors
            text: Color::Rgb(248, 250, 252),       // Slate 50
            text_muted: Color::Rgb(148, 163, 184), // Slate 400
            text_dim: Color::Rgb(100, 116, 139),   // Slate 500
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::default().fg(self.colors.text_muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.colors.bg_highlight)
            .fg(self.colors.text)
    }

    pub fn word_native(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn word_meaning(&self) -> Style {
        Style::default()
            .fg(self.colors.secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn favorite(&self) -> Style {
        Style::default()
            .fg(self.colors.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn quiz_correct(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn quiz_wrong(&self) -> Style {
        Style::default()
            .fg(self.colors.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Light)
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Icons
// ══════════════════════════════════════════════════════════════════════════

pub mod icons {
    pub const HEART: &str = "♥";
    pub const HEART_EMPTY: &str = "♡";
    pub const SPEAKER: &str = "🔊";
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const SPARKLE: &str = "✨";
    pub const BOOK: &str = "📖";
}
