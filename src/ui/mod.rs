//! TUI module for the vocabulary explorer.

mod app;
pub mod theme;
mod widgets;

pub use app::App;
pub use theme::Theme;
