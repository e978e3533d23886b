//! kite-tui: Terminal UI components
//!
//! Widgets for the kite chat screen, built on ratatui and crossterm.

pub mod app;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
