//! Terminal User Interface module
//!
//! The interactive front end of staffing-cli: a roster of collaborators and
//! the add/edit allocation modals, built on ratatui.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
