//! staffing-cli - Terminal controller for collaborator allocation forms
//!
//! This library drives the add and edit forms of a staffing application:
//! a collaborator's primary Build/Run allocation, the secondary rows that
//! hand part of that budget to other profiles, and the pre-submit check
//! that the secondary CAF never exceeds what the primary allocation offers.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Identifiers, allocation rows and roster records
//! - `form`: Modal lifecycle, row editor, view-model and budget check
//! - `api`: Server backend, response schema and the allocation loader
//! - `storage`: JSON roster cache
//! - `logging`: File-backed tracing setup
//! - `cli`, `display`: Command handlers and their text output
//! - `tui`: The interactive interface
//!
//! # Example
//!
//! ```rust,ignore
//! use staffing::form::check_budget;
//!
//! let check = check_budget("50", "20", "100", &rows)?;
//! assert!(check.is_within_budget());
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod logging;
pub mod models;
pub mod storage;
pub mod tui;

pub use error::StaffingError;
