//! Driveframe turns Google Drive share links into embeddable `<iframe>` code.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the pure pieces (identifier extraction and snippet
//!   generation), the window session and the user configuration.
//! - [`highlight`] is the fixed rule list that colours HTML, with a ratatui
//!   and an ANSI rendering of its results.
//! - [`ui`] renders the terminal window and runs the event loop that turns
//!   keys, clicks and pastes into session commands.
//! - [`utils`] holds the clipboard bridge, colour depth handling, paste
//!   sanitising and logging setup.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! either opens the window or runs one of the one-shot commands.

pub mod cli;
pub mod core;
pub mod highlight;
pub mod ui;
pub mod utils;
