//! Window session state and the two command handlers behind its buttons.

use tracing::{info, warn};

use crate::core::extract::extract;
use crate::core::snippet::{generate_with, SnippetOptions};
use crate::utils::clipboard::Clipboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// What a command handler did to the session buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The output buffer was replaced with a new snippet.
    Generated,
    /// The output buffer was written to the clipboard.
    Copied,
    /// Nothing but the status (and possibly the input buffer) changed.
    Failed,
}

/// Input and output buffers of the window plus the last status message.
///
/// The output buffer is overwritten wholesale on every successful
/// generate; between generates it carries whatever the user typed into it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    input: String,
    output: String,
    status: Option<Status>,
    options: SnippetOptions,
}

impl Session {
    pub fn new(options: SnippetOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn set_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
    }

    /// "Paste and Generate": read the clipboard into the input buffer, then
    /// generate from it.
    pub fn paste_and_generate(&mut self, clipboard: &mut dyn Clipboard) -> ActionOutcome {
        match clipboard.read_text() {
            Ok(text) => {
                self.input = text;
                self.generate_from_input()
            }
            Err(err) => {
                warn!(%err, "clipboard read failed");
                self.status = Some(Status::error(err.to_string()));
                ActionOutcome::Failed
            }
        }
    }

    /// Generate from whatever is currently in the input buffer.
    ///
    /// A missing identifier leaves the output buffer untouched.
    pub fn generate_from_input(&mut self) -> ActionOutcome {
        match extract(&self.input) {
            Ok(id) => {
                info!(id = %id, "generated embed snippet");
                self.output = generate_with(&id, &self.options).into_string();
                self.status = Some(Status::info(format!("Generated iframe for {id}")));
                ActionOutcome::Generated
            }
            Err(err) => {
                warn!(input_len = self.input.len(), "no file id in input");
                self.status = Some(Status::error(err.to_string()));
                ActionOutcome::Failed
            }
        }
    }

    /// "Copy Output": write the output buffer verbatim to the clipboard.
    pub fn copy_output(&mut self, clipboard: &mut dyn Clipboard) -> ActionOutcome {
        match clipboard.write_text(&self.output) {
            Ok(()) => {
                self.status = Some(Status::info("Copied iframe code to clipboard"));
                ActionOutcome::Copied
            }
            Err(err) => {
                warn!(%err, "clipboard write failed");
                self.status = Some(Status::error(err.to_string()));
                ActionOutcome::Failed
            }
        }
    }
}
