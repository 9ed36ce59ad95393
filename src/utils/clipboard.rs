//! System clipboard access through the platform clipboard utilities.

use std::io::Write;
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard command found (install {0})")]
    Unavailable(&'static str),
    #[error("Clipboard command `{0}` failed")]
    CommandFailed(String),
    #[error("Clipboard does not contain UTF-8 text")]
    NotText,
}

/// The two clipboard capabilities the window needs.
pub trait Clipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by `pbcopy`/`pbpaste`, PowerShell, or the
/// Wayland/X11 command-line tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        let text = paste_from_clipboard()?;
        debug!(bytes = text.len(), "read clipboard");
        Ok(text)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        copy_to_clipboard(text)?;
        debug!(bytes = text.len(), "wrote clipboard");
        Ok(())
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    #[cfg(target_os = "macos")]
    {
        run_with_stdin("pbcopy", &[], text)
    }
    #[cfg(target_os = "windows")]
    {
        run_with_stdin("cmd", &["/C", "clip"], text)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        const WRITERS: [(&str, &[&str]); 3] = [
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ];
        for (cmd, args) in WRITERS {
            match run_with_stdin(cmd, args, text) {
                Ok(()) => return Ok(()),
                Err(err) => debug!(cmd, %err, "clipboard writer unavailable"),
            }
        }
        Err(ClipboardError::Unavailable("wl-copy, xclip, or xsel"))
    }
}

pub fn paste_from_clipboard() -> Result<String, ClipboardError> {
    #[cfg(target_os = "macos")]
    {
        run_capturing("pbpaste", &[])
    }
    #[cfg(target_os = "windows")]
    {
        // Get-Clipboard terminates its output with a line break.
        let text = run_capturing(
            "powershell",
            &["-NoProfile", "-NonInteractive", "-Command", "Get-Clipboard -Raw"],
        )?;
        Ok(strip_one_line_ending(text))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        const READERS: [(&str, &[&str]); 3] = [
            ("wl-paste", &["--no-newline"]),
            ("xclip", &["-selection", "clipboard", "-o"]),
            ("xsel", &["--clipboard", "--output"]),
        ];
        for (cmd, args) in READERS {
            match run_capturing(cmd, args) {
                Ok(text) => return Ok(text),
                Err(ClipboardError::NotText) => return Err(ClipboardError::NotText),
                Err(err) => debug!(cmd, %err, "clipboard reader unavailable"),
            }
        }
        Err(ClipboardError::Unavailable("wl-paste, xclip, or xsel"))
    }
}

fn run_with_stdin(cmd: &str, args: &[&str], input: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| ClipboardError::CommandFailed(cmd.to_string()))?;

    // stdin is dropped before waiting so the tool sees end of input.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };

    if reap(&mut child, written.is_ok()) {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(cmd.to_string()))
    }
}

/// Wait for `child`, killing it first when its input could not be
/// delivered. True only when the input went through and the tool succeeded.
fn reap(child: &mut Child, input_delivered: bool) -> bool {
    if !input_delivered {
        let _ = child.kill();
    }
    let status = child.wait();
    input_delivered && matches!(status, Ok(status) if status.success())
}

fn run_capturing(cmd: &str, args: &[&str]) -> Result<String, ClipboardError> {
    let output = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|_| ClipboardError::CommandFailed(cmd.to_string()))?;

    if !output.status.success() {
        return Err(ClipboardError::CommandFailed(cmd.to_string()));
    }
    String::from_utf8(output.stdout).map_err(|_| ClipboardError::NotText)
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn strip_one_line_ending(mut text: String) -> String {
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    } else if text.ends_with('\n') {
        text.pop();
    }
    text
}

/// In-process clipboard for driving sessions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            contents: None,
            fail: true,
        }
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("a clipboard tool"));
        }
        Ok(self.contents.clone().unwrap_or_default())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::CommandFailed("memory".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
