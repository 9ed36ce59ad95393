//! Window-less commands: generate, extract, highlight.

use std::error::Error;
use std::io::{self, IsTerminal, Read, Write};

use tracing::info;

use crate::core::config::Config;
use crate::core::extract::{extract, FileId};
use crate::core::snippet::{generate_with, SnippetOptions};
use crate::highlight::ansi::paint;
use crate::ui::theme::Theme;
use crate::utils::clipboard::Clipboard;
use crate::utils::color::detect_color_depth;

/// The link given on the command line, or the clipboard text.
fn link_text(link: Option<String>, clipboard: &mut dyn Clipboard) -> Result<String, Box<dyn Error>> {
    match link {
        Some(link) => Ok(link),
        None => Ok(clipboard.read_text()?),
    }
}

fn extract_or_exit(text: &str) -> FileId {
    match extract(text) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}

/// The configured theme when stdout is a terminal and `--plain` is absent.
fn terminal_theme(plain: bool, config: &Config) -> Option<Theme> {
    (!plain && io::stdout().is_terminal())
        .then(|| Theme::from_name(config.theme_name()).quantized(detect_color_depth()))
}

pub fn run_generate(
    link: Option<String>,
    copy: bool,
    plain: bool,
    config: &Config,
    clipboard: &mut dyn Clipboard,
) -> Result<(), Box<dyn Error>> {
    let text = link_text(link, clipboard)?;
    let id = extract_or_exit(&text);
    let options = config.snippet_options();

    let theme = terminal_theme(plain, config);
    let snippet = write_snippet(&mut io::stdout().lock(), &id, &options, theme.as_ref())?;
    info!(%id, "generated iframe");

    if copy {
        clipboard.write_text(&snippet)?;
        eprintln!("✅ Copied iframe code to clipboard");
    }
    Ok(())
}

/// Write the snippet for `id` followed by a newline, painted when a theme is
/// given, and return the unpainted snippet.
fn write_snippet<W: Write>(
    out: &mut W,
    id: &FileId,
    options: &SnippetOptions,
    theme: Option<&Theme>,
) -> io::Result<String> {
    let snippet = generate_with(id, options).into_string();
    match theme {
        Some(theme) => paint(out, &snippet, theme)?,
        None => write!(out, "{snippet}")?,
    }
    writeln!(out)?;
    Ok(snippet)
}

pub fn run_extract(link: Option<String>, clipboard: &mut dyn Clipboard) -> Result<(), Box<dyn Error>> {
    let text = link_text(link, clipboard)?;
    let id = extract_or_exit(&text);
    println!("{id}");
    Ok(())
}

pub fn run_highlight(plain: bool, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut html = String::new();
    io::stdin().read_to_string(&mut html)?;
    let theme = terminal_theme(plain, config);
    highlight_to(&mut io::stdout().lock(), &html, theme.as_ref())?;
    Ok(())
}

/// Echo `html` with a single trailing newline, painted only when a theme is
/// given.
fn highlight_to<W: Write>(out: &mut W, html: &str, theme: Option<&Theme>) -> io::Result<()> {
    let body = html.strip_suffix('\n').unwrap_or(html);
    match theme {
        Some(theme) => paint(out, body, theme)?,
        None => write!(out, "{body}")?,
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clipboard::MemoryClipboard;

    const SNIPPET: &str = r#"<iframe src="https://drive.google.com/file/d/ABC123/preview" width="640" height="480" allow="autoplay"></iframe>"#;

    #[test]
    fn link_argument_wins_over_clipboard() {
        let mut clipboard = MemoryClipboard::with_text("from clipboard");
        let text = link_text(Some("from args".into()), &mut clipboard).unwrap();
        assert_eq!(text, "from args");
        assert_eq!(link_text(None, &mut clipboard).unwrap(), "from clipboard");
    }

    #[test]
    fn clipboard_failure_is_an_error() {
        let mut clipboard = MemoryClipboard::failing();
        assert!(link_text(None, &mut clipboard).is_err());
    }

    #[test]
    fn plain_snippet_has_no_escapes() {
        let id = extract("https://drive.google.com/open?id=ABC123&x=1").unwrap();
        let mut out = Vec::new();
        let snippet = write_snippet(&mut out, &id, &SnippetOptions::default(), None).unwrap();

        assert_eq!(snippet, SNIPPET);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{SNIPPET}\n"));
    }

    #[test]
    fn painted_snippet_returns_plain_text() {
        let id = FileId::new("ABC123");
        let mut out = Vec::new();
        let theme = Theme::dark_default();
        let snippet =
            write_snippet(&mut out, &id, &SnippetOptions::default(), Some(&theme)).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(snippet, SNIPPET);
        assert!(printed.contains("\x1b["));
        assert_ne!(printed.trim_end(), SNIPPET);
    }

    #[test]
    fn highlight_keeps_one_trailing_newline() {
        let mut out = Vec::new();
        highlight_to(&mut out, "plain text\n", Some(&Theme::dark_default())).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plain text\n");
    }

    #[test]
    fn unthemed_highlight_writes_markup_verbatim() {
        let mut out = Vec::new();
        highlight_to(&mut out, "<p class=\"x\">hi</p>\n", None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<p class=\"x\">hi</p>\n");

        let mut painted = Vec::new();
        highlight_to(&mut painted, "<p>", Some(&Theme::dark_default())).unwrap();
        assert!(String::from_utf8(painted).unwrap().contains("\x1b["));
    }
}
