//! ANSI escape rendering of highlighted text for non-interactive output.

use std::io::{self, Write};

use ratatui::crossterm::{
    queue,
    style::{Attribute as CAttribute, Color as CColor, Print, SetAttribute, SetForegroundColor},
};
use ratatui::style::{Color, Modifier, Style};

use super::resolve_line;
use crate::ui::theme::Theme;

/// Write `text` to `w` with every styled run wrapped in SGR escapes.
/// Unstyled text and line breaks pass through untouched.
pub fn paint<W: Write>(w: &mut W, text: &str, theme: &Theme) -> io::Result<()> {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            queue!(w, Print('\n'))?;
        }
        for run in resolve_line(line) {
            let segment = &line[run.range];
            match run.style.map(|token| theme.highlight_style(token)) {
                Some(style) if has_visible_style(style) => {
                    queue_style(w, style)?;
                    queue!(w, Print(segment), SetAttribute(CAttribute::Reset))?;
                }
                _ => queue!(w, Print(segment))?,
            }
        }
    }
    Ok(())
}

fn has_visible_style(style: Style) -> bool {
    style.add_modifier.intersects(Modifier::BOLD | Modifier::ITALIC)
        || matches!(style.fg, Some(fg) if fg != Color::Reset)
}

fn queue_style<W: Write>(w: &mut W, style: Style) -> io::Result<()> {
    if style.add_modifier.contains(Modifier::BOLD) {
        queue!(w, SetAttribute(CAttribute::Bold))?;
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        queue!(w, SetAttribute(CAttribute::Italic))?;
    }
    if let Some(fg) = style.fg.filter(|fg| *fg != Color::Reset) {
        queue!(w, SetForegroundColor(CColor::from(fg)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(text: &str, theme: &Theme) -> String {
        let mut out = Vec::new();
        paint(&mut out, text, theme).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_text_has_no_escapes() {
        let theme = Theme::dark_default();
        assert_eq!(
            painted("no markup here\nnor here", &theme),
            "no markup here\nnor here"
        );
    }

    #[test]
    fn tag_is_wrapped_in_bold_truecolor_sequence() {
        let theme = Theme::dark_default();
        assert_eq!(
            painted("<br>", &theme),
            "\x1b[1m\x1b[38;2;78;201;176m<br>\x1b[0m"
        );
    }

    #[test]
    fn stripping_escapes_recovers_input() {
        let theme = Theme::light();
        let text = "<p class=\"x\">hi</p>\n<!-- done -->";
        let painted = painted(text, &theme);
        let stripped = regex::Regex::new("\x1b\\[[0-9;]*m")
            .unwrap()
            .replace_all(&painted, "");
        assert_eq!(stripped, text);
    }

    #[test]
    fn quantized_theme_uses_indexed_sequences() {
        let theme = Theme::dark_default().quantized(crate::utils::color::ColorDepth::X256);
        let painted = painted("<br>", &theme);
        assert!(painted.contains("\x1b[38;5;"));
        assert!(!painted.contains("38;2;"));
    }
}
