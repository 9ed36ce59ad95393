//! Character-level wrapping for the output field.
//!
//! The snippet is one long line without natural break points, so lines are
//! cut at the field width rather than at word boundaries. The same walk
//! places the cursor, keeping it aligned with what is drawn.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Split `line` into rows at most `width` columns wide, keeping span
/// styles. An empty line yields one empty row.
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line];
    }

    let mut rows: Vec<Vec<Span<'static>>> = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut x = 0;
    for span in line.spans {
        let mut chunk = String::new();
        for c in span.content.chars() {
            let w = char_width(c);
            if x + w > width && x > 0 {
                if !chunk.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(std::mem::take(&mut row));
                x = 0;
            }
            chunk.push(c);
            x += w;
        }
        if !chunk.is_empty() {
            row.push(Span::styled(chunk, span.style));
        }
    }
    rows.push(row);

    rows.into_iter().map(Line::from).collect()
}

/// Wrap every line and report the first row of each logical line.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut wrapped = Vec::new();
    let mut starts = Vec::with_capacity(lines.len());
    for line in lines {
        starts.push(wrapped.len());
        wrapped.extend(wrap_line(line, width));
    }
    (wrapped, starts)
}

/// Row offset and column of the cursor sitting before char `col` of
/// `text` when wrapped at `width`. A cursor past a full row stays on its
/// last cell.
pub fn cursor_offset(text: &str, col: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let (mut row, mut x) = (0, 0);
    for c in text.chars().take(col) {
        let w = char_width(c);
        if x + w > width && x > 0 {
            row += 1;
            x = 0;
        }
        x += w;
    }
    (row, x.min(width - 1))
}

/// Char offset to start drawing a single-line field from so that the
/// cursor at char `col` stays visible, and the cursor's column relative
/// to that offset.
pub fn horizontal_window(text: &str, col: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let widths: Vec<usize> = text.chars().take(col).map(char_width).collect();
    let mut prefix: usize = widths.iter().sum();
    let mut start = 0;
    while prefix >= width && start < widths.len() {
        prefix -= widths[start];
        start += 1;
    }
    (start, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Style};

    fn row_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wraps_across_span_boundaries_keeping_styles() {
        let red = Style::default().fg(Color::Red);
        let line = Line::from(vec![Span::raw("abcd"), Span::styled("efgh", red)]);

        let rows = wrap_line(line, 3);

        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, ["abc", "def", "gh"]);
        assert_eq!(rows[1].spans[1].style, red);
        assert_eq!(rows[2].spans[0].style, red);
    }

    #[test]
    fn empty_line_is_one_row() {
        let rows = wrap_line(Line::from(""), 10);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].spans.is_empty());
    }

    #[test]
    fn wide_chars_are_not_split() {
        let rows = wrap_line(Line::from("a漢字"), 4);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, ["a漢", "字"]);
    }

    #[test]
    fn line_starts_account_for_wrapped_rows() {
        let lines = vec![Line::from("abcdefg"), Line::from(""), Line::from("x")];
        let (wrapped, starts) = wrap_lines(lines, 3);
        assert_eq!(wrapped.len(), 5);
        assert_eq!(starts, [0, 3, 4]);
    }

    #[test]
    fn cursor_follows_wrapping() {
        assert_eq!(cursor_offset("abcdefg", 0, 3), (0, 0));
        assert_eq!(cursor_offset("abcdefg", 4, 3), (1, 1));
        assert_eq!(cursor_offset("abcdef", 6, 3), (1, 2));
    }

    #[test]
    fn horizontal_window_keeps_cursor_visible() {
        assert_eq!(horizontal_window("short", 5, 10), (0, 5));
        assert_eq!(horizontal_window("0123456789abc", 13, 10), (4, 9));
        assert_eq!(horizontal_window("0123456789abc", 2, 10), (0, 2));
    }
}
