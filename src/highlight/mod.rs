//! Cosmetic token colouring for the generated HTML.
//!
//! This is a fixed, ordered list of pattern rules, not an HTML parser.
//! Every rule scans every line from the start and later rules overwrite
//! the styling of earlier ones where their spans overlap, so the order of
//! [`RULES`] is part of the visible result. The whole text is re-evaluated
//! on every change; there is no incremental state.

pub mod ansi;

use std::ops::Range;
use std::sync::LazyLock;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use regex::Regex;

use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightStyle {
    Keyword,
    Tag,
    AttributeName,
    AttributeValue,
}

/// One pattern of the rule table and the style it paints.
#[derive(Debug)]
pub struct HighlightRule {
    pattern: Regex,
    /// Capture group that is painted; group 0 is the whole match. A
    /// non-zero group stands in for a trailing lookahead: the rest of the
    /// match is checked but neither painted nor consumed.
    group: usize,
    style: HighlightStyle,
}

impl HighlightRule {
    fn new(pattern: &str, style: HighlightStyle) -> Self {
        Self::with_group(pattern, 0, style)
    }

    fn with_group(pattern: &str, group: usize, style: HighlightStyle) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("highlight rule pattern is valid"),
            group,
            style,
        }
    }

    pub fn style(&self) -> HighlightStyle {
        self.style
    }

    /// Byte ranges this rule paints in `line`, left to right. Scanning
    /// resumes right after each painted span.
    fn scan(&self, line: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut pos = 0;
        while pos <= line.len() {
            let Some(found) = self
                .pattern
                .captures_at(line, pos)
                .and_then(|caps| caps.get(self.group))
            else {
                break;
            };
            if found.is_empty() {
                pos = match line[found.end()..].chars().next() {
                    Some(c) => found.end() + c.len_utf8(),
                    None => break,
                };
                continue;
            }
            ranges.push(found.range());
            pos = found.end();
        }
        ranges
    }
}

/// The rule table, in application order.
pub static RULES: LazyLock<[HighlightRule; 7]> = LazyLock::new(|| {
    use HighlightStyle::*;
    [
        // <!DOCTYPE ...> and <!-- ... -->, greedy to the last `>`
        HighlightRule::new(r"<!.*>", Keyword),
        HighlightRule::new(r"<.*?>", Tag),
        // a word followed by `=` or `:=`
        HighlightRule::with_group(r"\b(\w+)\b:?=", 1, AttributeName),
        HighlightRule::new(r"=.*? ", AttributeValue),
        HighlightRule::new(r"=.*?>", AttributeValue),
        HighlightRule::new(r#"".*""#, AttributeValue),
        HighlightRule::new(r"'.*'", AttributeValue),
    ]
});

/// A single rule application: `range` is a byte range within line `line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub line: usize,
    pub range: Range<usize>,
    pub style: HighlightStyle,
}

/// A maximal run of bytes sharing the same final style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub range: Range<usize>,
    pub style: Option<HighlightStyle>,
}

/// Rule applications for `text`, in the order they are painted.
///
/// Lines are split on `\n`; spans never cross a line.
pub fn highlight(text: &str) -> Vec<HighlightSpan> {
    text.split('\n')
        .enumerate()
        .flat_map(|(index, line)| {
            highlight_line(line)
                .into_iter()
                .map(move |(range, style)| HighlightSpan {
                    line: index,
                    range,
                    style,
                })
        })
        .collect()
}

/// Rule applications for a single line, in the order they are painted.
pub fn highlight_line(line: &str) -> Vec<(Range<usize>, HighlightStyle)> {
    RULES
        .iter()
        .flat_map(|rule| {
            rule.scan(line)
                .into_iter()
                .map(move |range| (range, rule.style()))
        })
        .collect()
}

/// Replay the rule applications on `line` and collapse the result into
/// runs. The last rule to touch a byte decides its style.
pub fn resolve_line(line: &str) -> Vec<StyledRun> {
    let mut painted: Vec<Option<HighlightStyle>> = vec![None; line.len()];
    for (range, style) in highlight_line(line) {
        painted[range].fill(Some(style));
    }

    let mut runs: Vec<StyledRun> = Vec::new();
    for (offset, style) in painted.into_iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.style == style => run.range.end = offset + 1,
            _ => runs.push(StyledRun {
                range: offset..offset + 1,
                style,
            }),
        }
    }
    runs
}

/// Resolved styling for every line of `text`.
pub fn resolve(text: &str) -> Vec<Vec<StyledRun>> {
    text.split('\n').map(resolve_line).collect()
}

/// Ratatui lines for `lines`, painted with the theme's highlight styles on
/// top of `base`.
pub fn render_lines<S: AsRef<str>>(lines: &[S], theme: &Theme, base: Style) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let spans: Vec<Span<'static>> = resolve_line(line)
                .into_iter()
                .map(|run| {
                    let style = match run.style {
                        Some(token) => base.patch(theme.highlight_style(token)),
                        None => base,
                    };
                    Span::styled(line[run.range].to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use HighlightStyle::*;

    const SNIPPET: &str = r#"<iframe src="https://drive.google.com/file/d/ABC123/preview" width="640" height="480" allow="autoplay"></iframe>"#;

    fn style_at(line: &str, needle: &str) -> Option<HighlightStyle> {
        let offset = line.find(needle).expect("needle present");
        resolve_line(line)
            .into_iter()
            .find(|run| run.range.contains(&offset))
            .and_then(|run| run.style)
    }

    #[test]
    fn snippet_resolves_in_rule_order() {
        assert_eq!(style_at(SNIPPET, "<iframe"), Some(Tag));
        assert_eq!(style_at(SNIPPET, "src"), Some(AttributeName));
        assert_eq!(style_at(SNIPPET, "=\"https"), Some(AttributeValue));
        // `=.*?>` runs to the first `>` and repaints the later names
        assert_eq!(style_at(SNIPPET, "width"), Some(AttributeValue));
        assert_eq!(style_at(SNIPPET, "allow"), Some(AttributeValue));
        assert_eq!(style_at(SNIPPET, "</iframe>"), Some(Tag));
    }

    #[test]
    fn snippet_attribute_names_are_all_found_by_rule_three() {
        let names: Vec<&str> = highlight_line(SNIPPET)
            .into_iter()
            .filter(|(_, style)| *style == AttributeName)
            .map(|(range, _)| &SNIPPET[range])
            .collect();
        assert_eq!(names, ["src", "width", "height", "allow"]);
    }

    #[test]
    fn tag_rule_is_non_greedy_and_repeats() {
        let tags: Vec<&str> = highlight_line("<b>x</b>")
            .into_iter()
            .filter(|(_, style)| *style == Tag)
            .map(|(range, _)| &"<b>x</b>"[range])
            .collect();
        assert_eq!(tags, ["<b>", "</b>"]);
    }

    #[test]
    fn later_tag_rule_overwrites_declaration_prefix() {
        let line = "<!-- a > b -->";
        assert_eq!(
            resolve_line(line),
            vec![
                StyledRun {
                    range: 0..8,
                    style: Some(Tag)
                },
                StyledRun {
                    range: 8..line.len(),
                    style: Some(Keyword)
                },
            ]
        );
    }

    #[test]
    fn value_rules_stop_at_space_or_angle_bracket() {
        let spaced = highlight_line("a=1 b");
        assert!(spaced.contains(&(1..4, AttributeValue)));

        let closed = highlight_line("x=y>z");
        assert!(closed.contains(&(1..4, AttributeValue)));
    }

    #[test]
    fn quoted_strings_are_greedy() {
        let line = r#"say "one" and "two" ok"#;
        let quoted: Vec<&str> = highlight_line(line)
            .into_iter()
            .filter(|(_, style)| *style == AttributeValue)
            .map(|(range, _)| &line[range])
            .collect();
        assert_eq!(quoted, [r#""one" and "two""#]);

        assert_eq!(style_at("it's 'quoted' here", "'s"), Some(AttributeValue));
    }

    #[test]
    fn attribute_name_rule_ignores_tag_context() {
        // a bare word before `=` in plain text is still painted
        assert_eq!(style_at("total=5", "total"), Some(AttributeName));
        assert_eq!(style_at("a:=b", "a"), Some(AttributeName));
        assert_eq!(style_at("plain words", "plain"), None);
    }

    #[test]
    fn spans_never_cross_lines() {
        let text = "<a\nhref=x>";
        let spans = highlight(text);
        assert!(spans.iter().all(|span| span.line < 2));
        assert!(!spans.iter().any(|span| span.style == Tag));
        assert!(spans.contains(&HighlightSpan {
            line: 1,
            range: 0..4,
            style: AttributeName
        }));
    }

    #[test]
    fn highlighting_is_a_pure_function_of_text() {
        let text = format!("{SNIPPET}\n<!DOCTYPE html>\n<p class='x'>hi</p>");
        assert_eq!(highlight(&text), highlight(&text));
        assert_eq!(resolve(&text), resolve(&text));
    }

    #[test]
    fn runs_cover_every_byte_once() {
        let line = "héllo <b>wörld</b>";
        let runs = resolve_line(line);
        assert_eq!(runs.first().unwrap().range.start, 0);
        assert_eq!(runs.last().unwrap().range.end, line.len());
        for pair in runs.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
            assert_ne!(pair[0].style, pair[1].style);
        }
        // every run boundary falls on a char boundary
        assert!(runs.iter().all(|run| line.is_char_boundary(run.range.start)));
    }

    #[test]
    fn empty_lines_resolve_to_no_runs() {
        assert!(resolve_line("").is_empty());
        assert_eq!(resolve("a\n\nb").len(), 3);
    }

    #[test]
    fn render_lines_preserves_text() {
        let theme = Theme::dark_default();
        let lines = render_lines(&[SNIPPET, ""], &theme, Style::default());
        assert_eq!(lines.len(), 2);
        let rendered: String = lines[0]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(rendered, SNIPPET);
        assert!(lines[1].spans.is_empty());
    }
}
