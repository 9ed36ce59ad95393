//! Cleanup of text pasted into the window's fields.

/// Sanitize pasted text so it cannot corrupt the terminal.
///
/// Tabs become four spaces and carriage returns become newlines; other
/// control characters are dropped. For a single-line field every line
/// break is folded into a space.
pub fn sanitize_paste(text: &str, multiline: bool) -> String {
    let mut sanitized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' | '\n' => {
                // CRLF counts as one break
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                sanitized.push(if multiline { '\n' } else { ' ' });
            }
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_links_untouched() {
        let link = "https://drive.google.com/open?id=ABC123&usp=sharing";
        assert_eq!(sanitize_paste(link, false), link);
    }

    #[test]
    fn expands_tabs_and_drops_control_chars() {
        assert_eq!(sanitize_paste("a\tb\x07c\x1b[0m", true), "a    bc[0m");
    }

    #[test]
    fn normalizes_line_breaks() {
        assert_eq!(sanitize_paste("one\r\ntwo\rthree\n", true), "one\ntwo\nthree\n");
        assert_eq!(sanitize_paste("one\r\ntwo\n", false), "one two ");
    }
}
