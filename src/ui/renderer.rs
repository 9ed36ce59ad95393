use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::session::StatusKind;
use crate::highlight::render_lines;
use crate::ui::app::{Focus, HitRegions, WindowState};
use crate::ui::theme::Theme;
use crate::ui::wrap::{cursor_offset, horizontal_window, wrap_lines};

pub const WINDOW_TITLE: &str = "Google Drive Iframe Generator";
pub const INPUT_LABEL: &str = "Paste your link here:";
pub const OUTPUT_LABEL: &str = "Iframe code:";
pub const PASTE_BUTTON: &str = "Paste and Generate";
pub const COPY_BUTTON: &str = "Copy Output";

const KEY_HINT: &str = "Ctrl+V paste and generate • Ctrl+Y copy • Tab switch field • Esc quit";

pub fn render(f: &mut Frame, state: &mut WindowState, theme: &Theme) {
    let area = f.area();
    f.render_widget(
        Block::default().style(theme.text_style.bg(theme.background_color)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // input label
            Constraint::Length(3), // input field + paste button
            Constraint::Length(1), // output label
            Constraint::Min(3),    // output field
            Constraint::Length(3), // copy button
            Constraint::Length(1), // status
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(WINDOW_TITLE)
            .alignment(Alignment::Center)
            .style(theme.title_style),
        rows[0],
    );
    f.render_widget(Paragraph::new(INPUT_LABEL).style(theme.text_style), rows[1]);

    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(PASTE_BUTTON.len() as u16 + 4),
        ])
        .split(rows[2]);
    render_input(f, state, theme, input_row[0]);
    render_button(f, theme, PASTE_BUTTON, input_row[1]);

    f.render_widget(Paragraph::new(OUTPUT_LABEL).style(theme.text_style), rows[3]);
    render_output(f, state, theme, rows[4]);

    let copy_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(COPY_BUTTON.len() as u16 + 4),
            Constraint::Min(0),
        ])
        .split(rows[5]);
    render_button(f, theme, COPY_BUTTON, copy_row[0]);

    render_status(f, state, theme, rows[6]);

    state.regions = HitRegions {
        input_field: input_row[0],
        paste_button: input_row[1],
        output_field: rows[4],
        copy_button: copy_row[0],
    };
}

fn field_block(theme: &Theme, focused: bool) -> Block<'static> {
    let border_style = if focused {
        theme.focused_border_style
    } else {
        theme.border_style
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.field_style)
}

fn render_button(f: &mut Frame, theme: &Theme, label: &str, area: Rect) {
    let button = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(theme.button_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style)
                .style(theme.button_style),
        );
    f.render_widget(button, area);
}

fn render_input(f: &mut Frame, state: &WindowState, theme: &Theme, area: Rect) {
    let focused = state.focus == Focus::Input;
    let block = field_block(theme, focused);
    let inner = block.inner(area);

    // Single line: scroll sideways so the cursor stays in view.
    let text = state.input_line();
    let (start, cursor_x) = horizontal_window(text, state.input_cursor(), inner.width as usize);
    let visible: String = text.chars().skip(start).collect();

    f.render_widget(
        Paragraph::new(visible).style(theme.field_style).block(block),
        area,
    );

    if focused && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position(Position::new(inner.x + cursor_x as u16, inner.y));
    }
}

fn render_output(f: &mut Frame, state: &mut WindowState, theme: &Theme, area: Rect) {
    let focused = state.focus == Focus::Output;
    let block = field_block(theme, focused);
    let inner = block.inner(area);
    let width = inner.width as usize;
    let height = inner.height as usize;

    let lines = render_lines(state.output_lines(), theme, theme.field_style);
    let (wrapped, starts) = wrap_lines(lines, width);

    let (row, col) = state.output_cursor();
    let line = state.output_lines().get(row).map(String::as_str).unwrap_or("");
    let (row_offset, cursor_x) = cursor_offset(line, col, width);
    let cursor_row = starts.get(row).copied().unwrap_or(0) + row_offset;

    let scroll = scroll_to_show(state.output_scroll as usize, cursor_row, height, wrapped.len());
    state.output_scroll = scroll as u16;

    f.render_widget(
        Paragraph::new(wrapped)
            .style(theme.field_style)
            .block(block)
            .scroll((state.output_scroll, 0)),
        area,
    );

    if focused && width > 0 && (scroll..scroll + height).contains(&cursor_row) {
        f.set_cursor_position(Position::new(
            inner.x + cursor_x as u16,
            inner.y + (cursor_row - scroll) as u16,
        ));
    }
}

/// Smallest change to `scroll` that brings `cursor_row` into a viewport of
/// `height` rows, without scrolling past the last row.
fn scroll_to_show(scroll: usize, cursor_row: usize, height: usize, total: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let mut scroll = scroll.min(total.saturating_sub(height));
    if cursor_row < scroll {
        scroll = cursor_row;
    } else if cursor_row >= scroll + height {
        scroll = cursor_row + 1 - height;
    }
    scroll
}

fn render_status(f: &mut Frame, state: &WindowState, theme: &Theme, area: Rect) {
    let (text, style): (&str, Style) = match state.session.status() {
        Some(status) if status.kind == StatusKind::Error => (status.message.as_str(), theme.error_style),
        Some(status) => (status.message.as_str(), theme.status_style),
        None => (KEY_HINT, theme.status_style),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(text.to_string(), style))).style(theme.status_style),
        area,
    );
}
