//! Window state: the session plus the editing state of both text fields.

use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect};
use tui_textarea::{Input as TAInput, TextArea};

use crate::core::session::{ActionOutcome, Session};
use crate::utils::clipboard::Clipboard;
use crate::utils::input::sanitize_paste;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Output,
}

/// Screen areas that react to mouse clicks, refreshed on every draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub input_field: Rect,
    pub paste_button: Rect,
    pub output_field: Rect,
    pub copy_button: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowAction {
    PasteAndGenerate,
    GenerateFromInput,
    CopyOutput,
    FocusNext,
    Focus(Focus),
    Edit(KeyEvent),
    Paste(String),
    Click { column: u16, row: u16 },
    Quit,
}

pub struct WindowState {
    pub session: Session,
    input: TextArea<'static>,
    output: TextArea<'static>,
    pub focus: Focus,
    /// First visible (wrapped) row of the output field.
    pub output_scroll: u16,
    pub regions: HitRegions,
    pub should_quit: bool,
}

impl WindowState {
    pub fn new(session: Session) -> Self {
        let input = text_area(session.input());
        let output = text_area(session.output());
        Self {
            session,
            input,
            output,
            focus: Focus::Input,
            output_scroll: 0,
            regions: HitRegions::default(),
            should_quit: false,
        }
    }

    /// The input field's text. The field is always a single line.
    pub fn input_line(&self) -> &str {
        self.input.lines().first().map(String::as_str).unwrap_or("")
    }

    pub fn input_cursor(&self) -> usize {
        self.input.cursor().1
    }

    pub fn output_lines(&self) -> &[String] {
        self.output.lines()
    }

    /// Cursor of the output field as (row, column in chars).
    pub fn output_cursor(&self) -> (usize, usize) {
        self.output.cursor()
    }

    pub fn dispatch(&mut self, action: WindowAction, clipboard: &mut dyn Clipboard) {
        match action {
            WindowAction::PasteAndGenerate => {
                let outcome = self.session.paste_and_generate(clipboard);
                // A clipboard paste replaces the input even when no id was found.
                self.input = text_area(&sanitize_paste(self.session.input(), false));
                self.after_generate(outcome);
            }
            WindowAction::GenerateFromInput => {
                let outcome = self.session.generate_from_input();
                self.after_generate(outcome);
            }
            WindowAction::CopyOutput => {
                self.session.copy_output(clipboard);
            }
            WindowAction::FocusNext => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Output,
                    Focus::Output => Focus::Input,
                };
            }
            WindowAction::Focus(focus) => self.focus = focus,
            WindowAction::Edit(key) => self.edit(key),
            WindowAction::Paste(text) => self.paste(&text),
            WindowAction::Click { column, row } => {
                if let Some(action) = self.action_at(column, row) {
                    self.dispatch(action, clipboard);
                }
            }
            WindowAction::Quit => self.should_quit = true,
        }
    }

    fn action_at(&self, column: u16, row: u16) -> Option<WindowAction> {
        let at = Position::new(column, row);
        let regions = &self.regions;
        if regions.paste_button.contains(at) {
            Some(WindowAction::PasteAndGenerate)
        } else if regions.copy_button.contains(at) {
            Some(WindowAction::CopyOutput)
        } else if regions.input_field.contains(at) {
            Some(WindowAction::Focus(Focus::Input))
        } else if regions.output_field.contains(at) {
            Some(WindowAction::Focus(Focus::Output))
        } else {
            None
        }
    }

    fn after_generate(&mut self, outcome: ActionOutcome) {
        if outcome == ActionOutcome::Generated {
            self.output = text_area(self.session.output());
            self.output_scroll = 0;
        }
    }

    fn edit(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Input => {
                self.input.input(TAInput::from(key));
                if self.input.lines().len() > 1 {
                    let joined = self.input.lines().join(" ");
                    self.input = text_area(&joined);
                }
                let line = self.input_line().to_string();
                self.session.set_input(line);
            }
            Focus::Output => {
                if self.output.input(TAInput::from(key)) {
                    self.session.set_output(self.output.lines().join("\n"));
                }
            }
        }
    }

    fn paste(&mut self, text: &str) {
        match self.focus {
            Focus::Input => {
                self.input.insert_str(sanitize_paste(text, false));
                let line = self.input_line().to_string();
                self.session.set_input(line);
            }
            Focus::Output => {
                self.output.insert_str(sanitize_paste(text, true));
                self.session.set_output(self.output.lines().join("\n"));
            }
        }
    }
}

/// A text area holding `text` with the cursor at the very start.
fn text_area(text: &str) -> TextArea<'static> {
    TextArea::new(text.split('\n').map(str::to_string).collect())
}
