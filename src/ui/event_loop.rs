use std::{error::Error, io};

use ratatui::backend::Backend;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::Terminal;
use tracing::info;

use crate::core::config::Config;
use crate::core::session::Session;
use crate::ui::app::{Focus, WindowAction, WindowState};
use crate::ui::lifecycle::{restore_terminal, setup_terminal};
use crate::ui::renderer::render;
use crate::ui::theme::Theme;
use crate::utils::clipboard::{Clipboard, SystemClipboard};
use crate::utils::color::detect_color_depth;

/// Translate a terminal event into a window action. Key releases and
/// repeats of non-editing keys are ignored.
pub fn map_event(event: &Event, focus: Focus) -> Option<WindowAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(map_key(*key, focus)),
        Event::Paste(text) => Some(WindowAction::Paste(text.clone())),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(WindowAction::Click {
                column: mouse.column,
                row: mouse.row,
            })
        }
        _ => None,
    }
}

fn map_key(key: KeyEvent, focus: Focus) -> WindowAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => WindowAction::Quit,
        KeyCode::Char('c') if ctrl => WindowAction::Quit,
        KeyCode::Char('v') if ctrl => WindowAction::PasteAndGenerate,
        KeyCode::F(2) => WindowAction::PasteAndGenerate,
        KeyCode::Char('y') if ctrl => WindowAction::CopyOutput,
        KeyCode::F(3) => WindowAction::CopyOutput,
        KeyCode::Tab | KeyCode::BackTab => WindowAction::FocusNext,
        KeyCode::Enter if focus == Focus::Input => WindowAction::GenerateFromInput,
        _ => WindowAction::Edit(key),
    }
}

/// Draw, wait for the next event, act on it; until the window is closed.
pub fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut WindowState,
    theme: &Theme,
    clipboard: &mut dyn Clipboard,
    mut next_event: impl FnMut() -> io::Result<Event>,
) -> io::Result<()> {
    while !state.should_quit {
        terminal.draw(|f| render(f, state, theme))?;
        if let Some(action) = map_event(&next_event()?, state.focus) {
            state.dispatch(action, clipboard);
        }
    }
    Ok(())
}

pub fn run_window(config: &Config) -> Result<(), Box<dyn Error>> {
    let depth = detect_color_depth();
    let theme = Theme::from_name(config.theme_name()).quantized(depth);
    let mut state = WindowState::new(Session::new(config.snippet_options()));
    info!(theme = config.theme_name(), ?depth, "opening window");

    let mut terminal = setup_terminal()?;
    let result = drive(
        &mut terminal,
        &mut state,
        &theme,
        &mut SystemClipboard,
        event::read,
    );
    restore_terminal(&mut terminal)?;
    result?;

    info!("window closed");
    Ok(())
}
