use ratatui::style::{Color, Modifier, Style};

use crate::highlight::HighlightStyle;
use crate::utils::color::{quantize_color, quantize_style, ColorDepth};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Window chrome
    pub background_color: Color,
    pub text_style: Style,
    pub title_style: Style,
    pub button_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub status_style: Style,
    pub error_style: Style,

    // Text fields
    pub field_style: Style,

    // Highlighter
    pub keyword_style: Style,
    pub tag_style: Style,
    pub attribute_name_style: Style,
    pub attribute_value_style: Style,
}

const CHROME: Color = Color::Rgb(0x33, 0x33, 0x33);
const BUTTON: Color = Color::Rgb(0x66, 0x66, 0x66);

impl Theme {
    /// Grey window with dark text fields.
    pub fn dark_default() -> Self {
        Theme {
            field_style: Style::default()
                .fg(Color::Rgb(0xd4, 0xd4, 0xd4))
                .bg(Color::Rgb(0x1e, 0x1e, 0x1e)),
            ..Self::chrome()
        }
    }

    /// Grey window with white text fields and black text.
    pub fn light() -> Self {
        Theme {
            field_style: Style::default().fg(Color::Black).bg(Color::White),
            ..Self::chrome()
        }
    }

    fn chrome() -> Self {
        Theme {
            background_color: CHROME,
            text_style: Style::default().fg(Color::White).bg(CHROME),
            title_style: Style::default()
                .fg(Color::White)
                .bg(CHROME)
                .add_modifier(Modifier::BOLD),
            button_style: Style::default()
                .fg(Color::White)
                .bg(BUTTON)
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(BUTTON).bg(CHROME),
            focused_border_style: Style::default()
                .fg(Color::Rgb(0x56, 0x9c, 0xd6))
                .bg(CHROME),
            status_style: Style::default().fg(Color::Rgb(0xaa, 0xaa, 0xaa)).bg(CHROME),
            error_style: Style::default()
                .fg(Color::Rgb(0xf4, 0x87, 0x71))
                .bg(CHROME)
                .add_modifier(Modifier::BOLD),

            field_style: Style::default(),

            keyword_style: Style::default()
                .fg(Color::Rgb(0x56, 0x9c, 0xd6))
                .add_modifier(Modifier::BOLD),
            tag_style: Style::default()
                .fg(Color::Rgb(0x4e, 0xc9, 0xb0))
                .add_modifier(Modifier::BOLD),
            attribute_name_style: Style::default().fg(Color::Rgb(0x9c, 0xdc, 0xfe)),
            attribute_value_style: Style::default().fg(Color::Rgb(0xce, 0x91, 0x78)),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    pub fn highlight_style(&self, token: HighlightStyle) -> Style {
        match token {
            HighlightStyle::Keyword => self.keyword_style,
            HighlightStyle::Tag => self.tag_style,
            HighlightStyle::AttributeName => self.attribute_name_style,
            HighlightStyle::AttributeValue => self.attribute_value_style,
        }
    }

    /// Map every colour to the nearest one the terminal can show.
    pub fn quantized(mut self, depth: ColorDepth) -> Self {
        if depth == ColorDepth::Truecolor {
            return self;
        }
        self.background_color = quantize_color(self.background_color, depth);
        for style in [
            &mut self.text_style,
            &mut self.title_style,
            &mut self.button_style,
            &mut self.border_style,
            &mut self.focused_border_style,
            &mut self.status_style,
            &mut self.error_style,
            &mut self.field_style,
            &mut self.keyword_style,
            &mut self.tag_style,
            &mut self.attribute_name_style,
            &mut self.attribute_value_style,
        ] {
            *style = quantize_style(*style, depth);
        }
        self
    }
}
