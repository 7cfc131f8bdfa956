use crossterm::style::{Color, Stylize};

use std::fmt;

use crate::draw::Rgb;

/// What occupies one lattice point of the terminal preview.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Glyph {
    /// Background only
    #[default]
    Blank,
    /// Wall ink
    Wall,
    /// Bridge deck running left-right
    DeckHorizontal,
    /// Bridge deck running up-down
    DeckVertical,
    /// Solution route
    Route,
}

/// One styled lattice point of a [`super::canvas::TextCanvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextCell {
    pub glyph: Glyph,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl TextCell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    pub const fn blank(bg: Rgb) -> Self {
        TextCell {
            glyph: Glyph::Blank,
            fg: bg,
            bg,
        }
    }
}

fn term_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl fmt::Display for TextCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.glyph {
            Glyph::Blank => "  ",
            Glyph::Wall => "██",
            Glyph::DeckHorizontal => "══",
            Glyph::DeckVertical => "║║",
            Glyph::Route => "▓▓",
        };
        let styled_symbol = symbol.with(term_color(self.fg)).on(term_color(self.bg));

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                TextCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
