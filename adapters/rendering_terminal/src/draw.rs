//! Palette and the primitive that paints one cell.

use crossterm::{
    cursor::MoveTo,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use maze_explorer_rendering::Glyph;
use std::io::{self, Write};

/// Colour and weight applied to a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellStyle {
    /// Foreground colour.
    pub foreground: Color,
    /// Whether the glyph is drawn bold.
    pub bold: bool,
}

impl CellStyle {
    /// Creates a regular-weight style.
    #[must_use]
    pub const fn plain(foreground: Color) -> Self {
        Self {
            foreground,
            bold: false,
        }
    }
}

/// Palette entry for `glyph`.
#[must_use]
pub const fn style_for(glyph: Glyph) -> CellStyle {
    match glyph {
        Glyph::Player => CellStyle {
            foreground: Color::Green,
            bold: true,
        },
        Glyph::Wall => CellStyle::plain(Color::White),
        Glyph::Item => CellStyle::plain(Color::Yellow),
        Glyph::Exit => CellStyle::plain(Color::Blue),
        Glyph::Spawn => CellStyle::plain(Color::DarkGrey),
        Glyph::Floor | Glyph::Void => CellStyle::plain(Color::Reset),
    }
}

/// Queues `glyph` at screen position `(x, y)`, padded to the cell width.
///
/// Nothing is flushed; callers batch a frame and flush once.
pub fn draw_cell<W: Write>(
    out: &mut W,
    x: u16,
    y: u16,
    glyph: Glyph,
    style: CellStyle,
) -> io::Result<()> {
    let _ = out.queue(MoveTo(x, y))?;
    let _ = out.queue(SetForegroundColor(style.foreground))?;
    if style.bold {
        let _ = out.queue(SetAttribute(Attribute::Bold))?;
    }
    let _ = out.queue(Print(glyph.symbol()))?;
    let _ = out.queue(Print(' '))?;
    if style.bold {
        let _ = out.queue(SetAttribute(Attribute::Reset))?;
    }
    let _ = out.queue(ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn(glyph: Glyph) -> String {
        let mut out = Vec::new();
        draw_cell(&mut out, 3, 4, glyph, style_for(glyph)).expect("writing to memory succeeds");
        String::from_utf8(out).expect("ansi output is utf-8")
    }

    #[test]
    fn draw_cell_moves_then_prints_symbol() {
        let output = drawn(Glyph::Item);

        let cursor = output.find("\x1b[5;4H").expect("cursor positioned");
        let symbol = output.find("* ").expect("symbol padded to cell width");
        assert!(cursor < symbol);
    }

    #[test]
    fn player_is_bold_and_distinct() {
        let output = drawn(Glyph::Player);

        assert!(output.contains("@ "));
        assert!(output.contains("\x1b[1m"));
        assert_ne!(style_for(Glyph::Player), style_for(Glyph::Wall));
    }

    #[test]
    fn palette_separates_interactive_cells() {
        let colours = [Glyph::Player, Glyph::Wall, Glyph::Item, Glyph::Exit]
            .map(|glyph| style_for(glyph).foreground);

        for (index, colour) in colours.iter().enumerate() {
            assert!(!colours[index + 1..].contains(colour));
        }
    }
}
