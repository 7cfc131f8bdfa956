use std::io::Write;

use crossterm::{QueueableCommand, style};

use super::cell::{Glyph, TextCell};
use crate::{
    draw::{LineCap, Primitive, Rgb},
    grid::Point,
};

/// A character lattice that primitives rendered at [`TextCanvas::CELL_SIZE`] are rasterised onto.
///
/// Each lattice point is one integer canvas coordinate, so a square maze of `w` x `h` cells
/// becomes a `(2w + 1)` x `(2h + 1)` lattice with walls on even and cell centres on odd
/// coordinates.
pub struct TextCanvas {
    data: Box<[TextCell]>,
    width: u16,
    height: u16,
    background: Rgb,
}

impl TextCanvas {
    /// Canvas units per maze cell to render with.
    pub const CELL_SIZE: f64 = 2.0;

    pub fn new(width: u16, height: u16, background: Rgb) -> Self {
        let data = vec![TextCell::blank(background); width as usize * height as usize];
        TextCanvas {
            data: data.into_boxed_slice(),
            width,
            height,
            background,
        }
    }

    /// Size the canvas from the leading background fill and paint every primitive.
    pub fn from_primitives(primitives: &[Primitive]) -> Self {
        let (width, height, background) = match primitives.first() {
            Some(&Primitive::FillRect {
                width,
                height,
                color,
                ..
            }) => (lattice_len(width), lattice_len(height), color),
            _ => (0, 0, Rgb::WHITE),
        };
        let mut canvas = TextCanvas::new(width, height, background);
        primitives.iter().for_each(|p| canvas.paint(p));
        canvas
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn set(&mut self, point: Point, glyph: Glyph, fg: Rgb) {
        let (x, y) = (point.x.round(), point.y.round());
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return;
        }
        let idx = self.ravel_index(x as u16, y as u16);
        self.data[idx] = TextCell {
            glyph,
            fg,
            bg: self.background,
        };
    }

    /// Set every lattice point the segment passes through.
    fn stroke(&mut self, from: Point, to: Point, glyph: Glyph, fg: Rgb) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        if steps == 0 {
            self.set(from, glyph, fg);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.set(from.offset(dx * t, dy * t), glyph, fg);
        }
    }

    pub fn paint(&mut self, primitive: &Primitive) {
        match *primitive {
            Primitive::FillRect {
                origin,
                width,
                height,
                color,
            } => {
                self.background = color;
                let (x0, y0) = (origin.x.max(0.0) as u16, origin.y.max(0.0) as u16);
                let x1 = lattice_len(origin.x + width).min(self.width);
                let y1 = lattice_len(origin.y + height).min(self.height);
                for y in y0..y1 {
                    for x in x0..x1 {
                        let idx = self.ravel_index(x, y);
                        self.data[idx] = TextCell::blank(color);
                    }
                }
            }
            Primitive::Line {
                from,
                to,
                color,
                cap: LineCap::Butt,
                ..
            } => {
                // The inner overpass stroke only restores background, the deck glyph already shows it
                if color == self.background {
                    return;
                }
                let glyph = if (to.x - from.x).abs() >= (to.y - from.y).abs() {
                    Glyph::DeckHorizontal
                } else {
                    Glyph::DeckVertical
                };
                self.stroke(from, to, glyph, color);
            }
            Primitive::Line {
                from, to, color, ..
            } => self.stroke(from, to, Glyph::Wall, color),
            Primitive::PathSegment { from, to, hue, .. } => {
                self.stroke(from, to, Glyph::Route, Rgb::from_hue(hue))
            }
        }
    }

    /// Queue the whole canvas, one row per line, then flush.
    pub fn display(&self, out: &mut impl Write) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                out.queue(style::Print(self[(x, y)]))?;
            }
            out.queue(style::ResetColor)?;
            out.queue(style::Print("\r\n"))?;
        }
        out.flush()
    }
}

/// Number of lattice points covering `[0, extent]`.
fn lattice_len(extent: f64) -> u16 {
    (extent.max(0.0).round() as u16).saturating_add(1)
}

impl std::ops::Index<(u16, u16)> for TextCanvas {
    type Output = TextCell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::{RenderOptions, render},
        maze::{Maze, MazeConfig},
    };

    fn preview_options() -> RenderOptions {
        RenderOptions {
            cell_size: Some(TextCanvas::CELL_SIZE),
            ..Default::default()
        }
    }

    #[test]
    fn test_square_lattice_size() {
        let mut maze = Maze::square(5, 3, &MazeConfig::default().with_seed(1)).unwrap();
        maze.run();
        let config = preview_options().resolve().unwrap();
        let canvas = TextCanvas::from_primitives(&render(&maze, &config));
        assert_eq!((canvas.width(), canvas.height()), (11, 7));
    }

    #[test]
    fn test_walls_and_passages() {
        let config = MazeConfig::default().with_seed(12).with_bridge_chance(0.0);
        let mut maze = Maze::square(4, 4, &config).unwrap();
        maze.run();
        let options = RenderOptions {
            enclosed: Some(true),
            ..preview_options()
        };
        let canvas = TextCanvas::from_primitives(&render(&maze, &options.resolve().unwrap()));

        // Lattice corners are always wall
        for y in (0..9).step_by(2) {
            for x in (0..9).step_by(2) {
                assert_eq!(canvas[(x, y)].glyph, Glyph::Wall, "corner ({x}, {y})");
            }
        }
        // Cell centres are never wall
        for y in (1..9).step_by(2) {
            for x in (1..9).step_by(2) {
                assert_eq!(canvas[(x, y)].glyph, Glyph::Blank);
            }
        }
        // A wall point between two horizontally adjacent cells is open exactly when carved
        let grid = maze.grid();
        for y in 0..4u32 {
            for x in 0..3u32 {
                let idx = grid.index_of(x, y).unwrap();
                let open = grid
                    .cell(idx)
                    .is_open(crate::grid::SquareDirection::Right);
                let glyph = canvas[(2 * x as u16 + 2, 2 * y as u16 + 1)].glyph;
                assert_eq!(glyph == Glyph::Blank, open, "between ({x}, {y}) and its right");
            }
        }
    }

    #[test]
    fn test_route_and_deck() {
        let config = MazeConfig::default().with_seed(3).with_bridge_chance(1.0);
        let mut maze = Maze::square(12, 12, &config).unwrap();
        maze.run();
        let options = RenderOptions {
            show_solution: Some(true),
            ..preview_options()
        };
        let canvas = TextCanvas::from_primitives(&render(&maze, &options.resolve().unwrap()));
        let glyphs = (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .map(|c| canvas[c].glyph)
            .collect::<Vec<_>>();
        assert!(glyphs.contains(&Glyph::Route));
        assert!(
            glyphs
                .iter()
                .any(|g| matches!(g, Glyph::DeckHorizontal | Glyph::DeckVertical))
        );
    }

    #[test]
    fn test_display_rows() {
        let canvas = TextCanvas::new(3, 2, Rgb::WHITE);
        let mut out = Vec::new();
        canvas.display(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 2);
    }
}
