use std::fmt;

use super::{Direction, Grid, Point, Wall};
use crate::error::Result;

/// The four axis directions of a square lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareDirection {
    Right,
    Left,
    Down,
    Up,
}

impl Direction for SquareDirection {
    const ALL: &'static [Self] = &[
        SquareDirection::Right,
        SquareDirection::Left,
        SquareDirection::Down,
        SquareDirection::Up,
    ];
    const ENTRANCE: Self = SquareDirection::Left;
    const EXIT: Self = SquareDirection::Right;

    fn index(self) -> usize {
        self as usize
    }

    fn reverse(self) -> Self {
        match self {
            SquareDirection::Right => SquareDirection::Left,
            SquareDirection::Left => SquareDirection::Right,
            SquareDirection::Down => SquareDirection::Up,
            SquareDirection::Up => SquareDirection::Down,
        }
    }
}

impl fmt::Display for SquareDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareDirection::Right => write!(f, "right"),
            SquareDirection::Left => write!(f, "left"),
            SquareDirection::Down => write!(f, "down"),
            SquareDirection::Up => write!(f, "up"),
        }
    }
}

/// Edges of the unit square, in [`Direction::ALL`] order.
const WALLS: [Wall; 4] = [
    [Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
    [Point::new(0.0, 0.0), Point::new(0.0, 1.0)],
    [Point::new(0.0, 1.0), Point::new(1.0, 1.0)],
    [Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
];

/// Build a square lattice. Start is the top-left cell and finish the bottom-right one.
pub fn build(width: u32, height: u32) -> Result<Grid<SquareDirection>> {
    let grid = Grid::from_lattice(
        width,
        height,
        |_, _| Point::default(),
        |x, y, direction| {
            let (x, y) = (x as i64, y as i64);
            Some(match direction {
                SquareDirection::Right => (x + 1, y),
                SquareDirection::Left => (x - 1, y),
                SquareDirection::Down => (x, y + 1),
                SquareDirection::Up => (x, y - 1),
            })
        },
        Box::new(WALLS),
        Point::new(0.5, 0.5),
    )?;
    tracing::debug!("Built {}x{} square grid", width, height);
    Ok(grid)
}
