use std::fmt;

use super::{Direction, Grid, Point, Wall};
use crate::error::Result;

/// The six directions of a pointy-top hex lattice with odd rows shifted right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexDirection {
    Left,
    Right,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Direction for HexDirection {
    const ALL: &'static [Self] = &[
        HexDirection::Left,
        HexDirection::Right,
        HexDirection::UpperLeft,
        HexDirection::UpperRight,
        HexDirection::LowerLeft,
        HexDirection::LowerRight,
    ];
    const ENTRANCE: Self = HexDirection::Left;
    const EXIT: Self = HexDirection::Right;

    fn index(self) -> usize {
        self as usize
    }

    fn reverse(self) -> Self {
        match self {
            HexDirection::Left => HexDirection::Right,
            HexDirection::Right => HexDirection::Left,
            HexDirection::UpperLeft => HexDirection::LowerRight,
            HexDirection::UpperRight => HexDirection::LowerLeft,
            HexDirection::LowerLeft => HexDirection::UpperRight,
            HexDirection::LowerRight => HexDirection::UpperLeft,
        }
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexDirection::Left => write!(f, "left"),
            HexDirection::Right => write!(f, "right"),
            HexDirection::UpperLeft => write!(f, "upper-left"),
            HexDirection::UpperRight => write!(f, "upper-right"),
            HexDirection::LowerLeft => write!(f, "lower-left"),
            HexDirection::LowerRight => write!(f, "lower-right"),
        }
    }
}

fn tan_60() -> f64 {
    60f64.to_radians().tan()
}

/// Edge length of a hexagon one cell unit wide.
pub fn edge_length() -> f64 {
    1.0 / tan_60()
}

/// How much closer together consecutive rows sit than on a square lattice.
pub fn row_packing() -> f64 {
    1.0 - tan_60() / 2.0
}

/// Hexagon edges in [`Direction::ALL`] order, inside the box `[0, 1] x [0, 2 * edge]`.
fn walls() -> Box<[Wall]> {
    let r = edge_length();
    let top = Point::new(0.5, 0.0);
    let upper_right = Point::new(1.0, r / 2.0);
    let lower_right = Point::new(1.0, 1.5 * r);
    let bottom = Point::new(0.5, 2.0 * r);
    let lower_left = Point::new(0.0, 1.5 * r);
    let upper_left = Point::new(0.0, r / 2.0);
    Box::new([
        [upper_left, lower_left],
        [upper_right, lower_right],
        [upper_left, top],
        [top, upper_right],
        [bottom, lower_left],
        [lower_right, bottom],
    ])
}

/// Build a hex lattice. Start is the first cell of the top row and finish the last cell of the
/// bottom row.
pub fn build(width: u32, height: u32) -> Result<Grid<HexDirection>> {
    let packing = row_packing();
    let grid = Grid::from_lattice(
        width,
        height,
        |_, y| {
            let shift = if y % 2 == 1 { 0.5 } else { 0.0 };
            Point::new(shift, -(y as f64) * packing)
        },
        |x, y, direction| {
            let (x, y) = (x as i64, y as i64);
            // Diagonal neighbours of odd rows sit one column further right
            let odd = y % 2;
            Some(match direction {
                HexDirection::Left => (x - 1, y),
                HexDirection::Right => (x + 1, y),
                HexDirection::UpperLeft => (x - 1 + odd, y - 1),
                HexDirection::UpperRight => (x + odd, y - 1),
                HexDirection::LowerLeft => (x - 1 + odd, y + 1),
                HexDirection::LowerRight => (x + odd, y + 1),
            })
        },
        walls(),
        Point::new(0.5, edge_length()),
    )?;
    tracing::debug!("Built {}x{} hex grid", width, height);
    Ok(grid)
}
