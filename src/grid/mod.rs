pub mod cell;
pub mod hex;
pub mod square;

use std::{fmt, hash::Hash};

use crate::error::{MazeError, Result};

pub use cell::Cell;
pub use hex::HexDirection;
pub use square::SquareDirection;

/// An edge-adjacency label of one lattice topology.
pub trait Direction: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    /// Every direction of the topology, in the order candidates are enumerated.
    const ALL: &'static [Self];
    /// Boundary side of the start cell left open as the maze entrance.
    const ENTRANCE: Self;
    /// Boundary side of the finish cell left open as the maze exit.
    const EXIT: Self;

    /// Position of this direction in [`Direction::ALL`].
    fn index(self) -> usize;

    /// The direction pointing back the way this one came.
    fn reverse(self) -> Self;
}

/// A carved passage leaving (or entering) a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move<D> {
    /// Passage to the adjacent cell
    Step(D),
    /// Passage over the adjacent cell to the cell beyond it
    Bridge(D, D),
}

impl<D: Direction> Move<D> {
    /// The direction the move leaves its origin cell in.
    pub fn direction(self) -> D {
        match self {
            Move::Step(d) | Move::Bridge(d, _) => d,
        }
    }

    /// The same passage seen from its destination.
    pub fn reversed(self) -> Self {
        match self {
            Move::Step(d) => Move::Step(d.reverse()),
            Move::Bridge(first, second) => Move::Bridge(second.reverse(), first.reverse()),
        }
    }

    pub fn is_bridge(self) -> bool {
        matches!(self, Move::Bridge(..))
    }
}

/// Lattice shape of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    #[default]
    Square,
    Hex,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Square => write!(f, "square"),
            Topology::Hex => write!(f, "hex"),
        }
    }
}

impl std::str::FromStr for Topology {
    type Err = MazeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(Topology::Square),
            "hex" | "hexagonal" => Ok(Topology::Hex),
            _ => Err(MazeError::UnknownTopology {
                name: s.to_string(),
            }),
        }
    }
}

/// A point in cell units (grid geometry) or canvas units (draw output).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn scale(self, factor: f64) -> Self {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// Wall segment of one direction, in local cell units.
pub type Wall = [Point; 2];

/// An immutable lattice of cells plus the direction tables of its topology.
///
/// Cells live in one owned arena and refer to each other by index.
#[derive(Debug, Clone)]
pub struct Grid<D: Direction> {
    width: u32,
    height: u32,
    cells: Box<[Cell<D>]>,
    /// Wall geometry indexed by [`Direction::index`]
    walls: Box<[Wall]>,
    /// Local centre of a cell, in cell units
    center: Point,
    start: usize,
    finish: usize,
}

impl<D: Direction> Grid<D> {
    /// Build a `width` x `height` lattice.
    ///
    /// * `offset` - render-only displacement of the cell at `(x, y)`
    /// * `neighbour` - coordinate reached from `(x, y)` in a direction, before bounds checks
    /// * `walls` - wall segment of every direction, in [`Direction::ALL`] order
    ///
    /// Every link is written on both ends, so the neighbour relation is symmetric
    /// whichever side discovers it first.
    pub(crate) fn from_lattice(
        width: u32,
        height: u32,
        offset: impl Fn(u32, u32) -> Point,
        neighbour: impl Fn(u32, u32, D) -> Option<(i64, i64)>,
        walls: Box<[Wall]>,
        center: Point,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::DegenerateGrid { width, height });
        }
        debug_assert_eq!(walls.len(), D::ALL.len());

        let mut cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Cell::new(x, y, offset(x, y), D::ALL.len()))
            .collect::<Vec<_>>();

        let ravel = |x: i64, y: i64| -> Option<usize> {
            (x >= 0 && y >= 0 && x < width as i64 && y < height as i64)
                .then(|| y as usize * width as usize + x as usize)
        };

        for idx in 0..cells.len() {
            let (x, y) = (cells[idx].x, cells[idx].y);
            for &direction in D::ALL {
                let Some(other) = neighbour(x, y, direction).and_then(|(nx, ny)| ravel(nx, ny))
                else {
                    continue;
                };
                cells[idx].neighbours[direction.index()] = Some(other);
                cells[other].neighbours[direction.reverse().index()] = Some(idx);
            }
        }

        let finish = cells.len() - 1;
        Ok(Grid {
            width,
            height,
            cells: cells.into_boxed_slice(),
            walls,
            center,
            start: 0,
            finish,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell<D>] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> &Cell<D> {
        &self.cells[index]
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell<D> {
        &mut self.cells[index]
    }

    /// Index of the cell at `(x, y)`, if it is inside the lattice.
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn finish(&self) -> usize {
        self.finish
    }

    pub fn directions(&self) -> &'static [D] {
        D::ALL
    }

    pub fn reverse(&self, direction: D) -> D {
        direction.reverse()
    }

    pub fn wall(&self, direction: D) -> Wall {
        self.walls[direction.index()]
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn neighbour(&self, index: usize, direction: D) -> Option<usize> {
        self.cells[index].neighbour(direction)
    }

    /// The cell two hops away from `index` in `direction`.
    pub fn two_hops(&self, index: usize, direction: D) -> Option<(usize, usize)> {
        let over = self.neighbour(index, direction)?;
        let to = self.neighbour(over, direction)?;
        Some((over, to))
    }

    /// Cell-unit origin of a cell: its lattice position plus its render offset.
    pub fn origin(&self, index: usize) -> Point {
        let cell = &self.cells[index];
        Point::new(cell.x as f64, cell.y as f64).offset(cell.offset.x, cell.offset.y)
    }

    /// Cell-unit centre of a cell.
    pub fn center_of(&self, index: usize) -> Point {
        self.origin(index).offset(self.center.x, self.center.y)
    }

    /// Size of the box, anchored at the origin, that holds every wall of every cell.
    pub fn extent(&self) -> Point {
        (0..self.cells.len())
            .flat_map(|idx| {
                let origin = self.origin(idx);
                self.walls
                    .iter()
                    .flatten()
                    .map(move |p| origin.offset(p.x, p.y))
            })
            .fold(Point::default(), |acc, p| {
                Point::new(acc.x.max(p.x), acc.y.max(p.y))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_reversed() {
        let step = Move::Step(SquareDirection::Right);
        assert_eq!(step.reversed(), Move::Step(SquareDirection::Left));
        let bridge = Move::Bridge(SquareDirection::Down, SquareDirection::Down);
        assert_eq!(
            bridge.reversed(),
            Move::Bridge(SquareDirection::Up, SquareDirection::Up)
        );
        assert!(bridge.is_bridge());
        assert_eq!(bridge.direction(), SquareDirection::Down);
    }

    #[test]
    fn test_degenerate_grid() {
        assert_eq!(
            square::build(0, 4).unwrap_err(),
            MazeError::DegenerateGrid {
                width: 0,
                height: 4
            }
        );
        assert!(hex::build(3, 0).is_err());
    }

    #[test]
    fn test_index_of() {
        let grid = square::build(4, 3).unwrap();
        assert_eq!(grid.index_of(0, 0), Some(0));
        assert_eq!(grid.index_of(3, 2), Some(11));
        assert_eq!(grid.index_of(4, 0), None);
        assert_eq!(grid.index_of(0, 3), None);
    }

    #[test]
    fn test_two_hops() {
        let grid = square::build(3, 1).unwrap();
        assert_eq!(grid.two_hops(0, SquareDirection::Right), Some((1, 2)));
        assert_eq!(grid.two_hops(1, SquareDirection::Right), None);
    }

    #[test]
    fn test_parse_topology() {
        assert_eq!("square".parse(), Ok(Topology::Square));
        assert_eq!(" Hex ".parse(), Ok(Topology::Hex));
        assert_eq!(
            "triangle".parse::<Topology>(),
            Err(MazeError::UnknownTopology {
                name: "triangle".to_string()
            })
        );
        assert_eq!(Topology::Hex.to_string(), "hex");
    }
}
