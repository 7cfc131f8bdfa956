use super::{Direction, Move, Point};

/// One lattice cell and its carved connectivity.
///
/// Neighbours and the tree parent are indices into the owning [`super::Grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<D> {
    pub x: u32,
    pub y: u32,
    /// Render-only displacement from `(x, y)`, in cell units
    pub(crate) offset: Point,
    /// Neighbour index per direction, indexed by [`Direction::index`]. Fixed after the grid is built.
    pub(crate) neighbours: Box<[Option<usize>]>,
    /// Passages carved outward from this cell, in carve order
    pub(crate) connections_out: Vec<Move<D>>,
    /// Passages carved into this cell by other cells, seen from this cell
    pub(crate) connections_in: Vec<Move<D>>,
    /// Whether this cell is one of the three cells of a bridge
    pub(crate) under_bridge: bool,
    /// Cell this one was first reached from
    pub(crate) parent: Option<usize>,
    pub(crate) bridge_to_parent: bool,
}

impl<D: Direction> Cell<D> {
    pub(crate) fn new(x: u32, y: u32, offset: Point, num_directions: usize) -> Self {
        Cell {
            x,
            y,
            offset,
            neighbours: vec![None; num_directions].into_boxed_slice(),
            connections_out: Vec::new(),
            connections_in: Vec::new(),
            under_bridge: false,
            parent: None,
            bridge_to_parent: false,
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn neighbour(&self, direction: D) -> Option<usize> {
        self.neighbours[direction.index()]
    }

    pub fn connections_out(&self) -> &[Move<D>] {
        &self.connections_out
    }

    pub fn connections_in(&self) -> &[Move<D>] {
        &self.connections_in
    }

    pub fn is_under_bridge(&self) -> bool {
        self.under_bridge
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_bridge_to_parent(&self) -> bool {
        self.bridge_to_parent
    }

    /// A cell is visited once any passage touches it.
    pub fn is_visited(&self) -> bool {
        !self.connections_out.is_empty() || !self.connections_in.is_empty()
    }

    /// Whether a passage (step or bridge) already leaves or enters this cell in `direction`.
    pub fn is_connected(&self, direction: D) -> bool {
        self.connections_out
            .iter()
            .chain(self.connections_in.iter())
            .any(|m| m.direction() == direction)
    }

    /// Whether a plain step opens the wall on the `direction` side.
    ///
    /// Bridges leave the wall standing, the overpass is drawn across it.
    pub fn is_open(&self, direction: D) -> bool {
        self.connections_out
            .iter()
            .chain(self.connections_in.iter())
            .any(|&m| m == Move::Step(direction))
    }
}
