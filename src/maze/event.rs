/// A change to the generation state, streamed to an optional observer as it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveEvent<D> {
    /// Passage carved to an adjacent cell
    Step { from: usize, to: usize, direction: D },
    /// Passage carved over `over` to the cell beyond it
    Bridge {
        from: usize,
        over: usize,
        to: usize,
        direction: D,
    },
    /// Growth resumed from an open cell after a dead end
    Backtrack { from: usize, to: usize },
    /// No open cells remain
    Complete,
}

/// Result of one call to [`super::Maze::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome<D> {
    /// A passage was carved; the event describes it
    Carved(CarveEvent<D>),
    /// Generation is finished. Further steps do nothing.
    Complete,
}
