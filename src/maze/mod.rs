mod config;
mod event;

use std::{collections::VecDeque, sync::mpsc::Sender};

pub use config::{BacktrackPolicy, MazeConfig};
pub use event::{CarveEvent, StepOutcome};

use crate::{
    error::Result,
    grid::{Direction, Grid, HexDirection, Move, SquareDirection, hex, square},
    rng::Mulberry32,
};

/// A move that is possible from the current cell right now.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate<D> {
    mv: Move<D>,
    /// Cell straddled by a bridge
    over: Option<usize>,
    to: usize,
}

/// Growing-tree maze generator over a [`Grid`].
///
/// Each [`Maze::step`] carves exactly one passage, folding any dead-end backtracking into the
/// same call. The maze owns its grid and its random stream, so two mazes built from the same
/// grid shape and [`MazeConfig`] (with a seed) carve identically.
#[derive(Debug, Clone)]
pub struct Maze<D: Direction> {
    grid: Grid<D>,
    /// Cells on the growth path that may still have room to grow. Never holds `current`.
    open_cells: VecDeque<usize>,
    current: usize,
    /// Heading of the last carve, cleared on backtrack
    last_direction: Option<D>,
    bridge_chance: f64,
    turning_probability: f64,
    policy: BacktrackPolicy,
    rng: Mulberry32,
    complete: bool,
    carve_count: usize,
    bridge_count: usize,
    /// Observer of carve events, e.g. an animating renderer
    sender: Option<Sender<CarveEvent<D>>>,
}

impl Maze<SquareDirection> {
    /// Creates a maze over a fresh `width` x `height` square grid.
    pub fn square(width: u32, height: u32, config: &MazeConfig) -> Result<Self> {
        Maze::new(square::build(width, height)?, config)
    }
}

impl Maze<HexDirection> {
    /// Creates a maze over a fresh `width` x `height` hex grid.
    pub fn hex(width: u32, height: u32, config: &MazeConfig) -> Result<Self> {
        Maze::new(hex::build(width, height)?, config)
    }
}

impl<D: Direction> Maze<D> {
    /// Creates a maze over `grid`, starting at the grid's start cell.
    pub fn new(grid: Grid<D>, config: &MazeConfig) -> Result<Self> {
        config.validate()?;
        let rng = Mulberry32::from_seed_or_entropy(config.seed);
        tracing::info!(
            "Created {}x{} maze with seed {}, bridge chance {}, turning probability {}, policy {}",
            grid.width(),
            grid.height(),
            rng.seed(),
            config.bridge_chance,
            config.turning_probability,
            config.policy
        );
        Ok(Maze {
            current: grid.start(),
            grid,
            open_cells: VecDeque::new(),
            last_direction: None,
            bridge_chance: config.bridge_chance,
            turning_probability: config.turning_probability,
            policy: config.policy,
            rng,
            complete: false,
            carve_count: 0,
            bridge_count: 0,
            sender: None,
        })
    }

    /// Stream every carve and backtrack to `sender` as it happens.
    pub fn with_event_sender(mut self, sender: Sender<CarveEvent<D>>) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn grid(&self) -> &Grid<D> {
        &self.grid
    }

    /// The seed in use, including one drawn from entropy.
    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn open_cells(&self) -> &VecDeque<usize> {
        &self.open_cells
    }

    pub fn last_direction(&self) -> Option<D> {
        self.last_direction
    }

    pub fn policy(&self) -> BacktrackPolicy {
        self.policy
    }

    /// True once every reachable cell is part of the tree and no open cells remain.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn carve_count(&self) -> usize {
        self.carve_count
    }

    pub fn bridge_count(&self) -> usize {
        self.bridge_count
    }

    fn emit(&self, event: CarveEvent<D>) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }

    /// Every move the current cell could make, with bridges not yet subjected to chance.
    fn options(&self) -> Vec<Candidate<D>> {
        let from = self.grid.cell(self.current);
        D::ALL
            .iter()
            .filter(|&&d| !from.is_connected(d))
            .filter_map(|&d| {
                let over = from.neighbour(d)?;
                let neighbour = self.grid.cell(over);
                if !neighbour.is_visited() {
                    return Some(Candidate {
                        mv: Move::Step(d),
                        over: None,
                        to: over,
                    });
                }
                let to = neighbour.neighbour(d)?;
                let beyond = self.grid.cell(to);
                let free = !beyond.is_visited()
                    && !from.is_under_bridge()
                    && !neighbour.is_under_bridge()
                    && !beyond.is_under_bridge();
                free.then_some(Candidate {
                    mv: Move::Bridge(d, d),
                    over: Some(over),
                    to,
                })
            })
            .collect()
    }

    /// Candidate moves for this step. Each possible bridge costs one draw; when any bridge
    /// survives its draw, plain steps are dropped.
    fn candidates(&mut self) -> Vec<Candidate<D>> {
        let mut steps = Vec::new();
        let mut bridges = Vec::new();
        for candidate in self.options() {
            if !candidate.mv.is_bridge() {
                steps.push(candidate);
            } else if self.rng.next_f64() < self.bridge_chance {
                bridges.push(candidate);
            }
        }
        if bridges.is_empty() { steps } else { bridges }
    }

    /// Pick one of the non-empty `candidates`, favouring the current heading.
    fn choose(&mut self, candidates: &[Candidate<D>]) -> Candidate<D> {
        let straight = self.last_direction.and_then(|last| {
            candidates
                .iter()
                .copied()
                .find(|c| c.mv.direction() == last)
        });
        if let Some(candidate) = straight {
            if self.rng.next_f64() > self.turning_probability {
                return candidate;
            }
        }
        let pool = match straight {
            Some(s) if candidates.len() >= 2 => candidates
                .iter()
                .copied()
                .filter(|&c| c != s)
                .collect::<Vec<_>>(),
            _ => candidates.to_vec(),
        };
        pool[self.rng.next_index(pool.len())]
    }

    fn carve(&mut self, candidate: Candidate<D>) -> CarveEvent<D> {
        let from = self.current;
        let Candidate { mv, over, to } = candidate;
        let direction = mv.direction();

        self.grid.cell_mut(from).connections_out.push(mv);
        let target = self.grid.cell_mut(to);
        target.connections_in.push(mv.reversed());
        target.parent = Some(from);
        target.bridge_to_parent = over.is_some();

        let event = match over {
            Some(over) => {
                for idx in [from, over, to] {
                    self.grid.cell_mut(idx).under_bridge = true;
                }
                self.bridge_count += 1;
                tracing::debug!("Bridge {} from {} over {} to {}", direction, from, over, to);
                CarveEvent::Bridge {
                    from,
                    over,
                    to,
                    direction,
                }
            }
            None => {
                tracing::debug!("Step {} from {} to {}", direction, from, to);
                CarveEvent::Step {
                    from,
                    to,
                    direction,
                }
            }
        };

        self.open_cells.push_back(from);
        self.current = to;
        self.last_direction = Some(direction);
        self.carve_count += 1;
        self.emit(event);
        event
    }

    /// Resume from the open cell chosen by the policy.
    /// Returns false when no open cells remain.
    fn backtrack(&mut self) -> bool {
        let from = self.current;
        self.last_direction = None;
        debug_assert!(!self.open_cells.contains(&from));

        let Some(next) = self
            .policy
            .select(self.open_cells.len(), &mut self.rng)
            .and_then(|idx| self.open_cells.remove(idx))
        else {
            return false;
        };
        self.current = next;
        tracing::debug!("Backtrack from {} to {}", from, next);
        self.emit(CarveEvent::Backtrack { from, to: next });
        true
    }

    fn finish_generation(&mut self) {
        self.complete = true;
        self.current = self.grid.start();
        tracing::info!(
            "Maze complete after {} carves ({} bridges)",
            self.carve_count,
            self.bridge_count
        );
        self.emit(CarveEvent::Complete);
    }

    /// Carve the next passage, backtracking first as many times as needed.
    ///
    /// Returns [`StepOutcome::Complete`] without touching any state once generation is done.
    pub fn step(&mut self) -> StepOutcome<D> {
        if self.complete {
            return StepOutcome::Complete;
        }
        // Every pass carves or retires one open cell, so this runs at most once per cell
        loop {
            let candidates = self.candidates();
            if candidates.is_empty() || self.current == self.grid.finish() {
                if !self.backtrack() {
                    self.finish_generation();
                    return StepOutcome::Complete;
                }
                continue;
            }
            let candidate = self.choose(&candidates);
            return StepOutcome::Carved(self.carve(candidate));
        }
    }

    /// Step until complete. Returns the total number of passages carved.
    pub fn run(&mut self) -> usize {
        while let StepOutcome::Carved(_) = self.step() {}
        self.carve_count
    }

    /// Tree path from the current cell (the finish cell once complete) back to start, inclusive.
    pub fn solution(&self) -> Vec<usize> {
        let mut cell = if self.complete {
            self.grid.finish()
        } else {
            self.current
        };
        let mut path = vec![cell];
        while let Some(parent) = self.grid.cell(cell).parent() {
            path.push(parent);
            cell = parent;
        }
        path
    }
}
