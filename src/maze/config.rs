use std::{fmt, str::FromStr};

use crate::{
    error::{MazeError, Result, check_probability},
    rng::Mulberry32,
};

/// Rule that picks which open cell becomes current when the growth path dead-ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BacktrackPolicy {
    /// First cell still open. Long winding corridors.
    #[default]
    Oldest,
    /// Most recently opened cell. Classic recursive backtracker.
    Newest,
    /// Uniformly drawn open cell. Short, bushy branches.
    Random,
}

impl BacktrackPolicy {
    pub const ALL: [BacktrackPolicy; 3] = [
        BacktrackPolicy::Oldest,
        BacktrackPolicy::Newest,
        BacktrackPolicy::Random,
    ];

    /// Position in a sequence of `len` open cells to resume from, or `None` when there is none.
    ///
    /// Only [`BacktrackPolicy::Random`] draws from `rng`.
    pub fn select(self, len: usize, rng: &mut Mulberry32) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match self {
            BacktrackPolicy::Oldest => 0,
            BacktrackPolicy::Newest => len - 1,
            BacktrackPolicy::Random => rng.next_index(len),
        })
    }
}

impl fmt::Display for BacktrackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BacktrackPolicy::Oldest => write!(f, "oldest"),
            BacktrackPolicy::Newest => write!(f, "newest"),
            BacktrackPolicy::Random => write!(f, "random"),
        }
    }
}

impl FromStr for BacktrackPolicy {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oldest" => Ok(BacktrackPolicy::Oldest),
            "newest" => Ok(BacktrackPolicy::Newest),
            "random" => Ok(BacktrackPolicy::Random),
            _ => Err(MazeError::UnknownPolicy {
                name: s.to_string(),
            }),
        }
    }
}

/// Generation parameters. Grid dimensions are given to the grid builders.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    /// Seed of the generation stream. `None` draws one from OS entropy.
    pub seed: Option<u32>,
    /// Chance that an available bridge is offered as a candidate
    pub bridge_chance: f64,
    /// Chance of giving up the current heading when going straight is possible
    pub turning_probability: f64,
    pub policy: BacktrackPolicy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            bridge_chance: 0.3,
            turning_probability: 0.3,
            policy: BacktrackPolicy::Oldest,
        }
    }
}

impl MazeConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bridge_chance(mut self, bridge_chance: f64) -> Self {
        self.bridge_chance = bridge_chance;
        self
    }

    pub fn with_turning_probability(mut self, turning_probability: f64) -> Self {
        self.turning_probability = turning_probability;
        self
    }

    pub fn with_policy(mut self, policy: BacktrackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reject probabilities outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        check_probability("bridge_chance", self.bridge_chance)?;
        check_probability("turning_probability", self.turning_probability)?;
        Ok(())
    }
}
