use log::{info, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    assert_interval, decay,
    exploration::{Choice, EpsilonGreedy},
    grid::{GridWorld, Position},
    report::Report,
};

/// Configuration for the [`QGridAgent`]
pub struct QGridAgentConfig {
    pub exploration: EpsilonGreedy<decay::Exponential>,
    pub alpha: f64,
    pub gamma: f64,
    /// Synthetic training episodes run inside every visible step
    pub episodes_per_step: u32,
}

impl Default for QGridAgentConfig {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(decay::Exponential::new(0.0005, 1.0, 0.05).unwrap()),
            alpha: 0.2,
            gamma: 0.7,
            episodes_per_step: 10_000,
        }
    }
}

/// The two cells a renderer must repaint after a step, and whether the
/// agent landed on the goal (in which case it has been reset to the start)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    pub from: Position,
    pub to: Position,
    pub reached_goal: bool,
}

/// A tabular Q-learning agent that navigates a [`GridWorld`] one visible
/// cell per step, retraining its value table before every move
///
/// Training and navigation are fused: each [`step`](Self::step) runs a full
/// batch of synthetic episodes from the agent's current cell, then commits
/// the greedy move under the freshly trained table. There is no episode
/// concept outside that inner batch.
pub struct QGridAgent {
    grid: GridWorld,
    exploration: EpsilonGreedy<decay::Exponential>,
    alpha: f64,   // learning rate
    gamma: f64,   // discount factor
    episodes_per_step: u32,
    position: Position,
    rng: StdRng,
    pub report: Report,
}

impl QGridAgent {
    /// Initialize an agent at the start corner of `grid`
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(grid: GridWorld, config: QGridAgentConfig) -> Self {
        Self::with_rng(grid, config, StdRng::from_entropy())
    }

    /// Initialize with a caller-supplied RNG for reproducible runs
    pub fn with_rng(grid: GridWorld, config: QGridAgentConfig, rng: StdRng) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Self {
            grid,
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            episodes_per_step: config.episodes_per_step,
            position: Position::START,
            rng,
            report: Report::new(vec!["steps", "goals"]),
        }
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    /// Where the agent currently stands
    pub fn position(&self) -> Position {
        self.position
    }

    /// Run one batch of synthetic episodes from the agent's cell and return
    /// the greedy move under the final table
    ///
    /// Every episode clones the agent's position into a working cursor and
    /// walks it one move per legal action of the episode's starting cell.
    /// The action list is deliberately not refreshed as the cursor advances,
    /// and the explore branch reuses the action the outer loop is currently
    /// iterating rather than drawing a fresh one (preserved as-is from the
    /// reference behavior; see DESIGN.md).
    fn train(&mut self) -> Position {
        for episode in 0..self.episodes_per_step {
            let mut cursor = self.position;
            for action in self.grid.legal_actions(cursor) {
                let next = match self.exploration.choose(&mut self.rng, episode) {
                    Choice::Exploit => self.grid.argmax_neighbor(cursor),
                    Choice::Explore => self.grid.step(cursor, action),
                };

                let next_q = self.grid.q_value(next);
                let max_q = self.grid.max_neighbor_q(next);
                let reward = self.grid.reward(next) as f64;

                // Bellman update: Q(s) <- Q(s) + a * (r + g * max Q(s') - Q(s))
                let updated = next_q + self.alpha * (reward + self.gamma * max_q - next_q);
                self.grid.set_q_value(next, updated);

                cursor = next;
            }
        }
        self.grid.argmax_neighbor(self.position)
    }

    /// Advance the agent one visible cell
    ///
    /// Retrains the table, commits the greedy move, and re-tags the grid so
    /// a renderer only has to repaint the two returned cells. Landing on
    /// the goal resets the agent to the start corner.
    pub fn step(&mut self) -> PositionUpdate {
        let from = self.position;
        let to = self.train();

        // The occupant re-tag would hide the finish marker, so check first.
        let reached_goal = self.grid.is_finish(to);

        self.grid.move_occupant(from, to);
        self.position = to;
        self.report.add("steps", 1.0);
        trace!(
            "agent moved ({}, {}) -> ({}, {})",
            from.row,
            from.col,
            to.row,
            to.col
        );

        if reached_goal {
            self.position = Position::START;
            self.grid.move_occupant(to, Position::START);
            self.report.add("goals", 1.0);
            info!("agent reached the goal, resetting to the start corner");
        }

        PositionUpdate {
            from,
            to,
            reached_goal,
        }
    }
}
