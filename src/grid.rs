use log::debug;
use rand::{thread_rng, Rng};
use strum::VariantArray;

use crate::Error;

/// Sentinel floor for greedy-max scans over neighboring Q-values
const Q_FLOOR: f64 = -1000.0;

/// Cap on rejection-sampling draws during hole placement
const MAX_PLACEMENT_DRAWS: usize = 100_000;

/// A cell coordinate, zero-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The fixed start corner of every grid
    pub const START: Self = Self { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A move the agent can attempt from a cell
///
/// Variant order is the enumeration order everywhere actions are scanned,
/// including argmax tie breaks, so traces stay reproducible.
#[derive(VariantArray, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Left,
    Down,
    Right,
}

/// What a cell currently is, exactly one tag per cell
///
/// `Start` doubles as the occupant marker: it moves with the agent, and the
/// cell it vacates reverts to a remembered underlying kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Start,
    Finish,
    Hole,
    Idle,
}

impl CellKind {
    /// Fixed reward assigned when a kind is stamped onto a cell
    pub const fn reward(self) -> i32 {
        match self {
            CellKind::Start => -10,
            CellKind::Finish => 1000,
            CellKind::Hole => -1000,
            CellKind::Idle => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    kind: CellKind,
    /// Kind to revert to when the occupant marker leaves this cell
    restore: CellKind,
    reward: i32,
    q: f64,
}

impl Cell {
    fn idle() -> Self {
        Self {
            kind: CellKind::Idle,
            restore: CellKind::Idle,
            reward: CellKind::Idle.reward(),
            q: 0.0,
        }
    }

    fn stamp(&mut self, kind: CellKind) {
        self.kind = kind;
        self.restore = kind;
        self.reward = kind.reward();
    }
}

/// Per-cell view handed to renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSnapshot {
    pub kind: CellKind,
    pub reward: i32,
    pub q_value: f64,
}

/// Full-grid view for an initial render
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    size: usize,
    cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, pos: Position) -> &CellSnapshot {
        &self.cells[pos.row * self.size + pos.col]
    }

    /// Iterate cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &CellSnapshot)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Position::new(i / size, i % size), c))
    }
}

/// A square grid of cells with a fixed start, a fixed finish, and randomly
/// placed holes, owning the reward table and the learned Q-value per cell
///
/// The top-left cell is always `Start`, the bottom-right is always `Finish`,
/// and `size/2 + 1` holes land strictly inside the border ring.
#[derive(Debug)]
pub struct GridWorld {
    size: usize,
    cells: Vec<Cell>,
}

impl GridWorld {
    /// Build a grid of `size × size` cells with holes drawn from the thread RNG
    pub fn new(size: usize) -> Result<Self, Error> {
        Self::with_rng(size, &mut thread_rng())
    }

    /// Build a grid with a caller-supplied RNG for reproducible layouts
    pub fn with_rng<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, Error> {
        let holes = size / 2 + 1;

        // Holes draw from [min, max) on both axes. A 4-grid has only a 2x2
        // interior, so its draw range runs one cell closer to the border.
        let min = 1;
        let max = if size == 4 { size - 1 } else { size.saturating_sub(2) };
        if max <= min || (max - min) * (max - min) < holes {
            return Err(Error::InvalidConfiguration {
                grid_size: size,
                holes,
            });
        }

        let mut grid = Self {
            size,
            cells: vec![Cell::idle(); size * size],
        };

        grid.cell_mut(Position::START).stamp(CellKind::Start);
        // The start corner reverts to idle once the agent moves off it
        grid.cell_mut(Position::START).restore = CellKind::Idle;
        grid.cell_mut(Position::new(size - 1, size - 1))
            .stamp(CellKind::Finish);

        let mut placed = 0;
        let mut draws = 0;
        while placed < holes {
            let pos = Position::new(rng.gen_range(min..max), rng.gen_range(min..max));
            draws += 1;
            if draws > MAX_PLACEMENT_DRAWS {
                return Err(Error::PlacementExhausted {
                    attempts: draws,
                    last_draw: pos,
                });
            }
            let cell = grid.cell_mut(pos);
            if matches!(cell.kind, CellKind::Start | CellKind::Finish | CellKind::Hole) {
                continue;
            }
            cell.stamp(CellKind::Hole);
            placed += 1;
        }
        debug!("placed {placed} holes on a {size}x{size} grid in {draws} draws");

        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn cell(&self, pos: Position) -> &Cell {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "position ({}, {}) is outside the {}x{} grid",
            pos.row,
            pos.col,
            self.size,
            self.size,
        );
        &self.cells[pos.row * self.size + pos.col]
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "position ({}, {}) is outside the {}x{} grid",
            pos.row,
            pos.col,
            self.size,
            self.size,
        );
        &mut self.cells[pos.row * self.size + pos.col]
    }

    /// Moves from `pos` that stay in bounds, in fixed enumeration order
    pub fn legal_actions(&self, pos: Position) -> Vec<Action> {
        Action::VARIANTS
            .iter()
            .copied()
            .filter(|&a| match a {
                Action::Up => pos.row > 0,
                Action::Left => pos.col > 0,
                Action::Down => pos.row < self.size - 1,
                Action::Right => pos.col < self.size - 1,
            })
            .collect()
    }

    /// Apply `action` to `pos`, clipping at the border
    ///
    /// An out-of-bounds attempt is a no-op on that axis, not an error.
    pub fn step(&self, pos: Position, action: Action) -> Position {
        let mut next = pos;
        match action {
            Action::Up if next.row > 0 => next.row -= 1,
            Action::Left if next.col > 0 => next.col -= 1,
            Action::Down if next.row < self.size - 1 => next.row += 1,
            Action::Right if next.col < self.size - 1 => next.col += 1,
            _ => {}
        }
        next
    }

    pub fn kind(&self, pos: Position) -> CellKind {
        self.cell(pos).kind
    }

    pub fn reward(&self, pos: Position) -> i32 {
        self.cell(pos).reward
    }

    pub fn q_value(&self, pos: Position) -> f64 {
        self.cell(pos).q
    }

    pub fn set_q_value(&mut self, pos: Position, value: f64) {
        self.cell_mut(pos).q = value;
    }

    pub fn is_finish(&self, pos: Position) -> bool {
        self.cell(pos).kind == CellKind::Finish
    }

    /// Highest Q-value among the cells reachable from `pos` in one legal move
    pub fn max_neighbor_q(&self, pos: Position) -> f64 {
        let mut max_q = Q_FLOOR;
        for action in self.legal_actions(pos) {
            let value = self.q_value(self.step(pos, action));
            if value > max_q {
                max_q = value;
            }
        }
        max_q
    }

    /// Neighbor of `pos` holding the highest Q-value
    ///
    /// Ties go to the first neighbor encountered in Up, Left, Down, Right
    /// order, which keeps greedy traces reproducible.
    pub fn argmax_neighbor(&self, pos: Position) -> Position {
        let mut max_q = Q_FLOOR;
        let mut best = Position::START;
        for action in self.legal_actions(pos) {
            let neighbor = self.step(pos, action);
            let value = self.q_value(neighbor);
            if value > max_q {
                max_q = value;
                best = neighbor;
            }
        }
        best
    }

    /// Re-tag cells as the occupant marker moves from `from` to `to`
    ///
    /// `from` reverts to its remembered kind (a remembered `Start` reverts
    /// to `Idle`) and `to` becomes the new `Start`, with its prior kind
    /// remembered for the next move. Rewards and Q-values are untouched.
    pub fn move_occupant(&mut self, from: Position, to: Position) {
        let from_cell = self.cell_mut(from);
        let reverted = match from_cell.restore {
            CellKind::Start => CellKind::Idle,
            kind => kind,
        };
        from_cell.kind = reverted;
        from_cell.restore = reverted;

        let to_cell = self.cell_mut(to);
        if to_cell.kind != CellKind::Start {
            to_cell.restore = to_cell.kind;
        }
        to_cell.kind = CellKind::Start;
    }

    /// Freeze the current grid state for rendering
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.size,
            cells: self
                .cells
                .iter()
                .map(|c| CellSnapshot {
                    kind: c.kind,
                    reward: c.reward,
                    q_value: c.q,
                })
                .collect(),
        }
    }
}
