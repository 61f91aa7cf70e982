use thiserror::Error;

use crate::grid::Position;

/// Crate error type
///
/// Every fallible operation here fails at construction time; nothing fails
/// transiently, so there is no retry story. Out-of-range cell access is a
/// programming error and asserts instead of returning a variant.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The interior of the grid cannot host the required number of holes
    /// without touching the start, finish, or another hole.
    #[error("grid size {grid_size} cannot fit {holes} holes strictly inside its border")]
    InvalidConfiguration { grid_size: usize, holes: usize },

    /// Rejection sampling for hole placement hit its draw cap. Not expected
    /// for any grid size that passes the configuration check.
    #[error("hole placement did not settle after {attempts} draws (last draw {last_draw:?})")]
    PlacementExhausted { attempts: usize, last_draw: Position },

    /// Decay endpoints move against the sign of the rate.
    #[error("`vi - vf` must have the same sign as `rate` (rate={rate}, vi={vi}, vf={vf})")]
    InvalidDecay { rate: f64, vi: f64, vf: f64 },
}
