/// Q-learning agent and its fused train-and-step loop
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Grid world environment and per-cell value storage
pub mod grid;

/// Run metric tracking
pub mod report;

mod util;

pub use error::Error;
