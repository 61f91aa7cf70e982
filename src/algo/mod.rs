pub mod q_grid;

pub use q_grid::{PositionUpdate, QGridAgent, QGridAgentConfig};
