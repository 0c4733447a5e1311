pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::SimulationConfig;
pub use error::{PoliticsError, Result};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
