//! Policy cards and their resolution

pub mod catalog;
pub mod deck;
pub mod pipeline;

pub use catalog::{PolicyCard, PolicyCatalog, PolicyCategory, INITIAL_HAND};
pub use deck::PolicyDeck;
pub use pipeline::{PendingResolution, ResolutionReport};
