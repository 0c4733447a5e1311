//! Static rule data: the stat effect table and world event triggers

pub mod effects;
pub mod world_events;

pub use effects::PolicyEffectTable;
pub use world_events::{generate_world_event, EventDraft, EventKind, EventRule, EVENT_RULES};
