//! Persona Politics - Political Term Simulation Engine

pub mod core;
pub mod heuristics;
pub mod llm;
pub mod persistence;
pub mod policy;
pub mod rules;
pub mod scoring;
pub mod state;
