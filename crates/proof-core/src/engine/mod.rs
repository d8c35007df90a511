//! Orquestador del pipeline.
//!
//! Provee el motor single-shot, su builder y el reporte de corrida.

pub mod builder;
pub mod core;

pub use builder::ProofEngineBuilder;
pub use core::{ProofEngine, RunReport};
