//! # KiranSim Models
//!
//! Shared data model for the KiranSim fast-simulation pipeline.
//!
//! This crate provides:
//! - `FourMomentum` / `Position` — Lorentz four-vectors for momentum and
//!   spacetime coordinates
//! - `Candidate` — a reconstructed physics object as stored in event arrays
//! - `Category` — the reconstructed-object categories with their fixed
//!   processing order
//! - `SelectionRecord` — the per-candidate decision record emitted by
//!   selection modules, the unit of replay-parity verification
//!
//! All types are plain data with serde derives; behavior lives in the
//! framework (`kiransim-core`) and module crates.

pub mod candidate;
pub mod momentum;
pub mod selection;

pub use candidate::{Candidate, Category};
pub use momentum::{FourMomentum, Position};
pub use selection::SelectionRecord;
