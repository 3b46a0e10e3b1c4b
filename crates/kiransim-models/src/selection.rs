//! # Selection Records
//!
//! The per-candidate decision record emitted by efficiency-selection
//! modules. One record is produced for every candidate *examined* —
//! accepted or not — in examination order, which makes the record sequence
//! a complete account of both the kinematic inputs and the random draws an
//! event consumed. Replay-parity verification hashes these sequences
//! (`kiransim-trace`).

use crate::candidate::Category;
use serde::{Deserialize, Serialize};

/// One efficiency-selection decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Category of the examined candidate.
    pub category: Category,
    /// Transverse momentum fed to the efficiency formula.
    pub pt: f64,
    /// Pseudorapidity fed to the efficiency formula.
    pub eta: f64,
    /// Uniform draw in [0, 1) consumed for this candidate.
    pub draw: f64,
    /// Efficiency formula output; values outside [0, 1] degenerate to
    /// always/never accept and are recorded as returned.
    pub probability: f64,
    /// Whether the candidate's momentum entered the accumulator.
    pub accepted: bool,
}
