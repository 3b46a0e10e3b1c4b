//! # KiranSim Core
//!
//! Framework seams for the KiranSim fast-simulation pipeline.
//!
//! Processing modules are stateless-per-event filters hosted by a
//! surrounding framework. This crate provides that framework's contracts
//! and their in-tree implementations:
//!
//! - `EventStore` — named, ordered candidate arrays with setup-time binding
//! - `CandidateFactory` — creation of output candidates
//! - `UniformSource` / `SeededUniform` — explicit, seedable uniform
//!   randomness (no process-global generator)
//! - `Efficiency` / `FormulaCompiler` / `FormulaTable` — the selection
//!   efficiency seam; expression strings are bound at setup, evaluated as
//!   `f(pt, eta)` per candidate
//! - `Module` + `SetupContext` / `EventContext` — the two-phase module
//!   lifecycle: fallible setup, infallible per-event processing
//! - `SelectionObserver` — optional per-decision hook used for trace
//!   recording and diagnostics
//! - `load_toml` / `init_tracing` — configuration and logging plumbing
//!
//! ## Determinism
//!
//! Every source of nondeterminism is injected: modules receive the uniform
//! source through `EventContext` and must consume draws in a documented,
//! fixed order. Re-running a module over the same inputs with the same seed
//! reproduces its output bit-for-bit.

pub mod config;
pub mod factory;
pub mod formula;
pub mod logging;
pub mod module;
pub mod random;
pub mod store;

pub use config::{load_toml, load_toml_file, ConfigError};
pub use factory::CandidateFactory;
pub use formula::{Efficiency, FormulaCompiler, FormulaError, FormulaTable};
pub use logging::init_tracing;
pub use module::{
    EventContext, Module, NullSelectionObserver, SelectionObserver, SetupContext, SetupError,
};
pub use random::{SeededUniform, UniformSource};
pub use store::{ArrayId, EventStore, StoreError};
