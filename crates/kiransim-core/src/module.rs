//! # Module Lifecycle
//!
//! Contract between the host pipeline and a processing module.
//!
//! ## Lifecycle
//! 1. `init` — once, before any event: bind arrays, compile formulas.
//!    Fallible; any error is fatal and no event is processed.
//! 2. `process` — once per event, sequential and run-to-completion.
//!    Infallible: empty collections and degenerate momenta are ordinary
//!    inputs, not errors.
//! 3. `finish` — once, after the last event. Default no-op.
//!
//! A module keeps no per-event state; whatever it accumulates during
//! `process` is re-initialized on the next call. The host guarantees
//! exclusive access to the store, factory and uniform source for the
//! duration of each call.

use crate::factory::CandidateFactory;
use crate::formula::{FormulaCompiler, FormulaError};
use crate::random::UniformSource;
use crate::store::{EventStore, StoreError};
use kiransim_models::SelectionRecord;

/// Errors raised during module setup. Fatal: the host reports them and
/// processes no events; there is no degraded mode.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

/// Services available during `Module::init`.
pub struct SetupContext<'a> {
    /// Array binding.
    pub store: &'a mut EventStore,
    /// Efficiency-expression binding.
    pub compiler: &'a dyn FormulaCompiler,
}

/// Services available during `Module::process`.
///
/// The uniform source is lent exclusively for the duration of the call;
/// modules draw from it in their documented iteration order. The observer
/// receives every selection decision; hosts that do not record traces pass
/// a `NullSelectionObserver`.
pub struct EventContext<'a> {
    pub store: &'a mut EventStore,
    pub factory: &'a mut CandidateFactory,
    pub rng: &'a mut dyn UniformSource,
    pub observer: &'a mut dyn SelectionObserver,
}

/// A per-event processing step in the pipeline.
pub trait Module {
    /// Bind arrays and compile configuration, once, before any event.
    fn init(&mut self, ctx: &mut SetupContext<'_>) -> Result<(), SetupError>;

    /// Process the current event's collections.
    fn process(&mut self, ctx: &mut EventContext<'_>);

    /// End-of-run hook.
    fn finish(&mut self) {}

    /// Identifier used in log output.
    fn name(&self) -> &str;
}

/// Hook receiving every selection decision a module makes.
///
/// Called once per candidate examined, in examination order. Implementors
/// must not influence the selection; the hook exists for trace recording
/// and diagnostics.
pub trait SelectionObserver {
    fn on_selection(&mut self, record: &SelectionRecord);
}

/// Observer that discards every record.
#[derive(Debug, Default)]
pub struct NullSelectionObserver;

impl SelectionObserver for NullSelectionObserver {
    fn on_selection(&mut self, _record: &SelectionRecord) {}
}
