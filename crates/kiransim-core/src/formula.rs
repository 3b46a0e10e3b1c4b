//! # Efficiency Formulas
//!
//! The selection-efficiency seam.
//!
//! Modules are configured with expression strings over the kinematic
//! variables `pt` and `eta`; at setup each string is bound — through the
//! host's `FormulaCompiler` — to an `Efficiency` evaluator returning an
//! acceptance probability. Binding failure is a fatal configuration error
//! surfaced before any event is processed.
//!
//! Expression parsing is not this crate's business: `FormulaTable`, the
//! in-tree compiler, resolves expression strings against functions the host
//! registered under those exact strings. An unregistered expression fails
//! `compile`, preserving the fatal-at-setup contract.

use std::collections::HashMap;
use std::sync::Arc;

/// Acceptance-probability evaluator over `(pt, eta)`.
///
/// Outputs are compared against uniform draws in `[0, 1)`; values outside
/// `[0, 1]` are not clamped and degenerate to always/never accept.
pub trait Efficiency: Send + Sync {
    fn eval(&self, pt: f64, eta: f64) -> f64;
}

impl<F> Efficiency for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn eval(&self, pt: f64, eta: f64) -> f64 {
        self(pt, eta)
    }
}

impl std::fmt::Debug for dyn Efficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Efficiency")
    }
}

/// Errors raised while binding an efficiency expression.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormulaError {
    #[error("failed to compile selection formula {expr:?}: {reason}")]
    Compile { expr: String, reason: String },
}

/// Host seam turning expression strings into evaluators at setup time.
pub trait FormulaCompiler {
    /// Bind one expression string to an evaluator.
    ///
    /// # Errors
    /// `FormulaError::Compile` if the expression cannot be bound; the
    /// caller treats this as fatal and processes no events.
    fn compile(&self, expr: &str) -> Result<Arc<dyn Efficiency>, FormulaError>;
}

/// Lookup-table compiler: expression strings resolve to registered
/// functions.
///
/// The table is the host's catalogue of known efficiency parameterizations,
/// keyed by the exact configuration string.
#[derive(Default)]
pub struct FormulaTable {
    entries: HashMap<String, Arc<dyn Efficiency>>,
}

impl FormulaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluator under an expression string, replacing any
    /// previous entry. Returns `self` for chained setup.
    pub fn register<E>(mut self, expr: &str, efficiency: E) -> Self
    where
        E: Efficiency + 'static,
    {
        self.entries.insert(expr.to_string(), Arc::new(efficiency));
        self
    }

    /// Number of registered expressions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FormulaCompiler for FormulaTable {
    fn compile(&self, expr: &str) -> Result<Arc<dyn Efficiency>, FormulaError> {
        self.entries
            .get(expr)
            .cloned()
            .ok_or_else(|| FormulaError::Compile {
                expr: expr.to_string(),
                reason: "expression not registered with the formula table".to_string(),
            })
    }
}
