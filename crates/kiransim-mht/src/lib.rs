//! # MHT Module
//!
//! Missing-transverse-momentum recoil for one collision event.
//!
//! ## Description
//! For each event, the module walks the jet, electron, muon and photon
//! input arrays in that fixed order, subjects every candidate to its
//! category's selection efficiency (one uniform draw per candidate,
//! accepted when `draw <= efficiency(pt, eta)`), and sums the accepted
//! candidates' four-momenta. It then emits exactly one output candidate at
//! the origin whose momentum is that sum with the azimuth rotated by π —
//! the transverse recoil, with the longitudinal component and energy left
//! unchanged.
//!
//! ## Determinism
//! One draw is consumed per candidate *examined*, never per candidate
//! accepted, and always in category-then-collection order. For a fixed
//! seed and fixed inputs, re-running an event reproduces the output
//! momentum bit-for-bit; the selection observer seam exposes the full
//! decision sequence for replay-parity checks.
//!
//! ## Configuration
//! Nine string parameters, all defaulted: four input array names, the
//! output array name, and four selection formulas (default `pt>30` — a
//! step function, not a smooth efficiency curve). Formula compilation and
//! array binding happen once, at `init`; failures there are fatal and no
//! event is processed.

use kiransim_core::{
    ArrayId, Efficiency, EventContext, Module, SetupContext, SetupError,
};
use kiransim_models::{Category, FourMomentum, Position, SelectionRecord};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;

// =============================================================================
// CONFIGURATION
// =============================================================================

fn default_jet_input_array() -> String {
    "UniqueObjectFinder/jets".to_string()
}

fn default_electron_input_array() -> String {
    "UniqueObjectFinder/electrons".to_string()
}

fn default_muon_input_array() -> String {
    "UniqueObjectFinder/muons".to_string()
}

fn default_photon_input_array() -> String {
    "UniqueObjectFinder/photons".to_string()
}

fn default_momentum_output_array() -> String {
    "momentum".to_string()
}

fn default_selection_formula() -> String {
    "pt>30".to_string()
}

/// MHT module configuration.
///
/// Every field has a documented default, so an empty TOML document is a
/// valid configuration and hosts override only what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MhtConfig {
    /// Input array of jet candidates.
    #[serde(default = "default_jet_input_array")]
    pub jet_input_array: String,

    /// Input array of electron candidates.
    #[serde(default = "default_electron_input_array")]
    pub electron_input_array: String,

    /// Input array of muon candidates.
    #[serde(default = "default_muon_input_array")]
    pub muon_input_array: String,

    /// Input array of photon candidates.
    #[serde(default = "default_photon_input_array")]
    pub photon_input_array: String,

    /// Output array receiving the one recoil candidate per event.
    #[serde(default = "default_momentum_output_array")]
    pub momentum_output_array: String,

    /// Jet selection efficiency over `(pt, eta)`.
    #[serde(default = "default_selection_formula")]
    pub jet_selection_formula: String,

    /// Electron selection efficiency over `(pt, eta)`.
    #[serde(default = "default_selection_formula")]
    pub electron_selection_formula: String,

    /// Muon selection efficiency over `(pt, eta)`.
    #[serde(default = "default_selection_formula")]
    pub muon_selection_formula: String,

    /// Photon selection efficiency over `(pt, eta)`.
    #[serde(default = "default_selection_formula")]
    pub photon_selection_formula: String,
}

impl Default for MhtConfig {
    fn default() -> Self {
        Self {
            jet_input_array: default_jet_input_array(),
            electron_input_array: default_electron_input_array(),
            muon_input_array: default_muon_input_array(),
            photon_input_array: default_photon_input_array(),
            momentum_output_array: default_momentum_output_array(),
            jet_selection_formula: default_selection_formula(),
            electron_selection_formula: default_selection_formula(),
            muon_selection_formula: default_selection_formula(),
            photon_selection_formula: default_selection_formula(),
        }
    }
}

impl MhtConfig {
    /// Input array name for one category.
    pub fn input_array(&self, category: Category) -> &str {
        match category {
            Category::Jet => &self.jet_input_array,
            Category::Electron => &self.electron_input_array,
            Category::Muon => &self.muon_input_array,
            Category::Photon => &self.photon_input_array,
        }
    }

    /// Selection formula for one category.
    pub fn selection_formula(&self, category: Category) -> &str {
        match category {
            Category::Jet => &self.jet_selection_formula,
            Category::Electron => &self.electron_selection_formula,
            Category::Muon => &self.muon_selection_formula,
            Category::Photon => &self.photon_selection_formula,
        }
    }
}

// =============================================================================
// MODULE
// =============================================================================

/// One bound input channel: a category, its array, and its efficiency.
struct Channel {
    category: Category,
    input: ArrayId,
    efficiency: Arc<dyn Efficiency>,
}

/// Missing-transverse-momentum recoil module.
///
/// Lifecycle: construct with a config, `init` once against the host store
/// and formula compiler, then `process` once per event. The module keeps
/// no per-event state; the accumulator is rebuilt from zero on every call.
pub struct Mht {
    name: String,
    config: MhtConfig,
    channels: Vec<Channel>,
    output: Option<ArrayId>,
    events_processed: u64,
}

impl Mht {
    /// Create an unbound module from a configuration.
    pub fn new(config: MhtConfig) -> Self {
        Self {
            name: "MHT".to_string(),
            config,
            channels: Vec::new(),
            output: None,
            events_processed: 0,
        }
    }

    /// The configuration this module was built with.
    pub fn config(&self) -> &MhtConfig {
        &self.config
    }

    /// Events processed since construction.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }
}

impl Module for Mht {
    fn init(&mut self, ctx: &mut SetupContext<'_>) -> Result<(), SetupError> {
        self.channels.clear();

        for category in Category::ALL {
            let array_name = self.config.input_array(category);
            let formula = self.config.selection_formula(category);

            let input = ctx.store.import(array_name)?;
            let efficiency = ctx.compiler.compile(formula)?;

            tracing::debug!(
                "[{}] bound {category} input {array_name:?} with selection {formula:?}",
                self.name
            );

            self.channels.push(Channel {
                category,
                input,
                efficiency,
            });
        }

        self.output = Some(ctx.store.export(&self.config.momentum_output_array)?);
        tracing::debug!(
            "[{}] exporting output array {:?}",
            self.name,
            self.config.momentum_output_array
        );

        Ok(())
    }

    fn process(&mut self, ctx: &mut EventContext<'_>) {
        let Some(output) = self.output else {
            tracing::error!("[{}] process called before init; event skipped", self.name);
            return;
        };

        let mut accumulator = FourMomentum::ZERO;
        let mut examined = 0u32;
        let mut accepted_total = 0u32;

        for channel in &self.channels {
            for idx in 0..ctx.store.len(channel.input) {
                let momentum = ctx.store.array(channel.input)[idx].momentum;
                let pt = momentum.pt();
                let eta = momentum.eta();

                // One draw per candidate examined, accepted or not.
                let draw = ctx.rng.uniform();
                let probability = channel.efficiency.eval(pt, eta);
                let accepted = draw <= probability;

                if accepted {
                    accumulator += momentum;
                    accepted_total += 1;
                }
                examined += 1;

                ctx.observer.on_selection(&SelectionRecord {
                    category: channel.category,
                    pt,
                    eta,
                    draw,
                    probability,
                    accepted,
                });
            }
        }

        // Recoil: reverse the transverse direction, keep pz and energy.
        let mut momentum = accumulator;
        momentum.set_phi(PI + momentum.phi());

        let mut candidate = ctx.factory.new_candidate();
        candidate.position = Position::ORIGIN;
        candidate.momentum = momentum;
        ctx.store.push(output, candidate);

        self.events_processed += 1;
        tracing::trace!(
            "[{}] event {}: accepted {accepted_total}/{examined} candidates, recoil pt {:.3}",
            self.name,
            self.events_processed,
            momentum.pt()
        );
    }

    fn finish(&mut self) {
        tracing::info!(
            "[{}] finished: {} events processed",
            self.name,
            self.events_processed
        );
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// TESTS
// =============================================================================
