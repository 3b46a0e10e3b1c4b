//! # Lorentz Vectors
//!
//! Four-momentum and spacetime-position types used throughout the pipeline.
//!
//! ## Conventions
//! - Momentum components are `(px, py, pz, e)` in GeV; positions are
//!   `(x, y, z, t)` in detector units.
//! - `pt` is the transverse momentum, `phi` the azimuthal angle in
//!   `(-π, π]`, `eta` the pseudorapidity.
//! - `eta` for a momentum exactly along the beam axis returns the
//!   `±BEAM_AXIS_ETA` sentinel rather than `±∞`, and `0.0` for the zero
//!   vector. Downstream efficiency evaluation therefore never sees a
//!   non-finite input for these degenerate cases.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Pseudorapidity sentinel for momenta exactly along the beam axis.
pub const BEAM_AXIS_ETA: f64 = 1e11;

// =============================================================================
// FOUR-MOMENTUM
// =============================================================================

/// Energy-momentum four-vector `(px, py, pz, e)`.
///
/// Addition is component-wise; derived kinematic quantities (`pt`, `eta`,
/// `phi`) are computed on demand from the stored components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FourMomentum {
    /// Momentum component along x.
    pub px: f64,
    /// Momentum component along y.
    pub py: f64,
    /// Momentum component along z (beam axis).
    pub pz: f64,
    /// Energy.
    pub e: f64,
}

impl FourMomentum {
    /// The zero four-vector.
    pub const ZERO: FourMomentum = FourMomentum {
        px: 0.0,
        py: 0.0,
        pz: 0.0,
        e: 0.0,
    };

    /// Create a four-momentum from its components.
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Construct from transverse momentum, pseudorapidity, azimuth and energy.
    ///
    /// Convenience constructor for building test events and candidate
    /// collections from the kinematic variables selection formulas see.
    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        Self {
            px: pt * phi.cos(),
            py: pt * phi.sin(),
            pz: pt * eta.sinh(),
            e,
        }
    }

    /// Transverse momentum `sqrt(px^2 + py^2)`.
    #[inline]
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Magnitude of the spatial momentum.
    #[inline]
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Azimuthal angle in `(-π, π]`; `0.0` for a vanishing transverse part.
    #[inline]
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 {
            0.0
        } else {
            self.py.atan2(self.px)
        }
    }

    /// Pseudorapidity `-0.5 * ln((1 - cosθ) / (1 + cosθ))`.
    ///
    /// Momenta exactly along the beam axis yield `±BEAM_AXIS_ETA`; the zero
    /// vector yields `0.0`.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        let cos_theta = if p == 0.0 { 1.0 } else { self.pz / p };
        if cos_theta * cos_theta < 1.0 {
            -0.5 * ((1.0 - cos_theta) / (1.0 + cos_theta)).ln()
        } else if self.pz == 0.0 {
            0.0
        } else if self.pz > 0.0 {
            BEAM_AXIS_ETA
        } else {
            -BEAM_AXIS_ETA
        }
    }

    /// Replace the azimuthal angle, preserving `pt`, `pz` and `e`.
    ///
    /// The transverse components are re-projected onto the new azimuth; the
    /// longitudinal component and energy are untouched. A zero transverse
    /// part stays exactly zero for any angle.
    pub fn set_phi(&mut self, phi: f64) {
        let pt = self.pt();
        self.px = pt * phi.cos();
        self.py = pt * phi.sin();
    }
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

impl AddAssign for FourMomentum {
    fn add_assign(&mut self, rhs: FourMomentum) {
        self.px += rhs.px;
        self.py += rhs.py;
        self.pz += rhs.pz;
        self.e += rhs.e;
    }
}

// =============================================================================
// POSITION
// =============================================================================

/// Spacetime position `(x, y, z, t)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl Position {
    /// The coordinate-and-time origin.
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        t: 0.0,
    };

    /// Create a position from its components.
    pub fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }

    /// The coordinate-and-time origin.
    pub fn origin() -> Self {
        Self::ORIGIN
    }
}

// =============================================================================
// TESTS
// =============================================================================
