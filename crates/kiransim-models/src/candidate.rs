//! # Candidates & Categories
//!
//! A `Candidate` is one reconstructed physics object as stored in the event
//! arrays; `Category` names the four reconstructed-object classes that feed
//! the missing-momentum computation, in their fixed processing order.

use crate::momentum::{FourMomentum, Position};
use serde::{Deserialize, Serialize};

/// A reconstructed physics object.
///
/// Candidates live in the host's event store; processing modules read the
/// input arrays and append freshly created candidates to output arrays.
/// Only `momentum` and `position` are interpreted by the missing-momentum
/// module; `pid` and `charge` ride along for downstream consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// PDG particle id; 0 for composite or synthetic objects.
    pub pid: i32,
    /// Electric charge in units of e.
    pub charge: i32,
    /// Energy-momentum four-vector.
    pub momentum: FourMomentum,
    /// Production vertex / reference position.
    pub position: Position,
}

impl Candidate {
    /// Create a candidate carrying only a momentum, at the origin.
    pub fn from_momentum(momentum: FourMomentum) -> Self {
        Self {
            momentum,
            ..Self::default()
        }
    }
}

/// Reconstructed-object category.
///
/// The variant order is the processing order: modules that iterate over
/// categories must follow `Category::ALL` so that shared random-sequence
/// consumption stays reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Jet,
    Electron,
    Muon,
    Photon,
}

impl Category {
    /// All categories in the fixed processing order.
    pub const ALL: [Category; 4] = [
        Category::Jet,
        Category::Electron,
        Category::Muon,
        Category::Photon,
    ];

    /// Stable lowercase name, used in log output and array naming.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Jet => "jet",
            Category::Electron => "electron",
            Category::Muon => "muon",
            Category::Photon => "photon",
        }
    }

    /// Stable wire tag for canonical binary encoding.
    ///
    /// Tags follow the processing order and must never be renumbered;
    /// recorded traces depend on them.
    pub fn wire_tag(&self) -> u8 {
        match self {
            Category::Jet => 0,
            Category::Electron => 1,
            Category::Muon => 2,
            Category::Photon => 3,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
