//! Mass and thrust totals for the current assembly.
//!
//! Consumers recompute this after any mutation instead of listening for a
//! broadcast; the registry's mutating methods return what changed.

use crate::registry::Registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard gravity used for the thrust-to-weight readout.
const STANDARD_GRAVITY: f64 = 9.8;

/// Aggregate mass/thrust readout over the whole registry.
///
/// # Example
///
/// ```
/// use rocket_assembly::{MassSummary, Part, PartRole, Registry};
///
/// let mut registry = Registry::new();
/// registry.insert(Part::new(PartRole::CoreTank).with_weight(100.0));
/// registry.insert(Part::new(PartRole::CoreThruster).with_weight(40.0).with_thrust(2744.0));
///
/// let summary = MassSummary::measure(&registry);
/// assert_eq!(summary.total_mass, 140.0);
/// assert_eq!(summary.total_thrust, 2744.0);
/// assert!((summary.thrust_to_weight - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassSummary {
    /// Sum of part weights.
    pub total_mass: f64,
    /// Sum of part thrusts.
    pub total_thrust: f64,
    /// Thrust over weight (zero when the assembly is massless).
    pub thrust_to_weight: f64,
}

impl MassSummary {
    /// Measure the current registry contents.
    #[must_use]
    pub fn measure(registry: &Registry) -> Self {
        let mut total_mass = 0.0;
        let mut total_thrust = 0.0;
        for (_, part) in registry.parts() {
            total_mass += part.weight();
            total_thrust += part.thrust();
        }

        let thrust_to_weight = if total_mass > 0.0 {
            (total_thrust / total_mass) / STANDARD_GRAVITY
        } else {
            0.0
        };

        Self {
            total_mass,
            total_thrust,
            thrust_to_weight,
        }
    }
}

impl std::fmt::Display for MassSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MASS: {:.1} KG\nTHRUST/WEIGHT: {:.2}",
            self.total_mass, self.thrust_to_weight
        )
    }
}
