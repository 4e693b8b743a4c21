//! Proximity-based snap resolution.
//!
//! When a dragged part is released, the resolver scans every unlocked partner
//! for the closest pair of snap anchors under the configured threshold. A
//! successful snap registers the attachment and then translates the moving
//! part so the two anchors coincide exactly.

use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::error::{AssemblyError, AssemblyResult};
use crate::part::{PartId, PartRole};
use crate::registry::Registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snap resolution settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnapConfig {
    /// Maximum anchor distance that still snaps (exclusive).
    pub threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { threshold: 0.8 }
    }
}

impl SnapConfig {
    /// Create a config with the given threshold.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

/// The winning anchor pair for a proposed snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    /// The partner part.
    pub partner: PartId,
    /// Index of the anchor on the moving part.
    pub moving_anchor: usize,
    /// Index of the anchor on the partner.
    pub partner_anchor: usize,
    /// Distance between the two anchors at resolution time.
    pub distance: f64,
}

/// Outcome of snap resolution, before any graph mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapDecision {
    /// A qualifying anchor pair was found.
    Candidate(SnapCandidate),
    /// The best partner is a payload that already has a connection.
    PayloadOccupied {
        /// The occupied payload.
        partner: PartId,
    },
    /// No anchor pair under the threshold.
    NoConnection,
}

/// Outcome of a snap attempt, after graph mutation and position correction.
///
/// `Snapped` doubles as the audio-cue trigger for the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapOutcome {
    /// The part was attached and moved onto its partner.
    Snapped {
        /// The partner part.
        partner: PartId,
        /// Index of the anchor used on the moving part.
        moving_anchor: usize,
        /// Index of the anchor used on the partner.
        partner_anchor: usize,
    },
    /// No qualifying partner; nothing changed.
    NoConnection,
    /// The snap was refused because a payload already has a connection.
    PayloadOccupied {
        /// The occupied payload (or the moving payload itself).
        partner: PartId,
    },
    /// The moving part is locked; nothing changed.
    Locked,
}

/// Find the best snap candidate for a moving part.
///
/// Enumerates partners in registration order and anchors in index order,
/// tracking the globally minimal distance strictly below the threshold; the
/// first pair found wins ties. Locked partners are skipped. If the winning
/// partner is a payload that already has any connection, the whole snap is
/// rejected rather than falling back to the next-best pair.
///
/// # Errors
///
/// Returns [`AssemblyError::PartNotFound`] if `moving` is unknown.
pub fn resolve(
    registry: &Registry,
    moving: PartId,
    config: &SnapConfig,
) -> AssemblyResult<SnapDecision> {
    let moving_part = registry
        .get(moving)
        .ok_or(AssemblyError::PartNotFound { id: moving })?;

    let mut best: Option<SnapCandidate> = None;

    for (other_id, other) in registry.parts() {
        if other_id == moving || other.is_locked() {
            continue;
        }

        for (i, _) in moving_part.snap_points().iter().enumerate() {
            let Some(my_anchor) = moving_part.world_snap_point(i) else {
                continue;
            };
            for (j, _) in other.snap_points().iter().enumerate() {
                let Some(other_anchor) = other.world_snap_point(j) else {
                    continue;
                };
                let distance = (my_anchor - other_anchor).norm();
                let limit = best.map_or(config.threshold, |c| c.distance);
                if distance < limit {
                    best = Some(SnapCandidate {
                        partner: other_id,
                        moving_anchor: i,
                        partner_anchor: j,
                        distance,
                    });
                }
            }
        }
    }

    let Some(candidate) = best else {
        return Ok(SnapDecision::NoConnection);
    };

    if let Some(partner) = registry.get(candidate.partner)
        && partner.role() == PartRole::Payload
        && partner.is_connected()
    {
        return Ok(SnapDecision::PayloadOccupied {
            partner: candidate.partner,
        });
    }

    Ok(SnapDecision::Candidate(candidate))
}

/// Resolve and apply a snap for a moving part.
///
/// On success the attachment is registered and the moving part is translated
/// so its anchor lands exactly on the partner anchor (zero residual offset).
///
/// # Errors
///
/// Returns [`AssemblyError::PartNotFound`] if `moving` is unknown.
pub fn snap(
    registry: &mut Registry,
    moving: PartId,
    config: &SnapConfig,
) -> AssemblyResult<SnapOutcome> {
    let moving_part = registry
        .get(moving)
        .ok_or(AssemblyError::PartNotFound { id: moving })?;
    if moving_part.is_locked() {
        return Ok(SnapOutcome::Locked);
    }

    let candidate = match resolve(registry, moving, config)? {
        SnapDecision::NoConnection => return Ok(SnapOutcome::NoConnection),
        SnapDecision::PayloadOccupied { partner } => {
            warn!(%moving, %partner, "payload already has a connection; snap refused");
            return Ok(SnapOutcome::PayloadOccupied { partner });
        }
        SnapDecision::Candidate(candidate) => candidate,
    };

    if !registry.attach(moving, candidate.partner)? {
        // The moving part is a payload holding onto a previous connection.
        return Ok(SnapOutcome::PayloadOccupied { partner: moving });
    }

    let delta = anchor_delta(registry, moving, &candidate)?;
    if let Some(part) = registry.get_mut(moving) {
        part.translate(delta);
    }

    debug!(
        %moving,
        partner = %candidate.partner,
        distance = candidate.distance,
        "part snapped"
    );

    Ok(SnapOutcome::Snapped {
        partner: candidate.partner,
        moving_anchor: candidate.moving_anchor,
        partner_anchor: candidate.partner_anchor,
    })
}

/// Detach everything, then re-run snapping over unlocked parts in
/// registration order. Returns the number of parts that snapped.
///
/// # Errors
///
/// Returns [`AssemblyError::PartNotFound`] if the registry is mutated
/// concurrently; under normal use this cannot fail.
pub fn resnap_all(registry: &mut Registry, config: &SnapConfig) -> AssemblyResult<usize> {
    let ids: Vec<PartId> = registry.ids().collect();
    for &id in &ids {
        registry.detach(id)?;
    }

    let mut snapped = 0;
    for &id in &ids {
        if registry.get(id).is_some_and(crate::part::Part::is_locked) {
            continue;
        }
        if matches!(snap(registry, id, config)?, SnapOutcome::Snapped { .. }) {
            snapped += 1;
        }
    }
    Ok(snapped)
}

fn anchor_delta(
    registry: &Registry,
    moving: PartId,
    candidate: &SnapCandidate,
) -> AssemblyResult<Vector3<f64>> {
    let moving_anchor = registry
        .get(moving)
        .and_then(|part| part.world_snap_point(candidate.moving_anchor))
        .ok_or(AssemblyError::PartNotFound { id: moving })?;
    let partner_anchor = registry
        .get(candidate.partner)
        .and_then(|part| part.world_snap_point(candidate.partner_anchor))
        .ok_or(AssemblyError::PartNotFound {
            id: candidate.partner,
        })?;
    Ok(partner_anchor - moving_anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Part;
    use approx::assert_relative_eq;

    fn stackable(role: PartRole, y: f64) -> Part {
        // One anchor on top, one on the bottom, half a unit from center.
        Part::new(role)
            .with_position(0.0, y, 0.0)
            .with_snap_point(Vector3::new(0.0, 0.5, 0.0))
            .with_snap_point(Vector3::new(0.0, -0.5, 0.0))
    }

    #[test]
    fn test_snap_within_threshold() {
        let mut registry = Registry::new();
        let base = registry.insert(stackable(PartRole::CoreTank, 0.0));
        // Bottom anchor at y = 0.8, base top anchor at y = 0.5: gap 0.3.
        let moving = registry.insert(stackable(PartRole::Separator2, 1.3));

        let outcome = snap(&mut registry, moving, &SnapConfig::default()).unwrap();
        assert_eq!(
            outcome,
            SnapOutcome::Snapped {
                partner: base,
                moving_anchor: 1,
                partner_anchor: 0,
            }
        );
        assert_eq!(registry.get(moving).unwrap().connected_to(), Some(base));
    }

    #[test]
    fn test_snap_correction_leaves_zero_residual() {
        let mut registry = Registry::new();
        registry.insert(stackable(PartRole::CoreTank, 0.0));
        let moving = registry.insert(stackable(PartRole::Separator2, 1.3));

        snap(&mut registry, moving, &SnapConfig::default()).unwrap();

        let part = registry.get(moving).unwrap();
        let anchor = part.world_snap_point(1).unwrap();
        assert_relative_eq!(anchor.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(part.position().y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_at_threshold_does_not_snap() {
        let mut registry = Registry::new();
        registry.insert(stackable(PartRole::CoreTank, 0.0));
        // Gap between anchors is exactly 0.8.
        let moving = registry.insert(stackable(PartRole::Separator2, 1.8));

        let outcome = snap(&mut registry, moving, &SnapConfig::default()).unwrap();
        assert_eq!(outcome, SnapOutcome::NoConnection);
        assert!(!registry.get(moving).unwrap().is_connected());
    }

    #[test]
    fn test_nearest_partner_wins() {
        let mut registry = Registry::new();
        registry.insert(stackable(PartRole::CoreTank, 1.2));
        let near = registry.insert(stackable(PartRole::LiquidTank, 1.6));
        let moving = registry.insert(stackable(PartRole::Separator2, 2.8));

        let decision = resolve(&registry, moving, &SnapConfig::default()).unwrap();
        match decision {
            SnapDecision::Candidate(c) => assert_eq!(c.partner, near),
            other => panic!("expected candidate, got {other:?}"),
        }
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let mut registry = Registry::new();
        let first = registry.insert(stackable(PartRole::CoreTank, 0.0));
        let _second = registry.insert(stackable(PartRole::LiquidTank, 0.0));
        let moving = registry.insert(stackable(PartRole::Separator2, 1.3));

        let decision = resolve(&registry, moving, &SnapConfig::default()).unwrap();
        match decision {
            SnapDecision::Candidate(c) => assert_eq!(c.partner, first),
            other => panic!("expected candidate, got {other:?}"),
        }
    }

    #[test]
    fn test_locked_partner_skipped() {
        let mut registry = Registry::new();
        registry.insert(stackable(PartRole::CoreTank, 0.0).with_locked(true));
        let moving = registry.insert(stackable(PartRole::Separator2, 1.3));

        let outcome = snap(&mut registry, moving, &SnapConfig::default()).unwrap();
        assert_eq!(outcome, SnapOutcome::NoConnection);
    }

    #[test]
    fn test_locked_mover_does_not_snap() {
        let mut registry = Registry::new();
        registry.insert(stackable(PartRole::CoreTank, 0.0));
        let moving = registry.insert(stackable(PartRole::Separator2, 1.3).with_locked(true));

        let outcome = snap(&mut registry, moving, &SnapConfig::default()).unwrap();
        assert_eq!(outcome, SnapOutcome::Locked);
    }

    #[test]
    fn test_occupied_payload_rejects_snap() {
        let mut registry = Registry::new();
        let payload = registry.insert(stackable(PartRole::Payload, 0.0));
        let first = registry.insert(stackable(PartRole::Separator2, 1.05));
        snap(&mut registry, first, &SnapConfig::default()).unwrap();

        // The payload is the only partner in range; no fallback happens.
        let late = registry.insert(stackable(PartRole::CoreTank, -1.05));
        let outcome = snap(&mut registry, late, &SnapConfig::default()).unwrap();
        assert_eq!(outcome, SnapOutcome::PayloadOccupied { partner: payload });
        assert!(!registry.get(late).unwrap().is_connected());
    }

    #[test]
    fn test_snap_unknown_part_fails() {
        let mut registry = Registry::new();
        let result = snap(&mut registry, PartId::new(5), &SnapConfig::default());
        assert!(matches!(result, Err(AssemblyError::PartNotFound { .. })));
    }

    #[test]
    fn test_resnap_all() {
        let mut registry = Registry::new();
        let a = registry.insert(stackable(PartRole::CoreTank, 0.0));
        let b = registry.insert(stackable(PartRole::Separator2, 1.05));
        registry.attach(b, a).unwrap();

        let snapped = resnap_all(&mut registry, &SnapConfig::default()).unwrap();
        // Both parts find each other again after the sweep.
        assert_eq!(snapped, 2);
        assert!(registry.is_symmetric());
    }
}
