//! Rocket parts: roles, identity, and per-part connection state.
//!
//! A [`Part`] is one assemblable component with a fixed [`PartRole`], a world
//! position, and a set of local snap anchors. Connection state is stored as a
//! single outgoing edge (`connected_to`) plus incoming back-references
//! (`connected_by`); the registry keeps the two directions symmetric.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a part in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartId(pub u64);

impl PartId {
    /// Create a new part ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for PartId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Part({})", self.0)
    }
}

/// The fixed category of a part, governing validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PartRole {
    /// First-stage fuel tank in the core stack.
    CoreTank,
    /// First-stage engine at the bottom of the core stack.
    CoreThruster,
    /// Second-stage liquid fuel tank.
    LiquidTank,
    /// Second-stage heavy engine.
    LargeThruster,
    /// The payload; exactly one per valid rocket, top of the stack.
    Payload,
    /// Side booster tank; augments but never joins the main stack.
    SideTank,
    /// Side booster engine; augments but never joins the main stack.
    SideThruster,
    /// Stage separator between the core stack and the second stage.
    Separator1,
    /// Stage separator directly below the payload.
    Separator2,
}

impl PartRole {
    /// Check whether this is a side booster role.
    ///
    /// Side roles can extend the connectivity search but never terminate the
    /// main stack.
    #[must_use]
    pub fn is_side(self) -> bool {
        matches!(self, Self::SideTank | Self::SideThruster)
    }

    /// Get the role name used in diagnostics and error text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CoreTank => "CoreTank",
            Self::CoreThruster => "CoreThruster",
            Self::LiquidTank => "LiquidTank",
            Self::LargeThruster => "LargeThruster",
            Self::Payload => "Payload",
            Self::SideTank => "SideTank",
            Self::SideThruster => "SideThruster",
            Self::Separator1 => "Separator1",
            Self::Separator2 => "Separator2",
        }
    }
}

impl std::fmt::Display for PartRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rocket part.
///
/// # Example
///
/// ```
/// use nalgebra::Vector3;
/// use rocket_assembly::{Part, PartRole};
///
/// let part = Part::new(PartRole::CoreTank)
///     .with_position(0.0, 2.0, 0.0)
///     .with_snap_point(Vector3::new(0.0, 1.0, 0.0))
///     .with_snap_point(Vector3::new(0.0, -1.0, 0.0))
///     .with_weight(120.0);
///
/// assert_eq!(part.role(), PartRole::CoreTank);
/// assert_eq!(part.snap_points().len(), 2);
/// assert!(part.connected_to().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Part {
    /// Fixed role of this part.
    role: PartRole,

    /// Dry weight, used by the external mass summary.
    weight: f64,

    /// Thrust contribution, used by the external mass summary.
    thrust: f64,

    /// Position in world coordinates.
    position: Point3<f64>,

    /// Snap anchors as local offsets from the part position.
    snap_points: Vec<Vector3<f64>>,

    /// The single outgoing connection this part owns.
    pub(crate) connected_to: Option<PartId>,

    /// Parts whose `connected_to` points at this part.
    pub(crate) connected_by: Vec<PartId>,

    /// A locked part accepts no new connections and performs no snapping.
    locked: bool,
}

impl Part {
    /// Create a new unconnected part at the origin with no snap points.
    #[must_use]
    pub fn new(role: PartRole) -> Self {
        Self {
            role,
            weight: 0.0,
            thrust: 0.0,
            position: Point3::origin(),
            snap_points: Vec::new(),
            connected_to: None,
            connected_by: Vec::new(),
            locked: false,
        }
    }

    /// Get the part role.
    #[must_use]
    pub fn role(&self) -> PartRole {
        self.role
    }

    /// Get the part weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Get the part thrust.
    #[must_use]
    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    /// Get the world position.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Set the world position.
    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    /// Translate the part by a world-space delta.
    pub fn translate(&mut self, delta: Vector3<f64>) {
        self.position = self.position + delta;
    }

    /// Get the local snap anchors.
    #[must_use]
    pub fn snap_points(&self) -> &[Vector3<f64>] {
        &self.snap_points
    }

    /// Get a snap anchor in world coordinates.
    ///
    /// Returns `None` if the index is out of range.
    #[must_use]
    pub fn world_snap_point(&self, index: usize) -> Option<Point3<f64>> {
        self.snap_points.get(index).map(|offset| self.position + *offset)
    }

    /// Get the part this part is connected to (its outgoing edge).
    #[must_use]
    pub fn connected_to(&self) -> Option<PartId> {
        self.connected_to
    }

    /// Get the parts connected onto this part (incoming edges).
    #[must_use]
    pub fn connected_by(&self) -> &[PartId] {
        &self.connected_by
    }

    /// Check whether the part has any connection, outgoing or incoming.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected_to.is_some() || !self.connected_by.is_empty()
    }

    /// Check whether the part is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock the part.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Set the weight (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the thrust (builder pattern).
    #[must_use]
    pub fn with_thrust(mut self, thrust: f64) -> Self {
        self.thrust = thrust;
        self
    }

    /// Set the world position (builder pattern).
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    /// Add a local snap anchor (builder pattern).
    #[must_use]
    pub fn with_snap_point(mut self, offset: Vector3<f64>) -> Self {
        self.snap_points.push(offset);
        self
    }

    /// Replace all snap anchors (builder pattern).
    #[must_use]
    pub fn with_snap_points(mut self, offsets: Vec<Vector3<f64>>) -> Self {
        self.snap_points = offsets;
        self
    }

    /// Set the locked flag (builder pattern).
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_part_new() {
        let part = Part::new(PartRole::Payload);
        assert_eq!(part.role(), PartRole::Payload);
        assert!(part.connected_to().is_none());
        assert!(part.connected_by().is_empty());
        assert!(!part.is_connected());
        assert!(!part.is_locked());
    }

    #[test]
    fn test_part_builder() {
        let part = Part::new(PartRole::CoreTank)
            .with_weight(100.0)
            .with_thrust(0.0)
            .with_position(1.0, 2.0, 3.0)
            .with_snap_point(Vector3::new(0.0, 1.0, 0.0))
            .with_locked(true);

        assert_relative_eq!(part.weight(), 100.0);
        assert_relative_eq!(part.position().y, 2.0);
        assert_eq!(part.snap_points().len(), 1);
        assert!(part.is_locked());
    }

    #[test]
    fn test_world_snap_point() {
        let part = Part::new(PartRole::CoreTank)
            .with_position(1.0, 2.0, 0.0)
            .with_snap_point(Vector3::new(0.0, -1.0, 0.0));

        let anchor = part.world_snap_point(0).unwrap();
        assert_relative_eq!(anchor.x, 1.0);
        assert_relative_eq!(anchor.y, 1.0);

        assert!(part.world_snap_point(1).is_none());
    }

    #[test]
    fn test_translate() {
        let mut part = Part::new(PartRole::CoreTank).with_position(1.0, 0.0, 0.0);
        part.translate(Vector3::new(0.5, 2.0, 0.0));
        assert_relative_eq!(part.position().x, 1.5);
        assert_relative_eq!(part.position().y, 2.0);
    }

    #[test]
    fn test_side_roles() {
        assert!(PartRole::SideTank.is_side());
        assert!(PartRole::SideThruster.is_side());
        assert!(!PartRole::Payload.is_side());
        assert!(!PartRole::CoreThruster.is_side());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(PartRole::Separator2.to_string(), "Separator2");
        assert_eq!(PartRole::LargeThruster.as_str(), "LargeThruster");
    }

    #[test]
    fn test_part_id_display() {
        assert_eq!(PartId::new(3).to_string(), "Part(3)");
        assert_eq!(PartId::from(9).raw(), 9);
    }
}
