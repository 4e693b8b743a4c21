//! Error types for assembly and validation operations.

use thiserror::Error;

use crate::part::{PartId, PartRole};

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Errors that can occur while mutating or traversing the assembly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// Referenced part does not exist in the registry.
    #[error("part {id} not found in registry")]
    PartNotFound {
        /// The missing part ID.
        id: PartId,
    },

    /// A connection loop was found while walking the graph.
    ///
    /// Connection loops cannot be produced by well-formed snap sequences,
    /// but the traversal refuses to recurse through one instead of looping.
    #[error("connection cycle detected at part {id}")]
    CycleDetected {
        /// A part on the detected cycle.
        id: PartId,
    },
}

/// Reasons a launch request can be rejected.
///
/// Every variant is recoverable: the user fixes the assembly with further
/// attach/detach actions and requests validation again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Total part count is not one of the supported configurations.
    #[error(
        "rocket has {count} parts; supported configurations have 4, 7, or 10 \
         parts (check the blueprint for the required configuration)"
    )]
    WrongConfiguration {
        /// The observed part count.
        count: usize,
    },

    /// No payload part exists in the assembly.
    #[error("payload missing")]
    PayloadMissing,

    /// More than one payload part exists in the assembly.
    #[error("{count} payloads present; exactly one is required")]
    MultiplePayloads {
        /// Number of payloads found.
        count: usize,
    },

    /// At least one part has no connections at all.
    #[error("rocket components are not connected properly; {required} are required for launch")]
    DisconnectedParts {
        /// Human-readable list of the parts the configuration requires.
        required: &'static str,
    },

    /// The payload has more than one connection.
    #[error(
        "rocket components are connected at the wrong position: payload has \
         {degree} connections (check the blueprint)"
    )]
    PayloadWrongPosition {
        /// The payload's degree in the connection graph.
        degree: usize,
    },

    /// A side booster role ended up inside the main stack.
    #[error(
        "rocket components are connected at the wrong position: {role} cannot \
         be part of the main stack (check the blueprint)"
    )]
    SideRoleInChain {
        /// The offending side role.
        role: PartRole,
    },

    /// The main chain has too few parts to evaluate.
    #[error("main chain too short: {len} parts")]
    ChainTooShort {
        /// Number of parts in the extracted chain.
        len: usize,
    },

    /// The main chain has the wrong number of parts.
    #[error("rocket parts are incorrect: main chain has {found} parts, expected {expected}")]
    ChainLength {
        /// Expected chain length.
        expected: usize,
        /// Observed chain length.
        found: usize,
    },

    /// The main chain has the wrong part at some position.
    #[error(
        "rocket parts are incorrect: expected {expected} at stack position \
         {index}, found {found} (check the blueprint)"
    )]
    ChainOrder {
        /// Zero-based position in the chain.
        index: usize,
        /// Expected role at that position.
        expected: PartRole,
        /// Observed role at that position.
        found: PartRole,
    },

    /// The seventh stack position is not a large thruster.
    #[error("invalid final thruster: found {found}")]
    InvalidFinalThruster {
        /// Role found in the final stack position.
        found: PartRole,
    },

    /// Wrong number of side tanks or side thrusters.
    #[error(
        "invalid side booster count: {side_tanks} side tank(s) and \
         {side_thrusters} side thruster(s); expected 1 and 2"
    )]
    InvalidSideBoosterCount {
        /// Number of side tanks present.
        side_tanks: usize,
        /// Number of side thrusters present.
        side_thrusters: usize,
    },

    /// The side tank is wired incorrectly.
    #[error(
        "side tank topology invalid: {core_links} core link(s) and \
         {thruster_links} thruster link(s); expected 1 and 2"
    )]
    SideTankTopology {
        /// Number of non-side neighbors of the side tank.
        core_links: usize,
        /// Number of side-thruster neighbors of the side tank.
        thruster_links: usize,
    },

    /// The connection graph contains a loop and cannot form a rocket.
    #[error("rocket connections form a loop (detach and reassemble)")]
    CyclicGraph,
}

impl ValidationError {
    /// Check whether this is a configuration (part count) error.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::WrongConfiguration { .. })
    }

    /// Check whether this is a topology error (wrong wiring, order, or
    /// placement of otherwise valid parts).
    #[must_use]
    pub fn is_topology_error(&self) -> bool {
        !matches!(self, Self::WrongConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_not_found_display() {
        let err = AssemblyError::PartNotFound {
            id: PartId::new(7),
        };
        assert!(err.to_string().contains("Part(7)"));
    }

    #[test]
    fn test_wrong_configuration_display() {
        let err = ValidationError::WrongConfiguration { count: 5 };
        assert!(err.to_string().contains("5 parts"));
        assert!(err.is_configuration_error());
        assert!(!err.is_topology_error());
    }

    #[test]
    fn test_topology_errors_classified() {
        let err = ValidationError::PayloadWrongPosition { degree: 2 };
        assert!(err.is_topology_error());

        let err = ValidationError::SideRoleInChain {
            role: PartRole::SideTank,
        };
        assert!(err.is_topology_error());
    }

    #[test]
    fn test_chain_order_display() {
        let err = ValidationError::ChainOrder {
            index: 1,
            expected: PartRole::Separator2,
            found: PartRole::CoreTank,
        };
        let text = err.to_string();
        assert!(text.contains("Separator2"));
        assert!(text.contains("CoreTank"));
    }
}
