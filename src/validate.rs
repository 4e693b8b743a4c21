//! Structural validation of the assembled rocket.
//!
//! The validator is a pure function of the current registry: it rebuilds the
//! connection graph, extracts the main chain, and applies a per-part-count
//! rule set, short-circuiting on the first failure. Success yields a
//! [`LaunchReport`] carrying the recognized configuration and the markers the
//! launch sequencer needs (video pause frame and result code).

use tracing::debug;

use crate::chain::main_chain;
use crate::error::ValidationError;
use crate::graph::ConnectionGraph;
use crate::part::{Part, PartId, PartRole};
use crate::registry::Registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The recognized rocket configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RocketType {
    /// Single-stage, 4 parts.
    Stage1_4,
    /// Two-stage with a large second-stage thruster, 7 parts.
    Stage2_7_Large,
    /// Two-stage with side boosters, 10 parts.
    Booster_10,
}

impl RocketType {
    /// Map a part count to its configuration, if supported.
    #[must_use]
    pub fn for_count(count: usize) -> Option<Self> {
        match count {
            4 => Some(Self::Stage1_4),
            7 => Some(Self::Stage2_7_Large),
            10 => Some(Self::Booster_10),
            _ => None,
        }
    }

    /// Video frame at which the launch sequencer pauses for this
    /// configuration.
    #[must_use]
    pub fn pause_before_frame(self) -> u32 {
        match self {
            Self::Stage1_4 => 180,
            Self::Stage2_7_Large => 610,
            Self::Booster_10 => 510,
        }
    }

    /// Result code shown on the end screen for this configuration.
    #[must_use]
    pub fn result_code(self) -> u8 {
        match self {
            Self::Stage1_4 => 1,
            Self::Stage2_7_Large => 2,
            Self::Booster_10 => 3,
        }
    }
}

impl std::fmt::Display for RocketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Stage1_4 => "Stage1_4",
            Self::Stage2_7_Large => "Stage2_7_Large",
            Self::Booster_10 => "Booster_10",
        };
        f.write_str(name)
    }
}

/// A successful validation verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaunchReport {
    /// The recognized configuration.
    pub rocket_type: RocketType,
    /// Video frame to pause before, for the launch sequencer.
    pub pause_before_frame: u32,
    /// Result code for the end screen.
    pub result_code: u8,
}

/// Expected main stack for the 4-part configuration.
const STAGE1_STACK: [PartRole; 4] = [
    PartRole::Payload,
    PartRole::Separator2,
    PartRole::CoreTank,
    PartRole::CoreThruster,
];

/// Expected first six stack entries for the 7-part configuration.
const STAGE2_PREFIX: [PartRole; 6] = [
    PartRole::Payload,
    PartRole::Separator2,
    PartRole::CoreTank,
    PartRole::CoreThruster,
    PartRole::Separator1,
    PartRole::LiquidTank,
];

/// Expected complete main stack for the 10-part configuration.
const BOOSTER_STACK: [PartRole; 7] = [
    PartRole::Payload,
    PartRole::Separator2,
    PartRole::CoreTank,
    PartRole::CoreThruster,
    PartRole::Separator1,
    PartRole::LiquidTank,
    PartRole::LargeThruster,
];

/// Validate the current assembly against the supported configurations.
///
/// Stateless and read-only: the graph is rebuilt from scratch on every call.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, in check order: part
/// count, payload uniqueness, connectivity, payload degree, side roles in the
/// main stack, then the count-specific stack rules.
///
/// # Example
///
/// ```
/// use rocket_assembly::{Part, PartRole, Registry, RocketType, validate};
///
/// let mut registry = Registry::new();
/// let payload = registry.insert(Part::new(PartRole::Payload));
/// let separator = registry.insert(Part::new(PartRole::Separator2));
/// let tank = registry.insert(Part::new(PartRole::CoreTank));
/// let engine = registry.insert(Part::new(PartRole::CoreThruster));
///
/// registry.attach(separator, payload).unwrap();
/// registry.attach(tank, separator).unwrap();
/// registry.attach(engine, tank).unwrap();
///
/// let report = validate(&registry).unwrap();
/// assert_eq!(report.rocket_type, RocketType::Stage1_4);
/// assert_eq!(report.result_code, 1);
/// ```
pub fn validate(registry: &Registry) -> Result<LaunchReport, ValidationError> {
    let count = registry.len();
    let Some(rocket_type) = RocketType::for_count(count) else {
        return Err(ValidationError::WrongConfiguration { count });
    };

    let payloads = registry.parts_with_role(PartRole::Payload);
    let payload = match payloads.as_slice() {
        [] => return Err(ValidationError::PayloadMissing),
        [single] => *single,
        many => {
            return Err(ValidationError::MultiplePayloads { count: many.len() });
        }
    };

    let graph = ConnectionGraph::build(registry);

    for id in graph.ids() {
        if graph.degree(id) == 0 {
            return Err(ValidationError::DisconnectedParts {
                required: required_parts(count),
            });
        }
    }

    let payload_degree = graph.degree(payload);
    if payload_degree != 1 {
        return Err(ValidationError::PayloadWrongPosition {
            degree: payload_degree,
        });
    }

    let chain = main_chain(&graph, registry).map_err(|_| ValidationError::CyclicGraph)?;
    let roles: Vec<PartRole> = chain
        .iter()
        .filter_map(|&id| registry.get(id).map(Part::role))
        .collect();

    if let Some(&role) = roles.iter().find(|role| role.is_side()) {
        return Err(ValidationError::SideRoleInChain { role });
    }

    match rocket_type {
        RocketType::Stage1_4 => match_stack(&roles, &STAGE1_STACK)?,
        RocketType::Stage2_7_Large => {
            check_stage2(registry, &chain, &roles)?;
        }
        RocketType::Booster_10 => {
            match_stack(&roles, &BOOSTER_STACK)?;
            check_side_boosters(registry, &graph)?;
        }
    }

    debug!(%rocket_type, count, "rocket validated");
    Ok(LaunchReport {
        rocket_type,
        pause_before_frame: rocket_type.pause_before_frame(),
        result_code: rocket_type.result_code(),
    })
}

/// Human-readable list of parts a configuration requires, for error text.
fn required_parts(count: usize) -> &'static str {
    match count {
        4 => "Payload, Separator2, CoreTank, CoreThruster",
        7 => "Payload, Separator2, CoreTank, CoreThruster, Separator1, LiquidTank, LargeThruster",
        10 => "full booster configuration with SideTank and SideThrusters",
        _ => "required parts",
    }
}

/// Require the chain to equal the expected stack exactly.
fn match_stack(roles: &[PartRole], expected: &[PartRole]) -> Result<(), ValidationError> {
    if roles.len() != expected.len() {
        return Err(ValidationError::ChainLength {
            expected: expected.len(),
            found: roles.len(),
        });
    }
    for (index, (&found, &expected)) in roles.iter().zip(expected).enumerate() {
        if found != expected {
            return Err(ValidationError::ChainOrder {
                index,
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// 7-part rule: six-entry core stack prefix, then a large thruster in the
/// seventh stack position.
fn check_stage2(
    registry: &Registry,
    chain: &[PartId],
    roles: &[PartRole],
) -> Result<(), ValidationError> {
    if roles.len() < STAGE2_PREFIX.len() {
        return Err(ValidationError::ChainTooShort { len: roles.len() });
    }
    for (index, (&found, &expected)) in roles.iter().zip(&STAGE2_PREFIX).enumerate() {
        if found != expected {
            return Err(ValidationError::ChainOrder {
                index,
                expected,
                found,
            });
        }
    }

    // The seventh part either terminates the chain or, if its role is a side
    // role, is the one part left out of it.
    let seventh = if let Some(&role) = roles.get(STAGE2_PREFIX.len()) {
        role
    } else if let Some(role) = registry
        .parts()
        .find(|(id, _)| !chain.contains(id))
        .map(|(_, part)| part.role())
    {
        role
    } else {
        return Err(ValidationError::ChainTooShort { len: roles.len() });
    };

    if seventh != PartRole::LargeThruster {
        return Err(ValidationError::InvalidFinalThruster { found: seventh });
    }
    Ok(())
}

/// 10-part rule: exactly one side tank wired to one core part and two side
/// thrusters.
fn check_side_boosters(
    registry: &Registry,
    graph: &ConnectionGraph,
) -> Result<(), ValidationError> {
    let side_tanks = registry.parts_with_role(PartRole::SideTank);
    let side_thrusters = registry.parts_with_role(PartRole::SideThruster);

    if side_tanks.len() != 1 || side_thrusters.len() != 2 {
        return Err(ValidationError::InvalidSideBoosterCount {
            side_tanks: side_tanks.len(),
            side_thrusters: side_thrusters.len(),
        });
    }

    let side_tank = side_tanks[0];
    let mut thruster_links = 0;
    let mut core_links = 0;
    for &neighbor in graph.neighbors(side_tank) {
        match registry.get(neighbor).map(Part::role) {
            Some(PartRole::SideThruster) => thruster_links += 1,
            Some(role) if !role.is_side() => core_links += 1,
            _ => {}
        }
    }

    if core_links != 1 || thruster_links != 2 {
        return Err(ValidationError::SideTankTopology {
            core_links,
            thruster_links,
        });
    }
    Ok(())
}
