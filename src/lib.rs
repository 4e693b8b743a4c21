//! Connectivity graph model and structural validator for snap-together
//! rocket assembly.
//!
//! Discrete rocket parts are registered into a [`Registry`], connected by
//! dragging them into proximity (snap resolution), and validated against a
//! small set of recognized configurations before launch. Rendering, drag
//! input, camera work, video playback, and audio are external collaborators:
//! they feed attach/detach/destroy requests in and consume validation
//! results and snap outcomes.
//!
//! The crate is organized around these pieces:
//!
//! - [`Part`] / [`PartRole`] - one component instance and its fixed category
//! - [`Registry`] - the live set of parts; all attach/detach bookkeeping
//! - [`snap`] - proximity-based connection of a released part
//! - [`ConnectionGraph`] - symmetric adjacency rebuilt from ownership edges
//! - [`main_chain`] - the payload-rooted main stack of the rocket
//! - [`validate`] - accept/reject plus a [`RocketType`] classification
//!
//! # Quick Start
//!
//! ```
//! use rocket_assembly::{Part, PartRole, Registry, RocketType, validate};
//!
//! let mut registry = Registry::new();
//! let payload = registry.insert(Part::new(PartRole::Payload));
//! let separator = registry.insert(Part::new(PartRole::Separator2));
//! let tank = registry.insert(Part::new(PartRole::CoreTank));
//! let engine = registry.insert(Part::new(PartRole::CoreThruster));
//!
//! registry.attach(separator, payload).unwrap();
//! registry.attach(tank, separator).unwrap();
//! registry.attach(engine, tank).unwrap();
//!
//! let report = validate(&registry).unwrap();
//! assert_eq!(report.rocket_type, RocketType::Stage1_4);
//! ```
//!
//! # Snapping
//!
//! ```
//! use nalgebra::Vector3;
//! use rocket_assembly::{Part, PartRole, Registry, SnapConfig, SnapOutcome, snap};
//!
//! let mut registry = Registry::new();
//! let tank = registry.insert(
//!     Part::new(PartRole::CoreTank)
//!         .with_snap_point(Vector3::new(0.0, 0.5, 0.0)),
//! );
//! let separator = registry.insert(
//!     Part::new(PartRole::Separator2)
//!         .with_position(0.0, 1.3, 0.0)
//!         .with_snap_point(Vector3::new(0.0, -0.5, 0.0)),
//! );
//!
//! let outcome = snap::snap(&mut registry, separator, &SnapConfig::default()).unwrap();
//! assert!(matches!(outcome, SnapOutcome::Snapped { partner, .. } if partner == tank));
//!
//! // The anchors now coincide exactly.
//! let anchor = registry.get(separator).unwrap().world_snap_point(0).unwrap();
//! assert!((anchor.y - 0.5).abs() < 1e-12);
//! ```
//!
//! # Features
//!
//! - `serde` - serialization for the plain data types (roles, config,
//!   reports)
//!
//! # Quality Standards
//!
//! - Zero `unwrap`/`expect` in library code
//! - Zero clippy/doc warnings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod chain;
mod error;
mod graph;
pub mod inspect;
mod part;
mod registry;
pub mod snap;
mod summary;
mod validate;

pub use chain::{main_chain, main_chain_roles};
pub use error::{AssemblyError, AssemblyResult, ValidationError};
pub use graph::ConnectionGraph;
pub use part::{Part, PartId, PartRole};
pub use registry::Registry;
pub use snap::{SnapCandidate, SnapConfig, SnapDecision, SnapOutcome};
pub use summary::MassSummary;
pub use validate::{LaunchReport, RocketType, validate};

// Re-export commonly used geometry types for convenience
pub use nalgebra::{Point3, Vector3};
