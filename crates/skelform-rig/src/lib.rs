//! Skelform Rig Assembler
//!
//! Assembles a complete articulated character skeleton out of
//! independently authored anatomical modules, wiring them into one
//! coherent, hierarchically driven transform graph with live display
//! attribute propagation.
//!
//! The assembly protocol, not any single module's mechanism, is the
//! point: modules declare typed attachment sockets, the orchestrator
//! links producer sockets to consumer sockets with pose-preserving
//! semantics in dependency order, and a global cascade source feeds
//! display and color state to every module root, live.
//!
//! # Example
//!
//! ```
//! use skelform_rig::orchestrator::assemble;
//! use skelform_spec::{AttachmentSpec, CharacterSpec, ModuleParams, ModuleSpec, Placement, Zone};
//!
//! let spec = CharacterSpec::builder("wyrm-01")
//!     .description("A minimal serpent")
//!     .module(
//!         ModuleSpec::new("Tail", Zone::Center, ModuleParams::Chain {
//!             joint_count: 8,
//!             control_joints: vec![1, 4, 8],
//!             ik: true,
//!         })
//!         .attach(AttachmentSpec::new("root", "Base", "cog"))
//!         .place("Tail01", Placement::at(0.0, 100.0, -10.0)),
//!     )
//!     .build();
//!
//! let rig = assemble(&spec).unwrap();
//! assert_eq!(rig.module("Tail").unwrap().rig.bind_joints.len(), 8);
//! ```
//!
//! # Modules
//!
//! - [`socket`]: Attachment sockets and the semantic-name registry
//! - [`pivots`]: Pivot creation and authored placement
//! - [`modules`]: Per-kind rig factories
//! - [`cascade`]: The live display/color attribute cascade
//! - [`collaborators`]: Geometry binding and safety cover contracts
//! - [`dynamics`]: Chain dynamics control
//! - [`orchestrator`]: The single-pass build sequence
//! - [`error`]: Assembly error types

pub mod cascade;
pub mod collaborators;
pub mod dynamics;
pub mod error;
pub mod modules;
pub mod orchestrator;
pub mod pivots;
pub mod socket;

pub use cascade::{CascadeSource, DrawStyle};
pub use collaborators::{GeometryBinder, ProxyGeometryBinder, SafetyCover, StandardSafetyCover};
pub use dynamics::{add_chain_dynamics, DynParam, DynamicsControl};
pub use error::{BuildError, BuildResult};
pub use modules::{build_rig, BaseRig, ModuleRig};
pub use orchestrator::{assemble, BuiltModule, CharacterRig, ModuleState, Orchestrator};
pub use pivots::{apply_placements, create_pivots, PivotSet};
pub use socket::{Socket, SocketKey, SocketKind, SocketRegistry};
