//! Skelform Character Spec Library
//!
//! This crate provides the document model, validation, and hashing for
//! skelform character specs. A spec is a JSON document listing the
//! anatomical modules of one character (torso, legs, tail, fins, eyes, …),
//! their authored pivot placements, and the attachments that wire them
//! into a single hierarchy.
//!
//! # Example
//!
//! ```
//! use skelform_spec::{AttachmentSpec, CharacterSpec, ModuleParams, ModuleSpec, Zone};
//! use skelform_spec::validation::validate_spec;
//! use skelform_spec::hash::canonical_spec_hash;
//!
//! let spec = CharacterSpec::builder("emberwyrm-01")
//!     .description("Quadruped dragon")
//!     .tag("quadruped")
//!     .module(
//!         ModuleSpec::new("Tail", Zone::Center, ModuleParams::Chain {
//!             joint_count: 8,
//!             control_joints: vec![1, 4, 8],
//!             ik: true,
//!         })
//!         .attach(AttachmentSpec::new("root", "Base", "cog")),
//!     )
//!     .build();
//!
//! let result = validate_spec(&spec);
//! assert!(result.is_ok());
//!
//! let hash = canonical_spec_hash(&spec).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`hash`]: Canonical hashing and the pose digest
//! - [`report`]: Build report types and builder
//! - [`spec`]: Main spec types and builder
//! - [`validation`]: Spec validation functions
//! - [`zone`]: Body zones and naming conventions

pub mod error;
pub mod hash;
pub mod report;
pub mod spec;
pub mod validation;
pub mod zone;

// Re-export commonly used types at the crate root
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::{canonical_spec_hash, canonical_value_hash, PoseDigest};
pub use report::{BuildReport, ModuleReport, ReportBuilder, REPORT_VERSION};
pub use spec::{
    AttachmentSpec, AxisOrient, CharacterSpec, CharacterSpecBuilder, DigitSpec, DynamicsSpec,
    ModuleParams, ModuleSpec, Placement, BASE_MODULE, BASE_SPACE_OUTS, SPEC_VERSION,
};
pub use validation::{is_valid_character_id, validate_spec};
pub use zone::Zone;
