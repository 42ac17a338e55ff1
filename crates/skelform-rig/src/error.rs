//! Assembly error types.

use thiserror::Error;

use crate::orchestrator::ModuleState;
use crate::socket::SocketKey;
use skelform_scene::SceneError;
use skelform_spec::SpecError;

/// Errors raised while assembling a character rig.
///
/// The first error aborts the remaining build sequence; there is no
/// partial rollback, the caller discards the scene.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The input spec failed validation.
    #[error("spec failed validation with {count} error(s), first: {first}")]
    InvalidSpec {
        /// Number of validation errors.
        count: usize,
        /// The first validation error, for context.
        first: String,
    },

    /// A scene mutation failed (name collision, bad attribute, cycle).
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Spec serialization failed while hashing or reporting.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A link referenced a socket nobody registered.
    #[error("unknown socket `{0}`")]
    UnknownSocket(SocketKey),

    /// A socket key was registered twice.
    #[error("socket `{0}` is already registered")]
    DuplicateSocket(SocketKey),

    /// A link's driver is not a SpaceOut or its driven is not a SpaceIn.
    #[error("`{driver}` cannot drive `{driven}`: links go SpaceOut -> SpaceIn")]
    SocketKindMismatch {
        /// The offered driver socket.
        driver: SocketKey,
        /// The offered driven socket.
        driven: SocketKey,
    },

    /// The driven SpaceIn already has its primary driver.
    #[error("socket `{0}` already has a primary driver")]
    SocketAlreadyDriven(SocketKey),

    /// A module was wired before one of its producers was built.
    #[error("cannot wire `{consumer}`: producer `{producer}` is {state}")]
    ProducerNotReady {
        /// The consuming module.
        consumer: String,
        /// The producer module that is not ready.
        producer: String,
        /// The producer's current state.
        state: ModuleState,
    },

    /// An attachment referenced a module the build does not know.
    #[error("unknown module `{0}`")]
    UnknownModule(String),

    /// A factory asked for a pivot label the pivot set does not contain.
    #[error("module `{module}` has no pivot labeled `{label}`")]
    UnknownPivot {
        /// The module identifier.
        module: String,
        /// The missing pivot label.
        label: String,
    },

    /// An export referenced a bind joint label the module does not create.
    #[error("module `{module}` has no bind joint labeled `{label}`")]
    UnknownExport {
        /// The module identifier.
        module: String,
        /// The missing joint label.
        label: String,
    },

    /// Dynamics were requested for a module without IK handles.
    #[error("module `{0}` has no chain handles; dynamics need an IK chain")]
    DynamicsUnsupported(String),
}

impl BuildError {
    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::InvalidSpec { .. } => "RIG_001",
            BuildError::Scene(_) => "RIG_002",
            BuildError::Spec(_) => "RIG_003",
            BuildError::UnknownSocket(_) => "RIG_004",
            BuildError::DuplicateSocket(_) => "RIG_005",
            BuildError::SocketKindMismatch { .. } => "RIG_006",
            BuildError::SocketAlreadyDriven(_) => "RIG_007",
            BuildError::ProducerNotReady { .. } => "RIG_008",
            BuildError::UnknownModule(_) => "RIG_009",
            BuildError::UnknownPivot { .. } => "RIG_010",
            BuildError::UnknownExport { .. } => "RIG_011",
            BuildError::DynamicsUnsupported(_) => "RIG_012",
        }
    }

    /// Returns the error category for reporting.
    pub fn category(&self) -> &'static str {
        "assembly"
    }
}

/// Convenience alias for assembly results.
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = BuildError::UnknownModule("Tail".to_string());
        assert_eq!(err.code(), "RIG_009");
        assert_eq!(err.category(), "assembly");
    }

    #[test]
    fn test_scene_error_conversion() {
        let err: BuildError = SceneError::NameCollision("Cog_Piv".to_string()).into();
        assert_eq!(err.code(), "RIG_002");
        assert!(err.to_string().contains("Cog_Piv"));
    }
}
