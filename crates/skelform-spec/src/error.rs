//! Error types for spec validation and processing.

use thiserror::Error;

/// Error codes for character spec validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Document errors (E001-E003)
    /// E001: Unsupported spec_version
    UnsupportedSpecVersion,
    /// E002: Invalid character_id format
    InvalidCharacterId,
    /// E003: Invalid module name
    InvalidModuleName,

    // Module errors (E004-E009)
    /// E004: Duplicate zone-qualified module identifier
    DuplicateModule,
    /// E005: Module uses the reserved base module name
    ReservedModuleName,
    /// E006: Joint count outside the valid range
    InvalidJointCount,
    /// E007: Control joint index out of range or duplicated
    ControlJointOutOfRange,
    /// E008: Secondary joint index out of range
    SecondaryJointOutOfRange,
    /// E009: Digit list empty, duplicated, or mislabeled
    InvalidDigits,

    // Attachment errors (E010-E014)
    /// E010: Attachment references an unknown producer module
    UnknownProducer,
    /// E011: Module attaches to itself
    SelfAttachment,
    /// E012: Attachment cycle between modules
    AttachmentCycle,
    /// E013: Attachment names a socket the consumer does not declare
    UnknownConsumerSocket,
    /// E014: Attachment names a socket the producer does not expose
    UnknownProducerSocket,

    // Wiring/data errors (E015-E019)
    /// E015: The same consumer socket is driven by two attachments
    DuplicateAttachmentSocket,
    /// E016: Exported joint label does not exist on the module
    UnknownExport,
    /// E017: Placement has a zero scale component
    InvalidPlacementScale,
    /// E018: Dynamics configured on a module kind that does not support it
    DynamicsNotSupported,
    /// E019: Twist joint list empty or duplicated
    InvalidTwistJoints,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedSpecVersion => "E001",
            ErrorCode::InvalidCharacterId => "E002",
            ErrorCode::InvalidModuleName => "E003",
            ErrorCode::DuplicateModule => "E004",
            ErrorCode::ReservedModuleName => "E005",
            ErrorCode::InvalidJointCount => "E006",
            ErrorCode::ControlJointOutOfRange => "E007",
            ErrorCode::SecondaryJointOutOfRange => "E008",
            ErrorCode::InvalidDigits => "E009",
            ErrorCode::UnknownProducer => "E010",
            ErrorCode::SelfAttachment => "E011",
            ErrorCode::AttachmentCycle => "E012",
            ErrorCode::UnknownConsumerSocket => "E013",
            ErrorCode::UnknownProducerSocket => "E014",
            ErrorCode::DuplicateAttachmentSocket => "E015",
            ErrorCode::UnknownExport => "E016",
            ErrorCode::InvalidPlacementScale => "E017",
            ErrorCode::DynamicsNotSupported => "E018",
            ErrorCode::InvalidTwistJoints => "E019",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for character spec validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Missing description
    MissingDescription,
    /// W002: Module has pivots but no authored placements
    NoPlacements,
    /// W003: Module declares inputs but no attachments
    NoAttachments,
    /// W004: Placement label does not match any pivot of the module
    UnknownPlacementLabel,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingDescription => "W001",
            WarningCode::NoPlacements => "W002",
            WarningCode::NoAttachments => "W003",
            WarningCode::UnknownPlacementLabel => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Document path to the problematic field (e.g., "modules[2].attachments[0]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a document path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Document path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a document path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for spec operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Spec validation failed with one or more errors.
    #[error("spec validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of spec validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates an empty (passing) validation result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}
