//! Character spec validation logic.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::spec::{
    CharacterSpec, ModuleParams, ModuleSpec, BASE_MODULE, BASE_SPACE_OUTS, SPEC_VERSION,
};

/// Regex pattern for a valid character_id.
/// Starts with a lowercase letter, followed by 2-63 lowercase letters,
/// digits, underscores, or hyphens.
const CHARACTER_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]{2,63}$";

/// Regex pattern for a valid module name (PascalCase, used in node names).
const MODULE_NAME_PATTERN: &str = r"^[A-Z][A-Za-z0-9]{0,31}$";

/// Maximum joints in any single chain.
const MAX_JOINT_COUNT: u8 = 64;

static CHARACTER_ID_REGEX: OnceLock<Regex> = OnceLock::new();
static MODULE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn character_id_regex() -> &'static Regex {
    CHARACTER_ID_REGEX
        .get_or_init(|| Regex::new(CHARACTER_ID_PATTERN).expect("invalid regex pattern"))
}

fn module_name_regex() -> &'static Regex {
    MODULE_NAME_REGEX
        .get_or_init(|| Regex::new(MODULE_NAME_PATTERN).expect("invalid regex pattern"))
}

/// Checks whether a character_id is valid.
pub fn is_valid_character_id(id: &str) -> bool {
    character_id_regex().is_match(id)
}

/// Validates a character spec and returns all findings.
///
/// # Example
/// ```
/// use skelform_spec::{CharacterSpec, ModuleSpec, ModuleParams, Zone};
/// use skelform_spec::validation::validate_spec;
///
/// let spec = CharacterSpec::builder("dragon-01")
///     .description("A test dragon")
///     .module(ModuleSpec::new("Torso", Zone::Center, ModuleParams::Torso {
///         spine_count: 3,
///         neck_count: 4,
///         spine_secondary: vec![],
///         neck_secondary: vec![],
///         axis_orient: Default::default(),
///     }))
///     .build();
///
/// let result = validate_spec(&spec);
/// assert!(result.is_ok());
/// ```
pub fn validate_spec(spec: &CharacterSpec) -> ValidationResult {
    let mut result = ValidationResult::new();

    validate_spec_version(spec, &mut result);
    validate_character_id(spec, &mut result);
    validate_module_names(spec, &mut result);

    for (index, module) in spec.modules.iter().enumerate() {
        validate_module_params(module, index, &mut result);
        validate_placements(module, index, &mut result);
        validate_exports(module, index, &mut result);
        validate_dynamics(module, index, &mut result);
    }

    validate_attachments(spec, &mut result);
    validate_attachment_graph(spec, &mut result);
    check_warnings(spec, &mut result);

    result
}

fn validate_spec_version(spec: &CharacterSpec, result: &mut ValidationResult) {
    if spec.spec_version != SPEC_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedSpecVersion,
            format!(
                "spec_version must be {}, got {}",
                SPEC_VERSION, spec.spec_version
            ),
            "spec_version",
        ));
    }
}

fn validate_character_id(spec: &CharacterSpec, result: &mut ValidationResult) {
    if !is_valid_character_id(&spec.character_id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCharacterId,
            format!(
                "character_id must match pattern '{}', got '{}'",
                CHARACTER_ID_PATTERN, spec.character_id
            ),
            "character_id",
        ));
    }
}

fn validate_module_names(spec: &CharacterSpec, result: &mut ValidationResult) {
    let mut seen: HashSet<String> = HashSet::new();
    for (index, module) in spec.modules.iter().enumerate() {
        let path = format!("modules[{index}].name");
        if !module_name_regex().is_match(&module.name) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidModuleName,
                format!(
                    "module name must match pattern '{}', got '{}'",
                    MODULE_NAME_PATTERN, module.name
                ),
                path.clone(),
            ));
        }
        if module.name == BASE_MODULE {
            result.add_error(ValidationError::with_path(
                ErrorCode::ReservedModuleName,
                format!("`{BASE_MODULE}` is reserved for the implicit base module"),
                path,
            ));
        }
        if !seen.insert(module.ident()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateModule,
                format!("module `{}` is declared more than once", module.ident()),
                format!("modules[{index}]"),
            ));
        }
    }
}

fn check_joint_count(count: u8, path: String, result: &mut ValidationResult) {
    if count == 0 || count > MAX_JOINT_COUNT {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidJointCount,
            format!("joint count must be 1..={MAX_JOINT_COUNT}, got {count}"),
            path,
        ));
    }
}

fn check_joint_indices(
    indices: &[u8],
    count: u8,
    code: ErrorCode,
    path: String,
    result: &mut ValidationResult,
) {
    let mut seen = HashSet::new();
    for &index in indices {
        if index == 0 || index > count {
            result.add_error(ValidationError::with_path(
                code,
                format!("joint index {index} is outside 1..={count}"),
                path.clone(),
            ));
        } else if !seen.insert(index) {
            result.add_error(ValidationError::with_path(
                code,
                format!("joint index {index} is listed more than once"),
                path.clone(),
            ));
        }
    }
}

fn validate_module_params(module: &ModuleSpec, index: usize, result: &mut ValidationResult) {
    let base = format!("modules[{index}].params");
    match &module.params {
        ModuleParams::Torso {
            spine_count,
            neck_count,
            spine_secondary,
            neck_secondary,
            ..
        } => {
            check_joint_count(*spine_count, format!("{base}.spine_count"), result);
            check_joint_count(*neck_count, format!("{base}.neck_count"), result);
            check_joint_indices(
                spine_secondary,
                *spine_count,
                ErrorCode::SecondaryJointOutOfRange,
                format!("{base}.spine_secondary"),
                result,
            );
            check_joint_indices(
                neck_secondary,
                *neck_count,
                ErrorCode::SecondaryJointOutOfRange,
                format!("{base}.neck_secondary"),
                result,
            );
        }
        ModuleParams::Chain {
            joint_count,
            control_joints,
            ..
        } => {
            check_joint_count(*joint_count, format!("{base}.joint_count"), result);
            check_joint_indices(
                control_joints,
                *joint_count,
                ErrorCode::ControlJointOutOfRange,
                format!("{base}.control_joints"),
                result,
            );
        }
        ModuleParams::HindLeg | ModuleParams::FrontLeg | ModuleParams::Eye
        | ModuleParams::HalfMuscle => {}
        ModuleParams::Digits { digits, .. } => {
            if digits.is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidDigits,
                    "digits list must not be empty",
                    format!("{base}.digits"),
                ));
            }
            let mut seen = HashSet::new();
            for (digit_index, digit) in digits.iter().enumerate() {
                let digit_path = format!("{base}.digits[{digit_index}]");
                if !module_name_regex().is_match(&digit.label) {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::InvalidDigits,
                        format!("digit label `{}` is not PascalCase", digit.label),
                        digit_path.clone(),
                    ));
                }
                if !seen.insert(digit.label.clone()) {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::InvalidDigits,
                        format!("digit label `{}` is listed more than once", digit.label),
                        digit_path.clone(),
                    ));
                }
                check_joint_count(digit.joint_count, format!("{digit_path}.joint_count"), result);
            }
        }
        ModuleParams::Appendage { joint_count, .. } => {
            check_joint_count(*joint_count, format!("{base}.joint_count"), result);
        }
        ModuleParams::Twist {
            joints,
            twist_count,
        } => {
            if joints.is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidTwistJoints,
                    "twist joint list must not be empty",
                    format!("{base}.joints"),
                ));
            }
            let mut seen = HashSet::new();
            for joint in joints {
                if !seen.insert(joint.clone()) {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::InvalidTwistJoints,
                        format!("twist joint `{joint}` is listed more than once"),
                        format!("{base}.joints"),
                    ));
                }
            }
            check_joint_count(*twist_count, format!("{base}.twist_count"), result);
        }
    }
}

fn validate_placements(module: &ModuleSpec, index: usize, result: &mut ValidationResult) {
    for (label, placement) in &module.placements {
        if placement.scale.iter().any(|&s| s == 0.0) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidPlacementScale,
                format!("placement `{label}` has a zero scale component"),
                format!("modules[{index}].placements.{label}"),
            ));
        }
    }
}

fn validate_exports(module: &ModuleSpec, index: usize, result: &mut ValidationResult) {
    let joint_labels: HashSet<String> =
        module.params.joint_labels(&module.name).into_iter().collect();
    for export in &module.exports {
        if !joint_labels.contains(export) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnknownExport,
                format!(
                    "module `{}` has no bind joint labeled `{export}`",
                    module.ident()
                ),
                format!("modules[{index}].exports"),
            ));
        }
    }
}

fn validate_dynamics(module: &ModuleSpec, index: usize, result: &mut ValidationResult) {
    if module.dynamics.is_some() && !module.params.is_chain() {
        result.add_error(ValidationError::with_path(
            ErrorCode::DynamicsNotSupported,
            format!(
                "dynamics are only supported on chain modules, `{}` is `{}`",
                module.ident(),
                module.params.kind_str()
            ),
            format!("modules[{index}].dynamics"),
        ));
    }
}

fn validate_attachments(spec: &CharacterSpec, result: &mut ValidationResult) {
    let producers: HashMap<String, &ModuleSpec> =
        spec.modules.iter().map(|m| (m.ident(), m)).collect();

    for (index, module) in spec.modules.iter().enumerate() {
        let space_ins: HashSet<String> = module.params.space_ins().into_iter().collect();
        let mut driven: HashSet<&str> = HashSet::new();

        for (att_index, att) in module.attachments.iter().enumerate() {
            let path = format!("modules[{index}].attachments[{att_index}]");

            if !space_ins.contains(&att.socket) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::UnknownConsumerSocket,
                    format!(
                        "module `{}` has no input socket `{}`",
                        module.ident(),
                        att.socket
                    ),
                    format!("{path}.socket"),
                ));
            }

            if !driven.insert(att.socket.as_str()) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::DuplicateAttachmentSocket,
                    format!(
                        "input socket `{}` of `{}` is driven by more than one attachment",
                        att.socket,
                        module.ident()
                    ),
                    format!("{path}.socket"),
                ));
            }

            if att.producer == module.ident() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::SelfAttachment,
                    format!("module `{}` cannot attach to itself", module.ident()),
                    format!("{path}.producer"),
                ));
                continue;
            }

            let producer_outs: Option<Vec<String>> = if att.producer == BASE_MODULE {
                Some(BASE_SPACE_OUTS.iter().map(|s| s.to_string()).collect())
            } else {
                producers.get(att.producer.as_str()).map(|p| p.space_outs())
            };

            match producer_outs {
                None => {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::UnknownProducer,
                        format!("no module named `{}`", att.producer),
                        format!("{path}.producer"),
                    ));
                }
                Some(outs) => {
                    if !outs.contains(&att.producer_socket) {
                        result.add_error(ValidationError::with_path(
                            ErrorCode::UnknownProducerSocket,
                            format!(
                                "module `{}` does not expose output socket `{}`",
                                att.producer, att.producer_socket
                            ),
                            format!("{path}.producer_socket"),
                        ));
                    }
                }
            }
        }
    }
}

/// Detects cycles in the module attachment graph with a three-color DFS.
fn validate_attachment_graph(spec: &CharacterSpec, result: &mut ValidationResult) {
    let index_of: HashMap<String, usize> = spec
        .modules
        .iter()
        .enumerate()
        .map(|(i, m)| (m.ident(), i))
        .collect();

    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    fn visit(
        node: usize,
        modules: &[ModuleSpec],
        index_of: &HashMap<String, usize>,
        colors: &mut [Color],
    ) -> Option<usize> {
        colors[node] = Color::Gray;
        for att in &modules[node].attachments {
            if let Some(&producer) = index_of.get(att.producer.as_str()) {
                match colors[producer] {
                    Color::Gray => return Some(producer),
                    Color::White => {
                        if let Some(found) = visit(producer, modules, index_of, colors) {
                            return Some(found);
                        }
                    }
                    Color::Black => {}
                }
            }
        }
        colors[node] = Color::Black;
        None
    }

    let mut colors = vec![Color::White; spec.modules.len()];
    for start in 0..spec.modules.len() {
        if colors[start] == Color::White {
            if let Some(member) = visit(start, &spec.modules, &index_of, &mut colors) {
                result.add_error(ValidationError::new(
                    ErrorCode::AttachmentCycle,
                    format!(
                        "attachment cycle through module `{}`",
                        spec.modules[member].ident()
                    ),
                ));
                return;
            }
        }
    }
}

fn check_warnings(spec: &CharacterSpec, result: &mut ValidationResult) {
    if spec.description.is_none() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingDescription,
            "spec has no description",
            "description",
        ));
    }

    for (index, module) in spec.modules.iter().enumerate() {
        let pivot_labels = module.params.pivot_labels(&module.name);
        if !pivot_labels.is_empty() && module.placements.is_empty() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::NoPlacements,
                format!(
                    "module `{}` has no authored placements; pivots stay at defaults",
                    module.ident()
                ),
                format!("modules[{index}].placements"),
            ));
        }
        let labels: HashSet<String> = pivot_labels.into_iter().collect();
        for label in module.placements.keys() {
            if !labels.contains(label) {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::UnknownPlacementLabel,
                    format!(
                        "placement `{label}` does not match any pivot of `{}`",
                        module.ident()
                    ),
                    format!("modules[{index}].placements.{label}"),
                ));
            }
        }
        if !module.params.space_ins().is_empty() && module.attachments.is_empty() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::NoAttachments,
                format!(
                    "module `{}` declares input sockets but no attachments",
                    module.ident()
                ),
                format!("modules[{index}].attachments"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{AttachmentSpec, AxisOrient, DigitSpec, DynamicsSpec, Placement};
    use crate::zone::Zone;

    fn torso() -> ModuleSpec {
        ModuleSpec::new(
            "Torso",
            Zone::Center,
            ModuleParams::Torso {
                spine_count: 3,
                neck_count: 4,
                spine_secondary: vec![],
                neck_secondary: vec![],
                axis_orient: AxisOrient::YUp,
            },
        )
        .attach(AttachmentSpec::new("cog", "Base", "cog"))
        .place("Pelvis", Placement::at(0.0, 130.0, -87.0))
    }

    fn tail() -> ModuleSpec {
        ModuleSpec::new(
            "Tail",
            Zone::Center,
            ModuleParams::Chain {
                joint_count: 8,
                control_joints: vec![1, 4, 8],
                ik: true,
            },
        )
        .attach(AttachmentSpec::new("root", "Torso", "pelvis"))
        .place("Tail01", Placement::at(0.0, 119.0, -118.0))
    }

    #[test]
    fn test_valid_spec_passes() {
        let spec = CharacterSpec::builder("dragon-01")
            .description("test")
            .module(torso())
            .module(tail())
            .build();
        let result = validate_spec(&spec);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_character_id() {
        let spec = CharacterSpec::builder("BAD ID").module(torso()).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidCharacterId));
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let spec = CharacterSpec::builder("dragon-01")
            .module(torso())
            .module(torso())
            .build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::DuplicateModule));
    }

    #[test]
    fn test_same_name_different_zones_allowed() {
        let left = ModuleSpec::new("TrexLeg", Zone::Left, ModuleParams::HindLeg)
            .attach(AttachmentSpec::new("pelvis", "Torso", "pelvis"))
            .attach(AttachmentSpec::new("cog", "Base", "cog"))
            .attach(AttachmentSpec::new("all", "Base", "all"))
            .place("Hip", Placement::at(18.0, 127.0, -90.0));
        let mut right = left.clone();
        right.zone = Zone::Right;
        let spec = CharacterSpec::builder("dragon-01")
            .description("test")
            .module(torso())
            .module(left)
            .module(right)
            .build();
        let result = validate_spec(&spec);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
    }

    #[test]
    fn test_reserved_module_name_rejected() {
        let module = ModuleSpec::new("Base", Zone::Center, ModuleParams::Eye);
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::ReservedModuleName));
    }

    #[test]
    fn test_unknown_producer_rejected() {
        let mut module = tail();
        module.attachments[0].producer = "Torzo".to_string();
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnknownProducer));
    }

    #[test]
    fn test_unknown_producer_socket_rejected() {
        let mut module = tail();
        module.attachments[0].producer_socket = "hips".to_string();
        let spec = CharacterSpec::builder("dragon-01")
            .module(torso())
            .module(module)
            .build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnknownProducerSocket));
    }

    #[test]
    fn test_unknown_consumer_socket_rejected() {
        let mut module = tail();
        module.attachments[0].socket = "hips".to_string();
        let spec = CharacterSpec::builder("dragon-01")
            .module(torso())
            .module(module)
            .build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnknownConsumerSocket));
    }

    #[test]
    fn test_duplicate_attachment_socket_rejected() {
        let module = tail().attach(AttachmentSpec::new("root", "Base", "cog"));
        let spec = CharacterSpec::builder("dragon-01")
            .module(torso())
            .module(module)
            .build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::DuplicateAttachmentSocket));
    }

    #[test]
    fn test_attachment_cycle_rejected() {
        let a = ModuleSpec::new(
            "FinA",
            Zone::Center,
            ModuleParams::Appendage {
                joint_count: 2,
                axis_orient: AxisOrient::ZUp,
            },
        )
        .attach(AttachmentSpec::new("root", "FinB", "tip"));
        let b = ModuleSpec::new(
            "FinB",
            Zone::Center,
            ModuleParams::Appendage {
                joint_count: 2,
                axis_orient: AxisOrient::ZUp,
            },
        )
        .attach(AttachmentSpec::new("root", "FinA", "tip"));
        let spec = CharacterSpec::builder("dragon-01").module(a).module(b).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::AttachmentCycle));
    }

    #[test]
    fn test_control_joint_out_of_range() {
        let module = ModuleSpec::new(
            "Tail",
            Zone::Center,
            ModuleParams::Chain {
                joint_count: 4,
                control_joints: vec![1, 9],
                ik: true,
            },
        );
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::ControlJointOutOfRange));
    }

    #[test]
    fn test_dynamics_on_non_chain_rejected() {
        let module = ModuleSpec::new("Ear", Zone::Left, ModuleParams::Appendage {
            joint_count: 3,
            axis_orient: AxisOrient::ZUp,
        })
        .with_dynamics(DynamicsSpec::default());
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::DynamicsNotSupported));
    }

    #[test]
    fn test_unknown_export_rejected() {
        let module = torso().export("Spine09");
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnknownExport));
    }

    #[test]
    fn test_invalid_digits() {
        let module = ModuleSpec::new(
            "Toe",
            Zone::Left,
            ModuleParams::Digits {
                digits: vec![DigitSpec::new("A", 3), DigitSpec::new("A", 3)],
                ik: true,
            },
        );
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidDigits));
    }

    #[test]
    fn test_zero_scale_placement_rejected() {
        let module = torso().place("Chest", Placement::at(0.0, 128.0, 46.0).scaled(1.0, 0.0, 1.0));
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::InvalidPlacementScale));
    }

    #[test]
    fn test_warnings() {
        let module = ModuleSpec::new(
            "Whisker",
            Zone::Left,
            ModuleParams::Chain {
                joint_count: 4,
                control_joints: vec![],
                ik: true,
            },
        )
        .place("Nope", Placement::at(0.0, 0.0, 0.0));
        let spec = CharacterSpec::builder("dragon-01").module(module).build();
        let result = validate_spec(&spec);
        assert!(result.is_ok());
        let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&WarningCode::MissingDescription));
        assert!(codes.contains(&WarningCode::UnknownPlacementLabel));
        assert!(codes.contains(&WarningCode::NoAttachments));
    }
}
