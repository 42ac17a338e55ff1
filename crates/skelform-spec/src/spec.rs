//! Main character spec types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::zone::Zone;

/// Current spec version.
pub const SPEC_VERSION: u32 = 1;

/// Name of the implicit base module every character has.
///
/// The base module is built by the assembler itself (master controls, the
/// top-level attachment outputs, and the cascade source); spec documents
/// may reference it as an attachment producer but may not declare it.
pub const BASE_MODULE: &str = "Base";

/// Attachment outputs exposed by the implicit base module.
pub const BASE_SPACE_OUTS: &[&str] = &["cog", "all"];

fn default_true() -> bool {
    true
}

fn default_radius() -> f64 {
    5.0
}

fn default_ctrl_radius() -> f64 {
    15.0
}

fn default_unit_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

// =============================================================================
// Character Spec
// =============================================================================

/// A complete character assembly spec.
///
/// Lists the anatomical modules of one character, their authored pivot
/// placements, and the attachments that wire them into a single hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterSpec {
    /// Spec format version.
    pub spec_version: u32,
    /// Unique character identifier (lowercase, kebab/snake case).
    pub character_id: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Freeform style tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_tags: Vec<String>,
    /// Radius of the master control circle.
    #[serde(default = "default_master_ctrl_radius")]
    pub master_ctrl_radius: f64,
    /// Authored placement of the base module's cog pivot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cog_placement: Option<Placement>,
    /// The anatomical modules to assemble.
    pub modules: Vec<ModuleSpec>,
}

fn default_master_ctrl_radius() -> f64 {
    150.0
}

impl CharacterSpec {
    /// Creates a builder for a character spec.
    pub fn builder(character_id: impl Into<String>) -> CharacterSpecBuilder {
        CharacterSpecBuilder::new(character_id)
    }

    /// Parses a spec from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, crate::error::SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the spec to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, crate::error::SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts the spec to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, crate::error::SpecError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Looks up a module by its zone-qualified identifier (e.g. `L_TrexLeg`).
    pub fn module(&self, ident: &str) -> Option<&ModuleSpec> {
        self.modules.iter().find(|m| m.ident() == ident)
    }
}

/// Builder for [`CharacterSpec`].
pub struct CharacterSpecBuilder {
    character_id: String,
    description: Option<String>,
    style_tags: Vec<String>,
    master_ctrl_radius: f64,
    cog_placement: Option<Placement>,
    modules: Vec<ModuleSpec>,
}

impl CharacterSpecBuilder {
    /// Creates a new builder with the given character id.
    pub fn new(character_id: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            description: None,
            style_tags: Vec::new(),
            master_ctrl_radius: default_master_ctrl_radius(),
            cog_placement: None,
            modules: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a style tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.style_tags.push(tag.into());
        self
    }

    /// Sets the master control radius.
    pub fn master_ctrl_radius(mut self, radius: f64) -> Self {
        self.master_ctrl_radius = radius;
        self
    }

    /// Places the base module's cog pivot.
    pub fn cog_placement(mut self, placement: Placement) -> Self {
        self.cog_placement = Some(placement);
        self
    }

    /// Adds a module.
    pub fn module(mut self, module: ModuleSpec) -> Self {
        self.modules.push(module);
        self
    }

    /// Builds the spec.
    pub fn build(self) -> CharacterSpec {
        CharacterSpec {
            spec_version: SPEC_VERSION,
            character_id: self.character_id,
            description: self.description,
            style_tags: self.style_tags,
            master_ctrl_radius: self.master_ctrl_radius,
            cog_placement: self.cog_placement,
            modules: self.modules,
        }
    }
}

// =============================================================================
// Module Spec
// =============================================================================

/// One anatomical module of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSpec {
    /// Module name (PascalCase, e.g. `Tail`, `TrexLeg`).
    pub name: String,
    /// Body zone; determines node-name prefixes and the color source.
    #[serde(default)]
    pub zone: Zone,
    /// Kind-specific construction parameters.
    pub params: ModuleParams,
    /// Joint display radius.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Control shape radius.
    #[serde(default = "default_ctrl_radius")]
    pub ctrl_radius: f64,
    /// Attachment links this module consumes from producer modules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentSpec>,
    /// Authored world-space pivot placements, keyed by pivot label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub placements: BTreeMap<String, Placement>,
    /// Extra bind joints to expose as attachment outputs, by joint label.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<String>,
    /// Chain dynamics configuration (chain modules only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamics: Option<DynamicsSpec>,
}

impl ModuleSpec {
    /// Creates a module spec with default radii and no attachments.
    pub fn new(name: impl Into<String>, zone: Zone, params: ModuleParams) -> Self {
        Self {
            name: name.into(),
            zone,
            params,
            radius: default_radius(),
            ctrl_radius: default_ctrl_radius(),
            attachments: Vec::new(),
            placements: BTreeMap::new(),
            exports: Vec::new(),
            dynamics: None,
        }
    }

    /// Returns the zone-qualified module identifier (e.g. `L_TrexLeg`).
    pub fn ident(&self) -> String {
        format!("{}{}", self.zone.prefix(), self.name)
    }

    /// Sets the joint radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the control radius.
    pub fn with_ctrl_radius(mut self, ctrl_radius: f64) -> Self {
        self.ctrl_radius = ctrl_radius;
        self
    }

    /// Adds an attachment.
    pub fn attach(mut self, attachment: AttachmentSpec) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Adds an authored pivot placement.
    pub fn place(mut self, label: impl Into<String>, placement: Placement) -> Self {
        self.placements.insert(label.into(), placement);
        self
    }

    /// Exposes a bind joint as an attachment output.
    pub fn export(mut self, joint_label: impl Into<String>) -> Self {
        self.exports.push(joint_label.into());
        self
    }

    /// Enables chain dynamics.
    pub fn with_dynamics(mut self, dynamics: DynamicsSpec) -> Self {
        self.dynamics = Some(dynamics);
        self
    }

    /// Returns the attachment output names this module exposes,
    /// including exported joints.
    pub fn space_outs(&self) -> Vec<String> {
        let mut outs = self.params.space_outs();
        for label in &self.exports {
            outs.push(label.to_lowercase());
        }
        outs
    }
}

// =============================================================================
// Module Params
// =============================================================================

/// Kind-specific module construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ModuleParams {
    /// Spine + neck + head + jaw column.
    Torso {
        /// Number of spine joints.
        #[serde(default = "default_spine_count")]
        spine_count: u8,
        /// Number of neck joints.
        #[serde(default = "default_neck_count")]
        neck_count: u8,
        /// Spine joints that receive secondary tweak controls (1-based).
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        spine_secondary: Vec<u8>,
        /// Neck joints that receive secondary tweak controls (1-based).
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        neck_secondary: Vec<u8>,
        /// Joint aim-axis orientation.
        #[serde(default)]
        axis_orient: AxisOrient,
    },
    /// IK/FK blendable joint chain (tails, whiskers, tongues).
    Chain {
        /// Number of joints in the chain.
        joint_count: u8,
        /// Chain joints that receive controls (1-based).
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        control_joints: Vec<u8>,
        /// Whether the chain gets an IK handle layer.
        #[serde(default = "default_true")]
        ik: bool,
    },
    /// Three-segment hind leg with reverse-foot pivots.
    HindLeg,
    /// Scapula-driven front leg with reverse-foot pivots.
    FrontLeg,
    /// A set of digit chains riding a foot (toes, fingers).
    Digits {
        /// The digits, in layout order.
        digits: Vec<DigitSpec>,
        /// Whether each digit gets per-joint IK controls.
        #[serde(default = "default_true")]
        ik: bool,
    },
    /// Generic FK appendage chain (ears, horns, crests, fins).
    Appendage {
        /// Number of joints in the chain.
        joint_count: u8,
        /// Joint aim-axis orientation.
        #[serde(default)]
        axis_orient: AxisOrient,
    },
    /// Single-joint aim-driven eye.
    Eye,
    /// Two-ended stretch helper spanning two producer spaces.
    HalfMuscle,
    /// Twist joints riding an existing limb's joints.
    Twist {
        /// Labels of the producer joints the twists ride.
        joints: Vec<String>,
        /// Number of twist joints per ridden joint.
        #[serde(default = "default_twist_count")]
        twist_count: u8,
    },
}

fn default_spine_count() -> u8 {
    3
}

fn default_neck_count() -> u8 {
    4
}

fn default_twist_count() -> u8 {
    3
}

/// One digit of a [`ModuleParams::Digits`] module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigitSpec {
    /// Digit label (e.g. `A`, `B`, `Thumb`).
    pub label: String,
    /// Number of joints in this digit.
    pub joint_count: u8,
}

impl DigitSpec {
    /// Creates a digit spec.
    pub fn new(label: impl Into<String>, joint_count: u8) -> Self {
        Self {
            label: label.into(),
            joint_count,
        }
    }
}

impl ModuleParams {
    /// Returns the kind as a string (matches the serde tag).
    pub fn kind_str(&self) -> &'static str {
        match self {
            ModuleParams::Torso { .. } => "torso",
            ModuleParams::Chain { .. } => "chain",
            ModuleParams::HindLeg => "hind_leg",
            ModuleParams::FrontLeg => "front_leg",
            ModuleParams::Digits { .. } => "digits",
            ModuleParams::Appendage { .. } => "appendage",
            ModuleParams::Eye => "eye",
            ModuleParams::HalfMuscle => "half_muscle",
            ModuleParams::Twist { .. } => "twist",
        }
    }

    /// Returns true for chain modules (the only kind that supports dynamics).
    pub fn is_chain(&self) -> bool {
        matches!(self, ModuleParams::Chain { .. })
    }

    /// Returns the pivot labels this module kind authors, in creation order.
    ///
    /// `name` is the module name; chain-like kinds embed it in their labels.
    pub fn pivot_labels(&self, name: &str) -> Vec<String> {
        match self {
            ModuleParams::Torso {
                spine_count,
                neck_count,
                ..
            } => {
                let mut labels = vec!["Pelvis".to_string()];
                for i in 1..=*spine_count {
                    labels.push(format!("Spine{:02}", i));
                }
                labels.push("Chest".to_string());
                for i in 1..=*neck_count {
                    labels.push(format!("Neck{:02}", i));
                }
                labels.extend(
                    ["Head", "HeadEnd", "Jaw", "JawEnd"]
                        .iter()
                        .map(|s| s.to_string()),
                );
                labels
            }
            ModuleParams::Chain { joint_count, .. } => {
                let mut labels: Vec<String> =
                    (1..=*joint_count).map(|i| format!("{name}{i:02}")).collect();
                labels.push(format!("{name}End"));
                labels
            }
            ModuleParams::HindLeg => [
                "Hip", "Knee", "Hock", "Heel", "Ankle", "Ball", "BallSole", "Toe", "SoleLF",
                "SoleLB", "SoleRF", "SoleRB", "FootUp", "KneePole",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ModuleParams::FrontLeg => [
                "Scap01", "Scap02", "Shld", "Elbow", "Fknee", "Fheel", "Fankle", "Fball",
                "FballSole", "Ftoe", "FsoleLF", "FsoleLB", "FsoleRF", "FsoleRB", "FfootUp",
                "ElbowPole",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ModuleParams::Digits { digits, .. } => {
                let mut labels = Vec::new();
                for digit in digits {
                    for i in 1..=digit.joint_count {
                        labels.push(format!("{name}{}{:02}", digit.label, i));
                    }
                    labels.push(format!("{name}{}End", digit.label));
                    labels.push(format!("{name}{}Up", digit.label));
                }
                labels
            }
            ModuleParams::Appendage { joint_count, .. } => {
                let mut labels: Vec<String> =
                    (1..=*joint_count).map(|i| format!("{name}{i:02}")).collect();
                labels.push(format!("{name}End"));
                labels.push(format!("{name}Up"));
                labels
            }
            ModuleParams::Eye => vec!["Eye".to_string()],
            ModuleParams::HalfMuscle => vec![
                format!("{name}Root"),
                format!("{name}RootUp"),
                format!("{name}Tip"),
            ],
            ModuleParams::Twist { .. } => Vec::new(),
        }
    }

    /// Returns the bind joint labels this module kind creates, in chain order.
    pub fn joint_labels(&self, name: &str) -> Vec<String> {
        match self {
            ModuleParams::Torso {
                spine_count,
                neck_count,
                ..
            } => {
                let mut labels = vec!["Pelvis".to_string()];
                for i in 1..=*spine_count {
                    labels.push(format!("Spine{:02}", i));
                }
                labels.push("Chest".to_string());
                for i in 1..=*neck_count {
                    labels.push(format!("Neck{:02}", i));
                }
                labels.push("Head".to_string());
                labels.push("Jaw".to_string());
                labels
            }
            ModuleParams::Chain { joint_count, .. } => {
                (1..=*joint_count).map(|i| format!("{name}{i:02}")).collect()
            }
            ModuleParams::HindLeg => ["Hip", "Knee", "Hock", "Ankle", "Ball", "Toe"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ModuleParams::FrontLeg => {
                ["Scap", "Shld", "Elbow", "Fknee", "Fankle", "Fball", "Ftoe"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            }
            ModuleParams::Digits { digits, .. } => {
                let mut labels = Vec::new();
                for digit in digits {
                    for i in 1..=digit.joint_count {
                        labels.push(format!("{name}{}{:02}", digit.label, i));
                    }
                }
                labels
            }
            ModuleParams::Appendage { joint_count, .. } => {
                (1..=*joint_count).map(|i| format!("{name}{i:02}")).collect()
            }
            ModuleParams::Eye => vec!["Eye".to_string()],
            ModuleParams::HalfMuscle => {
                vec![format!("{name}Root"), format!("{name}Tip")]
            }
            ModuleParams::Twist {
                joints,
                twist_count,
            } => {
                let mut labels = Vec::new();
                for joint in joints {
                    for i in 1..=*twist_count {
                        labels.push(format!("{joint}Twist{:02}", i));
                    }
                }
                labels
            }
        }
    }

    /// Returns the attachment input (SpaceIn) names of this module kind.
    pub fn space_ins(&self) -> Vec<String> {
        match self {
            ModuleParams::Torso { .. } => vec!["cog".to_string()],
            ModuleParams::Chain { .. } => vec!["root".to_string()],
            ModuleParams::HindLeg => {
                vec!["pelvis".to_string(), "cog".to_string(), "all".to_string()]
            }
            ModuleParams::FrontLeg => {
                vec!["chest".to_string(), "cog".to_string(), "all".to_string()]
            }
            ModuleParams::Digits { .. } => vec!["foot".to_string()],
            ModuleParams::Appendage { .. } => vec!["root".to_string()],
            ModuleParams::Eye => vec!["head".to_string()],
            ModuleParams::HalfMuscle => vec!["root".to_string(), "tip".to_string()],
            ModuleParams::Twist { joints, .. } => {
                joints.iter().map(|j| j.to_lowercase()).collect()
            }
        }
    }

    /// Returns the built-in attachment output (SpaceOut) names of this kind,
    /// not counting exported joints.
    pub fn space_outs(&self) -> Vec<String> {
        match self {
            ModuleParams::Torso { .. } => ["pelvis", "chest", "head", "jaw"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ModuleParams::Chain { .. } => vec!["tip".to_string()],
            ModuleParams::HindLeg | ModuleParams::FrontLeg => vec!["ankle".to_string()],
            ModuleParams::Digits { .. } => Vec::new(),
            ModuleParams::Appendage { .. } => vec!["tip".to_string()],
            ModuleParams::Eye => vec!["eye".to_string()],
            ModuleParams::HalfMuscle => Vec::new(),
            ModuleParams::Twist { .. } => Vec::new(),
        }
    }
}

// =============================================================================
// Axis orientation
// =============================================================================

/// Joint aim-axis orientation for chain construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrient {
    /// Aim down +Y, up vector +Z.
    #[default]
    YUp,
    /// Aim down +Z, up vector +Y.
    ZUp,
}

impl AxisOrient {
    /// Returns the aim axis as a unit vector [X, Y, Z].
    pub fn aim_axis(&self) -> [f64; 3] {
        match self {
            AxisOrient::YUp => [0.0, 1.0, 0.0],
            AxisOrient::ZUp => [0.0, 0.0, 1.0],
        }
    }
}

// =============================================================================
// Attachments
// =============================================================================

/// One attachment link: a producer output drives one of this module's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentSpec {
    /// The consuming module's input socket name (e.g. `root`, `pelvis`).
    pub socket: String,
    /// Zone-qualified identifier of the producer module (e.g. `Torso`, `Base`).
    pub producer: String,
    /// The producer's output socket name (e.g. `cog`, `head`, `ankle`).
    pub producer_socket: String,
    /// Whether the link preserves the driven socket's world pose at bind time.
    #[serde(default = "default_true")]
    pub maintain_offset: bool,
}

impl AttachmentSpec {
    /// Creates a maintain-offset attachment.
    pub fn new(
        socket: impl Into<String>,
        producer: impl Into<String>,
        producer_socket: impl Into<String>,
    ) -> Self {
        Self {
            socket: socket.into(),
            producer: producer.into(),
            producer_socket: producer_socket.into(),
            maintain_offset: true,
        }
    }

    /// Sets whether the link maintains the driven pose at bind time.
    pub fn maintain_offset(mut self, maintain_offset: bool) -> Self {
        self.maintain_offset = maintain_offset;
        self
    }
}

// =============================================================================
// Placements
// =============================================================================

/// Authored world-space placement for one pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placement {
    /// World translation [X, Y, Z].
    pub translate: [f64; 3],
    /// World rotation, XYZ euler degrees.
    #[serde(default)]
    pub rotate: [f64; 3],
    /// World scale [X, Y, Z].
    #[serde(default = "default_unit_scale")]
    pub scale: [f64; 3],
}

impl Placement {
    /// Creates a placement at a translation, with identity rotation and scale.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            translate: [x, y, z],
            rotate: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Sets the rotation in XYZ euler degrees.
    pub fn rotated(mut self, rx: f64, ry: f64, rz: f64) -> Self {
        self.rotate = [rx, ry, rz];
        self
    }

    /// Sets the scale.
    pub fn scaled(mut self, sx: f64, sy: f64, sz: f64) -> Self {
        self.scale = [sx, sy, sz];
        self
    }
}

// =============================================================================
// Dynamics
// =============================================================================

/// Chain dynamics tunables.
///
/// Each parameter stays independently settable on the dynamics control
/// node after creation; these are only the initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DynamicsSpec {
    /// Resistance to stretching along the chain.
    #[serde(default = "default_stretch_resistance")]
    pub stretch_resistance: f64,
    /// Resistance to compression along the chain.
    #[serde(default = "default_compression_resistance")]
    pub compression_resistance: f64,
    /// Resistance to bending.
    #[serde(default = "default_bend_resistance")]
    pub bend_resistance: f64,
    /// Attraction of the simulated curve back to the start curve.
    #[serde(default = "default_start_curve_attract")]
    pub start_curve_attract: f64,
}

fn default_stretch_resistance() -> f64 {
    100.0
}

fn default_compression_resistance() -> f64 {
    100.0
}

fn default_bend_resistance() -> f64 {
    20.0
}

fn default_start_curve_attract() -> f64 {
    0.01
}

impl Default for DynamicsSpec {
    fn default() -> Self {
        Self {
            stretch_resistance: default_stretch_resistance(),
            compression_resistance: default_compression_resistance(),
            bend_resistance: default_bend_resistance(),
            start_curve_attract: default_start_curve_attract(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_roundtrip() {
        let spec = CharacterSpec::builder("dragon-01")
            .description("Test dragon")
            .tag("quadruped")
            .module(
                ModuleSpec::new(
                    "Tail",
                    Zone::Center,
                    ModuleParams::Chain {
                        joint_count: 8,
                        control_joints: vec![1, 4, 8],
                        ik: true,
                    },
                )
                .attach(AttachmentSpec::new("root", "Torso", "pelvis")),
            )
            .build();

        let json = spec.to_json_pretty().unwrap();
        let parsed = CharacterSpec::from_json(&json).unwrap();
        assert_eq!(spec, parsed);
        assert_eq!(parsed.spec_version, SPEC_VERSION);
        assert_eq!(parsed.modules.len(), 1);
    }

    #[test]
    fn test_module_ident_includes_zone_prefix() {
        let left = ModuleSpec::new("TrexLeg", Zone::Left, ModuleParams::HindLeg);
        let right = ModuleSpec::new("TrexLeg", Zone::Right, ModuleParams::HindLeg);
        let center = ModuleSpec::new("Torso", Zone::Center, ModuleParams::Torso {
            spine_count: 3,
            neck_count: 4,
            spine_secondary: vec![],
            neck_secondary: vec![],
            axis_orient: AxisOrient::YUp,
        });
        assert_eq!(left.ident(), "L_TrexLeg");
        assert_eq!(right.ident(), "R_TrexLeg");
        assert_eq!(center.ident(), "Torso");
    }

    #[test]
    fn test_chain_labels() {
        let params = ModuleParams::Chain {
            joint_count: 3,
            control_joints: vec![],
            ik: true,
        };
        assert_eq!(
            params.pivot_labels("Tail"),
            vec!["Tail01", "Tail02", "Tail03", "TailEnd"]
        );
        assert_eq!(params.joint_labels("Tail"), vec!["Tail01", "Tail02", "Tail03"]);
        assert_eq!(params.space_ins(), vec!["root"]);
        assert_eq!(params.space_outs(), vec!["tip"]);
    }

    #[test]
    fn test_torso_labels() {
        let params = ModuleParams::Torso {
            spine_count: 2,
            neck_count: 2,
            spine_secondary: vec![],
            neck_secondary: vec![],
            axis_orient: AxisOrient::YUp,
        };
        let pivots = params.pivot_labels("Torso");
        assert_eq!(
            pivots,
            vec![
                "Pelvis", "Spine01", "Spine02", "Chest", "Neck01", "Neck02", "Head", "HeadEnd",
                "Jaw", "JawEnd"
            ]
        );
        let joints = params.joint_labels("Torso");
        assert!(joints.contains(&"Jaw".to_string()));
        assert!(!joints.contains(&"JawEnd".to_string()));
    }

    #[test]
    fn test_digits_labels() {
        let params = ModuleParams::Digits {
            digits: vec![DigitSpec::new("A", 2), DigitSpec::new("B", 1)],
            ik: true,
        };
        assert_eq!(
            params.pivot_labels("Toe"),
            vec!["ToeA01", "ToeA02", "ToeAEnd", "ToeAUp", "ToeB01", "ToeBEnd", "ToeBUp"]
        );
        assert_eq!(params.joint_labels("Toe"), vec!["ToeA01", "ToeA02", "ToeB01"]);
    }

    #[test]
    fn test_twist_labels_and_sockets() {
        let params = ModuleParams::Twist {
            joints: vec!["Hip".to_string(), "Knee".to_string()],
            twist_count: 2,
        };
        assert!(params.pivot_labels("LegTwist").is_empty());
        assert_eq!(
            params.joint_labels("LegTwist"),
            vec!["HipTwist01", "HipTwist02", "KneeTwist01", "KneeTwist02"]
        );
        assert_eq!(params.space_ins(), vec!["hip", "knee"]);
    }

    #[test]
    fn test_exports_become_space_outs() {
        let module = ModuleSpec::new(
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
        .export("Spine02");
        let outs = module.space_outs();
        assert!(outs.contains(&"pelvis".to_string()));
        assert!(outs.contains(&"spine02".to_string()));
    }

    #[test]
    fn test_params_serde_tag() {
        let json = r#"{ "kind": "hind_leg" }"#;
        let params: ModuleParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, ModuleParams::HindLeg);

        let json = r#"{ "kind": "chain", "joint_count": 8, "control_joints": [1, 4, 8] }"#;
        let params: ModuleParams = serde_json::from_str(json).unwrap();
        match params {
            ModuleParams::Chain {
                joint_count,
                control_joints,
                ik,
            } => {
                assert_eq!(joint_count, 8);
                assert_eq!(control_joints, vec![1, 4, 8]);
                assert!(ik);
            }
            _ => panic!("expected chain params"),
        }
    }

    #[test]
    fn test_dynamics_defaults() {
        let dynamics = DynamicsSpec::default();
        assert_eq!(dynamics.stretch_resistance, 100.0);
        assert_eq!(dynamics.compression_resistance, 100.0);
        assert_eq!(dynamics.bend_resistance, 20.0);
        assert_eq!(dynamics.start_curve_attract, 0.01);
    }

    #[test]
    fn test_placement_builder() {
        let placement = Placement::at(1.0, 2.0, 3.0).rotated(0.0, 90.0, 0.0);
        assert_eq!(placement.translate, [1.0, 2.0, 3.0]);
        assert_eq!(placement.rotate, [0.0, 90.0, 0.0]);
        assert_eq!(placement.scale, [1.0, 1.0, 1.0]);
    }
}
