//! The build orchestrator.
//!
//! Drives the full assembly sequence over a validated character spec:
//! base module first, then each module through its lifecycle
//! (pivots, authored placement, rig, wiring, finishing passes) in an
//! order consistent with the attachment DAG. Single pass, non-reentrant;
//! the first error aborts the remaining sequence and the caller discards
//! the scene.

use std::collections::HashMap;

use crate::cascade::CascadeSource;
use crate::collaborators::{
    GeometryBinder, ProxyGeometryBinder, SafetyCover, StandardSafetyCover,
};
use crate::dynamics::{add_chain_dynamics, DynamicsControl};
use crate::error::{BuildError, BuildResult};
use crate::modules::{self, BaseRig, ModuleRig};
use crate::pivots::{self, PivotSet};
use crate::socket::{SocketKey, SocketRegistry};
use skelform_scene::{NodeId, NodeKind, Scene, Transform};
use skelform_spec::{
    canonical_spec_hash, validate_spec, BuildReport, CharacterSpec, ModuleReport, ModuleSpec,
    PoseDigest, ReportBuilder, Zone, BASE_MODULE,
};

/// Lifecycle state of one module. States are strictly ordered and never
/// regress; the orchestrator is the sole owner of transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModuleState {
    /// Declared but untouched.
    Unbuilt,
    /// Pivots exist and authored placements are applied.
    PivotsPlaced,
    /// The rig is built and its sockets are registered.
    RigBuilt,
    /// Every attachment link of the module is created.
    Wired,
    /// Geometry, covers, dynamics, and cascade passes are done.
    Finished,
}

impl ModuleState {
    /// Returns the state as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleState::Unbuilt => "unbuilt",
            ModuleState::PivotsPlaced => "pivots_placed",
            ModuleState::RigBuilt => "rig_built",
            ModuleState::Wired => "wired",
            ModuleState::Finished => "finished",
        }
    }
}

impl std::fmt::Display for ModuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One module after assembly.
#[derive(Debug)]
pub struct BuiltModule {
    /// Zone-qualified module identifier.
    pub ident: String,
    /// Final lifecycle state.
    pub state: ModuleState,
    /// The module's pivot set (inert after the rig build consumed it).
    pub pivots: PivotSet,
    /// The module's rig.
    pub rig: ModuleRig,
    /// The dynamics control, for chain modules that asked for one.
    pub dynamics: Option<DynamicsControl>,
}

/// A fully assembled character.
#[derive(Debug)]
pub struct CharacterRig {
    /// The scene holding every node of the build.
    pub scene: Scene,
    /// All sockets of the build.
    pub registry: SocketRegistry,
    /// Group holding every module's pivot group.
    pub pivot_root: NodeId,
    /// Group holding every module's rig group.
    pub rig_root: NodeId,
    /// The global cascade source (on the base master control).
    pub cascade: CascadeSource,
    /// The implicit base module.
    pub base: BaseRig,
    /// Every declared module, in build order.
    pub modules: Vec<BuiltModule>,
    /// Summary of the run.
    pub report: BuildReport,
}

impl CharacterRig {
    /// Looks up a built module by its zone-qualified identifier.
    pub fn module(&self, ident: &str) -> Option<&BuiltModule> {
        self.modules.iter().find(|m| m.ident == ident)
    }
}

/// Assembles characters from validated specs.
pub struct Orchestrator {
    binder: Box<dyn GeometryBinder>,
    cover: Box<dyn SafetyCover>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Creates an orchestrator with the default collaborators.
    pub fn new() -> Self {
        Self {
            binder: Box::new(ProxyGeometryBinder::new()),
            cover: Box::new(StandardSafetyCover),
        }
    }

    /// Replaces the geometry binder.
    pub fn with_binder(mut self, binder: Box<dyn GeometryBinder>) -> Self {
        self.binder = binder;
        self
    }

    /// Replaces the safety cover collaborator.
    pub fn with_cover(mut self, cover: Box<dyn SafetyCover>) -> Self {
        self.cover = cover;
        self
    }

    /// Runs the full assembly sequence against a fresh scene.
    pub fn build(&mut self, spec: &CharacterSpec) -> BuildResult<CharacterRig> {
        let validation = validate_spec(spec);
        if !validation.is_ok() {
            return Err(BuildError::InvalidSpec {
                count: validation.errors.len(),
                first: validation.errors[0].to_string(),
            });
        }

        let mut scene = Scene::new();
        let mut registry = SocketRegistry::new();
        let pivot_root = scene.add_node("RootPiv_Grp", NodeKind::Group, None)?;
        let rig_root = scene.add_node("RootRig_Grp", NodeKind::Group, None)?;

        // Base module first: it provides the top-level spaces every other
        // module ultimately roots to, and the cascade source.
        let base_pivots = pivots::create_base_pivots(&mut scene)?;
        scene.parent_keep_world(base_pivots.root, pivot_root)?;
        if let Some(placement) = &spec.cog_placement {
            scene.set_world(
                base_pivots.require("Cog")?,
                Transform::from_euler_degrees(
                    placement.translate,
                    placement.rotate,
                    placement.scale,
                ),
            );
        }
        let cog_world = scene.world(base_pivots.require("Cog")?);
        let base =
            modules::build_base_rig(&mut scene, &mut registry, spec.master_ctrl_radius, cog_world)?;
        scene.parent_keep_world(base.rig.root, rig_root)?;
        let cascade = CascadeSource::install(&mut scene, base.all_ctrl)?;
        cascade.broadcast(&mut scene, base.rig.root, Zone::Center)?;

        let mut states: HashMap<String, ModuleState> = spec
            .modules
            .iter()
            .map(|m| (m.ident(), ModuleState::Unbuilt))
            .collect();

        let mut built = Vec::with_capacity(spec.modules.len());
        for index in build_order(spec) {
            let module_spec = &spec.modules[index];
            let ident = module_spec.ident();

            let pivot_set = pivots::create_pivots(&mut scene, module_spec)?;
            scene.parent_keep_world(pivot_set.root, pivot_root)?;
            pivots::apply_placements(&mut scene, &pivot_set, &module_spec.placements);
            states.insert(ident.clone(), ModuleState::PivotsPlaced);

            let rig = modules::build_rig(&mut scene, &mut registry, module_spec, &pivot_set)?;
            scene.parent_keep_world(rig.root, rig_root)?;
            states.insert(ident.clone(), ModuleState::RigBuilt);

            wire_module(&mut scene, &registry, &states, module_spec)?;
            states.insert(ident.clone(), ModuleState::Wired);

            self.binder.bind(&scene, &rig.bind_joints);
            self.cover.apply(&mut scene, rig.root)?;
            let dynamics = match &module_spec.dynamics {
                Some(d) => Some(add_chain_dynamics(&mut scene, &rig, d)?),
                None => None,
            };
            cascade.broadcast(&mut scene, rig.root, module_spec.zone)?;
            states.insert(ident.clone(), ModuleState::Finished);

            built.push(BuiltModule {
                ident,
                state: ModuleState::Finished,
                pivots: pivot_set,
                rig,
                dynamics,
            });
        }

        let report = build_report(spec, &scene, &built)?;
        Ok(CharacterRig {
            scene,
            registry,
            pivot_root,
            rig_root,
            cascade,
            base,
            modules: built,
            report,
        })
    }
}

/// Assembles a character with the default collaborators.
pub fn assemble(spec: &CharacterSpec) -> BuildResult<CharacterRig> {
    Orchestrator::new().build(spec)
}

/// Creates every attachment link of one module.
///
/// Refuses to link while a producer has not reached [`ModuleState::RigBuilt`]:
/// linking earlier would capture a stale pose into the maintain-offset rest.
fn wire_module(
    scene: &mut Scene,
    registry: &SocketRegistry,
    states: &HashMap<String, ModuleState>,
    module_spec: &ModuleSpec,
) -> BuildResult<()> {
    let ident = module_spec.ident();
    for att in &module_spec.attachments {
        let producer_state = if att.producer == BASE_MODULE {
            ModuleState::Finished
        } else {
            *states
                .get(att.producer.as_str())
                .ok_or_else(|| BuildError::UnknownModule(att.producer.clone()))?
        };
        if producer_state < ModuleState::RigBuilt {
            return Err(BuildError::ProducerNotReady {
                consumer: ident.clone(),
                producer: att.producer.clone(),
                state: producer_state,
            });
        }
        let driver = SocketKey::new(att.producer.clone(), att.producer_socket.clone());
        let driven = SocketKey::new(ident.clone(), att.socket.clone());
        registry.link(scene, &driver, &driven, att.maintain_offset)?;
    }
    Ok(())
}

/// Orders module indices so every producer precedes its consumers,
/// keeping declaration order where the DAG allows. Validation already
/// rejected cycles; any remainder is appended so the wiring check can
/// report it.
fn build_order(spec: &CharacterSpec) -> Vec<usize> {
    let ident_index: HashMap<String, usize> = spec
        .modules
        .iter()
        .enumerate()
        .map(|(i, m)| (m.ident(), i))
        .collect();

    let n = spec.modules.len();
    let mut done = vec![false; n];
    let mut order = Vec::with_capacity(n);
    loop {
        let mut progressed = false;
        for i in 0..n {
            if done[i] {
                continue;
            }
            let ready = spec.modules[i].attachments.iter().all(|att| {
                match ident_index.get(att.producer.as_str()) {
                    Some(&p) => done[p],
                    None => true,
                }
            });
            if ready {
                done[i] = true;
                order.push(i);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    for (i, is_done) in done.iter().enumerate() {
        if !is_done {
            order.push(i);
        }
    }
    order
}

fn build_report(
    spec: &CharacterSpec,
    scene: &Scene,
    built: &[BuiltModule],
) -> BuildResult<BuildReport> {
    let spec_hash = canonical_spec_hash(spec)?;

    let mut digest = PoseDigest::new();
    for module in built {
        for &joint in &module.rig.bind_joints {
            let (t, r, s) = scene.world(joint).to_arrays();
            digest.add_sample(scene.name(joint), t, r, s);
        }
    }

    let mut builder = ReportBuilder::new(&spec.character_id, spec_hash)
        .node_count(scene.node_count())
        .pose_digest(digest.finish());
    for module in built {
        let kind = spec
            .module(&module.ident)
            .map(|m| m.params.kind_str())
            .unwrap_or("unknown");
        builder = builder.module(ModuleReport {
            ident: module.ident.clone(),
            zone: module.rig.zone,
            kind: kind.to_string(),
            state: module.state.to_string(),
            bind_joints: module.rig.bind_joints.len(),
            controls: module.rig.controls.len(),
            space_ins: module.rig.space_ins.len(),
            space_outs: module.rig.space_outs.len(),
            dynamics: module.dynamics.is_some(),
        });
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skelform_spec::{AttachmentSpec, AxisOrient, ModuleParams, Placement};

    fn small_spec() -> CharacterSpec {
        CharacterSpec::builder("test-dragon-01")
            .description("orchestrator test rig")
            .cog_placement(Placement::at(0.0, 120.0, -5.0))
            .module(
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
                .place("Pelvis", Placement::at(0.0, 133.0, -87.0))
                .place("Chest", Placement::at(0.0, 128.0, 46.0)),
            )
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
                .attach(AttachmentSpec::new("root", "Torso", "pelvis"))
                .place("Tail01", Placement::at(0.0, 119.0, -118.0)),
            )
            .build()
    }

    #[test]
    fn test_build_reaches_finished() {
        let rig = assemble(&small_spec()).unwrap();
        assert_eq!(rig.modules.len(), 2);
        for module in &rig.modules {
            assert_eq!(module.state, ModuleState::Finished);
        }
        assert!(rig.report.ok);
        assert_eq!(rig.report.modules.len(), 2);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let mut spec = small_spec();
        spec.modules[1].attachments[0].producer = "Nope".to_string();
        let err = assemble(&spec).unwrap_err();
        assert!(matches!(err, BuildError::InvalidSpec { .. }));
    }

    #[test]
    fn test_build_order_producers_first() {
        let spec = small_spec();
        let order = build_order(&spec);
        let torso_pos = order.iter().position(|&i| spec.modules[i].name == "Torso").unwrap();
        let tail_pos = order.iter().position(|&i| spec.modules[i].name == "Tail").unwrap();
        assert!(torso_pos < tail_pos);
    }

    #[test]
    fn test_declaration_order_kept_when_possible() {
        // Tail declared before Torso but attached to it: Torso must come first
        let mut spec = small_spec();
        spec.modules.swap(0, 1);
        let order = build_order(&spec);
        assert_eq!(spec.modules[order[0]].name, "Torso");
    }

    #[test]
    fn test_wire_refuses_unbuilt_producer() {
        let spec = small_spec();
        let mut scene = Scene::new();
        let registry = SocketRegistry::new();
        let states: HashMap<String, ModuleState> =
            [("Torso".to_string(), ModuleState::PivotsPlaced)].into();

        let err = wire_module(&mut scene, &registry, &states, &spec.modules[1]).unwrap_err();
        match err {
            BuildError::ProducerNotReady {
                consumer,
                producer,
                state,
            } => {
                assert_eq!(consumer, "Tail");
                assert_eq!(producer, "Torso");
                assert_eq!(state, ModuleState::PivotsPlaced);
            }
            other => panic!("expected ProducerNotReady, got {other:?}"),
        }
    }

    #[test]
    fn test_determinism_identical_pose_digest() {
        let spec = small_spec();
        let first = assemble(&spec).unwrap();
        let second = assemble(&spec).unwrap();
        assert_eq!(first.report.pose_digest, second.report.pose_digest);
        assert_eq!(first.report.node_count, second.report.node_count);
    }

    #[test]
    fn test_module_states_ordering() {
        assert!(ModuleState::Unbuilt < ModuleState::PivotsPlaced);
        assert!(ModuleState::PivotsPlaced < ModuleState::RigBuilt);
        assert!(ModuleState::RigBuilt < ModuleState::Wired);
        assert!(ModuleState::Wired < ModuleState::Finished);
        assert_eq!(ModuleState::RigBuilt.to_string(), "rig_built");
    }
}
