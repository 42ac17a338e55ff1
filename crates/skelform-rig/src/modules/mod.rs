//! Per-kind rig factories.
//!
//! Every factory reads the current world transforms of its pivot set and
//! builds, under its own root group: bind joints matching the pivots,
//! controls in the zero-group -> control -> delta idiom, opaque internal
//! mechanism nodes, and the module's socket set. Factories never touch
//! another module's nodes.

mod appendage;
mod base;
mod chain;
mod digits;
mod eye;
mod half_muscle;
mod leg;
mod torso;
mod twist;

pub use base::{build_base_rig, BaseRig};

use glam::DVec3;

use crate::cascade;
use crate::error::{BuildError, BuildResult};
use crate::pivots::PivotSet;
use crate::socket::{SocketKey, SocketKind, SocketRegistry};
use skelform_scene::{AttrValue, NodeId, NodeKind, Scene, Transform};
use skelform_spec::{ModuleParams, ModuleSpec, Zone};

/// Everything one module build produced.
#[derive(Debug)]
pub struct ModuleRig {
    /// Zone-qualified module identifier.
    pub ident: String,
    /// The module's zone.
    pub zone: Zone,
    /// The module's root group, parented under the global rig root by
    /// the orchestrator.
    pub root: NodeId,
    /// Input sockets, in declaration order.
    pub space_ins: Vec<SocketKey>,
    /// Output sockets, in declaration order.
    pub space_outs: Vec<SocketKey>,
    /// Bind joints, aligned with the module kind's joint label order.
    pub bind_joints: Vec<NodeId>,
    /// Animator controls.
    pub controls: Vec<NodeId>,
    /// Internal mechanism nodes.
    pub guts: Vec<NodeId>,
    /// IK handles of chain modules; empty elsewhere.
    pub handles: Vec<NodeId>,
}

/// Builds the rig for one module, dispatching on its kind, then registers
/// any exported joints as extra output sockets.
pub fn build_rig(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
    pivots: &PivotSet,
) -> BuildResult<ModuleRig> {
    let mut rig = match &spec.params {
        ModuleParams::Torso { .. } => torso::build(scene, registry, spec, pivots)?,
        ModuleParams::Chain { .. } => chain::build(scene, registry, spec, pivots)?,
        ModuleParams::HindLeg => leg::build_hind(scene, registry, spec, pivots)?,
        ModuleParams::FrontLeg => leg::build_front(scene, registry, spec, pivots)?,
        ModuleParams::Digits { .. } => digits::build(scene, registry, spec, pivots)?,
        ModuleParams::Appendage { .. } => appendage::build(scene, registry, spec, pivots)?,
        ModuleParams::Eye => eye::build(scene, registry, spec, pivots)?,
        ModuleParams::HalfMuscle => half_muscle::build(scene, registry, spec, pivots)?,
        ModuleParams::Twist { .. } => twist::build(scene, registry, spec)?,
    };

    let joint_labels = spec.params.joint_labels(&spec.name);
    for label in &spec.exports {
        let index = joint_labels.iter().position(|l| l == label).ok_or_else(|| {
            BuildError::UnknownExport {
                module: rig.ident.clone(),
                label: label.clone(),
            }
        })?;
        let joint = rig.bind_joints[index];
        let (key, _) = make_space_out(scene, registry, &rig.ident, &label.to_lowercase(), joint)?;
        rig.space_outs.push(key);
    }

    Ok(rig)
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Creates a module root group with its display attributes.
pub(crate) fn make_rig_root(scene: &mut Scene, ident: &str, zone: Zone) -> BuildResult<NodeId> {
    let root = scene.add_node(format!("{ident}Rig_Grp"), NodeKind::Group, None)?;
    cascade::install_root_attrs(scene, root, zone)?;
    Ok(root)
}

/// Creates and registers an input socket node under `parent`.
pub(crate) fn make_space_in(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    ident: &str,
    name: &str,
    parent: NodeId,
) -> BuildResult<(SocketKey, NodeId)> {
    let node = scene.add_node(
        format!("{ident}{}_SpaceIN", capitalized(name)),
        NodeKind::Group,
        Some(parent),
    )?;
    let key = SocketKey::new(ident, name);
    registry.register(key.clone(), SocketKind::SpaceIn, node)?;
    Ok((key, node))
}

/// Creates and registers an output socket node riding `carrier`.
pub(crate) fn make_space_out(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    ident: &str,
    name: &str,
    carrier: NodeId,
) -> BuildResult<(SocketKey, NodeId)> {
    let node = scene.add_node(
        format!("{ident}{}_SpaceOUT", capitalized(name)),
        NodeKind::Locator,
        Some(carrier),
    )?;
    let key = SocketKey::new(ident, name);
    registry.register(key.clone(), SocketKind::SpaceOut, node)?;
    Ok((key, node))
}

/// The zero-group -> control -> delta idiom.
///
/// The zero group absorbs the placement so the control itself reads as a
/// clean pose; the delta group under it is what downstream nodes ride.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ControlChain {
    pub zero: NodeId,
    pub ctrl: NodeId,
    pub delta: NodeId,
}

pub(crate) fn make_control(
    scene: &mut Scene,
    zone: Zone,
    label: &str,
    radius: f64,
    parent: NodeId,
    world: Transform,
) -> BuildResult<ControlChain> {
    let prefix = zone.prefix();
    let zero = scene.add_node(format!("{prefix}{label}_CtrlZero"), NodeKind::Group, Some(parent))?;
    scene.set_world(zero, world);
    let ctrl = scene.add_node(format!("{prefix}{label}_Ctrl"), NodeKind::Control, Some(zero))?;
    scene.add_attr(ctrl, "radius", AttrValue::Float(radius))?;
    let delta = scene.add_node(format!("{prefix}{label}_CtrlDelta"), NodeKind::Group, Some(ctrl))?;
    Ok(ControlChain { zero, ctrl, delta })
}

/// Builds a parented joint chain over the given pivot worlds.
///
/// Joint `i` sits at pivot `i` and aims its axis at pivot `i+1`. The last
/// joint aims at `end_aim` when given, otherwise it keeps its own pivot's
/// authored orientation. Joint scale is always unit; scale flows through
/// couplings, not joints.
pub(crate) fn make_joint_chain(
    scene: &mut Scene,
    zone: Zone,
    labels: &[String],
    worlds: &[Transform],
    end_aim: Option<DVec3>,
    aim_axis: DVec3,
    parent: NodeId,
    radius: f64,
) -> BuildResult<Vec<NodeId>> {
    let mut joints = Vec::with_capacity(labels.len());
    let mut current_parent = parent;
    for (index, label) in labels.iter().enumerate() {
        let joint = scene.add_node(
            format!("{}{}_Jnt", zone.prefix(), label),
            NodeKind::Joint,
            Some(current_parent),
        )?;
        scene.add_attr(joint, "radius", AttrValue::Float(radius))?;
        let position = worlds[index].translation;
        let rotation = if index + 1 < worlds.len() {
            Transform::aim(position, worlds[index + 1].translation, aim_axis)
        } else if let Some(target) = end_aim {
            Transform::aim(position, target, aim_axis)
        } else {
            worlds[index].rotation
        };
        scene.set_world(joint, Transform::from_trs(position, rotation, DVec3::ONE));
        joints.push(joint);
        current_parent = joint;
    }
    Ok(joints)
}

/// Creates the module's guts group (container for mechanism nodes).
pub(crate) fn make_guts_group(
    scene: &mut Scene,
    ident: &str,
    parent: NodeId,
) -> BuildResult<NodeId> {
    Ok(scene.add_node(format!("{ident}Guts_Grp"), NodeKind::Group, Some(parent))?)
}

/// Reads every pivot world for the given labels.
pub(crate) fn pivot_worlds(
    scene: &Scene,
    pivots: &PivotSet,
    labels: &[String],
) -> BuildResult<Vec<Transform>> {
    labels
        .iter()
        .map(|label| Ok(scene.world(pivots.require(label)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivots;

    #[test]
    fn test_capitalized() {
        assert_eq!(capitalized("root"), "Root");
        assert_eq!(capitalized("cog"), "Cog");
        assert_eq!(capitalized(""), "");
    }

    #[test]
    fn test_control_chain_names_and_pose() {
        let mut scene = Scene::new();
        let parent = scene.add_node("Grp", NodeKind::Group, None).unwrap();
        let world = Transform::from_euler_degrees([1.0, 2.0, 3.0], [0.0, 45.0, 0.0], [1.0, 1.0, 1.0]);
        let chain = make_control(&mut scene, Zone::Left, "Foot", 15.0, parent, world).unwrap();
        assert_eq!(scene.name(chain.zero), "L_Foot_CtrlZero");
        assert_eq!(scene.name(chain.ctrl), "L_Foot_Ctrl");
        assert_eq!(scene.name(chain.delta), "L_Foot_CtrlDelta");
        // Control reads clean, the zero group absorbed the placement
        assert!(scene.local(chain.ctrl).approx_eq(&Transform::IDENTITY, 1e-9));
        assert!(scene.world(chain.delta).approx_eq(&world, 1e-9));
    }

    #[test]
    fn test_joint_chain_positions_and_aim() {
        let mut scene = Scene::new();
        let parent = scene.add_node("Grp", NodeKind::Group, None).unwrap();
        let labels = vec!["Tail01".to_string(), "Tail02".to_string()];
        let worlds = vec![
            Transform::from_translation(DVec3::new(0.0, 0.0, 0.0)),
            Transform::from_translation(DVec3::new(0.0, 0.0, -10.0)),
        ];
        let joints = make_joint_chain(
            &mut scene,
            Zone::Center,
            &labels,
            &worlds,
            Some(DVec3::new(0.0, 0.0, -20.0)),
            DVec3::Y,
            parent,
            5.0,
        )
        .unwrap();

        assert_eq!(joints.len(), 2);
        assert_eq!(scene.name(joints[0]), "Tail01_Jnt");
        assert_eq!(scene.parent(joints[1]), Some(joints[0]));

        // First joint aims +Y down the chain (-Z)
        let aimed = scene.world(joints[0]).rotation * DVec3::Y;
        assert!(aimed.abs_diff_eq(DVec3::new(0.0, 0.0, -1.0), 1e-9));
        // Joint positions match pivots
        assert!(scene.world(joints[1]).translation.abs_diff_eq(DVec3::new(0.0, 0.0, -10.0), 1e-9));
    }

    #[test]
    fn test_build_rig_registers_exports() {
        let mut scene = Scene::new();
        let mut registry = SocketRegistry::new();
        let spec = ModuleSpec::new(
            "Tail",
            Zone::Center,
            skelform_spec::ModuleParams::Chain {
                joint_count: 3,
                control_joints: vec![1],
                ik: true,
            },
        )
        .export("Tail02");
        let pivot_set = pivots::create_pivots(&mut scene, &spec).unwrap();
        let rig = build_rig(&mut scene, &mut registry, &spec, &pivot_set).unwrap();

        let exported = SocketKey::new("Tail", "tail02");
        assert!(rig.space_outs.contains(&exported));
        assert!(registry.get(&exported).is_ok());
    }
}
