//! Eye rig factory: a single aim-driven joint.

use glam::DVec3;

use super::{
    make_control, make_guts_group, make_joint_chain, make_rig_root, make_space_in, make_space_out,
    ModuleRig,
};
use crate::error::BuildResult;
use crate::pivots::PivotSet;
use crate::socket::SocketRegistry;
use skelform_scene::{NodeKind, Scene, Transform};
use skelform_spec::ModuleSpec;

pub(crate) fn build(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
    pivots: &PivotSet,
) -> BuildResult<ModuleRig> {
    let ident = spec.ident();
    let zone = spec.zone;

    let root = make_rig_root(scene, &ident, zone)?;
    let (head_key, head_in) = make_space_in(scene, registry, &ident, "head", root)?;
    let guts_grp = make_guts_group(scene, &ident, head_in)?;

    let eye_world = scene.world(pivots.require("Eye")?);
    let joints = make_joint_chain(
        scene,
        zone,
        &["Eye".to_string()],
        &[eye_world],
        None,
        DVec3::Z,
        head_in,
        spec.radius,
    )?;
    let eye_joint = joints[0];

    // Aim control out in front of the eye, along its authored gaze
    let aim_offset = eye_world.rotation * (DVec3::Z * spec.ctrl_radius);
    let aim_world = Transform::from_translation(eye_world.translation + aim_offset);
    let aim = make_control(scene, zone, "EyeAim", spec.ctrl_radius, head_in, aim_world)?;

    let aim_loc = scene.add_node(
        format!("{}EyeAim_Loc", zone.prefix()),
        NodeKind::Guts,
        Some(guts_grp),
    )?;

    let (eye_key, _) = make_space_out(scene, registry, &ident, "eye", eye_joint)?;

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins: vec![head_key],
        space_outs: vec![eye_key],
        bind_joints: joints,
        controls: vec![aim.ctrl],
        guts: vec![aim_loc],
        handles: Vec::new(),
    })
}
