//! Leg rig factories: three-segment hind leg and scapula-driven front
//! leg, both with reverse-foot pivot sets.

use glam::DVec3;

use super::{
    make_control, make_guts_group, make_joint_chain, make_rig_root, make_space_in, make_space_out,
    pivot_worlds, ModuleRig,
};
use crate::error::BuildResult;
use crate::pivots::PivotSet;
use crate::socket::SocketRegistry;
use skelform_scene::{NodeKind, Scene};
use skelform_spec::ModuleSpec;

pub(crate) fn build_hind(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
    pivots: &PivotSet,
) -> BuildResult<ModuleRig> {
    build_leg(
        scene,
        registry,
        spec,
        pivots,
        LegLayout {
            primary_in: "pelvis",
            joint_labels: &["Hip", "Knee", "Hock", "Ankle", "Ball", "Toe"],
            ankle_index: 3,
            foot_ctrl: ("Foot", "Heel"),
            pole_ctrl: ("KneePole", "KneePole"),
        },
    )
}

pub(crate) fn build_front(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
    pivots: &PivotSet,
) -> BuildResult<ModuleRig> {
    build_leg(
        scene,
        registry,
        spec,
        pivots,
        LegLayout {
            primary_in: "chest",
            joint_labels: &["Shld", "Elbow", "Fknee", "Fankle", "Fball", "Ftoe"],
            ankle_index: 3,
            foot_ctrl: ("Ffoot", "Fheel"),
            pole_ctrl: ("ElbowPole", "ElbowPole"),
        },
    )
}

struct LegLayout {
    /// The input socket the leg content rides.
    primary_in: &'static str,
    /// Main chain joint labels; pivots carry the same labels.
    joint_labels: &'static [&'static str],
    /// Index of the joint that carries the `ankle` output socket.
    ankle_index: usize,
    /// Foot control label and the pivot it sits on.
    foot_ctrl: (&'static str, &'static str),
    /// Pole control label and the pivot it sits on.
    pole_ctrl: (&'static str, &'static str),
}

fn build_leg(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
    pivots: &PivotSet,
    layout: LegLayout,
) -> BuildResult<ModuleRig> {
    let ident = spec.ident();
    let zone = spec.zone;
    let prefix = zone.prefix();

    let root = make_rig_root(scene, &ident, zone)?;
    let (primary_key, primary_in) = make_space_in(scene, registry, &ident, layout.primary_in, root)?;
    let (cog_key, cog_in) = make_space_in(scene, registry, &ident, "cog", root)?;
    let (all_key, all_in) = make_space_in(scene, registry, &ident, "all", root)?;
    let guts_grp = make_guts_group(scene, &ident, primary_in)?;

    let mut labels: Vec<String> = layout.joint_labels.iter().map(|s| s.to_string()).collect();
    // The front leg chain starts at the scapula, which sits on the Scap01 pivot.
    let front = layout.primary_in == "chest";
    if front {
        labels.insert(0, "Scap".to_string());
    }

    let mut pivot_labels: Vec<String> = labels.clone();
    if front {
        pivot_labels[0] = "Scap01".to_string();
    }
    let worlds = pivot_worlds(scene, pivots, &pivot_labels)?;

    let joints = make_joint_chain(
        scene,
        zone,
        &labels,
        &worlds,
        None,
        DVec3::Y,
        primary_in,
        spec.radius,
    )?;

    // IK foot control in the master space, pole control in the cog space
    let foot_world = scene.world(pivots.require(layout.foot_ctrl.1)?);
    let foot = make_control(scene, zone, layout.foot_ctrl.0, spec.ctrl_radius, all_in, foot_world)?;
    let pole_world = scene.world(pivots.require(layout.pole_ctrl.1)?);
    let pole = make_control(
        scene,
        zone,
        layout.pole_ctrl.0,
        spec.ctrl_radius * 0.5,
        cog_in,
        pole_world,
    )?;

    let ik_handle = scene.add_node(
        format!("{prefix}{}IK_Hndl", spec.name),
        NodeKind::Guts,
        Some(guts_grp),
    )?;
    let foot_roll = scene.add_node(
        format!("{prefix}{}FootRoll_Guts", spec.name),
        NodeKind::Guts,
        Some(guts_grp),
    )?;

    let ankle_index = if front {
        layout.ankle_index + 1
    } else {
        layout.ankle_index
    };
    let (ankle_key, _) = make_space_out(scene, registry, &ident, "ankle", joints[ankle_index])?;

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins: vec![primary_key, cog_key, all_key],
        space_outs: vec![ankle_key],
        bind_joints: joints,
        controls: vec![foot.ctrl, pole.ctrl],
        guts: vec![ik_handle, foot_roll],
        handles: Vec::new(),
    })
}
