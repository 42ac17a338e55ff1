//! Appendage rig factory: generic FK chains (ears, horns, crests, fins).

use glam::DVec3;

use super::{
    make_control, make_guts_group, make_joint_chain, make_rig_root, make_space_in, make_space_out,
    pivot_worlds, ModuleRig,
};
use crate::error::BuildResult;
use crate::pivots::PivotSet;
use crate::socket::SocketRegistry;
use skelform_scene::{NodeKind, Scene};
use skelform_spec::{ModuleParams, ModuleSpec};

pub(crate) fn build(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
    pivots: &PivotSet,
) -> BuildResult<ModuleRig> {
    let ModuleParams::Appendage {
        joint_count,
        axis_orient,
    } = &spec.params
    else {
        unreachable!("dispatched on params kind");
    };

    let ident = spec.ident();
    let zone = spec.zone;
    let name = &spec.name;

    let root = make_rig_root(scene, &ident, zone)?;
    let (root_key, root_in) = make_space_in(scene, registry, &ident, "root", root)?;
    let guts_grp = make_guts_group(scene, &ident, root_in)?;

    let labels: Vec<String> = (1..=*joint_count).map(|i| format!("{name}{i:02}")).collect();
    let worlds = pivot_worlds(scene, pivots, &labels)?;
    let end_aim = scene.world(pivots.require(&format!("{name}End"))?).translation;

    let joints = make_joint_chain(
        scene,
        zone,
        &labels,
        &worlds,
        Some(end_aim),
        DVec3::from(axis_orient.aim_axis()),
        root_in,
        spec.radius,
    )?;

    // FK controls nest: each control's delta parents the next zero group.
    let mut controls = Vec::new();
    let mut ctrl_parent = root_in;
    for (index, label) in labels.iter().enumerate() {
        let chain = make_control(
            scene,
            zone,
            &format!("{label}FK"),
            spec.ctrl_radius,
            ctrl_parent,
            worlds[index],
        )?;
        controls.push(chain.ctrl);
        ctrl_parent = chain.delta;
    }

    let up = scene.add_node(
        format!("{}{name}Up_Loc", zone.prefix()),
        NodeKind::Guts,
        Some(guts_grp),
    )?;

    let tip_joint = *joints.last().expect("appendage has at least one joint");
    let (tip_key, _) = make_space_out(scene, registry, &ident, "tip", tip_joint)?;

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins: vec![root_key],
        space_outs: vec![tip_key],
        bind_joints: joints,
        controls,
        guts: vec![up],
        handles: Vec::new(),
    })
}
