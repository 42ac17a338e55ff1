//! Chain rig factory: IK/FK blendable chains (tails, whiskers, tongues).

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
    let ModuleParams::Chain {
        joint_count,
        control_joints,
        ik,
    } = &spec.params
    else {
        unreachable!("dispatched on params kind");
    };

    let ident = spec.ident();
    let zone = spec.zone;
    let prefix = zone.prefix();
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
        DVec3::Y,
        root_in,
        spec.radius,
    )?;

    let mut controls = Vec::new();
    let mut handles = Vec::new();
    for index in control_joints {
        let world = worlds[(*index - 1) as usize];
        let chain = make_control(
            scene,
            zone,
            &format!("{name}{index:02}FK"),
            spec.ctrl_radius,
            root_in,
            world,
        )?;
        controls.push(chain.ctrl);
        if *ik {
            let handle = scene.add_node(
                format!("{prefix}{name}{index:02}IK_Hndl"),
                NodeKind::Guts,
                Some(guts_grp),
            )?;
            handles.push(handle);
        }
    }

    let mut guts = Vec::new();
    if *ik {
        let curve = scene.add_node(
            format!("{prefix}{name}IK_Crv"),
            NodeKind::Guts,
            Some(guts_grp),
        )?;
        guts.push(curve);
    }

    let tip_joint = *joints.last().expect("chain has at least one joint");
    let (tip_key, _) = make_space_out(scene, registry, &ident, "tip", tip_joint)?;

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins: vec![root_key],
        space_outs: vec![tip_key],
        bind_joints: joints,
        controls,
        guts,
        handles,
    })
}
