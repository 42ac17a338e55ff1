//! Digits rig factory: toe and finger chains riding a foot.

use glam::DVec3;

use super::{
    make_control, make_guts_group, make_joint_chain, make_rig_root, make_space_in, pivot_worlds,
    ModuleRig,
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
    let ModuleParams::Digits { digits, ik } = &spec.params else {
        unreachable!("dispatched on params kind");
    };

    let ident = spec.ident();
    let zone = spec.zone;
    let prefix = zone.prefix();
    let name = &spec.name;

    let root = make_rig_root(scene, &ident, zone)?;
    let (foot_key, foot_in) = make_space_in(scene, registry, &ident, "foot", root)?;
    let guts_grp = make_guts_group(scene, &ident, foot_in)?;

    let ctrl_suffix = if *ik { "IK" } else { "FK" };
    let mut bind_joints = Vec::new();
    let mut controls = Vec::new();
    let mut guts = Vec::new();

    for digit in digits {
        let labels: Vec<String> = (1..=digit.joint_count)
            .map(|i| format!("{name}{}{:02}", digit.label, i))
            .collect();
        let worlds = pivot_worlds(scene, pivots, &labels)?;
        let end_aim = scene
            .world(pivots.require(&format!("{name}{}End", digit.label))?)
            .translation;

        let joints = make_joint_chain(
            scene,
            zone,
            &labels,
            &worlds,
            Some(end_aim),
            DVec3::Y,
            foot_in,
            spec.radius,
        )?;

        for (index, label) in labels.iter().enumerate() {
            let chain = make_control(
                scene,
                zone,
                &format!("{label}{ctrl_suffix}"),
                spec.ctrl_radius,
                foot_in,
                worlds[index],
            )?;
            controls.push(chain.ctrl);
        }

        let up = scene.add_node(
            format!("{prefix}{name}{}Up_Loc", digit.label),
            NodeKind::Guts,
            Some(guts_grp),
        )?;
        guts.push(up);

        bind_joints.extend(joints);
    }

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins: vec![foot_key],
        space_outs: Vec::new(),
        bind_joints,
        controls,
        guts,
        handles: Vec::new(),
    })
}
