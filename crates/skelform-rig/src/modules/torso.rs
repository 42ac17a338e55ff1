//! Torso rig factory: pelvis-to-head column with a jaw branch.

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
    let ModuleParams::Torso {
        spine_count,
        neck_count,
        spine_secondary,
        neck_secondary,
        axis_orient,
    } = &spec.params
    else {
        unreachable!("dispatched on params kind");
    };

    let ident = spec.ident();
    let zone = spec.zone;
    let root = make_rig_root(scene, &ident, zone)?;
    let (cog_key, cog_in) = make_space_in(scene, registry, &ident, "cog", root)?;
    let guts_grp = make_guts_group(scene, &ident, cog_in)?;

    // Main column: pelvis -> spine -> chest -> neck -> head. The jaw
    // branches off the head joint.
    let mut column_labels = vec!["Pelvis".to_string()];
    for i in 1..=*spine_count {
        column_labels.push(format!("Spine{:02}", i));
    }
    column_labels.push("Chest".to_string());
    for i in 1..=*neck_count {
        column_labels.push(format!("Neck{:02}", i));
    }
    column_labels.push("Head".to_string());

    let column_worlds = pivot_worlds(scene, pivots, &column_labels)?;
    let head_end = scene.world(pivots.require("HeadEnd")?).translation;
    let aim_axis = DVec3::from(axis_orient.aim_axis());

    let column_joints = make_joint_chain(
        scene,
        zone,
        &column_labels,
        &column_worlds,
        Some(head_end),
        aim_axis,
        cog_in,
        spec.radius,
    )?;

    let head_joint = *column_joints.last().expect("column is never empty");
    let jaw_world = scene.world(pivots.require("Jaw")?);
    let jaw_end = scene.world(pivots.require("JawEnd")?).translation;
    let jaw_joints = make_joint_chain(
        scene,
        zone,
        &["Jaw".to_string()],
        &[jaw_world],
        Some(jaw_end),
        aim_axis,
        head_joint,
        spec.radius,
    )?;
    let jaw_joint = jaw_joints[0];

    // Primary controls on the anatomical landmarks, tweak controls on the
    // flagged secondary joints.
    let pelvis_index = 0;
    let chest_index = 1 + *spine_count as usize;
    let head_index = column_labels.len() - 1;

    let mut controls = Vec::new();
    for (label, world) in [
        ("PelvisMain", column_worlds[pelvis_index]),
        ("ChestMain", column_worlds[chest_index]),
        ("HeadMain", column_worlds[head_index]),
        ("JawMain", jaw_world),
    ] {
        let chain = make_control(scene, zone, label, spec.ctrl_radius, cog_in, world)?;
        controls.push(chain.ctrl);
    }
    for i in spine_secondary {
        let world = column_worlds[*i as usize];
        let chain = make_control(
            scene,
            zone,
            &format!("Spine{:02}Tweak", i),
            spec.ctrl_radius * 0.6,
            cog_in,
            world,
        )?;
        controls.push(chain.ctrl);
    }
    for i in neck_secondary {
        let world = column_worlds[chest_index + *i as usize];
        let chain = make_control(
            scene,
            zone,
            &format!("Neck{:02}Tweak", i),
            spec.ctrl_radius * 0.6,
            cog_in,
            world,
        )?;
        controls.push(chain.ctrl);
    }

    // Opaque spline mechanism stand-ins
    let prefix = zone.prefix();
    let spline = scene.add_node(
        format!("{prefix}{}SplineIK_Hndl", spec.name),
        NodeKind::Guts,
        Some(guts_grp),
    )?;
    let curve = scene.add_node(
        format!("{prefix}{}IK_Crv", spec.name),
        NodeKind::Guts,
        Some(guts_grp),
    )?;

    let (pelvis_out, _) = make_space_out(scene, registry, &ident, "pelvis", column_joints[pelvis_index])?;
    let (chest_out, _) = make_space_out(scene, registry, &ident, "chest", column_joints[chest_index])?;
    let (head_out, _) = make_space_out(scene, registry, &ident, "head", head_joint)?;
    let (jaw_out, _) = make_space_out(scene, registry, &ident, "jaw", jaw_joint)?;

    let mut bind_joints = column_joints;
    bind_joints.push(jaw_joint);

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins: vec![cog_key],
        space_outs: vec![pelvis_out, chest_out, head_out, jaw_out],
        bind_joints,
        controls,
        guts: vec![spline, curve],
        handles: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivots::create_pivots;
    use skelform_spec::{AxisOrient, Zone};

    fn torso_spec() -> ModuleSpec {
        ModuleSpec::new(
            "Torso",
            Zone::Center,
            ModuleParams::Torso {
                spine_count: 3,
                neck_count: 6,
                spine_secondary: vec![],
                neck_secondary: vec![4],
                axis_orient: AxisOrient::YUp,
            },
        )
    }

    #[test]
    fn test_torso_build_shape() {
        let mut scene = Scene::new();
        let mut registry = SocketRegistry::new();
        let spec = torso_spec();
        let pivots = create_pivots(&mut scene, &spec).unwrap();
        let rig = build(&mut scene, &mut registry, &spec, &pivots).unwrap();

        // Pelvis + 3 spine + chest + 6 neck + head + jaw
        assert_eq!(rig.bind_joints.len(), 12);
        // Four mains + one neck tweak
        assert_eq!(rig.controls.len(), 5);
        assert_eq!(rig.space_ins.len(), 1);
        assert_eq!(rig.space_outs.len(), 4);

        // Bind joint order matches the kind's joint labels
        let labels = spec.params.joint_labels("Torso");
        for (joint, label) in rig.bind_joints.iter().zip(&labels) {
            assert_eq!(scene.name(*joint), format!("{label}_Jnt"));
        }
    }

    #[test]
    fn test_jaw_branches_from_head() {
        let mut scene = Scene::new();
        let mut registry = SocketRegistry::new();
        let spec = torso_spec();
        let pivots = create_pivots(&mut scene, &spec).unwrap();
        let rig = build(&mut scene, &mut registry, &spec, &pivots).unwrap();

        let jaw = *rig.bind_joints.last().unwrap();
        let head = rig.bind_joints[rig.bind_joints.len() - 2];
        assert_eq!(scene.name(jaw), "Jaw_Jnt");
        assert_eq!(scene.name(head), "Head_Jnt");
        assert_eq!(scene.parent(jaw), Some(head));
    }
}
