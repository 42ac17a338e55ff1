//! Twist rig factory: secondary joints riding an existing limb.
//!
//! A twist module has no pivots: each twist group rides a producer joint
//! exactly through its input socket, and twist distribution along the
//! bone is the opaque mechanism's concern.

use super::{make_control, make_guts_group, make_rig_root, make_space_in, ModuleRig};
use crate::error::BuildResult;
use crate::socket::SocketRegistry;
use skelform_scene::{AttrValue, NodeKind, Scene, Transform};
use skelform_spec::{ModuleParams, ModuleSpec};

pub(crate) fn build(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
) -> BuildResult<ModuleRig> {
    let ModuleParams::Twist {
        joints,
        twist_count,
    } = &spec.params
    else {
        unreachable!("dispatched on params kind");
    };

    let ident = spec.ident();
    let zone = spec.zone;
    let prefix = zone.prefix();

    let root = make_rig_root(scene, &ident, zone)?;
    let guts_grp = make_guts_group(scene, &ident, root)?;

    let mut space_ins = Vec::new();
    let mut bind_joints = Vec::new();
    let mut controls = Vec::new();
    let mut guts = Vec::new();

    for joint_label in joints {
        let (key, in_node) =
            make_space_in(scene, registry, &ident, &joint_label.to_lowercase(), root)?;
        space_ins.push(key);

        for i in 1..=*twist_count {
            let twist = scene.add_node(
                format!("{prefix}{joint_label}Twist{:02}_Jnt", i),
                NodeKind::Joint,
                Some(in_node),
            )?;
            scene.add_attr(twist, "radius", AttrValue::Float(spec.radius))?;
            bind_joints.push(twist);
        }

        let chain = make_control(
            scene,
            zone,
            &format!("{joint_label}Twist"),
            spec.ctrl_radius,
            in_node,
            Transform::IDENTITY,
        )?;
        controls.push(chain.ctrl);

        let dist = scene.add_node(
            format!("{prefix}{joint_label}TwistDist_Guts"),
            NodeKind::Guts,
            Some(guts_grp),
        )?;
        guts.push(dist);
    }

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins,
        space_outs: Vec::new(),
        bind_joints,
        controls,
        guts,
        handles: Vec::new(),
    })
}
