//! Half-muscle rig factory: a two-ended stretch helper whose root and
//! tip ride different producer spaces.

use super::{
    make_guts_group, make_joint_chain, make_rig_root, make_space_in, ModuleRig,
};
use crate::error::BuildResult;
use crate::pivots::PivotSet;
use crate::socket::SocketRegistry;
use skelform_scene::{NodeKind, Scene};
use skelform_spec::ModuleSpec;

pub(crate) fn build(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    spec: &ModuleSpec,
    pivots: &PivotSet,
) -> BuildResult<ModuleRig> {
    let ident = spec.ident();
    let zone = spec.zone;
    let prefix = zone.prefix();
    let name = &spec.name;

    let root = make_rig_root(scene, &ident, zone)?;
    let (root_key, root_in) = make_space_in(scene, registry, &ident, "root", root)?;
    let (tip_key, tip_in) = make_space_in(scene, registry, &ident, "tip", root)?;
    let guts_grp = make_guts_group(scene, &ident, root_in)?;

    let root_world = scene.world(pivots.require(&format!("{name}Root"))?);
    let tip_world = scene.world(pivots.require(&format!("{name}Tip"))?);

    // Root joint aims at the tip; the live aim mechanism is opaque guts.
    let root_joints = make_joint_chain(
        scene,
        zone,
        &[format!("{name}Root")],
        &[root_world],
        Some(tip_world.translation),
        glam::DVec3::Y,
        root_in,
        spec.radius,
    )?;
    let tip_joints = make_joint_chain(
        scene,
        zone,
        &[format!("{name}Tip")],
        &[tip_world],
        None,
        glam::DVec3::Y,
        tip_in,
        spec.radius,
    )?;

    let up_loc = scene.add_node(
        format!("{prefix}{name}RootUp_Loc"),
        NodeKind::Guts,
        Some(guts_grp),
    )?;
    let stretch = scene.add_node(
        format!("{prefix}{name}Stretch_Guts"),
        NodeKind::Guts,
        Some(guts_grp),
    )?;

    Ok(ModuleRig {
        ident,
        zone,
        root,
        space_ins: vec![root_key, tip_key],
        space_outs: Vec::new(),
        bind_joints: vec![root_joints[0], tip_joints[0]],
        controls: Vec::new(),
        guts: vec![up_loc, stretch],
        handles: Vec::new(),
    })
}
