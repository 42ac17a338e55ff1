//! The implicit base module: master controls and the top-level spaces
//! every other module ultimately roots to.

use super::{make_control, make_rig_root, make_space_out, ModuleRig};
use crate::error::BuildResult;
use crate::socket::SocketRegistry;
use skelform_scene::{NodeId, Scene, Transform};
use skelform_spec::{Zone, BASE_MODULE};

/// The base module build: the module rig plus the two master controls.
#[derive(Debug)]
pub struct BaseRig {
    /// The base module's rig.
    pub rig: ModuleRig,
    /// The master control; carries the cascade source attributes.
    pub all_ctrl: NodeId,
    /// The center-of-gravity control.
    pub cog_ctrl: NodeId,
}

/// Builds the base rig: `All` control at the origin, `Cog` control at the
/// authored cog pivot, and the `cog`/`all` output sockets.
pub fn build_base_rig(
    scene: &mut Scene,
    registry: &mut SocketRegistry,
    master_ctrl_radius: f64,
    cog_world: Transform,
) -> BuildResult<BaseRig> {
    let root = make_rig_root(scene, BASE_MODULE, Zone::Center)?;

    let all = make_control(
        scene,
        Zone::Center,
        "All",
        master_ctrl_radius,
        root,
        Transform::IDENTITY,
    )?;
    let cog = make_control(
        scene,
        Zone::Center,
        "Cog",
        master_ctrl_radius * 0.4,
        all.delta,
        cog_world,
    )?;

    let (all_key, _) = make_space_out(scene, registry, BASE_MODULE, "all", all.delta)?;
    let (cog_key, _) = make_space_out(scene, registry, BASE_MODULE, "cog", cog.delta)?;

    Ok(BaseRig {
        rig: ModuleRig {
            ident: BASE_MODULE.to_string(),
            zone: Zone::Center,
            root,
            space_ins: Vec::new(),
            space_outs: vec![cog_key, all_key],
            bind_joints: Vec::new(),
            controls: vec![all.ctrl, cog.ctrl],
            guts: Vec::new(),
            handles: Vec::new(),
        },
        all_ctrl: all.ctrl,
        cog_ctrl: cog.ctrl,
    })
}
