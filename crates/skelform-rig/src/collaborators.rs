//! Geometry and safety collaborators.
//!
//! These are external concerns the assembler consumes through narrow
//! contracts: deformable geometry binding and per-module guard nodes.
//! The defaults are enough for proxy workflows and for tests; hosts with
//! real deformers supply their own implementations.

use crate::error::BuildResult;
use skelform_scene::{AttrValue, NodeId, NodeKind, Scene};

/// Attaches deformable meshes to bind joints.
pub trait GeometryBinder {
    /// Binds geometry for the given joints. No return value is consumed
    /// by the assembler.
    fn bind(&mut self, scene: &Scene, bind_joints: &[NodeId]);
}

/// Associates each bind joint with its proxy mesh by naming convention:
/// `L_Hip_Jnt` binds `L_Hip_Mesh`.
#[derive(Debug, Default)]
pub struct ProxyGeometryBinder {
    bindings: Vec<(String, String)>,
}

impl ProxyGeometryBinder {
    /// Creates a binder with no recorded bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The joint-to-mesh associations recorded so far.
    pub fn bindings(&self) -> &[(String, String)] {
        &self.bindings
    }
}

impl GeometryBinder for ProxyGeometryBinder {
    fn bind(&mut self, scene: &Scene, bind_joints: &[NodeId]) {
        for &joint in bind_joints {
            let joint_name = scene.name(joint).to_string();
            let mesh_name = joint_name.replace("_Jnt", "_Mesh");
            self.bindings.push((joint_name, mesh_name));
        }
    }
}

/// Adds guard nodes that protect a module from invalid manipulation.
pub trait SafetyCover {
    /// Applies covers to a module's root group. Must be idempotent per
    /// root group.
    fn apply(&mut self, scene: &mut Scene, rig_root: NodeId) -> BuildResult<()>;
}

/// Marker attribute the standard cover sets on covered roots.
pub const COVERED_ATTR: &str = "safety_covered";

/// Default safety cover: one guard node under the root plus a marker
/// attribute that makes re-application a no-op.
#[derive(Debug, Default)]
pub struct StandardSafetyCover;

impl SafetyCover for StandardSafetyCover {
    fn apply(&mut self, scene: &mut Scene, rig_root: NodeId) -> BuildResult<()> {
        if scene.has_attr(rig_root, COVERED_ATTR) {
            return Ok(());
        }
        let cover_name = format!("{}Cover_Guts", scene.name(rig_root).trim_end_matches("_Grp"));
        scene.add_node(cover_name, NodeKind::Guts, Some(rig_root))?;
        scene.add_attr(rig_root, COVERED_ATTR, AttrValue::Bool(true))?;
        Ok(())
    }
}
