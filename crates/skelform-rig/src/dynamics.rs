//! Chain dynamics collaborator.
//!
//! Chain modules (tails, whiskers, tongues) can carry a dynamics control
//! node. The simulation itself is external; the assembler only creates
//! the control node and exposes its tunables, each independently
//! settable after creation.

use crate::error::{BuildError, BuildResult};
use crate::modules::ModuleRig;
use skelform_scene::{AttrValue, NodeId, NodeKind, Scene};
use skelform_spec::DynamicsSpec;

/// One dynamics tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynParam {
    /// Resistance to stretching along the chain.
    StretchResistance,
    /// Resistance to compression along the chain.
    CompressionResistance,
    /// Resistance to bending.
    BendResistance,
    /// Attraction of the simulated curve back to the start curve.
    StartCurveAttract,
}

impl DynParam {
    /// Returns the attribute name carrying this parameter.
    pub fn attr_name(&self) -> &'static str {
        match self {
            DynParam::StretchResistance => "stretch_resistance",
            DynParam::CompressionResistance => "compression_resistance",
            DynParam::BendResistance => "bend_resistance",
            DynParam::StartCurveAttract => "start_curve_attract",
        }
    }

    /// Returns all parameters.
    pub fn all() -> &'static [DynParam] {
        &[
            DynParam::StretchResistance,
            DynParam::CompressionResistance,
            DynParam::BendResistance,
            DynParam::StartCurveAttract,
        ]
    }
}

/// Handle to a module's dynamics control node.
#[derive(Debug, Clone, Copy)]
pub struct DynamicsControl {
    node: NodeId,
}

impl DynamicsControl {
    /// The dynamics control node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Reads one tunable.
    pub fn get(&self, scene: &Scene, param: DynParam) -> BuildResult<f64> {
        let value = scene.attr(self.node, param.attr_name())?;
        Ok(value.as_float().expect("dynamics attrs are floats"))
    }

    /// Sets one tunable.
    pub fn set(&self, scene: &mut Scene, param: DynParam, value: f64) -> BuildResult<()> {
        Ok(scene.set_attr(self.node, param.attr_name(), AttrValue::Float(value))?)
    }
}

/// Adds a dynamics control to a chain module's rig.
///
/// Requires the module to have IK handles (FK-only chains are not
/// simulated). Initial values come from the spec; every parameter stays
/// settable afterwards through [`DynamicsControl::set`].
pub fn add_chain_dynamics(
    scene: &mut Scene,
    rig: &ModuleRig,
    spec: &DynamicsSpec,
) -> BuildResult<DynamicsControl> {
    if rig.handles.is_empty() {
        return Err(BuildError::DynamicsUnsupported(rig.ident.clone()));
    }
    let node = scene.add_node(
        format!("{}Dyn_Ctrl", rig.ident),
        NodeKind::Control,
        Some(rig.root),
    )?;
    scene.add_attr(
        node,
        DynParam::StretchResistance.attr_name(),
        AttrValue::Float(spec.stretch_resistance),
    )?;
    scene.add_attr(
        node,
        DynParam::CompressionResistance.attr_name(),
        AttrValue::Float(spec.compression_resistance),
    )?;
    scene.add_attr(
        node,
        DynParam::BendResistance.attr_name(),
        AttrValue::Float(spec.bend_resistance),
    )?;
    scene.add_attr(
        node,
        DynParam::StartCurveAttract.attr_name(),
        AttrValue::Float(spec.start_curve_attract),
    )?;
    Ok(DynamicsControl { node })
}
