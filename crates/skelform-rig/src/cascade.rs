//! The attribute cascade: one global source node, live-broadcast to
//! every module root.
//!
//! The cascade source lives on the base module's master control. Each
//! module root subscribes to the universal display attributes and to
//! exactly its zone's color source. Connections are live: a later write
//! to the source is observed by every subscribed root without
//! re-running the broadcast.

use crate::error::BuildResult;
use skelform_scene::{AttrValue, NodeId, Scene, SceneError};
use skelform_spec::Zone;

/// Universal cascade attribute: control visibility.
pub const SHOW_CONTROLS: &str = "show_controls";
/// Universal cascade attribute: internal mechanism visibility.
pub const SHOW_GUTS: &str = "show_guts";
/// Universal cascade attribute: joint draw style.
pub const BONE_DRAW_STYLE: &str = "bone_draw_style";
/// Per-root color attribute fed by the zone-selected color source.
pub const CTRL_COLOR: &str = "ctrl_color";
/// Cascade source attribute: proxy geometry visibility.
pub const SHOW_PROXY_GEO: &str = "show_proxy_geo";
/// Cascade source attribute: render geometry visibility.
pub const SHOW_RENDER_GEO: &str = "show_render_geo";

/// The universal attributes every module root subscribes to.
pub const UNIVERSAL_ATTRS: &[&str] = &[SHOW_CONTROLS, SHOW_GUTS, BONE_DRAW_STYLE];

/// Joint draw styles carried by [`BONE_DRAW_STYLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawStyle {
    /// Full bone shapes.
    #[default]
    Bone,
    /// Box shapes.
    Box,
    /// Hidden.
    None,
}

impl DrawStyle {
    /// Returns the attribute value encoding of this style.
    pub fn as_int(&self) -> i64 {
        match self {
            DrawStyle::Bone => 0,
            DrawStyle::Box => 1,
            DrawStyle::None => 2,
        }
    }
}

/// Returns the default control color for a zone (left blue, right red,
/// center yellow).
pub fn zone_color(zone: Zone) -> [f64; 3] {
    match zone {
        Zone::Left => [0.2, 0.4, 1.0],
        Zone::Right => [1.0, 0.3, 0.3],
        Zone::Center => [1.0, 0.9, 0.2],
    }
}

/// Adds the display attributes every module root carries.
pub(crate) fn install_root_attrs(
    scene: &mut Scene,
    root: NodeId,
    zone: Zone,
) -> Result<(), SceneError> {
    scene.add_attr(root, SHOW_CONTROLS, AttrValue::Bool(true))?;
    scene.add_attr(root, SHOW_GUTS, AttrValue::Bool(false))?;
    scene.add_attr(root, BONE_DRAW_STYLE, AttrValue::Int(DrawStyle::Bone.as_int()))?;
    scene.add_attr(root, CTRL_COLOR, AttrValue::Color(zone_color(zone)))?;
    Ok(())
}

/// The single global cascade source.
#[derive(Debug, Clone, Copy)]
pub struct CascadeSource {
    node: NodeId,
}

impl CascadeSource {
    /// Installs the cascade attribute set on `node` (the master control)
    /// and returns the source handle.
    pub fn install(scene: &mut Scene, node: NodeId) -> BuildResult<Self> {
        scene.add_attr(node, SHOW_CONTROLS, AttrValue::Bool(true))?;
        scene.add_attr(node, SHOW_GUTS, AttrValue::Bool(false))?;
        scene.add_attr(node, BONE_DRAW_STYLE, AttrValue::Int(DrawStyle::Bone.as_int()))?;
        for zone in Zone::all() {
            scene.add_attr(node, zone.color_attr(), AttrValue::Color(zone_color(*zone)))?;
        }
        scene.add_attr(node, SHOW_PROXY_GEO, AttrValue::Bool(true))?;
        scene.add_attr(node, SHOW_RENDER_GEO, AttrValue::Bool(true))?;
        Ok(Self { node })
    }

    /// The node carrying the canonical values.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Subscribes a module root to the cascade.
    ///
    /// Wires every universal attribute one-to-one and the zone-selected
    /// color source to the root's color. Reads of the root's attributes
    /// resolve through the connections from then on.
    pub fn broadcast(&self, scene: &mut Scene, module_root: NodeId, zone: Zone) -> BuildResult<()> {
        for attr in UNIVERSAL_ATTRS {
            scene.connect_attr(self.node, attr, module_root, attr)?;
        }
        scene.connect_attr(self.node, zone.color_attr(), module_root, CTRL_COLOR)?;
        Ok(())
    }

    /// Sets the canonical control visibility.
    pub fn set_show_controls(&self, scene: &mut Scene, show: bool) -> BuildResult<()> {
        Ok(scene.set_attr(self.node, SHOW_CONTROLS, AttrValue::Bool(show))?)
    }

    /// Sets the canonical guts visibility.
    pub fn set_show_guts(&self, scene: &mut Scene, show: bool) -> BuildResult<()> {
        Ok(scene.set_attr(self.node, SHOW_GUTS, AttrValue::Bool(show))?)
    }

    /// Sets the canonical draw style.
    pub fn set_draw_style(&self, scene: &mut Scene, style: DrawStyle) -> BuildResult<()> {
        Ok(scene.set_attr(self.node, BONE_DRAW_STYLE, AttrValue::Int(style.as_int()))?)
    }

    /// Sets one zone's canonical color.
    pub fn set_zone_color(&self, scene: &mut Scene, zone: Zone, color: [f64; 3]) -> BuildResult<()> {
        Ok(scene.set_attr(self.node, zone.color_attr(), AttrValue::Color(color))?)
    }
}
