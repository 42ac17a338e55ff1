//! The scene: a node arena with typed handles, named attributes with live
//! connections, and pose/scale couplings.
//!
//! The scene is the build context every factory receives. Nodes are
//! addressed by [`NodeId`] handles returned at creation; the name index
//! exists only to reject duplicates and to serve diagnostics.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::transform::Transform;
use glam::DVec3;

/// Handle to a node in a [`Scene`].
///
/// Ids are minted by the scene that owns the node and stay valid for the
/// scene's lifetime (nodes are never deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node represents in the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Plain transform group.
    Group,
    /// Placement marker consumed by rig factories.
    Pivot,
    /// Auxiliary marker (aim references, pole positions).
    Locator,
    /// Skeletal bind joint.
    Joint,
    /// Animator control.
    Control,
    /// Internal mechanism node.
    Guts,
}

/// A typed attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue {
    /// Boolean switch.
    Bool(bool),
    /// Integer (enum-like) value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// RGB color, components in 0.0-1.0.
    Color([f64; 3]),
}

impl AttrValue {
    /// Returns the value's type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Color(_) => "color",
        }
    }

    /// Returns true when `other` holds the same value type.
    pub fn same_type(&self, other: &AttrValue) -> bool {
        self.type_name() == other.type_name()
    }

    /// Extracts a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts an int.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extracts a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Extracts a color.
    pub fn as_color(&self) -> Option<[f64; 3]> {
        match self {
            AttrValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// An attribute slot: a local value, or a live connection to another
/// node's attribute. Reads of a connected slot resolve through the
/// connection at query time.
#[derive(Debug, Clone)]
enum AttrSlot {
    Value(AttrValue),
    Connected { source: NodeId, attr: String },
}

#[derive(Debug, Clone)]
struct PoseCoupling {
    driver: NodeId,
    rest: Transform,
}

#[derive(Debug, Clone)]
struct ScaleCoupling {
    driver: NodeId,
    rest: DVec3,
}

#[derive(Debug)]
struct Node {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Transform,
    attrs: BTreeMap<String, AttrSlot>,
    pose_coupling: Option<PoseCoupling>,
    scale_coupling: Option<ScaleCoupling>,
}

/// Errors raised by scene mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// A node with this name already exists.
    #[error("name `{0}` already exists in the scene")]
    NameCollision(String),

    /// The attribute does not exist on the node.
    #[error("attribute `{attr}` not found on `{node}`")]
    AttrNotFound {
        /// Node name.
        node: String,
        /// Attribute name.
        attr: String,
    },

    /// The attribute already exists on the node.
    #[error("attribute `{attr}` already exists on `{node}`")]
    AttrExists {
        /// Node name.
        node: String,
        /// Attribute name.
        attr: String,
    },

    /// The value's type does not match the attribute's type.
    #[error("attribute `{attr}` on `{node}` holds {found}, not {expected}")]
    AttrTypeMismatch {
        /// Node name.
        node: String,
        /// Attribute name.
        attr: String,
        /// Type currently stored.
        found: &'static str,
        /// Type of the rejected value.
        expected: &'static str,
    },

    /// The attribute is driven by a connection and cannot be set locally.
    #[error("attribute `{attr}` on `{node}` is connected and cannot be set")]
    AttrConnected {
        /// Node name.
        node: String,
        /// Attribute name.
        attr: String,
    },

    /// The node already has a pose or scale driver.
    #[error("`{0}` already has a primary driver")]
    AlreadyDriven(String),

    /// The coupling or connection would reference the node itself.
    #[error("`{0}` cannot drive itself")]
    SelfDriven(String),

    /// The coupling would make evaluation cyclic.
    #[error("coupling `{driver}` -> `{driven}` would create an evaluation cycle")]
    EvaluationCycle {
        /// Driver node name.
        driver: String,
        /// Driven node name.
        driven: String,
    },

    /// Reparenting would make the hierarchy cyclic.
    #[error("cannot parent `{child}` under its descendant `{parent}`")]
    HierarchyCycle {
        /// Child node name.
        child: String,
        /// Requested parent node name.
        parent: String,
    },
}

/// The shared build context: one mutable transform graph.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    names: HashMap<String, NodeId>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node. Fails if the name is already taken.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(SceneError::NameCollision(name));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.clone(),
            kind,
            parent,
            children: Vec::new(),
            local: Transform::IDENTITY,
            attrs: BTreeMap::new(),
            pose_coupling: None,
            scale_coupling: None,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0 as usize].children.push(id);
        }
        self.names.insert(name, id);
        Ok(id)
    }

    /// Number of nodes in the scene.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over all node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Returns a node's name.
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0 as usize].name
    }

    /// Returns a node's kind.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0 as usize].kind
    }

    /// Returns a node's parent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0 as usize].parent
    }

    /// Returns a node's children, in creation order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0 as usize].children
    }

    /// Finds a node by name. For diagnostics and tests; factories pass
    /// handles, never names.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Returns a node's local transform.
    pub fn local(&self, id: NodeId) -> Transform {
        self.nodes[id.0 as usize].local
    }

    /// Sets a node's local transform.
    pub fn set_local(&mut self, id: NodeId, local: Transform) {
        self.nodes[id.0 as usize].local = local;
    }

    /// Evaluates a node's world transform.
    ///
    /// A pose coupling overrides translation and rotation with
    /// `driver_world * rest`; a scale coupling overrides scale with
    /// `driver_scale * rest`.
    pub fn world(&self, id: NodeId) -> Transform {
        let node = &self.nodes[id.0 as usize];
        let mut world = match node.parent {
            Some(parent) => self.world(parent).mul(&node.local),
            None => node.local,
        };
        if let Some(coupling) = &node.pose_coupling {
            let driven = self.world(coupling.driver).mul(&coupling.rest);
            world.translation = driven.translation;
            world.rotation = driven.rotation;
        }
        if let Some(coupling) = &node.scale_coupling {
            world.scale = self.world(coupling.driver).scale * coupling.rest;
        }
        world
    }

    /// Sets a node's local transform so that its world transform becomes
    /// `world`.
    pub fn set_world(&mut self, id: NodeId, world: Transform) {
        let local = match self.parent(id) {
            Some(parent) => self.world(parent).inverse().mul(&world),
            None => world,
        };
        self.set_local(id, local);
    }

    /// Moves `child` under `new_parent`, preserving the child's world pose.
    pub fn parent_keep_world(
        &mut self,
        child: NodeId,
        new_parent: NodeId,
    ) -> Result<(), SceneError> {
        if child == new_parent || self.is_ancestor(child, new_parent) {
            return Err(SceneError::HierarchyCycle {
                child: self.name(child).to_string(),
                parent: self.name(new_parent).to_string(),
            });
        }
        let world = self.world(child);
        if let Some(old_parent) = self.nodes[child.0 as usize].parent {
            let siblings = &mut self.nodes[old_parent.0 as usize].children;
            siblings.retain(|&c| c != child);
        }
        self.nodes[child.0 as usize].parent = Some(new_parent);
        self.nodes[new_parent.0 as usize].children.push(child);
        self.set_world(child, world);
        Ok(())
    }

    /// Returns true when `ancestor` appears on `node`'s parent chain.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Adds an attribute with an initial value. Fails if it exists.
    pub fn add_attr(
        &mut self,
        id: NodeId,
        attr: impl Into<String>,
        value: AttrValue,
    ) -> Result<(), SceneError> {
        let attr = attr.into();
        let node = &mut self.nodes[id.0 as usize];
        if node.attrs.contains_key(&attr) {
            return Err(SceneError::AttrExists {
                node: node.name.clone(),
                attr,
            });
        }
        node.attrs.insert(attr, AttrSlot::Value(value));
        Ok(())
    }

    /// Returns true when the node has the attribute.
    pub fn has_attr(&self, id: NodeId, attr: &str) -> bool {
        self.nodes[id.0 as usize].attrs.contains_key(attr)
    }

    /// Sets a local attribute value. The attribute must exist, must hold
    /// the same type, and must not be connected.
    pub fn set_attr(&mut self, id: NodeId, attr: &str, value: AttrValue) -> Result<(), SceneError> {
        let node_name = self.nodes[id.0 as usize].name.clone();
        let node = &mut self.nodes[id.0 as usize];
        match node.attrs.get_mut(attr) {
            None => Err(SceneError::AttrNotFound {
                node: node_name,
                attr: attr.to_string(),
            }),
            Some(AttrSlot::Connected { .. }) => Err(SceneError::AttrConnected {
                node: node_name,
                attr: attr.to_string(),
            }),
            Some(AttrSlot::Value(current)) => {
                if !current.same_type(&value) {
                    return Err(SceneError::AttrTypeMismatch {
                        node: node_name,
                        attr: attr.to_string(),
                        found: current.type_name(),
                        expected: value.type_name(),
                    });
                }
                *current = value;
                Ok(())
            }
        }
    }

    /// Reads an attribute, following connections to their source.
    pub fn attr(&self, id: NodeId, attr: &str) -> Result<AttrValue, SceneError> {
        let mut current_id = id;
        let mut current_attr = attr;
        // Connections form a DAG by construction; the hop bound guards
        // against stale handles from a foreign scene.
        for _ in 0..=self.nodes.len() {
            let node = &self.nodes[current_id.0 as usize];
            match node.attrs.get(current_attr) {
                None => {
                    return Err(SceneError::AttrNotFound {
                        node: node.name.clone(),
                        attr: current_attr.to_string(),
                    })
                }
                Some(AttrSlot::Value(value)) => return Ok(*value),
                Some(AttrSlot::Connected { source, attr }) => {
                    current_id = *source;
                    current_attr = attr;
                }
            }
        }
        Err(SceneError::AttrNotFound {
            node: self.name(id).to_string(),
            attr: attr.to_string(),
        })
    }

    /// Connects `dst.dst_attr` so it live-reads `src.src_attr`.
    ///
    /// Both attributes must exist and hold the same type. After the
    /// connection, every read of the destination observes the source's
    /// current value.
    pub fn connect_attr(
        &mut self,
        src: NodeId,
        src_attr: &str,
        dst: NodeId,
        dst_attr: &str,
    ) -> Result<(), SceneError> {
        if src == dst && src_attr == dst_attr {
            return Err(SceneError::SelfDriven(self.name(src).to_string()));
        }
        let src_value = self.attr(src, src_attr)?;
        let dst_value = self.attr(dst, dst_attr)?;
        if !src_value.same_type(&dst_value) {
            return Err(SceneError::AttrTypeMismatch {
                node: self.name(dst).to_string(),
                attr: dst_attr.to_string(),
                found: dst_value.type_name(),
                expected: src_value.type_name(),
            });
        }
        self.nodes[dst.0 as usize].attrs.insert(
            dst_attr.to_string(),
            AttrSlot::Connected {
                source: src,
                attr: src_attr.to_string(),
            },
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Couplings
    // -------------------------------------------------------------------------

    /// Returns true when the node has a pose driver.
    pub fn is_pose_driven(&self, id: NodeId) -> bool {
        self.nodes[id.0 as usize].pose_coupling.is_some()
    }

    /// Returns true when the node has a scale driver.
    pub fn is_scale_driven(&self, id: NodeId) -> bool {
        self.nodes[id.0 as usize].scale_coupling.is_some()
    }

    /// Couples `driven`'s translation and rotation to `driver`.
    ///
    /// With `maintain_offset`, the stored rest transform is
    /// `inverse(driver_world) * driven_world` captured now, so the driven
    /// node's world pose is unchanged by the bind. A node accepts one
    /// pose driver; a second bind is rejected.
    pub fn bind_pose(
        &mut self,
        driver: NodeId,
        driven: NodeId,
        maintain_offset: bool,
    ) -> Result<(), SceneError> {
        self.check_coupling(driver, driven)?;
        if self.is_pose_driven(driven) {
            return Err(SceneError::AlreadyDriven(self.name(driven).to_string()));
        }
        let rest = if maintain_offset {
            self.world(driver).inverse().mul(&self.world(driven))
        } else {
            Transform::IDENTITY
        };
        self.nodes[driven.0 as usize].pose_coupling = Some(PoseCoupling { driver, rest });
        Ok(())
    }

    /// Couples `driven`'s scale to `driver`.
    ///
    /// With `maintain_offset`, the rest is the componentwise ratio of the
    /// two world scales captured now.
    pub fn bind_scale(
        &mut self,
        driver: NodeId,
        driven: NodeId,
        maintain_offset: bool,
    ) -> Result<(), SceneError> {
        self.check_coupling(driver, driven)?;
        if self.is_scale_driven(driven) {
            return Err(SceneError::AlreadyDriven(self.name(driven).to_string()));
        }
        let rest = if maintain_offset {
            self.world(driven).scale / self.world(driver).scale
        } else {
            DVec3::ONE
        };
        self.nodes[driven.0 as usize].scale_coupling = Some(ScaleCoupling { driver, rest });
        Ok(())
    }

    fn check_coupling(&self, driver: NodeId, driven: NodeId) -> Result<(), SceneError> {
        if driver == driven {
            return Err(SceneError::SelfDriven(self.name(driven).to_string()));
        }
        if self.evaluation_depends_on(driver, driven) {
            return Err(SceneError::EvaluationCycle {
                driver: self.name(driver).to_string(),
                driven: self.name(driven).to_string(),
            });
        }
        Ok(())
    }

    /// Returns true when evaluating `node`'s world reads `target`'s world.
    fn evaluation_depends_on(&self, node: NodeId, target: NodeId) -> bool {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            let n = &self.nodes[id.0 as usize];
            if let Some(parent) = n.parent {
                stack.push(parent);
            }
            if let Some(coupling) = &n.pose_coupling {
                stack.push(coupling.driver);
            }
            if let Some(coupling) = &n.scale_coupling {
                stack.push(coupling.driver);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-9;

    fn scene_with(names: &[(&str, NodeKind)]) -> (Scene, Vec<NodeId>) {
        let mut scene = Scene::new();
        let ids = names
            .iter()
            .map(|(name, kind)| scene.add_node(*name, *kind, None).unwrap())
            .collect();
        (scene, ids)
    }

    #[test]
    fn test_name_collision_rejected() {
        let mut scene = Scene::new();
        scene.add_node("Cog_Piv", NodeKind::Pivot, None).unwrap();
        let err = scene.add_node("Cog_Piv", NodeKind::Pivot, None).unwrap_err();
        assert_eq!(err, SceneError::NameCollision("Cog_Piv".to_string()));
    }

    #[test]
    fn test_world_composition() {
        let mut scene = Scene::new();
        let root = scene.add_node("Root", NodeKind::Group, None).unwrap();
        let child = scene.add_node("Child", NodeKind::Group, Some(root)).unwrap();
        scene.set_local(root, Transform::from_translation(DVec3::new(1.0, 2.0, 3.0)));
        scene.set_local(child, Transform::from_translation(DVec3::new(0.0, 1.0, 0.0)));
        let world = scene.world(child);
        assert!(world.translation.abs_diff_eq(DVec3::new(1.0, 3.0, 3.0), EPS));
    }

    #[test]
    fn test_set_world_inverts_parent_chain() {
        let mut scene = Scene::new();
        let root = scene.add_node("Root", NodeKind::Group, None).unwrap();
        let child = scene.add_node("Child", NodeKind::Group, Some(root)).unwrap();
        scene.set_local(
            root,
            Transform::from_euler_degrees([5.0, 0.0, 0.0], [0.0, 90.0, 0.0], [1.0, 1.0, 1.0]),
        );
        let target = Transform::from_euler_degrees([1.0, 2.0, 3.0], [0.0, 0.0, 45.0], [1.0, 1.0, 1.0]);
        scene.set_world(child, target);
        assert!(scene.world(child).approx_eq(&target, EPS));
    }

    #[test]
    fn test_parent_keep_world() {
        let mut scene = Scene::new();
        let a = scene.add_node("A", NodeKind::Group, None).unwrap();
        let b = scene.add_node("B", NodeKind::Group, None).unwrap();
        scene.set_local(a, Transform::from_euler_degrees([0.0, 10.0, 0.0], [0.0, 0.0, 90.0], [1.0, 1.0, 1.0]));
        scene.set_local(b, Transform::from_translation(DVec3::new(4.0, 5.0, 6.0)));
        let before = scene.world(b);
        scene.parent_keep_world(b, a).unwrap();
        assert_eq!(scene.parent(b), Some(a));
        assert!(scene.world(b).approx_eq(&before, EPS));
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let mut scene = Scene::new();
        let a = scene.add_node("A", NodeKind::Group, None).unwrap();
        let b = scene.add_node("B", NodeKind::Group, Some(a)).unwrap();
        let err = scene.parent_keep_world(a, b).unwrap_err();
        assert!(matches!(err, SceneError::HierarchyCycle { .. }));
    }

    #[test]
    fn test_attr_add_set_get() {
        let (mut scene, ids) = scene_with(&[("Ctrl", NodeKind::Control)]);
        scene.add_attr(ids[0], "show_controls", AttrValue::Bool(true)).unwrap();
        assert_eq!(
            scene.attr(ids[0], "show_controls").unwrap(),
            AttrValue::Bool(true)
        );
        scene.set_attr(ids[0], "show_controls", AttrValue::Bool(false)).unwrap();
        assert_eq!(
            scene.attr(ids[0], "show_controls").unwrap(),
            AttrValue::Bool(false)
        );
    }

    #[test]
    fn test_attr_type_mismatch() {
        let (mut scene, ids) = scene_with(&[("Ctrl", NodeKind::Control)]);
        scene.add_attr(ids[0], "style", AttrValue::Int(0)).unwrap();
        let err = scene.set_attr(ids[0], "style", AttrValue::Bool(true)).unwrap_err();
        assert!(matches!(err, SceneError::AttrTypeMismatch { .. }));
    }

    #[test]
    fn test_connection_is_live() {
        let (mut scene, ids) = scene_with(&[("Master", NodeKind::Control), ("Root", NodeKind::Group)]);
        let (master, root) = (ids[0], ids[1]);
        scene.add_attr(master, "show_controls", AttrValue::Bool(true)).unwrap();
        scene.add_attr(root, "show_controls", AttrValue::Bool(true)).unwrap();
        scene.connect_attr(master, "show_controls", root, "show_controls").unwrap();

        scene.set_attr(master, "show_controls", AttrValue::Bool(false)).unwrap();
        assert_eq!(
            scene.attr(root, "show_controls").unwrap(),
            AttrValue::Bool(false)
        );

        scene.set_attr(master, "show_controls", AttrValue::Bool(true)).unwrap();
        assert_eq!(
            scene.attr(root, "show_controls").unwrap(),
            AttrValue::Bool(true)
        );
    }

    #[test]
    fn test_connected_attr_rejects_local_set() {
        let (mut scene, ids) = scene_with(&[("Master", NodeKind::Control), ("Root", NodeKind::Group)]);
        let (master, root) = (ids[0], ids[1]);
        scene.add_attr(master, "v", AttrValue::Float(1.0)).unwrap();
        scene.add_attr(root, "v", AttrValue::Float(2.0)).unwrap();
        scene.connect_attr(master, "v", root, "v").unwrap();
        let err = scene.set_attr(root, "v", AttrValue::Float(3.0)).unwrap_err();
        assert!(matches!(err, SceneError::AttrConnected { .. }));
    }

    #[test]
    fn test_bind_pose_maintains_offset() {
        let (mut scene, ids) = scene_with(&[("Driver", NodeKind::Group), ("Driven", NodeKind::Group)]);
        let (driver, driven) = (ids[0], ids[1]);
        scene.set_local(
            driver,
            Transform::from_euler_degrees([10.0, 0.0, 0.0], [0.0, 45.0, 0.0], [1.0, 1.0, 1.0]),
        );
        scene.set_local(
            driven,
            Transform::from_euler_degrees([3.0, 4.0, 5.0], [30.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        );
        let before = scene.world(driven);
        scene.bind_pose(driver, driven, true).unwrap();
        let after = scene.world(driven);
        assert!(after.approx_eq(&before, 1e-9));
    }

    #[test]
    fn test_bind_pose_follows_driver() {
        let (mut scene, ids) = scene_with(&[("Driver", NodeKind::Group), ("Driven", NodeKind::Group)]);
        let (driver, driven) = (ids[0], ids[1]);
        scene.set_local(driven, Transform::from_translation(DVec3::new(0.0, 0.0, 5.0)));
        scene.bind_pose(driver, driven, true).unwrap();

        scene.set_local(driver, Transform::from_translation(DVec3::new(0.0, 7.0, 0.0)));
        let world = scene.world(driven);
        assert!(world.translation.abs_diff_eq(DVec3::new(0.0, 7.0, 5.0), EPS));
    }

    #[test]
    fn test_pose_coupling_without_offset_snaps() {
        let (mut scene, ids) = scene_with(&[("Driver", NodeKind::Group), ("Driven", NodeKind::Group)]);
        let (driver, driven) = (ids[0], ids[1]);
        scene.set_local(driver, Transform::from_translation(DVec3::new(1.0, 2.0, 3.0)));
        scene.set_local(driven, Transform::from_translation(DVec3::new(9.0, 9.0, 9.0)));
        scene.bind_pose(driver, driven, false).unwrap();
        let world = scene.world(driven);
        assert!(world.translation.abs_diff_eq(DVec3::new(1.0, 2.0, 3.0), EPS));
    }

    #[test]
    fn test_second_pose_driver_rejected() {
        let (mut scene, ids) = scene_with(&[
            ("DriverA", NodeKind::Group),
            ("DriverB", NodeKind::Group),
            ("Driven", NodeKind::Group),
        ]);
        scene.bind_pose(ids[0], ids[2], true).unwrap();
        let err = scene.bind_pose(ids[1], ids[2], true).unwrap_err();
        assert_eq!(err, SceneError::AlreadyDriven("Driven".to_string()));
    }

    #[test]
    fn test_coupling_cycle_rejected() {
        let (mut scene, ids) = scene_with(&[("A", NodeKind::Group), ("B", NodeKind::Group)]);
        scene.bind_pose(ids[0], ids[1], true).unwrap();
        let err = scene.bind_pose(ids[1], ids[0], true).unwrap_err();
        assert!(matches!(err, SceneError::EvaluationCycle { .. }));
    }

    #[test]
    fn test_scale_coupling_independent_of_pose() {
        let (mut scene, ids) = scene_with(&[("Driver", NodeKind::Group), ("Driven", NodeKind::Group)]);
        let (driver, driven) = (ids[0], ids[1]);
        scene.set_local(
            driver,
            Transform::from_trs(DVec3::ZERO, glam::DQuat::IDENTITY, DVec3::splat(2.0)),
        );
        // Pose-only coupling leaves scale alone
        scene.bind_pose(driver, driven, true).unwrap();
        assert!(scene.world(driven).scale.abs_diff_eq(DVec3::ONE, EPS));
        // Scale coupling carries it
        scene.bind_scale(driver, driven, true).unwrap();
        scene.set_local(
            driver,
            Transform::from_trs(DVec3::ZERO, glam::DQuat::IDENTITY, DVec3::splat(3.0)),
        );
        assert!(scene
            .world(driven)
            .scale
            .abs_diff_eq(DVec3::splat(1.5), EPS));
    }

    #[test]
    fn test_driven_node_carries_children() {
        let mut scene = Scene::new();
        let driver = scene.add_node("Driver", NodeKind::Group, None).unwrap();
        let driven = scene.add_node("Driven", NodeKind::Group, None).unwrap();
        let child = scene.add_node("Child", NodeKind::Joint, Some(driven)).unwrap();
        scene.set_local(child, Transform::from_translation(DVec3::new(1.0, 0.0, 0.0)));
        scene.bind_pose(driver, driven, true).unwrap();

        scene.set_local(driver, Transform::from_translation(DVec3::new(0.0, 0.0, 4.0)));
        let world = scene.world(child);
        assert!(world.translation.abs_diff_eq(DVec3::new(1.0, 0.0, 4.0), EPS));
    }
}
