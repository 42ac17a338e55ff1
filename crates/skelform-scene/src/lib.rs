//! Skelform Scene Substrate
//!
//! The transform and attribute graph the rig assembler programs against:
//! a node arena addressed by typed handles, TRS transforms, named
//! attributes with live one-directional connections, and pose/scale
//! couplings with maintain-offset semantics.
//!
//! Factories receive a `&mut Scene` as their build context and return
//! [`NodeId`] handles; there is no global namespace and no name-based
//! lookup on the hot path. Names exist to reject duplicates and serve
//! diagnostics.
//!
//! # Example
//!
//! ```
//! use skelform_scene::{AttrValue, NodeKind, Scene, Transform};
//! use glam::DVec3;
//!
//! let mut scene = Scene::new();
//! let driver = scene.add_node("Cog_SpaceOUT", NodeKind::Group, None).unwrap();
//! let driven = scene.add_node("Tail_SpaceIN", NodeKind::Group, None).unwrap();
//!
//! scene.set_local(driven, Transform::from_translation(DVec3::new(0.0, 0.0, -5.0)));
//! let before = scene.world(driven);
//!
//! // Pose-preserving coupling: the driven node keeps its pose at bind time.
//! scene.bind_pose(driver, driven, true).unwrap();
//! assert!(scene.world(driven).approx_eq(&before, 1e-9));
//! ```

pub mod scene;
pub mod transform;

pub use scene::{AttrValue, NodeId, NodeKind, Scene, SceneError};
pub use transform::Transform;
