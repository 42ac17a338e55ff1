//! Pivot creation and placement.
//!
//! Pivots are the placement markers a module's rig build consumes. They
//! are created at deterministic defaults, overwritten from the spec's
//! authored world-space placements, and left in the scene (inert) after
//! the rig build reads them.

use std::collections::BTreeMap;

use glam::DVec3;

use crate::error::{BuildError, BuildResult};
use skelform_scene::{NodeId, NodeKind, Scene, Transform};
use skelform_spec::{ModuleSpec, Placement, Zone, BASE_MODULE};

/// The ordered pivot set of one module.
#[derive(Debug)]
pub struct PivotSet {
    /// Zone-qualified module identifier.
    pub module: String,
    /// The module's zone.
    pub zone: Zone,
    /// Group node holding every pivot of the set.
    pub root: NodeId,
    labels: Vec<(String, NodeId)>,
}

impl PivotSet {
    /// Returns the pivot for a label.
    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.labels
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, id)| *id)
    }

    /// Returns the pivot for a label, or an error naming the module.
    pub fn require(&self, label: &str) -> BuildResult<NodeId> {
        self.get(label).ok_or_else(|| BuildError::UnknownPivot {
            module: self.module.clone(),
            label: label.to_string(),
        })
    }

    /// Iterates labels and pivots in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.labels.iter().map(|(l, id)| (l.as_str(), *id))
    }

    /// Number of pivots in the set.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when the set has no pivots.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Creates the pivot set for a module.
///
/// Produces one pivot per label of the module's kind under a fresh
/// `{ident}Piv_Grp` group, named `{zone}{label}_Piv`. Numbered pivots
/// are laid out along -Z at `radius` steps so an unplaced module still
/// has a well-formed default shape. Fails on the first name collision.
pub fn create_pivots(scene: &mut Scene, spec: &ModuleSpec) -> BuildResult<PivotSet> {
    let ident = spec.ident();
    let root = scene.add_node(format!("{ident}Piv_Grp"), NodeKind::Group, None)?;
    let mut labels = Vec::new();
    for (index, label) in spec.params.pivot_labels(&spec.name).into_iter().enumerate() {
        let name = format!("{}{}_Piv", spec.zone.prefix(), label);
        let pivot = scene.add_node(name, NodeKind::Pivot, Some(root))?;
        scene.set_local(
            pivot,
            Transform::from_translation(DVec3::new(0.0, 0.0, -(index as f64) * spec.radius)),
        );
        labels.push((label, pivot));
    }
    Ok(PivotSet {
        module: ident,
        zone: spec.zone,
        root,
        labels,
    })
}

/// Creates the implicit base module's pivot set (the Cog pivot).
pub fn create_base_pivots(scene: &mut Scene) -> BuildResult<PivotSet> {
    let root = scene.add_node("BasePiv_Grp", NodeKind::Group, None)?;
    let cog = scene.add_node("Cog_Piv", NodeKind::Pivot, Some(root))?;
    Ok(PivotSet {
        module: BASE_MODULE.to_string(),
        zone: Zone::Center,
        root,
        labels: vec![("Cog".to_string(), cog)],
    })
}

/// Applies authored world-space placements onto a pivot set.
///
/// Labels with no matching pivot are skipped; validation already warned
/// about them. Pivots with no placement keep their defaults, which
/// silently yields a default-shaped module.
pub fn apply_placements(
    scene: &mut Scene,
    pivots: &PivotSet,
    placements: &BTreeMap<String, Placement>,
) {
    for (label, placement) in placements {
        if let Some(pivot) = pivots.get(label) {
            scene.set_world(
                pivot,
                Transform::from_euler_degrees(
                    placement.translate,
                    placement.rotate,
                    placement.scale,
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skelform_spec::ModuleParams;

    fn tail_spec() -> ModuleSpec {
        ModuleSpec::new(
            "Tail",
            Zone::Center,
            ModuleParams::Chain {
                joint_count: 3,
                control_joints: vec![],
                ik: true,
            },
        )
    }

    #[test]
    fn test_create_pivots_names_and_order() {
        let mut scene = Scene::new();
        let pivots = create_pivots(&mut scene, &tail_spec()).unwrap();
        let labels: Vec<&str> = pivots.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Tail01", "Tail02", "Tail03", "TailEnd"]);
        assert_eq!(scene.name(pivots.get("Tail01").unwrap()), "Tail01_Piv");
        assert_eq!(scene.name(pivots.root), "TailPiv_Grp");
    }

    #[test]
    fn test_zone_prefix_in_pivot_names() {
        let mut scene = Scene::new();
        let mut spec = tail_spec();
        spec.name = "Whisker".to_string();
        spec.zone = Zone::Left;
        let pivots = create_pivots(&mut scene, &spec).unwrap();
        assert_eq!(
            scene.name(pivots.get("Whisker01").unwrap()),
            "L_Whisker01_Piv"
        );
        assert_eq!(scene.name(pivots.root), "L_WhiskerPiv_Grp");
    }

    #[test]
    fn test_name_collision_fails() {
        let mut scene = Scene::new();
        create_pivots(&mut scene, &tail_spec()).unwrap();
        let err = create_pivots(&mut scene, &tail_spec()).unwrap_err();
        assert!(matches!(err, BuildError::Scene(_)));
    }

    #[test]
    fn test_apply_placements() {
        let mut scene = Scene::new();
        let pivots = create_pivots(&mut scene, &tail_spec()).unwrap();
        let mut placements = BTreeMap::new();
        placements.insert("Tail02".to_string(), Placement::at(0.0, 110.0, -160.0));
        placements.insert("Bogus".to_string(), Placement::at(9.0, 9.0, 9.0));
        apply_placements(&mut scene, &pivots, &placements);

        let world = scene.world(pivots.get("Tail02").unwrap());
        assert!(world
            .translation
            .abs_diff_eq(DVec3::new(0.0, 110.0, -160.0), 1e-9));
    }

    #[test]
    fn test_unplaced_pivot_keeps_default() {
        let mut scene = Scene::new();
        let pivots = create_pivots(&mut scene, &tail_spec()).unwrap();
        apply_placements(&mut scene, &pivots, &BTreeMap::new());
        let world = scene.world(pivots.get("Tail03").unwrap());
        assert!(world
            .translation
            .abs_diff_eq(DVec3::new(0.0, 0.0, -10.0), 1e-9));
    }

    #[test]
    fn test_require_unknown_label() {
        let mut scene = Scene::new();
        let pivots = create_pivots(&mut scene, &tail_spec()).unwrap();
        let err = pivots.require("Hip").unwrap_err();
        assert!(matches!(err, BuildError::UnknownPivot { .. }));
    }
}
