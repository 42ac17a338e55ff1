//! End-to-end assembly tests.
//!
//! Builds whole characters and checks the structural guarantees of the
//! assembly protocol: module shapes, pose-preserving links, and the
//! hierarchy actually propagating motion across module boundaries.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p skelform-tests --test e2e_assembly
//! ```

use glam::DVec3;
use skelform_rig::orchestrator::{assemble, ModuleState};
use skelform_scene::Transform;
use skelform_spec::{AttachmentSpec, CharacterSpec, ModuleParams, ModuleSpec, Placement, Zone};
use skelform_tests::fixtures;

/// A chain with 8 joints and controls at 1/4/8 yields exactly 8 bind
/// joints, 3 controls, one input socket, and at least one output socket.
#[test]
fn test_chain_module_shape() {
    let spec = CharacterSpec::builder("chain-scenario-01")
        .module(
            ModuleSpec::new(
                "Tail",
                Zone::Center,
                ModuleParams::Chain {
                    joint_count: 8,
                    control_joints: vec![1, 4, 8],
                    ik: true,
                },
            )
            .attach(AttachmentSpec::new("root", "Base", "cog"))
            .place("Tail01", Placement::at(0.0, 119.520, -118.372))
            .place("Tail08", Placement::at(0.0, 108.396, -508.615)),
        )
        .build();

    let rig = assemble(&spec).unwrap();
    let tail = rig.module("Tail").unwrap();

    assert_eq!(tail.rig.bind_joints.len(), 8);
    assert_eq!(tail.rig.controls.len(), 3);
    assert_eq!(tail.rig.space_ins.len(), 1);
    assert!(!tail.rig.space_outs.is_empty());
}

/// Linking a chain's input with maintain-offset leaves its first bind
/// joint exactly at the authored pivot position.
#[test]
fn test_maintain_offset_keeps_authored_position() {
    let authored = DVec3::new(0.0, 119.520, -118.372);
    let spec = CharacterSpec::builder("chain-scenario-02")
        .cog_placement(Placement::at(0.0, 120.0, -5.0))
        .module(
            ModuleSpec::new(
                "Tail",
                Zone::Center,
                ModuleParams::Chain {
                    joint_count: 8,
                    control_joints: vec![1, 4, 8],
                    ik: true,
                },
            )
            .attach(AttachmentSpec::new("root", "Base", "cog"))
            .place("Tail01", Placement::at(authored.x, authored.y, authored.z)),
        )
        .build();

    let rig = assemble(&spec).unwrap();
    let tail = rig.module("Tail").unwrap();
    let first_joint_world = rig.scene.world(tail.rig.bind_joints[0]);

    assert!(
        first_joint_world.translation.abs_diff_eq(authored, 1e-4),
        "first bind joint moved to {:?}",
        first_joint_world.translation
    );
}

/// Motion propagates through the link hierarchy: moving the master
/// control carries every downstream module with it.
#[test]
fn test_motion_propagates_across_modules() {
    let spec = fixtures::dragon_spec();
    let mut rig = assemble(&spec).unwrap();

    let tail_joint = rig.module("Tail").unwrap().rig.bind_joints[0];
    let toe_joint = rig.module("L_Toe").unwrap().rig.bind_joints[0];
    let tail_before = rig.scene.world(tail_joint).translation;
    let toe_before = rig.scene.world(toe_joint).translation;

    let offset = DVec3::new(0.0, 0.0, 25.0);
    let all_ctrl = rig.base.all_ctrl;
    rig.scene.set_local(all_ctrl, Transform::from_translation(offset));

    assert!(rig
        .scene
        .world(tail_joint)
        .translation
        .abs_diff_eq(tail_before + offset, 1e-6));
    assert!(rig
        .scene
        .world(toe_joint)
        .translation
        .abs_diff_eq(toe_before + offset, 1e-6));
}

/// The whole dragon assembles: every module reaches Finished, and the
/// chain modules carry their dynamics controls.
#[test]
fn test_dragon_assembles_completely() {
    let spec = fixtures::dragon_spec();
    let rig = assemble(&spec).unwrap();

    assert_eq!(rig.modules.len(), 20);
    for module in &rig.modules {
        assert_eq!(module.state, ModuleState::Finished, "{}", module.ident);
    }

    assert!(rig.module("Tail").unwrap().dynamics.is_some());
    assert!(rig.module("L_Whisker").unwrap().dynamics.is_some());
    assert!(rig.module("R_Whisker").unwrap().dynamics.is_some());
    assert!(rig.module("Torso").unwrap().dynamics.is_none());

    assert!(rig.report.ok);
    assert_eq!(rig.report.total_bind_joints(), rig_bind_joint_count(&rig));
}

fn rig_bind_joint_count(rig: &skelform_rig::orchestrator::CharacterRig) -> usize {
    rig.modules.iter().map(|m| m.rig.bind_joints.len()).sum()
}

/// The twist module's joints ride the leg's exported joints exactly.
#[test]
fn test_twist_joints_ride_exported_leg_joints() {
    let spec = fixtures::dragon_spec();
    let rig = assemble(&spec).unwrap();

    let leg = rig.module("L_TrexLeg").unwrap();
    let hip = leg.rig.bind_joints[0];
    let twist = rig.module("L_LegTwist").unwrap();
    let hip_twist = twist.rig.bind_joints[0];

    assert_eq!(rig.scene.name(hip), "L_Hip_Jnt");
    assert_eq!(rig.scene.name(hip_twist), "L_HipTwist01_Jnt");
    assert!(rig
        .scene
        .world(hip_twist)
        .translation
        .abs_diff_eq(rig.scene.world(hip).translation, 1e-6));
}

/// The half-muscle spans two producer spaces: its two ends follow
/// different joints of the torso.
#[test]
fn test_half_muscle_spans_two_spaces() {
    let spec = fixtures::dragon_spec();
    let rig = assemble(&spec).unwrap();

    let throat = rig.module("Throat").unwrap();
    assert_eq!(throat.rig.space_ins.len(), 2);
    assert_eq!(throat.rig.bind_joints.len(), 2);

    // Root rides the exported neck joint, tip rides the jaw
    let root_world = rig.scene.world(throat.rig.bind_joints[0]).translation;
    let tip_world = rig.scene.world(throat.rig.bind_joints[1]).translation;
    assert!(root_world.abs_diff_eq(DVec3::new(0.0, 185.778, 200.166), 1e-4));
    assert!(tip_world.abs_diff_eq(DVec3::new(0.0, 182.333, 218.331), 1e-4));
}

/// Modules stay where they were authored after the full wiring pass:
/// maintain-offset holds for every placed module in the fixture.
#[test]
fn test_authored_positions_survive_wiring() {
    let spec = fixtures::dragon_spec();
    let rig = assemble(&spec).unwrap();

    let cases = [
        ("Torso", 0, DVec3::new(0.0, 133.394, -87.370)),
        ("Tail", 0, DVec3::new(0.0, 119.520, -118.372)),
        ("L_TrexLeg", 0, DVec3::new(18.354, 126.981, -90.254)),
        ("R_TrexLeg", 0, DVec3::new(-18.354, 126.981, -90.254)),
        ("L_Eye", 0, DVec3::new(6.485, 207.313, 226.218)),
    ];
    for (ident, joint_index, expected) in cases {
        let module = rig.module(ident).unwrap();
        let world = rig.scene.world(module.rig.bind_joints[joint_index]);
        assert!(
            world.translation.abs_diff_eq(expected, 1e-4),
            "{ident} joint {joint_index} at {:?}, expected {expected:?}",
            world.translation
        );
    }
}
