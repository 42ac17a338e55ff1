//! Shared fixtures for skelform end-to-end tests.

pub mod fixtures {
    use skelform_spec::{
        AttachmentSpec, AxisOrient, CharacterSpec, DigitSpec, DynamicsSpec, ModuleParams,
        ModuleSpec, Placement, Zone,
    };

    /// A full quadruped character: torso, IK tail with dynamics, hind and
    /// front leg pairs with digits and twists, head add-ons, and a throat
    /// half-muscle spanning two producer spaces.
    pub fn dragon_spec() -> CharacterSpec {
        let mut builder = CharacterSpec::builder("emberwyrm-01")
            .description("Quadruped dragon with customizable add-on modules")
            .tag("quadruped")
            .tag("dragon")
            .master_ctrl_radius(150.0)
            .cog_placement(Placement::at(0.0, 120.007, -5.049))
            .module(torso())
            .module(tail());

        for zone in [Zone::Left, Zone::Right] {
            builder = builder
                .module(hind_leg(zone))
                .module(toes(zone))
                .module(leg_twist(zone))
                .module(front_leg(zone))
                .module(fingers(zone))
                .module(ear(zone))
                .module(eye(zone))
                .module(whisker(zone));
        }

        builder.module(horn()).module(throat()).build()
    }

    /// The torso: 3 spine joints, 6 neck joints, one neck tweak control.
    pub fn torso() -> ModuleSpec {
        ModuleSpec::new(
            "Torso",
            Zone::Center,
            ModuleParams::Torso {
                spine_count: 3,
                neck_count: 6,
                spine_secondary: vec![],
                neck_secondary: vec![4],
                axis_orient: AxisOrient::YUp,
            },
        )
        .with_ctrl_radius(40.0)
        .attach(AttachmentSpec::new("cog", "Base", "cog"))
        .export("Neck03")
        .place("Pelvis", Placement::at(0.0, 133.394, -87.370))
        .place("Spine01", Placement::at(0.0, 133.254, -49.300))
        .place("Spine02", Placement::at(0.0, 130.100, -22.885))
        .place("Spine03", Placement::at(0.0, 124.602, 8.664))
        .place("Chest", Placement::at(0.0, 128.528, 46.643))
        .place("Neck01", Placement::at(0.0, 143.346, 73.573))
        .place("Neck02", Placement::at(0.0, 162.106, 99.910))
        .place("Neck03", Placement::at(0.0, 178.742, 117.004))
        .place("Neck04", Placement::at(0.0, 195.181, 141.160))
        .place("Neck05", Placement::at(0.0, 207.868, 165.950))
        .place("Neck06", Placement::at(0.0, 209.590, 196.498))
        .place("Head", Placement::at(0.0, 208.037, 223.371))
        .place("HeadEnd", Placement::at(0.0, 200.186, 245.741))
        .place("Jaw", Placement::at(0.0, 201.670, 213.441))
        .place("JawEnd", Placement::at(0.0, 175.778, 231.798))
    }

    /// The IK/FK tail: 8 joints, controls at 1/4/8, simulated.
    pub fn tail() -> ModuleSpec {
        ModuleSpec::new(
            "Tail",
            Zone::Center,
            ModuleParams::Chain {
                joint_count: 8,
                control_joints: vec![1, 4, 8],
                ik: true,
            },
        )
        .with_ctrl_radius(22.0)
        .attach(AttachmentSpec::new("root", "Torso", "pelvis"))
        .with_dynamics(DynamicsSpec::default())
        .place("Tail01", Placement::at(0.0, 119.520, -118.372))
        .place("Tail02", Placement::at(0.0, 112.641, -165.334))
        .place("Tail03", Placement::at(0.0, 111.204, -222.212))
        .place("Tail04", Placement::at(0.0, 109.977, -277.940))
        .place("Tail05", Placement::at(0.0, 109.018, -336.834))
        .place("Tail06", Placement::at(0.0, 108.235, -393.282))
        .place("Tail07", Placement::at(0.0, 108.221, -448.227))
        .place("Tail08", Placement::at(0.0, 108.396, -508.615))
        .place("TailEnd", Placement::at(0.0, 107.376, -598.220))
    }

    /// One hind leg, exporting its long-bone joints for the twist module.
    pub fn hind_leg(zone: Zone) -> ModuleSpec {
        let x = mirror(zone, 18.354);
        ModuleSpec::new("TrexLeg", zone, ModuleParams::HindLeg)
            .attach(AttachmentSpec::new("pelvis", "Torso", "pelvis"))
            .attach(AttachmentSpec::new("cog", "Base", "cog"))
            .attach(AttachmentSpec::new("all", "Base", "all"))
            .export("Hip")
            .export("Knee")
            .export("Hock")
            .place("Hip", Placement::at(x, 126.981, -90.254))
            .place("Knee", Placement::at(mirror(zone, 32.850), 76.537, -68.712))
            .place("Hock", Placement::at(mirror(zone, 28.506), 47.643, -106.153))
            .place("Heel", Placement::at(mirror(zone, 31.591), 0.0, -95.513))
            .place("Ankle", Placement::at(mirror(zone, 30.432), 17.676, -96.238))
            .place("Ball", Placement::at(mirror(zone, 32.491), 3.534, -84.033))
            .place("Toe", Placement::at(mirror(zone, 33.491), 0.0, -54.991))
            .place("KneePole", Placement::at(mirror(zone, 75.0), 74.010, -68.712))
    }

    /// Four toes of four joints riding the hind foot.
    pub fn toes(zone: Zone) -> ModuleSpec {
        ModuleSpec::new(
            "Toe",
            zone,
            ModuleParams::Digits {
                digits: vec![
                    DigitSpec::new("A", 4),
                    DigitSpec::new("B", 4),
                    DigitSpec::new("C", 4),
                    DigitSpec::new("D", 4),
                ],
                ik: true,
            },
        )
        .with_radius(2.0)
        .attach(AttachmentSpec::new(
            "foot",
            &format!("{}TrexLeg", zone.prefix()),
            "ankle",
        ))
    }

    /// Twist joints riding the hind leg's exported long bones. The
    /// attachments snap (no offset) so each twist group sits exactly on
    /// the joint it rides.
    pub fn leg_twist(zone: Zone) -> ModuleSpec {
        let leg = format!("{}TrexLeg", zone.prefix());
        ModuleSpec::new(
            "LegTwist",
            zone,
            ModuleParams::Twist {
                joints: vec!["Hip".to_string(), "Knee".to_string(), "Hock".to_string()],
                twist_count: 3,
            },
        )
        .with_radius(2.0)
        .attach(AttachmentSpec::new("hip", &leg, "hip").maintain_offset(false))
        .attach(AttachmentSpec::new("knee", &leg, "knee").maintain_offset(false))
        .attach(AttachmentSpec::new("hock", &leg, "hock").maintain_offset(false))
    }

    /// One scapula-driven front leg.
    pub fn front_leg(zone: Zone) -> ModuleSpec {
        ModuleSpec::new("DogFrontLeg", zone, ModuleParams::FrontLeg)
            .attach(AttachmentSpec::new("chest", "Torso", "chest"))
            .attach(AttachmentSpec::new("cog", "Base", "cog"))
            .attach(AttachmentSpec::new("all", "Base", "all"))
            .place("Scap01", Placement::at(mirror(zone, -23.057), 130.890, 36.085))
            .place("Scap02", Placement::at(mirror(zone, 16.841), 157.479, 35.622))
            .place("Shld", Placement::at(mirror(zone, 31.642), 119.733, 60.161))
            .place("Elbow", Placement::at(mirror(zone, 31.468), 85.088, 32.171))
            .place("Fknee", Placement::at(mirror(zone, 32.268), 26.882, 61.860))
            .place("Fheel", Placement::at(mirror(zone, 31.552), 0.0, 66.354))
            .place("Fankle", Placement::at(mirror(zone, 31.652), 16.388, 70.293))
            .place("Fball", Placement::at(mirror(zone, 31.752), 4.009, 73.044))
            .place("Ftoe", Placement::at(mirror(zone, 32.152), 0.0, 107.177))
            .place("ElbowPole", Placement::at(mirror(zone, -17.052), 84.986, 32.171))
    }

    /// Five fingers riding the front foot.
    pub fn fingers(zone: Zone) -> ModuleSpec {
        ModuleSpec::new(
            "Ftoe",
            zone,
            ModuleParams::Digits {
                digits: vec![
                    DigitSpec::new("A", 3),
                    DigitSpec::new("B", 4),
                    DigitSpec::new("C", 4),
                    DigitSpec::new("D", 4),
                    DigitSpec::new("E", 4),
                ],
                ik: true,
            },
        )
        .with_radius(2.0)
        .attach(AttachmentSpec::new(
            "foot",
            &format!("{}DogFrontLeg", zone.prefix()),
            "ankle",
        ))
    }

    /// A three-joint FK ear.
    pub fn ear(zone: Zone) -> ModuleSpec {
        ModuleSpec::new(
            "Ear",
            zone,
            ModuleParams::Appendage {
                joint_count: 3,
                axis_orient: AxisOrient::ZUp,
            },
        )
        .with_radius(2.0)
        .with_ctrl_radius(6.0)
        .attach(AttachmentSpec::new("root", "Torso", "head"))
    }

    /// A single center horn.
    pub fn horn() -> ModuleSpec {
        ModuleSpec::new(
            "Horn",
            Zone::Center,
            ModuleParams::Appendage {
                joint_count: 1,
                axis_orient: AxisOrient::ZUp,
            },
        )
        .with_radius(2.0)
        .with_ctrl_radius(6.0)
        .attach(AttachmentSpec::new("root", "Torso", "head"))
    }

    /// One aim-driven eye.
    pub fn eye(zone: Zone) -> ModuleSpec {
        ModuleSpec::new("Eye", zone, ModuleParams::Eye)
            .with_radius(1.0)
            .with_ctrl_radius(20.0)
            .attach(AttachmentSpec::new("head", "Torso", "head"))
            .place(
                "Eye",
                Placement::at(mirror(zone, 6.485), 207.313, 226.218),
            )
    }

    /// A simulated whisker chain on the head.
    pub fn whisker(zone: Zone) -> ModuleSpec {
        let mut module = ModuleSpec::new(
            "Whisker",
            zone,
            ModuleParams::Chain {
                joint_count: 8,
                control_joints: vec![1, 4, 8],
                ik: true,
            },
        )
        .with_radius(1.0)
        .with_ctrl_radius(1.0)
        .attach(AttachmentSpec::new("root", "Torso", "head"))
        .with_dynamics(DynamicsSpec::default());
        for i in 1..=8u8 {
            module = module.place(
                format!("Whisker{i:02}"),
                Placement::at(mirror(zone, 3.794 + 6.0 * f64::from(i - 1)), 204.570, 239.573),
            );
        }
        module.place(
            "WhiskerEnd",
            Placement::at(mirror(zone, 53.834), 204.570, 239.594),
        )
    }

    /// The throat half-muscle: root on an exported neck joint, tip on
    /// the jaw.
    pub fn throat() -> ModuleSpec {
        ModuleSpec::new("Throat", Zone::Center, ModuleParams::HalfMuscle)
            .with_radius(2.0)
            .attach(AttachmentSpec::new("root", "Torso", "neck03"))
            .attach(AttachmentSpec::new("tip", "Torso", "jaw"))
            .place("ThroatRoot", Placement::at(0.0, 185.778, 200.166))
            .place("ThroatRootUp", Placement::at(0.0, 174.975, 210.078))
            .place("ThroatTip", Placement::at(0.0, 182.333, 218.331))
    }

    fn mirror(zone: Zone, x: f64) -> f64 {
        match zone {
            Zone::Right => -x,
            _ => x,
        }
    }
}
