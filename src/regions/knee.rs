use super::{catalog, ids, movements, DefaultPlans, ExerciseDef, RegionProfile};
use crate::dosage::Dosage;
use crate::models::{Region, Severity};
use crate::sensations::{SensationCatalog, SensationCategory as C};

pub(super) fn profile() -> RegionProfile {
    let sensations = SensationCatalog::new()
        .with("good", "Feels good", C::Positive, Severity::None)
        .with("nothing", "Nothing unusual", C::Positive, Severity::None)
        .with("stiffness", "Stiffness", C::Stiffness, Severity::None)
        .with("clicking", "Painless clicking", C::Mechanical, Severity::None)
        .with("dull_ache", "Dull ache", C::Pain, Severity::None)
        .with("swelling", "Mild swelling", C::Swelling, Severity::Warning)
        .with("sharp_pain", "Sharp pain on movement", C::Pain, Severity::Warning)
        .with("giving_way", "Knee gave way", C::Instability, Severity::Warning)
        .with("locking", "Knee locks or catches", C::Mechanical, Severity::Danger)
        .with("hot_swollen", "Hot, rapidly swollen knee", C::Swelling, Severity::Danger)
        .with("numbness", "Numbness below the knee", C::Neural, Severity::Danger);

    let movements = movements(&[
        ("squatting", "Squatting"),
        ("stairs", "Stairs"),
        ("kneeling", "Kneeling"),
        ("jumping", "Jumping and landing"),
        ("cutting", "Cutting and pivoting"),
        ("running", "Running"),
    ]);

    let exercises = catalog(vec![
        ExerciseDef {
            id: "quad_sets",
            name: "Quad sets",
            movements: &[],
            high_demand: false,
            default: Dosage::hold(3, 10, 5),
            min: Some(Dosage::hold(2, 8, 5)),
            max: Some(Dosage::hold(3, 12, 10)),
        },
        ExerciseDef {
            id: "heel_slides",
            name: "Heel slides",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(2, 15),
            min: Some(Dosage::reps(2, 10)),
            max: None,
        },
        ExerciseDef {
            id: "straight_leg_raise",
            name: "Straight leg raise",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(3, 10),
            min: Some(Dosage::reps(2, 8)),
            max: Some(Dosage::reps(3, 15)),
        },
        ExerciseDef {
            id: "glute_bridge",
            name: "Glute bridge",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(3, 12),
            min: Some(Dosage::reps(2, 10)),
            max: Some(Dosage::reps(4, 12)),
        },
        ExerciseDef {
            id: "wall_sit",
            name: "Wall sit",
            movements: &["squatting"],
            high_demand: false,
            default: Dosage::timed(3, 30),
            min: Some(Dosage::timed(3, 15)),
            max: Some(Dosage::timed(3, 45)),
        },
        ExerciseDef {
            id: "step_ups",
            name: "Step ups",
            movements: &["stairs"],
            high_demand: false,
            default: Dosage::reps(3, 10),
            min: Some(Dosage::reps(2, 8)),
            max: Some(Dosage::reps(3, 15)),
        },
        ExerciseDef {
            id: "split_squat",
            name: "Split squat",
            movements: &["squatting", "kneeling"],
            high_demand: true,
            default: Dosage::reps(3, 8),
            min: Some(Dosage::reps(2, 6)),
            max: Some(Dosage::reps(4, 10)),
        },
        ExerciseDef {
            id: "terminal_knee_extension",
            name: "Terminal knee extension",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(3, 15),
            min: None,
            max: Some(Dosage::reps(3, 20)),
        },
        ExerciseDef {
            id: "single_leg_balance",
            name: "Single leg balance",
            movements: &[],
            high_demand: false,
            default: Dosage::timed(3, 30),
            min: Some(Dosage::timed(2, 20)),
            max: Some(Dosage::timed(3, 60)),
        },
        ExerciseDef {
            id: "lateral_hops",
            name: "Lateral hops",
            movements: &["jumping", "cutting"],
            high_demand: true,
            default: Dosage::reps(3, 10),
            min: Some(Dosage::reps(2, 6)),
            max: None,
        },
        ExerciseDef {
            id: "drop_jumps",
            name: "Drop jumps",
            movements: &["jumping"],
            high_demand: true,
            default: Dosage::reps(3, 6),
            min: Some(Dosage::reps(2, 4)),
            max: Some(Dosage::reps(4, 6)),
        },
        ExerciseDef {
            id: "cutting_drills",
            name: "Cutting drills",
            movements: &["cutting", "running"],
            high_demand: true,
            default: Dosage::timed(4, 20),
            min: None,
            max: Some(Dosage::timed(5, 30)),
        },
    ]);

    RegionProfile {
        region: Region::Knee,
        sensations,
        movements,
        exercises,
        plans: DefaultPlans {
            reset: ids(&["quad_sets", "heel_slides", "straight_leg_raise", "glute_bridge"]),
            training: ids(&[
                "glute_bridge",
                "wall_sit",
                "step_ups",
                "split_squat",
                "terminal_knee_extension",
                "single_leg_balance",
            ]),
            game: ids(&[
                "step_ups",
                "split_squat",
                "single_leg_balance",
                "lateral_hops",
                "drop_jumps",
                "cutting_drills",
            ]),
        },
    }
}
