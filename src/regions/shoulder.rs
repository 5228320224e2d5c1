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
        .with("night_pain", "Pain at night", C::Pain, Severity::Warning)
        .with("catching", "Catching when lifting the arm", C::Mechanical, Severity::Warning)
        .with("weakness", "Arm feels weak", C::Neural, Severity::Warning)
        .with("slipping_out", "Shoulder feels like it slips out", C::Instability, Severity::Danger)
        .with("arm_numbness", "Numbness down the arm", C::Neural, Severity::Danger);

    let movements = movements(&[
        ("overhead", "Reaching overhead"),
        ("throwing", "Throwing"),
        ("pushing", "Pushing"),
        ("pulling", "Pulling"),
        ("behind_back", "Reaching behind the back"),
    ]);

    let exercises = catalog(vec![
        ExerciseDef {
            id: "pendulums",
            name: "Pendulums",
            movements: &[],
            high_demand: false,
            default: Dosage::timed(2, 30),
            min: None,
            max: None,
        },
        ExerciseDef {
            id: "scapular_squeezes",
            name: "Scapular squeezes",
            movements: &[],
            high_demand: false,
            default: Dosage::hold(3, 10, 5),
            min: Some(Dosage::hold(2, 8, 3)),
            max: Some(Dosage::hold(3, 12, 8)),
        },
        ExerciseDef {
            id: "isometric_external_rotation",
            name: "Isometric external rotation",
            movements: &[],
            high_demand: false,
            default: Dosage::hold(3, 5, 10),
            min: Some(Dosage::hold(2, 5, 5)),
            max: Some(Dosage::hold(3, 8, 15)),
        },
        ExerciseDef {
            id: "band_external_rotation",
            name: "Band external rotation",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(3, 12),
            min: Some(Dosage::reps(2, 10)),
            max: Some(Dosage::reps(3, 20)),
        },
        ExerciseDef {
            id: "band_rows",
            name: "Band rows",
            movements: &["pulling"],
            high_demand: false,
            default: Dosage::reps(3, 12),
            min: Some(Dosage::reps(2, 10)),
            max: Some(Dosage::reps(4, 12)),
        },
        ExerciseDef {
            id: "wall_slides",
            name: "Wall slides",
            movements: &["overhead"],
            high_demand: false,
            default: Dosage::reps(3, 10),
            min: Some(Dosage::reps(2, 8)),
            max: None,
        },
        ExerciseDef {
            id: "push_up_plus",
            name: "Push-up plus",
            movements: &["pushing"],
            high_demand: true,
            default: Dosage::reps(3, 8),
            min: Some(Dosage::reps(2, 6)),
            max: Some(Dosage::reps(3, 12)),
        },
        ExerciseDef {
            id: "overhead_press",
            name: "Overhead press",
            movements: &["overhead", "pushing"],
            high_demand: true,
            default: Dosage::reps(3, 8),
            min: Some(Dosage::reps(2, 6)),
            max: Some(Dosage::reps(4, 8)),
        },
        ExerciseDef {
            id: "plyo_ball_throws",
            name: "Plyometric ball throws",
            movements: &["throwing", "overhead"],
            high_demand: true,
            default: Dosage::reps(3, 10),
            min: None,
            max: Some(Dosage::reps(4, 12)),
        },
    ]);

    RegionProfile {
        region: Region::Shoulder,
        sensations,
        movements,
        exercises,
        plans: DefaultPlans {
            reset: ids(&["pendulums", "scapular_squeezes", "isometric_external_rotation"]),
            training: ids(&[
                "scapular_squeezes",
                "band_external_rotation",
                "band_rows",
                "wall_slides",
                "push_up_plus",
            ]),
            game: ids(&[
                "band_external_rotation",
                "band_rows",
                "push_up_plus",
                "overhead_press",
                "plyo_ball_throws",
            ]),
        },
    }
}
