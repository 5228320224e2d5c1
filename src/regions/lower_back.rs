use super::{catalog, ids, movements, DefaultPlans, ExerciseDef, RegionProfile};
use crate::dosage::Dosage;
use crate::models::{Region, Severity};
use crate::sensations::{SensationCatalog, SensationCategory as C};

pub(super) fn profile() -> RegionProfile {
    let sensations = SensationCatalog::new()
        .with("good", "Feels good", C::Positive, Severity::None)
        .with("nothing", "Nothing unusual", C::Positive, Severity::None)
        .with("stiffness", "Stiff when getting up", C::Stiffness, Severity::None)
        .with("dull_ache", "Dull ache", C::Pain, Severity::None)
        .with("muscle_spasm", "Muscle spasm", C::Pain, Severity::Warning)
        .with("leg_pain", "Pain travelling into the leg", C::Neural, Severity::Warning)
        .with("pins_needles", "Pins and needles", C::Neural, Severity::Warning)
        .with("saddle_numbness", "Numbness in the saddle area", C::Neural, Severity::Danger)
        .with("bladder_change", "Bladder or bowel changes", C::Neural, Severity::Danger)
        .with("leg_weakness", "New leg weakness", C::Neural, Severity::Danger);

    let movements = movements(&[
        ("bending", "Bending forward"),
        ("lifting", "Lifting"),
        ("twisting", "Twisting"),
        ("extension", "Leaning back"),
        ("running", "Running"),
    ]);

    let exercises = catalog(vec![
        ExerciseDef {
            id: "pelvic_tilts",
            name: "Pelvic tilts",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(2, 15),
            min: Some(Dosage::reps(2, 10)),
            max: None,
        },
        ExerciseDef {
            id: "cat_camel",
            name: "Cat-camel",
            movements: &["bending", "extension"],
            high_demand: false,
            default: Dosage::reps(2, 10),
            min: Some(Dosage::reps(1, 8)),
            max: None,
        },
        ExerciseDef {
            id: "dead_bug",
            name: "Dead bug",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(3, 8),
            min: Some(Dosage::reps(2, 6)),
            max: Some(Dosage::reps(3, 12)),
        },
        ExerciseDef {
            id: "bird_dog",
            name: "Bird dog",
            movements: &[],
            high_demand: false,
            default: Dosage::hold(3, 8, 5),
            min: Some(Dosage::hold(2, 6, 3)),
            max: Some(Dosage::hold(3, 10, 10)),
        },
        ExerciseDef {
            id: "side_plank",
            name: "Side plank",
            movements: &[],
            high_demand: false,
            default: Dosage::timed(3, 20),
            min: Some(Dosage::timed(2, 10)),
            max: Some(Dosage::timed(3, 45)),
        },
        ExerciseDef {
            id: "hip_hinge",
            name: "Hip hinge with dowel",
            movements: &["bending"],
            high_demand: false,
            default: Dosage::reps(3, 10),
            min: Some(Dosage::reps(2, 8)),
            max: Some(Dosage::reps(3, 15)),
        },
        ExerciseDef {
            id: "kettlebell_deadlift",
            name: "Kettlebell deadlift",
            movements: &["bending", "lifting"],
            high_demand: true,
            default: Dosage::reps(3, 8),
            min: Some(Dosage::reps(2, 6)),
            max: Some(Dosage::reps(4, 8)),
        },
        ExerciseDef {
            id: "rotational_chops",
            name: "Rotational cable chops",
            movements: &["twisting"],
            high_demand: true,
            default: Dosage::reps(3, 10),
            min: None,
            max: Some(Dosage::reps(3, 15)),
        },
        ExerciseDef {
            id: "med_ball_throws",
            name: "Medicine ball throws",
            movements: &["twisting", "lifting"],
            high_demand: true,
            default: Dosage::reps(3, 8),
            min: Some(Dosage::reps(2, 6)),
            max: None,
        },
    ]);

    RegionProfile {
        region: Region::LowerBack,
        sensations,
        movements,
        exercises,
        plans: DefaultPlans {
            reset: ids(&["pelvic_tilts", "cat_camel", "dead_bug", "bird_dog"]),
            training: ids(&["dead_bug", "bird_dog", "side_plank", "hip_hinge", "kettlebell_deadlift"]),
            game: ids(&[
                "side_plank",
                "hip_hinge",
                "kettlebell_deadlift",
                "rotational_chops",
                "med_ball_throws",
            ]),
        },
    }
}
