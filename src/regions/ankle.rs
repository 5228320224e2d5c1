use super::{catalog, ids, movements, DefaultPlans, ExerciseDef, RegionProfile};
use crate::dosage::Dosage;
use crate::models::{Region, Severity};
use crate::sensations::{SensationCatalog, SensationCategory as C};

pub(super) fn profile() -> RegionProfile {
    let sensations = SensationCatalog::new()
        .with("good", "Feels good", C::Positive, Severity::None)
        .with("nothing", "Nothing unusual", C::Positive, Severity::None)
        .with("stiffness", "Morning stiffness", C::Stiffness, Severity::None)
        .with("dull_ache", "Dull ache", C::Pain, Severity::None)
        .with("swelling", "Swelling around the ankle", C::Swelling, Severity::Warning)
        .with("giving_way", "Ankle rolled or gave way", C::Instability, Severity::Warning)
        .with("sharp_pain", "Sharp pain when pushing off", C::Pain, Severity::Warning)
        .with("cannot_bear_weight", "Cannot bear weight", C::Pain, Severity::Danger)
        .with("numbness", "Numbness in the foot", C::Neural, Severity::Danger);

    let movements = movements(&[
        ("hopping", "Hopping"),
        ("jumping", "Jumping and landing"),
        ("cutting", "Cutting and pivoting"),
        ("running", "Running"),
        ("toe_raise", "Rising onto toes"),
    ]);

    let exercises = catalog(vec![
        ExerciseDef {
            id: "ankle_alphabet",
            name: "Ankle alphabet",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(2, 1),
            min: None,
            max: Some(Dosage::reps(3, 1)),
        },
        ExerciseDef {
            id: "towel_scrunches",
            name: "Towel scrunches",
            movements: &[],
            high_demand: false,
            default: Dosage::timed(3, 30),
            min: Some(Dosage::timed(2, 20)),
            max: None,
        },
        ExerciseDef {
            id: "band_eversion",
            name: "Band eversion",
            movements: &[],
            high_demand: false,
            default: Dosage::reps(3, 12),
            min: Some(Dosage::reps(2, 10)),
            max: Some(Dosage::reps(3, 20)),
        },
        ExerciseDef {
            id: "calf_raises",
            name: "Calf raises",
            movements: &["toe_raise"],
            high_demand: false,
            default: Dosage::reps(3, 15),
            min: Some(Dosage::reps(2, 10)),
            max: Some(Dosage::reps(4, 20)),
        },
        ExerciseDef {
            id: "single_leg_stance",
            name: "Single leg stance",
            movements: &[],
            high_demand: false,
            default: Dosage::timed(3, 30),
            min: Some(Dosage::timed(2, 20)),
            max: Some(Dosage::timed(3, 60)),
        },
        ExerciseDef {
            id: "single_leg_calf_raise",
            name: "Single leg calf raise",
            movements: &["toe_raise"],
            high_demand: true,
            default: Dosage::reps(3, 10),
            min: Some(Dosage::reps(2, 6)),
            max: Some(Dosage::reps(4, 12)),
        },
        ExerciseDef {
            id: "pogo_hops",
            name: "Pogo hops",
            movements: &["hopping", "jumping"],
            high_demand: true,
            default: Dosage::timed(3, 20),
            min: Some(Dosage::timed(2, 10)),
            max: None,
        },
        ExerciseDef {
            id: "figure_eight_runs",
            name: "Figure-eight runs",
            movements: &["running", "cutting"],
            high_demand: true,
            default: Dosage::timed(4, 30),
            min: None,
            max: Some(Dosage::timed(5, 40)),
        },
    ]);

    RegionProfile {
        region: Region::Ankle,
        sensations,
        movements,
        exercises,
        plans: DefaultPlans {
            reset: ids(&["ankle_alphabet", "towel_scrunches", "band_eversion", "single_leg_stance"]),
            training: ids(&[
                "band_eversion",
                "calf_raises",
                "single_leg_stance",
                "single_leg_calf_raise",
                "pogo_hops",
            ]),
            game: ids(&[
                "calf_raises",
                "single_leg_calf_raise",
                "pogo_hops",
                "figure_eight_runs",
            ]),
        },
    }
}
