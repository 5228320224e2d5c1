//! End-to-end coaching scenarios
//!
//! Drives the public API the way the CLI does: check-ins and sessions go
//! through a history store, the coach reads them back to decide the next day.

use chrono::{Duration, NaiveDate};
use rehabrs::coach::Coach;
use rehabrs::dosage::{DosageLabel, DosageTier};
use rehabrs::history::{History, HistoryStore, JsonHistoryStore, MemoryHistoryStore};
use rehabrs::milestones::derive_milestones;
use rehabrs::mode::DecisionRule;
use rehabrs::models::{
    ActivityGoal, CalibrationProfile, CheckIn, Difficulty, ExerciseEntry, ExerciseSession, Mode,
    ReadinessReport, Region,
};
use rehabrs::regions::{RegionProfile, RegionRegistry};
use rehabrs::session::{ExerciseFeedback, RegressionAction};
use rehabrs::thresholds::Thresholds;
use rehabrs::trends::{TrendAnalyzer, TrendDirection};
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 20).unwrap()
}

fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

fn knee_report(confidence: u8, discomfort: u8, goal: ActivityGoal) -> ReadinessReport {
    ReadinessReport::new(Region::Knee, confidence, discomfort, goal)
}

fn check_in(date: NaiveDate, pain: u8, confidence: u8) -> CheckIn {
    CheckIn {
        date,
        pain_level: pain,
        function_level: None,
        confidence_level: confidence,
        sensations: vec![],
        mode_assigned: Mode::Training,
        notes: None,
    }
}

fn single_exercise_session(date: NaiveDate, exercise_id: &str, difficulty: Difficulty, pain: u8) -> ExerciseSession {
    ExerciseSession {
        date,
        exercises: vec![ExerciseEntry {
            exercise_id: exercise_id.to_string(),
            sets: 3,
            reps: Some(10),
            duration_secs: None,
            difficulty,
            pain_during: pain,
        }],
        total_duration_secs: 1200,
        overall_difficulty: difficulty,
    }
}

#[test]
fn test_feeling_solid_without_history() {
    let coach = Coach::default();
    let catalog = &coach.profile(Region::Knee).unwrap().sensations;

    let mut report = knee_report(7, 1, ActivityGoal::Training);
    report.select_sensation("good", catalog);

    let state = coach.build_state(&report, None, None, today()).unwrap();
    assert_eq!(state.mode, Mode::Training);
    assert!(state.reasoning.contains("Feeling solid."));
    assert_eq!(state.pain_stop, 6);
    assert_eq!(state.pain_regress, 4);
}

#[test]
fn test_game_day() {
    let coach = Coach::default();
    let state = coach
        .build_state(&knee_report(8, 0, ActivityGoal::Game), None, None, today())
        .unwrap();
    assert_eq!(state.mode, Mode::Game);
}

#[test]
fn test_progressive_worsening_overrides_confidence() {
    let coach = Coach::default();
    let mut store = MemoryHistoryStore::new();
    for (days, pain) in [(3, 2), (2, 4), (1, 6)] {
        store.append_check_in(check_in(days_ago(days), pain, 9)).unwrap();
    }
    let history = store.read_all().unwrap();

    let insights = TrendAnalyzer::new().analyze(&history, today());
    assert!(insights.check_ins.progressive_worsening);

    let report = knee_report(9, 0, ActivityGoal::Game);
    let decision = coach.decide(&report, Some(&history), today()).unwrap();
    assert_eq!(decision.mode, Mode::Reset);
    assert_eq!(decision.rule, DecisionRule::ProgressiveWorsening);
}

#[test]
fn test_in_session_downgrade_to_reset() {
    let coach = Coach::default();
    let state = coach
        .build_state(&knee_report(7, 1, ActivityGoal::Training), None, None, today())
        .unwrap();
    assert_eq!(state.mode, Mode::Training);
    assert_eq!(state.plan.len(), 6);

    let update = coach
        .apply_feedback(&state, &ExerciseFeedback::new(9, false))
        .unwrap();
    let reset_plan = &coach.profile(Region::Knee).unwrap().plans.reset;
    assert_eq!(update.action, RegressionAction::SwitchedToReset);
    assert_eq!(update.state.mode, Mode::Reset);
    assert_eq!(&update.state.plan, reset_plan);
    assert_eq!(update.state.pain_stop, 4);
}

#[test]
fn test_dosage_progresses_after_three_easy_sessions() {
    let coach = Coach::default();
    let history = History {
        sessions: (1..=3)
            .map(|d| single_exercise_session(days_ago(d), "glute_bridge", Difficulty::TooEasy, 0))
            .collect(),
        ..History::default()
    };

    let selected = coach.dosage_for(Region::Knee, "glute_bridge", &history).unwrap();
    assert_eq!(selected.tier, DosageTier::Max);
    assert_eq!(selected.label, DosageLabel::Advanced);
}

#[test]
fn test_single_painful_entry_overrides_easy_streak() {
    let coach = Coach::default();
    let mut sessions: Vec<ExerciseSession> = (2..=4)
        .map(|d| single_exercise_session(days_ago(d), "glute_bridge", Difficulty::TooEasy, 0))
        .collect();
    sessions.push(single_exercise_session(days_ago(1), "glute_bridge", Difficulty::JustRight, 5));
    let history = History {
        sessions,
        ..History::default()
    };

    let selected = coach.dosage_for(Region::Knee, "glute_bridge", &history).unwrap();
    assert_eq!(selected.tier, DosageTier::Min);
    assert_eq!(selected.label, DosageLabel::Eased);
}

#[test]
fn test_streak_stops_at_gap() {
    let check_ins = vec![
        check_in(days_ago(4), 3, 6),
        check_in(days_ago(2), 3, 6),
        check_in(days_ago(1), 3, 6),
        check_in(today(), 3, 6),
    ];
    let trends = TrendAnalyzer::new().check_in_trends(&check_ins, today());
    assert_eq!(trends.streak, 3);
}

#[test]
fn test_single_check_in_is_stable() {
    let trends = TrendAnalyzer::new().check_in_trends(&[check_in(today(), 8, 2)], today());
    assert_eq!(trends.pain_direction, TrendDirection::Stable);
    assert_eq!(trends.confidence_direction, TrendDirection::Stable);
    assert!(!trends.progressive_worsening);
}

#[test]
fn test_restricted_plan_never_collapses() {
    let coach = Coach::default();
    let profile = coach.profile(Region::Knee).unwrap();

    let mut report = knee_report(8, 0, ActivityGoal::Game);
    for movement in profile.movements.keys() {
        report.add_restriction(movement.clone());
    }

    let state = coach.build_state(&report, None, None, today()).unwrap();
    assert_eq!(state.mode, Mode::Game);
    assert!(state.plan.len() >= 2);
}

#[test]
fn test_repeated_painful_sessions_force_reset() {
    let coach = Coach::default();
    let history = History {
        sessions: vec![
            single_exercise_session(days_ago(3), "wall_sit", Difficulty::JustRight, 2),
            single_exercise_session(days_ago(2), "wall_sit", Difficulty::TooHard, 7),
            single_exercise_session(days_ago(1), "wall_sit", Difficulty::TooHard, 6),
        ],
        ..History::default()
    };

    let decision = coach
        .decide(&knee_report(8, 1, ActivityGoal::Training), Some(&history), today())
        .unwrap();
    assert_eq!(decision.mode, Mode::Reset);
    assert_eq!(decision.rule, DecisionRule::RepeatedRegressions);
}

#[test]
fn test_rising_session_pain_resets_new_user() {
    let coach = Coach::default();
    let sessions = (1..=3)
        .map(|d| {
            let mut session = single_exercise_session(days_ago(d), "wall_sit", Difficulty::JustRight, 5);
            session.exercises.push(ExerciseEntry {
                exercise_id: "step_ups".to_string(),
                sets: 3,
                reps: Some(10),
                duration_secs: None,
                difficulty: Difficulty::JustRight,
                pain_during: 5,
            });
            session
        })
        .collect();
    let history = History {
        sessions,
        ..History::default()
    };

    let insights = coach.insights(Some(&history), today()).unwrap();
    assert_eq!(insights.sessions.previous_avg_pain, 0.0);
    assert!(insights.sessions.pain_trending_up);

    let decision = coach
        .decide(&knee_report(8, 0, ActivityGoal::Training), Some(&history), today())
        .unwrap();
    assert_eq!(decision.mode, Mode::Reset);
    assert_eq!(decision.rule, DecisionRule::SessionPainRising);
}

#[test]
fn test_threshold_overrides_change_decisions() {
    let thresholds = Thresholds {
        low_confidence: 6,
        ..Thresholds::default()
    };
    let strict = Coach::new(RegionRegistry::builtin(), thresholds);
    let report = knee_report(5, 0, ActivityGoal::Training);

    assert_eq!(strict.build_state(&report, None, None, today()).unwrap().mode, Mode::Reset);
    assert_eq!(
        Coach::default().build_state(&report, None, None, today()).unwrap().mode,
        Mode::Training
    );
}

#[test]
fn test_every_region_produces_a_state() {
    let coach = Coach::default();
    let calibration = CalibrationProfile {
        primary_problem_zone: Some("front of joint".to_string()),
    };
    for region in Region::ALL {
        let report = ReadinessReport::new(region, 6, 2, ActivityGoal::Training);
        let state = coach.build_state(&report, None, Some(&calibration), today()).unwrap();
        assert_eq!(state.region, region);
        assert_eq!(state.mode, Mode::Training);
        assert!(state.reasoning.contains("front of joint"));

        let planned = coach.planned_exercises(&state, &History::default()).unwrap();
        assert_eq!(planned.len(), state.plan.len());
    }
}

#[test]
fn test_json_history_round_trip_drives_next_day() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let coach = Coach::default();

    let mut store = JsonHistoryStore::new(&path);
    for days in (1..=3).rev() {
        let report = knee_report(7, 1, ActivityGoal::Training);
        let date = days_ago(days);
        let history = store.read_all().unwrap();
        let state = coach.build_state(&report, Some(&history), None, date).unwrap();
        store.append_check_in(CheckIn::from_report(&report, state.mode, date)).unwrap();
        store
            .append_session(single_exercise_session(date, "step_ups", Difficulty::TooEasy, 1))
            .unwrap();
    }

    let history = JsonHistoryStore::new(&path).read_all().unwrap();
    assert_eq!(history.check_ins.len(), 3);
    assert_eq!(history.sessions.len(), 3);

    let milestones = derive_milestones(&history, coach.thresholds(), days_ago(1));
    let added = store.record_milestones(milestones).unwrap();
    assert!(added >= 3);
    let history = store.read_all().unwrap();
    assert!(history.has_milestone("first_check_in"));
    assert!(history.has_milestone("first_session"));
    assert!(history.has_milestone("streak_3"));

    let state = coach
        .build_state(&knee_report(8, 0, ActivityGoal::Training), Some(&history), None, today())
        .unwrap();
    assert_eq!(state.mode, Mode::Training);
    assert!(state.reasoning.contains("too easy"));

    let selected = coach.dosage_for(Region::Knee, "step_ups", &history).unwrap();
    assert_eq!(selected.tier, DosageTier::Max);

    let summary = store.prune_older_than(2, today()).unwrap();
    assert_eq!(summary.check_ins_removed, 1);
    assert_eq!(store.read_all().unwrap().milestones.len(), history.milestones.len());
}

#[test]
fn test_custom_region_profile_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("knee.toml");

    let mut profile = RegionRegistry::builtin().get(Region::Knee).unwrap().clone();
    profile.plans.reset.retain(|id| id != "glute_bridge");
    std::fs::write(&path, toml::to_string_pretty(&profile).unwrap()).unwrap();

    let loaded = RegionProfile::load_from_file(&path).unwrap();
    let mut registry = RegionRegistry::builtin();
    registry.register(loaded);
    let coach = Coach::new(registry, Thresholds::default());

    let state = coach
        .build_state(&knee_report(1, 0, ActivityGoal::Training), None, None, today())
        .unwrap();
    assert_eq!(state.mode, Mode::Reset);
    assert!(!state.plan.contains(&"glute_bridge".to_string()));
}
