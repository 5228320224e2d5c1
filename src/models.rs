use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{RehabError, Result};
use crate::sensations::{SensationCatalog, SensationCategory};

/// Body areas supported by the rehabilitation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Knee,
    Ankle,
    LowerBack,
    Shoulder,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Knee, Region::Ankle, Region::LowerBack, Region::Shoulder];
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Knee => write!(f, "knee"),
            Region::Ankle => write!(f, "ankle"),
            Region::LowerBack => write!(f, "lower back"),
            Region::Shoulder => write!(f, "shoulder"),
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knee" => Ok(Region::Knee),
            "ankle" => Ok(Region::Ankle),
            "back" | "lower-back" | "lower_back" | "lowerback" => Ok(Region::LowerBack),
            "shoulder" => Ok(Region::Shoulder),
            _ => Err(format!("Unknown region: {}", s)),
        }
    }
}

/// Training intensity mode for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Calm, low-load session to settle symptoms
    Reset,
    /// Capacity building
    Training,
    /// Sport-specific, game intensity
    Game,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Reset => write!(f, "RESET"),
            Mode::Training => write!(f, "TRAINING"),
            Mode::Game => write!(f, "GAME"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reset" => Ok(Mode::Reset),
            "training" => Ok(Mode::Training),
            "game" => Ok(Mode::Game),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

/// What the user intends to do today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityGoal {
    Rest,
    Light,
    Training,
    Game,
}

impl FromStr for ActivityGoal {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(ActivityGoal::Rest),
            "light" => Ok(ActivityGoal::Light),
            "training" | "train" => Ok(ActivityGoal::Training),
            "game" | "match" => Ok(ActivityGoal::Game),
            _ => Err(format!("Unknown activity goal: {}", s)),
        }
    }
}

/// How the primary problem zone feels compared to last time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Better,
    #[default]
    Same,
    Worse,
}

impl FromStr for ZoneStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "better" => Ok(ZoneStatus::Better),
            "same" => Ok(ZoneStatus::Same),
            "worse" => Ok(ZoneStatus::Worse),
            _ => Err(format!("Unknown zone status: {}", s)),
        }
    }
}

/// Severity tier of a reported sensation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Warning,
    Danger,
}

/// Perceived difficulty of an exercise or session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    TooEasy,
    JustRight,
    TooHard,
}

/// Region-specific follow-up answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowUps {
    /// Where it hurts, free-form location labels
    #[serde(default)]
    pub pain_locations: Vec<String>,

    /// Did the joint give way since the last check-in
    pub giving_way: Option<bool>,

    /// Morning stiffness present
    pub morning_stiffness: Option<bool>,
}

/// The user's self-reported state for the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub region: Region,

    /// Confidence in the problem area, 0-10
    pub confidence: u8,

    /// Discomfort at rest, 0-10
    pub resting_discomfort: u8,

    pub activity_goal: ActivityGoal,

    #[serde(default)]
    pub sensations: BTreeSet<String>,

    #[serde(default)]
    pub movement_restrictions: BTreeSet<String>,

    #[serde(default)]
    pub problem_zone_status: ZoneStatus,

    #[serde(default)]
    pub follow_ups: FollowUps,
}

impl ReadinessReport {
    pub fn new(region: Region, confidence: u8, resting_discomfort: u8, activity_goal: ActivityGoal) -> Self {
        ReadinessReport {
            region,
            confidence,
            resting_discomfort,
            activity_goal,
            sensations: BTreeSet::new(),
            movement_restrictions: BTreeSet::new(),
            problem_zone_status: ZoneStatus::Same,
            follow_ups: FollowUps::default(),
        }
    }

    /// Reject scale values outside 0-10
    pub fn validate(&self) -> Result<()> {
        if self.confidence > 10 {
            return Err(RehabError::Validation(format!(
                "confidence must be 0-10, got {}",
                self.confidence
            )));
        }
        if self.resting_discomfort > 10 {
            return Err(RehabError::Validation(format!(
                "resting discomfort must be 0-10, got {}",
                self.resting_discomfort
            )));
        }
        Ok(())
    }

    /// Add a sensation tag, keeping positive and non-positive tags mutually exclusive
    pub fn select_sensation(&mut self, tag: &str, catalog: &SensationCatalog) {
        let is_positive = |t: &str| catalog.classify(t).category == SensationCategory::Positive;

        if is_positive(tag) {
            self.sensations.clear();
        } else {
            self.sensations.retain(|existing| !is_positive(existing));
        }
        self.sensations.insert(tag.to_string());
    }

    pub fn add_restriction(&mut self, movement: impl Into<String>) {
        self.movement_restrictions.insert(movement.into());
    }
}

/// Persisted daily check-in record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub date: NaiveDate,
    pub pain_level: u8,
    pub function_level: Option<u8>,
    pub confidence_level: u8,
    #[serde(default)]
    pub sensations: Vec<String>,
    pub mode_assigned: Mode,
    pub notes: Option<String>,
}

impl CheckIn {
    /// Build the persisted record for a completed readiness check-in
    pub fn from_report(report: &ReadinessReport, mode: Mode, date: NaiveDate) -> Self {
        let mut notes = Vec::new();
        if !report.follow_ups.pain_locations.is_empty() {
            notes.push(format!("pain at {}", report.follow_ups.pain_locations.join(", ")));
        }
        if report.follow_ups.giving_way == Some(true) {
            notes.push("giving way reported".to_string());
        }
        if report.follow_ups.morning_stiffness == Some(true) {
            notes.push("morning stiffness".to_string());
        }

        CheckIn {
            date,
            pain_level: report.resting_discomfort,
            function_level: None,
            confidence_level: report.confidence,
            sensations: report.sensations.iter().cloned().collect(),
            mode_assigned: mode,
            notes: if notes.is_empty() { None } else { Some(notes.join("; ")) },
        }
    }
}

/// One completed exercise inside a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub exercise_id: String,
    pub sets: u8,
    pub reps: Option<u16>,
    pub duration_secs: Option<u32>,
    pub difficulty: Difficulty,
    /// Pain during the exercise, 0-10
    pub pain_during: u8,
}

/// Persisted exercise session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    pub date: NaiveDate,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    pub total_duration_secs: u32,
    pub overall_difficulty: Difficulty,
}

impl ExerciseSession {
    /// Mean pain across completed exercises, 0 when nothing was completed
    pub fn mean_pain(&self) -> f64 {
        if self.exercises.is_empty() {
            return 0.0;
        }
        let total: u32 = self.exercises.iter().map(|e| u32::from(e.pain_during)).sum();
        f64::from(total) / self.exercises.len() as f64
    }

    pub fn max_pain(&self) -> u8 {
        self.exercises.iter().map(|e| e.pain_during).max().unwrap_or(0)
    }
}

/// Progress marker derived from history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Stable key used for deduplication
    pub id: String,
    pub kind: MilestoneKind,
    pub title: String,
    pub achieved_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    FirstStep,
    Streak,
    PainReduction,
    SessionCount,
    LowPainRun,
}

/// Read-only calibration answers from onboarding
///
/// Only used to annotate reasoning; it never changes the selected mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// e.g. "inner knee", "patellar tendon"
    pub primary_problem_zone: Option<String>,
}

/// Derived coaching state for the active session
///
/// Recomputed from a readiness report and history, never stored as a source of
/// truth. It can be snapshotted to resume an interrupted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachState {
    pub region: Region,
    pub mode: Mode,
    /// Remaining exercise ids, in order
    pub plan: Vec<String>,
    /// Stop the exercise at or above this pain
    pub pain_stop: u8,
    /// Ease the plan at or above this pain
    pub pain_regress: u8,
    pub reasoning: String,
}
