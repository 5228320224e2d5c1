//! Per-exercise dosage adaptation
//!
//! Dosage moves between three tiers based on the feedback recorded for one
//! exercise. The rules are deliberately asymmetric: a single painful or
//! too-hard entry drops to the minimum tier, while progressing to the maximum
//! tier needs a run of easy, pain-free entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::models::{Difficulty, ExerciseSession};
use crate::thresholds::Thresholds;

/// Sets/reps/duration/hold parameters for one exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosage {
    pub sets: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_secs: Option<u32>,
}

impl Dosage {
    pub const fn reps(sets: u8, reps: u16) -> Self {
        Dosage {
            sets,
            reps: Some(reps),
            duration_secs: None,
            hold_secs: None,
        }
    }

    pub const fn timed(sets: u8, duration_secs: u32) -> Self {
        Dosage {
            sets,
            reps: None,
            duration_secs: Some(duration_secs),
            hold_secs: None,
        }
    }

    pub const fn hold(sets: u8, reps: u16, hold_secs: u32) -> Self {
        Dosage {
            sets,
            reps: Some(reps),
            duration_secs: None,
            hold_secs: Some(hold_secs),
        }
    }
}

impl fmt::Display for Dosage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x ", self.sets)?;
        match (self.reps, self.duration_secs) {
            (Some(reps), _) => write!(f, "{} reps", reps)?,
            (None, Some(secs)) => write!(f, "{}s", secs)?,
            (None, None) => write!(f, "-")?,
        }
        if let Some(hold) = self.hold_secs {
            write!(f, " ({}s hold)", hold)?;
        }
        Ok(())
    }
}

/// Dosage payloads available for an exercise; only `default` is mandatory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosageOptions {
    pub default: Dosage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Dosage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Dosage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DosageTier {
    Min,
    Default,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DosageLabel {
    Eased,
    Standard,
    Advanced,
}

impl fmt::Display for DosageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DosageLabel::Eased => write!(f, "Eased"),
            DosageLabel::Standard => write!(f, "Standard"),
            DosageLabel::Advanced => write!(f, "Advanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDosage {
    pub dosage: Dosage,
    /// Tier requested by the adapter
    pub tier: DosageTier,
    /// Reflects the payload actually used
    pub label: DosageLabel,
}

/// One recorded feedback point for an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackPoint {
    pub pain_during: u8,
    pub difficulty: Difficulty,
}

/// Resolve the payload for a tier, falling back to the default payload
pub fn select_dosage(options: &DosageOptions, tier: DosageTier) -> SelectedDosage {
    let (dosage, label) = match tier {
        DosageTier::Min => match options.min {
            Some(min) => (min, DosageLabel::Eased),
            None => (options.default, DosageLabel::Standard),
        },
        DosageTier::Max => match options.max {
            Some(max) => (max, DosageLabel::Advanced),
            None => (options.default, DosageLabel::Standard),
        },
        DosageTier::Default => (options.default, DosageLabel::Standard),
    };

    SelectedDosage { dosage, tier, label }
}

pub struct DosageAdapter {
    thresholds: Thresholds,
}

impl DosageAdapter {
    pub fn new() -> Self {
        DosageAdapter {
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        DosageAdapter { thresholds }
    }

    /// Feedback for one exercise, most recent first
    ///
    /// Sessions are ordered by date (stable for same-day sessions); later
    /// entries inside a session count as more recent.
    pub fn feedback_for(exercise_id: &str, sessions: &[ExerciseSession]) -> Vec<FeedbackPoint> {
        let mut ordered: Vec<&ExerciseSession> = sessions.iter().collect();
        ordered.sort_by_key(|s| s.date);

        ordered
            .iter()
            .rev()
            .flat_map(|session| session.exercises.iter().rev())
            .filter(|entry| entry.exercise_id == exercise_id)
            .map(|entry| FeedbackPoint {
                pain_during: entry.pain_during,
                difficulty: entry.difficulty,
            })
            .collect()
    }

    /// Tier from feedback ordered most recent first
    pub fn tier_from_feedback(&self, feedback: &[FeedbackPoint]) -> DosageTier {
        let Some(latest) = feedback.first() else {
            return DosageTier::Default;
        };

        if latest.pain_during > self.thresholds.dosage_regress_pain
            || latest.difficulty == Difficulty::TooHard
        {
            return DosageTier::Min;
        }

        let streak = self.thresholds.dosage_progress_streak;
        if streak > 0 && feedback.len() >= streak {
            let progressed = feedback[..streak].iter().all(|point| {
                point.difficulty == Difficulty::TooEasy
                    && point.pain_during < self.thresholds.dosage_progress_pain
            });
            if progressed {
                return DosageTier::Max;
            }
        }

        DosageTier::Default
    }

    pub fn resolve_tier(&self, exercise_id: &str, sessions: &[ExerciseSession]) -> DosageTier {
        let feedback = Self::feedback_for(exercise_id, sessions);
        let tier = self.tier_from_feedback(&feedback);
        debug!(exercise_id, points = feedback.len(), ?tier, "Resolved dosage tier");
        tier
    }
}

impl Default for DosageAdapter {
    fn default() -> Self {
        Self::new()
    }
}
