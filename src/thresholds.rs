//! Decision thresholds
//!
//! Every constant used by the mode cascade, trend windows, dosage adaptation and
//! the in-session controller lives here so it can be overridden from the
//! `[thresholds]` table of the configuration file.

use serde::{Deserialize, Serialize};

use crate::models::Mode;

/// In-session pain limits for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainLimits {
    /// Pain at or above this stops the session and switches to reset
    pub stop: u8,
    /// Pain at or above this removes high-demand exercises
    pub regress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Confidence below this forces reset
    pub low_confidence: u8,
    /// Minimum confidence for the moderate training branches
    pub moderate_confidence: u8,
    /// Minimum confidence for game mode and the "feeling solid" branch
    pub high_confidence: u8,
    /// Resting discomfort above this forces reset
    pub high_discomfort: u8,
    /// Resting discomfort must be at or below this for game mode
    pub low_discomfort: u8,

    /// Exercise pain at or above this marks a regression session
    pub regression_pain: u8,
    /// Regression sessions in the recent window that force reset
    pub min_regression_sessions: usize,
    /// Total sessions required before the regression rule applies
    pub min_sessions_for_regression_check: usize,
    /// Recent average session pain must exceed this for the worsening rule
    pub worsening_pain_floor: f64,

    /// Hysteresis applied to every recent-vs-previous comparison
    pub trend_hysteresis: f64,
    pub session_window: usize,
    pub check_in_window: usize,
    /// Entries needed in both check-in windows before a direction is reported
    pub min_direction_entries: usize,
    /// Data points needed for a difficulty majority vote
    pub min_difficulty_points: usize,
    /// Session mean pain below this counts toward the low-pain streak
    pub low_pain_session: f64,
    /// Exercise pain at or below this counts as stable
    pub stable_pain: u8,

    /// Most recent pain above this drops the dosage to min
    pub dosage_regress_pain: u8,
    /// Pain must stay below this for the dosage to progress
    pub dosage_progress_pain: u8,
    /// Consecutive too-easy entries required to progress
    pub dosage_progress_streak: usize,

    /// Shortest plan surfaced after restriction filtering
    pub min_plan_len: usize,

    pub reset_limits: PainLimits,
    pub training_limits: PainLimits,
    pub game_limits: PainLimits,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            low_confidence: 4,
            moderate_confidence: 5,
            high_confidence: 7,
            high_discomfort: 5,
            low_discomfort: 2,
            regression_pain: 6,
            min_regression_sessions: 2,
            min_sessions_for_regression_check: 3,
            worsening_pain_floor: 4.0,
            trend_hysteresis: 0.5,
            session_window: 5,
            check_in_window: 7,
            min_direction_entries: 3,
            min_difficulty_points: 3,
            low_pain_session: 2.0,
            stable_pain: 2,
            dosage_regress_pain: 4,
            dosage_progress_pain: 2,
            dosage_progress_streak: 3,
            min_plan_len: 2,
            reset_limits: PainLimits { stop: 4, regress: 2 },
            training_limits: PainLimits { stop: 6, regress: 4 },
            game_limits: PainLimits { stop: 7, regress: 5 },
        }
    }
}

impl Thresholds {
    pub fn pain_limits(&self, mode: Mode) -> PainLimits {
        match mode {
            Mode::Reset => self.reset_limits,
            Mode::Training => self.training_limits,
            Mode::Game => self.game_limits,
        }
    }
}
