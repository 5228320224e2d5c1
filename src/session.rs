//! In-session regression controller
//!
//! After every completed exercise the live [`CoachState`] is re-evaluated
//! against the user's feedback. The controller only ever lowers intensity: once
//! a session has been switched to RESET nothing in that session raises it again.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{CoachState, Mode};
use crate::regions::RegionProfile;
use crate::thresholds::Thresholds;

/// Feedback captured after one exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFeedback {
    /// Pain during the exercise, 0-10
    pub pain: u8,
    pub felt_stable: bool,
    /// The exercise just completed. Plan entries up to and including it are
    /// done and never eased away; `None` treats the whole plan as remaining.
    #[serde(default)]
    pub exercise_id: Option<String>,
}

impl ExerciseFeedback {
    pub fn new(pain: u8, felt_stable: bool) -> Self {
        ExerciseFeedback {
            pain,
            felt_stable,
            exercise_id: None,
        }
    }

    pub fn for_exercise(mut self, exercise_id: impl Into<String>) -> Self {
        self.exercise_id = Some(exercise_id.into());
        self
    }

    /// Number of leading plan entries already completed
    fn done_len(&self, plan: &[String]) -> usize {
        self.exercise_id
            .as_deref()
            .and_then(|id| plan.iter().position(|p| p == id))
            .map_or(0, |i| i + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionAction {
    None,
    /// High-demand exercises were removed from the remaining plan
    EasedPlan,
    SwitchedToReset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub state: CoachState,
    pub action: RegressionAction,
}

pub const SWITCH_TO_RESET_REASON: &str = "pain or instability, switching to reset.";

/// Apply one exercise's feedback to the live session state
pub fn apply_feedback(
    state: &CoachState,
    feedback: &ExerciseFeedback,
    profile: &RegionProfile,
    thresholds: &Thresholds,
) -> SessionUpdate {
    if feedback.pain >= state.pain_stop || !feedback.felt_stable {
        let limits = thresholds.pain_limits(Mode::Reset);
        warn!(
            region = %state.region,
            from = %state.mode,
            pain = feedback.pain,
            felt_stable = feedback.felt_stable,
            "Switching session to reset"
        );
        return SessionUpdate {
            state: CoachState {
                region: state.region,
                mode: Mode::Reset,
                plan: profile.default_plan(Mode::Reset).to_vec(),
                pain_stop: limits.stop,
                pain_regress: limits.regress,
                reasoning: SWITCH_TO_RESET_REASON.to_string(),
            },
            action: RegressionAction::SwitchedToReset,
        };
    }

    if feedback.pain >= state.pain_regress {
        let (done, remaining) = state.plan.split_at(feedback.done_len(&state.plan));
        let mut eased: Vec<String> = remaining
            .iter()
            .filter(|id| !profile.is_high_demand(id))
            .cloned()
            .collect();
        if eased.is_empty() && !remaining.is_empty() {
            eased = profile.default_plan(Mode::Reset).to_vec();
        }
        let plan: Vec<String> = done.iter().cloned().chain(eased).collect();
        info!(
            region = %state.region,
            pain = feedback.pain,
            completed = done.len(),
            removed = state.plan.len().saturating_sub(plan.len()),
            "Easing remaining plan"
        );
        return SessionUpdate {
            state: CoachState {
                plan,
                ..state.clone()
            },
            action: RegressionAction::EasedPlan,
        };
    }

    SessionUpdate {
        state: state.clone(),
        action: RegressionAction::None,
    }
}
