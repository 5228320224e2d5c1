//! Mode decision engine
//!
//! Selects RESET, TRAINING or GAME from today's readiness report and, when
//! available, trends computed over the user's history. The decision is an
//! ordered priority cascade where the first matching rule wins:
//!
//! 1. Safety short-circuits (low confidence, high resting discomfort, danger
//!    sensations, worsening history) always force RESET.
//! 2. Stated intent (game day, rest day) is honoured when safe.
//! 3. Otherwise capacity building, scaled by confidence and warning signs.
//!
//! Every call is a pure function of its inputs. Nothing from a previous
//! decision is carried over.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::models::{ActivityGoal, Mode, ReadinessReport, Severity};
use crate::sensations::SensationCatalog;
use crate::thresholds::Thresholds;
use crate::trends::{DifficultyTrend, HistoryInsights};

/// Cascade branch that produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    LowConfidence,
    HighDiscomfort,
    DangerSensation,
    ProgressiveWorsening,
    RepeatedRegressions,
    SessionPainRising,
    GameReady,
    GameNotReady,
    RestDay,
    FeelingSolid,
    ModerateConfidence,
    CautiousTraining,
    BuildFoundation,
}

impl DecisionRule {
    /// True for the safety short-circuits
    pub fn is_safety(&self) -> bool {
        matches!(
            self,
            DecisionRule::LowConfidence
                | DecisionRule::HighDiscomfort
                | DecisionRule::DangerSensation
                | DecisionRule::ProgressiveWorsening
                | DecisionRule::RepeatedRegressions
                | DecisionRule::SessionPainRising
        )
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecisionRule::LowConfidence => "low confidence",
            DecisionRule::HighDiscomfort => "high resting discomfort",
            DecisionRule::DangerSensation => "danger sensation",
            DecisionRule::ProgressiveWorsening => "progressive worsening",
            DecisionRule::RepeatedRegressions => "repeated painful sessions",
            DecisionRule::SessionPainRising => "session pain rising",
            DecisionRule::GameReady => "game ready",
            DecisionRule::GameNotReady => "game not ready",
            DecisionRule::RestDay => "rest day",
            DecisionRule::FeelingSolid => "feeling solid",
            DecisionRule::ModerateConfidence => "moderate confidence",
            DecisionRule::CautiousTraining => "cautious training",
            DecisionRule::BuildFoundation => "build the foundation",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDecision {
    pub mode: Mode,
    pub reasoning: String,
    pub rule: DecisionRule,
}

impl ModeDecision {
    fn new(mode: Mode, rule: DecisionRule, reasoning: impl Into<String>) -> Self {
        ModeDecision {
            mode,
            reasoning: reasoning.into(),
            rule,
        }
    }
}

pub struct ModeDecisionEngine {
    thresholds: Thresholds,
}

impl ModeDecisionEngine {
    pub fn new() -> Self {
        ModeDecisionEngine {
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        ModeDecisionEngine { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Decide today's mode
    ///
    /// `history` is `None` on first use; the history-based safety rules and the
    /// difficulty note are then skipped entirely.
    pub fn decide(
        &self,
        report: &ReadinessReport,
        catalog: &SensationCatalog,
        history: Option<&HistoryInsights>,
    ) -> ModeDecision {
        let decision = self.cascade(report, catalog, history);
        debug!(
            region = %report.region,
            mode = %decision.mode,
            rule = %decision.rule,
            confidence = report.confidence,
            discomfort = report.resting_discomfort,
            "Mode decided"
        );
        decision
    }

    fn cascade(
        &self,
        report: &ReadinessReport,
        catalog: &SensationCatalog,
        history: Option<&HistoryInsights>,
    ) -> ModeDecision {
        let t = &self.thresholds;
        let confidence = report.confidence;
        let discomfort = report.resting_discomfort;
        let severity = catalog.max_severity(&report.sensations);

        if let Some(decision) = self.safety_check(report, severity, history) {
            return decision;
        }

        let has_warnings = severity >= Severity::Warning;

        match report.activity_goal {
            ActivityGoal::Game => {
                return if confidence >= t.high_confidence && !has_warnings && discomfort <= t.low_discomfort {
                    ModeDecision::new(
                        Mode::Game,
                        DecisionRule::GameReady,
                        "High confidence, no warning signs and minimal discomfort. Cleared for game intensity.",
                    )
                } else {
                    ModeDecision::new(
                        Mode::Training,
                        DecisionRule::GameNotReady,
                        "You want to play, but you're not ready for game intensity today. Training mode keeps you progressing.",
                    )
                };
            }
            ActivityGoal::Rest => {
                return ModeDecision::new(
                    Mode::Reset,
                    DecisionRule::RestDay,
                    "Rest day chosen. Reset mode keeps things moving gently.",
                );
            }
            ActivityGoal::Light | ActivityGoal::Training => {}
        }

        if confidence >= t.high_confidence && !has_warnings && discomfort <= t.low_discomfort {
            let mut reasoning =
                String::from("Feeling solid. Training mode to keep building capacity.");
            match history.map(|h| h.sessions.recent_difficulty_trend) {
                Some(DifficultyTrend::TooEasy) => {
                    reasoning.push_str(" Recent sessions felt too easy, keep pushing.")
                }
                Some(DifficultyTrend::TooHard) => {
                    reasoning.push_str(" Recent sessions felt too hard, listen to your body.")
                }
                _ => {}
            }
            return ModeDecision::new(Mode::Training, DecisionRule::FeelingSolid, reasoning);
        }

        if confidence >= t.moderate_confidence && !has_warnings {
            return ModeDecision::new(
                Mode::Training,
                DecisionRule::ModerateConfidence,
                "Moderate confidence with no warning signs. Training mode at a steady pace.",
            );
        }

        if confidence >= t.moderate_confidence {
            return ModeDecision::new(
                Mode::Training,
                DecisionRule::CautiousTraining,
                "Moderate confidence, but you noticed some warning signs. Training mode, cautiously: back off if symptoms build.",
            );
        }

        ModeDecision::new(
            Mode::Reset,
            DecisionRule::BuildFoundation,
            "Confidence is still building. Reset mode to build the foundation.",
        )
    }

    fn safety_check(
        &self,
        report: &ReadinessReport,
        severity: Severity,
        history: Option<&HistoryInsights>,
    ) -> Option<ModeDecision> {
        let t = &self.thresholds;

        if report.confidence < t.low_confidence {
            return Some(ModeDecision::new(
                Mode::Reset,
                DecisionRule::LowConfidence,
                format!(
                    "Confidence is low today ({}/10). Reset mode to rebuild trust in the {}.",
                    report.confidence, report.region
                ),
            ));
        }

        if report.resting_discomfort > t.high_discomfort {
            return Some(ModeDecision::new(
                Mode::Reset,
                DecisionRule::HighDiscomfort,
                format!(
                    "Resting discomfort is elevated ({}/10). Reset mode to let things calm down.",
                    report.resting_discomfort
                ),
            ));
        }

        if severity == Severity::Danger {
            return Some(ModeDecision::new(
                Mode::Reset,
                DecisionRule::DangerSensation,
                "You reported a sensation that needs caution. Reset mode only today; if it persists, get it checked by a professional.",
            ));
        }

        let history = history?;

        if history.check_ins.progressive_worsening {
            return Some(ModeDecision::new(
                Mode::Reset,
                DecisionRule::ProgressiveWorsening,
                "Pain has risen across your last three check-ins (progressive worsening). Reset mode to let things settle.",
            ));
        }

        let sessions = &history.sessions;
        if sessions.recent_regressions >= t.min_regression_sessions
            && sessions.total_sessions >= t.min_sessions_for_regression_check
        {
            return Some(ModeDecision::new(
                Mode::Reset,
                DecisionRule::RepeatedRegressions,
                format!(
                    "{} of your recent sessions had high pain during exercise. Reset mode until sessions feel calmer.",
                    sessions.recent_regressions
                ),
            ));
        }

        if sessions.pain_trending_up && sessions.recent_avg_pain > t.worsening_pain_floor {
            return Some(ModeDecision::new(
                Mode::Reset,
                DecisionRule::SessionPainRising,
                format!(
                    "Pain during sessions is trending up ({:.1} vs {:.1}). Reset mode to reduce load.",
                    sessions.recent_avg_pain, sessions.previous_avg_pain
                ),
            ));
        }

        None
    }
}

impl Default for ModeDecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}
