//! Coaching facade
//!
//! Ties the pieces together for one region-aware call: trends over history,
//! the mode cascade, plan building, pain limits and per-exercise dosage.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::dosage::{select_dosage, DosageAdapter, SelectedDosage};
use crate::error::{RehabError, Result};
use crate::history::History;
use crate::mode::{ModeDecision, ModeDecisionEngine};
use crate::models::{CalibrationProfile, CoachState, Mode, ReadinessReport, Region, ZoneStatus};
use crate::plan::PlanBuilder;
use crate::regions::{RegionProfile, RegionRegistry};
use crate::session::{self, ExerciseFeedback, SessionUpdate};
use crate::thresholds::Thresholds;
use crate::trends::{HistoryInsights, TrendAnalyzer};

/// A planned exercise with its resolved dosage
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    pub exercise_id: String,
    pub name: String,
    /// `None` for plan ids missing from the region catalog
    pub dosage: Option<SelectedDosage>,
}

pub struct Coach {
    registry: RegionRegistry,
    thresholds: Thresholds,
    engine: ModeDecisionEngine,
    analyzer: TrendAnalyzer,
    planner: PlanBuilder,
    dosage: DosageAdapter,
}

impl Coach {
    pub fn new(registry: RegionRegistry, thresholds: Thresholds) -> Self {
        Coach {
            engine: ModeDecisionEngine::with_thresholds(thresholds.clone()),
            analyzer: TrendAnalyzer::with_thresholds(thresholds.clone()),
            planner: PlanBuilder::with_thresholds(&thresholds),
            dosage: DosageAdapter::with_thresholds(thresholds.clone()),
            registry,
            thresholds,
        }
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn profile(&self, region: Region) -> Result<&RegionProfile> {
        self.registry
            .get(region)
            .ok_or(RehabError::UnknownRegion { region })
    }

    /// Trend summaries, `None` when there is no history to analyze
    pub fn insights(&self, history: Option<&History>, today: NaiveDate) -> Option<HistoryInsights> {
        history
            .filter(|h| !h.is_empty())
            .map(|h| self.analyzer.analyze(h, today))
    }

    pub fn decide(
        &self,
        report: &ReadinessReport,
        history: Option<&History>,
        today: NaiveDate,
    ) -> Result<ModeDecision> {
        let profile = self.profile(report.region)?;
        let insights = self.insights(history, today);
        Ok(self.engine.decide(report, &profile.sensations, insights.as_ref()))
    }

    /// Derive the coaching state for today's session
    pub fn build_state(
        &self,
        report: &ReadinessReport,
        history: Option<&History>,
        calibration: Option<&CalibrationProfile>,
        today: NaiveDate,
    ) -> Result<CoachState> {
        let profile = self.profile(report.region)?;
        let decision = self.decide(report, history, today)?;
        let plan = self
            .planner
            .build(profile, decision.mode, &report.movement_restrictions);
        let limits = self.thresholds.pain_limits(decision.mode);
        let reasoning = annotate(&decision, report, calibration);

        info!(
            region = %report.region,
            mode = %decision.mode,
            rule = %decision.rule,
            exercises = plan.len(),
            "Coach state built"
        );

        Ok(CoachState {
            region: report.region,
            mode: decision.mode,
            plan,
            pain_stop: limits.stop,
            pain_regress: limits.regress,
            reasoning,
        })
    }

    pub fn apply_feedback(&self, state: &CoachState, feedback: &ExerciseFeedback) -> Result<SessionUpdate> {
        let profile = self.profile(state.region)?;
        Ok(session::apply_feedback(state, feedback, profile, &self.thresholds))
    }

    pub fn dosage_for(&self, region: Region, exercise_id: &str, history: &History) -> Result<SelectedDosage> {
        let profile = self.profile(region)?;
        let spec = profile
            .exercise(exercise_id)
            .ok_or_else(|| RehabError::UnknownExercise {
                region,
                exercise_id: exercise_id.to_string(),
            })?;
        let tier = self.dosage.resolve_tier(exercise_id, &history.sessions);
        Ok(select_dosage(&spec.dosage, tier))
    }

    /// Resolve names and dosages for every exercise in the state's plan
    ///
    /// Ids without a catalog entry are listed by id with no dosage.
    pub fn planned_exercises(&self, state: &CoachState, history: &History) -> Result<Vec<PlannedExercise>> {
        let profile = self.profile(state.region)?;
        let planned = state
            .plan
            .iter()
            .map(|id| match profile.exercise(id) {
                Some(spec) => {
                    let tier = self.dosage.resolve_tier(id, &history.sessions);
                    PlannedExercise {
                        exercise_id: id.clone(),
                        name: spec.name.clone(),
                        dosage: Some(select_dosage(&spec.dosage, tier)),
                    }
                }
                None => {
                    warn!(region = %state.region, exercise_id = %id, "Planned exercise missing from catalog");
                    PlannedExercise {
                        exercise_id: id.clone(),
                        name: id.clone(),
                        dosage: None,
                    }
                }
            })
            .collect();
        Ok(planned)
    }
}

impl Default for Coach {
    fn default() -> Self {
        Coach::new(RegionRegistry::builtin(), Thresholds::default())
    }
}

/// Append annotation-only context to the decision reasoning
fn annotate(
    decision: &ModeDecision,
    report: &ReadinessReport,
    calibration: Option<&CalibrationProfile>,
) -> String {
    let mut reasoning = decision.reasoning.clone();
    if decision.mode == Mode::Game {
        return reasoning;
    }

    if let Some(zone) = calibration.and_then(|c| c.primary_problem_zone.as_deref()) {
        reasoning.push_str(&format!(" Focus area: {}.", zone));
    }
    if decision.mode == Mode::Training && report.problem_zone_status == ZoneStatus::Worse {
        reasoning.push_str(" Your problem zone feels worse than last time, so keep an eye on it.");
    }
    reasoning
}
