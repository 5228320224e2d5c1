//! Milestone derivation
//!
//! Milestones are facts derived when a threshold is crossed. Each carries a
//! stable id so repeated derivation never produces duplicates.

use chrono::NaiveDate;

use crate::history::History;
use crate::models::{Milestone, MilestoneKind};
use crate::thresholds::Thresholds;
use crate::trends::{check_in_streak, TrendAnalyzer};

const STREAK_MILESTONES: [usize; 4] = [3, 7, 14, 30];
const PAIN_REDUCTION_MILESTONES: [u8; 2] = [2, 4];
const SESSION_COUNT_MILESTONES: [usize; 3] = [10, 25, 50];
const LOW_PAIN_RUN: usize = 5;

/// Milestones reached by `history` that are not yet recorded in it
pub fn derive_milestones(history: &History, thresholds: &Thresholds, today: NaiveDate) -> Vec<Milestone> {
    let mut reached = Vec::new();

    if !history.check_ins.is_empty() {
        reached.push(milestone(
            "first_check_in",
            MilestoneKind::FirstStep,
            "First check-in completed".to_string(),
            today,
        ));
    }
    if !history.sessions.is_empty() {
        reached.push(milestone(
            "first_session",
            MilestoneKind::FirstStep,
            "First session completed".to_string(),
            today,
        ));
    }

    let streak = check_in_streak(&history.check_ins, today);
    for days in STREAK_MILESTONES.iter().filter(|&&days| streak >= days) {
        reached.push(milestone(
            &format!("streak_{}", days),
            MilestoneKind::Streak,
            format!("{}-day check-in streak", days),
            today,
        ));
    }

    let first = history.check_ins.iter().min_by_key(|c| c.date);
    let latest = history.check_ins.iter().max_by_key(|c| c.date);
    if let (Some(first), Some(latest)) = (first, latest) {
        let reduction = first.pain_level.saturating_sub(latest.pain_level);
        for points in PAIN_REDUCTION_MILESTONES.iter().filter(|&&points| reduction >= points) {
            reached.push(milestone(
                &format!("pain_down_{}", points),
                MilestoneKind::PainReduction,
                format!("Pain down {} points since your first check-in", points),
                today,
            ));
        }
    }

    let total_sessions = history.sessions.len();
    for count in SESSION_COUNT_MILESTONES.iter().filter(|&&count| total_sessions >= count) {
        reached.push(milestone(
            &format!("sessions_{}", count),
            MilestoneKind::SessionCount,
            format!("{} sessions completed", count),
            today,
        ));
    }

    let analyzer = TrendAnalyzer::with_thresholds(thresholds.clone());
    let session_trends = analyzer.session_trends(&history.sessions, today);
    if session_trends.low_pain_streak >= LOW_PAIN_RUN {
        reached.push(milestone(
            &format!("low_pain_streak_{}", LOW_PAIN_RUN),
            MilestoneKind::LowPainRun,
            format!("{} low-pain sessions in a row", LOW_PAIN_RUN),
            today,
        ));
    }

    reached
        .into_iter()
        .filter(|m| !history.has_milestone(&m.id))
        .collect()
}

fn milestone(id: &str, kind: MilestoneKind, title: String, today: NaiveDate) -> Milestone {
    Milestone {
        id: id.to_string(),
        kind,
        title,
        achieved_on: today,
    }
}
