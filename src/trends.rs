//! Trend analysis over check-in and session history
//!
//! Both read-models compare a recent window against the immediately preceding
//! window of the same size. Every value is a pure reduction over an immutable
//! slice, so the two models are computed in parallel with `rayon::join`.
//!
//! When there is not enough data the summaries fall back to neutral values
//! (`Stable`, rate 1.0, counts 0). Callers must read these as "insufficient
//! signal", never as a confirmed good state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::history::History;
use crate::models::{CheckIn, Difficulty, ExerciseSession, Mode};
use crate::thresholds::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Worsening,
}

/// Majority difficulty over the recent window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTrend {
    TooEasy,
    JustRight,
    TooHard,
    /// No tag holds a strict majority
    Mixed,
    InsufficientData,
}

impl From<Difficulty> for DifficultyTrend {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::TooEasy => DifficultyTrend::TooEasy,
            Difficulty::JustRight => DifficultyTrend::JustRight,
            Difficulty::TooHard => DifficultyTrend::TooHard,
        }
    }
}

/// Session-level trend summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTrends {
    /// Mean of per-session mean pain over the recent window
    pub recent_avg_pain: f64,
    pub previous_avg_pain: f64,
    pub pain_trending_up: bool,
    /// Consecutive most recent sessions with low mean pain
    pub low_pain_streak: usize,
    /// Fraction of recent exercise entries at or below the stable pain level
    pub recent_stability_rate: f64,
    pub recent_difficulty_trend: DifficultyTrend,
    /// Consecutive most recent sessions rated too easy overall
    pub too_easy_streak: usize,
    /// Recent sessions containing an exercise at or above the regression pain
    pub recent_regressions: usize,
    pub days_since_last_session: Option<i64>,
    pub total_sessions: usize,
}

impl Default for SessionTrends {
    fn default() -> Self {
        SessionTrends {
            recent_avg_pain: 0.0,
            previous_avg_pain: 0.0,
            pain_trending_up: false,
            low_pain_streak: 0,
            recent_stability_rate: 1.0,
            recent_difficulty_trend: DifficultyTrend::InsufficientData,
            too_easy_streak: 0,
            recent_regressions: 0,
            days_since_last_session: None,
            total_sessions: 0,
        }
    }
}

/// Check-in level trend summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInTrends {
    pub weekly_avg_pain: f64,
    pub previous_week_avg_pain: f64,
    pub pain_direction: TrendDirection,
    pub weekly_avg_confidence: f64,
    pub previous_week_avg_confidence: f64,
    pub confidence_direction: TrendDirection,
    pub recent_reset_count: usize,
    /// Consecutive daily check-ins ending today or yesterday
    pub streak: usize,
    /// Three most recent check-ins show strictly increasing pain
    pub progressive_worsening: bool,
    pub total_check_ins: usize,
}

impl Default for CheckInTrends {
    fn default() -> Self {
        CheckInTrends {
            weekly_avg_pain: 0.0,
            previous_week_avg_pain: 0.0,
            pain_direction: TrendDirection::Stable,
            weekly_avg_confidence: 0.0,
            previous_week_avg_confidence: 0.0,
            confidence_direction: TrendDirection::Stable,
            recent_reset_count: 0,
            streak: 0,
            progressive_worsening: false,
            total_check_ins: 0,
        }
    }
}

/// Combined view consumed by the mode engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryInsights {
    pub sessions: SessionTrends,
    pub check_ins: CheckInTrends,
}

pub struct TrendAnalyzer {
    thresholds: Thresholds,
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        TrendAnalyzer {
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        TrendAnalyzer { thresholds }
    }

    /// Compute both read-models over the full history
    pub fn analyze(&self, history: &History, today: NaiveDate) -> HistoryInsights {
        let (sessions, check_ins) = rayon::join(
            || self.session_trends(&history.sessions, today),
            || self.check_in_trends(&history.check_ins, today),
        );

        debug!(
            sessions = sessions.total_sessions,
            check_ins = check_ins.total_check_ins,
            recent_avg_pain = sessions.recent_avg_pain,
            streak = check_ins.streak,
            "History analyzed"
        );

        HistoryInsights { sessions, check_ins }
    }

    pub fn session_trends(&self, sessions: &[ExerciseSession], today: NaiveDate) -> SessionTrends {
        if sessions.is_empty() {
            return SessionTrends::default();
        }

        let ordered = sorted_by_date(sessions, |s| s.date);
        let (recent, previous) = split_windows(&ordered, self.thresholds.session_window);

        let recent_avg_pain = mean(recent.iter().map(|s| s.mean_pain()));
        let previous_avg_pain = mean(previous.iter().map(|s| s.mean_pain()));
        // An empty previous window averages to 0, so early sessions can trend up
        let pain_trending_up = recent_avg_pain > previous_avg_pain + self.thresholds.trend_hysteresis;

        let low_pain_streak = ordered
            .iter()
            .rev()
            .take_while(|s| s.mean_pain() < self.thresholds.low_pain_session)
            .count();

        let recent_entries: Vec<_> = recent.iter().flat_map(|s| s.exercises.iter()).collect();
        let recent_stability_rate = if recent_entries.is_empty() {
            1.0
        } else {
            let stable = recent_entries
                .iter()
                .filter(|e| e.pain_during <= self.thresholds.stable_pain)
                .count();
            stable as f64 / recent_entries.len() as f64
        };

        let recent_difficulty_trend =
            self.difficulty_trend(recent_entries.iter().map(|e| e.difficulty));

        let too_easy_streak = ordered
            .iter()
            .rev()
            .take_while(|s| s.overall_difficulty == Difficulty::TooEasy)
            .count();

        let recent_regressions = recent
            .iter()
            .filter(|s| s.max_pain() >= self.thresholds.regression_pain)
            .count();

        let days_since_last_session = ordered.last().map(|s| (today - s.date).num_days());

        SessionTrends {
            recent_avg_pain,
            previous_avg_pain,
            pain_trending_up,
            low_pain_streak,
            recent_stability_rate,
            recent_difficulty_trend,
            too_easy_streak,
            recent_regressions,
            days_since_last_session,
            total_sessions: sessions.len(),
        }
    }

    pub fn check_in_trends(&self, check_ins: &[CheckIn], today: NaiveDate) -> CheckInTrends {
        if check_ins.is_empty() {
            return CheckInTrends::default();
        }

        let ordered = sorted_by_date(check_ins, |c| c.date);
        let (recent, previous) = split_windows(&ordered, self.thresholds.check_in_window);

        let weekly_avg_pain = mean(recent.iter().map(|c| f64::from(c.pain_level)));
        let previous_week_avg_pain = mean(previous.iter().map(|c| f64::from(c.pain_level)));
        let weekly_avg_confidence = mean(recent.iter().map(|c| f64::from(c.confidence_level)));
        let previous_week_avg_confidence =
            mean(previous.iter().map(|c| f64::from(c.confidence_level)));

        let enough = recent.len() >= self.thresholds.min_direction_entries
            && previous.len() >= self.thresholds.min_direction_entries;

        // Lower pain is an improvement, higher confidence is an improvement
        let pain_direction = if enough {
            self.direction(previous_week_avg_pain, weekly_avg_pain)
        } else {
            TrendDirection::Stable
        };
        let confidence_direction = if enough {
            self.direction(weekly_avg_confidence, previous_week_avg_confidence)
        } else {
            TrendDirection::Stable
        };

        let recent_reset_count = recent
            .iter()
            .filter(|c| c.mode_assigned == Mode::Reset)
            .count();

        let progressive_worsening = match ordered.len() {
            n if n >= 3 => {
                let last = &ordered[n - 3..];
                last[0].pain_level < last[1].pain_level && last[1].pain_level < last[2].pain_level
            }
            _ => false,
        };

        CheckInTrends {
            weekly_avg_pain,
            previous_week_avg_pain,
            pain_direction,
            weekly_avg_confidence,
            previous_week_avg_confidence,
            confidence_direction,
            recent_reset_count,
            streak: check_in_streak(check_ins, today),
            progressive_worsening,
            total_check_ins: check_ins.len(),
        }
    }

    /// Direction of a value where `better > worse` means improvement
    fn direction(&self, better: f64, worse: f64) -> TrendDirection {
        let hysteresis = self.thresholds.trend_hysteresis;
        if better > worse + hysteresis {
            TrendDirection::Improving
        } else if worse > better + hysteresis {
            TrendDirection::Worsening
        } else {
            TrendDirection::Stable
        }
    }

    fn difficulty_trend<I>(&self, tags: I) -> DifficultyTrend
    where
        I: Iterator<Item = Difficulty>,
    {
        let tags: Vec<Difficulty> = tags.collect();
        if tags.len() < self.thresholds.min_difficulty_points {
            return DifficultyTrend::InsufficientData;
        }

        [Difficulty::TooEasy, Difficulty::JustRight, Difficulty::TooHard]
            .into_iter()
            .find(|candidate| {
                let votes = tags.iter().filter(|t| *t == candidate).count();
                votes * 2 > tags.len()
            })
            .map(DifficultyTrend::from)
            .unwrap_or(DifficultyTrend::Mixed)
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Consecutive daily check-ins, walking back from the latest
///
/// The latest check-in must be within one day of `today`. Several check-ins on
/// the same date count once.
pub fn check_in_streak(check_ins: &[CheckIn], today: NaiveDate) -> usize {
    let dates: BTreeSet<NaiveDate> = check_ins.iter().map(|c| c.date).collect();
    let mut descending = dates.iter().rev();

    let Some(&latest) = descending.next() else {
        return 0;
    };
    if (today - latest).num_days().abs() > 1 {
        return 0;
    }

    let mut streak = 1;
    let mut previous = latest;
    for &date in descending {
        if (previous - date).num_days() != 1 {
            break;
        }
        streak += 1;
        previous = date;
    }
    streak
}

fn sorted_by_date<T, F>(items: &[T], key: F) -> Vec<&T>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut ordered: Vec<&T> = items.iter().collect();
    ordered.sort_by_key(|item| key(*item));
    ordered
}

/// Split chronologically ordered items into (recent, previous) windows
fn split_windows<'a, T>(ordered: &'a [&'a T], window: usize) -> (&'a [&'a T], &'a [&'a T]) {
    let recent_len = window.min(ordered.len());
    let recent_start = ordered.len() - recent_len;
    let previous_start = recent_start.saturating_sub(recent_len);
    (
        &ordered[recent_start..],
        &ordered[previous_start..recent_start],
    )
}

fn mean<I>(values: I) -> f64
where
    I: Iterator<Item = f64>,
{
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseEntry;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn check_in(date: NaiveDate, pain: u8, confidence: u8, mode: Mode) -> CheckIn {
        CheckIn {
            date,
            pain_level: pain,
            function_level: None,
            confidence_level: confidence,
            sensations: vec![],
            mode_assigned: mode,
            notes: None,
        }
    }

    fn session(date: NaiveDate, pains: &[u8], difficulty: Difficulty) -> ExerciseSession {
        ExerciseSession {
            date,
            exercises: pains
                .iter()
                .enumerate()
                .map(|(i, pain)| ExerciseEntry {
                    exercise_id: format!("ex_{}", i),
                    sets: 3,
                    reps: Some(10),
                    duration_secs: None,
                    difficulty,
                    pain_during: *pain,
                })
                .collect(),
            total_duration_secs: 1200,
            overall_difficulty: difficulty,
        }
    }

    #[test]
    fn test_empty_history_is_neutral() {
        let analyzer = TrendAnalyzer::new();
        let insights = analyzer.analyze(&History::default(), day(10));
        assert_eq!(insights.sessions, SessionTrends::default());
        assert_eq!(insights.check_ins, CheckInTrends::default());
        assert_eq!(insights.sessions.recent_stability_rate, 1.0);
        assert!(insights.sessions.days_since_last_session.is_none());
    }

    #[test]
    fn test_split_windows() {
        let items: Vec<u32> = (0..7).collect();
        let refs: Vec<&u32> = items.iter().collect();
        let (recent, previous) = split_windows(&refs, 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(previous.len(), 2);
        assert_eq!(*recent[0], 2);

        let (recent, previous) = split_windows(&refs[..3], 5);
        assert_eq!(recent.len(), 3);
        assert!(previous.is_empty());
    }

    #[test]
    fn test_session_pain_averages_and_trend() {
        let analyzer = TrendAnalyzer::new();
        let mut sessions: Vec<_> = (1..=5).map(|d| session(day(d), &[1, 1], Difficulty::JustRight)).collect();
        sessions.extend((6..=10).map(|d| session(day(d), &[5, 6], Difficulty::JustRight)));

        let trends = analyzer.session_trends(&sessions, day(10));
        assert!((trends.recent_avg_pain - 5.5).abs() < 1e-9);
        assert!((trends.previous_avg_pain - 1.0).abs() < 1e-9);
        assert!(trends.pain_trending_up);
        assert_eq!(trends.recent_regressions, 5);
        assert_eq!(trends.low_pain_streak, 0);
        assert_eq!(trends.recent_stability_rate, 0.0);
        assert_eq!(trends.days_since_last_session, Some(0));
    }

    #[test]
    fn test_hysteresis_prevents_small_trend() {
        let analyzer = TrendAnalyzer::new();
        let mut sessions: Vec<_> = (1..=5).map(|d| session(day(d), &[2], Difficulty::JustRight)).collect();
        sessions.extend((6..=10).map(|d| session(day(d), &[2, 3], Difficulty::JustRight)));

        let trends = analyzer.session_trends(&sessions, day(12));
        assert!(!trends.pain_trending_up);
        assert_eq!(trends.days_since_last_session, Some(2));
    }

    #[test]
    fn test_empty_previous_window_compares_against_zero() {
        let analyzer = TrendAnalyzer::new();
        let sessions: Vec<_> = (1..=3).map(|d| session(day(d), &[5, 5], Difficulty::TooHard)).collect();
        let trends = analyzer.session_trends(&sessions, day(3));
        assert_eq!(trends.previous_avg_pain, 0.0);
        assert!((trends.recent_avg_pain - 5.0).abs() < 1e-9);
        assert!(trends.pain_trending_up);

        let calm: Vec<_> = (1..=3).map(|d| session(day(d), &[0], Difficulty::JustRight)).collect();
        assert!(!analyzer.session_trends(&calm, day(3)).pain_trending_up);
    }

    #[test]
    fn test_zero_exercise_session_dilutes_average() {
        // Sessions with nothing completed count as 0 pain rather than being skipped
        let analyzer = TrendAnalyzer::new();
        let sessions = vec![
            session(day(1), &[6], Difficulty::JustRight),
            session(day(2), &[], Difficulty::JustRight),
        ];
        let trends = analyzer.session_trends(&sessions, day(2));
        assert!((trends.recent_avg_pain - 3.0).abs() < 1e-9);
        assert_eq!(trends.low_pain_streak, 1);
    }

    #[test]
    fn test_low_pain_streak_stops_at_first_painful_session() {
        let analyzer = TrendAnalyzer::new();
        let sessions = vec![
            session(day(1), &[0], Difficulty::JustRight),
            session(day(2), &[3], Difficulty::JustRight),
            session(day(3), &[1], Difficulty::JustRight),
            session(day(4), &[0, 1], Difficulty::JustRight),
        ];
        assert_eq!(analyzer.session_trends(&sessions, day(4)).low_pain_streak, 2);
    }

    #[test]
    fn test_difficulty_trend_requires_strict_majority() {
        let analyzer = TrendAnalyzer::new();
        let easy = vec![
            session(day(1), &[0, 0], Difficulty::TooEasy),
            session(day(2), &[0], Difficulty::JustRight),
        ];
        assert_eq!(
            analyzer.session_trends(&easy, day(2)).recent_difficulty_trend,
            DifficultyTrend::TooEasy
        );

        let split = vec![
            session(day(1), &[0, 0], Difficulty::TooEasy),
            session(day(2), &[0, 0], Difficulty::TooHard),
        ];
        assert_eq!(
            analyzer.session_trends(&split, day(2)).recent_difficulty_trend,
            DifficultyTrend::Mixed
        );

        let sparse = vec![session(day(1), &[0, 0], Difficulty::TooHard)];
        assert_eq!(
            analyzer.session_trends(&sparse, day(1)).recent_difficulty_trend,
            DifficultyTrend::InsufficientData
        );
    }

    #[test]
    fn test_too_easy_streak_uses_session_rating() {
        let analyzer = TrendAnalyzer::new();
        let mut sessions = vec![
            session(day(1), &[0], Difficulty::JustRight),
            session(day(2), &[0], Difficulty::TooEasy),
            session(day(3), &[0], Difficulty::TooEasy),
        ];
        // Per-exercise tags disagree with the session rating
        sessions[2].exercises[0].difficulty = Difficulty::TooHard;
        assert_eq!(analyzer.session_trends(&sessions, day(3)).too_easy_streak, 2);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let today = day(10);
        let check_ins = vec![
            check_in(day(6), 3, 5, Mode::Training),
            check_in(day(8), 3, 5, Mode::Training),
            check_in(day(9), 3, 5, Mode::Training),
            check_in(day(10), 3, 5, Mode::Training),
        ];
        assert_eq!(check_in_streak(&check_ins, today), 3);
    }

    #[test]
    fn test_streak_resets_when_latest_is_stale() {
        let check_ins = vec![check_in(day(5), 3, 5, Mode::Training), check_in(day(6), 3, 5, Mode::Training)];
        assert_eq!(check_in_streak(&check_ins, day(7)), 2);
        assert_eq!(check_in_streak(&check_ins, day(8)), 0);
        assert_eq!(check_in_streak(&[], day(8)), 0);
    }

    #[test]
    fn test_streak_ignores_duplicate_dates() {
        let check_ins = vec![
            check_in(day(9), 3, 5, Mode::Training),
            check_in(day(10), 3, 5, Mode::Training),
            check_in(day(10), 2, 6, Mode::Training),
        ];
        assert_eq!(check_in_streak(&check_ins, day(10)), 2);
    }

    #[test]
    fn test_single_check_in_is_stable() {
        let analyzer = TrendAnalyzer::new();
        let trends = analyzer.check_in_trends(&[check_in(day(1), 8, 2, Mode::Reset)], day(1));
        assert_eq!(trends.pain_direction, TrendDirection::Stable);
        assert_eq!(trends.confidence_direction, TrendDirection::Stable);
        assert_eq!(trends.recent_reset_count, 1);
        assert!(!trends.progressive_worsening);
    }

    #[test]
    fn test_progressive_worsening() {
        let analyzer = TrendAnalyzer::new();
        let check_ins = vec![
            check_in(day(1), 2, 8, Mode::Training),
            check_in(day(2), 4, 8, Mode::Training),
            check_in(day(3), 6, 8, Mode::Training),
        ];
        assert!(analyzer.check_in_trends(&check_ins, day(3)).progressive_worsening);

        let flat = vec![
            check_in(day(1), 2, 8, Mode::Training),
            check_in(day(2), 4, 8, Mode::Training),
            check_in(day(3), 4, 8, Mode::Training),
        ];
        assert!(!analyzer.check_in_trends(&flat, day(3)).progressive_worsening);
    }

    #[test]
    fn test_check_in_directions() {
        let analyzer = TrendAnalyzer::new();
        let mut check_ins: Vec<_> = (1..=7).map(|d| check_in(day(d), 6, 3, Mode::Reset)).collect();
        check_ins.extend((8..=14).map(|d| check_in(day(d), 2, 7, Mode::Training)));

        let trends = analyzer.check_in_trends(&check_ins, day(14));
        assert_eq!(trends.pain_direction, TrendDirection::Improving);
        assert_eq!(trends.confidence_direction, TrendDirection::Improving);
        assert_eq!(trends.recent_reset_count, 0);
        assert_eq!(trends.streak, 14);
        assert!((trends.weekly_avg_pain - 2.0).abs() < 1e-9);
        assert!((trends.previous_week_avg_confidence - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_check_in_worsening_direction() {
        let analyzer = TrendAnalyzer::new();
        let mut check_ins: Vec<_> = (1..=3).map(|d| check_in(day(d), 2, 7, Mode::Training)).collect();
        check_ins.extend((4..=10).map(|d| check_in(day(d), 5, 4, Mode::Reset)));

        let trends = analyzer.check_in_trends(&check_ins, day(10));
        assert_eq!(trends.pain_direction, TrendDirection::Worsening);
        assert_eq!(trends.confidence_direction, TrendDirection::Worsening);
        assert_eq!(trends.recent_reset_count, 7);
    }
}
