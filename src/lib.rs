// Library interface for rehabrs
// The binary and integration tests both go through these modules

pub mod coach;
pub mod config;
pub mod dosage;
pub mod error;
pub mod history;
pub mod logging;
pub mod milestones;
pub mod mode;
pub mod models;
pub mod plan;
pub mod regions;
pub mod sensations;
pub mod session;
pub mod thresholds;
pub mod trends;

// Re-export commonly used types for convenience
pub use models::*;
pub use coach::{Coach, PlannedExercise};
pub use config::AppConfig;
pub use dosage::{Dosage, DosageAdapter, DosageLabel, DosageOptions, DosageTier, SelectedDosage};
pub use error::{HistoryError, RehabError, Result};
pub use history::{History, HistoryStore, JsonHistoryStore, MemoryHistoryStore, PruneSummary};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use milestones::derive_milestones;
pub use mode::{DecisionRule, ModeDecision, ModeDecisionEngine};
pub use plan::PlanBuilder;
pub use regions::{RegionProfile, RegionRegistry};
pub use sensations::{SensationCatalog, SensationCategory};
pub use session::{ExerciseFeedback, RegressionAction, SessionUpdate};
pub use thresholds::{PainLimits, Thresholds};
pub use trends::{CheckInTrends, HistoryInsights, SessionTrends, TrendAnalyzer, TrendDirection};
