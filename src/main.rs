use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, error};

use rehabrs::coach::Coach;
use rehabrs::config::AppConfig;
use rehabrs::error::RehabError;
use rehabrs::history::{History, HistoryStore, JsonHistoryStore};
use rehabrs::logging::{self, LogFormat};
use rehabrs::milestones::derive_milestones;
use rehabrs::models::{
    ActivityGoal, CheckIn, CoachState, ExerciseSession, Milestone, Mode, ReadinessReport, Region, ZoneStatus,
};
use rehabrs::regions::{RegionProfile, RegionRegistry};
use rehabrs::session::{ExerciseFeedback, RegressionAction};
use rehabrs::trends::TrendAnalyzer;

/// RehabRS - Injury Rehab Coaching CLI
///
/// Turns a daily readiness check-in and the training history into a session
/// mode, an exercise plan with dosages, and pain limits for the session.
#[derive(Parser)]
#[command(name = "rehabrs")]
#[command(author = "RehabRS Contributors")]
#[command(version)]
#[command(about = "Rule-based injury rehab coaching CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// History file (overrides the configured path)
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record today's readiness and get a session plan
    CheckIn {
        /// Body region (knee, ankle, lower-back, shoulder)
        #[arg(short, long)]
        region: Option<Region>,

        /// Confidence in the problem area (0-10)
        #[arg(long)]
        confidence: u8,

        /// Discomfort at rest (0-10)
        #[arg(long)]
        discomfort: u8,

        /// What you plan to do today (rest, light, training, game)
        #[arg(short, long, default_value = "training")]
        goal: ActivityGoal,

        /// Sensation tags, repeatable
        #[arg(short, long)]
        sensation: Vec<String>,

        /// Movements that are restricted today, repeatable
        #[arg(long)]
        restrict: Vec<String>,

        /// Problem zone compared with last time (better, same, worse)
        #[arg(long)]
        zone_status: Option<ZoneStatus>,

        /// Where it hurts, repeatable
        #[arg(long)]
        pain_location: Vec<String>,

        /// The joint gave way since the last check-in
        #[arg(long)]
        giving_way: bool,

        /// Morning stiffness present
        #[arg(long)]
        morning_stiffness: bool,

        /// Append the check-in to history
        #[arg(long)]
        save: bool,

        /// Write the session state snapshot to this file
        #[arg(long, value_name = "FILE")]
        state_out: Option<PathBuf>,
    },

    /// Apply feedback after one exercise to a saved session state
    Feedback {
        /// Session state snapshot written by check-in
        #[arg(long, value_name = "FILE")]
        state: PathBuf,

        /// Pain during the exercise (0-10)
        #[arg(long)]
        pain: u8,

        /// The joint did not feel stable
        #[arg(long)]
        unstable: bool,

        /// Exercise just completed; later plan entries are the ones eased
        #[arg(short, long)]
        exercise: Option<String>,
    },

    /// Append a completed session (JSON) to history
    LogSession {
        /// Session JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show pain, confidence and difficulty trends
    Trends,

    /// Show the dosage for one exercise based on recent feedback
    Dosage {
        #[arg(short, long)]
        region: Option<Region>,

        /// Exercise id, e.g. wall_sit
        #[arg(short, long)]
        exercise: String,
    },

    /// List milestones, recording any newly reached
    Milestones,

    /// Delete check-ins and sessions older than N days
    Prune {
        #[arg(short, long)]
        days: u32,
    },

    /// Configure application settings
    Config {
        /// Print the active configuration
        #[arg(short, long)]
        list: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

struct App {
    config: AppConfig,
    config_path: PathBuf,
    store: JsonHistoryStore,
    today: NaiveDate,
}

impl App {
    fn coach(&self) -> Result<Coach> {
        Ok(Coach::new(load_registry(&self.config)?, self.config.thresholds.clone()))
    }

    fn region(&self, region: Option<Region>) -> Result<Region> {
        region
            .or(self.config.settings.default_region)
            .context("No region given and no default_region configured (use --region)")
    }
}

fn load_registry(config: &AppConfig) -> Result<RegionRegistry> {
    let mut registry = RegionRegistry::builtin();
    for path in &config.settings.region_files {
        let profile = RegionProfile::load_from_file(path)
            .with_context(|| format!("Failed to load region profile: {}", path.display()))?;
        registry.register(profile);
    }
    Ok(registry)
}

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<RehabError>() {
            Some(rehab) => {
                error!(severity = ?rehab.severity(), "{}", rehab);
                eprintln!("{} {}", "Error:".red().bold(), rehab.user_message());
            }
            None => eprintln!("{} {:#}", "Error:".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load_or_default_from(&config_path)?;

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    logging::init_logging(&log_config)?;

    if let Some(history) = &cli.history {
        config.settings.history_path = history.clone();
    }
    debug!(config = %config_path.display(), history = %config.settings.history_path.display(), "Configuration loaded");

    let app = App {
        store: JsonHistoryStore::new(&config.settings.history_path),
        today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
        config,
        config_path,
    };

    match cli.command {
        Commands::CheckIn {
            region,
            confidence,
            discomfort,
            goal,
            sensation,
            restrict,
            zone_status,
            pain_location,
            giving_way,
            morning_stiffness,
            save,
            state_out,
        } => {
            let coach = app.coach()?;
            let region = app.region(region)?;
            let catalog = &coach.profile(region)?.sensations;

            let mut report = ReadinessReport::new(region, confidence, discomfort, goal);
            for tag in &sensation {
                report.select_sensation(tag, catalog);
            }
            for movement in restrict {
                report.add_restriction(movement);
            }
            report.problem_zone_status = zone_status.unwrap_or_default();
            report.follow_ups.pain_locations = pain_location;
            report.follow_ups.giving_way = giving_way.then_some(true);
            report.follow_ups.morning_stiffness = morning_stiffness.then_some(true);
            report.validate()?;

            run_check_in(&app, &coach, &report, save, state_out.as_deref())?;
        }

        Commands::Feedback {
            state,
            pain,
            unstable,
            exercise,
        } => {
            let coach = app.coach()?;
            run_feedback(&coach, &state, pain, unstable, exercise)?;
        }

        Commands::LogSession { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read session file: {}", file.display()))?;
            let session: ExerciseSession = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse session file: {}", file.display()))?;

            let mut store = app.store.clone();
            let date = session.date;
            let exercises = session.exercises.len();
            store.append_session(session)?;
            println!(
                "{}",
                format!("✓ Session on {} logged ({} exercises)", date, exercises).green()
            );
            record_new_milestones(&app, &mut store)?;
        }

        Commands::Trends => {
            let history = app.store.read_all()?;
            print_trends(&app, &history);
        }

        Commands::Dosage { region, exercise } => {
            let coach = app.coach()?;
            let region = app.region(region)?;
            let history = app.store.read_all()?;
            let selected = coach.dosage_for(region, &exercise, &history)?;
            println!(
                "{} {}: {} ({})",
                region.to_string().bold(),
                exercise.cyan(),
                selected.dosage,
                selected.label
            );
        }

        Commands::Milestones => {
            let mut store = app.store.clone();
            record_new_milestones(&app, &mut store)?;
            let history = store.read_all()?;
            if history.milestones.is_empty() {
                println!("{}", "No milestones yet.".dimmed());
            }
            for milestone in &history.milestones {
                println!("  {} {}", milestone.achieved_on.to_string().dimmed(), milestone.title);
            }
        }

        Commands::Prune { days } => {
            let mut store = app.store.clone();
            let summary = store.prune_older_than(days, app.today)?;
            println!(
                "{}",
                format!(
                    "✓ Removed {} check-ins and {} sessions before {}",
                    summary.check_ins_removed, summary.sessions_removed, summary.cutoff
                )
                .green()
            );
        }

        Commands::Config { list, init } => {
            if init {
                let mut config = AppConfig::default();
                config.save_to_file(&app.config_path)?;
                println!(
                    "{}",
                    format!("✓ Wrote default configuration to {}", app.config_path.display()).green()
                );
            }
            if list || !init {
                let rendered = toml::to_string_pretty(&app.config)
                    .context("Failed to serialize configuration to TOML")?;
                println!("{}", format!("# {}", app.config_path.display()).dimmed());
                println!("{}", rendered);
            }
        }
    }

    Ok(())
}

fn run_check_in(
    app: &App,
    coach: &Coach,
    report: &ReadinessReport,
    save: bool,
    state_out: Option<&Path>,
) -> Result<()> {
    let history = app.store.read_all()?;
    let calibration = &app.config.calibration;
    let state = coach.build_state(report, Some(&history), Some(calibration), app.today)?;

    print_state(&state);
    for planned in coach.planned_exercises(&state, &history)? {
        match planned.dosage {
            Some(selected) => println!(
                "  • {:<28} {} {}",
                planned.name,
                selected.dosage,
                format!("({})", selected.label).dimmed()
            ),
            None => println!("  • {:<28} {}", planned.name, "(no dosage on file)".dimmed()),
        }
    }

    if let Some(path) = state_out {
        write_state(path, &state)?;
        println!("{}", format!("State written to {}", path.display()).dimmed());
    }

    if save {
        let mut store = app.store.clone();
        store.append_check_in(CheckIn::from_report(report, state.mode, app.today))?;
        println!("{}", "✓ Check-in saved".green());
        record_new_milestones(app, &mut store)?;
    }
    Ok(())
}

fn run_feedback(coach: &Coach, path: &Path, pain: u8, unstable: bool, exercise: Option<String>) -> Result<()> {
    if pain > 10 {
        return Err(RehabError::Validation(format!("pain must be 0-10, got {}", pain)).into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;
    let state: CoachState = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

    let feedback = ExerciseFeedback {
        pain,
        felt_stable: !unstable,
        exercise_id: exercise,
    };
    let update = coach.apply_feedback(&state, &feedback)?;

    match update.action {
        RegressionAction::None => println!("{}", "✓ Keep going, plan unchanged".green()),
        RegressionAction::EasedPlan => {
            println!("{}", "Pain is climbing, high-demand exercises removed".yellow().bold())
        }
        RegressionAction::SwitchedToReset => {
            println!("{}", "Stop: switching to reset for the rest of the session".red().bold())
        }
    }
    if update.action != RegressionAction::None {
        print_state(&update.state);
    }

    write_state(path, &update.state)
}

fn write_state(path: &Path, state: &CoachState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json).with_context(|| format!("Failed to write state file: {}", path.display()))
}

fn print_state(state: &CoachState) {
    let mode = match state.mode {
        Mode::Reset => state.mode.to_string().yellow().bold(),
        Mode::Training => state.mode.to_string().blue().bold(),
        Mode::Game => state.mode.to_string().green().bold(),
    };
    println!("{} {} ({})", "Mode:".bold(), mode, state.region);
    println!("  {}", state.reasoning);
    println!(
        "  Stop at pain {}, ease off at {}",
        state.pain_stop.to_string().red(),
        state.pain_regress.to_string().yellow()
    );
    println!("  Plan: {}", state.plan.join(", "));
}

fn record_new_milestones(app: &App, store: &mut JsonHistoryStore) -> Result<()> {
    let history = store.read_all()?;
    let reached: Vec<Milestone> = derive_milestones(&history, &app.config.thresholds, app.today);
    for milestone in &reached {
        println!("{} {}", "★ Milestone:".magenta().bold(), milestone.title);
    }
    store.record_milestones(reached)?;
    Ok(())
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(metric: &'static str, value: impl ToString) -> TrendRow {
    TrendRow {
        metric,
        value: value.to_string(),
    }
}

fn print_trends(app: &App, history: &History) {
    if history.is_empty() {
        println!("{}", "No history yet. Save a check-in to get started.".dimmed());
        return;
    }

    let insights = TrendAnalyzer::with_thresholds(app.config.thresholds.clone()).analyze(history, app.today);
    let s = &insights.sessions;
    let c = &insights.check_ins;

    let rows = vec![
        row("Check-ins", c.total_check_ins),
        row("Check-in streak", c.streak),
        row("Weekly avg pain", format!("{:.1}", c.weekly_avg_pain)),
        row("Previous week avg pain", format!("{:.1}", c.previous_week_avg_pain)),
        row("Pain direction", format!("{:?}", c.pain_direction)),
        row("Weekly avg confidence", format!("{:.1}", c.weekly_avg_confidence)),
        row("Confidence direction", format!("{:?}", c.confidence_direction)),
        row("Recent resets", c.recent_reset_count),
        row("Progressive worsening", c.progressive_worsening),
        row("Sessions", s.total_sessions),
        row("Recent session pain", format!("{:.1}", s.recent_avg_pain)),
        row("Previous session pain", format!("{:.1}", s.previous_avg_pain)),
        row("Session pain rising", s.pain_trending_up),
        row("Low-pain streak", s.low_pain_streak),
        row("Stability rate", format!("{:.0}%", s.recent_stability_rate * 100.0)),
        row("Difficulty trend", format!("{:?}", s.recent_difficulty_trend)),
        row("Recent regressions", s.recent_regressions),
        row(
            "Days since last session",
            s.days_since_last_session
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", "Trends".cyan().bold());
    println!("{}", table);
}
