//! Region capability sets
//!
//! A [`RegionProfile`] bundles everything the engine needs to know about one
//! body region: its sensation vocabulary, movement-restriction vocabulary,
//! exercise catalog and per-mode default plans. The decision logic is written
//! once against this type and dispatches through a [`RegionRegistry`].
//!
//! Replacement tables can be loaded from TOML with
//! [`RegionProfile::load_from_file`] and registered over the built-ins.

mod ankle;
mod knee;
mod lower_back;
mod shoulder;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::dosage::{Dosage, DosageOptions};
use crate::error::{RehabError, Result};
use crate::models::{Mode, Region};
use crate::sensations::SensationCatalog;

/// Catalog entry for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub name: String,

    /// Movement patterns the exercise loads, matched against restrictions
    #[serde(default)]
    pub movements: Vec<String>,

    /// Removed from the live plan when in-session pain reaches the regress limit
    #[serde(default)]
    pub high_demand: bool,

    pub dosage: DosageOptions,
}

/// Ordered default exercise ids per mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultPlans {
    pub reset: Vec<String>,
    pub training: Vec<String>,
    pub game: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub region: Region,
    pub sensations: SensationCatalog,
    /// Movement tag -> display label
    pub movements: BTreeMap<String, String>,
    pub exercises: BTreeMap<String, ExerciseSpec>,
    pub plans: DefaultPlans,
}

impl RegionProfile {
    pub fn default_plan(&self, mode: Mode) -> &[String] {
        match mode {
            Mode::Reset => &self.plans.reset,
            Mode::Training => &self.plans.training,
            Mode::Game => &self.plans.game,
        }
    }

    pub fn exercise(&self, exercise_id: &str) -> Option<&ExerciseSpec> {
        self.exercises.get(exercise_id)
    }

    pub fn is_high_demand(&self, exercise_id: &str) -> bool {
        self.exercise(exercise_id).map_or(false, |e| e.high_demand)
    }

    /// Movement tags of an exercise, empty for ids missing from the catalog
    pub fn movements_of(&self, exercise_id: &str) -> &[String] {
        self.exercise(exercise_id)
            .map(|e| e.movements.as_slice())
            .unwrap_or(&[])
    }

    /// Load a replacement profile from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let profile: RegionProfile = toml::from_str(&content).map_err(|e| {
            RehabError::Configuration(format!(
                "Failed to parse region profile {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(profile)
    }
}

/// Region profiles keyed by region
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    profiles: HashMap<Region, RegionProfile>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in tables for every region
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(knee::profile());
        registry.register(ankle::profile());
        registry.register(lower_back::profile());
        registry.register(shoulder::profile());
        registry
    }

    /// Register a profile, replacing any existing one for the same region
    pub fn register(&mut self, profile: RegionProfile) {
        if self.profiles.contains_key(&profile.region) {
            info!(region = %profile.region, "Replacing region profile");
        }
        self.profiles.insert(profile.region, profile);
    }

    pub fn get(&self, region: Region) -> Option<&RegionProfile> {
        self.profiles.get(&region)
    }

    pub fn regions(&self) -> Vec<Region> {
        let mut regions: Vec<Region> = self.profiles.keys().copied().collect();
        regions.sort();
        regions
    }
}

// Helpers shared by the built-in tables

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn movements(list: &[(&str, &str)]) -> BTreeMap<String, String> {
    list.iter()
        .map(|(tag, label)| (tag.to_string(), label.to_string()))
        .collect()
}

struct ExerciseDef {
    id: &'static str,
    name: &'static str,
    movements: &'static [&'static str],
    high_demand: bool,
    default: Dosage,
    min: Option<Dosage>,
    max: Option<Dosage>,
}

fn catalog(defs: Vec<ExerciseDef>) -> BTreeMap<String, ExerciseSpec> {
    defs.into_iter()
        .map(|def| {
            (
                def.id.to_string(),
                ExerciseSpec {
                    name: def.name.to_string(),
                    movements: ids(def.movements),
                    high_demand: def.high_demand,
                    dosage: DosageOptions {
                        default: def.default,
                        min: def.min,
                        max: def.max,
                    },
                },
            )
        })
        .collect()
}
