//! Plan building and movement-restriction filtering

use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::models::Mode;
use crate::regions::RegionProfile;
use crate::thresholds::Thresholds;

pub struct PlanBuilder {
    min_plan_len: usize,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::with_thresholds(&Thresholds::default())
    }

    pub fn with_thresholds(thresholds: &Thresholds) -> Self {
        PlanBuilder {
            min_plan_len: thresholds.min_plan_len,
        }
    }

    /// Default plan for the mode, minus exercises loading a restricted movement
    ///
    /// A filtered plan shorter than the minimum length is never surfaced: the
    /// full RESET default list is returned instead.
    pub fn build(
        &self,
        profile: &RegionProfile,
        mode: Mode,
        restrictions: &BTreeSet<String>,
    ) -> Vec<String> {
        let defaults = profile.default_plan(mode);
        if restrictions.is_empty() {
            return defaults.to_vec();
        }

        for restriction in restrictions {
            if !profile.movements.contains_key(restriction) {
                warn!(region = %profile.region, restriction = %restriction, "Unknown movement restriction, ignoring");
            }
        }

        let filtered: Vec<String> = defaults
            .iter()
            .filter(|id| {
                !profile
                    .movements_of(id)
                    .iter()
                    .any(|movement| restrictions.contains(movement))
            })
            .cloned()
            .collect();

        if filtered.len() < self.min_plan_len {
            warn!(
                region = %profile.region,
                %mode,
                remaining = filtered.len(),
                "Restrictions left too few exercises, falling back to reset plan"
            );
            return profile.default_plan(Mode::Reset).to_vec();
        }

        debug!(
            region = %profile.region,
            %mode,
            removed = defaults.len() - filtered.len(),
            "Plan filtered by restrictions"
        );
        filtered
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}
