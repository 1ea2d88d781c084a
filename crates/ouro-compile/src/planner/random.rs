//! Random greedy planner.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::cone::CausalCones;
use crate::plan::ReusePlan;
use crate::planner::ReusePlanner;
use crate::planner::greedy::plan_from_first;

/// Greedy planner with randomized first measurement and tie-breaks.
///
/// Runs `shots` independent trials and keeps the plan with the most reuse.
/// All randomness comes from one owned generator seeded at construction, so
/// two invocations with the same input and seed produce identical plans;
/// the process-global RNG is never touched.
pub struct RandomGreedy {
    shots: u32,
    rng: StdRng,
}

impl RandomGreedy {
    /// Create a planner with the given trial count and optional seed.
    pub fn new(shots: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            shots: shots.max(1),
            rng,
        }
    }
}

impl ReusePlanner for RandomGreedy {
    fn name(&self) -> &'static str {
        "random_greedy"
    }

    fn plan(&mut self, cones: &CausalCones) -> ReusePlan {
        let w = cones.width();
        if w == 0 {
            return ReusePlan::default();
        }

        let mut best: Option<ReusePlan> = None;
        for shot in 0..self.shots {
            let first = self.rng.gen_range(0..w);
            let rng = &mut self.rng;
            let plan = plan_from_first(first, cones, |minimizers| {
                rng.gen_range(0..minimizers.len())
            });
            debug!(shot, first, width = plan.final_width(w), "random trial");
            if best
                .as_ref()
                .is_none_or(|b| plan.reuse_count() > b.reuse_count())
            {
                best = Some(plan);
            }
        }
        best.expect("at least one shot runs")
    }
}
