//! Reuse planners: strategies that pick a measurement order and the reuse
//! edges it admits.
//!
//! All planners share one slot-register allocator and one greedy tail; they
//! differ in how the first measurement is chosen and how ties in the
//! next-to-measure rule are broken. Each returns a [`ReusePlan`] whose
//! edges are acyclic against the source DAG by construction: a wire is only
//! ever activated into a slot after the slot's previous occupant was
//! measured, and a wire inside the occupant's causal cone would already
//! have been activated.

mod dckf;
mod greedy;
mod random;

pub use dckf::DckfGreedy;
pub use greedy::DeterministicGreedy;
pub use random::RandomGreedy;

use std::str::FromStr;

use crate::cone::CausalCones;
use crate::error::{CompileError, CompileResult};
use crate::plan::ReusePlan;

/// A strategy producing a measurement order and reuse edges.
pub trait ReusePlanner {
    /// Get the name of this planner.
    fn name(&self) -> &'static str;

    /// Produce a plan for the given causal cones.
    fn plan(&mut self, cones: &CausalCones) -> ReusePlan;
}

/// Planner selection by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlannerMethod {
    /// Smallest-cone first measurement, smallest-index tie-breaks.
    #[default]
    DeterministicGreedy,
    /// Uniformly random first measurement and tie-breaks, best of `shots`.
    RandomGreedy,
    /// The published DCKF heuristic.
    Dckf,
    /// DCKF with brute-force search over the first measured wire.
    DckfFirstQubitSearch,
}

impl PlannerMethod {
    /// The selector string understood by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            PlannerMethod::DeterministicGreedy => "deterministic_greedy",
            PlannerMethod::RandomGreedy => "random_greedy",
            PlannerMethod::Dckf => "dckf",
            PlannerMethod::DckfFirstQubitSearch => "dckf_first_qubit_search",
        }
    }

    /// Instantiate the planner. `shots` and `seed` only affect
    /// [`RandomGreedy`].
    pub fn planner(self, shots: u32, seed: Option<u64>) -> Box<dyn ReusePlanner> {
        match self {
            PlannerMethod::DeterministicGreedy => Box::new(DeterministicGreedy),
            PlannerMethod::RandomGreedy => Box::new(RandomGreedy::new(shots, seed)),
            PlannerMethod::Dckf => Box::new(DckfGreedy::new(false)),
            PlannerMethod::DckfFirstQubitSearch => Box::new(DckfGreedy::new(true)),
        }
    }
}

impl FromStr for PlannerMethod {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        match s {
            "deterministic_greedy" => Ok(PlannerMethod::DeterministicGreedy),
            "random_greedy" => Ok(PlannerMethod::RandomGreedy),
            "dckf" => Ok(PlannerMethod::Dckf),
            "dckf_first_qubit_search" => Ok(PlannerMethod::DckfFirstQubitSearch),
            other => Err(CompileError::InvalidMethod(other.to_string())),
        }
    }
}
