//! Reimplementation of the DCKF qubit-reuse heuristic.
//!
//! DCKF is the compilation algorithm of *Qubit-Reuse Compilation with
//! Mid-Circuit Measurement and Reset*, Phys. Rev. X 13, 041057 (2023). Its
//! greedy tail coincides with [`DeterministicGreedy`]'s, so the planners
//! differ only when `first_qubit_search` widens the search over the first
//! measured wire.
//!
//! [`DeterministicGreedy`]: crate::planner::DeterministicGreedy

use tracing::debug;

use crate::cone::CausalCones;
use crate::plan::ReusePlan;
use crate::planner::ReusePlanner;
use crate::planner::greedy::{plan_from_first, smallest_cone_first};

/// The DCKF planner.
pub struct DckfGreedy {
    first_qubit_search: bool,
}

impl DckfGreedy {
    /// Create the planner; `first_qubit_search` enables the brute-force
    /// enumeration of all first measurements.
    pub fn new(first_qubit_search: bool) -> Self {
        Self { first_qubit_search }
    }
}

impl ReusePlanner for DckfGreedy {
    fn name(&self) -> &'static str {
        if self.first_qubit_search {
            "dckf_first_qubit_search"
        } else {
            "dckf"
        }
    }

    fn plan(&mut self, cones: &CausalCones) -> ReusePlan {
        let w = cones.width();
        if w == 0 {
            return ReusePlan::default();
        }

        if !self.first_qubit_search {
            return plan_from_first(smallest_cone_first(cones), cones, |_| 0);
        }

        let mut best: Option<ReusePlan> = None;
        for first in 0..w {
            let plan = plan_from_first(first, cones, |_| 0);
            debug!(first, edges = plan.reuse_count(), "first-qubit candidate");
            if best
                .as_ref()
                .is_none_or(|b| plan.reuse_count() > b.reuse_count())
            {
                best = Some(plan);
            }
        }
        best.expect("width is nonzero")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{MatrixMethod, biadjacency_and_candidate};
    use crate::planner::DeterministicGreedy;
    use ouro_ir::Circuit;

    fn cones_of(circuit: &Circuit) -> CausalCones {
        let dag = circuit.to_dag(true).unwrap();
        let (b, _) = biadjacency_and_candidate(&dag, MatrixMethod::BooleanMatrix);
        CausalCones::from_biadjacency(&b, &dag)
    }

    #[test]
    fn test_plain_dckf_matches_deterministic() {
        for bits in [2, 3, 5] {
            let circuit = Circuit::ripple_carry_adder(bits).unwrap();
            let cones = cones_of(&circuit);
            let dckf = DckfGreedy::new(false).plan(&cones);
            let det = DeterministicGreedy.plan(&cones);
            assert_eq!(dckf, det);
        }
    }

    #[test]
    fn test_first_qubit_search_never_loses() {
        let circuit = Circuit::bernstein_vazirani("1011011").unwrap();
        let cones = cones_of(&circuit);
        let plain = DckfGreedy::new(false).plan(&cones);
        let searched = DckfGreedy::new(true).plan(&cones);
        assert!(searched.reuse_count() >= plain.reuse_count());
    }
}
