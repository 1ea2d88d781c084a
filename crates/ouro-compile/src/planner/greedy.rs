//! The shared greedy tail and the deterministic planner.

use tracing::debug;

use ouro_ir::QubitId;

use crate::cone::{CausalCones, WireSet};
use crate::plan::{ReuseEdge, ReusePlan};
use crate::planner::ReusePlanner;

/// Physical wire register used during planning.
///
/// A slot holds the logical wire currently occupying it, or `None` when the
/// occupant has been measured. Placement scans for the first free slot
/// (smallest address wins); reusing a freed slot commits a reuse edge from
/// the slot's previous occupant, while exhausting all slots grows the
/// register by one physical wire.
struct WireRegister {
    slots: Vec<Option<QubitId>>,
    last_occupant: Vec<QubitId>,
    slot_of: Vec<Option<usize>>,
}

impl WireRegister {
    fn new(width: usize) -> Self {
        Self {
            slots: vec![],
            last_occupant: vec![],
            slot_of: vec![None; width],
        }
    }

    /// Assign a slot to `q`, returning the reuse edge if a slot was
    /// recycled.
    fn place(&mut self, q: usize) -> Option<ReuseEdge> {
        let qid = QubitId(q as u32);
        match self.slots.iter().position(Option::is_none) {
            Some(slot) => {
                let edge = ReuseEdge {
                    measured: self.last_occupant[slot],
                    reused: qid,
                };
                self.slots[slot] = Some(qid);
                self.last_occupant[slot] = qid;
                self.slot_of[q] = Some(slot);
                Some(edge)
            }
            None => {
                self.slots.push(Some(qid));
                self.last_occupant.push(qid);
                self.slot_of[q] = Some(self.slots.len() - 1);
                None
            }
        }
    }

    /// Free the slot occupied by `q`, if it holds one.
    fn release(&mut self, q: usize) {
        if let Some(slot) = self.slot_of[q] {
            self.slots[slot] = None;
        }
    }

    fn width(&self) -> usize {
        self.slots.len()
    }
}

/// Run the greedy tail from a given first measurement.
///
/// `choose` resolves ties in the next-to-measure rule: it receives the
/// minimizers in ascending wire order and returns the index of the pick.
/// The deterministic planners pass `|_| 0` (smallest index wins).
pub(crate) fn plan_from_first<F>(first: usize, cones: &CausalCones, mut choose: F) -> ReusePlan
where
    F: FnMut(&[usize]) -> usize,
{
    let w = cones.width();
    let mut register = WireRegister::new(w);
    let mut activated = WireSet::new(w);
    let mut measured_cone = WireSet::new(w);
    let mut unmeasured = vec![true; w];
    let mut order = Vec::with_capacity(w);
    let mut edges = vec![];

    let mut next = first;
    for step in 0..w {
        if step > 0 {
            let mut best = usize::MAX;
            let mut minimizers: Vec<usize> = vec![];
            for (q, _) in unmeasured.iter().enumerate().filter(|(_, open)| **open) {
                let union = measured_cone.union_len(cones.cone(q));
                if union < best {
                    best = union;
                    minimizers.clear();
                    minimizers.push(q);
                } else if union == best {
                    minimizers.push(q);
                }
            }
            next = minimizers[choose(&minimizers)];
        }

        // Everything in the cone must be live before `next` can be
        // measured; activate the wires not hosted yet, ascending.
        for q in cones.cone(next).iter() {
            if !activated.contains(q) {
                activated.insert(q);
                if let Some(edge) = register.place(q) {
                    edges.push(edge);
                }
            }
        }

        // Recycle the slot, but only a real measurement frees its wire.
        if cones.is_measured(next) {
            register.release(next);
        }
        measured_cone.union_with(cones.cone(next));
        unmeasured[next] = false;
        order.push(QubitId(next as u32));
    }

    debug_assert_eq!(order.len(), w);
    debug!(
        first,
        register_width = register.width(),
        edges = edges.len(),
        "greedy tail finished"
    );
    ReusePlan {
        measurement_order: order,
        edges,
    }
}

/// Pick the wire with the smallest causal cone, ties to the smallest index.
pub(crate) fn smallest_cone_first(cones: &CausalCones) -> usize {
    (0..cones.width())
        .min_by_key(|&q| cones.cone_size(q))
        .unwrap_or(0)
}

/// Deterministic greedy planner.
///
/// First measurement is the wire with the smallest causal cone (smallest
/// column sum of the biadjacency matrix); each following measurement is the
/// unmeasured wire adding the fewest new wires to the measured causal cone.
/// All ties break to the smallest wire index.
pub struct DeterministicGreedy;

impl ReusePlanner for DeterministicGreedy {
    fn name(&self) -> &'static str {
        "deterministic_greedy"
    }

    fn plan(&mut self, cones: &CausalCones) -> ReusePlan {
        if cones.width() == 0 {
            return ReusePlan::default();
        }
        plan_from_first(smallest_cone_first(cones), cones, |_| 0)
    }
}
