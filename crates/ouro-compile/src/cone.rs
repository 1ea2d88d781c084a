//! Causal cones as wire bitsets.

use ouro_ir::{CircuitDag, QubitId};

use crate::bitmatrix::BitMatrix;

/// A set of wire indices packed into `u64` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireSet {
    blocks: Vec<u64>,
    width: usize,
}

impl WireSet {
    /// Create an empty set over `[0, width)`.
    pub fn new(width: usize) -> Self {
        Self {
            blocks: vec![0; width.div_ceil(64)],
            width,
        }
    }

    /// Insert a wire.
    #[inline]
    pub fn insert(&mut self, q: usize) {
        debug_assert!(q < self.width);
        self.blocks[q / 64] |= 1 << (q % 64);
    }

    /// Whether the set contains a wire.
    #[inline]
    pub fn contains(&self, q: usize) -> bool {
        q < self.width && self.blocks[q / 64] >> (q % 64) & 1 == 1
    }

    /// Number of wires in the set.
    pub fn len(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&b| b == 0)
    }

    /// Add every wire of `other`.
    pub fn union_with(&mut self, other: &WireSet) {
        debug_assert_eq!(self.width, other.width);
        for (dst, src) in self.blocks.iter_mut().zip(&other.blocks) {
            *dst |= src;
        }
    }

    /// Size of the union with `other`, without materializing it.
    pub fn union_len(&self, other: &WireSet) -> usize {
        self.blocks
            .iter()
            .zip(&other.blocks)
            .map(|(a, b)| (a | b).count_ones() as usize)
            .sum()
    }

    /// Iterate the wires in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().enumerate().flat_map(|(i, &block)| {
            std::iter::successors(Some(block), |b| Some(b & b.wrapping_sub(1)))
                .take_while(|&b| b != 0)
                .map(move |b| i * 64 + b.trailing_zeros() as usize)
        })
    }
}

/// Per-measurement causal cones, read off the biadjacency columns.
///
/// This is the single seam between the dependency matrices and the
/// planners: commuting-group expansion happens upstream in the DAG, so
/// every planner sees cones through the same interface and stays unaware
/// of sibling structure.
#[derive(Debug, Clone)]
pub struct CausalCones {
    width: usize,
    cones: Vec<WireSet>,
    measured: Vec<bool>,
}

impl CausalCones {
    /// Extract cones from the biadjacency matrix and measurement flags
    /// from the DAG.
    pub fn from_biadjacency(b: &BitMatrix, dag: &CircuitDag) -> Self {
        let width = dag.width();
        debug_assert_eq!(b.rows(), width);
        let mut cones = Vec::with_capacity(width);
        let mut measured = Vec::with_capacity(width);
        for q in 0..width {
            let mut cone = WireSet::new(width);
            for i in 0..width {
                if b.get(i, q) {
                    cone.insert(i);
                }
            }
            cones.push(cone);
            measured.push(dag.is_measured(QubitId(q as u32)));
        }
        Self {
            width,
            cones,
            measured,
        }
    }

    /// Number of wires.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The causal cone of the measurement on wire `q`.
    pub fn cone(&self, q: usize) -> &WireSet {
        &self.cones[q]
    }

    /// Size of the causal cone of wire `q`.
    pub fn cone_size(&self, q: usize) -> usize {
        self.cones[q].len()
    }

    /// Whether wire `q` ends in a measurement.
    pub fn is_measured(&self, q: usize) -> bool {
        self.measured[q]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{MatrixMethod, biadjacency_and_candidate};
    use ouro_ir::Circuit;

    #[test]
    fn test_wire_set_basics() {
        let mut s = WireSet::new(70);
        assert!(s.is_empty());
        s.insert(0);
        s.insert(65);
        assert_eq!(s.len(), 2);
        assert!(s.contains(65));
        assert!(!s.contains(64));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 65]);
    }

    #[test]
    fn test_union_len_matches_union() {
        let mut a = WireSet::new(10);
        let mut b = WireSet::new(10);
        a.insert(1);
        a.insert(2);
        b.insert(2);
        b.insert(7);
        assert_eq!(a.union_len(&b), 3);
        a.union_with(&b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_cones_from_bv() {
        let circuit = Circuit::bernstein_vazirani("10110").unwrap();
        let dag = circuit.to_dag(true).unwrap();
        let (b, _) = biadjacency_and_candidate(&dag, MatrixMethod::BooleanMatrix);
        let cones = CausalCones::from_biadjacency(&b, &dag);

        // Data wire 1 carries no oracle gate: its cone is itself.
        assert_eq!(cones.cone(1).iter().collect::<Vec<_>>(), vec![1]);
        // Data wire 0 is entangled with the ancilla (wire 5).
        assert_eq!(cones.cone(0).iter().collect::<Vec<_>>(), vec![0, 5]);
        assert!(cones.is_measured(0));
    }
}
