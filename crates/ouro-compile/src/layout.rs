//! Logical-to-physical wire mapping.

use rustc_hash::FxHashMap;

use ouro_ir::QubitId;

/// Mapping from the logical wires of a static circuit to the physical
/// wires of its compiled form.
///
/// Unlike a routing layout this map is many-to-one: a physical wire hosts a
/// chain of logical wires over time, each segment separated by a
/// measure/reset pair. `hosts` records the occupation order per physical
/// wire.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    logical_to_physical: FxHashMap<QubitId, u32>,
    hosts: Vec<Vec<QubitId>>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a logical wire to a physical wire's occupation chain.
    pub fn add(&mut self, logical: QubitId, physical: u32) {
        self.logical_to_physical.insert(logical, physical);
        let idx = physical as usize;
        if self.hosts.len() <= idx {
            self.hosts.resize_with(idx + 1, Vec::new);
        }
        self.hosts[idx].push(logical);
    }

    /// Get the physical wire hosting a logical wire.
    pub fn get_physical(&self, logical: QubitId) -> Option<u32> {
        self.logical_to_physical.get(&logical).copied()
    }

    /// Logical wires hosted by a physical wire, in occupation order.
    pub fn hosts(&self, physical: u32) -> &[QubitId] {
        self.hosts
            .get(physical as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of physical wires.
    pub fn num_physical(&self) -> usize {
        self.hosts.len()
    }

    /// Number of mapped logical wires.
    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    /// Check if the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }

    /// Iterate over (logical, physical) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, u32)> + '_ {
        self.logical_to_physical.iter().map(|(&l, &p)| (l, p))
    }

    /// The layout as a wire remap for
    /// [`Circuit::remap_indices`](ouro_ir::Circuit::remap_indices).
    pub fn to_remap(&self) -> FxHashMap<QubitId, QubitId> {
        self.logical_to_physical
            .iter()
            .map(|(&l, &p)| (l, QubitId(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_chains() {
        let mut layout = Layout::new();
        layout.add(QubitId(1), 0);
        layout.add(QubitId(4), 0);
        layout.add(QubitId(5), 1);

        assert_eq!(layout.get_physical(QubitId(4)), Some(0));
        assert_eq!(layout.hosts(0), &[QubitId(1), QubitId(4)]);
        assert_eq!(layout.num_physical(), 2);
        assert_eq!(layout.len(), 3);

        let remap = layout.to_remap();
        assert_eq!(remap[&QubitId(5)], QubitId(1));
    }
}
