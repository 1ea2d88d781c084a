//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::catalog::StandardGate;
use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{MidId, QubitId};

/// A quantum circuit as an ordered gate history.
///
/// The builder is append-only: every gate method pushes one record onto
/// `gate_history` with a fresh signature and grows `width` to cover the
/// highest wire index seen. The history is only ever replaced wholesale by
/// the compiler, which also marks the circuit dynamic.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Ordered gate records.
    gate_history: Vec<Instruction>,
    /// Number of logical wires referenced so far.
    width: u32,
    /// Classical labels reported as final bits, in measurement order.
    output_ids: Vec<MidId>,
    /// Wires currently carrying an unconsumed measurement.
    measured: FxHashSet<QubitId>,
    /// Whether the history contains mid-circuit measurement and reset.
    dynamic: bool,
    /// Counter for record signatures.
    next_signature: u64,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gate_history: vec![],
            width: 0,
            output_ids: vec![],
            measured: FxHashSet::default(),
            dynamic: false,
            next_signature: 0,
        }
    }

    fn alloc_signature(&mut self) -> u64 {
        let sig = self.next_signature;
        self.next_signature += 1;
        sig
    }

    fn push(&mut self, inst: Instruction) {
        if let Some(max) = inst.max_qubit() {
            self.width = self.width.max(max.0 + 1);
        }
        self.gate_history.push(inst);
    }

    fn push_gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let mut seen = FxHashSet::default();
        for &q in &qubits {
            if !seen.insert(q) {
                return Err(IrError::MalformedCircuit(format!(
                    "duplicate wire {q} in '{}' operands",
                    gate.name()
                )));
            }
        }
        let sig = self.alloc_signature();
        let inst = Instruction::gate(gate, qubits, sig)?;
        self.push(inst);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::S, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::T, [qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Rx(theta), [qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Ry(theta), [qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Rz(theta), [qubit])
    }

    /// Apply the general U(θ, φ, γ) gate.
    pub fn u(&mut self, theta: f64, phi: f64, gamma: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::U(theta, phi, gamma), [qubit])
    }

    /// Apply the general U3(θ, φ, γ) gate.
    pub fn u3(&mut self, theta: f64, phi: f64, gamma: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::U3(theta, phi, gamma), [qubit])
    }

    /// Apply a depolarizing noise channel with the given probability.
    pub fn depolarizing(&mut self, prob: f64, qubit: QubitId) -> IrResult<&mut Self> {
        let sig = self.alloc_signature();
        let inst = Instruction::depolarizing(prob, qubit, sig)?;
        self.push(inst);
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CZ, [a, b])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Swap, [a, b])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CCX, [c1, c2, target])
    }

    // =========================================================================
    // Measurement and reset
    // =========================================================================

    /// Measure a wire, labelling the outcome with the wire's own index.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.measure_with_mid(qubit, MidId(qubit.0))
    }

    /// Measure a wire with an explicit classical output label.
    ///
    /// A wire may carry at most one unconsumed measurement; measuring it
    /// again without an intervening reset is rejected.
    pub fn measure_with_mid(&mut self, qubit: QubitId, mid: MidId) -> IrResult<&mut Self> {
        if !self.measured.insert(qubit) {
            return Err(IrError::MalformedCircuit(format!(
                "wire {qubit} is already measured"
            )));
        }
        let sig = self.alloc_signature();
        let inst = Instruction::measure(qubit, mid, sig);
        self.output_ids.push(mid);
        self.push(inst);
        Ok(self)
    }

    /// Measure every wire currently referenced, in ascending index order.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for q in 0..self.width {
            self.measure(QubitId(q))?;
        }
        Ok(self)
    }

    /// Reset a wire to |0⟩. The wire may be measured again afterwards.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.measured.remove(&qubit);
        let sig = self.alloc_signature();
        let inst = Instruction::reset(qubit, sig);
        self.push(inst);
        Ok(self)
    }

    // =========================================================================
    // Commuting-group metadata
    // =========================================================================

    /// Attach a commuting-group tag to the record with the given signature.
    pub fn set_group_tag(&mut self, signature: u64, tag: impl Into<String>) -> IrResult<()> {
        let tag = tag.into();
        match self
            .gate_history
            .iter_mut()
            .find(|inst| inst.signature == signature)
        {
            Some(inst) => {
                inst.group_tag = Some(tag);
                Ok(())
            }
            None => Err(IrError::MalformedCircuit(format!(
                "no record with signature {signature}"
            ))),
        }
    }

    /// Attach a commuting-group tag to every record with the given name.
    ///
    /// Returns the number of records tagged. The typical use tags every
    /// `cz` in a diagonal block with `"z_group"`.
    pub fn tag_gates_named(&mut self, name: &str, tag: impl Into<String>) -> usize {
        let tag = tag.into();
        let mut count = 0;
        for inst in &mut self.gate_history {
            if inst.name() == name {
                inst.group_tag = Some(tag.clone());
                count += 1;
            }
        }
        count
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of logical wires referenced by the history.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Read-only view of the gate history.
    pub fn gate_history(&self) -> &[Instruction] {
        &self.gate_history
    }

    /// Classical labels reported as final bits.
    pub fn output_ids(&self) -> &[MidId] {
        &self.output_ids
    }

    /// Whether the circuit contains mid-circuit measurement and reset.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Next free record signature.
    pub fn next_signature(&self) -> u64 {
        self.next_signature
    }

    // =========================================================================
    // Compilation surface
    // =========================================================================

    /// Lower the gate history to its per-wire DAG.
    ///
    /// `reset` controls whether reset records participate as nodes.
    pub fn to_dag(&self, reset: bool) -> IrResult<CircuitDag> {
        CircuitDag::build(self, reset)
    }

    /// Replace the gate history wholesale and mark the circuit dynamic.
    ///
    /// This is the compiler's exit point; user code should treat the history
    /// as read-only. Width, output labels and the signature counter are
    /// recomputed from the new records.
    pub fn replace_history(&mut self, history: Vec<Instruction>) {
        self.width = history
            .iter()
            .filter_map(Instruction::max_qubit)
            .map(|q| q.0 + 1)
            .max()
            .unwrap_or(0);
        self.output_ids = history
            .iter()
            .filter(|inst| inst.is_measure())
            .filter_map(|inst| inst.mid)
            .collect();
        self.next_signature = history
            .iter()
            .map(|inst| inst.signature + 1)
            .max()
            .unwrap_or(0);
        self.measured.clear();
        for inst in &history {
            if inst.is_measure() {
                self.measured.insert(inst.qubits[0]);
            } else if inst.is_reset() {
                self.measured.remove(&inst.qubits[0]);
            }
        }
        self.gate_history = history;
        self.dynamic = true;
    }

    /// Rewrite wire indices under the given map.
    ///
    /// Wires absent from the map keep their index. Mapping several wires to
    /// one target merges them onto a single physical wire; this is how the
    /// compiler lands a reuse chain, and callers doing it by hand are
    /// responsible for the wires' records not overlapping in time.
    pub fn remap_indices(&mut self, remap: &FxHashMap<QubitId, QubitId>) {
        for inst in &mut self.gate_history {
            for q in &mut inst.qubits {
                if let Some(&to) = remap.get(q) {
                    *q = to;
                }
            }
        }
        self.measured = self
            .measured
            .iter()
            .map(|q| remap.get(q).copied().unwrap_or(*q))
            .collect();
        self.width = self
            .gate_history
            .iter()
            .filter_map(Instruction::max_qubit)
            .map(|q| q.0 + 1)
            .max()
            .unwrap_or(0);
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Bernstein-Vazirani circuit for the given secret bitstring.
    ///
    /// Uses `secret.len() + 1` wires; the last wire is the phase-kickback
    /// ancilla.
    pub fn bernstein_vazirani(secret: &str) -> IrResult<Self> {
        let n = secret.len() as u32;
        let aux = QubitId(n);
        let mut circuit = Self::new("bernstein_vazirani");

        for i in 0..n {
            circuit.h(QubitId(i))?;
        }
        circuit.x(aux)?.h(aux)?;
        for (i, bit) in secret.chars().enumerate() {
            match bit {
                '1' => {
                    circuit.cx(QubitId(i as u32), aux)?;
                }
                '0' => {}
                other => {
                    return Err(IrError::MalformedCircuit(format!(
                        "secret bit '{other}' is not 0 or 1"
                    )));
                }
            }
        }
        for i in 0..n {
            circuit.h(QubitId(i))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Fully entangled circuit: per layer, Hadamards on every wire followed
    /// by a CX between every wire pair.
    pub fn fully_entangled(num_qubits: u32, layers: u32) -> IrResult<Self> {
        let mut circuit = Self::new("fully_entangled");
        for _ in 0..layers {
            for q in 0..num_qubits {
                circuit.h(QubitId(q))?;
            }
            for a in 0..num_qubits.saturating_sub(1) {
                for b in (a + 1)..num_qubits {
                    circuit.cx(QubitId(a), QubitId(b))?;
                }
            }
        }
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Quantum ripple-carry adder on `bits`-bit operands (`3·bits + 1`
    /// wires).
    pub fn ripple_carry_adder(bits: u32) -> IrResult<Self> {
        let mut circuit = Self::new("ripple_carry_adder");
        for i in 0..bits {
            circuit.ccx(QubitId(3 * i + 1), QubitId(3 * i + 2), QubitId(3 * i + 3))?;
            circuit.cx(QubitId(3 * i + 1), QubitId(3 * i + 2))?;
        }
        for i in 0..bits {
            circuit.ccx(QubitId(3 * i), QubitId(3 * i + 2), QubitId(3 * i + 3))?;
        }
        for i in 0..bits {
            circuit.cx(QubitId(3 * i), QubitId(3 * i + 2))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// IQP circuit H⊗ⁿ · D · H⊗ⁿ where the diagonal block D is the given
    /// list of CZ pairs.
    ///
    /// The CZ gates mutually commute; callers that want the compiler to
    /// exploit that tag them via [`tag_gates_named`](Self::tag_gates_named).
    pub fn iqp(num_qubits: u32, cz_pairs: &[(u32, u32)]) -> IrResult<Self> {
        let mut circuit = Self::new("iqp");
        for q in 0..num_qubits {
            circuit.h(QubitId(q))?;
        }
        for &(a, b) in cz_pairs {
            circuit.cz(QubitId(a), QubitId(b))?;
        }
        for q in 0..num_qubits {
            circuit.h(QubitId(q))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Max-Cut QAOA circuit on the given graph, with CZ standing in for the
    /// problem unitary and Rx(π) for the mixer.
    pub fn maxcut_qaoa(num_qubits: u32, edges: &[(u32, u32)], layers: u32) -> IrResult<Self> {
        use std::f64::consts::PI;

        let mut circuit = Self::new("maxcut_qaoa");
        for q in 0..num_qubits {
            circuit.h(QubitId(q))?;
        }
        for _ in 0..layers {
            for &(a, b) in edges {
                circuit.cz(QubitId(a), QubitId(b))?;
            }
            for q in 0..num_qubits {
                circuit.rx(PI, QubitId(q))?;
            }
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}
