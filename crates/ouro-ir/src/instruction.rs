//! Gate records combining catalog entries with operands.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::StandardGate;
use crate::error::{IrError, IrResult};
use crate::qubit::{MidId, QubitId};

/// The kind of record in a gate history.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    /// A unitary gate from the catalog.
    Gate(StandardGate),
    /// Measurement in the computational basis.
    Measure,
    /// Reset the wire to |0⟩.
    Reset,
    /// Single-qubit depolarizing noise channel.
    Depolarizing {
        /// Depolarizing probability, in `[0, 1]`.
        prob: f64,
    },
}

/// One immutable record of a circuit's gate history.
///
/// The `signature` is unique within a circuit and serves as node identity
/// when the history is lowered to a DAG; two otherwise identical gates are
/// distinct records. `group_tag` marks membership in a commuting group and
/// is plain metadata until lowering.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// What the record does.
    pub kind: InstructionKind,
    /// Wires this record touches.
    pub qubits: Vec<QubitId>,
    /// Stable per-circuit identity.
    pub signature: u64,
    /// Commuting-group tag, if the user attached one.
    pub group_tag: Option<String>,
    /// Classical output label (measurements only).
    pub mid: Option<MidId>,
}

impl Instruction {
    /// Create a gate record.
    pub fn gate(
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
        signature: u64,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let expected = gate.num_qubits();
        if qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected,
                got: qubits.len() as u32,
            });
        }
        Ok(Self {
            kind: InstructionKind::Gate(gate),
            qubits,
            signature,
            group_tag: None,
            mid: None,
        })
    }

    /// Create a measurement record with a classical output label.
    pub fn measure(qubit: QubitId, mid: MidId, signature: u64) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            signature,
            group_tag: None,
            mid: Some(mid),
        }
    }

    /// Create a reset record.
    pub fn reset(qubit: QubitId, signature: u64) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            signature,
            group_tag: None,
            mid: None,
        }
    }

    /// Create a depolarizing noise record.
    pub fn depolarizing(prob: f64, qubit: QubitId, signature: u64) -> IrResult<Self> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(IrError::InvalidProbability(prob));
        }
        Ok(Self {
            kind: InstructionKind::Depolarizing { prob },
            qubits: vec![qubit],
            signature,
            group_tag: None,
            mid: None,
        })
    }

    /// Check if this is a unitary gate record.
    #[inline]
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    #[inline]
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a reset.
    #[inline]
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    /// Get the gate if this is a gate record.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the wire-format name of this record.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "m",
            InstructionKind::Reset => "r",
            InstructionKind::Depolarizing { .. } => "depolarizing",
        }
    }

    /// Highest wire index referenced by this record.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.qubits.iter().copied().max()
    }
}

/// Wire-format image of an [`Instruction`].
///
/// Field names follow the record schema used by the original toolkit:
/// `name`, `which_qubit`, `signature`, then the optional `params`, `prob`,
/// `group_tag` and `mid`.
#[derive(Serialize, Deserialize)]
struct Record {
    name: String,
    which_qubit: Vec<u32>,
    signature: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prob: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mid: Option<u32>,
}

impl From<&Instruction> for Record {
    fn from(inst: &Instruction) -> Self {
        let (params, prob) = match &inst.kind {
            InstructionKind::Gate(g) => {
                let p = g.params();
                (if p.is_empty() { None } else { Some(p) }, None)
            }
            InstructionKind::Depolarizing { prob } => (None, Some(*prob)),
            _ => (None, None),
        };
        Record {
            name: inst.name().to_string(),
            which_qubit: inst.qubits.iter().map(|q| q.0).collect(),
            signature: inst.signature,
            params,
            prob,
            group_tag: inst.group_tag.clone(),
            mid: inst.mid.map(|m| m.0),
        }
    }
}

impl TryFrom<Record> for Instruction {
    type Error = IrError;

    fn try_from(rec: Record) -> IrResult<Self> {
        let qubits: Vec<QubitId> = rec.which_qubit.iter().copied().map(QubitId).collect();
        let expected = crate::catalog::arity(&rec.name)?;
        if qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: rec.name.clone(),
                expected,
                got: qubits.len() as u32,
            });
        }
        let mut inst = match rec.name.as_str() {
            "m" => Instruction {
                kind: InstructionKind::Measure,
                qubits,
                signature: rec.signature,
                group_tag: None,
                mid: rec.mid.map(MidId),
            },
            "r" => Instruction::reset(qubits[0], rec.signature),
            "depolarizing" => {
                let prob = rec.prob.ok_or_else(|| {
                    IrError::MalformedCircuit("depolarizing record without 'prob'".into())
                })?;
                Instruction::depolarizing(prob, qubits[0], rec.signature)?
            }
            name => {
                let gate = StandardGate::from_name(name, rec.params.as_deref().unwrap_or(&[]))?;
                Instruction::gate(gate, qubits, rec.signature)?
            }
        };
        inst.group_tag = rec.group_tag;
        Ok(inst)
    }
}

impl Serialize for Instruction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Record::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Instruction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rec = Record::deserialize(deserializer)?;
        Instruction::try_from(rec).map_err(D::Error::custom)
    }
}
