//! Top-level qubit-reuse compilation driver.

use tracing::{debug, info, instrument};

use ouro_ir::Circuit;

use crate::cone::CausalCones;
use crate::dependency::{MatrixMethod, biadjacency_and_candidate};
use crate::error::CompileResult;
use crate::layout::Layout;
use crate::plan::ReusePlan;
use crate::planner::PlannerMethod;
use crate::relinearize::relinearize;

/// Configuration for a [`reduce`] invocation.
#[derive(Debug, Clone, Default)]
pub struct ReduceOptions {
    /// Planner strategy.
    pub method: PlannerMethod,
    /// Reachability fixpoint used for the dependency matrices.
    pub matrix_method: MatrixMethod,
    /// Trial count for the random planner.
    pub shots: u32,
    /// Seed for the random planner; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl ReduceOptions {
    /// Defaults: deterministic greedy over the boolean-matrix fixpoint,
    /// five shots when the random planner is selected.
    pub fn new() -> Self {
        Self {
            method: PlannerMethod::default(),
            matrix_method: MatrixMethod::default(),
            shots: 5,
            seed: None,
        }
    }

    /// Set the planner strategy.
    #[must_use]
    pub fn with_method(mut self, method: PlannerMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the dependency-matrix method.
    #[must_use]
    pub fn with_matrix_method(mut self, method: MatrixMethod) -> Self {
        self.matrix_method = method;
        self
    }

    /// Set the random planner's trial count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the random planner's seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The result of compiling a static circuit into a dynamic one.
#[derive(Debug, Clone)]
pub struct Reduction {
    /// The compiled dynamic circuit, over physical wire indices.
    pub circuit: Circuit,
    /// Logical-to-physical wire mapping.
    pub layout: Layout,
    /// The plan the planner committed.
    pub plan: ReusePlan,
    /// Width of the input circuit.
    pub original_width: usize,
}

impl Reduction {
    /// Width of the compiled circuit.
    pub fn width(&self) -> usize {
        self.circuit.width()
    }

    /// Fraction of wires eliminated: `1 − w'/w`.
    pub fn reducibility_factor(&self) -> f64 {
        if self.original_width == 0 {
            return 0.0;
        }
        1.0 - self.width() as f64 / self.original_width as f64
    }
}

/// Compile a static circuit into an equivalent dynamic circuit of minimal
/// width under the selected planner.
///
/// The input is left untouched; [`reduce_in_place`] is the committing
/// wrapper. The pipeline is: lower to the per-wire DAG, derive the
/// dependency matrices, plan reuse, re-linearize, then compact wire
/// indices onto the physical register.
#[instrument(skip_all, fields(circuit = circuit.name(), method = options.method.name()))]
pub fn reduce(circuit: &Circuit, options: &ReduceOptions) -> CompileResult<Reduction> {
    let dag = circuit.to_dag(true)?;
    let (biadjacency, _candidate) = biadjacency_and_candidate(&dag, options.matrix_method);
    let cones = CausalCones::from_biadjacency(&biadjacency, &dag);

    let mut planner = options.method.planner(options.shots, options.seed);
    let plan = planner.plan(&cones);
    debug!(
        planner = planner.name(),
        edges = plan.reuse_count(),
        "planner committed reuse edges"
    );

    let (history, layout) = relinearize(&dag, &plan, circuit.next_signature())?;

    let mut compiled = circuit.clone();
    compiled.replace_history(history);
    compiled.remap_indices(&layout.to_remap());

    info!(
        original_width = circuit.width(),
        compiled_width = compiled.width(),
        "circuit reduced"
    );
    Ok(Reduction {
        circuit: compiled,
        layout,
        plan,
        original_width: circuit.width(),
    })
}

/// In-place wrapper around [`reduce`]; the circuit is only replaced on
/// success.
pub fn reduce_in_place(circuit: &mut Circuit, options: &ReduceOptions) -> CompileResult<Layout> {
    let reduction = reduce(circuit, options)?;
    *circuit = reduction.circuit;
    Ok(reduction.layout)
}
