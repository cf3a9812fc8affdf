//! The circuit orchestrator: owns the components and drives each time step.

use tracing::{debug, debug_span, trace};

use crate::components::Component;
use crate::error::{ensure_positive, Result, SimError};
use crate::solver::{Matrix, Plu};

use super::validate::validate_circuit;
use super::{ComponentId, NodeId, NodeSet, Phase, SimulationConfig};

/// A linear circuit and its transient simulation state.
///
/// Lifecycle: add components, set the clock, [`initialize`](Circuit::initialize)
/// once, then call [`step`](Circuit::step) until it returns `true`. Adding a
/// component at any point sends the circuit back to [`Phase::Building`].
pub struct Circuit {
    /// Maximum number of components
    capacity: usize,
    /// Components in insertion order
    components: Vec<Box<dyn Component>>,
    /// Node ids in use and the reference node
    nodes: NodeSet,
    time_step: Option<f64>,
    stop_time: Option<f64>,
    /// Simulation clock
    time: f64,
    phase: Phase,
    /// Conductance matrix, assembled once per initialize
    system: Matrix<f64>,
    /// Source vector, rebuilt every step
    rhs: Matrix<f64>,
    /// Normalized node voltages from the last step
    solution: Matrix<f64>,
    /// Factorization of the system matrix
    plu: Option<Plu<f64>>,
}

impl Circuit {
    /// Create an empty circuit with room for `capacity` components.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidCapacity);
        }
        Ok(Self {
            capacity,
            components: Vec::with_capacity(capacity),
            nodes: NodeSet::new(),
            time_step: None,
            stop_time: None,
            time: 0.0,
            phase: Phase::Building,
            system: Matrix::empty(),
            rhs: Matrix::empty(),
            solution: Matrix::empty(),
            plu: None,
        })
    }

    /// Create an empty circuit with its clock already configured.
    pub fn with_config(capacity: usize, config: SimulationConfig) -> Result<Self> {
        let mut circuit = Self::new(capacity)?;
        circuit.configure(config)?;
        Ok(circuit)
    }

    /// Add a component and return its index.
    pub fn add_component(&mut self, component: impl Component + 'static) -> Result<ComponentId> {
        self.add_boxed(Box::new(component))
    }

    /// Add an already boxed component and return its index.
    pub fn add_boxed(&mut self, component: Box<dyn Component>) -> Result<ComponentId> {
        if self.components.len() == self.capacity {
            return Err(SimError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.nodes.register(&*component)?;

        // We are changing the circuit
        self.invalidate();

        let id = ComponentId(self.components.len());
        debug!(
            component = %id,
            kind = component.kind(),
            source = %component.node_source(),
            destination = %component.node_destination(),
            "added component"
        );
        self.components.push(component);
        Ok(id)
    }

    /// Set the stop time. Takes effect without re-initializing.
    pub fn set_stop_time(&mut self, stop_time: f64) -> Result<()> {
        self.stop_time = Some(ensure_positive("stop_time", stop_time)?);
        Ok(())
    }

    /// Set the integration step. The conductance stamps depend on it, so an
    /// initialized circuit must be initialized again.
    pub fn set_time_step(&mut self, time_step: f64) -> Result<()> {
        let time_step = ensure_positive("time_step", time_step)?;
        if self.time_step != Some(time_step) {
            self.invalidate();
        }
        self.time_step = Some(time_step);
        Ok(())
    }

    /// Apply both clock settings.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.set_time_step(config.time_step)?;
        self.set_stop_time(config.stop_time)
    }

    fn invalidate(&mut self) {
        self.phase = Phase::Building;
        self.plu = None;
    }

    /// Validate the topology, assemble and factor the system matrix, and
    /// reset the clock to 0.
    pub fn initialize(&mut self) -> Result<()> {
        let _span = debug_span!("initialize", components = self.components.len()).entered();

        // Any failure below leaves the circuit in Building
        self.invalidate();

        let n = validate_circuit(&self.nodes, self.time_step, self.stop_time)?;
        let time_step = self.time_step.ok_or(SimError::InvalidTiming {
            time_step: 0.0,
            stop_time: self.stop_time.unwrap_or(0.0),
        })?;

        self.system = Matrix::new(n, n)?;
        self.rhs = Matrix::new(n, 1)?;
        self.solution = Matrix::new(n, 1)?;

        for component in &mut self.components {
            component.stamp_conductance(&mut self.system, time_step)?;
        }

        let plu = Plu::new(&self.system)?;
        trace!("system matrix:\n{}", self.system);
        trace!("L:\n{}", plu.l());
        trace!("U:\n{}", plu.u());
        trace!("P: {:?}", plu.p());
        trace!("Q: {:?}", plu.q());

        debug!(
            size = n,
            reference = ?self.nodes.reference(),
            time_step,
            stop_time = ?self.stop_time,
            "circuit initialized"
        );

        self.plu = Some(plu);
        self.time = 0.0;
        self.phase = Phase::Initialized;
        Ok(())
    }

    /// Advance the simulation by one time step.
    ///
    /// Returns `true` once the clock has reached the stop time.
    pub fn step(&mut self) -> Result<bool> {
        let plu = match (self.phase, self.plu.as_ref()) {
            (Phase::Initialized | Phase::Running, Some(plu)) => plu,
            _ => return Err(SimError::NotInitialized),
        };
        let reference = self.nodes.reference().ok_or(SimError::MissingReference)?;
        let time_step = self.time_step.unwrap_or_default();
        let next = self.time + time_step;
        if next <= self.time {
            return Err(SimError::ClockStalled {
                time: self.time,
                time_step,
            });
        }

        // The source vector is rebuilt every step
        self.rhs.clear();
        for component in &mut self.components {
            component.stamp_source(&mut self.rhs)?;
        }

        let mut solution = plu.solve(&self.rhs)?;

        // Shift everything so the reference node reads exactly 0
        let offset = solution.get(reference.index(), 0)?;
        if offset != 0.0 {
            for i in 0..solution.rows() {
                solution.add(i, 0, -offset)?;
            }
        }

        for component in &mut self.components {
            component.update_state(&solution)?;
        }

        self.solution = solution;
        self.time = next;
        self.phase = Phase::Running;

        trace!(time = self.time, "source vector:\n{}", self.rhs);
        trace!(time = self.time, "node voltages:\n{}", self.solution);

        Ok(self.time >= self.stop_time.unwrap_or_default())
    }

    /// Step until the simulation completes and return the number of steps taken.
    ///
    /// Stops with [`SimError::ClockStalled`] if the time step no longer
    /// advances the clock.
    pub fn run(&mut self) -> Result<usize> {
        let mut steps = 0;
        loop {
            steps += 1;
            if self.step()? {
                debug!(steps, time = self.time, "simulation complete");
                return Ok(steps);
            }
        }
    }

    /// Current simulation time; 0 until the first step.
    pub fn time(&self) -> f64 {
        self.time
    }

    fn ensure_run(&self) -> Result<()> {
        if self.phase != Phase::Running {
            return Err(SimError::NotRun);
        }
        Ok(())
    }

    /// Voltage at `node` relative to the reference node after the last step.
    pub fn voltage(&self, node: NodeId) -> Result<f64> {
        let limit = self.nodes.max_node().map_or(0, |max| max.index() + 1);
        if node.index() >= limit {
            return Err(SimError::InvalidIndex {
                what: "node",
                index: node.index(),
                limit,
            });
        }
        self.ensure_run()?;
        self.solution.get(node.index(), 0)
    }

    /// All node voltages after the last step, indexed by node id.
    pub fn voltages(&self) -> Result<Vec<f64>> {
        self.ensure_run()?;
        Ok(self.solution.column_values())
    }

    /// Current through the component at `id` after the last step.
    pub fn current(&self, id: ComponentId) -> Result<f64> {
        let component = self.component(id)?;
        self.ensure_run()?;
        Ok(component.current())
    }

    /// The component at `id`.
    pub fn component(&self, id: ComponentId) -> Result<&dyn Component> {
        self.components
            .get(id.index())
            .map(|c| &**c)
            .ok_or(SimError::InvalidIndex {
                what: "component",
                index: id.index(),
                limit: self.components.len(),
            })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of components added so far.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of distinct node ids in use.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn reference_node(&self) -> Option<NodeId> {
        self.nodes.reference()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_step(&self) -> Option<f64> {
        self.time_step
    }

    pub fn stop_time(&self) -> Option<f64> {
        self.stop_time
    }

    /// The assembled system matrix; empty before the first initialize.
    pub fn system_matrix(&self) -> &Matrix<f64> {
        &self.system
    }

    /// The cached factorization, present while the circuit is initialized.
    pub fn factorization(&self) -> Option<&Plu<f64>> {
        self.plu.as_ref()
    }
}

impl std::fmt::Debug for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Circuit")
            .field("capacity", &self.capacity)
            .field("components", &self.components)
            .field("reference", &self.nodes.reference())
            .field("phase", &self.phase)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}
