//! VoxelShell - owning context for one meshed occupancy grid.
//!
//! A shell owns its node graph, cube lattice, mesh buffers and (for the
//! exterior variant) the node classification. Hosts create as many shells as
//! they need and pass them around explicitly; there is no global instance.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use tracing::{debug, trace, warn};
use web_time::Instant;

use crate::assembler::MeshAssembler;
use crate::error::{Result, ShatterError};
use crate::graph::NodeGraph;
use crate::grid::OccupancyGrid;
use crate::lattice::CubeLattice;
use crate::metrics::ShellMetrics;
use crate::mutation::{
  impact_effect, ExteriorEngine, ImpactKind, ImpactOutcome, NodeSets, NodeState,
};
use crate::tables::TableKind;
use crate::types::{MeshOutput, ShellConfig, ShellVariant};

// =============================================================================
// ShellId - unique identifier
// =============================================================================

/// Atomic counter for generating unique ShellIds.
static SHELL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque shell identifier, unique within the process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ShellId(u64);

impl ShellId {
  pub fn new() -> Self {
    Self(SHELL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for ShellId {
  fn default() -> Self {
    Self::new()
  }
}

// =============================================================================
// VoxelShell - per-shell state container
// =============================================================================

/// Impact handling selected by the variant.
#[derive(Clone, Debug)]
enum Engine {
  Interior { attenuator: f32 },
  Exterior(ExteriorEngine),
}

/// A triangulated shell over an occupancy grid.
///
/// # Lifecycle
///
/// - [`VoxelShell::build_from_grid`] builds the graph and the first mesh.
/// - [`VoxelShell::apply_impact`] mutates it. The exterior variant rebuilds
///   the mesh after every change, the interior variant moves vertices in
///   place.
/// - [`VoxelShell::mesh`] is valid until the next mutating call.
#[derive(Debug)]
pub struct VoxelShell {
  id: ShellId,
  config: ShellConfig,
  graph: NodeGraph,
  lattice: CubeLattice,
  assembler: MeshAssembler,
  mesh: MeshOutput,
  engine: Engine,
  metrics: ShellMetrics,
}

impl VoxelShell {
  /// Validate `config`, build the node graph from `grid` and mesh it.
  #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all, name = "shell::build_from_grid"))]
  pub fn build_from_grid(grid: &OccupancyGrid, config: ShellConfig) -> Result<Self> {
    config.validate()?;

    let mut graph = NodeGraph::build(grid, config.spacing)?;
    let engine = match config.variant {
      ShellVariant::Interior { attenuator } => Engine::Interior { attenuator },
      ShellVariant::Exterior => {
        graph.link_neighbors();
        Engine::Exterior(ExteriorEngine::new(&graph))
      }
    };
    let lattice = CubeLattice::new(&graph);

    let mut shell = Self {
      id: ShellId::new(),
      config,
      graph,
      lattice,
      assembler: MeshAssembler::new(),
      mesh: MeshOutput::new(),
      engine,
      metrics: ShellMetrics::new(),
    };
    shell.rebuild();

    debug!(
      id = shell.id.raw(),
      dims = ?grid.dims(),
      variant = ?shell.config.variant,
      nodes = shell.graph.len(),
      triangles = shell.mesh.triangle_count(),
      "built shell"
    );
    Ok(shell)
  }

  /// Regenerate the mesh from the current node states.
  #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all, name = "shell::rebuild"))]
  pub fn rebuild(&mut self) {
    let start = Instant::now();
    let table = self.table_kind().table();
    self.assembler.build(
      &self.graph,
      &self.lattice,
      table,
      self.config.normal_mode,
      &mut self.mesh,
    );
    let elapsed_us = start.elapsed().as_micros() as u64;

    let vertices = self.mesh.vertices.len();
    let triangles = self.mesh.triangle_count();
    self.metrics.record_build(elapsed_us, vertices, triangles);
    trace!(id = self.id.raw(), vertices, triangles, elapsed_us, "rebuilt mesh");
  }

  /// Default impact: removal for the exterior variant, displacement for the
  /// interior one.
  pub fn apply_impact(&mut self, point: Vec3, force: Vec3) -> ImpactOutcome {
    self.apply_impact_kind(point, force, ImpactKind::Remove)
  }

  /// Apply one impact. `kind` only matters for the exterior variant.
  ///
  /// An impact with nothing to act on, or with a non-finite point or force,
  /// returns [`ImpactOutcome::NoCandidate`] and leaves the shell untouched.
  #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all, name = "shell::apply_impact"))]
  pub fn apply_impact_kind(&mut self, point: Vec3, force: Vec3, kind: ImpactKind) -> ImpactOutcome {
    if !point.is_finite() || !force.is_finite() {
      warn!(id = self.id.raw(), ?point, ?force, "ignoring non-finite impact");
      self.metrics.record_impact(&ImpactOutcome::NoCandidate);
      return ImpactOutcome::NoCandidate;
    }

    let outcome = match &mut self.engine {
      Engine::Interior { attenuator } => {
        let displaced = impact_effect(
          &mut self.graph,
          &mut self.mesh,
          point,
          force,
          *attenuator,
          self.config.normal_mode,
        );
        match displaced {
          Some(d) => ImpactOutcome::Displaced {
            node: d.node,
            from: d.from,
            to: d.to,
          },
          None => ImpactOutcome::NoCandidate,
        }
      }
      Engine::Exterior(engine) => match kind {
        ImpactKind::Remove => {
          let direction = -force.normalize_or_zero();
          debug!(?direction, "remove impact");
          engine.remove_effect(&mut self.graph, &mut self.lattice, point)
        }
        ImpactKind::Add => engine.add_effect(&mut self.graph, &mut self.lattice, point, force),
      },
    };

    if self.config.variant.is_exterior() && outcome != ImpactOutcome::NoCandidate {
      self.rebuild();
    }
    self.metrics.record_impact(&outcome);
    debug!(id = self.id.raw(), ?point, ?kind, ?outcome, "applied impact");
    outcome
  }

  /// Force the 8 corners of one cell, indexed by corner bit, and rebuild.
  ///
  /// In the exterior variant set corners become active and cleared corners
  /// activable, whatever their previous state.
  pub fn set_cell_corners(&mut self, cell: usize, corners: [bool; 8]) -> Result<()> {
    if cell >= self.lattice.len() {
      return Err(ShatterError::CellOutOfRange {
        cell,
        cells: self.lattice.len(),
      });
    }

    let nodes = self.lattice.corner_nodes(cell);
    for (&node, &active) in nodes.iter().zip(corners.iter()) {
      match &mut self.engine {
        Engine::Exterior(engine) => {
          let state = if active {
            NodeState::Active
          } else {
            NodeState::Activable
          };
          engine.set_state(&mut self.graph, &mut self.lattice, node, state);
        }
        Engine::Interior { .. } => {
          self.graph.set_active(node, active);
          self.lattice.refresh_around(&self.graph, node);
        }
      }
    }

    self.rebuild();
    Ok(())
  }

  #[inline]
  pub fn id(&self) -> ShellId {
    self.id
  }

  #[inline]
  pub fn config(&self) -> &ShellConfig {
    &self.config
  }

  #[inline]
  pub fn variant(&self) -> ShellVariant {
    self.config.variant
  }

  #[inline]
  pub fn mesh(&self) -> &MeshOutput {
    &self.mesh
  }

  #[inline]
  pub fn graph(&self) -> &NodeGraph {
    &self.graph
  }

  #[inline]
  pub fn lattice(&self) -> &CubeLattice {
    &self.lattice
  }

  /// Node classification; `None` for the interior variant.
  pub fn node_sets(&self) -> Option<&NodeSets> {
    match &self.engine {
      Engine::Exterior(engine) => Some(engine.sets()),
      Engine::Interior { .. } => None,
    }
  }

  #[inline]
  pub fn metrics(&self) -> &ShellMetrics {
    &self.metrics
  }

  #[inline]
  pub fn metrics_mut(&mut self) -> &mut ShellMetrics {
    &mut self.metrics
  }

  fn table_kind(&self) -> TableKind {
    match self.config.variant {
      ShellVariant::Interior { .. } => TableKind::Interior,
      ShellVariant::Exterior => TableKind::Exterior,
    }
  }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;
