//! Remove / add state machine for the solid exterior shell.

use glam::Vec3;
use tracing::debug;

use super::{ImpactOutcome, NodeSets, NodeState};
use crate::constants::{ADD_BIAS_FACTOR, ADD_SEARCH_FACTOR, MAX_NEIGHBORS};
use crate::graph::{Neighbors, NodeGraph};
use crate::lattice::CubeLattice;

/// Node classification plus the exterior impact rules.
///
/// Every transition updates the node's active flag and the configurations of
/// the cells around it; rebuilding the mesh is up to the caller.
#[derive(Clone, Debug)]
pub struct ExteriorEngine {
  sets: NodeSets,
}

impl ExteriorEngine {
  /// Classify the graph: active nodes are `Active`, the rest `Activable`.
  pub fn new(graph: &NodeGraph) -> Self {
    let sets = NodeSets::classify((0..graph.len() as u32).map(|node| graph.is_active(node)));
    Self { sets }
  }

  #[inline]
  pub fn sets(&self) -> &NodeSets {
    &self.sets
  }

  /// Knock out the active node nearest to `point` and promote its activable
  /// neighbors so the hole gets a wall on the next rebuild.
  ///
  /// The search is unbounded. Returns `NoCandidate` only when nothing is
  /// active any more.
  pub fn remove_effect(
    &mut self,
    graph: &mut NodeGraph,
    lattice: &mut CubeLattice,
    point: Vec3,
  ) -> ImpactOutcome {
    let Some(node) = graph.nearest(point, self.sets.iter(NodeState::Active), None) else {
      debug!(?point, "remove impact found no active node");
      return ImpactOutcome::NoCandidate;
    };

    self.set_state(graph, lattice, node, NodeState::Deactivated);

    let mut promoted = 0;
    let neighbors = Neighbors::from(graph.neighbors(node));
    for neighbor in neighbors {
      if self.sets.contains(NodeState::Activable, neighbor) {
        self.set_state(graph, lattice, neighbor, NodeState::Active);
        promoted += 1;
      }
    }

    debug!(
      node,
      promoted,
      active = self.sets.count(NodeState::Active),
      deactivated = self.sets.count(NodeState::Deactivated),
      "removed node"
    );
    ImpactOutcome::Removed { node }
  }

  /// Refill the deactivated node nearest to the point biased along `force`,
  /// within `ADD_SEARCH_FACTOR` spacings. Active neighbors that end up fully
  /// enclosed are demoted to `Activable`.
  pub fn add_effect(
    &mut self,
    graph: &mut NodeGraph,
    lattice: &mut CubeLattice,
    point: Vec3,
    force: Vec3,
  ) -> ImpactOutcome {
    let spacing = graph.spacing();
    let bias = point + force.normalize_or_zero() * (ADD_BIAS_FACTOR * spacing);

    let found = if self.sets.count(NodeState::Deactivated) == 0 {
      None
    } else {
      let sets = &self.sets;
      graph.nearest_in_window(bias, ADD_SEARCH_FACTOR * spacing, |node| {
        sets.contains(NodeState::Deactivated, node)
      })
    };

    let Some(node) = found else {
      debug!(?point, ?bias, "add impact found no deactivated node in range");
      return ImpactOutcome::NoCandidate;
    };

    self.set_state(graph, lattice, node, NodeState::Active);

    let mut demoted = 0;
    let neighbors = Neighbors::from(graph.neighbors(node));
    for neighbor in neighbors {
      if self.sets.contains(NodeState::Active, neighbor) && self.check_activable(graph, neighbor) {
        self.set_state(graph, lattice, neighbor, NodeState::Activable);
        demoted += 1;
      }
    }

    debug!(
      node,
      demoted,
      active = self.sets.count(NodeState::Active),
      deactivated = self.sets.count(NodeState::Deactivated),
      "added node"
    );
    ImpactOutcome::Added { node }
  }

  /// Whether `node` can stop being active: none of its neighbors is
  /// deactivated and all 6 are active or activable. Boundary nodes have fewer
  /// than 6 neighbors and never qualify.
  pub fn check_activable(&self, graph: &NodeGraph, node: u32) -> bool {
    let mut count = 0;
    for &neighbor in graph.neighbors(node) {
      match self.sets.state(neighbor) {
        NodeState::Deactivated => return false,
        NodeState::Active | NodeState::Activable => count += 1,
      }
    }
    count == MAX_NEIGHBORS
  }

  /// Force `node` into `state`, keeping the graph flag and the lattice in
  /// sync.
  pub fn set_state(
    &mut self,
    graph: &mut NodeGraph,
    lattice: &mut CubeLattice,
    node: u32,
    state: NodeState,
  ) {
    self.sets.transition(node, state);
    let active = state == NodeState::Active;
    if graph.is_active(node) != active {
      graph.set_active(node, active);
      lattice.refresh_around(graph, node);
    }
  }
}

#[cfg(test)]
#[path = "exterior_test.rs"]
mod exterior_test;
