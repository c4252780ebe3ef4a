//! Impact-driven mutation of the node graph.
//!
//! ```text
//!                 remove (nearest active)
//!   ┌──────────┐ ───────────────────────────▶ ┌─────────────┐
//!   │  Active  │                              │ Deactivated │
//!   └──────────┘ ◀─────────────────────────── └─────────────┘
//!     ▲      │     add (nearest deactivated
//!     │      │          within 2 spacings)
//!  neighbor  │ neighbor of an added node,
//!  removed   │ fully surrounded and not
//!     │      ▼ touching a deactivated node
//!   ┌───────────┐
//!   │ Activable │
//!   └───────────┘
//! ```
//!
//! The exterior engine walks this state machine and leaves the rebuild to
//! the caller. The interior engine has no states and only moves a node.

mod exterior;
mod interior;

pub use exterior::ExteriorEngine;
pub use interior::{impact_effect, Displacement};

use glam::Vec3;

/// Classification of a node in the exterior variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeState {
  /// Currently solid.
  Active,
  /// Not solid, may be turned solid to close the shell.
  Activable,
  /// Was solid and got removed by an impact.
  Deactivated,
}

impl NodeState {
  pub const ALL: [NodeState; 3] = [NodeState::Active, NodeState::Activable, NodeState::Deactivated];

  #[inline]
  const fn slot(self) -> usize {
    match self {
      NodeState::Active => 0,
      NodeState::Activable => 1,
      NodeState::Deactivated => 2,
    }
  }
}

/// Exactly one state per node, plus running counts per state.
///
/// Storing the state per node makes the three sets disjoint and exhaustive by
/// construction; the counts are kept for O(1) set sizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSets {
  states: Vec<NodeState>,
  counts: [usize; 3],
}

impl NodeSets {
  /// Active flags become `Active`, everything else `Activable`.
  pub fn classify(active: impl IntoIterator<Item = bool>) -> Self {
    let states: Vec<NodeState> = active
      .into_iter()
      .map(|a| if a { NodeState::Active } else { NodeState::Activable })
      .collect();

    let mut counts = [0; 3];
    for state in &states {
      counts[state.slot()] += 1;
    }

    Self { states, counts }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.states.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  #[inline]
  pub fn state(&self, node: u32) -> NodeState {
    self.states[node as usize]
  }

  #[inline]
  pub fn contains(&self, state: NodeState, node: u32) -> bool {
    self.states[node as usize] == state
  }

  /// Move `node` to `state`. Returns the previous state.
  pub fn transition(&mut self, node: u32, state: NodeState) -> NodeState {
    let previous = std::mem::replace(&mut self.states[node as usize], state);
    self.counts[previous.slot()] -= 1;
    self.counts[state.slot()] += 1;
    previous
  }

  #[inline]
  pub fn count(&self, state: NodeState) -> usize {
    self.counts[state.slot()]
  }

  /// Nodes in `state`, ascending.
  pub fn iter(&self, state: NodeState) -> impl Iterator<Item = u32> + '_ {
    self
      .states
      .iter()
      .enumerate()
      .filter(move |(_, &s)| s == state)
      .map(|(i, _)| i as u32)
  }

  /// Counts add up to the node count and match a fresh recount.
  pub fn partition_holds(&self) -> bool {
    let mut recount = [0; 3];
    for state in &self.states {
      recount[state.slot()] += 1;
    }
    recount == self.counts && self.counts.iter().sum::<usize>() == self.states.len()
  }
}

/// How an exterior impact acts on the shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImpactKind {
  /// Knock out the nearest active node.
  #[default]
  Remove,
  /// Refill the nearest deactivated node on the side the force points to.
  Add,
}

/// What an impact did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImpactOutcome {
  Removed { node: u32 },
  Added { node: u32 },
  Displaced { node: u32, from: Vec3, to: Vec3 },
  /// Nothing in range to act on. Not an error.
  NoCandidate,
}

impl ImpactOutcome {
  /// Node the impact acted on, if any.
  pub fn node(&self) -> Option<u32> {
    match *self {
      ImpactOutcome::Removed { node }
      | ImpactOutcome::Added { node }
      | ImpactOutcome::Displaced { node, .. } => Some(node),
      ImpactOutcome::NoCandidate => None,
    }
  }
}
