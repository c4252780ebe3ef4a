//! Local dent for the hollow interior shell.

use glam::Vec3;
use tracing::debug;

use crate::assembler::{normals, relocate_vertices};
use crate::graph::NodeGraph;
use crate::types::{MeshOutput, NormalMode};

/// A node moved by an interior impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
  pub node: u32,
  pub from: Vec3,
  pub to: Vec3,
  /// Mesh vertices that sat on the old position (duplicates included).
  pub vertices_moved: usize,
}

/// Move the node nearest to `point` by `force / attenuator`.
///
/// Every mesh vertex at the node's old position follows it, triangles are
/// left alone and normals are recomputed. `attenuator` must be positive.
pub fn impact_effect(
  graph: &mut NodeGraph,
  mesh: &mut MeshOutput,
  point: Vec3,
  force: Vec3,
  attenuator: f32,
  normal_mode: NormalMode,
) -> Option<Displacement> {
  let node = graph.nearest(point, 0..graph.len() as u32, None)?;
  let from = graph.position(node);
  let to = from + force / attenuator;

  let vertices_moved = relocate_vertices(mesh, from, to);
  graph.set_position(node, to);
  normals::recalculate(mesh, normal_mode);

  debug!(node, ?from, ?to, vertices_moved, "displaced node");
  Some(Displacement {
    node,
    from,
    to,
    vertices_moved,
  })
}

#[cfg(test)]
#[path = "interior_test.rs"]
mod interior_test;
