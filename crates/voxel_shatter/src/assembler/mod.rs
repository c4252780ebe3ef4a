//! Mesh assembly from cube cells and a face table.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  graph: NodeGraph        - node positions + active flags        │
//! │  lattice: CubeLattice    - per-cell configuration byte          │
//! │  table: [CellFaces; 256] - interior or exterior face groups     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PASS 1: Geometry                             │
//! │  Clear buffers and every node's vertex slot                     │
//! │  For each cell, for each face group of table[configuration]:    │
//! │    Fan the face into triangles                                  │
//! │    Reuse the corner node's vertex, or append one                │
//! │    Sealed face: reset the cell's 8 vertex slots                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PASS 2: Normals                              │
//! │  Area or angle weighted average of face normals                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Vertex Sharing
//!
//! A node keeps its vertex across the faces and cells that touch it until a
//! sealed face of one of those cells resets it. The next face then appends a
//! duplicate vertex at the same position, which gives a hard edge between the
//! two face groups while unreset neighbors still share.

pub mod normals;

use glam::Vec3;

use crate::constants::NO_VERTEX;
use crate::graph::NodeGraph;
use crate::lattice::CubeLattice;
use crate::tables::CellFaces;
use crate::types::{MeshOutput, NormalMode, Vertex};

/// Per-node vertex slot for the current build. `NO_VERTEX` = unassigned.
#[derive(Clone, Debug, Default)]
struct VertexCache {
  slots: Vec<i32>,
}

impl VertexCache {
  fn reset_all(&mut self, node_count: usize) {
    self.slots.clear();
    self.slots.resize(node_count, NO_VERTEX);
  }

  #[inline]
  fn reset(&mut self, nodes: &[u32; 8]) {
    for &node in nodes {
      self.slots[node as usize] = NO_VERTEX;
    }
  }

  /// Vertex index of `node`, appending its position on first use.
  #[inline]
  fn get_or_insert(&mut self, node: u32, graph: &NodeGraph, output: &mut MeshOutput) -> u32 {
    let slot = &mut self.slots[node as usize];
    if *slot == NO_VERTEX {
      *slot = output.vertices.len() as i32;
      output
        .vertices
        .push(Vertex::new(graph.position(node).to_array()));
    }
    *slot as u32
  }
}

/// Rebuilds a mesh from scratch. Keeps its vertex cache allocation between
/// builds.
#[derive(Clone, Debug, Default)]
pub struct MeshAssembler {
  cache: VertexCache,
}

impl MeshAssembler {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear `output` and regenerate it for every active cell.
  #[cfg_attr(feature = "trace-spans", tracing::instrument(skip_all, name = "assembler::build"))]
  pub fn build(
    &mut self,
    graph: &NodeGraph,
    lattice: &CubeLattice,
    table: &[CellFaces; 256],
    normal_mode: NormalMode,
    output: &mut MeshOutput,
  ) {
    output.clear();
    self.cache.reset_all(graph.len());

    for cell in lattice.active_cells() {
      let entry = &table[lattice.configuration(cell) as usize];
      if entry.is_empty() {
        continue;
      }

      let nodes = lattice.corner_nodes(cell);
      for face in entry.faces() {
        for tri in face.triangles() {
          for corner in tri {
            let index = self
              .cache
              .get_or_insert(nodes[corner.bit() as usize], graph, output);
            output.indices.push(index);
          }
        }
        if face.is_sealed() {
          self.cache.reset(&nodes);
        }
      }
    }

    output.recompute_bounds();
    normals::recalculate(output, normal_mode);
  }
}

/// Move every vertex sitting exactly at `from` to `to`. Returns how many moved.
pub fn relocate_vertices(output: &mut MeshOutput, from: Vec3, to: Vec3) -> usize {
  let from = from.to_array();
  let to = to.to_array();
  let mut moved = 0;

  for vertex in &mut output.vertices {
    if vertex.position == from {
      vertex.position = to;
      moved += 1;
    }
  }

  if moved > 0 {
    output.recompute_bounds();
  }
  moved
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
