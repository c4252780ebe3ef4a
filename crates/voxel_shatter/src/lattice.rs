//! Cube cells over the node graph.
//!
//! Each cell is the unit cube anchored at its front-low-left node and caches
//! the configuration byte of its 8 corners. Corner nodes are found by offset
//! from the anchor, so cells hold no references into the graph.

use smallvec::SmallVec;

use crate::constants::{cell_dims, coord_to_index};
use crate::corner::{configuration, Corner};
use crate::graph::NodeGraph;

#[derive(Clone, Debug)]
pub struct CubeLattice {
  node_dims: [usize; 3],
  cell_dims: [usize; 3],
  anchors: Vec<u32>,
  configurations: Vec<u8>,
}

impl CubeLattice {
  /// One cell per unit cube, configurations computed from the graph.
  pub fn new(graph: &NodeGraph) -> Self {
    let node_dims = graph.dims();
    let cell_dims = cell_dims(node_dims);

    let mut anchors = Vec::with_capacity(cell_dims[0] * cell_dims[1] * cell_dims[2]);
    for x in 0..cell_dims[0] {
      for y in 0..cell_dims[1] {
        for z in 0..cell_dims[2] {
          anchors.push(coord_to_index(x, y, z, node_dims) as u32);
        }
      }
    }

    let mut lattice = Self {
      node_dims,
      cell_dims,
      configurations: vec![0; anchors.len()],
      anchors,
    };
    lattice.refresh_all(graph);
    lattice
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.anchors.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.anchors.is_empty()
  }

  #[inline]
  pub fn cell_dims(&self) -> [usize; 3] {
    self.cell_dims
  }

  /// Front-low-left node of `cell`.
  #[inline]
  pub fn anchor(&self, cell: usize) -> u32 {
    self.anchors[cell]
  }

  #[inline]
  pub fn configuration(&self, cell: usize) -> u8 {
    self.configurations[cell]
  }

  /// A cell is active when any corner is.
  #[inline]
  pub fn is_active(&self, cell: usize) -> bool {
    self.configurations[cell] != 0
  }

  pub fn active_cells(&self) -> impl Iterator<Item = usize> + '_ {
    (0..self.len()).filter(|&cell| self.is_active(cell))
  }

  #[inline]
  pub fn corner_node(&self, cell: usize, corner: Corner) -> u32 {
    self.anchors[cell] + corner.lattice_offset(self.node_dims) as u32
  }

  /// Corner nodes indexed by corner bit.
  pub fn corner_nodes(&self, cell: usize) -> [u32; 8] {
    Corner::ALL.map(|corner| self.corner_node(cell, corner))
  }

  pub fn refresh_all(&mut self, graph: &NodeGraph) {
    for cell in 0..self.len() {
      self.refresh_cell(graph, cell);
    }
  }

  pub fn refresh_cell(&mut self, graph: &NodeGraph, cell: usize) {
    let nodes = self.corner_nodes(cell);
    self.configurations[cell] = configuration(nodes.map(|node| graph.is_active(node)));
  }

  /// Recompute the (up to 8) cells that have `node` as a corner.
  pub fn refresh_around(&mut self, graph: &NodeGraph, node: u32) {
    for cell in self.cells_containing(graph, node) {
      self.refresh_cell(graph, cell);
    }
  }

  /// Cells that have `node` as one of their corners.
  pub fn cells_containing(&self, graph: &NodeGraph, node: u32) -> SmallVec<[usize; 8]> {
    let [x, y, z] = graph.coord(node);
    let mut cells = SmallVec::new();

    for cx in x.saturating_sub(1)..=x.min(self.cell_dims[0] - 1) {
      for cy in y.saturating_sub(1)..=y.min(self.cell_dims[1] - 1) {
        for cz in z.saturating_sub(1)..=z.min(self.cell_dims[2] - 1) {
          cells.push(coord_to_index(cx, cy, cz, self.cell_dims));
        }
      }
    }

    cells
  }
}

#[cfg(test)]
#[path = "lattice_test.rs"]
mod lattice_test;
