//! Control node arena.
//!
//! One node per lattice point, stored in the grid's x-major / z-fastest order
//! and referred to by `u32` index. Positions are centered on the origin:
//!
//! ```text
//! position(x, y, z) = ([x, y, z] - (dims - 1) / 2) * spacing
//! ```
//!
//! Neighbor lists are only built for the exterior variant (see
//! [`NodeGraph::link_neighbors`]).

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::{
  coord_to_index, index_to_coord, DISTANCE_EPSILON, MAX_NEIGHBORS, NEIGHBOR_RADIUS_FACTOR,
};
use crate::error::{Result, ShatterError};
use crate::grid::OccupancyGrid;

/// Up to 6 neighbor indices in ascending order.
pub type Neighbors = SmallVec<[u32; MAX_NEIGHBORS]>;

#[derive(Clone, Debug)]
pub struct NodeGraph {
  dims: [usize; 3],
  spacing: f32,
  positions: Vec<Vec3>,
  active: Vec<bool>,
  neighbors: Vec<Neighbors>,
}

impl NodeGraph {
  /// One node per grid point, `active` copied from the occupancy.
  pub fn build(grid: &OccupancyGrid, spacing: f32) -> Result<Self> {
    if !spacing.is_finite() || spacing <= 0.0 {
      return Err(ShatterError::InvalidSpacing(spacing));
    }

    let dims = grid.dims();
    if dims.iter().any(|&d| d < 2) {
      return Err(ShatterError::InvalidDimensions { dims });
    }

    let center = Vec3::new(
      (dims[0] - 1) as f32,
      (dims[1] - 1) as f32,
      (dims[2] - 1) as f32,
    ) * 0.5;

    let positions = (0..grid.len())
      .map(|i| {
        let [x, y, z] = index_to_coord(i, dims);
        (Vec3::new(x as f32, y as f32, z as f32) - center) * spacing
      })
      .collect();

    Ok(Self {
      dims,
      spacing,
      positions,
      active: grid.as_slice().to_vec(),
      neighbors: Vec::new(),
    })
  }

  /// Compute every node's neighbor list: other nodes within
  /// `NEIGHBOR_RADIUS_FACTOR * spacing`, stopping at 6.
  ///
  /// Only the 3x3x3 lattice window can hold such nodes, and scanning it in
  /// index order yields `-x, -y, -z, +z, +y, +x`.
  pub fn link_neighbors(&mut self) {
    let radius = NEIGHBOR_RADIUS_FACTOR * self.spacing;
    let dims = self.dims;

    self.neighbors = (0..self.positions.len())
      .map(|node| {
        let [x, y, z] = index_to_coord(node, dims);
        let origin = self.positions[node];
        let mut found = Neighbors::new();

        'search: for nx in x.saturating_sub(1)..=(x + 1).min(dims[0] - 1) {
          for ny in y.saturating_sub(1)..=(y + 1).min(dims[1] - 1) {
            for nz in z.saturating_sub(1)..=(z + 1).min(dims[2] - 1) {
              let other = coord_to_index(nx, ny, nz, dims);
              let distance = origin.distance(self.positions[other]);
              if distance > DISTANCE_EPSILON && distance <= radius + DISTANCE_EPSILON {
                found.push(other as u32);
                if found.len() == MAX_NEIGHBORS {
                  break 'search;
                }
              }
            }
          }
        }

        found
      })
      .collect();
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  #[inline]
  pub fn dims(&self) -> [usize; 3] {
    self.dims
  }

  #[inline]
  pub fn spacing(&self) -> f32 {
    self.spacing
  }

  #[inline]
  pub fn index(&self, x: usize, y: usize, z: usize) -> u32 {
    coord_to_index(x, y, z, self.dims) as u32
  }

  #[inline]
  pub fn coord(&self, node: u32) -> [usize; 3] {
    index_to_coord(node as usize, self.dims)
  }

  #[inline]
  pub fn position(&self, node: u32) -> Vec3 {
    self.positions[node as usize]
  }

  #[inline]
  pub fn positions(&self) -> &[Vec3] {
    &self.positions
  }

  /// Move a node. Only the interior variant relocates nodes.
  #[inline]
  pub fn set_position(&mut self, node: u32, position: Vec3) {
    self.positions[node as usize] = position;
  }

  #[inline]
  pub fn is_active(&self, node: u32) -> bool {
    self.active[node as usize]
  }

  #[inline]
  pub fn set_active(&mut self, node: u32, active: bool) {
    self.active[node as usize] = active;
  }

  pub fn active_count(&self) -> usize {
    self.active.iter().filter(|&&a| a).count()
  }

  /// Neighbor list of `node`; empty until [`NodeGraph::link_neighbors`] ran.
  #[inline]
  pub fn neighbors(&self, node: u32) -> &[u32] {
    self
      .neighbors
      .get(node as usize)
      .map(|n| n.as_slice())
      .unwrap_or(&[])
  }

  /// Nodes with fewer than 6 neighbors sit on the lattice boundary.
  #[inline]
  pub fn is_boundary(&self, node: u32) -> bool {
    self.neighbors(node).len() < MAX_NEIGHBORS
  }

  /// Linear scan for the candidate closest to `point`.
  ///
  /// Ties go to the lowest node index. With `max_distance`, a candidate is
  /// only accepted when its distance is at most that value.
  pub fn nearest(
    &self,
    point: Vec3,
    candidates: impl IntoIterator<Item = u32>,
    max_distance: Option<f32>,
  ) -> Option<u32> {
    let mut best: Option<(u32, f32)> = None;

    for node in candidates {
      let distance_sq = self.positions[node as usize].distance_squared(point);
      let closer = match best {
        None => true,
        Some((best_node, best_sq)) => {
          distance_sq < best_sq || (distance_sq == best_sq && node < best_node)
        }
      };
      if closer {
        best = Some((node, distance_sq));
      }
    }

    let (node, distance_sq) = best?;
    match max_distance {
      Some(max) if distance_sq.sqrt() > max => None,
      _ => Some(node),
    }
  }

  /// Nearest node matching `accept` within `max_distance` of `point`, searching
  /// only the lattice window around it.
  ///
  /// Equivalent to [`NodeGraph::nearest`] over the accepted nodes as long as
  /// nodes sit on their lattice positions (exterior variant).
  pub fn nearest_in_window(
    &self,
    point: Vec3,
    max_distance: f32,
    accept: impl Fn(u32) -> bool,
  ) -> Option<u32> {
    let reach = ((max_distance / self.spacing).ceil() as i64).saturating_add(1);
    let mut lo = [0usize; 3];
    let mut hi = [0usize; 3];

    for axis in 0..3 {
      let half = (self.dims[axis] - 1) as f32 * 0.5;
      let last = self.dims[axis] as i64 - 1;
      // Far-away points clamp to just outside the window.
      let outside = reach.saturating_add(1) as f32;
      let center = (point[axis] / self.spacing + half)
        .round()
        .clamp(-outside, last as f32 + outside) as i64;
      let from = center.saturating_sub(reach).max(0);
      let to = center.saturating_add(reach).min(last);
      if from > to {
        return None;
      }
      lo[axis] = from as usize;
      hi[axis] = to as usize;
    }

    let window = (lo[0]..=hi[0]).flat_map(|x| {
      (lo[1]..=hi[1]).flat_map(move |y| (lo[2]..=hi[2]).map(move |z| (x, y, z)))
    });
    let candidates = window
      .map(|(x, y, z)| self.index(x, y, z))
      .filter(|&node| accept(node));

    self.nearest(point, candidates, Some(max_distance))
  }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;
