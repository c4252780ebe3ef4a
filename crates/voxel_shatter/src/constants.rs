//! Lattice layout and mutation tunables.
//!
//! # Node Layout
//!
//! ```text
//! Node memory layout (row-major, Z innermost) for a lattice of X*Y*Z nodes:
//!
//! index:   0       1      ...  Z-1        Z       ...  Y*Z     ...
//! node:  [0,0,0] [0,0,1] ... [0,0,Z-1] [0,1,0] ... [1,0,0] ...
//!        └──────── Z ─────────┘└───── Z ─────┘
//!
//! index = x * Y * Z + y * Z + z
//! ```
//!
//! A lattice of `[X, Y, Z]` nodes holds `(X-1)(Y-1)(Z-1)` cells. Cells use
//! the same layout over `[X-1, Y-1, Z-1]`, keyed by their front-low-left node.

/// Neighbors are nodes closer than this many spacings (one lattice step, not
/// the √2 face diagonal).
pub const NEIGHBOR_RADIUS_FACTOR: f32 = 1.3;

/// A node fully inside the lattice has exactly ±x, ±y, ±z neighbors.
pub const MAX_NEIGHBORS: usize = 6;

/// Distances at or below this are treated as the same point.
pub const DISTANCE_EPSILON: f32 = 1e-4;

/// Additive impacts search from `point + dir(force) * ADD_BIAS_FACTOR * spacing`.
pub const ADD_BIAS_FACTOR: f32 = 2.0 / 3.0;

/// Additive impacts only attach within this many spacings of the bias point.
pub const ADD_SEARCH_FACTOR: f32 = 2.0;

/// Interior displacement damping.
pub const DEFAULT_ATTENUATOR: f32 = 100.0;
pub const MIN_ATTENUATOR: f32 = 1.0;
pub const MAX_ATTENUATOR: f32 = 500.0;

/// Vertex cache sentinel: node has no vertex in the current build.
pub const NO_VERTEX: i32 = -1;

/// Convert 3D lattice coordinates to a flat index.
#[inline(always)]
pub const fn coord_to_index(x: usize, y: usize, z: usize, dims: [usize; 3]) -> usize {
  (x * dims[1] + y) * dims[2] + z
}

/// Convert a flat index back to 3D lattice coordinates.
#[inline(always)]
pub const fn index_to_coord(index: usize, dims: [usize; 3]) -> [usize; 3] {
  let z = index % dims[2];
  let y = (index / dims[2]) % dims[1];
  let x = index / (dims[1] * dims[2]);
  [x, y, z]
}

/// Number of cube cells between `dims` nodes.
#[inline(always)]
pub const fn cell_dims(dims: [usize; 3]) -> [usize; 3] {
  [
    dims[0].saturating_sub(1),
    dims[1].saturating_sub(1),
    dims[2].saturating_sub(1),
  ]
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
