//! Boolean occupancy volume fed to the node graph.
//!
//! Any producer works as long as it yields one flag per lattice point; the
//! hollow cube below is the reference one.

use crate::constants::{coord_to_index, index_to_coord};
use crate::error::{Result, ShatterError};

/// `[X, Y, Z]` occupancy flags, x-major with z fastest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
  dims: [usize; 3],
  cells: Vec<bool>,
}

impl OccupancyGrid {
  /// Empty grid. Every dimension must be at least 2 so a cube cell can form.
  pub fn new(dims: [usize; 3]) -> Result<Self> {
    Self::from_fn(dims, |_, _, _| false)
  }

  /// Fully occupied grid.
  pub fn filled(dims: [usize; 3]) -> Result<Self> {
    Self::from_fn(dims, |_, _, _| true)
  }

  /// Grid whose occupancy is `f(x, y, z)`.
  pub fn from_fn(dims: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> bool) -> Result<Self> {
    check_dims(dims)?;
    let len = dims[0] * dims[1] * dims[2];
    let cells = (0..len)
      .map(|i| {
        let [x, y, z] = index_to_coord(i, dims);
        f(x, y, z)
      })
      .collect();
    Ok(Self { dims, cells })
  }

  /// Grid from flat flags already laid out x-major, z fastest.
  pub fn from_flat(dims: [usize; 3], cells: Vec<bool>) -> Result<Self> {
    check_dims(dims)?;
    let expected = dims[0] * dims[1] * dims[2];
    if cells.len() != expected {
      return Err(ShatterError::GridSizeMismatch {
        expected,
        actual: cells.len(),
      });
    }
    Ok(Self { dims, cells })
  }

  /// Hollow cube of `size` nodes per axis: only the outer layer is occupied.
  pub fn hollow_cube(size: usize) -> Result<Self> {
    Self::hollow_box([size; 3])
  }

  /// Hollow box: occupied iff `x*y*z == 0` or any coordinate is at its
  /// maximum.
  pub fn hollow_box(dims: [usize; 3]) -> Result<Self> {
    Self::from_fn(dims, |x, y, z| {
      x * y * z == 0 || x == dims[0] - 1 || y == dims[1] - 1 || z == dims[2] - 1
    })
  }

  #[inline]
  pub fn dims(&self) -> [usize; 3] {
    self.dims
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  /// Occupancy at `(x, y, z)`. Out-of-range coordinates read as empty.
  #[inline]
  pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
    self.in_bounds(x, y, z) && self.cells[coord_to_index(x, y, z, self.dims)]
  }

  /// Set occupancy at `(x, y, z)`. Out-of-range coordinates are ignored.
  pub fn set(&mut self, x: usize, y: usize, z: usize, occupied: bool) {
    if self.in_bounds(x, y, z) {
      let index = coord_to_index(x, y, z, self.dims);
      self.cells[index] = occupied;
    }
  }

  #[inline]
  pub fn as_slice(&self) -> &[bool] {
    &self.cells
  }

  pub fn occupied_count(&self) -> usize {
    self.cells.iter().filter(|&&c| c).count()
  }

  #[inline]
  fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
    x < self.dims[0] && y < self.dims[1] && z < self.dims[2]
  }
}

fn check_dims(dims: [usize; 3]) -> Result<()> {
  if dims.iter().any(|&d| d < 2) {
    return Err(ShatterError::InvalidDimensions { dims });
  }
  Ok(())
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
