//! Core data types for shell meshing.

use crate::constants::{DEFAULT_ATTENUATOR, MAX_ATTENUATOR, MIN_ATTENUATOR};
use crate::error::{Result, ShatterError};

/// Normal computation mode for mesh generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalMode {
  /// Sum of unnormalized face normals (larger faces weigh more).
  #[default]
  AreaWeighted,

  /// Face normals weighted by the interior angle at each vertex.
  AngleWeighted,
}

/// Which side of the shell is meant to be seen, and how impacts act on it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ShellVariant {
  /// Viewer inside a hollow shape. Impacts dent the nearest node by
  /// `force / attenuator` without retriangulating.
  Interior {
    /// Divides the impact force before it is applied as a displacement.
    attenuator: f32,
  },

  /// Viewer outside a solid. Impacts remove or add nodes and the mesh is
  /// rebuilt.
  #[default]
  Exterior,
}

impl ShellVariant {
  /// Interior variant with the default attenuator.
  pub const fn interior() -> Self {
    ShellVariant::Interior {
      attenuator: DEFAULT_ATTENUATOR,
    }
  }

  pub fn is_exterior(&self) -> bool {
    matches!(self, ShellVariant::Exterior)
  }
}

/// Output vertex with all mesh attributes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  /// Vertex position in shell-local coordinates (lattice centered on origin).
  pub position: [f32; 3],

  /// Surface normal (unit vector).
  pub normal: [f32; 3],
}

impl Vertex {
  pub fn new(position: [f32; 3]) -> Self {
    Self {
      position,
      ..Default::default()
    }
  }
}

impl Default for Vertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 1.0, 0.0],
    }
  }
}

/// Three vertex-buffer indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle(pub [u32; 3]);

impl Triangle {
  /// Whether `index` is one of the triangle's vertices.
  #[inline]
  pub fn contains(&self, index: u32) -> bool {
    self.0.contains(&index)
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Mesh generation result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshOutput {
  /// Output vertices with positions and normals.
  pub vertices: Vec<Vertex>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
    self
      .indices
      .chunks_exact(3)
      .map(|tri| Triangle([tri[0], tri[1], tri[2]]))
  }

  pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
    self.vertices.iter().map(|v| v.position)
  }

  pub fn normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
    self.vertices.iter().map(|v| v.normal)
  }

  /// Recompute bounds from the current vertex positions.
  pub fn recompute_bounds(&mut self) {
    let mut bounds = MinMaxAABB::empty();
    for vertex in &self.vertices {
      bounds.encapsulate(vertex.position);
    }
    self.bounds = bounds;
  }
}

/// Configuration for a shell.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellConfig {
  /// Distance between adjacent lattice nodes.
  pub spacing: f32,

  /// Interior or exterior triangulation and impact handling.
  pub variant: ShellVariant,

  /// Normal computation mode.
  pub normal_mode: NormalMode,
}

impl Default for ShellConfig {
  fn default() -> Self {
    Self {
      spacing: 1.0,
      variant: ShellVariant::default(),
      normal_mode: NormalMode::default(),
    }
  }
}

impl ShellConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_spacing(mut self, spacing: f32) -> Self {
    self.spacing = spacing;
    self
  }

  pub fn with_variant(mut self, variant: ShellVariant) -> Self {
    self.variant = variant;
    self
  }

  /// Switch to the interior variant. Positive values are clamped to the
  /// `[MIN_ATTENUATOR, MAX_ATTENUATOR]` range; anything else is kept so that
  /// [`ShellConfig::validate`] rejects it.
  pub fn with_attenuator(mut self, attenuator: f32) -> Self {
    let attenuator = if attenuator > 0.0 {
      attenuator.clamp(MIN_ATTENUATOR, MAX_ATTENUATOR)
    } else {
      attenuator
    };
    self.variant = ShellVariant::Interior { attenuator };
    self
  }

  pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
    self.normal_mode = mode;
    self
  }

  pub fn validate(&self) -> Result<()> {
    if !self.spacing.is_finite() || self.spacing <= 0.0 {
      return Err(ShatterError::InvalidSpacing(self.spacing));
    }
    if let ShellVariant::Interior { attenuator } = self.variant {
      if !attenuator.is_finite() || attenuator <= 0.0 {
        return Err(ShatterError::InvalidAttenuator(attenuator));
      }
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
