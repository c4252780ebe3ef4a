//! voxel_shatter - occupancy grid to shell mesh triangulation with
//! destructible impacts.
//!
//! A boolean occupancy grid becomes a lattice of control nodes. Every unit
//! cube of that lattice gets a configuration byte from its 8 corners, and a
//! 256-entry face table turns the byte into triangles. Two variants exist:
//!
//! - **Exterior**: the skin of a solid seen from outside. Impacts remove the
//!   nearest solid node (or refill a removed one) and the mesh is rebuilt.
//! - **Interior**: the walls of a hollow shape seen from inside. Impacts dent
//!   the nearest node without retriangulating.
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use voxel_shatter::{OccupancyGrid, ShellConfig, VoxelShell};
//!
//! let grid = OccupancyGrid::filled([8, 8, 8])?;
//! let mut shell = VoxelShell::build_from_grid(&grid, ShellConfig::default().with_spacing(0.5))?;
//!
//! let outcome = shell.apply_impact(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -3.0, 0.0));
//!
//! println!("{:?}: {} triangles", outcome, shell.mesh().triangle_count());
//! ```

pub mod constants;
pub mod corner;
pub mod error;
pub mod grid;
pub mod types;

// Re-export commonly used items
pub use constants::{coord_to_index, index_to_coord};
pub use corner::Corner;
pub use error::{Result, ShatterError};
pub use grid::OccupancyGrid;
pub use types::{
  MeshOutput, MinMaxAABB, NormalMode, ShellConfig, ShellVariant, Triangle, Vertex,
};

// Configuration byte -> face groups
pub mod tables;
pub use tables::{CellFaces, Face, TableKind, EXTERIOR_TABLE, INTERIOR_TABLE};

// Node arena and cube cells over it
pub mod graph;
pub mod lattice;
pub use graph::NodeGraph;
pub use lattice::CubeLattice;

// Mesh generation
pub mod assembler;
pub use assembler::{normals, MeshAssembler};

// Impact handling
pub mod mutation;
pub use mutation::{ImpactKind, ImpactOutcome, NodeSets, NodeState};

// Shell isolation - one owning context per meshed grid
pub mod shell;
pub use shell::{ShellId, VoxelShell};

// Engine-agnostic metrics (enable with the `metrics` feature)
pub mod metrics;
