use std::collections::{HashMap, HashSet};

use super::*;
use crate::grid::OccupancyGrid;
use crate::tables::{TableKind, EXTERIOR_TABLE, INTERIOR_TABLE};

fn build(grid: &OccupancyGrid, table: &[CellFaces; 256]) -> MeshOutput {
  let graph = NodeGraph::build(grid, 1.0).unwrap();
  let lattice = CubeLattice::new(&graph);
  let mut output = MeshOutput::new();
  MeshAssembler::new().build(&graph, &lattice, table, NormalMode::default(), &mut output);
  output
}

fn key(p: [f32; 3]) -> [u32; 3] {
  p.map(f32::to_bits)
}

fn unique_positions(output: &MeshOutput) -> usize {
  output.positions().map(key).collect::<HashSet<_>>().len()
}

/// Every directed edge (by position) must be matched by its reverse.
fn is_closed(output: &MeshOutput) -> bool {
  let mut edges: HashMap<([u32; 3], [u32; 3]), i32> = HashMap::new();
  for tri in output.triangles() {
    let p = tri.0.map(|i| key(output.vertices[i as usize].position));
    for (a, b) in [(p[0], p[1]), (p[1], p[2]), (p[2], p[0])] {
      *edges.entry((a, b)).or_default() += 1;
    }
  }
  edges
    .iter()
    .all(|(&(a, b), &count)| edges.get(&(b, a)).copied().unwrap_or(0) == count)
}

#[test]
fn test_full_cube_has_hard_edges() {
  let output = build(&OccupancyGrid::filled([2, 2, 2]).unwrap(), &EXTERIOR_TABLE);

  assert_eq!(output.triangle_count(), 12);
  // Every face is sealed, so each face gets its own 4 vertices.
  assert_eq!(output.vertices.len(), 24);
  assert_eq!(unique_positions(&output), 8);
  assert!(is_closed(&output));
  assert_eq!(output.bounds.min, [-0.5; 3]);
  assert_eq!(output.bounds.max, [0.5; 3]);
}

#[test]
fn test_full_cube_normals_point_out() {
  let output = build(&OccupancyGrid::filled([2, 2, 2]).unwrap(), &EXTERIOR_TABLE);
  for tri in output.triangles() {
    let v = tri.0.map(|i| output.vertices[i as usize]);
    let centroid: [f32; 3] =
      std::array::from_fn(|axis| (v[0].position[axis] + v[1].position[axis] + v[2].position[axis]) / 3.0);
    let normal = v[0].normal;
    let dot = normal[0] * centroid[0] + normal[1] * centroid[1] + normal[2] * centroid[2];
    assert!(dot > 0.0, "normal {:?} at {:?}", normal, centroid);
  }
}

#[test]
fn test_single_corner_emits_nothing() {
  let mut grid = OccupancyGrid::new([2, 2, 2]).unwrap();
  grid.set(0, 1, 0, true);

  for table in [&EXTERIOR_TABLE, &INTERIOR_TABLE] {
    let output = build(&grid, table);
    assert!(output.is_empty());
    assert_eq!(output.triangle_count(), 0);
  }
}

#[test]
fn test_interior_corner_triangle() {
  // BLL, BLR, BUR of the lone cube: (0,0,1), (1,0,1), (1,1,1)
  let mut grid = OccupancyGrid::new([2, 2, 2]).unwrap();
  grid.set(0, 0, 1, true);
  grid.set(1, 0, 1, true);
  grid.set(1, 1, 1, true);

  let output = build(&grid, &INTERIOR_TABLE);
  assert_eq!(output.triangle_count(), 1);
  assert_eq!(output.vertices.len(), 3);
  // Faces the cell center, i.e. towards -z.
  assert!(output.vertices[0].normal[2] < -0.99);
}

#[test]
fn test_build_is_idempotent() {
  let grid = OccupancyGrid::hollow_cube(4).unwrap();
  let graph = NodeGraph::build(&grid, 0.5).unwrap();
  let lattice = CubeLattice::new(&graph);
  let mut assembler = MeshAssembler::new();

  for kind in [TableKind::Exterior, TableKind::Interior] {
    let mut first = MeshOutput::new();
    let mut second = MeshOutput::new();
    assembler.build(&graph, &lattice, kind.table(), NormalMode::default(), &mut first);
    assembler.build(&graph, &lattice, kind.table(), NormalMode::default(), &mut second);
    assert_eq!(first, second);
    assert!(!first.is_empty());
  }
}

#[test]
fn test_hollow_cube_exterior_is_closed() {
  let output = build(&OccupancyGrid::hollow_cube(5).unwrap(), &EXTERIOR_TABLE);
  assert!(output.triangle_count() > 0);
  assert!(is_closed(&output));
  assert!(output.indices.iter().all(|&i| (i as usize) < output.vertices.len()));
}

#[test]
fn test_reuses_buffers() {
  let grid = OccupancyGrid::filled([2, 2, 2]).unwrap();
  let graph = NodeGraph::build(&grid, 1.0).unwrap();
  let lattice = CubeLattice::new(&graph);
  let mut output = MeshOutput::new();
  output.indices.extend([7, 7, 7]);

  MeshAssembler::new().build(&graph, &lattice, &EXTERIOR_TABLE, NormalMode::default(), &mut output);
  assert_eq!(output.triangle_count(), 12);
}

#[test]
fn test_relocate_vertices() {
  let mut output = build(&OccupancyGrid::filled([2, 2, 2]).unwrap(), &EXTERIOR_TABLE);
  let from = Vec3::splat(0.5);
  let to = Vec3::new(0.6, 0.5, 0.5);

  // The (1,1,1) corner belongs to 3 faces, each with its own vertex.
  assert_eq!(relocate_vertices(&mut output, from, to), 3);
  assert_eq!(relocate_vertices(&mut output, from, to), 0);
  assert_eq!(output.bounds.max, [0.6, 0.5, 0.5]);
}
