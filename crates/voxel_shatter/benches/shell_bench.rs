//! Shell build and impact benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use voxel_shatter::{
  CubeLattice, ImpactKind, MeshAssembler, MeshOutput, NodeGraph, NormalMode, OccupancyGrid,
  ShellConfig, ShellVariant, VoxelShell, EXTERIOR_TABLE, INTERIOR_TABLE,
};

const SIZES: [usize; 3] = [8, 16, 32];

/// Full build (graph, lattice, mesh) of hollow cubes.
fn bench_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("build_from_grid");

  for size in SIZES {
    let grid = OccupancyGrid::hollow_cube(size).unwrap();

    group.bench_with_input(BenchmarkId::new("exterior", size), &grid, |b, grid| {
      b.iter(|| VoxelShell::build_from_grid(black_box(grid), ShellConfig::default()).unwrap())
    });

    let interior = ShellConfig::default().with_variant(ShellVariant::interior());
    group.bench_with_input(BenchmarkId::new("interior", size), &grid, |b, grid| {
      b.iter(|| VoxelShell::build_from_grid(black_box(grid), interior.clone()).unwrap())
    });
  }

  group.finish();
}

/// Mesh assembly alone, reusing buffers.
fn bench_assemble(c: &mut Criterion) {
  let mut group = c.benchmark_group("assemble");

  for size in SIZES {
    let grid = OccupancyGrid::hollow_cube(size).unwrap();
    let graph = NodeGraph::build(&grid, 1.0).unwrap();
    let lattice = CubeLattice::new(&graph);
    let mut assembler = MeshAssembler::new();
    let mut output = MeshOutput::new();

    group.bench_function(BenchmarkId::new("exterior", size), |b| {
      b.iter(|| {
        assembler.build(&graph, &lattice, &EXTERIOR_TABLE, NormalMode::AreaWeighted, &mut output);
        black_box(output.triangle_count())
      })
    });
    group.bench_function(BenchmarkId::new("interior", size), |b| {
      b.iter(|| {
        assembler.build(&graph, &lattice, &INTERIOR_TABLE, NormalMode::AngleWeighted, &mut output);
        black_box(output.triangle_count())
      })
    });
  }

  group.finish();
}

/// Removal impact plus rebuild on a solid block, then refilling the hole.
fn bench_impacts(c: &mut Criterion) {
  let mut group = c.benchmark_group("impact");

  for size in SIZES {
    let grid = OccupancyGrid::filled([size; 3]).unwrap();
    let point = Vec3::ZERO;
    let force = Vec3::new(0.0, -1.0, 0.0);

    group.bench_function(BenchmarkId::new("remove_add", size), |b| {
      let mut shell = VoxelShell::build_from_grid(&grid, ShellConfig::default()).unwrap();
      b.iter(|| {
        let removed = shell.apply_impact_kind(black_box(point), force, ImpactKind::Remove);
        let added = shell.apply_impact_kind(black_box(point), force, ImpactKind::Add);
        black_box((removed, added))
      })
    });

    let interior = ShellConfig::default().with_variant(ShellVariant::interior());
    let hollow = OccupancyGrid::hollow_cube(size).unwrap();
    group.bench_function(BenchmarkId::new("displace", size), |b| {
      let mut shell = VoxelShell::build_from_grid(&hollow, interior.clone()).unwrap();
      b.iter(|| black_box(shell.apply_impact(black_box(point), force)))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_build, bench_assemble, bench_impacts);
criterion_main!(benches);
