//! Impact replay tool.
//!
//! Builds a voxel shell from a scene file, applies the scene's impacts in
//! order and writes the resulting mesh as Wavefront OBJ.
//!
//! Log output honors `RUST_LOG`; `--verbose` lowers the default to `debug`.

mod config;
mod export;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use voxel_shatter::{ImpactOutcome, NodeState, VoxelShell};

use config::Scene;

/// Replays impact scenes against a voxel shell.
#[derive(Parser, Debug)]
#[command(name = "replay_impacts")]
#[command(about = "Applies a scene's impacts to a voxel shell and exports the mesh as OBJ")]
struct Args {
	/// Path to scene TOML file.
	#[arg(short, long)]
	scene: PathBuf,

	/// Output OBJ path (default: scene path with .obj extension).
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Debug logging unless RUST_LOG says otherwise.
	#[arg(short, long)]
	verbose: bool,
}

/// Per-outcome impact counts.
#[derive(Debug, Default)]
struct Tally {
	removed: usize,
	added: usize,
	displaced: usize,
	missed: usize,
}

impl Tally {
	fn record(&mut self, outcome: &ImpactOutcome) {
		match outcome {
			ImpactOutcome::Removed { .. } => self.removed += 1,
			ImpactOutcome::Added { .. } => self.added += 1,
			ImpactOutcome::Displaced { .. } => self.displaced += 1,
			ImpactOutcome::NoCandidate => self.missed += 1,
		}
	}

	fn summary(&self) -> String {
		format!(
			"impacts: {} removed, {} added, {} displaced, {} without candidate",
			self.removed, self.added, self.displaced, self.missed
		)
	}
}

fn main() -> Result<()> {
	let args = Args::parse();

	let default_level = if args.verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let output = args
		.output
		.clone()
		.unwrap_or_else(|| args.scene.with_extension("obj"));

	info!("Loading scene from: {}", args.scene.display());
	let scene = Scene::load(&args.scene)?;

	let grid = scene.occupancy()?;
	let mut shell = VoxelShell::build_from_grid(&grid, scene.shell_config())
		.context("Failed to build shell")?;
	info!(
		dims = ?grid.dims(),
		variant = ?shell.variant(),
		vertices = shell.mesh().vertices.len(),
		triangles = shell.mesh().triangle_count(),
		"Built shell"
	);

	let mut tally = Tally::default();
	for (i, impact) in scene.impacts.iter().enumerate() {
		let outcome = shell.apply_impact_kind(impact.point(), impact.force(), impact.kind());
		tally.record(&outcome);
		debug!(
			impact = i,
			?outcome,
			triangles = shell.mesh().triangle_count(),
			"Applied impact"
		);
	}

	let mut comments = vec![tally.summary()];
	if let Some(sets) = shell.node_sets() {
		comments.push(format!(
			"nodes: {} active, {} activable, {} deactivated",
			sets.count(NodeState::Active),
			sets.count(NodeState::Activable),
			sets.count(NodeState::Deactivated)
		));
	}
	for comment in &comments {
		info!("{}", comment);
	}

	export::save_obj(&output, shell.mesh(), &comments)?;
	info!(
		vertices = shell.mesh().vertices.len(),
		triangles = shell.mesh().triangle_count(),
		"Wrote {}",
		output.display()
	);

	Ok(())
}
