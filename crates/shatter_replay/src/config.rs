//! Scene parsing for impact replays.

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;
use std::path::Path;
use voxel_shatter::{
	ImpactKind, NormalMode, OccupancyGrid, ShellConfig, ShellVariant,
	constants::DEFAULT_ATTENUATOR,
};

/// Root scene description.
#[derive(Debug, Deserialize)]
pub struct Scene {
	/// Distance between lattice nodes.
	#[serde(default = "default_spacing")]
	pub spacing: f32,
	/// Which shell to build.
	#[serde(default)]
	pub variant: VariantConfig,
	/// Interior only: force divisor.
	#[serde(default = "default_attenuator")]
	pub attenuator: f32,
	/// Normal averaging.
	#[serde(default)]
	pub normal_mode: NormalModeConfig,
	/// Occupancy source.
	pub grid: GridConfig,
	/// Impacts, applied in order.
	#[serde(default)]
	pub impacts: Vec<ImpactConfig>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantConfig {
	#[default]
	Exterior,
	Interior,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalModeConfig {
	#[default]
	Area,
	Angle,
}

/// Occupancy grid generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridConfig {
	/// Only the boundary layer of a `size`³ cube is occupied.
	HollowCube { size: usize },
	/// Every cell of a box is occupied.
	SolidBox { dims: [usize; 3] },
}

/// One impact event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImpactConfig {
	/// Impact position in shell-local space.
	pub point: [f32; 3],
	/// Impact force (defaults to zero).
	#[serde(default)]
	pub force: [f32; 3],
	/// Exterior only: remove (default) or add.
	#[serde(default)]
	pub kind: ImpactKindConfig,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactKindConfig {
	#[default]
	Remove,
	Add,
}

fn default_spacing() -> f32 {
	1.0
}

fn default_attenuator() -> f32 {
	DEFAULT_ATTENUATOR
}

impl Scene {
	/// Load a scene from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read scene file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate scene TOML.
	pub fn parse(content: &str) -> Result<Self> {
		let scene: Scene = toml::from_str(content).context("Failed to parse scene TOML")?;

		scene
			.shell_config()
			.validate()
			.context("Invalid shell settings")?;
		match scene.grid {
			GridConfig::HollowCube { size } if size < 2 => {
				anyhow::bail!("hollow_cube size must be at least 2, got {}", size);
			}
			GridConfig::SolidBox { dims } if dims.iter().any(|&d| d < 2) => {
				anyhow::bail!("solid_box dims must be at least 2 on every axis, got {:?}", dims);
			}
			_ => {}
		}

		Ok(scene)
	}

	/// Library configuration for this scene.
	pub fn shell_config(&self) -> ShellConfig {
		let normal_mode = match self.normal_mode {
			NormalModeConfig::Area => NormalMode::AreaWeighted,
			NormalModeConfig::Angle => NormalMode::AngleWeighted,
		};
		let config = ShellConfig::default()
			.with_spacing(self.spacing)
			.with_normal_mode(normal_mode);

		match self.variant {
			VariantConfig::Exterior => config.with_variant(ShellVariant::Exterior),
			VariantConfig::Interior => config.with_attenuator(self.attenuator),
		}
	}

	/// Build the occupancy grid.
	pub fn occupancy(&self) -> Result<OccupancyGrid> {
		let grid = match self.grid {
			GridConfig::HollowCube { size } => OccupancyGrid::hollow_cube(size)?,
			GridConfig::SolidBox { dims } => OccupancyGrid::filled(dims)?,
		};
		Ok(grid)
	}
}

impl ImpactConfig {
	pub fn point(&self) -> Vec3 {
		Vec3::from_array(self.point)
	}

	pub fn force(&self) -> Vec3 {
		Vec3::from_array(self.force)
	}

	pub fn kind(&self) -> ImpactKind {
		match self.kind {
			ImpactKindConfig::Remove => ImpactKind::Remove,
			ImpactKindConfig::Add => ImpactKind::Add,
		}
	}
}
