//! Wavefront OBJ export.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use voxel_shatter::MeshOutput;

/// Write `mesh` as OBJ text. `comments` go into the header, one per line.
pub fn write_obj(mesh: &MeshOutput, comments: &[String], out: &mut impl Write) -> std::io::Result<()> {
	writeln!(out, "# voxel_shatter shell")?;
	writeln!(
		out,
		"# {} vertices, {} triangles",
		mesh.vertices.len(),
		mesh.triangle_count()
	)?;
	for comment in comments {
		writeln!(out, "# {}", comment)?;
	}

	for [x, y, z] in mesh.positions() {
		writeln!(out, "v {} {} {}", x, y, z)?;
	}
	for [x, y, z] in mesh.normals() {
		writeln!(out, "vn {} {} {}", x, y, z)?;
	}
	// OBJ indices are 1-based; normals share the vertex index.
	for tri in mesh.triangles() {
		let [a, b, c] = tri.0.map(|i| i + 1);
		writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
	}

	Ok(())
}

/// Write `mesh` to an OBJ file, creating parent directories.
pub fn save_obj(path: &Path, mesh: &MeshOutput, comments: &[String]) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)
			.with_context(|| format!("Failed to create output dir: {}", parent.display()))?;
	}

	let file =
		File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
	let mut writer = BufWriter::new(file);
	write_obj(mesh, comments, &mut writer)
		.and_then(|_| writer.flush())
		.with_context(|| format!("Failed to write: {}", path.display()))?;

	Ok(())
}
